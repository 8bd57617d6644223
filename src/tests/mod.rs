//! Tests for the Chaster API client.


use std::sync::Arc;

use crate::mocks::MockTransport;
use crate::ChasterClient;

/// Client wired to a mock transport, plus the transport for inspection.
pub(crate) fn mock_client() -> (ChasterClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = ChasterClient::builder()
        .token("mock_token")
        .transport(transport.clone())
        .build()
        .unwrap();
    (client, transport)
}
