//! Chaster API client.
//!
//! [`ChasterClient`] wires configuration, authentication and transport
//! together and exposes one accessor per resource wrapper.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use crate::auth::{AuthProvider, BearerTokenAuth};
use crate::config::{ChasterConfig, ChasterConfigBuilder};
use crate::errors::{ChasterError, ChasterResult};
use crate::request::RequestCore;
use crate::services::{
    CommunityEventsService, ConversationsService, FilesService, KeyholderService, LocksService,
    SharedLocksService, UsersService, UtilService, COMMUNITY_EVENTS_ROUTE, CONVERSATIONS_ROUTE,
    FILES_ROUTE, KEYHOLDER_ROUTE, LOCKS_ROUTE, USERS_ROUTE,
};
use crate::transport::{HttpTransport, ReqwestTransport, TransportClient};

/// The Chaster client.
///
/// Cheap to share: every wrapper holds the same transport, and no call
/// mutates client state.
///
/// # Example
///
/// ```rust,no_run
/// use chaster_client::ChasterClient;
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ChasterClient::builder().token("your_developer_token").build()?;
///
///     let response = client
///         .conversations()
///         .send("conversation-id", &json!({"message": "hi"}))
///         .await?;
///     println!("{}", response.body_as_object()?);
///     Ok(())
/// }
/// ```
pub struct ChasterClient {
    config: ChasterConfig,
    conversations: ConversationsService,
    locks: LocksService,
    keyholder: KeyholderService,
    shared_locks: SharedLocksService,
    files: FilesService,
    community_events: CommunityEventsService,
    users: UsersService,
    util: UtilService,
}

impl ChasterClient {
    /// Creates a new client builder.
    pub fn builder() -> ChasterClientBuilder {
        ChasterClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `CHASTER_TOKEN` and optionally `CHASTER_BASE_URL` and
    /// `CHASTER_TIMEOUT`.
    pub fn from_env() -> ChasterResult<Self> {
        let config = ChasterConfig::from_env()?;
        ChasterClientBuilder::from_config(config).build()
    }

    /// Creates a client from a bearer token with default settings.
    pub fn from_token(token: impl Into<String>) -> ChasterResult<Self> {
        ChasterClientBuilder::new().token(token).build()
    }

    /// Conversations and messages.
    pub fn conversations(&self) -> &ConversationsService {
        &self.conversations
    }

    /// The caller's locks.
    pub fn locks(&self) -> &LocksService {
        &self.locks
    }

    /// Locks held as keyholder.
    pub fn keyholder(&self) -> &KeyholderService {
        &self.keyholder
    }

    /// Shared locks and favorites.
    pub fn shared_locks(&self) -> &SharedLocksService {
        &self.shared_locks
    }

    /// File upload and retrieval.
    pub fn files(&self) -> &FilesService {
        &self.files
    }

    /// Community events.
    pub fn community_events(&self) -> &CommunityEventsService {
        &self.community_events
    }

    /// Public user profiles.
    pub fn users(&self) -> &UsersService {
        &self.users
    }

    /// Utility endpoints.
    pub fn util(&self) -> &UtilService {
        &self.util
    }

    /// Checks that the API root answers `200`.
    pub async fn ping(&self) -> ChasterResult<()> {
        self.util.ping().await
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChasterConfig {
        &self.config
    }
}

impl std::fmt::Debug for ChasterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChasterClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`ChasterClient`].
#[derive(Default)]
pub struct ChasterClientBuilder {
    config_builder: ChasterConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl ChasterClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: ChasterConfig) -> Self {
        let mut config_builder = ChasterConfigBuilder::new()
            .secret_token(config.token().clone())
            .base_url(config.base_url)
            .timeout(config.timeout);
        for (name, value) in config.custom_headers {
            config_builder = config_builder.header(name, value);
        }

        Self {
            config_builder,
            transport: None,
            auth: None,
        }
    }

    /// Sets the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.token(token);
        self
    }

    /// Sets the bearer token from an already wrapped secret.
    pub fn secret_token(mut self, token: SecretString) -> Self {
        self.config_builder = self.config_builder.secret_token(token);
        self
    }

    /// Sets the API root.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom auth provider.
    pub fn auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// [`ChasterError::Configuration`] for a missing or malformed token, an
    /// invalid base URL, or when the HTTP client cannot be created.
    pub fn build(self) -> ChasterResult<ChasterClient> {
        let config = self.config_builder.build()?;

        let auth = self
            .auth
            .unwrap_or_else(|| Arc::new(BearerTokenAuth::new(config.token().clone())) as Arc<dyn AuthProvider>);
        auth.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let transport = ReqwestTransport::new(config.base_url.clone(), config.timeout)
                    .map_err(|e| ChasterError::configuration(format!("HTTP client: {}", e)))?;
                Arc::new(transport) as Arc<dyn HttpTransport>
            }
        };

        let transport_client = Arc::new(
            TransportClient::new(transport, auth).with_default_headers(config.custom_headers.clone()),
        );
        let core = |base_route: &str| RequestCore::new(Arc::clone(&transport_client), base_route);

        Ok(ChasterClient {
            conversations: ConversationsService::new(core(CONVERSATIONS_ROUTE)),
            locks: LocksService::new(core(LOCKS_ROUTE)),
            keyholder: KeyholderService::new(core(KEYHOLDER_ROUTE)),
            shared_locks: SharedLocksService::new(core("")),
            files: FilesService::new(core(FILES_ROUTE)),
            community_events: CommunityEventsService::new(core(COMMUNITY_EVENTS_ROUTE)),
            users: UsersService::new(core(USERS_ROUTE)),
            util: UtilService::new(core("")),
            config,
        })
    }
}
