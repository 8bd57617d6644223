//! Observability for the Chaster client.
//!
//! Transport and wrapper calls are wrapped in `tracing` spans; the bearer
//! token is never recorded.

mod logging;

pub use logging::{
    log_error, log_request, log_response, LogFormat, LogLevel, LoggingConfig, LOG_FORMAT_ENV,
    LOG_LEVEL_ENV,
};
