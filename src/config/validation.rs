//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and formats (addresses, URLs, timeouts)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{ServiceConfig, SinkKind};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("event_log.file_path is required when sink = \"file\"")]
    MissingFilePath,

    #[error("downstream.url '{0}' is not a valid URL")]
    DownstreamUrl(String),

    #[error("downstream.timeout_secs must be greater than zero")]
    ZeroTimeout,
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.event_log.sink == SinkKind::File && config.event_log.file_path.trim().is_empty() {
        errors.push(ValidationError::MissingFilePath);
    }

    if Url::parse(&config.downstream.url).is_err() {
        errors.push(ValidationError::DownstreamUrl(config.downstream.url.clone()));
    }

    if config.downstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "localhost".into();
        config.event_log.sink = SinkKind::File;
        config.downstream.url = "not a url".into();
        config.downstream.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::MissingFilePath,
                ValidationError::DownstreamUrl("not a url".into()),
                ValidationError::ZeroTimeout,
            ]
        );
    }
}
