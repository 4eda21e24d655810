// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Errors surfaced by the connector service.
//!
//! Start-path failures are always returned to the caller. Stop-path failures
//! never show up here: they are logged and swallowed by the service.

use crate::state::ServiceState;
use thiserror::Error;

/// Cause reported by a connector implementation or factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("[{name}] no connector defined: a socket binding is required")]
    NoConnectorDefined { name: String },

    #[error("[{name}] failed to instantiate connector")]
    Instantiation {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("[{name}] failed to start")]
    Start {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("[{name}] failed to obtain connector transport")]
    TransportIntrospection {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("[{name}] socket binding could not be resolved")]
    SocketBinding {
        name: String,
        #[source]
        source: BindingError,
    },

    #[error("[{name}] connector is not running (state: {state})")]
    IllegalState { name: String, state: ServiceState },

    #[error("no connector registered for kind '{0}'")]
    UnknownConnectorKind(String),

    #[error("no cache container named '{0}'")]
    UnknownCacheContainer(String),
}

impl ConnectorError {
    /// Name of the service the error belongs to, if any.
    pub fn service_name(&self) -> Option<&str> {
        match self {
            ConnectorError::NoConnectorDefined { name }
            | ConnectorError::Instantiation { name, .. }
            | ConnectorError::Start { name, .. }
            | ConnectorError::TransportIntrospection { name, .. }
            | ConnectorError::SocketBinding { name, .. }
            | ConnectorError::IllegalState { name, .. } => Some(name.as_str()),
            ConnectorError::UnknownConnectorKind(_) | ConnectorError::UnknownCacheContainer(_) => {
                None
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("socket binding '{0}' is not defined")]
    NotFound(String),

    #[error("socket binding '{name}' has an invalid address '{address}'")]
    InvalidAddress { name: String, address: String },
}

pub type Result<T> = std::result::Result<T, ConnectorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_start_error_keeps_cause() {
        let err = ConnectorError::Start {
            name: "hotrod default".to_string(),
            source: anyhow::anyhow!("address in use").into(),
        };
        assert_eq!(err.to_string(), "[hotrod default] failed to start");
        assert_eq!(err.source().unwrap().to_string(), "address in use");
        assert_eq!(err.service_name(), Some("hotrod default"));
    }

    #[test]
    fn test_illegal_state_message() {
        let err = ConnectorError::IllegalState {
            name: "memcached".to_string(),
            state: ServiceState::Stopped,
        };
        assert_eq!(
            err.to_string(),
            "[memcached] connector is not running (state: stopped)"
        );
    }

    #[test]
    fn test_unknown_kind_has_no_service_name() {
        let err = ConnectorError::UnknownConnectorKind("websocket".to_string());
        assert!(err.service_name().is_none());
        assert_eq!(
            err.to_string(),
            "no connector registered for kind 'websocket'"
        );
    }

    #[test]
    fn test_binding_error_is_source() {
        let err = ConnectorError::SocketBinding {
            name: "rest".to_string(),
            source: BindingError::NotFound("http".to_string()),
        };
        assert_eq!(
            err.source().unwrap().to_string(),
            "socket binding 'http' is not defined"
        );
    }
}
