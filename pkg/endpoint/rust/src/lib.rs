// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Lifecycle wrapper for network-facing connectors.
//!
//! A [`ManagedConnectorService`] turns a declarative [`ConnectorConfig`] plus
//! two runtime dependencies (a shared [`CacheManager`] and a
//! [`SocketBindingResolver`]) into a running [`Connector`], and guarantees
//! teardown on stop or on any start failure. Connector implementations are
//! registered by kind in a [`ConnectorRegistry`].

pub mod binding;
pub mod config;
pub mod connector;
pub mod error;
pub mod group;
pub mod logger;
pub mod properties;
pub mod registry;
pub mod service;
pub mod state;

pub use binding::{SocketBindingResolver, StaticSocketBindings};
pub use config::{ConnectorConfig, ConnectorDefinition, StateTransferConfig, load_definitions};
pub use connector::{
    CacheManager, Connector, ConnectorHandle, ConnectorKind, SharedCacheManager, Transport,
};
pub use error::{BindingError, ConnectorError, Result};
pub use group::{CacheContainers, EndpointGroup};
pub use properties::PropertyBag;
pub use registry::{ConnectorFactory, ConnectorRegistry};
pub use service::ManagedConnectorService;
pub use state::ServiceState;
