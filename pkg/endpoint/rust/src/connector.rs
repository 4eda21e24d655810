// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Contracts the service consumes: the connector itself, its transport, and
//! the cache manager it serves.

use crate::properties::PropertyBag;
use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared cache manager. Its lifetime is owned outside the service; the
/// service only hands it to the connector at start.
pub trait CacheManager: Send + Sync + fmt::Debug {
    fn container_name(&self) -> &str;
}

pub type SharedCacheManager = Arc<dyn CacheManager>;

/// Introspection view of a running connector's network transport.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Address the transport is bound to, once bound.
    fn local_address(&self) -> Option<SocketAddr>;

    fn worker_threads(&self) -> usize;
}

/// A network-facing protocol server driven by the service.
///
/// `start` receives the merged property bag and the cache manager. `stop` is
/// only called on an instance whose `start` was invoked. `transport` is
/// queried once after a successful start.
pub trait Connector: Send {
    fn start(
        &mut self,
        properties: &PropertyBag,
        cache_manager: &SharedCacheManager,
    ) -> anyhow::Result<()>;

    fn stop(&mut self) -> anyhow::Result<()>;

    fn transport(&self) -> anyhow::Result<Arc<dyn Transport>>;
}

/// Tag naming a connector implementation, e.g. `hotrod` or `memcached`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ConnectorKind(String);

impl ConnectorKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConnectorKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// Cloneable view of a running connector.
#[derive(Debug, Clone)]
pub struct ConnectorHandle {
    name: String,
    kind: ConnectorKind,
    transport: Arc<dyn Transport>,
}

impl ConnectorHandle {
    pub(crate) fn new(name: String, kind: ConnectorKind, transport: Arc<dyn Transport>) -> Self {
        Self {
            name,
            kind,
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ConnectorKind {
        &self.kind
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn local_address(&self) -> Option<SocketAddr> {
        self.transport.local_address()
    }
}
