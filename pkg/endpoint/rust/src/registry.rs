// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::connector::{Connector, ConnectorKind};
use crate::error::{ConnectorError, Result};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a fresh, unstarted connector.
pub type ConnectorFactory = Arc<dyn Fn() -> anyhow::Result<Box<dyn Connector>> + Send + Sync>;

/// Maps connector kinds to the factories that build them.
#[derive(Clone, Default)]
pub struct ConnectorRegistry {
    factories: HashMap<ConnectorKind, ConnectorFactory>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for `kind`, replacing any earlier registration.
    pub fn register<F>(&mut self, kind: impl Into<ConnectorKind>, factory: F)
    where
        F: Fn() -> anyhow::Result<Box<dyn Connector>> + Send + Sync + 'static,
    {
        let kind = kind.into();
        if self.factories.insert(kind.clone(), Arc::new(factory)).is_some() {
            warn!("connector kind '{kind}' registered twice, keeping the latest factory");
        } else {
            debug!("registered connector kind '{kind}'");
        }
    }

    pub fn contains(&self, kind: &ConnectorKind) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<ConnectorKind> {
        let mut kinds: Vec<_> = self.factories.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    pub fn factory(&self, kind: &ConnectorKind) -> Result<ConnectorFactory> {
        self.factories
            .get(kind)
            .cloned()
            .ok_or_else(|| ConnectorError::UnknownConnectorKind(kind.to_string()))
    }
}

impl fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
