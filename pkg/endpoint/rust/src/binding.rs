// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::error::BindingError;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

/// Resolves a named socket binding to the address a connector listens on.
pub trait SocketBindingResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<SocketAddr, BindingError>;
}

/// Fixed name-to-address table.
#[derive(Debug, Clone, Default)]
pub struct StaticSocketBindings {
    bindings: HashMap<String, SocketAddr>,
}

impl StaticSocketBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_binding(mut self, name: impl Into<String>, addr: SocketAddr) -> Self {
        self.insert(name, addr);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, addr: SocketAddr) {
        self.bindings.insert(name.into(), addr);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Build from `name -> "host:port"` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut bindings = Self::new();
        for (name, address) in pairs {
            let name = name.into();
            let addr = address
                .as_ref()
                .parse::<SocketAddr>()
                .map_err(|_| BindingError::InvalidAddress {
                    name: name.clone(),
                    address: address.as_ref().to_string(),
                })?;
            bindings.insert(name, addr);
        }
        Ok(bindings)
    }

    /// Load a YAML map of binding names to `host:port` strings.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let raw: HashMap<String, String> = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Self::from_pairs(raw).with_context(|| format!("invalid binding in {}", path.display()))
    }
}

impl SocketBindingResolver for StaticSocketBindings {
    fn resolve(&self, name: &str) -> Result<SocketAddr, BindingError> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| BindingError::NotFound(name.to_string()))
    }
}
