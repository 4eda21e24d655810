// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Property bags handed to connectors at start.
//!
//! Two groups are derived from a [`ConnectorConfig`]: the connector group
//! (binding address, threading, socket options) and the state-transfer group
//! (topology timeouts and external proxy address). The state-transfer group
//! is merged last and wins on key collisions.

use crate::config::{ConnectorConfig, StateTransferConfig};
use std::collections::BTreeMap;
use std::fmt;
use std::net::SocketAddr;

pub const PROP_HOST: &str = "server.host";
pub const PROP_PORT: &str = "server.port";
pub const PROP_WORKER_THREADS: &str = "server.worker_threads";
pub const PROP_IDLE_TIMEOUT: &str = "server.idle_timeout";
pub const PROP_TCP_NO_DELAY: &str = "server.tcp_no_delay";
pub const PROP_SEND_BUF_SIZE: &str = "server.send_buf_size";
pub const PROP_RECV_BUF_SIZE: &str = "server.recv_buf_size";
pub const PROP_TOPOLOGY_LOCK_TIMEOUT: &str = "server.topology.lock_timeout";
pub const PROP_TOPOLOGY_REPL_TIMEOUT: &str = "server.topology.repl_timeout";
pub const PROP_TOPOLOGY_UPDATE_TIMEOUT: &str = "server.topology.update_timeout";
pub const PROP_TOPOLOGY_STATE_TRANSFER: &str = "server.topology.state_transfer";
pub const PROP_PROXY_HOST: &str = "server.proxy_host";
pub const PROP_PROXY_PORT: &str = "server.proxy_port";

/// Keys that identify where a connector listens. A bag without any of them
/// does not define a connector.
const IDENTIFYING_KEYS: [&str; 2] = [PROP_HOST, PROP_PORT];

/// Ordered string-to-string configuration map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    entries: BTreeMap<String, String>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.entries.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry of `other` into `self`, overwriting existing keys.
    pub fn merge_from(&mut self, other: &PropertyBag) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    /// True when at least one key locating the connector's listener is set.
    pub fn defines_connector(&self) -> bool {
        IDENTIFYING_KEYS.iter().any(|k| self.contains_key(k))
    }
}

impl fmt::Display for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.entries {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Derive the connector group. `binding` is the resolved address of the
/// configured socket binding, if there is one.
pub fn connector_properties(config: &ConnectorConfig, binding: Option<SocketAddr>) -> PropertyBag {
    let mut props = PropertyBag::new();
    if let Some(addr) = binding {
        props.set(PROP_HOST, addr.ip());
        props.set(PROP_PORT, addr.port());
    }
    props.set(PROP_WORKER_THREADS, config.worker_threads_or_default());
    if let Some(idle) = config.idle_timeout {
        props.set(PROP_IDLE_TIMEOUT, idle);
    }
    if let Some(nodelay) = config.tcp_nodelay {
        props.set(PROP_TCP_NO_DELAY, nodelay);
    }
    if let Some(size) = config.send_buffer_size {
        props.set(PROP_SEND_BUF_SIZE, size);
    }
    if let Some(size) = config.receive_buffer_size {
        props.set(PROP_RECV_BUF_SIZE, size);
    }
    props
}

/// Derive the state-transfer group. Empty when the config has no
/// state-transfer block.
pub fn state_transfer_properties(config: &ConnectorConfig) -> PropertyBag {
    let mut props = PropertyBag::new();
    let Some(st) = config.topology_state_transfer.as_ref() else {
        return props;
    };
    let StateTransferConfig {
        lock_timeout,
        replication_timeout,
        update_timeout,
        external_host,
        external_port,
        lazy_retrieval: _,
    } = st;

    if let Some(v) = lock_timeout {
        props.set(PROP_TOPOLOGY_LOCK_TIMEOUT, v);
    }
    if let Some(v) = replication_timeout {
        props.set(PROP_TOPOLOGY_REPL_TIMEOUT, v);
    }
    if let Some(v) = update_timeout {
        props.set(PROP_TOPOLOGY_UPDATE_TIMEOUT, v);
    }
    if let Some(v) = external_host {
        props.set(PROP_PROXY_HOST, v);
    }
    if let Some(v) = external_port {
        props.set(PROP_PROXY_PORT, v);
    }
    props.set(PROP_TOPOLOGY_STATE_TRANSFER, st.state_transfer_enabled());
    props
}

/// Merge both groups into the bag handed to the connector.
pub fn merge(connector: &PropertyBag, state_transfer: &PropertyBag) -> PropertyBag {
    let mut merged = connector.clone();
    merged.merge_from(state_transfer);
    merged
}
