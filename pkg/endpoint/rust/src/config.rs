// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::connector::ConnectorKind;
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::path::Path;

/// Worker threads handed to a connector when none are configured.
pub const DEFAULT_WORKER_THREADS: u32 = 160;

/// Declared configuration of one connector. Every optional field models a
/// key that may or may not be defined; `None` means the key is absent and
/// nothing is derived from it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConnectorConfig {
    pub name: Option<String>,
    pub cache_container: Option<String>,
    pub socket_binding: Option<String>,
    pub worker_threads: Option<u32>,
    pub idle_timeout: Option<i64>,
    pub tcp_nodelay: Option<bool>,
    pub send_buffer_size: Option<u32>,
    pub receive_buffer_size: Option<u32>,
    pub topology_state_transfer: Option<StateTransferConfig>,
}

/// Topology/state-transfer block, passed through to the connector.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StateTransferConfig {
    pub lock_timeout: Option<u64>,
    pub replication_timeout: Option<u64>,
    pub update_timeout: Option<u64>,
    pub external_host: Option<String>,
    pub external_port: Option<u16>,
    pub lazy_retrieval: Option<bool>,
}

impl StateTransferConfig {
    /// State transfer is the negation of lazy retrieval, which defaults to off.
    pub fn state_transfer_enabled(&self) -> bool {
        !self.lazy_retrieval.unwrap_or(false)
    }
}

impl ConnectorConfig {
    pub fn worker_threads_or_default(&self) -> u32 {
        self.worker_threads.unwrap_or(DEFAULT_WORKER_THREADS)
    }
}

/// A connector kind together with its configuration, as read from one file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectorDefinition {
    pub kind: ConnectorKind,
    #[serde(flatten)]
    pub config: ConnectorConfig,
}

/// Scan a directory for `*.yaml` files and parse each into a ConnectorDefinition.
/// When a definition has no `name`, the filename (without extension) is used.
/// Files that fail to parse are logged and skipped.
pub fn load_definitions(dir: &Path) -> Result<Vec<ConnectorDefinition>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read config directory: {}", dir.display()))?;

    let mut yaml_files: Vec<_> = entries
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry in {}: {e}", dir.display());
                None
            }
        })
        .filter(|e| {
            let is_yaml = e
                .path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if !is_yaml {
                debug!("skipping non-YAML file: {}", e.path().display());
            }
            is_yaml
        })
        .collect();

    yaml_files.sort_by_key(|e| e.file_name());

    let mut definitions = Vec::with_capacity(yaml_files.len());
    for entry in yaml_files {
        let path = entry.path();
        match parse_definition(&path) {
            Ok(mut def) => {
                if def.config.name.is_none()
                    && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                {
                    def.config.name = Some(stem.to_string());
                }
                definitions.push(def);
            }
            Err(e) => warn!("skipping {}: {e:#}", path.display()),
        }
    }

    Ok(definitions)
}

fn parse_definition(path: &Path) -> Result<ConnectorDefinition> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let def: ConnectorDefinition =
        serde_yaml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    Ok(def)
}
