// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use log::{Level, log};
use std::fmt;
use std::net::SocketAddr;

pub const DEFAULT_TARGET: &str = "dd_endpoint";

/// Lifecycle event logger owned by one service. Every message is prefixed
/// with the service name and emitted under the logger's target.
#[derive(Debug, Clone)]
pub struct EndpointLogger {
    target: String,
    service: String,
}

impl EndpointLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self::with_target(DEFAULT_TARGET, service)
    }

    pub fn with_target(target: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            service: service.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        log!(target: self.target.as_str(), level, "[{}] {}", self.service, args);
    }

    pub fn endpoint_starting(&self) {
        self.emit(Level::Info, format_args!("endpoint starting"));
    }

    pub fn endpoint_started(&self, addr: Option<SocketAddr>) {
        match addr {
            Some(addr) => self.emit(Level::Info, format_args!("endpoint started on {addr}")),
            None => self.emit(Level::Info, format_args!("endpoint started")),
        }
    }

    pub fn connector_starting(&self, property_count: usize) {
        self.emit(
            Level::Debug,
            format_args!("connector starting with {property_count} properties"),
        );
    }

    pub fn start_failed(&self, err: &dyn std::error::Error) {
        self.emit(Level::Error, format_args!("start failed: {}", chain(err)));
    }

    pub fn connector_stopping(&self) {
        self.emit(Level::Info, format_args!("connector stopping"));
    }

    pub fn connector_stop_failed(&self, err: &anyhow::Error) {
        self.emit(Level::Warn, format_args!("connector stop failed: {err:#}"));
    }

    pub fn connector_stopped(&self) {
        self.emit(Level::Info, format_args!("connector stopped"));
    }
}

/// Render an error and its sources as `outer: inner: root`.
fn chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
