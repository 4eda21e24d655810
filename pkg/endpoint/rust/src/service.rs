// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Managed connector service.
//!
//! Owns the start/stop lifecycle of one connector:
//! 1. Derive the connector and state-transfer property groups from config
//! 2. Validate that the connector group locates a listener
//! 3. Merge the groups (state-transfer wins) and build the connector
//! 4. Start it with the merged bag and the shared cache manager
//! 5. Record its transport
//!
//! Any failure tears down whatever was built and leaves the service
//! `Failed`. `start` and `stop` are serialized by one mutex per service.

use crate::binding::SocketBindingResolver;
use crate::config::ConnectorConfig;
use crate::connector::{
    Connector, ConnectorHandle, ConnectorKind, SharedCacheManager, Transport,
};
use crate::error::{ConnectorError, Result};
use crate::logger::EndpointLogger;
use crate::properties::{self, PropertyBag};
use crate::registry::{ConnectorFactory, ConnectorRegistry};
use crate::state::ServiceState;
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    state: ServiceState,
    connector: Option<Box<dyn Connector>>,
    transport: Option<Arc<dyn Transport>>,
    connector_properties: PropertyBag,
    state_transfer_properties: PropertyBag,
}

pub struct ManagedConnectorService {
    name: String,
    kind: ConnectorKind,
    config: ConnectorConfig,
    factory: ConnectorFactory,
    cache_manager: SharedCacheManager,
    bindings: Arc<dyn SocketBindingResolver>,
    logger: EndpointLogger,
    inner: Mutex<Inner>,
}

impl ManagedConnectorService {
    /// Build a service for `kind`. The factory is resolved from `registry`
    /// here, so an unregistered kind fails at construction, not at start.
    pub fn new(
        kind: ConnectorKind,
        config: ConnectorConfig,
        registry: &ConnectorRegistry,
        cache_manager: SharedCacheManager,
        bindings: Arc<dyn SocketBindingResolver>,
    ) -> Result<Self> {
        let factory = registry.factory(&kind)?;
        let name = match config.name.as_deref() {
            Some(name) => format!("{kind} {name}"),
            None => kind.to_string(),
        };
        Ok(Self {
            logger: EndpointLogger::new(name.clone()),
            name,
            kind,
            config,
            factory,
            cache_manager,
            bindings,
            inner: Mutex::new(Inner::default()),
        })
    }

    /// Replace the default logger.
    pub fn with_logger(mut self, logger: EndpointLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ConnectorKind {
        &self.kind
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn logger(&self) -> &EndpointLogger {
        &self.logger
    }

    pub fn cache_container_name(&self) -> Option<&str> {
        self.config.cache_container.as_deref()
    }

    pub fn socket_binding_name(&self) -> Option<&str> {
        self.config.socket_binding.as_deref()
    }

    pub fn state(&self) -> ServiceState {
        self.lock().state
    }

    /// Merged property bag handed to the running connector. Empty when no
    /// connector is running.
    pub fn properties(&self) -> PropertyBag {
        let inner = self.lock();
        properties::merge(&inner.connector_properties, &inner.state_transfer_properties)
    }

    pub fn start(&self) -> Result<ConnectorHandle> {
        let mut inner = self.lock();

        if inner.state.is_running()
            && let Some(handle) = self.running_handle(&inner)
        {
            debug!("[{}] already running", self.name);
            return Ok(handle);
        }

        if !inner.state.can_start() {
            // Only reachable after a panic interrupted an earlier transition.
            warn!(
                "[{}] recovering from interrupted transition in state {}",
                self.name, inner.state
            );
            self.teardown(&mut inner);
            inner.state = ServiceState::Failed;
        }

        debug_assert!(inner.connector_properties.is_empty());
        debug_assert!(inner.state_transfer_properties.is_empty());

        self.transition(&mut inner, ServiceState::Starting);
        self.logger.endpoint_starting();

        match self.start_connector(&mut inner) {
            Ok(handle) => {
                self.transition(&mut inner, ServiceState::Running);
                self.logger.endpoint_started(handle.local_address());
                Ok(handle)
            }
            Err(err) => {
                self.logger.start_failed(&err);
                self.teardown(&mut inner);
                self.transition(&mut inner, ServiceState::Failed);
                Err(err)
            }
        }
    }

    /// Stop the connector if one is running. Never fails: a failing connector
    /// stop is logged and teardown completes regardless.
    pub fn stop(&self) {
        let mut inner = self.lock();
        if inner.state.is_running() {
            self.transition(&mut inner, ServiceState::Stopping);
        }
        self.teardown(&mut inner);
        self.transition(&mut inner, ServiceState::Stopped);
    }

    pub fn handle(&self) -> Result<ConnectorHandle> {
        let inner = self.lock();
        self.running_handle(&inner)
            .ok_or_else(|| ConnectorError::IllegalState {
                name: self.name.clone(),
                state: inner.state,
            })
    }

    pub fn transport(&self) -> Option<Arc<dyn Transport>> {
        self.lock().transport.clone()
    }

    fn start_connector(&self, inner: &mut Inner) -> Result<ConnectorHandle> {
        let binding = match self.config.socket_binding.as_deref() {
            Some(binding) => Some(self.bindings.resolve(binding).map_err(|source| {
                ConnectorError::SocketBinding {
                    name: self.name.clone(),
                    source,
                }
            })?),
            None => None,
        };

        inner.connector_properties = properties::connector_properties(&self.config, binding);
        inner.state_transfer_properties = properties::state_transfer_properties(&self.config);

        if !inner.connector_properties.defines_connector() {
            return Err(ConnectorError::NoConnectorDefined {
                name: self.name.clone(),
            });
        }

        let merged = properties::merge(&inner.connector_properties, &inner.state_transfer_properties);

        let connector = (self.factory)().map_err(|e| ConnectorError::Instantiation {
            name: self.name.clone(),
            source: e.into(),
        })?;

        self.logger.connector_starting(merged.len());
        // Held from here on so teardown stops it whatever happens next.
        let connector = inner.connector.insert(connector);
        connector
            .start(&merged, &self.cache_manager)
            .map_err(|e| ConnectorError::Start {
                name: self.name.clone(),
                source: e.into(),
            })?;

        let transport = connector
            .transport()
            .map_err(|e| ConnectorError::TransportIntrospection {
                name: self.name.clone(),
                source: e.into(),
            })?;
        inner.transport = Some(Arc::clone(&transport));

        Ok(ConnectorHandle::new(
            self.name.clone(),
            self.kind.clone(),
            transport,
        ))
    }

    fn teardown(&self, inner: &mut Inner) {
        if let Some(mut connector) = inner.connector.take() {
            self.logger.connector_stopping();
            if let Err(e) = connector.stop() {
                self.logger.connector_stop_failed(&e);
            }
            self.logger.connector_stopped();
        }
        inner.transport = None;
        inner.connector_properties.clear();
        inner.state_transfer_properties.clear();
    }

    fn running_handle(&self, inner: &Inner) -> Option<ConnectorHandle> {
        if !inner.state.is_running() {
            return None;
        }
        let transport = inner.transport.as_ref()?;
        Some(ConnectorHandle::new(
            self.name.clone(),
            self.kind.clone(),
            Arc::clone(transport),
        ))
    }

    fn transition(&self, inner: &mut Inner, next: ServiceState) {
        if !inner.state.can_transition_to(next) {
            warn!(
                "[{}] unexpected transition {} -> {}",
                self.name, inner.state, next
            );
        }
        debug!("[{}] {} -> {}", self.name, inner.state, next);
        inner.state = next;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for ManagedConnectorService {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(|e| e.into_inner());
        if inner.connector.is_some() {
            warn!("[{}] dropped while running, stopping connector", self.name);
            self.stop();
        }
    }
}
