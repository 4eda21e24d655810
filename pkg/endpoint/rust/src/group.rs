// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::binding::SocketBindingResolver;
use crate::config::ConnectorDefinition;
use crate::connector::{ConnectorHandle, SharedCacheManager};
use crate::error::{ConnectorError, Result};
use crate::registry::ConnectorRegistry;
use crate::service::ManagedConnectorService;
use log::{error, info};
use std::collections::HashMap;
use std::sync::Arc;

/// Cache managers by container name, with the one used when a definition
/// names no container.
#[derive(Debug, Clone, Default)]
pub struct CacheContainers {
    default: Option<String>,
    managers: HashMap<String, SharedCacheManager>,
}

impl CacheContainers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a container. The first one added becomes the default.
    pub fn with_container(mut self, manager: SharedCacheManager) -> Self {
        let name = manager.container_name().to_string();
        if self.default.is_none() {
            self.default = Some(name.clone());
        }
        self.managers.insert(name, manager);
        self
    }

    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    pub fn get(&self, name: Option<&str>) -> Result<SharedCacheManager> {
        let name = name
            .or(self.default.as_deref())
            .ok_or_else(|| ConnectorError::UnknownCacheContainer("<default>".to_string()))?;
        self.managers
            .get(name)
            .cloned()
            .ok_or_else(|| ConnectorError::UnknownCacheContainer(name.to_string()))
    }
}

/// A set of connector services started and stopped together.
pub struct EndpointGroup {
    services: Vec<ManagedConnectorService>,
}

impl EndpointGroup {
    pub fn new(services: Vec<ManagedConnectorService>) -> Self {
        Self { services }
    }

    /// Build one service per definition. Fails on the first definition whose
    /// kind is not registered or whose cache container is unknown.
    pub fn from_definitions(
        definitions: Vec<ConnectorDefinition>,
        registry: &ConnectorRegistry,
        containers: &CacheContainers,
        bindings: Arc<dyn SocketBindingResolver>,
    ) -> Result<Self> {
        let services = definitions
            .into_iter()
            .map(|def| {
                let cache_manager = containers.get(def.config.cache_container.as_deref())?;
                ManagedConnectorService::new(
                    def.kind,
                    def.config,
                    registry,
                    cache_manager,
                    Arc::clone(&bindings),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        info!("built {} endpoint service(s)", services.len());
        Ok(Self { services })
    }

    pub fn services(&self) -> &[ManagedConnectorService] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ManagedConnectorService> {
        self.services.iter().find(|s| s.name() == name)
    }

    /// Start every service in order. A failing service does not prevent the
    /// others from starting; its error is logged and returned.
    pub fn start_all(&self) -> (Vec<ConnectorHandle>, Vec<ConnectorError>) {
        let mut started = Vec::new();
        let mut failed = Vec::new();
        for service in &self.services {
            match service.start() {
                Ok(handle) => started.push(handle),
                Err(e) => {
                    error!("[{}] not started: {e}", service.name());
                    failed.push(e);
                }
            }
        }
        info!(
            "started {}/{} endpoint(s)",
            started.len(),
            self.services.len()
        );
        (started, failed)
    }

    /// Stop every service, last started first.
    pub fn stop_all(&self) {
        for service in self.services.iter().rev() {
            service.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectorConfig;
    use crate::connector::ConnectorKind;
    use crate::service::tests::{Probe, bindings, cache_manager, registry_with};
    use crate::state::ServiceState;

    fn definition(name: &str, binding: Option<&str>) -> ConnectorDefinition {
        ConnectorDefinition {
            kind: ConnectorKind::new("hotrod"),
            config: ConnectorConfig {
                name: Some(name.to_string()),
                socket_binding: binding.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_containers_default_and_lookup() {
        let containers = CacheContainers::new()
            .with_container(cache_manager("local"))
            .with_container(cache_manager("clustered"));

        assert_eq!(containers.get(None).unwrap().container_name(), "local");
        assert_eq!(
            containers.get(Some("clustered")).unwrap().container_name(),
            "clustered"
        );
        assert!(matches!(
            containers.get(Some("missing")),
            Err(ConnectorError::UnknownCacheContainer(n)) if n == "missing"
        ));

        let containers = containers.with_default("clustered");
        assert_eq!(containers.get(None).unwrap().container_name(), "clustered");
    }

    #[test]
    fn test_containers_empty_has_no_default() {
        assert!(CacheContainers::new().get(None).is_err());
    }

    #[test]
    fn test_start_all_continues_past_failures() {
        let probe = Probe::default();
        let group = EndpointGroup::from_definitions(
            vec![
                definition("a", Some("hotrod")),
                definition("b", None),
                definition("c", Some("memcached")),
            ],
            &registry_with(&probe),
            &CacheContainers::new().with_container(cache_manager("local")),
            bindings(),
        )
        .unwrap();

        let (started, failed) = group.start_all();
        assert_eq!(started.len(), 2);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].service_name(), Some("hotrod b"));
        assert_eq!(
            group.get("hotrod b").unwrap().state(),
            ServiceState::Failed
        );

        group.stop_all();
        assert!(
            group
                .services()
                .iter()
                .all(|s| s.state() == ServiceState::Stopped)
        );
        assert_eq!(probe.lock().unwrap().stops, 2);
    }

    #[test]
    fn test_from_definitions_unknown_kind() {
        let probe = Probe::default();
        let mut def = definition("a", Some("hotrod"));
        def.kind = ConnectorKind::new("websocket");

        let result = EndpointGroup::from_definitions(
            vec![def],
            &registry_with(&probe),
            &CacheContainers::new().with_container(cache_manager("local")),
            bindings(),
        );
        assert!(matches!(
            result,
            Err(ConnectorError::UnknownConnectorKind(_))
        ));
    }

    #[test]
    fn test_empty_group() {
        let group = EndpointGroup::new(Vec::new());
        assert!(group.is_empty());
        let (started, failed) = group.start_all();
        assert!(started.is_empty() && failed.is_empty());
        group.stop_all();
    }
}
