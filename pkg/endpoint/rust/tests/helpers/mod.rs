// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use dd_endpoint::properties::{PROP_HOST, PROP_PORT, PROP_WORKER_THREADS};
use dd_endpoint::{
    CacheManager, Connector, ConnectorRegistry, PropertyBag, SharedCacheManager, Transport,
};
use std::net::{IpAddr, SocketAddr, TcpListener};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct TestCacheManager(pub String);

impl CacheManager for TestCacheManager {
    fn container_name(&self) -> &str {
        &self.0
    }
}

pub fn cache_manager(name: &str) -> SharedCacheManager {
    Arc::new(TestCacheManager(name.to_string()))
}

/// Transport backed by a real listening socket.
#[derive(Debug)]
pub struct ListenerTransport {
    listener: Mutex<Option<TcpListener>>,
    addr: SocketAddr,
    workers: usize,
}

impl ListenerTransport {
    pub fn is_open(&self) -> bool {
        self.listener.lock().unwrap().is_some()
    }

    fn close(&self) {
        self.listener.lock().unwrap().take();
    }
}

impl Transport for ListenerTransport {
    fn local_address(&self) -> Option<SocketAddr> {
        Some(self.addr)
    }

    fn worker_threads(&self) -> usize {
        self.workers
    }
}

/// Counters shared by every connector a registry builds.
#[derive(Debug, Default)]
pub struct Counters {
    pub started: AtomicUsize,
    pub stopped: AtomicUsize,
    pub last_properties: Mutex<Option<PropertyBag>>,
}

/// Connector that binds a TCP listener on the configured host and port.
pub struct ListenerConnector {
    counters: Arc<Counters>,
    transport: Option<Arc<ListenerTransport>>,
}

impl Connector for ListenerConnector {
    fn start(&mut self, properties: &PropertyBag, _cache: &SharedCacheManager) -> Result<()> {
        let host: IpAddr = properties.get(PROP_HOST).context("missing host")?.parse()?;
        let port: u16 = properties.get(PROP_PORT).context("missing port")?.parse()?;
        let workers: usize = properties
            .get(PROP_WORKER_THREADS)
            .context("missing worker threads")?
            .parse()?;

        let listener = TcpListener::bind(SocketAddr::new(host, port))
            .with_context(|| format!("binding {host}:{port}"))?;
        let addr = listener.local_addr()?;
        self.transport = Some(Arc::new(ListenerTransport {
            listener: Mutex::new(Some(listener)),
            addr,
            workers,
        }));
        self.counters.started.fetch_add(1, Ordering::SeqCst);
        *self.counters.last_properties.lock().unwrap() = Some(properties.clone());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.counters.stopped.fetch_add(1, Ordering::SeqCst);
        match self.transport.take() {
            Some(transport) => {
                transport.close();
                Ok(())
            }
            None => bail!("listener was never bound"),
        }
    }

    fn transport(&self) -> Result<Arc<dyn Transport>> {
        let transport = self.transport.clone().context("listener not bound")?;
        Ok(transport)
    }
}

pub fn listener_registry(counters: &Arc<Counters>) -> ConnectorRegistry {
    let mut registry = ConnectorRegistry::new();
    for kind in ["hotrod", "memcached"] {
        let counters = Arc::clone(counters);
        registry.register(kind, move || {
            Ok(Box::new(ListenerConnector {
                counters: Arc::clone(&counters),
                transport: None,
            }) as Box<dyn Connector>)
        });
    }
    registry
}

pub fn write_config(dir: &Path, name: &str, yaml: &str) {
    std::fs::write(dir.join(format!("{name}.yaml")), yaml).unwrap();
}
