//! Shared fixtures for comptest-harness integration tests
//!
//! Sample component roles, their mock factories (registered through
//! the compile-time slice) and a small service that resolves roles
//! from the container the way real code-under-test does.

// not every test binary touches every fixture
#![allow(dead_code)]

use std::sync::Arc;

use comptest_harness::{
    ComponentRegistrar, ComponentRegistrarExt, ConfigModule, Container, MockControl,
    MockFactoryEntry, Result, RoleKey, MOCK_FACTORIES,
};

// ============================================================================
// Sample roles
// ============================================================================

/// Storage role resolved by code-under-test
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    fn load(&self, id: &str) -> Result<String>;
    fn save(&self, id: &str) -> Result<()>;
}

/// Audit role resolved by code-under-test
pub trait EventLog: Send + Sync {
    fn record(&self, event: &str) -> Result<()>;
}

// ============================================================================
// Mock implementations
// ============================================================================

#[derive(Debug)]
pub struct MockDocumentStore {
    control: Arc<MockControl>,
}

impl MockDocumentStore {
    pub fn from_control(control: Arc<MockControl>) -> Self {
        Self { control }
    }
}

impl DocumentStore for MockDocumentStore {
    fn load(&self, id: &str) -> Result<String> {
        self.control.touch("load")?;
        Ok(format!("doc:{id}"))
    }

    fn save(&self, _id: &str) -> Result<()> {
        self.control.touch("save")
    }
}

pub struct MockEventLog {
    control: Arc<MockControl>,
}

impl EventLog for MockEventLog {
    fn record(&self, _event: &str) -> Result<()> {
        self.control.touch("record")
    }
}

#[linkme::distributed_slice(MOCK_FACTORIES)]
static DOCUMENT_STORE_MOCK: MockFactoryEntry = MockFactoryEntry {
    role_name: "DocumentStore",
    role: || RoleKey::of::<dyn DocumentStore>(),
    build: |control| Arc::new(Arc::new(MockDocumentStore { control }) as Arc<dyn DocumentStore>),
};

#[linkme::distributed_slice(MOCK_FACTORIES)]
static EVENT_LOG_MOCK: MockFactoryEntry = MockFactoryEntry {
    role_name: "EventLog",
    role: || RoleKey::of::<dyn EventLog>(),
    build: |control| Arc::new(Arc::new(MockEventLog { control }) as Arc<dyn EventLog>),
};

// ============================================================================
// Real wiring and code-under-test
// ============================================================================

/// Plain component registered by [`SiteInfoConfig`]
pub struct SiteInfo {
    pub name: String,
}

/// Config module wiring a real (non-mock) component
pub struct SiteInfoConfig;

impl ConfigModule for SiteInfoConfig {
    fn name(&self) -> &str {
        "site-info"
    }

    fn configure(&self, registrar: &mut dyn ComponentRegistrar) -> Result<()> {
        registrar.register::<SiteInfo>(
            None,
            Arc::new(SiteInfo {
                name: "integration".to_string(),
            }),
        )
    }
}

/// Service under test: resolves its collaborators from the container
pub struct PublishService {
    container: Arc<Container>,
}

impl PublishService {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    pub fn publish(&self, id: &str) -> Result<String> {
        let store = self.container.resolve::<dyn DocumentStore>(None)?;
        let log = self.container.resolve::<dyn EventLog>(None)?;
        let document = store.load(id)?;
        log.record("published")?;
        Ok(document)
    }
}
