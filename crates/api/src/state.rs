use std::sync::Arc;

use eduseek_core::store::{ModerationStore, RecordStore};
use eduseek_core::types::Timestamp;

use crate::config::ServerConfig;

/// Source of the current time for promotion windows and approval stamps.
pub type Clock = fn() -> Timestamp;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is an `Arc` or a function pointer.
#[derive(Clone)]
pub struct AppState {
    /// Read-side record store (search, profiles, accounts).
    pub store: Arc<dyn RecordStore>,
    /// Write-side store for administrator moderation.
    pub moderation: Arc<dyn ModerationStore>,
    pub config: Arc<ServerConfig>,
    pub clock: Clock,
}

impl AppState {
    /// Build state where one store serves both reads and moderation.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: RecordStore + ModerationStore + 'static,
    {
        Self {
            store: store.clone(),
            moderation: store,
            config: Arc::new(config),
            clock: chrono::Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> Timestamp {
        (self.clock)()
    }
}
