// crates/admin-settings-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Config Store
// Description: Config source and sink backed by process memory.
// Purpose: Provide a deterministic collaborator for tests and demos.
// Dependencies: crate::{core, interfaces}, async-trait
// ============================================================================

//! ## Overview
//! [`InMemoryConfigStore`] implements both [`ConfigSource`] and [`ConfigSink`].
//! Saves replace the stored document and echo it back as confirmed. Failures
//! can be scripted ahead of time to exercise error paths. It is not intended
//! for production use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;

use crate::core::ConfigDocument;
use crate::interfaces::ConfigSink;
use crate::interfaces::ConfigSource;
use crate::interfaces::SaveError;
use crate::interfaces::SourceError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable store contents.
#[derive(Debug, Default)]
struct StoreState {
    /// Current persisted document.
    document: ConfigDocument,
    /// Environment override document.
    environment: ConfigDocument,
    /// Failures returned by upcoming saves, oldest first.
    scripted_failures: VecDeque<SaveError>,
    /// Number of save calls received.
    save_calls: usize,
}

/// In-memory configuration store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConfigStore {
    /// Shared store contents.
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryConfigStore {
    /// Creates a store holding `document` with no environment overrides.
    #[must_use]
    pub fn new(document: ConfigDocument) -> Self {
        Self::with_environment(document, ConfigDocument::empty())
    }

    /// Creates a store holding `document` and `environment` overrides.
    #[must_use]
    pub fn with_environment(document: ConfigDocument, environment: ConfigDocument) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                document,
                environment,
                scripted_failures: VecDeque::new(),
                save_calls: 0,
            })),
        }
    }

    /// Makes the next save fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] when the store lock is poisoned.
    pub fn fail_next_save(&self, error: SaveError) -> Result<(), SaveError> {
        self.lock().map_err(save_error)?.scripted_failures.push_back(error);
        Ok(())
    }

    /// Returns the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the store lock is poisoned.
    pub fn document(&self) -> Result<ConfigDocument, SourceError> {
        Ok(self.lock().map_err(SourceError::Fetch)?.document.clone())
    }

    /// Returns the number of save calls received.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the store lock is poisoned.
    pub fn save_calls(&self) -> Result<usize, SourceError> {
        Ok(self.lock().map_err(SourceError::Fetch)?.save_calls)
    }

    /// Locks the store contents.
    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        self.state.lock().map_err(|_| "config store mutex poisoned".to_string())
    }
}

/// Wraps a lock failure as a save error.
fn save_error(message: String) -> SaveError {
    SaveError::new(message, "store_unavailable")
}

#[async_trait]
impl ConfigSource for InMemoryConfigStore {
    async fn fetch_config(&self) -> Result<ConfigDocument, SourceError> {
        self.document()
    }

    async fn fetch_environment_overrides(&self) -> Result<ConfigDocument, SourceError> {
        Ok(self.lock().map_err(SourceError::Fetch)?.environment.clone())
    }
}

#[async_trait]
impl ConfigSink for InMemoryConfigStore {
    async fn save_config(&self, document: &ConfigDocument) -> Result<ConfigDocument, SaveError> {
        let mut guard = self.lock().map_err(save_error)?;
        guard.save_calls += 1;
        if let Some(failure) = guard.scripted_failures.pop_front() {
            return Err(failure);
        }
        guard.document = document.clone();
        Ok(guard.document.clone())
    }
}
