//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::{InMemoryPayrollStore, PayrollService, SeedData};

/// Shared application state.
///
/// Holds the payroll service every handler delegates to.
#[derive(Clone)]
pub struct AppState {
    service: Arc<PayrollService>,
}

impl AppState {
    /// Creates a new application state around a payroll service.
    pub fn new(service: PayrollService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds a state backed by in-memory directories and an empty store.
    pub fn in_memory(config: &ConfigLoader, seed: SeedData) -> Self {
        let (employees, periods) = seed.into_directories();
        Self::new(PayrollService::new(
            config.rules().clone(),
            Arc::new(employees),
            Arc::new(periods),
            Arc::new(InMemoryPayrollStore::new()),
        ))
    }

    /// Returns a reference to the payroll service.
    pub fn service(&self) -> &PayrollService {
        &self.service
    }
}
