// Export our modules for use in the binary and tests
pub mod animator;
pub mod api;
pub mod app;
pub mod config;
pub mod controllers;
pub mod domain;
pub mod events;
pub mod logging;
pub mod notifications;
pub mod poller;
pub mod scene;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{Dashboard, DashboardOptions, Hooks};
pub use domain::{ActionKind, OperationMode, RiskTier, Severity, TimeRange};
