//! Recording fakes for the dashboard's external collaborators.

use crate::api::{ApiClient, ApiError, ApiRequest, ApiResponse, Transport};
use crate::app::{Dashboard, DashboardOptions, Hooks};
use crate::controllers::map::MapClickHook;
use crate::controllers::navigation::SectionHook;
use crate::domain::{Coordinate, OperationMode};
use crate::notifications::ToastQueue;
use crate::poller::NotificationCheck;
use crate::storage::TokenStore;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Records every request and answers from a script, defaulting to `200 {}`.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, String>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        lock(&self.responses).push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail_network(&self, message: &str) -> &Self {
        lock(&self.responses).push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        lock(&self.requests).push(request);
        match lock(&self.responses).pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Network(message)),
            None => Ok(ApiResponse {
                status: 200,
                body: "{}".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
    reads: Arc<AtomicUsize>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            reads: Arc::default(),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load_token(&self) -> color_eyre::Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSections(pub Arc<Mutex<Vec<String>>>);

impl RecordingSections {
    pub fn visited(&self) -> Vec<String> {
        lock(&self.0).clone()
    }
}

impl SectionHook for RecordingSections {
    fn navigate(&mut self, section: &str) {
        lock(&self.0).push(section.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingClicks(pub Arc<Mutex<Vec<Coordinate>>>);

impl RecordingClicks {
    pub fn clicks(&self) -> Vec<Coordinate> {
        lock(&self.0).clone()
    }
}

impl MapClickHook for RecordingClicks {
    fn on_click(&mut self, at: Coordinate) {
        lock(&self.0).push(at);
    }
}

#[derive(Debug, Clone, Default)]
pub struct CountingCheck(pub Arc<AtomicUsize>);

impl CountingCheck {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl NotificationCheck for CountingCheck {
    fn check(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A bootstrapped dashboard wired to a recording transport.
pub struct TestHarness {
    pub dashboard: Dashboard,
    pub transport: RecordingTransport,
    pub toasts: ToastQueue,
}

impl TestHarness {
    pub fn messages(&self) -> Vec<String> {
        self.toasts
            .visible()
            .into_iter()
            .map(|toast| toast.message)
            .collect()
    }

    /// Advances virtual time, lets spawned flows run, then applies what they reported.
    pub async fn settle(&mut self, elapsed: Duration) {
        tokio::time::sleep(elapsed).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        self.dashboard.process_events();
    }
}

/// Bootstraps, lets the startup requests of live mode finish, then forgets them.
pub async fn settled_dashboard(mode: OperationMode) -> TestHarness {
    let mut harness = test_dashboard(mode);
    harness.settle(Duration::ZERO).await;
    harness.transport.clear_requests();
    harness
}

pub fn test_dashboard(mode: OperationMode) -> TestHarness {
    test_dashboard_with(mode, Hooks::default())
}

pub fn test_dashboard_with(mode: OperationMode, hooks: Hooks) -> TestHarness {
    let transport = RecordingTransport::new();
    let toasts = ToastQueue::new();
    let api = ApiClient::new(
        "http://localhost:8000/api/v1",
        Some("test-token".to_string()),
        Arc::new(transport.clone()),
        toasts.clone(),
    );
    let options = DashboardOptions {
        mode,
        ..DashboardOptions::default()
    };
    TestHarness {
        dashboard: Dashboard::bootstrap(options, api, toasts.clone(), hooks),
        transport,
        toasts,
    }
}
