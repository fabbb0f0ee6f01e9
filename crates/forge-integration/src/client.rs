use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::error::ScanError;
use crate::scan::ScanApi;
use crate::types::{ScanMode, ScanResult};

/// Default backend address for local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// A non-blocking handle to an in-flight async request.
/// Call `try_recv()` each frame to check for results without blocking the
/// game loop.
pub struct PendingRequest<T> {
    receiver: mpsc::Receiver<Result<T, ScanError>>,
}

impl<T> PendingRequest<T> {
    /// Non-blocking check for the result. Returns `None` if still pending.
    pub fn try_recv(&self) -> Option<Result<T, ScanError>> {
        self.receiver.try_recv().ok()
    }

    /// Blocking wait for the result. Only use outside the frame loop.
    pub fn wait(self) -> Result<T, ScanError> {
        self.receiver
            .recv()
            .map_err(|_| ScanError::Network("Channel closed".into()))?
    }
}

/// Facade for the scan backend.
/// Owns a background tokio runtime and dispatches async work via channels.
pub struct ScanClient {
    runtime: tokio::runtime::Runtime,
    api: Arc<ScanApi>,
}

impl ScanClient {
    /// Create a scan client with a background tokio runtime
    pub fn new(base_url: impl Into<String>) -> Result<Self, ScanError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| ScanError::Network(format!("Failed to create runtime: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScanError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let api = Arc::new(ScanApi::new(client, base_url.into()));

        Ok(Self { runtime, api })
    }

    /// Submit a captured image for classification. Returns a pending
    /// request the frame loop polls.
    pub fn scan(&self, image: Vec<u8>, mode: ScanMode) -> PendingRequest<ScanResult> {
        let (tx, rx) = mpsc::channel();
        let api = Arc::clone(&self.api);

        info!(mode = mode.as_str(), bytes = image.len(), "scan submitted");
        self.runtime.spawn(async move {
            let result = api.scan(image, mode).await;
            let _ = tx.send(result);
        });

        PendingRequest { receiver: rx }
    }
}
