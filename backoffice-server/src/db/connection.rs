//! Connection lifecycle for the document store
//!
//! One `ConnectionManager` is built at start-up and shared through the
//! application state. `connect` starts a background loop that keeps
//! trying with a fixed delay until a store opens (or an optional
//! attempt cap is hit). Callers never see connection failures; they see
//! `StoreError::Unavailable` from `store()` until the state is
//! `Connected`.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::store::{Connector, DocumentStore, StoreError};

/// Fixed-delay retry policy for the initial connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    /// `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(5000),
            max_attempts: None,
        }
    }
}

/// Options for `ConnectionManager::connect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Bound on a single attempt
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            retry: RetryPolicy::default(),
        }
    }
}

/// Where the manager is in its lifecycle
#[derive(Clone, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting {
        attempt: u32,
    },
    Connected(Arc<dyn DocumentStore>),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Short name for health output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting { .. } => "connecting",
            Self::Connected(_) => "connected",
        }
    }
}

impl fmt::Debug for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("Disconnected"),
            Self::Connecting { attempt } => f.debug_struct("Connecting").field("attempt", attempt).finish(),
            Self::Connected(store) => f.debug_tuple("Connected").field(&store.host_label()).finish(),
        }
    }
}

/// Owns the single store handle for the process
pub struct ConnectionManager {
    state: watch::Sender<ConnectionState>,
    /// Set when the connect loop hit its attempt cap
    gave_up: AtomicBool,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionManager {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            state,
            gave_up: AtomicBool::new(false),
        }
    }

    /// Manager that is already connected to `store` (tests, `--memory`).
    pub fn connected(store: Arc<dyn DocumentStore>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Connected(store));
        Self {
            state,
            gave_up: AtomicBool::new(false),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// The open store, or `Unavailable` while not connected.
    pub fn store(&self) -> Result<Arc<dyn DocumentStore>, StoreError> {
        match &*self.state.borrow() {
            ConnectionState::Connected(store) => Ok(store.clone()),
            _ => Err(StoreError::Unavailable),
        }
    }

    /// Whether the last connect loop stopped at its attempt cap.
    pub fn gave_up(&self) -> bool {
        self.gave_up.load(Ordering::SeqCst)
    }

    /// Resolve once the manager reaches `Connected`.
    ///
    /// Returns `None` if the connect loop gives up at its attempt cap.
    /// With no cap (the default) this waits until a store opens.
    pub async fn wait_until_connected(&self) -> Option<Arc<dyn DocumentStore>> {
        let mut rx = self.state.subscribe();
        loop {
            if let ConnectionState::Connected(store) = &*rx.borrow_and_update() {
                return Some(store.clone());
            }
            if self.gave_up() {
                return None;
            }
            // Sender lives in self, so changed() cannot fail while we hold &self
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Start connecting in the background and return immediately.
    ///
    /// Each attempt is bounded by `options.timeout`. Failures are logged
    /// and retried after `options.retry.delay`. On the first success
    /// the collections present in the store are logged.
    pub fn connect<C>(self: &Arc<Self>, connector: Arc<C>, uri: String, options: ConnectOptions) -> JoinHandle<()>
    where
        C: Connector + ?Sized,
    {
        let manager = Arc::clone(self);
        tokio::spawn(async move { manager.run_connect_loop(connector, uri, options).await })
    }

    async fn run_connect_loop<C>(&self, connector: Arc<C>, uri: String, options: ConnectOptions)
    where
        C: Connector + ?Sized,
    {
        self.gave_up.store(false, Ordering::SeqCst);
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            self.state.send_replace(ConnectionState::Connecting { attempt });
            tracing::info!(attempt, "Attempting to connect to document store...");

            let outcome = tokio::time::timeout(options.timeout, connector.connect(&uri, options.timeout))
                .await
                .unwrap_or_else(|_| {
                    Err(StoreError::Connection(format!(
                        "timed out after {}ms",
                        options.timeout.as_millis()
                    )))
                });

            match outcome {
                Ok(store) => {
                    tracing::info!(host = %store.host_label(), attempt, "Document store connected");
                    log_collections(store.as_ref()).await;
                    self.state.send_replace(ConnectionState::Connected(store));
                    return;
                }
                Err(e) => {
                    tracing::error!(attempt, error = %e, "Failed to connect to document store");
                }
            }

            if let Some(max) = options.retry.max_attempts {
                if attempt >= max {
                    tracing::warn!(attempts = attempt, "Giving up on document store connection");
                    self.gave_up.store(true, Ordering::SeqCst);
                    self.state.send_replace(ConnectionState::Disconnected);
                    return;
                }
            }

            tracing::info!(
                delay_ms = options.retry.delay.as_millis() as u64,
                "Retrying connection..."
            );
            tokio::time::sleep(options.retry.delay).await;
        }
    }
}

async fn log_collections(store: &dyn DocumentStore) {
    match store.list_collections().await {
        Ok(names) => tracing::info!(collections = ?names, "Available collections"),
        Err(e) => tracing::warn!(error = %e, "Could not list collections"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::{MemoryConnector, MemoryStore};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Fails a fixed number of attempts and records when each one happened.
    struct ScriptedConnector {
        store: Arc<MemoryStore>,
        failures: u32,
        seen: Mutex<Vec<Instant>>,
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        async fn connect(&self, _uri: &str, _timeout: Duration) -> Result<Arc<dyn DocumentStore>, StoreError> {
            let mut seen = self.seen.lock().unwrap();
            seen.push(Instant::now());
            if seen.len() as u32 <= self.failures {
                return Err(StoreError::Connection("refused".into()));
            }
            let store: Arc<dyn DocumentStore> = self.store.clone();
            Ok(store)
        }
    }

    /// Never answers; used to exercise the per-attempt timeout.
    struct HangingConnector;

    #[async_trait]
    impl Connector for HangingConnector {
        async fn connect(&self, _uri: &str, _timeout: Duration) -> Result<Arc<dyn DocumentStore>, StoreError> {
            std::future::pending().await
        }
    }

    fn options(delay_ms: u64, max_attempts: Option<u32>) -> ConnectOptions {
        ConnectOptions {
            timeout: Duration::from_millis(5000),
            retry: RetryPolicy {
                delay: Duration::from_millis(delay_ms),
                max_attempts,
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn connects_on_third_attempt_with_fixed_spacing() {
        let store = Arc::new(MemoryStore::new());
        let connector = Arc::new(ScriptedConnector {
            store: store.clone(),
            failures: 2,
            seen: Mutex::new(Vec::new()),
        });
        let manager = Arc::new(ConnectionManager::new());

        let task = manager.connect(connector.clone(), "memory://".into(), options(5000, None));
        task.await.unwrap();

        assert!(manager.state().is_connected());
        let seen = connector.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 3);
        for pair in seen.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(5000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn store_is_unavailable_until_connected() {
        let store = Arc::new(MemoryStore::new());
        let connector = Arc::new(MemoryConnector::new(store.clone()).failing_first(2));
        let manager = Arc::new(ConnectionManager::new());

        assert!(matches!(manager.store(), Err(StoreError::Unavailable)));
        assert_eq!(manager.state().label(), "disconnected");

        let task = manager.connect(connector.clone(), "memory://".into(), options(1000, None));
        // Let the first attempt fail; the loop is now sleeping
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(manager.state().label(), "connecting");
        assert!(matches!(manager.store(), Err(StoreError::Unavailable)));

        assert!(manager.wait_until_connected().await.is_some());
        task.await.unwrap();
        assert_eq!(connector.attempts(), 3);
        assert!(manager.store().is_ok());
        // Only the diagnostic collection listing touched the store
        assert_eq!(store.operations(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let connector = Arc::new(MemoryConnector::new(Arc::new(MemoryStore::new())).failing_first(10));
        let manager = Arc::new(ConnectionManager::new());

        manager
            .connect(connector.clone(), "memory://".into(), options(100, Some(3)))
            .await
            .unwrap();

        assert_eq!(connector.attempts(), 3);
        assert_eq!(manager.state().label(), "disconnected");
        assert!(manager.gave_up());
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_is_released_when_loop_gives_up() {
        let connector = Arc::new(MemoryConnector::new(Arc::new(MemoryStore::new())).failing_first(10));
        let manager = Arc::new(ConnectionManager::new());

        let task = manager.connect(connector, "memory://".into(), options(100, Some(2)));
        assert!(manager.wait_until_connected().await.is_none());
        task.await.unwrap();

        // Already given up: a late waiter returns at once
        assert!(manager.wait_until_connected().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_attempt_times_out_and_retries() {
        let manager = Arc::new(ConnectionManager::new());
        let opts = ConnectOptions {
            timeout: Duration::from_millis(50),
            retry: RetryPolicy {
                delay: Duration::from_millis(10),
                max_attempts: Some(2),
            },
        };

        let started = Instant::now();
        manager
            .connect(Arc::new(HangingConnector), "memory://".into(), opts)
            .await
            .unwrap();

        assert!(!manager.state().is_connected());
        assert!(Instant::now() - started >= Duration::from_millis(110));
    }

    #[tokio::test]
    async fn connect_returns_before_connection_completes() {
        let manager = Arc::new(ConnectionManager::new());
        let handle = manager.connect(Arc::new(HangingConnector), "memory://".into(), options(10, None));
        assert!(!manager.state().is_connected());
        handle.abort();
    }

    #[test]
    fn defaults_are_five_seconds() {
        let opts = ConnectOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(5));
        assert_eq!(opts.retry.delay, Duration::from_secs(5));
        assert_eq!(opts.retry.max_attempts, None);
    }
}
