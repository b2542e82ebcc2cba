use crate::domain::model::{Project, ProjectCollection};
use crate::domain::ports::ProjectSource;
use crate::utils::error::LoadError;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

pub const NO_RETRIES: u32 = 0;
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// How hard [`ProjectStore::load`] tries before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Per attempt. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            max_retries: NO_RETRIES,
            retry_delay: Duration::from_secs(1),
            timeout: Some(DEFAULT_LOAD_TIMEOUT),
        }
    }
}

/// Holds the project collection and publishes it once it is loaded.
///
/// The collection starts empty and is replaced wholesale by the first
/// successful [`load`](Self::load). Readers get `Arc` snapshots, so a reader
/// never sees a half-built collection. Length changes are observable through
/// [`subscribe`](Self::subscribe).
pub struct ProjectStore<S: ProjectSource> {
    source: S,
    policy: LoadPolicy,
    sender: watch::Sender<Arc<ProjectCollection>>,
    loaded: AtomicBool,
    loaded_at: Mutex<Option<DateTime<Utc>>>,
}

impl<S: ProjectSource> ProjectStore<S> {
    pub fn new(source: S, policy: LoadPolicy) -> Self {
        let (sender, _) = watch::channel(Arc::new(ProjectCollection::empty()));
        Self {
            source,
            policy,
            sender,
            loaded: AtomicBool::new(false),
            loaded_at: Mutex::new(None),
        }
    }

    /// Fetch the collection and publish it. Returns the number of projects.
    ///
    /// On failure the collection stays empty and the error is logged here;
    /// the caller decides whether the page keeps showing its loading state.
    pub async fn load(&self) -> Result<usize, LoadError> {
        if self.loaded.load(Ordering::Acquire) {
            return Err(LoadError::AlreadyLoaded);
        }

        let mut attempt = 0u32;
        let projects = loop {
            attempt += 1;
            match self.fetch_once().await {
                Ok(projects) => break projects,
                Err(e) if e.is_transient() && attempt <= self.policy.max_retries => {
                    tracing::warn!(
                        "⚠️ Project load attempt {}/{} failed: {}",
                        attempt,
                        self.policy.max_retries + 1,
                        e
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
                Err(e) => {
                    tracing::error!("❌ Error fetching projects: {}", e);
                    return Err(e);
                }
            }
        };

        // a concurrent load may have won the race
        if self
            .loaded
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(LoadError::AlreadyLoaded);
        }

        let count = projects.len();
        self.sender.send_replace(Arc::new(ProjectCollection::new(projects)));
        if let Ok(mut at) = self.loaded_at.lock() {
            *at = Some(Utc::now());
        }

        tracing::info!("✅ Loaded {} projects", count);
        Ok(count)
    }

    async fn fetch_once(&self) -> Result<Vec<Project>, LoadError> {
        match self.policy.timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch_all())
                .await
                .map_err(|_| LoadError::Timeout(limit))?,
            None => self.source.fetch_all().await,
        }
    }

    pub fn current(&self) -> Arc<ProjectCollection> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ProjectCollection>> {
        self.sender.subscribe()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at.lock().ok().and_then(|at| *at)
    }
}
