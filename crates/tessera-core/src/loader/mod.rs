//! # Tessera Core Lazy Module Loader
//!
//! Feature modules are expensive to bring up, so extensions only describe them
//! at registration time and import them the first time a host callback needs
//! one. [`LazyModule`] is the single-slot cache that performs that import.
//!
//! ## States
//!
//! ```text
//! Unloaded --ensure_loaded--> Loading --ok--> Loaded   (terminal)
//!                                     --err-> Failed
//! Failed --ensure_loaded--> Loading           (RetryPolicy::RetryOnNextCall)
//! Failed --ensure_loaded--> same error        (RetryPolicy::Never)
//! ```
//!
//! The cache is keyed on the in-flight import, not only its result: while a
//! load is pending every caller awaits the same [`Shared`] future, so an
//! import runs once no matter how many callbacks interleave, and all of them
//! observe the same module `Arc` or the same error.
pub mod error;

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, error, info};

pub use error::{ImportError, LoaderError};

/// Something that can produce a feature module asynchronously
#[async_trait]
pub trait ModuleSource<M>: Send + Sync {
    /// Identifier used in logs and errors, e.g. `"persistence"`
    fn specifier(&self) -> &str;

    /// Perform the import
    async fn import(&self) -> Result<M, ImportError>;
}

/// Adapts an async closure into a [`ModuleSource`]
pub struct FnSource<F> {
    specifier: String,
    import: F,
}

impl<F> FnSource<F> {
    pub fn new(specifier: impl Into<String>, import: F) -> Self {
        Self {
            specifier: specifier.into(),
            import,
        }
    }
}

#[async_trait]
impl<M, F, Fut> ModuleSource<M> for FnSource<F>
where
    M: Send + 'static,
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<M, ImportError>> + Send + 'static,
{
    fn specifier(&self) -> &str {
        &self.specifier
    }

    async fn import(&self) -> Result<M, ImportError> {
        (self.import)().await
    }
}

/// What to do when `ensure_loaded` is called after an import failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Start a fresh import on the next call
    #[default]
    RetryOnNextCall,
    /// Keep the failure; every later caller gets the same error
    Never,
}

/// Observable state of a [`LazyModule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

type ImportOutcome<M> = Result<Arc<M>, Arc<ImportError>>;
type SharedImport<M> = Shared<BoxFuture<'static, ImportOutcome<M>>>;

enum LoadState<M> {
    Unloaded,
    Loading(SharedImport<M>),
    Loaded(Arc<M>),
    Failed(Arc<ImportError>),
}

/// Compute-once, async cache for a feature module
pub struct LazyModule<M> {
    source: Arc<dyn ModuleSource<M>>,
    retry_policy: RetryPolicy,
    state: Mutex<LoadState<M>>,
    imports_started: AtomicUsize,
}

impl<M> fmt::Debug for LazyModule<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyModule")
            .field("specifier", &self.source.specifier())
            .field("retry_policy", &self.retry_policy)
            .field("imports_started", &self.imports_started.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<M: Send + Sync + 'static> LazyModule<M> {
    /// Create an unloaded cache using the default retry policy
    pub fn new(source: Arc<dyn ModuleSource<M>>) -> Self {
        Self::with_retry_policy(source, RetryPolicy::default())
    }

    pub fn with_retry_policy(source: Arc<dyn ModuleSource<M>>, retry_policy: RetryPolicy) -> Self {
        Self {
            source,
            retry_policy,
            state: Mutex::new(LoadState::Unloaded),
            imports_started: AtomicUsize::new(0),
        }
    }

    pub fn specifier(&self) -> &str {
        self.source.specifier()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Number of imports started over the lifetime of this cache
    pub fn import_count(&self) -> usize {
        self.imports_started.load(Ordering::SeqCst)
    }

    /// Current state of the cache
    pub fn status(&self) -> LoadStatus {
        match self.lock_state() {
            Ok(state) => match &*state {
                LoadState::Unloaded => LoadStatus::Unloaded,
                LoadState::Loading(_) => LoadStatus::Loading,
                LoadState::Loaded(_) => LoadStatus::Loaded,
                LoadState::Failed(_) => LoadStatus::Failed,
            },
            Err(_) => LoadStatus::Failed,
        }
    }

    /// The loaded module, without triggering an import
    pub fn get(&self) -> Option<Arc<M>> {
        match &*self.lock_state().ok()? {
            LoadState::Loaded(module) => Some(Arc::clone(module)),
            _ => None,
        }
    }

    /// Return the module, importing it on first use
    pub async fn ensure_loaded(&self) -> Result<Arc<M>, LoaderError> {
        let pending = {
            let mut state = self.lock_state()?;
            match &*state {
                LoadState::Loaded(module) => return Ok(Arc::clone(module)),
                LoadState::Loading(pending) => pending.clone(),
                LoadState::Failed(source) if self.retry_policy == RetryPolicy::Never => {
                    return Err(self.import_failed(Arc::clone(source)));
                }
                LoadState::Unloaded | LoadState::Failed(_) => {
                    let pending = self.start_import();
                    *state = LoadState::Loading(pending.clone());
                    pending
                }
            }
        };

        let outcome = pending.clone().await;
        self.settle(&pending, &outcome)?;
        outcome.map_err(|source| self.import_failed(source))
    }

    fn start_import(&self) -> SharedImport<M> {
        let attempt = self.imports_started.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Importing module '{}' (attempt {})", self.specifier(), attempt);
        let source = Arc::clone(&self.source);
        async move { source.import().await.map(Arc::new).map_err(Arc::new) }
            .boxed()
            .shared()
    }

    /// Record the outcome of an import, unless a newer import replaced it.
    fn settle(&self, pending: &SharedImport<M>, outcome: &ImportOutcome<M>) -> Result<(), LoaderError> {
        let mut state = self.lock_state()?;
        let is_current = matches!(&*state, LoadState::Loading(current) if current.ptr_eq(pending));
        if !is_current {
            return Ok(());
        }
        *state = match outcome {
            Ok(module) => {
                info!("Module '{}' loaded", self.specifier());
                LoadState::Loaded(Arc::clone(module))
            }
            Err(source) => {
                error!("Module '{}' failed to load: {}", self.specifier(), source);
                LoadState::Failed(Arc::clone(source))
            }
        };
        Ok(())
    }

    fn import_failed(&self, source: Arc<ImportError>) -> LoaderError {
        LoaderError::ImportFailed {
            specifier: self.specifier().to_string(),
            source,
        }
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, LoadState<M>>, LoaderError> {
        self.state
            .lock()
            .map_err(|_| LoaderError::CachePoisoned(self.specifier().to_string()))
    }
}

#[cfg(test)]
mod tests;
