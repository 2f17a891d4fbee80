use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;

use crate::loader::{
    FnSource, ImportError, LazyModule, LoadStatus, LoaderError, ModuleSource, RetryPolicy,
};

#[derive(Debug)]
struct FeatureModule {
    generation: usize,
}

/// Source that counts imports and fails the first `failures` of them
struct CountingSource {
    calls: Arc<AtomicUsize>,
    failures: usize,
    delay: Duration,
}

impl CountingSource {
    fn new(failures: usize) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            failures,
            delay: Duration::from_millis(20),
        }
    }
}

#[async_trait]
impl ModuleSource<FeatureModule> for CountingSource {
    fn specifier(&self) -> &str {
        "feature"
    }

    async fn import(&self) -> Result<FeatureModule, ImportError> {
        let generation = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if generation <= self.failures {
            return Err(ImportError::NotFound("feature".to_string()));
        }
        Ok(FeatureModule { generation })
    }
}

fn lazy(failures: usize, policy: RetryPolicy) -> (LazyModule<FeatureModule>, Arc<AtomicUsize>) {
    let source = CountingSource::new(failures);
    let calls = Arc::clone(&source.calls);
    (LazyModule::with_retry_policy(Arc::new(source), policy), calls)
}

#[tokio::test]
async fn test_first_call_imports_and_caches() {
    let (module, calls) = lazy(0, RetryPolicy::default());
    assert_eq!(module.status(), LoadStatus::Unloaded);
    assert!(module.get().is_none());

    let first = module.ensure_loaded().await.expect("load");
    let second = module.ensure_loaded().await.expect("load");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(module.import_count(), 1);
    assert_eq!(module.status(), LoadStatus::Loaded);
    assert_eq!(module.get().map(|m| m.generation), Some(1));
}

#[tokio::test]
async fn test_concurrent_callers_share_one_import() {
    let (module, calls) = lazy(0, RetryPolicy::default());

    let results = join_all((0..8).map(|_| module.ensure_loaded())).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let modules: Vec<_> = results.into_iter().map(|r| r.expect("load")).collect();
    assert!(modules.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn test_concurrent_callers_across_tasks_share_one_import() {
    let (module, calls) = lazy(0, RetryPolicy::default());
    let module = Arc::new(module);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let module = Arc::clone(&module);
            tokio::spawn(async move { module.ensure_loaded().await })
        })
        .collect();

    let mut loaded = Vec::new();
    for handle in handles {
        loaded.push(handle.await.expect("join").expect("load"));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(loaded.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn test_pending_callers_share_the_same_rejection() {
    let (module, calls) = lazy(1, RetryPolicy::Never);

    let results = join_all((0..3).map(|_| module.ensure_loaded())).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let errors: Vec<Arc<ImportError>> = results
        .into_iter()
        .map(|r| {
            let err = r.expect_err("import should fail");
            Arc::clone(err.import_error().expect("import failure"))
        })
        .collect();
    assert!(errors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(module.status(), LoadStatus::Failed);
}

#[tokio::test]
async fn test_never_policy_keeps_failure_terminal() {
    let (module, calls) = lazy(1, RetryPolicy::Never);

    let first = module.ensure_loaded().await.unwrap_err();
    let second = module.ensure_loaded().await.unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "no retry under Never");
    assert!(matches!(second, LoaderError::ImportFailed { ref specifier, .. } if specifier == "feature"));
    assert!(Arc::ptr_eq(
        first.import_error().expect("first"),
        second.import_error().expect("second")
    ));
}

#[tokio::test]
async fn test_retry_on_next_call_imports_again() {
    let (module, calls) = lazy(1, RetryPolicy::RetryOnNextCall);

    assert!(module.ensure_loaded().await.is_err());
    assert_eq!(module.status(), LoadStatus::Failed);

    let loaded = module.ensure_loaded().await.expect("second attempt succeeds");
    assert_eq!(loaded.generation, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(module.status(), LoadStatus::Loaded);

    // Loaded is terminal
    module.ensure_loaded().await.expect("cached");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fn_source_adapter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = FnSource::new("answer", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, ImportError>(42u32) }
    });
    let module: LazyModule<u32> = LazyModule::new(Arc::new(source));

    assert_eq!(module.specifier(), "answer");
    assert_eq!(module.retry_policy(), RetryPolicy::RetryOnNextCall);
    assert_eq!(*module.ensure_loaded().await.expect("load"), 42);
    assert_eq!(*module.ensure_loaded().await.expect("load"), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_debug_reports_specifier_and_imports() {
    let (module, _calls) = lazy(0, RetryPolicy::Never);
    module.ensure_loaded().await.expect("load");

    let rendered = format!("{:?}", module);
    assert!(rendered.contains("\"feature\""));
    assert!(rendered.contains("imports_started: 1"));
    assert!(rendered.contains("Never"));
}
