use std::sync::Arc;

use rowsift_batch::{BatchError, BatchRun, MemoryProvider};
use rowsift_classify::{Filter, FilterChain, filter_fn, try_filter_fn};
use rowsift_model::{AttrName, AttributeView, FieldName, FilterKey, RawRow, Value};
use rowsift_translate::{AttributeDef, AttributeMap};

fn key(name: &str) -> FilterKey {
    FilterKey::new(name).unwrap()
}

fn name_map() -> Arc<AttributeMap> {
    let mut builder = AttributeMap::builder();
    builder.declare(AttributeDef::new(AttrName::new("name").unwrap()));
    Arc::new(builder.build())
}

fn name_rows(names: &[&str]) -> Vec<RawRow> {
    names
        .iter()
        .map(|name| RawRow::new().with(FieldName::new("name").unwrap(), Value::from(*name)))
        .collect()
}

fn starts_with(prefix: &'static str) -> Box<dyn Filter> {
    filter_fn(move |_, translated| {
        translated
            .get_str("name")
            .as_text()
            .is_some_and(|s| s.starts_with(prefix))
    })
}

fn translated_names(records: &[Arc<rowsift_classify::CandidateRecord>]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.translated_view().get_str("name").to_string())
        .collect()
}

#[test]
fn rows_partition_into_first_matching_buckets() {
    let mut chain = FilterChain::new();
    chain
        .append(key("alpha"), starts_with("A"))
        .append(key("zeta"), starts_with("Z"));
    let mut run = BatchRun::new(name_map(), chain);

    let provider = MemoryProvider::new(name_rows(&["Arthur", "Zaphod", "Ford"]));
    let summary = run.execute(&provider).unwrap();

    assert!(summary.success);
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.bucket_count("alpha"), Some(1));
    assert_eq!(summary.bucket_count("zeta"), Some(1));
    assert_eq!(summary.unfiltered_count, 1);

    let buckets = run.records().unwrap();
    assert_eq!(
        translated_names(buckets.get(&key("alpha")).unwrap()),
        vec!["Arthur"]
    );
    assert_eq!(
        translated_names(buckets.get(&key("zeta")).unwrap()),
        vec!["Zaphod"]
    );
    assert_eq!(
        translated_names(run.unfiltered_records().unwrap()),
        vec!["Ford"]
    );
    assert_eq!(
        translated_names(run.all_records().unwrap()),
        vec!["Arthur", "Zaphod", "Ford"]
    );
}

struct CountingFilter {
    seen: Arc<std::sync::atomic::AtomicUsize>,
}

impl Filter for CountingFilter {
    fn matches(&mut self, _raw: &AttributeView, translated: &AttributeView) -> anyhow::Result<bool> {
        let claimed = translated
            .get_str("name")
            .as_text()
            .is_some_and(|s| s.starts_with('A'));
        if claimed {
            self.seen
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
        Ok(claimed)
    }

    fn reset(&mut self) {
        self.seen.store(0, std::sync::atomic::Ordering::Relaxed);
    }
}

#[test]
fn stateful_filters_reset_at_every_run_start() {
    let seen = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut chain = FilterChain::new();
    chain.append(
        key("alpha"),
        Box::new(CountingFilter {
            seen: Arc::clone(&seen),
        }),
    );
    let mut run = BatchRun::new(name_map(), chain);

    let provider = MemoryProvider::new(name_rows(&["Arthur", "Zaphod"]));
    run.execute(&provider).unwrap();
    let summary = run.execute(&provider).unwrap();

    // Without the orchestrator's reset the second run would double-count.
    assert_eq!(seen.load(std::sync::atomic::Ordering::Relaxed), 1);
    assert_eq!(summary.bucket_count("alpha"), Some(1));
    assert_eq!(run.records_for(&key("alpha")).unwrap().len(), 1);
}

#[test]
fn empty_error_free_batch_is_a_successful_run() {
    let mut chain = FilterChain::new();
    chain.append(key("alpha"), starts_with("A"));
    let mut run = BatchRun::new(name_map(), chain);

    let summary = run.execute(&MemoryProvider::empty()).unwrap();

    assert!(summary.success);
    assert_eq!(summary.total_records, 0);
    assert_eq!(summary.bucket_count("alpha"), Some(0));
    assert!(run.processed());
    assert!(run.all_records().unwrap().is_empty());
    assert_eq!(run.records().unwrap().len(), 1);
}

#[test]
fn provider_errors_surface_as_unsuccessful_not_thrown() {
    let mut run = BatchRun::new(name_map(), FilterChain::new());
    let provider = MemoryProvider::failed(vec!["connection refused".to_string()]);

    let summary = run.execute(&provider).unwrap();

    assert!(!summary.success);
    assert_eq!(summary.provider_errors, vec!["connection refused"]);
    assert!(run.processed());
    assert_eq!(run.success().unwrap(), false);
}

#[test]
fn results_before_first_run_fail_loudly() {
    let run = BatchRun::new(name_map(), FilterChain::new());

    assert!(!run.processed());
    assert!(matches!(run.records(), Err(BatchError::NotProcessed)));
    assert!(matches!(run.total_records(), Err(BatchError::NotProcessed)));
    assert!(matches!(
        run.unfiltered_records(),
        Err(BatchError::NotProcessed)
    ));
}

#[test]
fn predicate_error_aborts_and_discards_the_run() {
    let mut chain = FilterChain::new();
    chain.append(key("alpha"), starts_with("A"));
    let mut run = BatchRun::new(name_map(), chain);

    let provider = MemoryProvider::new(name_rows(&["Arthur"]));
    run.execute(&provider).unwrap();
    assert!(run.processed());

    run.filter_chain_mut().prepend(vec![(
        key("broken"),
        try_filter_fn(|_, _| anyhow::bail!("predicate defect")),
    )]);

    let error = run.execute(&provider).unwrap_err();
    assert!(matches!(error, BatchError::Classify(_)));
    // The aborted run discarded the previous snapshot and produced none.
    assert!(!run.processed());
}

#[test]
fn prepended_filters_take_precedence_on_the_next_run() {
    let mut chain = FilterChain::new();
    chain
        .append(key("alpha"), starts_with("A"))
        .append(key("zeta"), starts_with("Z"));
    let mut run = BatchRun::new(name_map(), chain);

    let provider = MemoryProvider::new(name_rows(&["Arthur", "Zaphod"]));
    let first = run.execute(&provider).unwrap();
    assert_eq!(first.bucket_count("alpha"), Some(1));

    run.filter_chain_mut()
        .prepend(vec![(key("beta"), starts_with("A"))]);
    let second = run.execute(&provider).unwrap();

    assert_eq!(second.bucket_count("beta"), Some(1));
    assert_eq!(second.bucket_count("alpha"), Some(0));
    assert_eq!(second.bucket_count("zeta"), Some(1));

    let counts = run.record_counts().unwrap();
    let order: Vec<&str> = counts.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(order, vec!["beta", "alpha", "zeta"]);
}

#[test]
fn unknown_bucket_reads_as_empty_after_a_run() {
    let mut run = BatchRun::new(name_map(), FilterChain::new());
    run.execute(&MemoryProvider::empty()).unwrap();

    assert!(run.records_for(&key("nope")).unwrap().is_empty());
}
