//! End-to-end: declarative spec -> attribute map -> run -> buckets.

use std::sync::Arc;

use rowsift_batch::{BatchRun, MemoryProvider};
use rowsift_classify::{FilterChain, filter_fn};
use rowsift_model::{AttrName, FieldName, FilterKey, RawRow, Value};
use rowsift_translate::{
    AttributeDef, AttributeMap, ImportSpec, TranslateError, TranslatorRegistry, translator_fn,
};

#[test]
fn spec_compiled_job_translates_and_classifies() {
    let spec: ImportSpec = serde_json::from_str(
        r#"{
            "job": "people",
            "attributes": [
                {"to": "name", "from": "full_name", "translators": ["trim"]},
                {"to": "age", "translators": ["to_int"]}
            ]
        }"#,
    )
    .unwrap();
    let map = Arc::new(spec.compile(&TranslatorRegistry::with_builtins()).unwrap());

    let mut chain = FilterChain::new();
    chain.append(
        FilterKey::new("adults").unwrap(),
        filter_fn(|_, translated| {
            translated
                .get_str("age")
                .as_int()
                .is_some_and(|age| age >= 18)
        }),
    );

    let rows = vec![
        RawRow::new()
            .with(FieldName::new("full_name").unwrap(), Value::from(" Arthur Dent "))
            .with(FieldName::new("age").unwrap(), Value::from("42")),
        RawRow::new()
            .with(FieldName::new("full_name").unwrap(), Value::from("Zaphod"))
            .with(FieldName::new("age").unwrap(), Value::from("not a number")),
    ];

    let mut run = BatchRun::new(map, chain);
    let summary = run.execute(&MemoryProvider::new(rows)).unwrap();

    assert_eq!(summary.bucket_count("adults"), Some(1));
    assert_eq!(summary.unfiltered_count, 1);

    let adults = run
        .records_for(&FilterKey::new("adults").unwrap())
        .unwrap();
    let arthur = adults[0].translated_view();
    assert_eq!(arthur.get_str("name"), &Value::from("Arthur Dent"));
    assert_eq!(arthur.get_str("age"), &Value::Int(42));

    // The unparseable age degraded to Missing without touching the name.
    let zaphod = run.unfiltered_records().unwrap()[0].translated_view();
    assert_eq!(zaphod.get_str("age"), &Value::Missing);
    assert_eq!(zaphod.get_str("name"), &Value::from("Zaphod"));
}

#[test]
fn throwing_translator_never_aborts_the_run() {
    let divide_by_zero = translator_fn("divide_by_zero", |_| {
        Err(TranslateError::custom("division by zero"))
    });

    let mut builder = AttributeMap::builder();
    builder
        .declare(AttributeDef::new(AttrName::new("id").unwrap()).with_translator(divide_by_zero))
        .declare(AttributeDef::new(AttrName::new("name").unwrap()));
    let map = Arc::new(builder.build());

    let rows = vec![
        RawRow::new()
            .with(FieldName::new("id").unwrap(), Value::from("1"))
            .with(FieldName::new("name").unwrap(), Value::from("Arthur")),
    ];

    let mut run = BatchRun::new(map, FilterChain::new());
    let summary = run.execute(&MemoryProvider::new(rows)).unwrap();

    assert!(summary.success);
    let record = &run.all_records().unwrap()[0];
    assert_eq!(record.translated_view().get_str("id"), &Value::Missing);
    assert_eq!(record.translated_view().get_str("name"), &Value::from("Arthur"));
    assert_eq!(record.failures().len(), 1);
    assert_eq!(record.failures()[0].translator, "divide_by_zero");
}
