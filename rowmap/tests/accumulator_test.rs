mod common;

use chrono::{DateTime, Utc};
use rowmap::{
    ErrorKind, FieldSchema, FieldType, LoadState, Row, RowAccumulator, Schema, Value,
    collect_rows,
};
use rowmap_config::shared::LoaderConfig;
use rowmap_telemetry::init_test_tracing;

use crate::common::source::{FailingSource, ScriptedSource};
use crate::common::test_schema::{
    Student, bar_values, expected_students, foo_values, student_schema, student_values,
};

fn students(rows: &[Row]) -> Vec<Student> {
    rows.iter().map(Student::from_row).collect()
}

#[test]
fn single_batch_is_split_into_named_rows() {
    init_test_tracing();
    let mut accumulator = RowAccumulator::new();

    accumulator
        .accept_batch(student_values(), &student_schema())
        .unwrap();

    assert_eq!(accumulator.len(), 2);
    assert_eq!(students(accumulator.rows()), expected_students());
    for row in accumulator.rows() {
        let names: Vec<_> = row.column_names().collect();
        assert_eq!(names, vec!["Name", "Age", "GPA", "LastLogin"]);
    }
}

#[test]
fn multipage_source_yields_the_same_rows_as_one_batch() {
    init_test_tracing();
    let mut single = RowAccumulator::new();
    single
        .accept_batch(student_values(), &student_schema())
        .unwrap();

    let mut source = ScriptedSource::new(vec![foo_values(), bar_values()]);
    let mut paged = RowAccumulator::new();
    paged.accumulate_from(&mut source).unwrap();

    assert_eq!(source.fetched_pages(), 2);
    assert_eq!(paged.rows(), single.rows());
    assert_eq!(students(paged.rows()), expected_students());
    assert_eq!(paged.state(), LoadState::Fresh);
}

#[test]
fn page_size_does_not_change_row_boundaries() {
    init_test_tracing();
    let expected = {
        let mut accumulator = RowAccumulator::new();
        accumulator
            .accept_batch(student_values(), &student_schema())
            .unwrap();
        accumulator.into_rows()
    };

    for page_size in 1..=student_values().len() {
        let source = ScriptedSource::chunked(student_values(), page_size);

        let rows = collect_rows(source, LoaderConfig::default()).unwrap();

        assert_eq!(rows, expected, "page size {page_size}");
    }
}

#[test]
fn fresh_batch_with_new_schema_discards_earlier_rows() {
    init_test_tracing();
    let mut accumulator = RowAccumulator::new();
    accumulator
        .accept_batch(student_values(), &student_schema())
        .unwrap();

    let course_schema = Schema::new(vec![
        FieldSchema::new("Course", FieldType::String),
        FieldSchema::new("Passed", FieldType::Boolean),
    ])
    .unwrap();
    accumulator
        .accept_batch(
            vec![Value::from("Databases"), Value::from(true)],
            &course_schema,
        )
        .unwrap();

    assert_eq!(accumulator.len(), 1);
    let row = &accumulator.rows()[0];
    assert_eq!(row.get::<String>("Course"), Some("Databases".to_string()));
    assert_eq!(row.get::<bool>("Passed"), Some(true));
    assert_eq!(row.get_value("Name"), None);
}

#[test]
fn typed_access_matches_declared_types_only() {
    init_test_tracing();
    let rows = collect_rows(
        ScriptedSource::new(vec![student_values()]),
        LoaderConfig::default(),
    )
    .unwrap();
    let row = &rows[1];

    assert_eq!(row.get::<String>("Name"), Some("bar".to_string()));
    assert_eq!(row.get::<i64>("Age"), Some(10));
    assert_eq!(row.get::<f64>("GPA"), Some(2.5));
    assert_eq!(
        row.get::<DateTime<Utc>>("LastLogin"),
        DateTime::from_timestamp(1477952793, 0)
    );

    for name in ["Name", "GPA", "LastLogin"] {
        let err = row.try_get::<i64>(name).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldTypeMismatch, "field {name}");
    }
    assert_eq!(
        row.try_get::<String>("Age").unwrap_err().kind(),
        ErrorKind::FieldTypeMismatch
    );
    assert_eq!(
        row.try_get::<bool>("Name").unwrap_err().kind(),
        ErrorKind::FieldTypeMismatch
    );
}

#[test]
#[should_panic(expected = "field `GPA` is declared as FLOAT but was read as STRING")]
fn typed_access_with_wrong_type_panics() {
    init_test_tracing();
    let rows = collect_rows(
        ScriptedSource::new(vec![foo_values()]),
        LoaderConfig::default(),
    )
    .unwrap();

    rows[0].get::<String>("GPA");
}

#[test]
fn source_failure_is_propagated_and_earlier_pages_are_kept() {
    init_test_tracing();
    let inner = ScriptedSource::new(vec![foo_values(), bar_values()]);
    let mut source = FailingSource::new(inner, 1);
    let mut accumulator = RowAccumulator::new();

    let err = accumulator.accumulate_from(&mut source).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceError);
    assert_eq!(err.detail(), Some("backend unavailable"));
    assert_eq!(source.fetches(), 2);
    assert_eq!(students(accumulator.rows()), vec![expected_students().remove(0)]);
    assert_eq!(accumulator.state(), LoadState::Fresh);

    // The accumulator starts clean on the next pass.
    accumulator
        .accumulate_from(ScriptedSource::new(vec![student_values()]))
        .unwrap();
    assert_eq!(students(accumulator.rows()), expected_students());
}

#[test]
fn row_limit_from_config_bounds_the_result() {
    init_test_tracing();
    let config = LoaderConfig {
        max_buffered_rows: Some(1),
        ..LoaderConfig::default()
    };

    let err = collect_rows(ScriptedSource::new(vec![foo_values(), bar_values()]), config)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RowLimitExceeded);
}

#[test]
fn rows_serialize_as_name_value_maps() {
    init_test_tracing();
    let rows = collect_rows(
        ScriptedSource::new(vec![student_values()]),
        LoaderConfig::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&rows).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            {"Name": "foo", "Age": 3, "GPA": 4.0, "LastLogin": 5},
            {"Name": "bar", "Age": 10, "GPA": 2.5, "LastLogin": 1477952793},
        ])
    );
}
