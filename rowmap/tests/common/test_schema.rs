use chrono::{DateTime, Utc};
use rowmap::{FieldSchema, FieldType, Schema, Value};

/// Schema of the student result set: `Name`, `Age`, `GPA` and `LastLogin`.
pub fn student_schema() -> Schema {
    Schema::new(vec![
        FieldSchema::new("Name", FieldType::String),
        FieldSchema::new("Age", FieldType::Integer),
        FieldSchema::new("GPA", FieldType::Float),
        FieldSchema::new("LastLogin", FieldType::Timestamp),
    ])
    .unwrap()
}

/// Flat values of the first student row.
pub fn foo_values() -> Vec<Value> {
    vec![
        Value::from("foo"),
        Value::from(3i64),
        Value::from(4.0),
        Value::from(5i64),
    ]
}

/// Flat values of the second student row.
pub fn bar_values() -> Vec<Value> {
    vec![
        Value::from("bar"),
        Value::from(10i64),
        Value::from(2.5),
        Value::from(1477952793i64),
    ]
}

/// Both student rows as one flat sequence.
pub fn student_values() -> Vec<Value> {
    let mut values = foo_values();
    values.extend(bar_values());

    values
}

/// A typed view of one student row, used to compare accumulated rows.
#[derive(Debug, PartialEq)]
pub struct Student {
    pub name: String,
    pub age: i64,
    pub gpa: f64,
    pub last_login: DateTime<Utc>,
}

impl Student {
    pub fn new(name: &str, age: i64, gpa: f64, last_login_secs: i64) -> Student {
        Student {
            name: name.to_string(),
            age,
            gpa,
            last_login: DateTime::from_timestamp(last_login_secs, 0).unwrap(),
        }
    }

    pub fn from_row(row: &rowmap::Row) -> Student {
        Student {
            name: row.get("Name").unwrap(),
            age: row.get("Age").unwrap(),
            gpa: row.get("GPA").unwrap(),
            last_login: row.get("LastLogin").unwrap(),
        }
    }
}

/// The two students every full load is expected to produce, in order.
pub fn expected_students() -> Vec<Student> {
    vec![
        Student::new("foo", 3, 4.0, 5),
        Student::new("bar", 10, 2.5, 1477952793),
    ]
}
