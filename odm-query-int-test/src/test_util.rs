use odm_query::errors::QueryResult;
use odm_query::Document;
use odm_query_derive::Mapped;

/// Runs a test body and fails with the full error chain when it returns an error.
pub fn run_test<T>(test: T)
where
    T: FnOnce() -> QueryResult<()>,
{
    if let Err(e) = test() {
        eprintln!("\n==================== TEST FAILED ====================");
        eprintln!("Error kind: {}", e.kind());
        eprintln!("{:?}", e);
        eprintln!("=====================================================\n");
        panic!("Test failed: {}", e);
    }
}

/// The JSON value of `document`, for comparing with `serde_json::json!` literals.
pub fn to_json(document: &Document) -> serde_json::Value {
    match serde_json::to_value(document) {
        Ok(value) => value,
        Err(e) => panic!("Failed to convert {} to json: {}", document, e),
    }
}

#[derive(Debug, Clone, Mapped)]
pub struct Bar {
    pub w: i64,
    pub x1: i32,
    pub x2: i32,
    pub y: bool,
    pub z: String,
}

impl Bar {
    pub fn new(w: i64, x1: i32, x2: i32, y: bool, z: &str) -> Self {
        Bar {
            w,
            x1,
            x2,
            y,
            z: z.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Mapped)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}
