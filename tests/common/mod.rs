// Common test utilities shared across test files

use axum::{body::Body, http::Response};
use http_body_util::BodyExt;
use std::sync::Arc;
use uritemplate::{
    config::TemplateCatalog,
    create_router,
    template::{Value, Variables},
    AppState,
};

/// Variables used by the examples in RFC 6570 section 3.2
#[allow(dead_code)]
pub fn rfc_variables() -> Variables {
    let mut variables = Variables::new();
    variables.insert("count", ["one", "two", "three"]);
    variables.insert("dom", ["example", "com"]);
    variables.insert("dub", "me/too");
    variables.insert("hello", "Hello World!");
    variables.insert("half", "50%");
    variables.insert("var", "value");
    variables.insert("who", "fred");
    variables.insert("base", "http://example.com/home/");
    variables.insert("path", "/foo/bar");
    variables.insert("list", ["red", "green", "blue"]);
    variables.insert("keys", [("semi", ";"), ("dot", "."), ("comma", ",")]);
    variables.insert("v", "6");
    variables.insert("x", "1024");
    variables.insert("y", "768");
    variables.insert("empty", "");
    variables.insert(
        "empty_keys",
        Value::associative_list(Vec::<(String, String)>::new()),
    );
    variables
}

#[allow(dead_code)]
pub const TEST_CATALOG: &str = r#"
- alias: g
  description: Google Search
  template: "https://www.google.com/search{?q}"
  fallback: "https://www.google.com"

- alias: gh
  description: GitHub repository
  template: "https://github.com/{owner}/{repo}{/path*}"
  defaults:
    owner: rust-lang

- alias: search
  description: Search with options
  template: "https://example.com/search{?q,opts*}"

- alias: rel
  description: Relative path that never forms a URL
  template: "{/segments*}"
"#;

/// Create a test Axum router backed by `TEST_CATALOG`
#[allow(dead_code)]
pub fn create_test_app() -> axum::Router {
    let catalog = TemplateCatalog::from_yaml(TEST_CATALOG).expect("test catalog is valid");
    create_router(Arc::new(AppState::new(catalog)))
}

/// Read a response body into a string
#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
