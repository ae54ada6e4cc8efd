// Bundled catalog: every entry parses and expands to a usable URL

use uritemplate::{
    config::TemplateCatalog,
    template::{Value, Variables},
};

mod common;

fn bundled() -> TemplateCatalog {
    TemplateCatalog::load(Some("templates.yml")).expect("bundled catalog loads")
}

fn expand(alias: &str, mut variables: Variables) -> String {
    let catalog = bundled();
    let entry = catalog.get(alias).unwrap_or_else(|| panic!("missing alias {}", alias));
    variables.fill_defaults(&entry.defaults);
    entry.template.make_url(&variables).unwrap().to_string()
}

#[test]
fn test_bundled_aliases_are_unique_and_ordered() {
    let catalog = bundled();
    let aliases: Vec<&str> = catalog.iter().map(|e| e.alias.as_str()).collect();
    assert_eq!(aliases.first(), Some(&"g"));
    assert_eq!(aliases.len(), catalog.len());
    assert!(aliases.contains(&"gh"));
    assert!(aliases.contains(&"rfc"));
}

#[test]
fn test_fallbacks_are_absolute_urls() {
    for entry in bundled().iter() {
        if let Some(fallback) = &entry.fallback {
            assert!(
                url::Url::parse(fallback).is_ok(),
                "fallback for '{}' is not a URL",
                entry.alias
            );
        }
    }
}

#[test]
fn test_search_alias() {
    let variables: Variables = [("q", "rust lang")].into_iter().collect();
    assert_eq!(
        expand("g", variables),
        "https://www.google.com/search?q=rust%20lang"
    );
}

#[test]
fn test_defaults_fill_missing_variables() {
    let mut variables = Variables::new();
    variables.insert("repo", "cargo");
    variables.insert("path", ["tree", "master"]);
    assert_eq!(
        expand("gh", variables),
        "https://github.com/rust-lang/cargo/tree/master"
    );

    let variables: Variables = [("owner", "tokio-rs"), ("repo", "axum")].into_iter().collect();
    assert_eq!(expand("gh", variables), "https://github.com/tokio-rs/axum");
}

#[test]
fn test_docs_alias_uses_default_version() {
    let variables: Variables = [("name", "serde")].into_iter().collect();
    assert_eq!(
        expand("docs", variables),
        "https://docs.rs/serde/latest/serde/"
    );
}

#[test]
fn test_reserved_and_fragment_aliases() {
    let variables: Variables = [("title", "Rust_(programming_language)")].into_iter().collect();
    assert_eq!(
        expand("wiki", variables),
        "https://en.wikipedia.org/wiki/Rust_(programming_language)"
    );

    let mut variables = Variables::new();
    variables.insert("number", "6570");
    variables.insert("section", Value::text("section-3.2"));
    assert_eq!(
        expand("rfc", variables),
        "https://www.rfc-editor.org/rfc/rfc6570#section-3.2"
    );
}

#[test]
fn test_test_catalog_parses() {
    let catalog = TemplateCatalog::from_yaml(common::TEST_CATALOG).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(
        catalog.get("g").and_then(|e| e.fallback.as_deref()),
        Some("https://www.google.com")
    );
}
