//! Corpus loading and validation failure modes.

use std::fs;

use banter::corpus::Corpus;
use banter::error::BanterError;
use tempfile::TempDir;

fn load(json: &str) -> Result<Corpus, BanterError> {
    Corpus::from_json(json)
}

#[test]
fn valid_file_loads_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("intents.json");
    fs::write(
        &path,
        r#"[
            {"tag": "greeting", "patterns": ["hello"], "responses": ["Hi!"]},
            {"tag": "farewell", "patterns": ["bye"], "responses": ["See you!"]}
        ]"#,
    )
    .unwrap();

    let corpus = Corpus::load_from_path(&path).unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.entries().len(), 2);
}

#[test]
fn missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Corpus::load_from_path(temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(BanterError::Io(_))));
}

#[test]
fn missing_required_field_fails() {
    // No "responses" field at all
    let result = load(r#"[{"tag": "greeting", "patterns": ["hello"]}]"#);
    assert!(matches!(result, Err(BanterError::Json(_))));
}

#[test]
fn empty_patterns_fail() {
    let result = load(r#"[{"tag": "greeting", "patterns": [], "responses": ["Hi!"]}]"#);
    assert!(matches!(result, Err(BanterError::Corpus(_))));
}

#[test]
fn empty_responses_fail() {
    let result = load(r#"[{"tag": "greeting", "patterns": ["hello"], "responses": []}]"#);
    assert!(matches!(result, Err(BanterError::Corpus(_))));
}

#[test]
fn blank_response_fails() {
    let result = load(r#"[{"tag": "greeting", "patterns": ["hello"], "responses": ["  "]}]"#);
    assert!(matches!(result, Err(BanterError::Corpus(_))));
}

#[test]
fn duplicate_tags_fail() {
    let result = load(
        r#"[
            {"tag": "greeting", "patterns": ["hello"], "responses": ["Hi!"]},
            {"tag": "greeting", "patterns": ["hey"], "responses": ["Hey!"]}
        ]"#,
    );
    assert!(matches!(result, Err(BanterError::Corpus(_))));
}

#[test]
fn same_phrase_under_two_intents_fails() {
    // "Hello!" and "hello" collide after normalization
    let result = load(
        r#"[
            {"tag": "greeting", "patterns": ["Hello!"], "responses": ["Hi!"]},
            {"tag": "farewell", "patterns": ["hello"], "responses": ["Bye!"]}
        ]"#,
    );
    assert!(matches!(result, Err(BanterError::Corpus(_))));
}

#[test]
fn repeated_phrase_within_one_intent_is_retained() {
    let corpus = load(
        r#"[
            {"tag": "greeting", "patterns": ["hello", "HELLO!"], "responses": ["Hi!"]}
        ]"#,
    )
    .unwrap();

    // Both occurrences stay in the flat phrase index, owned by one tag
    assert_eq!(corpus.entries().len(), 2);
    assert!(corpus.entries().iter().all(|e| e.tag == "greeting"));
}

#[test]
fn pattern_of_only_punctuation_fails() {
    let result = load(r#"[{"tag": "greeting", "patterns": ["?!?"], "responses": ["Hi!"]}]"#);
    assert!(matches!(result, Err(BanterError::Corpus(_))));
}

#[test]
fn top_level_object_instead_of_array_fails() {
    let result = load(r#"{"tag": "greeting"}"#);
    assert!(matches!(result, Err(BanterError::Json(_))));
}
