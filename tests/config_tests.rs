use std::path::Path;

use companion_engine::config::{Character, Settings, VectorStoreKind};

#[test]
fn test_defaults_are_valid() {
    let settings = Settings::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.max_memory_entries, 5);
    assert_eq!(settings.temperature, 0.7);
    assert_eq!(settings.vector_store, VectorStoreKind::Local);
}

#[test]
fn test_vector_store_selector() {
    assert_eq!(
        VectorStoreKind::parse("disabled").unwrap(),
        VectorStoreKind::Disabled
    );
    assert_eq!(
        VectorStoreKind::parse("local").unwrap(),
        VectorStoreKind::Local
    );
    assert_eq!(
        VectorStoreKind::parse("remote").unwrap(),
        VectorStoreKind::Remote
    );
    assert!(VectorStoreKind::parse("qdrant").is_err());
    assert!(VectorStoreKind::parse("").is_err());
}

#[test]
fn test_validation_rejects_malformed_base_url() {
    let mut settings = Settings::default();
    settings.base_url = "localhost without scheme".to_string();
    assert!(settings.validate().is_err());
}

#[test]
fn test_validation_rejects_out_of_range_temperature() {
    let mut settings = Settings::default();
    settings.temperature = 2.5;
    assert!(settings.validate().is_err());
    settings.temperature = -0.1;
    assert!(settings.validate().is_err());
}

#[test]
fn test_validation_rejects_bad_sampling_parameters() {
    let mut settings = Settings::default();
    settings.top_p = 0.0;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.max_tokens = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn test_validation_rejects_non_positive_memory_limit() {
    let mut settings = Settings::default();
    settings.max_memory_entries = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn test_validation_rejects_unknown_embedding_model() {
    let mut settings = Settings::default();
    settings.embedding_model = "sentence-transformers/all-MiniLM-L6-v2".to_string();
    assert!(settings.validate().is_err());

    // With the index disabled the embedder is never built, so the
    // identifier is not checked.
    settings.vector_store = VectorStoreKind::Disabled;
    assert!(settings.validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_qdrant_url_only_for_remote() {
    let mut settings = Settings::default();
    settings.qdrant_url = "nonsense".to_string();
    assert!(settings.validate().is_ok());

    settings.vector_store = VectorStoreKind::Remote;
    assert!(settings.validate().is_err());
}

#[test]
fn test_validation_rejects_missing_custom_events_file() {
    let mut settings = Settings::default();
    settings.custom_events_file = Some(Path::new("/nonexistent/events.json").to_path_buf());
    assert!(settings.validate().is_err());
}

#[test]
fn test_validation_rejects_bad_listen_addr() {
    let mut settings = Settings::default();
    settings.listen_addr = "not-an-address".to_string();
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companion.toml");
    std::fs::write(
        &path,
        r#"
model = "qwen2.5-7b-instruct"
temperature = 0.2
vector_store = "disabled"
max_memory_entries = 3
"#,
    )
    .unwrap();

    let settings = Settings::from_toml_file(&path).unwrap();
    assert_eq!(settings.model, "qwen2.5-7b-instruct");
    assert_eq!(settings.temperature, 0.2);
    assert_eq!(settings.vector_store, VectorStoreKind::Disabled);
    assert_eq!(settings.max_memory_entries, 3);
    // Unset fields keep their defaults.
    assert_eq!(settings.max_tokens, 512);
}

#[test]
fn test_settings_from_toml_file_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("companion.toml");
    std::fs::write(&path, "temperature = \"warm\"").unwrap();
    assert!(Settings::from_toml_file(&path).is_err());
}

#[test]
fn test_character_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("luna.json");
    std::fs::write(
        &path,
        r#"{
            "name": "Luna",
            "description": "A thoughtful night owl",
            "traits": {"curious": true, "patience": 0.8},
            "baseline_mood": 0.6,
            "baseline_energy": 0.3
        }"#,
    )
    .unwrap();

    let character = Character::from_json_file(&path).unwrap();
    assert_eq!(character.name, "Luna");
    assert_eq!(character.baseline_mood, 0.6);
    assert_eq!(character.baseline_trust, 0.5);
    assert_eq!(character.baseline_energy, 0.3);
    assert!(character.traits.contains_key("curious"));
}

#[test]
fn test_character_missing_file() {
    assert!(Character::from_json_file(Path::new("/nonexistent/char.json")).is_err());
}
