/*!
 * Unit tests for application configuration loading and validation.
 */

use std::fs::File;
use std::io::BufReader;

use redpen::app_config::{Config, CorrectionProvider, RenderMode};

use crate::common;

#[test]
fn test_partialConfigJson_shouldFillDefaults() {
    let json = r#"{
        "correction": {
            "provider": "mock"
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.correction.provider, CorrectionProvider::Mock);
    assert_eq!(config.correction.common.instruction, "Fix grammar: ");
    assert_eq!(config.correction.common.token_budget, 64);
    assert_eq!(config.correction.common.max_output_tokens, 128);
    assert_eq!(config.correction.common.render_mode, RenderMode::WordStream);
}

#[test]
fn test_configFromFile_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let serialized = serde_json::to_string_pretty(&Config::default()).unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        &serialized,
    )
    .unwrap();

    let reader = BufReader::new(File::open(path).unwrap());
    let loaded: Config = serde_json::from_reader(reader).unwrap();

    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.correction.provider, CorrectionProvider::Ollama);
    assert_eq!(loaded.correction.available_providers.len(), 2);
}

#[test]
fn test_activeProviderConfig_shouldFollowSelectedProvider() {
    let mut config = Config::default();

    config.correction.provider = CorrectionProvider::Mock;
    let block = config.correction.active_provider_config().unwrap();
    assert_eq!(block.provider_type, "mock");

    config.correction.provider = CorrectionProvider::Ollama;
    let block = config.correction.active_provider_config().unwrap();
    assert_eq!(block.provider_type, "ollama");
    assert_eq!(block.model, "grammarly-coedit:latest");
    assert_eq!(block.endpoint, "http://localhost:11434");
}

#[test]
fn test_missingProviderBlock_shouldFailValidation() {
    let mut config = Config::default();
    config.correction.available_providers.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_providerDisplayName_shouldBeCapitalized() {
    assert_eq!(CorrectionProvider::Ollama.display_name(), "Ollama");
    assert_eq!(CorrectionProvider::Mock.display_name(), "Mock");
    assert_eq!(CorrectionProvider::Mock.to_string(), "mock");
}

#[test]
fn test_renderModeInConfigJson_shouldUseKebabCase() {
    let json = r#"{
        "correction": {
            "common": { "render_mode": "offset-preserving" }
        }
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(
        config.correction.common.render_mode,
        RenderMode::OffsetPreserving
    );
}
