/*!
 * Tests for error types and conversions
 */

use redpen::errors::{AppError, ConfigError, CorrectionError, ProviderError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_correctionError_chunkFailed_shouldDisplayChunkIndexAndCause() {
    let error = CorrectionError::ChunkFailed {
        chunk_index: 3,
        source: ProviderError::ConnectionError("Host unreachable".to_string()),
    };
    let display = format!("{}", error);
    assert!(display.contains("chunk 3"));
    assert!(display.contains("Host unreachable"));
}

#[test]
fn test_correctionError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RequestFailed("Test error".to_string());
    let error: CorrectionError = provider_error.into();
    assert!(matches!(error, CorrectionError::Provider(_)));
}

#[test]
fn test_appError_fromConfigError_shouldWrapCorrectly() {
    let config_error = ConfigError::InvalidTokenBudget(0);
    let error: AppError = config_error.into();
    let display = format!("{}", error);
    assert!(matches!(error, AppError::Config(_)));
    assert!(display.contains("Configuration error"));
    assert!(display.contains("token budget"));
}

#[test]
fn test_appError_fromCorrectionError_shouldWrapCorrectly() {
    let correction_error = CorrectionError::ChunkFailed {
        chunk_index: 0,
        source: ProviderError::RequestFailed("boom".to_string()),
    };
    let error: AppError = correction_error.into();
    assert!(matches!(error, AppError::Correction(_)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "essay.txt not found");
    let error: AppError = io_error.into();
    let display = format!("{}", error);
    assert!(matches!(error, AppError::File(_)));
    assert!(display.contains("File error"));
    assert!(display.contains("essay.txt not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(error, AppError::Unknown(_)));
}

#[test]
fn test_appError_input_shouldDisplayCorrectly() {
    let error = AppError::Input("Input essay is empty".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Invalid input"));
    assert!(display.contains("Input essay is empty"));
}
