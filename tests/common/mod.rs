/*!
 * Common test utilities for the redpen test suite
 */

use std::path::PathBuf;
use std::fs;
use std::sync::Arc;
use anyhow::Result;
use tempfile::TempDir;

use redpen::app_config::{Config, CorrectionProvider, RenderMode};
use redpen::correction::{AnnotationPipeline, CorrectionService, HeuristicTokenizer};
use redpen::providers::mock::MockProvider;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Build a config using the mock provider with the given render mode and
/// token budget
pub fn mock_config(render_mode: RenderMode, token_budget: usize) -> Config {
    let mut config = Config::default();
    config.correction.provider = CorrectionProvider::Mock;
    config.correction.common.render_mode = render_mode;
    config.correction.common.token_budget = token_budget;
    config
}

/// Build a pipeline backed by the given mock provider
pub fn pipeline_with(mock: MockProvider, config: &Config) -> AnnotationPipeline {
    let service = CorrectionService::with_mock(mock);
    AnnotationPipeline::new(config, service, Arc::new(HeuristicTokenizer::new()))
        .expect("pipeline construction from a valid test config")
}

/// Shorthand for a word-stream pipeline with the default token budget
pub fn word_stream_pipeline(mock: MockProvider) -> AnnotationPipeline {
    pipeline_with(mock, &mock_config(RenderMode::WordStream, 64))
}

/// Shorthand for an offset-preserving pipeline with the default token budget
pub fn offset_pipeline(mock: MockProvider) -> AnnotationPipeline {
    pipeline_with(mock, &mock_config(RenderMode::OffsetPreserving, 64))
}
