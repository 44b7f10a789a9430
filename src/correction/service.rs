/*!
 * Correction service wrapping the model provider.
 *
 * The service is the single handle the pipeline holds on the external
 * correction capability. It is constructed once at startup from the
 * configuration and passed by reference into the pipeline, so there is no
 * process-wide model state and tests can inject a mock.
 */

use log::debug;

use crate::app_config::{CorrectionConfig, CorrectionProvider};
use crate::errors::{ConfigError, ProviderError};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::Provider;

/// The provider backend the service dispatches to
#[derive(Debug, Clone)]
enum CorrectorClient {
    Ollama(std::sync::Arc<Ollama>),
    Mock(MockProvider),
}

/// Service handle for the text-to-text grammar-correction model
#[derive(Debug, Clone)]
pub struct CorrectionService {
    /// Active provider client
    client: CorrectorClient,
    /// Model name passed to the provider
    model: String,
    /// Instruction prefix prepended to each chunk
    instruction: String,
    /// Maximum number of concurrent correction requests
    concurrent_requests: usize,
}

impl CorrectionService {
    /// Create a correction service from configuration.
    ///
    /// Fails fast if the active provider has no configuration block.
    pub fn new(config: &CorrectionConfig) -> Result<Self, ConfigError> {
        let provider_config = config
            .active_provider_config()
            .ok_or_else(|| ConfigError::UnknownProvider(config.provider.to_lowercase_string()))?;

        let client = match config.provider {
            CorrectionProvider::Ollama => CorrectorClient::Ollama(std::sync::Arc::new(
                Ollama::new_with_config(
                    provider_config.endpoint.clone(),
                    provider_config.retry_count,
                    provider_config.retry_backoff_ms,
                    provider_config.timeout_secs,
                ),
            )),
            CorrectionProvider::Mock => CorrectorClient::Mock(MockProvider::identity()),
        };

        Ok(Self {
            client,
            model: provider_config.model.clone(),
            instruction: config.common.instruction.clone(),
            concurrent_requests: provider_config.concurrent_requests,
        })
    }

    /// Create a service backed by a specific mock provider (test seam)
    pub fn with_mock(provider: MockProvider) -> Self {
        Self {
            client: CorrectorClient::Mock(provider),
            model: "mock".to_string(),
            instruction: "Fix grammar: ".to_string(),
            concurrent_requests: 4,
        }
    }

    /// Maximum number of correction requests the pipeline may keep in flight
    pub fn concurrent_requests(&self) -> usize {
        self.concurrent_requests.max(1)
    }

    /// Correct one chunk of text.
    ///
    /// `max_output_tokens` is a soft cap the provider may use to truncate
    /// generation; the collaborator may also re-normalize whitespace. No
    /// latency bound is assumed here - the provider client owns the timeout.
    pub async fn correct(
        &self,
        text: &str,
        max_output_tokens: usize,
    ) -> Result<String, ProviderError> {
        debug!("Correcting chunk of {} bytes", text.len());

        match &self.client {
            CorrectorClient::Ollama(ollama) => {
                let request = GenerationRequest::new(
                    self.model.clone(),
                    format!("{}{}", self.instruction, text),
                )
                .temperature(0.0)
                .num_predict(max_output_tokens as u32);

                let response = ollama.complete(request).await?;
                Ok(Ollama::extract_text(&response).trim().to_string())
            }
            CorrectorClient::Mock(mock) => {
                let request = MockRequest {
                    text: text.to_string(),
                    max_output_tokens,
                };
                let response = mock.complete(request).await?;
                Ok(MockProvider::extract_text(&response).trim().to_string())
            }
        }
    }

    /// Test the connection to the active provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.client {
            CorrectorClient::Ollama(ollama) => ollama.test_connection().await,
            CorrectorClient::Mock(mock) => mock.test_connection().await,
        }
    }
}
