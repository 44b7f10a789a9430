/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock correctors that simulate different behaviors:
 * - `MockProvider::identity()` - Returns the input text unchanged
 * - `MockProvider::canned(..)` - Returns scripted corrections per input
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The chunk text to correct
    pub text: String,
    /// Soft cap on output length, in tokens
    pub max_output_tokens: usize,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The corrected text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the input text unchanged (a perfect essay)
    Identity,
    /// Returns a scripted correction for known inputs, identity otherwise
    Canned,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider standing in for the grammar-correction model
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Scripted corrections for `MockBehavior::Canned`
    corrections: HashMap<String, String>,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            corrections: HashMap::new(),
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that echoes the input back unchanged
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Create a mock with scripted corrections; unknown inputs echo back
    pub fn canned(corrections: &[(&str, &str)]) -> Self {
        let mut provider = Self::new(MockBehavior::Canned);
        for (original, corrected) in corrections {
            provider
                .corrections
                .insert((*original).to_string(), (*corrected).to_string());
        }
        provider
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that delays each response
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of requests this mock has served
    pub fn requests_served(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            corrections: self.corrections.clone(),
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Identity => Ok(MockResponse { text: request.text }),

            MockBehavior::Canned => {
                let text = self
                    .corrections
                    .get(&request.text)
                    .cloned()
                    .unwrap_or(request.text);
                Ok(MockResponse { text })
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(MockResponse { text: request.text })
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Empty => Ok(MockResponse {
                text: String::new(),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(MockResponse { text: request.text })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
