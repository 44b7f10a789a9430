/*!
 * Unit tests for provider implementations.
 */

use redpen::providers::mock::{MockProvider, MockRequest};
use redpen::providers::ollama::GenerationRequest;
use redpen::providers::Provider;

fn mock_request(text: &str) -> MockRequest {
    MockRequest {
        text: text.to_string(),
        max_output_tokens: 128,
    }
}

#[test]
fn test_generationRequest_shouldSerializeOptionsWhenSet() {
    let request = GenerationRequest::new("grammarly-coedit:latest", "Fix grammar: I has a cat.")
        .temperature(0.0)
        .num_predict(128);

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], "grammarly-coedit:latest");
    assert_eq!(value["prompt"], "Fix grammar: I has a cat.");
    assert_eq!(value["stream"], false);
    assert_eq!(value["options"]["temperature"], 0.0);
    assert_eq!(value["options"]["num_predict"], 128);
}

#[test]
fn test_generationRequest_withoutOptions_shouldOmitThem() {
    let request = GenerationRequest::new("coedit", "Fix grammar: hello");
    let value = serde_json::to_value(&request).unwrap();
    assert!(value.get("options").is_none());
    assert!(value.get("keep_alive").is_none());
}

#[tokio::test]
async fn test_emptyMock_shouldReturnEmptyText() {
    let provider = MockProvider::empty();
    let response = provider.complete(mock_request("anything at all")).await.unwrap();
    assert_eq!(response.text, "");
}

#[tokio::test]
async fn test_slowMock_shouldStillEchoInput() {
    let provider = MockProvider::slow(10);
    let response = provider.complete(mock_request("patience pays off")).await.unwrap();
    assert_eq!(response.text, "patience pays off");
}

#[tokio::test]
async fn test_requestsServed_shouldCountAcrossCalls() {
    let provider = MockProvider::identity();
    assert_eq!(provider.requests_served(), 0);

    provider.complete(mock_request("one")).await.unwrap();
    provider.complete(mock_request("two")).await.unwrap();

    assert_eq!(provider.requests_served(), 2);
}

#[tokio::test]
async fn test_failingMock_testConnection_shouldError() {
    assert!(MockProvider::failing().test_connection().await.is_err());
    assert!(MockProvider::identity().test_connection().await.is_ok());
}
