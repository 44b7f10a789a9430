/*!
 * Integration tests for the full correction and annotation pipeline.
 *
 * Every test runs against a mock provider, so no model server is needed.
 */

use redpen::app_config::RenderMode;
use redpen::errors::CorrectionError;
use redpen::providers::mock::MockProvider;

use crate::common;

#[tokio::test]
async fn test_annotate_singleError_shouldProduceAllThreeViews() {
    let pipeline = common::word_stream_pipeline(MockProvider::canned(&[(
        "I has a cat. It is small.",
        "I have a cat. It is small.",
    )]));

    let essay = pipeline.annotate("I has a cat. It is small.").await.unwrap();

    assert_eq!(essay.corrected_text, "I have a cat. It is small.");

    // Errors view flags the replacement and passes the rest through
    assert!(essay.errors_and_fixes_html.starts_with("I <span"));
    assert!(essay.errors_and_fixes_html.contains("title='Error'>has</span>"));
    assert!(essay.errors_and_fixes_html.contains("title='Fix'>→ have</span>"));
    assert!(essay.errors_and_fixes_html.ends_with("It is small."));

    // Fixed view is one styled paragraph of corrected text
    assert_eq!(essay.fixed_only_html.matches("<p style=").count(), 1);
    assert!(essay.fixed_only_html.contains("I have a cat. It is small."));
}

#[tokio::test]
async fn test_annotate_perfectEssay_shouldFlagNothing() {
    let pipeline = common::word_stream_pipeline(MockProvider::identity());
    let document = "Nothing is wrong here. Everything reads well.";

    let essay = pipeline.annotate(document).await.unwrap();

    assert_eq!(essay.corrected_text, document);
    assert_eq!(essay.errors_and_fixes_html, document);
    assert!(!essay.errors_and_fixes_html.contains("<span"));
}

#[tokio::test]
async fn test_annotate_multiParagraph_shouldPreserveSeparatorsInAllViews() {
    let pipeline = common::word_stream_pipeline(MockProvider::canned(&[
        ("I has a cat.", "I have a cat."),
        ("It are very small.", "It is very small."),
    ]));
    let document = "I has a cat.\n\nIt are very small.";

    let essay = pipeline.annotate(document).await.unwrap();

    assert_eq!(essay.corrected_text, "I have a cat.\n\nIt is very small.");
    assert!(essay.errors_and_fixes_html.contains("\n\n"));
    assert_eq!(essay.fixed_only_html.matches("<p style=").count(), 2);
    assert!(essay.fixed_only_html.contains(">I have a cat.</p>"));
    assert!(essay.fixed_only_html.contains(">It is very small.</p>"));
}

#[tokio::test]
async fn test_annotate_messySeparator_shouldSurviveVerbatimInCorrectedText() {
    let pipeline = common::word_stream_pipeline(MockProvider::identity());
    let document = "One paragraph.\n \t\nAnother paragraph.";

    let essay = pipeline.annotate(document).await.unwrap();

    assert_eq!(essay.corrected_text, document);
}

#[tokio::test]
async fn test_annotate_offsetMode_identity_shouldReproduceDocumentExactly() {
    let pipeline = common::offset_pipeline(MockProvider::identity());
    let document = "Spacing  matters\there. Casing Does Too.\n\nSecond   paragraph.";

    let essay = pipeline.annotate(document).await.unwrap();

    // No flagged spans, so the errors view is the document byte-for-byte
    assert_eq!(essay.errors_and_fixes_html, document);
}

#[tokio::test]
async fn test_annotate_offsetMode_shouldEmitClickableSuggestionSpans() {
    let pipeline = common::offset_pipeline(MockProvider::canned(&[(
        "I  has a cat.",
        "I have a cat.",
    )]));

    let essay = pipeline.annotate("I  has a cat.").await.unwrap();

    // Double space outside the flagged span survives
    assert!(essay.errors_and_fixes_html.starts_with("I  <span"));
    assert!(essay
        .errors_and_fixes_html
        .contains("class=\"error-block\" id=\"suggestion-word-0\""));
    assert!(essay
        .errors_and_fixes_html
        .contains("data-suggestion=\"have\""));
    assert!(essay
        .errors_and_fixes_html
        .contains("onclick=\"showSuggestion(this)\""));
}

#[tokio::test]
async fn test_annotate_offsetMode_spanIdsRunInDocumentOrderAcrossParagraphs() {
    let pipeline = common::offset_pipeline(MockProvider::canned(&[
        ("I has a cat.", "I have a cat."),
        ("She go home.", "She goes home."),
    ]));
    let document = "I has a cat.\n\nShe go home.";

    let essay = pipeline.annotate(document).await.unwrap();

    let first = essay.errors_and_fixes_html.find("suggestion-word-0\"").unwrap();
    let second = essay.errors_and_fixes_html.find("suggestion-word-1\"").unwrap();
    let separator = essay.errors_and_fixes_html.find("\n\n").unwrap();
    assert!(first < separator);
    assert!(separator < second);
}

#[tokio::test]
async fn test_annotate_multiChunk_shouldReassembleInDocumentOrder() {
    // Three one-sentence chunks under a tight budget, corrected through a
    // slow provider so completion order differs from submission order.
    let config = common::mock_config(RenderMode::WordStream, 8);
    let pipeline = common::pipeline_with(MockProvider::slow(15), &config);
    let document = "One two three four. Five six seven eight. Nine ten eleven twelve.";

    let essay = pipeline.annotate(document).await.unwrap();

    assert_eq!(essay.corrected_text, document);
}

#[test]
fn test_annotate_failingProvider_shouldFailWholeDocument() {
    let pipeline = common::word_stream_pipeline(MockProvider::failing());

    let result =
        tokio_test::block_on(async { pipeline.annotate("This will not be corrected.").await });

    assert!(matches!(
        result,
        Err(CorrectionError::ChunkFailed { chunk_index: 0, .. })
    ));
}

#[test]
fn test_annotate_intermittentFailure_shouldStillFailWholeDocument() {
    // Second chunk fails; no partial output may leak out
    let config = common::mock_config(RenderMode::WordStream, 8);
    let pipeline = common::pipeline_with(MockProvider::intermittent(2), &config);
    let document = "One two three four. Five six seven eight. Nine ten eleven twelve.";

    let result = tokio_test::block_on(async { pipeline.annotate(document).await });

    assert!(matches!(result, Err(CorrectionError::ChunkFailed { .. })));
}

#[tokio::test]
async fn test_annotate_blankInput_shouldShortCircuitToEmptyViews() {
    let mock = MockProvider::identity();
    let counter = mock.clone();
    let pipeline = common::word_stream_pipeline(mock);

    for document in ["", "   ", " \n\n \t "] {
        let essay = pipeline.annotate(document).await.unwrap();
        assert_eq!(essay.corrected_text, "");
        assert_eq!(essay.errors_and_fixes_html, "");
        assert_eq!(essay.fixed_only_html, "");
    }

    // No provider call was made for any blank input
    assert_eq!(counter.requests_served(), 0);
}

#[tokio::test]
async fn test_annotate_emptyProviderResponse_shouldFlagEverythingDeleted() {
    let pipeline = common::word_stream_pipeline(MockProvider::empty());

    let essay = pipeline.annotate("All of this vanishes.").await.unwrap();

    assert_eq!(essay.corrected_text, "");
    assert!(essay.errors_and_fixes_html.contains("title='Error'"));
    assert!(!essay.errors_and_fixes_html.contains("title='Fix'"));
    assert_eq!(essay.fixed_only_html, "");
}
