/*!
 * Unit tests for document segmentation and token-budget chunking.
 */

use redpen::correction::chunker::{chunk_paragraph, Chunk};
use redpen::correction::segmenter::{split_document, Segment, SentenceSplitter};
use redpen::correction::{HeuristicTokenizer, Tokenizer};

fn chunk_with_budget(paragraph: &str, offset: usize, budget: usize) -> Vec<Chunk> {
    chunk_paragraph(
        paragraph,
        offset,
        &SentenceSplitter::new(),
        &HeuristicTokenizer::new(),
        budget,
    )
}

#[test]
fn test_chunkOffsets_shouldBeDocumentAbsolute() {
    let document = "First paragraph here.\n\nOne two three four. Five six seven eight.";
    let segments = split_document(document);

    let Segment::Paragraph { text, offset } = &segments[2] else {
        panic!("Expected third segment to be a paragraph");
    };

    let chunks = chunk_with_budget(text, *offset, 8);
    assert_eq!(chunks.len(), 2);
    for chunk in &chunks {
        // Offsets index into the whole document, not the paragraph
        assert_eq!(&document[chunk.offset..chunk.end_offset()], chunk.text);
    }
}

#[test]
fn test_chunking_essayLikeParagraph_shouldRespectBudget() {
    let paragraph = "In many countries, people is moving to cities for work. \
                     This trend have both advantages and disadvantages. \
                     On one hand, cities offers more job opportunities. \
                     On the other hand, the cost of living are much higher. \
                     In my opinion, the benefits outweighs the drawbacks.";
    let tokenizer = HeuristicTokenizer::new();
    let budget = 24;

    let chunks = chunk_with_budget(paragraph, 0, budget);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(tokenizer.count(&chunk.text) <= budget);
    }
    // Together the chunks cover every sentence in order
    let rejoined = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rejoined, paragraph);
}

#[test]
fn test_chunking_multibyteText_shouldSliceOnCharBoundaries() {
    let paragraph = "Café au lait is über nice. Ça va très bien aujourd'hui. Déjà vu again.";
    let chunks = chunk_with_budget(paragraph, 0, 8);

    assert!(!chunks.is_empty());
    for chunk in &chunks {
        // A mid-char slice would have panicked inside the chunker already;
        // double-check the text matches the offsets it claims.
        assert_eq!(&paragraph[chunk.offset..chunk.end_offset()], chunk.text);
    }
}

#[test]
fn test_sentenceSplitter_decimalNumber_isKnownToMisSplit() {
    // Heuristic limitation: "3. 5" style spacing splits, "3.5" does not
    let splitter = SentenceSplitter::new();
    assert_eq!(splitter.split("The score was 3.5 overall.").len(), 1);
}
