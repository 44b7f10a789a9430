/*!
 * Grammar correction and annotation engine.
 *
 * This module contains the core pipeline for correcting a document and
 * rendering the annotated views. It is split into several submodules:
 *
 * - `segmenter`: Document splitting into paragraphs and separators, plus the
 *   sentence boundary heuristic
 * - `tokenizer`: Token counting abstraction for chunk budgeting
 * - `chunker`: Greedy sentence packing under the token budget
 * - `service`: Handle on the external correction model
 * - `align`: Word-level diff between original and corrected text
 * - `annotate`: Rendering of aligned spans into the output views
 * - `pipeline`: End-to-end orchestration
 */

// Re-export main types for easier usage
pub use self::align::{AlignKind, AlignmentOp};
pub use self::chunker::Chunk;
pub use self::pipeline::{AnnotationPipeline, CorrectedEssay};
pub use self::segmenter::Segment;
pub use self::service::CorrectionService;
pub use self::tokenizer::{HeuristicTokenizer, Tokenizer};

// Submodules
pub mod align;
pub mod annotate;
pub mod chunker;
pub mod pipeline;
pub mod segmenter;
pub mod service;
pub mod tokenizer;
