/*!
 * # redpen - AI grammar correction and annotation
 *
 * A Rust library for correcting essay text with a grammar model and
 * rendering annotated views of the corrections.
 *
 * ## Features
 *
 * - Split documents into paragraph-preserving, sentence-bounded chunks
 *   within a model token budget
 * - Correct each chunk through an LLM provider (Ollama, or a mock double)
 * - Word-level alignment between original and corrected text
 * - Three rendered views: errors-and-fixes HTML, fixed-only HTML, plain
 *   corrected text
 * - Offset-preserving rendering that keeps original whitespace and casing
 *   outside flagged spans
 * - IELTS band-score reconciliation for the surrounding evaluation system
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `correction`: The correction and annotation engine:
 *   - `correction::segmenter`: Document and sentence splitting
 *   - `correction::chunker`: Token-budget chunk packing
 *   - `correction::align`: Word-level diffing
 *   - `correction::annotate`: Output rendering
 *   - `correction::pipeline`: End-to-end orchestration
 * - `providers`: Client implementations for model backends:
 *   - `providers::ollama`: Ollama API client
 *   - `providers::mock`: Test double
 * - `scoring`: IELTS band-score reconciliation
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod correction;
pub mod errors;
pub mod providers;
pub mod scoring;

// Re-export main types for easier usage
pub use app_config::{Config, RenderMode};
pub use correction::{AnnotationPipeline, CorrectedEssay, CorrectionService, HeuristicTokenizer};
pub use errors::{AppError, ConfigError, CorrectionError, ProviderError};
pub use scoring::{round_band, reconcile_scores, ScoreSummary};
