//! deckweave - Outline-to-Presentation Generator
//!
//! Turns free-form text (a topic, a bullet list, or an indented outline)
//! into an ordered slide sequence, enriches every slide with generated
//! bullets, speaker notes and an image reference, and writes the result as
//! a `.pptx` deck with optional PDF export.
//!
//! ## Core Features
//!
//! - **Outline Parsing**: shape classification and indentation-based section extraction
//! - **Per-Field Fallback**: every generated field degrades to placeholder content on failure
//! - **Offline Mode**: full pipeline without any API key
//! - **Themed Decks**: Office Open XML packages in three palettes
//!
//! ## Quick Start
//!
//! ```ignore
//! use deckweave::{DeckPipeline, PipelineSettings, Config};
//!
//! let config = Config::default();
//! let pipeline = DeckPipeline::from_config(&config, PipelineSettings::from_config(&config))?;
//! let generation = pipeline.generate("Machine Learning").await?;
//! println!("{}", generation.artifacts.pptx_path.display());
//! ```
//!
//! ## Modules
//!
//! - [`outline`]: input classification, section extraction, slide builders
//! - [`enrich`]: generated content with placeholder fallback, image acquisition
//! - [`ai`]: LLM provider abstraction, prompts, response parsing, metrics
//! - [`deck`]: themes, `.pptx` writer, PDF export
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod deck;
pub mod enrich;
pub mod outline;
pub mod pipeline;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{DeckError, ErrorCategory, LlmError, Result};

// Data Model
pub use types::{OutlineSection, Slide};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use outline::{InputShape, ParsedOutline, parse_outline};
pub use pipeline::{DeckPipeline, Generation, PipelineSettings, Preview};

// =============================================================================
// Enrichment & Output Re-exports
// =============================================================================

pub use ai::{LlmProvider, LlmResponse, MetricsCollector, SharedMetrics, SharedProvider};
pub use deck::{DeckArtifacts, DeckWriter, PdfExporter, Theme};
pub use enrich::{ContentEnricher, FieldSource, Generated, ImageSource, SlideEnrichment};
