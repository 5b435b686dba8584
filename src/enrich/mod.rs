//! Slide enrichment: generated bullets, speaker notes, image prompts and
//! image references, each with a deterministic placeholder fallback.

pub mod content;
pub mod image;
pub mod outcome;
pub mod placeholder;

pub use content::{ContentEnricher, EnrichmentOptions};
pub use image::{
    ImageAcquirer, ImageSource, OpenAiImageSettings, OpenAiImageSource, SharedImageSource,
    enhance_prompt, image_filename,
};
pub use outcome::{FieldSource, Generated, SlideEnrichment};
