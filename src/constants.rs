//! Global Constants
//!
//! Centralized constants for outline parsing, enrichment and deck output.
//! All magic numbers should be defined here with documentation.

/// Outline classification and extraction constants
pub mod outline {
    /// Lines indented by at most this many columns start a new section
    pub const SECTION_INDENT_THRESHOLD: usize = 2;

    /// Inputs with at most this many lines may be a simple topic
    pub const MAX_TOPIC_LINES: usize = 2;

    /// Fraction of bullet-marked lines needed for a bulleted list (7/10),
    /// kept as integers so the 70% boundary compares exactly
    pub const BULLET_RATIO_NUMERATOR: usize = 7;
    pub const BULLET_RATIO_DENOMINATOR: usize = 10;

    /// Leading characters recognized as bullet markers
    pub const BULLET_MARKERS: [char; 3] = ['*', '-', '•'];
}

/// Enrichment constants
pub mod enrichment {
    /// Maximum bullets kept from a generated response
    pub const MAX_BULLETS: usize = 5;

    /// Bullets passed as context when generating an image prompt
    pub const IMAGE_PROMPT_CONTEXT_BULLETS: usize = 3;

    /// Generation token limits per call kind
    pub const BULLETS_MAX_TOKENS: usize = 300;
    pub const NOTES_MAX_TOKENS: usize = 200;
    pub const IMAGE_PROMPT_MAX_TOKENS: usize = 100;
}

/// Image acquisition constants
pub mod images {
    /// Placeholder image service base URL
    pub const PLACEHOLDER_BASE: &str = "https://via.placeholder.com";

    /// Placeholder geometry and colors (WxH/background/foreground)
    pub const PLACEHOLDER_SPEC: &str = "800x450/4A90E2/FFFFFF";

    /// Characters of the title carried into the placeholder text
    pub const PLACEHOLDER_TITLE_CHARS: usize = 20;

    /// Maximum length of the sanitized title in image filenames
    pub const MAX_FILENAME_TITLE_CHARS: usize = 50;

    /// Hex characters of the title hash appended to filenames
    pub const FILENAME_HASH_CHARS: usize = 8;

    /// Image generation model and output size
    pub const DEFAULT_MODEL: &str = "dall-e-3";
    pub const DEFAULT_SIZE: &str = "1024x1024";

    /// Subdirectory of the output directory that holds downloaded images
    pub const IMAGE_SUBDIR: &str = "images";
}

/// Deck layout constants (EMU: 914400 per inch, 12700 per point)
pub mod deck {
    pub const EMU_PER_INCH: i64 = 914_400;

    /// Slide width (10 inches)
    pub const SLIDE_WIDTH_EMU: i64 = 10 * EMU_PER_INCH;

    /// Slide height (7.5 inches)
    pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// Font sizes in hundredths of a point
    pub const TITLE_SLIDE_TITLE_SIZE: u32 = 5400;
    pub const SUBTITLE_SIZE: u32 = 2000;
    pub const CONTENT_TITLE_SIZE: u32 = 3600;
    pub const BULLET_SIZE: u32 = 2000;

    /// Space before each bullet paragraph in hundredths of a point
    pub const BULLET_SPACE_BEFORE: u32 = 1200;

    /// Bullets joined into the title slide subtitle
    pub const SUBTITLE_BULLETS: usize = 3;
}

/// Output constants
pub mod output {
    /// Default directory for generated decks
    pub const DEFAULT_DIR: &str = "output";
}

/// Export constants
pub mod export {
    /// External converter binary used for PDF export
    pub const PDF_CONVERTER: &str = "soffice";

    /// Maximum time allowed for PDF conversion (seconds)
    pub const PDF_TIMEOUT_SECS: u64 = 30;
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Image download timeout (seconds)
    pub const IMAGE_DOWNLOAD_TIMEOUT_SECS: u64 = 120;
}
