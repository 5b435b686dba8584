//! Classify Command
//!
//! Print the detected input shape and the slide titles it would produce.

use std::path::Path;

use crate::cli::util::read_input;
use crate::outline::parse_outline;
use crate::types::Result;

pub fn run(text: Option<String>, input: Option<&Path>, verbose: bool) -> Result<()> {
    let text = read_input(text, input)?;
    let outline = parse_outline(&text);

    println!("{}", outline.shape);
    if verbose {
        for (index, slide) in outline.slides.iter().enumerate() {
            println!("  {:>2}. {}", index + 1, slide.title);
        }
    }
    Ok(())
}
