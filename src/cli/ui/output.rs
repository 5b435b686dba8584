use console::style;

use crate::enrich::SlideEnrichment;
use crate::types::Slide;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    pub fn key_value(&self, key: &str, value: &str) {
        println!("  {:<12} {}", style(key).dim(), value);
    }

    /// One slide with its bullets, notes, image reference and fallbacks
    pub fn slide(&self, number: usize, slide: &Slide, record: Option<&SlideEnrichment>) {
        println!(
            "\n{} {}",
            style(format!("{:>2}.", number)).cyan().bold(),
            style(&slide.title).bold()
        );
        for bullet in &slide.bullets {
            println!("     • {}", bullet);
        }
        if let Some(notes) = &slide.speaker_notes {
            println!("     {} {}", style("notes:").dim(), notes);
        }
        if let Some(prompt) = &slide.image_prompt {
            println!("     {} {}", style("image prompt:").dim(), prompt);
        }
        if let Some(image) = &slide.image_path {
            println!("     {} {}", style("image:").dim(), image);
        }

        let fallbacks = record.map(SlideEnrichment::fallbacks).unwrap_or_default();
        if !fallbacks.is_empty() {
            let reasons = fallbacks
                .iter()
                .map(|(field, reason)| format!("{} ({})", field, reason.category))
                .collect::<Vec<_>>()
                .join(", ");
            println!("     {} {}", style("placeholder:").yellow(), reasons);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
