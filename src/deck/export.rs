//! PDF conversion through an external office suite.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::ai::with_timeout_map;
use crate::constants::export::{PDF_CONVERTER, PDF_TIMEOUT_SECS};

/// Converts `.pptx` files to PDF with `soffice --headless`.
///
/// Conversion is best effort: every failure is logged and reported as
/// `None`, never as an error.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    converter: String,
    timeout: Duration,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(PDF_CONVERTER, Duration::from_secs(PDF_TIMEOUT_SECS))
    }
}

impl PdfExporter {
    pub fn new(converter: impl Into<String>, timeout: Duration) -> Self {
        Self {
            converter: converter.into(),
            timeout,
        }
    }

    /// Convert `pptx` into a PDF next to it
    pub async fn export(&self, pptx: &Path) -> Option<PathBuf> {
        let out_dir = pptx.parent().unwrap_or_else(|| Path::new("."));
        let pdf_path = pptx.with_extension("pdf");

        let mut cmd = Command::new(&self.converter);
        cmd.arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(pptx)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(converter = %self.converter, input = %pptx.display(), "Starting PDF conversion");

        let output = match with_timeout_map(self.timeout, cmd.output(), "PDF conversion").await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(converter = %self.converter, error = %e, "PDF converter could not be started");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "PDF conversion timed out");
                return None;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "PDF conversion failed");
            return None;
        }

        if !pdf_path.exists() {
            warn!(expected = %pdf_path.display(), "PDF converter exited cleanly but produced no file");
            return None;
        }

        info!(path = %pdf_path.display(), "PDF exported");
        Some(pdf_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pptx_in(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("deck.pptx");
        std::fs::write(&path, b"not really a deck").unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_converter_returns_none() {
        let dir = TempDir::new().unwrap();
        let exporter = PdfExporter::new("deckweave-no-such-converter", Duration::from_secs(5));
        assert!(exporter.export(&pptx_in(&dir)).await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_converter_returns_none() {
        let dir = TempDir::new().unwrap();
        let exporter = PdfExporter::new("false", Duration::from_secs(5));
        assert!(exporter.export(&pptx_in(&dir)).await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clean_exit_without_pdf_returns_none() {
        let dir = TempDir::new().unwrap();
        let exporter = PdfExporter::new("true", Duration::from_secs(5));
        assert!(exporter.export(&pptx_in(&dir)).await.is_none());
    }

    #[test]
    fn test_default_converter() {
        let exporter = PdfExporter::default();
        assert_eq!(exporter.converter, "soffice");
        assert_eq!(exporter.timeout, Duration::from_secs(30));
    }
}
