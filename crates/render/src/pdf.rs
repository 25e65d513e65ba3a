//! HTML-to-PDF conversion via an external `wkhtmltopdf` binary.
//!
//! The converter is best-effort: when the binary is missing or conversion
//! fails, callers get the HTML back and ship that instead. Slide pages print
//! landscape with no margins, so the page percentages map edge to edge.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("conversion error: {0}")]
    Conversion(String),
    #[error("conversion timed out after {0:?}")]
    Timeout(Duration),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output of a conversion attempt: a PDF when the toolchain cooperated,
/// otherwise the HTML that was meant to be converted.
pub enum RenderedDoc {
    Pdf(Vec<u8>),
    Html(String),
}

impl RenderedDoc {
    pub fn is_pdf(&self) -> bool {
        matches!(self, RenderedDoc::Pdf(_))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            RenderedDoc::Pdf(_) => "pdf",
            RenderedDoc::Html(_) => "html",
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            RenderedDoc::Pdf(bytes) => bytes,
            RenderedDoc::Html(html) => html.as_bytes(),
        }
    }
}

/// PDF converter configuration.
pub struct PdfConverter {
    wkhtmltopdf_path: Option<String>,
    timeout: Duration,
}

impl PdfConverter {
    /// Look up `wkhtmltopdf` on PATH. Conversion degrades to HTML passthrough
    /// when it is absent.
    pub fn discover(timeout_secs: u64) -> Self {
        let wkhtmltopdf_path =
            which::which("wkhtmltopdf").ok().map(|p| p.to_string_lossy().to_string());

        match &wkhtmltopdf_path {
            Some(path) => info!(path = %path, "wkhtmltopdf found"),
            None => warn!("wkhtmltopdf not found in PATH - output will stay HTML"),
        }

        Self { wkhtmltopdf_path, timeout: Duration::from_secs(timeout_secs.max(1)) }
    }

    /// Convert HTML to PDF, falling back to the HTML itself when the binary
    /// is missing or the conversion fails.
    pub async fn convert(&self, html: &str) -> Result<RenderedDoc, PdfError> {
        if let Some(wkhtmltopdf) = self.wkhtmltopdf_path.clone() {
            match self.convert_html_to_pdf(html, &wkhtmltopdf).await {
                Ok(pdf_bytes) => Ok(RenderedDoc::Pdf(pdf_bytes)),
                Err(e) => {
                    warn!(error = %e, "PDF conversion failed, falling back to HTML");
                    Ok(RenderedDoc::Html(html.to_owned()))
                }
            }
        } else {
            Ok(RenderedDoc::Html(html.to_owned()))
        }
    }

    async fn convert_html_to_pdf(
        &self,
        html: &str,
        wkhtmltopdf_path: &str,
    ) -> Result<Vec<u8>, PdfError> {
        let temp_dir = std::env::temp_dir();
        let html_path = temp_dir.join(format!("deck_{}.html", uuid::Uuid::new_v4()));
        let pdf_path = temp_dir.join(format!("deck_{}.pdf", uuid::Uuid::new_v4()));

        tokio::fs::write(&html_path, html).await?;

        let command_future = Command::new(wkhtmltopdf_path)
            .arg("--page-size")
            .arg("A4")
            .arg("--orientation")
            .arg("Landscape")
            .arg("--margin-top")
            .arg("0mm")
            .arg("--margin-bottom")
            .arg("0mm")
            .arg("--margin-left")
            .arg("0mm")
            .arg("--margin-right")
            .arg("0mm")
            .arg("--encoding")
            .arg("utf-8")
            .arg("--enable-local-file-access")
            .arg(&html_path)
            .arg(&pdf_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        let output = match tokio::time::timeout(self.timeout, command_future).await {
            Ok(result) => result?,
            Err(_) => {
                let _ = tokio::fs::remove_file(&html_path).await;
                let _ = tokio::fs::remove_file(&pdf_path).await;
                return Err(PdfError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(stderr = %stderr, "wkhtmltopdf failed");
            let _ = tokio::fs::remove_file(&html_path).await;
            return Err(PdfError::Conversion(stderr.to_string()));
        }

        let pdf_bytes = tokio::fs::read(&pdf_path).await?;

        let _ = tokio::fs::remove_file(&html_path).await;
        let _ = tokio::fs::remove_file(&pdf_path).await;

        info!(size = pdf_bytes.len(), "PDF generated successfully");

        Ok(pdf_bytes)
    }
}

/// Check if wkhtmltopdf is available.
pub fn is_wkhtmltopdf_available() -> bool {
    which::which("wkhtmltopdf").is_ok()
}
