//! External HTML-to-PDF conversion.
//!
//! Stage 3 of the build pipeline, and deliberately thin: inkweek does not
//! rasterize PDFs itself. The rendered page set is handed to whatever
//! converter the config names (a headless Chromium by default), treated as
//! a black-box request/response collaborator. A conversion failure never
//! touches the HTML already on disk.
//!
//! The [`PdfConverter`] trait is the seam: the CLI uses
//! [`CommandConverter`], tests substitute their own.

use crate::config::ConverterConfig;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("no converter command configured (set [converter] command in planner.toml)")]
    NoCommand,
    #[error("failed to launch converter {program:?}: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
    #[error("converter exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Turns a rendered page into a PDF file.
pub trait PdfConverter {
    /// Convert `index_html` into `output_pdf`.
    fn convert(&self, index_html: &Path, output_pdf: &Path) -> Result<(), PdfError>;
}

/// Subprocess-backed converter.
///
/// Runs the configured argv with `--print-to-pdf=<output>` and the page
/// path appended — the calling convention of Chromium-family browsers,
/// which handle internal page links and the planner's cross-page anchors.
pub struct CommandConverter {
    command: Vec<String>,
}

impl CommandConverter {
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self {
            command: config.command.clone(),
        }
    }
}

impl PdfConverter for CommandConverter {
    fn convert(&self, index_html: &Path, output_pdf: &Path) -> Result<(), PdfError> {
        let (program, args) = self.command.split_first().ok_or(PdfError::NoCommand)?;
        let output = Command::new(program)
            .args(args)
            .arg(format!("--print-to-pdf={}", output_pdf.display()))
            .arg(index_html)
            .output()
            .map_err(|source| PdfError::Launch {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PdfError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
