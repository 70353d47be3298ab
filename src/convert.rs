//! Single-shot conversion from Mermaid markup to an image file

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::renderer::{RenderInvocation, Renderer};
use crate::theme::{resolve_theme, StyleConfig, StyleOverrides, Theme, DEFAULT_TEXT_COLOR};

pub const DEFAULT_OUTPUT_PATH: &str = "output.png";
pub const DEFAULT_SCALE: f64 = 6.0;
pub const DEFAULT_BACKGROUND: &str = "white";

/// Everything needed for one conversion
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Raw Mermaid markup
    pub mermaid_code: String,
    /// Image destination
    pub output_path: PathBuf,
    /// Renderer scale factor
    pub scale: f64,
    pub background_color: String,
    pub theme: Theme,
    /// Font and stroke overrides merged into the theme variables
    pub style: StyleOverrides,
    /// Fallback color for themes without a fixed palette
    pub text_color: String,
}

impl ConversionRequest {
    /// Create a request with default styling
    pub fn new(mermaid_code: impl Into<String>) -> Self {
        Self {
            mermaid_code: mermaid_code.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            scale: DEFAULT_SCALE,
            background_color: DEFAULT_BACKGROUND.to_string(),
            theme: Theme::Default,
            style: StyleOverrides::default(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }

    /// Replace the markup, keeping output and style settings
    pub fn with_code(mut self, mermaid_code: impl Into<String>) -> Self {
        self.mermaid_code = mermaid_code.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_style(mut self, style: StyleOverrides) -> Self {
        self.style = style;
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    /// Resolve the theme and merge the style overrides
    pub fn style_config(&self) -> StyleConfig {
        resolve_theme(&self.theme, &self.text_color).with_overrides(&self.style)
    }
}

/// Default settings with no markup; fill it with [`ConversionRequest::with_code`]
/// or pass it to [`crate::convert_from_config`], which supplies the markup
impl Default for ConversionRequest {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Result of a conversion that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The renderer wrote the output file
    Generated { path: PathBuf, bytes: u64 },
    /// The renderer exited without producing the output file
    Missing { path: PathBuf },
}

impl ConversionOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, ConversionOutcome::Generated { .. })
    }
}

/// Prefix markup with an `init` directive carrying the style config
pub fn build_styled_markup(style: &StyleConfig, code: &str) -> String {
    // Serializing a string-keyed map of JSON values cannot fail
    let init = serde_json::to_string_pretty(style).unwrap_or_default();
    format!("%%{{\n  init: {init}\n}}%%\n{}\n", code.trim())
}

/// Render `request` through `renderer`
///
/// The styled markup goes to a uniquely named `.mmd` temporary file that is
/// removed on every return path. A renderer that runs but leaves no output
/// file is reported as [`ConversionOutcome::Missing`], not as an error.
pub fn convert(
    request: &ConversionRequest,
    renderer: &dyn Renderer,
) -> Result<ConversionOutcome, ConvertError> {
    let style = request.style_config();
    let markup = build_styled_markup(&style, &request.mermaid_code);

    let output_path = request.output_path.as_path();
    ensure_parent_dir(output_path)?;

    let temp = write_temp_markup(&markup)?;
    log::info!("temporary markup file: {}", temp.display());
    log::debug!("styled markup:\n{markup}");

    let invocation = RenderInvocation {
        input: &temp,
        output: output_path,
        background: &request.background_color,
        scale: request.scale,
    };
    log::info!("running: {}", renderer.describe(&invocation));

    // `temp` is dropped (and deleted) if this returns early
    let result = renderer.render(&invocation)?;

    if !result.stdout.trim().is_empty() {
        log::debug!("renderer stdout: {}", result.stdout.trim_end());
    }
    if !result.stderr.trim().is_empty() {
        log::warn!("renderer stderr: {}", result.stderr.trim_end());
    }
    if !result.success() {
        log::warn!("renderer exited with status {:?}", result.status);
    }

    let outcome = match std::fs::metadata(output_path) {
        Ok(meta) => {
            log::info!(
                "image saved to {} ({} bytes)",
                output_path.display(),
                meta.len()
            );
            ConversionOutcome::Generated {
                path: output_path.to_path_buf(),
                bytes: meta.len(),
            }
        }
        Err(_) => {
            log::warn!("image was not generated: {}", output_path.display());
            ConversionOutcome::Missing {
                path: output_path.to_path_buf(),
            }
        }
    };

    if let Err(e) = temp.close() {
        log::warn!("failed to remove temporary markup file: {e}");
    }

    Ok(outcome)
}

fn ensure_parent_dir(output_path: &Path) -> Result<(), ConvertError> {
    match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            std::fs::create_dir_all(dir).map_err(|e| {
                ConvertError::io(
                    format!("failed to create output directory '{}'", dir.display()),
                    e,
                )
            })?;
            log::debug!("created output directory {}", dir.display());
            Ok(())
        }
        _ => Ok(()),
    }
}

fn write_temp_markup(markup: &str) -> Result<tempfile::TempPath, ConvertError> {
    let mut file = tempfile::Builder::new()
        .prefix("mermaid-")
        .suffix(".mmd")
        .tempfile()
        .map_err(|e| ConvertError::io("failed to create temporary markup file", e))?;
    file.write_all(markup.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| ConvertError::io("failed to write temporary markup file", e))?;
    // Close the handle so the renderer sees a finished file; the path still
    // deletes itself on drop.
    Ok(file.into_temp_path())
}
