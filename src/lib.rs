//! mmd-convert - render Mermaid diagrams from a catalog file
//!
//! Diagrams are read from a YAML or TOML catalog, styled with a theme
//! preset through an `init` directive, and handed to an external renderer
//! (the Mermaid CLI by default) that writes the image.
//!
//! # Example
//!
//! ```rust
//! use mmd_convert::{build_styled_markup, ConversionRequest, Theme};
//!
//! let request = ConversionRequest::new("graph TD; A-->B;").with_theme(Theme::Dark);
//! let markup = build_styled_markup(&request.style_config(), &request.mermaid_code);
//!
//! assert!(markup.starts_with("%%{"));
//! assert!(markup.contains(r#""darkMode": true"#));
//! assert!(markup.ends_with("graph TD; A-->B;\n"));
//! ```

pub mod convert;
pub mod diagram;
pub mod error;
pub mod renderer;
pub mod theme;

pub use convert::{build_styled_markup, convert, ConversionOutcome, ConversionRequest};
pub use diagram::{load_diagram, ConfigFormat, DiagramDefinition, DiagramFile};
pub use error::{ConfigError, ConvertError};
pub use renderer::{MmdcRenderer, RenderInvocation, RenderOutput, Renderer};
pub use theme::{resolve_theme, StyleConfig, StyleOverrides, Theme};

use std::path::Path;

/// Load a diagram from a catalog and convert it in one step
///
/// `settings` supplies output and style options; its `mermaid_code` is
/// replaced by the selected diagram's markup, so it is usually built with
/// [`ConversionRequest::default`]. Returns the diagram's display name
/// alongside the outcome.
pub fn convert_from_config(
    config_path: &Path,
    diagram_name: Option<&str>,
    settings: ConversionRequest,
    renderer: &dyn Renderer,
) -> Result<(String, ConversionOutcome), ConvertError> {
    let diagram = load_diagram(config_path, diagram_name)?;
    log::info!("generating diagram: {}", diagram.name);

    let request = settings.with_code(diagram.code);
    let outcome = convert(&request, renderer)?;
    Ok((diagram.name, outcome))
}
