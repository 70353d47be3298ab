//! External renderer interface
//!
//! The driver hands a markup file to a [`Renderer`], which is expected to
//! write an image to the output path. Whether it did is checked by the
//! caller afterwards; the renderer only reports what the process printed.

pub mod mmdc;

use std::ffi::OsString;
use std::path::Path;

use crate::error::ConvertError;

pub use mmdc::MmdcRenderer;

/// Arguments for one renderer run
#[derive(Debug, Clone, Copy)]
pub struct RenderInvocation<'a> {
    /// Styled markup file
    pub input: &'a Path,
    /// Image destination
    pub output: &'a Path,
    /// Background color passed through as-is
    pub background: &'a str,
    pub scale: f64,
}

impl RenderInvocation<'_> {
    /// Command-line arguments: `-i <input> -o <output> -b <background> -s <scale>`
    pub fn args(&self) -> Vec<OsString> {
        vec![
            "-i".into(),
            self.input.into(),
            "-o".into(),
            self.output.into(),
            "-b".into(),
            self.background.into(),
            "-s".into(),
            format_scale(self.scale).into(),
        ]
    }
}

/// What the renderer process reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Exit code, `None` if terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RenderOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Something that turns a markup file into an image file
pub trait Renderer {
    /// Run to completion. Errors only when the renderer could not be started;
    /// a run that produced nothing is still `Ok`.
    fn render(&self, invocation: &RenderInvocation<'_>) -> Result<RenderOutput, ConvertError>;

    /// Display form of the command, for logging
    fn describe(&self, invocation: &RenderInvocation<'_>) -> String;
}

/// Format a scale factor the way a float literal prints (`6.0`, `2.5`)
pub fn format_scale(scale: f64) -> String {
    if scale.is_finite() && scale.fract() == 0.0 {
        format!("{scale:.1}")
    } else {
        scale.to_string()
    }
}
