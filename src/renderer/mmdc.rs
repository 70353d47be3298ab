//! Subprocess renderer that shells out to the Mermaid CLI

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{RenderInvocation, RenderOutput, Renderer};
use crate::error::ConvertError;

/// Default renderer executable
pub const DEFAULT_PROGRAM: &str = "mmdc";

/// Runs `mmdc` (or a compatible program) and waits for it to exit
#[derive(Debug, Clone)]
pub struct MmdcRenderer {
    program: PathBuf,
}

impl Default for MmdcRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl MmdcRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Renderer for MmdcRenderer {
    fn render(&self, invocation: &RenderInvocation<'_>) -> Result<RenderOutput, ConvertError> {
        let output = Command::new(&self.program)
            .args(invocation.args())
            .output()
            .map_err(|e| ConvertError::invocation(&self.program, e))?;

        Ok(RenderOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn describe(&self, invocation: &RenderInvocation<'_>) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(
            invocation
                .args()
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        );
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation() -> RenderInvocation<'static> {
        RenderInvocation {
            input: Path::new("in.mmd"),
            output: Path::new("output.png"),
            background: "white",
            scale: 6.0,
        }
    }

    #[test]
    fn test_describe() {
        let renderer = MmdcRenderer::default();
        assert_eq!(
            renderer.describe(&invocation()),
            "mmdc -i in.mmd -o output.png -b white -s 6.0"
        );
    }

    #[test]
    fn test_missing_program_is_invocation_error() {
        let renderer = MmdcRenderer::new("definitely-not-a-real-renderer-binary");
        let err = renderer.render(&invocation()).unwrap_err();
        assert!(matches!(err, ConvertError::RendererInvocation { .. }));
    }
}
