//! mmd-convert CLI
//!
//! Usage:
//!   mmd-convert [OPTIONS]
//!
//! Options:
//!   --config <FILE>     Diagram catalog (YAML, or TOML by extension) [default: config.yaml]
//!   --diagram <NAME>    Diagram to render (first in the catalog if omitted)
//!   --output <FILE>     Output image path [default: output.png]
//!   --theme <THEME>     default | forest | dark | neutral
//!   --list              List the catalog's diagrams and exit
//!   -h, --help          Print help

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::Parser;

use mmd_convert::convert::{DEFAULT_BACKGROUND, DEFAULT_OUTPUT_PATH, DEFAULT_SCALE};
use mmd_convert::renderer::mmdc::DEFAULT_PROGRAM;
use mmd_convert::theme::{
    DEFAULT_ARROW_WIDTH, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_LINE_WIDTH,
    DEFAULT_PADDING, DEFAULT_TEXT_COLOR,
};
use mmd_convert::{
    convert_from_config, ConversionOutcome, ConversionRequest, DiagramFile, MmdcRenderer,
    Renderer, StyleOverrides, Theme,
};

#[derive(Parser)]
#[command(name = "mmd-convert")]
#[command(about = "Render Mermaid diagrams from a catalog file to images")]
struct Cli {
    /// Diagram catalog file (YAML, or TOML when the extension is .toml)
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Diagram to render; the first one in the catalog if omitted
    #[arg(long)]
    diagram: Option<String>,

    /// Output image path
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Renderer scale factor
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f64,

    /// Background color
    #[arg(long = "bg-color", default_value = DEFAULT_BACKGROUND)]
    bg_color: String,

    /// Theme preset
    #[arg(long, default_value = "default", value_parser = PossibleValuesParser::new(Theme::NAMES))]
    theme: String,

    /// Font size
    #[arg(long, default_value = DEFAULT_FONT_SIZE)]
    font_size: String,

    /// Font family
    #[arg(long, default_value = DEFAULT_FONT_FAMILY)]
    font_family: String,

    /// Line width
    #[arg(long, default_value = DEFAULT_LINE_WIDTH)]
    line_width: String,

    /// Arrow width
    #[arg(long, default_value = DEFAULT_ARROW_WIDTH)]
    arrow_width: String,

    /// Padding
    #[arg(long, default_value = DEFAULT_PADDING)]
    padding: String,

    /// Text color for themes without a fixed palette
    #[arg(long, default_value = DEFAULT_TEXT_COLOR)]
    text_color: String,

    /// Renderer executable
    #[arg(long, env = "MMD_RENDERER", default_value = DEFAULT_PROGRAM)]
    renderer: PathBuf,

    /// List the diagrams in the catalog and exit
    #[arg(long)]
    list: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log the styled markup and renderer output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Output and style settings; the markup comes from the catalog
    fn request(&self) -> ConversionRequest {
        ConversionRequest::default()
            .with_output_path(&self.output)
            .with_scale(self.scale)
            .with_background_color(&self.bg_color)
            .with_theme(Theme::from(self.theme.as_str()))
            .with_text_color(&self.text_color)
            .with_style(StyleOverrides {
                font_size: self.font_size.clone(),
                font_family: self.font_family.clone(),
                line_width: self.line_width.clone(),
                arrow_width: self.arrow_width.clone(),
                padding: self.padding.clone(),
            })
    }
}

/// Run the command and return the process exit code
///
/// A renderer that leaves no image still exits 0; only config and
/// invocation errors exit 1.
fn run(cli: &Cli, renderer: &dyn Renderer) -> i32 {
    if cli.list {
        return match DiagramFile::from_file(&cli.config) {
            Ok(file) => {
                for (id, diagram) in file.iter() {
                    println!("{id}\t{}", diagram.name);
                }
                0
            }
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        };
    }

    match convert_from_config(&cli.config, cli.diagram.as_deref(), cli.request(), renderer) {
        Ok((name, ConversionOutcome::Generated { path, bytes })) => {
            println!("{name}: saved {} ({bytes} bytes)", path.display());
            0
        }
        Ok((name, ConversionOutcome::Missing { path })) => {
            // Reported, not fatal
            println!("{name}: image was not generated at {}", path.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    let renderer = MmdcRenderer::new(&cli.renderer);
    std::process::exit(run(&cli, &renderer));
}
