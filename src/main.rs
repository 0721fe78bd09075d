//! Tikzcirc - circuitikz exporter
//!
//! Converts a saved schematic into circuitikz source.
//!
//! # Usage
//!
//! ```bash
//! tikzcirc amplifier.tikzcirc --no-figure > amplifier.tex
//! tikzcirc amplifier.tikzcirc --list
//! tikzcirc amplifier.tikzcirc --svg preview.svg -o amplifier.tex
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use tikzcirc_core::{
    emit_document,
    error::{Result, TikzcircError},
    markup,
    render::{document_bounds, render_document, SvgCanvas},
    CircuitDocument, Point, Preferences,
};

/// circuitikz exporter for saved schematics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the saved schematic
    #[arg(value_name = "SCHEMATIC_FILE")]
    schematic_file: PathBuf,

    /// Write the LaTeX here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit a bare circuitikz environment without the figure wrapper
    #[arg(long)]
    no_figure: bool,

    /// Use European symbols instead of American ones
    #[arg(long)]
    european: bool,

    /// Leave out the [H] placement hint
    #[arg(long)]
    no_placement_hint: bool,

    /// Print one summary line per component instead of LaTeX
    #[arg(long)]
    list: bool,

    /// Also render a preview of the schematic to this SVG file
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Preferences file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn write_output(path: &PathBuf, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| TikzcircError::FileWriteError {
        path: path.display().to_string(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Offset and canvas size that fit every component with a two grid unit
/// margin on each side.
fn preview_frame(doc: &CircuitDocument, grid: f64) -> (Point, f64, f64) {
    let (min, max) = document_bounds(doc).unwrap_or((Point::new(0.0, 0.0), Point::new(0.0, 0.0)));
    let offset = Point::new(2.0 - min.x, 2.0 - min.y);
    let width = (max.x - min.x + 4.0) * grid;
    let height = (max.y - min.y + 4.0) * grid;
    (offset, width, height)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut prefs = match &args.config {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };
    if args.no_figure {
        prefs.emit.wrap_in_figure = false;
    }
    if args.european {
        prefs.emit.american_style = false;
    }
    if args.no_placement_hint {
        prefs.emit.placement_hint = false;
    }

    let doc = markup::read_file(&args.schematic_file)?;
    info!(
        "read {} components from {}",
        doc.len(),
        args.schematic_file.display()
    );

    if let Some(path) = &args.svg {
        let mut settings = prefs.render_settings();
        let (offset, width, height) = preview_frame(&doc, settings.grid_size);
        settings.offset = offset;
        let mut canvas = SvgCanvas::new(width, height, prefs.palette.clone());
        render_document(&mut canvas, &doc, &settings, None);
        write_output(path, &canvas.finish())?;
    }

    let text = if args.list {
        let mut lines = doc.summaries().join("\n");
        lines.push('\n');
        lines
    } else {
        let mut latex = emit_document(&doc, prefs.emit);
        latex.push('\n');
        latex
    };

    match &args.output {
        Some(path) => write_output(path, &text)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .map_err(|source| TikzcircError::FileWriteError {
                    path: "<stdout>".to_string(),
                    source,
                })?;
        }
    }

    Ok(())
}
