//! Wombat CLI
//!
//! Converts an SVG document to a PNG, JPEG or BMP image, or inspects how it
//! would be drawn.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use simple_logger::SimpleLogger;
use wombat_dom::DomTree;
use wombat_render::{FileLoader, OutputFormat, RenderOptions, render_tree};
use wombat_svg::{RecordingCanvas, render_document, resolve_color};
use wombat_xml::{ParseOptions, parse_svg_bytes};

/// Output path meaning standard output.
const STDOUT: &str = "-";

/// Wombat: convert SVG documents to raster images
#[derive(Parser, Debug)]
#[command(name = "wombat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Convert to drawing.png next to the input
    wombat drawing.svg

    # Twice the size, on white, as JPEG
    wombat drawing.svg --scale 2 --background white -o drawing.jpg

    # Write PNG bytes to standard output
    wombat drawing.svg -o - > drawing.png

    # Inspect the parsed tree or the drawing calls
    wombat drawing.svg --dump-tree
    wombat drawing.svg --trace
"#)]
struct Cli {
    /// SVG file to convert
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file, `-` for standard output (default: INPUT with the format's extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output format: png, jpeg or bmp (default: from OUTPUT's extension, else png)
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Pixels per user unit
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Background color, any SVG color (default: transparent)
    #[arg(long, value_name = "COLOR")]
    background: Option<String>,

    /// Font file used for all text instead of the system fonts
    #[arg(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Print the parsed tree as JSON instead of converting
    #[arg(long)]
    dump_tree: bool,

    /// Print the drawing calls as JSON lines instead of converting
    #[arg(long)]
    trace: bool,

    /// More logging: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(error) = SimpleLogger::new().with_level(level).init() {
        eprintln!("cannot install logger: {error}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("cannot read '{}'", cli.input.display()))?;
    let tree = parse_svg_bytes(&bytes, &ParseOptions::default())
        .with_context(|| format!("cannot parse '{}'", cli.input.display()))?;

    if cli.dump_tree || cli.trace {
        if cli.dump_tree {
            println!("{}", serde_json::to_string_pretty(&tree.subtree(tree.root()))?);
        }
        if cli.trace {
            trace(&tree, &cli.input)?;
        }
        return Ok(());
    }

    let options = render_options(cli)?;
    log::info!("converting {} with {}", cli.input.display(), serde_json::to_string(&options)?);
    let image = render_tree(&tree, Some(&cli.input), &options)?;

    match &cli.output {
        Some(path) if path.as_os_str() == STDOUT => {
            std::io::stdout().lock().write_all(&image)?;
        }
        output => {
            let path = output_path(&cli.input, output.as_deref(), options.format);
            std::fs::write(&path, &image)
                .with_context(|| format!("cannot write '{}'", path.display()))?;
            println!("{} {}", "Saved".green().bold(), path.display());
        }
    }
    Ok(())
}

/// Build render options from the arguments.
fn render_options(cli: &Cli) -> Result<RenderOptions> {
    let format = cli
        .format
        .or_else(|| {
            cli.output
                .as_deref()
                .filter(|path| path.as_os_str() != STDOUT)
                .and_then(OutputFormat::from_path)
        })
        .unwrap_or_default();
    let background = cli
        .background
        .as_deref()
        .map(|color| resolve_color(Some(color), 1.0))
        .transpose()
        .context("invalid --background")?;
    anyhow::ensure!(
        cli.scale.is_finite() && cli.scale > 0.0,
        "--scale must be a positive number"
    );
    Ok(RenderOptions {
        format,
        scale: cli.scale,
        background,
        font: cli.font.clone(),
    })
}

/// Where the image is written: `output`, or `input` with the format's extension.
fn output_path(input: &Path, output: Option<&Path>, format: OutputFormat) -> PathBuf {
    output.map_or_else(
        || input.with_extension(format.extension()),
        Path::to_path_buf,
    )
}

/// Print every drawing call as one JSON line. Calls made before a render
/// error are still printed.
fn trace(tree: &DomTree, input: &Path) -> Result<()> {
    let mut canvas = RecordingCanvas::new();
    let result = render_document(&mut canvas, tree, &FileLoader, Some(input));

    let mut stdout = std::io::stdout().lock();
    for op in canvas.ops() {
        writeln!(stdout, "{}", serde_json::to_string(op)?)?;
    }
    result?;
    Ok(())
}
