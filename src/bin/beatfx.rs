use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "beatfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single frame.
    Frame(FrameArgs),
    /// Evaluate a frame range and print one JSON document per line.
    Range(RangeArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); the composition duration when omitted.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate frames on a dedicated worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Svg,
}

fn main() -> anyhow::Result<()> {
    // stdout carries the evaluated frames
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
    }
}

fn load(path: &Path) -> anyhow::Result<beatfx::Composition> {
    beatfx::Composition::from_path(path)
        .with_context(|| format!("load composition '{}'", path.display()))
}

fn open_out(out: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("create '{}'", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    let frame = beatfx::Evaluator::eval_frame(&comp, beatfx::FrameIndex(args.frame))?;

    let mut w = open_out(args.out.as_deref())?;
    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut w, &frame).context("serialize frame")?;
            writeln!(w)?;
        }
        Format::Svg => {
            w.write_all(beatfx::adapter::svg::render_svg(&frame, comp.canvas()).as_bytes())?;
        }
    }
    w.flush()?;
    Ok(())
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let comp = load(&args.in_path)?;
    let end = args.end.unwrap_or(comp.duration_frames());
    let range = beatfx::FrameRange::new(beatfx::FrameIndex(args.start), beatfx::FrameIndex(end))?;
    let opts = beatfx::EvalOpts {
        parallel: args.parallel,
        threads: args.threads,
    };

    let frames = beatfx::Evaluator::eval_range(&comp, range, &opts)?;
    let mut w = open_out(args.out.as_deref())?;
    for f in &frames {
        serde_json::to_writer(&mut w, f).context("serialize frame")?;
        writeln!(w)?;
    }
    w.flush()?;
    tracing::info!(frames = frames.len(), "range evaluated");
    Ok(())
}
