use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chartreel", version)]
struct Cli {
    /// Log level for stderr diagnostics.
    #[arg(long, global = true, default_value = "info")]
    log: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame bucket as a PNG.
    Frame(FrameArgs),
    /// Render the chart to video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Render settings JSON.
    #[arg(long)]
    settings: PathBuf,

    /// Position table JSON.
    #[arg(long)]
    positions: PathBuf,

    /// Chart JSON (array of frame buckets).
    #[arg(long)]
    chart: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Bucket index (0-based).
    #[arg(long)]
    bucket: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Number of contiguous segments rendered in parallel, one output file each.
    #[arg(long, default_value_t = 1)]
    jobs: usize,

    /// Fail instead of overwriting outputs that already exist.
    #[arg(long)]
    no_overwrite: bool,
}

struct Inputs {
    settings: chartreel::RenderSettings,
    table: chartreel::PositionTable,
    chart: chartreel::Chart,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<Inputs> {
    let settings = chartreel::RenderSettings::from_path(&args.settings)?;
    settings.validate()?;
    let table = chartreel::PositionTable::from_path(&args.positions)?;
    let chart = chartreel::Chart::from_path(&args.chart)?;
    Ok(Inputs {
        settings,
        table,
        chart,
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let bucket = inputs
        .chart
        .buckets()
        .get(args.bucket)
        .with_context(|| {
            format!(
                "bucket {} is out of range (chart has {})",
                args.bucket,
                inputs.chart.buckets().len()
            )
        })?;

    let assets = chartreel::SessionAssets::load(&inputs.settings)?;
    let session = chartreel::RenderSession::new(&inputs.settings, &inputs.table, &assets)?;
    let frame = session.render_frame(bucket)?.to_rgba_image()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        frame.as_raw(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let assets = chartreel::SessionAssets::load(&inputs.settings)?;

    let settings = &inputs.settings;
    let stats = chartreel::render_segments(
        settings,
        &inputs.table,
        &assets,
        &inputs.chart,
        args.jobs,
        |id| {
            let mut opts = chartreel::FfmpegSinkOpts::new(settings.output_path(id));
            opts.overwrite = !args.no_overwrite;
            tracing::info!(segment = id, path = %opts.out_path.display(), "segment output");
            Ok(chartreel::FfmpegSink::new(opts))
        },
    )?;

    eprintln!(
        "wrote {} frames ({} notes) to {}",
        stats.frames_total,
        stats.notes_drawn,
        settings.output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/bin/chartreel.rs"]
mod tests;
