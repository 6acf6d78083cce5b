use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use c4sign::{FrameSink as _, Gateway, PngSequenceSink, SignConfig, SinkConfig, TaskInfo};

#[derive(Parser, Debug)]
#[command(name = "c4sign", version)]
struct Cli {
    /// Optional JSON config (fps, run times, disabled tasks).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every compiled-in task and whether it is enabled.
    List(ListArgs),
    /// Drive a single task for a number of frames and write the last one as a PNG.
    Frame(FrameArgs),
    /// Run the task rotation headlessly.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Task title (case-insensitive).
    #[arg(long)]
    task: String,

    /// Frames to draw before capturing.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pixels per LED in the PNG.
    #[arg(long, default_value_t = 8)]
    scale: u32,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Simulated seconds to run for.
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Write every frame as a PNG into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Pixels per LED in written PNGs.
    #[arg(long, default_value_t = 8)]
    scale: u32,

    /// Sleep between ticks so the run takes wall-clock time.
    #[arg(long)]
    realtime: bool,
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("c4sign=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let cfg = match &cli.config {
        Some(path) => SignConfig::from_path(path)?,
        None => SignConfig::default(),
    };
    match cli.cmd {
        Command::List(args) => cmd_list(&cfg, args),
        Command::Frame(args) => cmd_frame(&cfg, args),
        Command::Run(args) => cmd_run(cfg, args),
    }
}

fn cmd_list(cfg: &SignConfig, args: ListArgs) -> anyhow::Result<()> {
    let tasks = Gateway::with_config(cfg).describe_tasks();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }
    for t in &tasks {
        let flag = if t.enabled { "on " } else { "off" };
        let info =
            TaskInfo::new(t.title.as_str(), t.artist.as_str()).with_run_secs(t.suggested_run_secs);
        println!(
            "{flag}  {:<20} {:<16} {:>5.1}s",
            t.title,
            t.artist,
            cfg.run_secs_for(&info)
        );
    }
    Ok(())
}

fn cmd_frame(cfg: &SignConfig, args: FrameArgs) -> anyhow::Result<()> {
    let gw = Gateway::with_config(cfg);
    let mut handle = gw
        .task(&args.task)
        .with_context(|| format!("no enabled task titled '{}'", args.task))?;

    if !handle.prepare() {
        anyhow::bail!("task '{}' declined to run", args.task);
    }
    let delta = cfg.frame_delta_secs();
    for _ in 0..args.frames.max(1) {
        let keep_going = handle.draw(delta)?;
        if !keep_going {
            break;
        }
    }

    let frame = handle.frame();
    let status = handle.status();
    handle.teardown(false);

    println!("{}", status.line1);
    println!("{}", status.line2);
    println!("sha256 {}", frame.digest_hex());

    if let Some(out) = &args.out {
        c4sign::write_png(&frame, out, args.scale)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_run(cfg: SignConfig, args: RunArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be a non-negative number");
    }
    let fps = cfg.fps;
    let delta = cfg.frame_delta_secs();
    let total = (args.seconds * f64::from(fps)).round() as u64;

    let mut sink = args
        .out_dir
        .as_ref()
        .map(|dir| PngSequenceSink::new(dir, args.scale));
    if let Some(sink) = sink.as_mut() {
        sink.begin(SinkConfig { fps })?;
    }

    let mut scheduler = Gateway::with_config(&cfg).scheduler(cfg);
    let mut last_status = String::new();
    let started = Instant::now();

    for i in 0..total {
        let tick = scheduler.tick(delta);
        for event in &tick.events {
            tracing::debug!(?event, "scheduler event");
        }
        let status = tick.status.concat();
        if status != last_status {
            tracing::info!(lcd = %tick.status, "status changed");
            last_status = status;
        }
        if let Some(sink) = sink.as_mut() {
            sink.push_frame(tick.index, &tick.frame, &last_status)?;
        }
        if args.realtime {
            let due = started + Duration::from_secs_f64(delta * (i + 1) as f64);
            if let Some(wait) = due.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    for event in scheduler.shutdown() {
        tracing::debug!(?event, "scheduler event");
    }
    if let Some(sink) = sink.as_mut() {
        sink.end()?;
    }
    eprintln!("ran {total} ticks");
    Ok(())
}
