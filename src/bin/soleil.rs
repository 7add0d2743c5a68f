use std::{
    cell::RefCell,
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "soleil", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print each layer's transforms for one scroll position.
    Frame(FrameArgs),
    /// Run the frame loop over a scroll range, one JSON line per frame.
    Sweep(SweepArgs),
    /// Print event cards from an events JSON file, newest first.
    Events(EventsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scroll container offset in px.
    #[arg(long, allow_hyphen_values = true)]
    scroll: f64,

    /// Viewport height in px.
    #[arg(long)]
    height: f64,

    /// Parallax config JSON (built-in layers when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Viewport height in px.
    #[arg(long)]
    height: f64,

    /// First scroll offset in px.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    from: f64,

    /// Last scroll offset in px (inclusive).
    #[arg(long)]
    to: f64,

    /// Scroll distance per frame in px.
    #[arg(long, default_value_t = 100.0)]
    step: f64,

    /// Parallax config JSON (built-in layers when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EventsArgs {
    /// JSON array of events, or a single event object.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Only show this kind (CME, FLR, GST, IPS, MPC).
    #[arg(long)]
    kind: Option<soleil::EventKind>,

    /// Zero-based page of five events.
    #[arg(long)]
    page: Option<usize>,

    /// Print every recorded field per event instead of the short card.
    #[arg(long)]
    detail: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Events(args) => cmd_events(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<soleil::ParallaxConfig> {
    let Some(path) = path else {
        return Ok(soleil::ParallaxConfig::default());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read parallax config '{}'", path.display()))?;
    let cfg = soleil::ParallaxConfig::from_json_str(&s)
        .with_context(|| format!("parse parallax config '{}'", path.display()))?;
    Ok(cfg)
}

fn read_events(path: &Path) -> anyhow::Result<Vec<soleil::SpaceWeatherEvent>> {
    let f = File::open(path).with_context(|| format!("open events '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse events JSON '{}'", path.display()))?;
    let events = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|e| vec![e])
    }
    .with_context(|| "decode events")?;
    Ok(events)
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerFrame<'a> {
    key: &'a str,
    offset: f64,
    primary: String,
    clone: String,
    /// 2D affine coefficients `[a, b, c, d, e, f]` of the primary, `translateZ` dropped.
    primary_affine: [f64; 6],
    clone_affine: [f64; 6],
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let sample = soleil::ScrollSample::new(args.scroll, args.height)?;

    let mut doc = soleil::MemoryDocument::scaffold(&cfg, args.height)?;
    let mut engine = soleil::ParallaxEngine::init(&mut doc, &cfg)?;
    engine.apply(&mut doc, sample)?;

    let layers = layer_frames(&engine, &doc, sample)?;
    let out = serde_json::json!({
        "scrollY": sample.scroll_y,
        "viewportHeight": sample.viewport_h,
        "layers": layers,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    for (flag, v) in [("--from", args.from), ("--to", args.to), ("--height", args.height)] {
        if !v.is_finite() {
            anyhow::bail!("{flag} must be finite");
        }
    }
    if !(args.step.is_finite() && args.step > 0.0) {
        anyhow::bail!("--step must be > 0");
    }
    if args.to < args.from {
        anyhow::bail!("--to must be >= --from");
    }
    let cfg = read_config(args.config.as_deref())?;

    let mut doc = soleil::MemoryDocument::scaffold(&cfg, args.height)?;
    let engine = soleil::ParallaxEngine::init(&mut doc, &cfg)?;
    let container = *engine.scroll_container();
    let probe = engine.clone();
    doc.set_scroll_top(container, args.from)?;

    let doc = Rc::new(RefCell::new(doc));
    let scheduler = Rc::new(soleil::ManualScheduler::new());
    // Positions the layers for `--from` before returning.
    let handle = soleil::FrameLoop::start(engine, Rc::clone(&doc), Rc::clone(&scheduler))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut scroll = args.from;
    while handle.is_running() {
        let sample = soleil::ScrollSample::new(scroll, args.height)?;
        let layers = layer_frames(&probe, &doc.borrow(), sample)?;
        let line = serde_json::json!({
            "frame": handle.frames_applied().0,
            "scrollY": scroll,
            "layers": layers,
        });
        writeln!(out, "{line}").context("write sweep line")?;

        scroll += args.step;
        if scroll > args.to {
            break;
        }
        doc.borrow_mut().set_scroll_top(container, scroll)?;
        scheduler.refresh();
    }
    handle.stop();
    tracing::debug!(frames = handle.frames_applied().0, "sweep finished");
    Ok(())
}

/// Reads back what the engine wrote for each layer.
fn layer_frames<'a>(
    engine: &'a soleil::ParallaxEngine<soleil::NodeId>,
    doc: &soleil::MemoryDocument,
    sample: soleil::ScrollSample,
) -> anyhow::Result<Vec<LayerFrame<'a>>> {
    engine
        .placements(sample)
        .map(|(key, placement)| -> anyhow::Result<LayerFrame<'a>> {
            let (primary, clone) = engine
                .elements(key)
                .with_context(|| format!("layer '{key}' vanished (bug)"))?;
            let base = engine
                .base_transform(key)
                .with_context(|| format!("layer '{key}' vanished (bug)"))?;
            let read = |node: &soleil::NodeId| {
                doc.transform(*node)
                    .map(str::to_string)
                    .with_context(|| format!("layer '{key}' has no transform"))
            };
            Ok(LayerFrame {
                key,
                offset: placement.offset,
                primary: read(primary)?,
                clone: read(clone)?,
                primary_affine: base.with_offset_affine(placement.primary_y).as_coeffs(),
                clone_affine: base.with_offset_affine(placement.clone_y).as_coeffs(),
            })
        })
        .collect()
}

fn cmd_events(args: EventsArgs) -> anyhow::Result<()> {
    let mut events = soleil::dedupe_by_document_id(read_events(&args.in_path)?);
    if let Some(kind) = args.kind {
        events.retain(|e| e.kind == Some(kind));
    }
    soleil::sort_newest_first(&mut events);

    let shown = match args.page {
        Some(n) => soleil::page(&events, n),
        None => &events[..],
    };
    if shown.is_empty() {
        eprintln!("no events");
        return Ok(());
    }
    for event in shown {
        let card = if args.detail {
            soleil::EventCard::detailed(event)
        } else {
            soleil::EventCard::for_event(event)
        };
        println!("{card}");
    }
    Ok(())
}
