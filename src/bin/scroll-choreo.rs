use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use scroll_choreo::{
    Choreographer, FrameBatch, PageLayout, ScrollDriver as _, SimDriver, SnapRequest, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "scroll-choreo", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized snap ranges as JSON.
    Ranges(PageArgs),
    /// Print where a gesture ending at a scroll fraction would settle.
    Snap(SnapArgs),
    /// Print every section's frame at a scroll position.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Input page layout JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Render as if the user prefers reduced motion.
    #[arg(long)]
    reduced_motion: bool,

    /// Override the viewport width.
    #[arg(long)]
    viewport_width: Option<f64>,

    /// Override the viewport height.
    #[arg(long)]
    viewport_height: Option<f64>,
}

#[derive(Args, Debug)]
struct SnapArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Gesture end position as a fraction of total scroll.
    #[arg(long)]
    at: f64,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll position in pixels.
    #[arg(long)]
    scroll: f64,
}

#[derive(serde::Serialize)]
struct SnapReport {
    scroll_px: f64,
    fraction: f64,
    request: Option<SnapRequest>,
}

struct Session {
    choreo: Choreographer,
    driver: SimDriver,
    frames: FrameBatch,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Ranges(args) => cmd_ranges(args),
        Command::Snap(args) => cmd_snap(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn read_page(args: &PageArgs) -> anyhow::Result<PageLayout> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("open page layout '{}'", args.in_path.display()))?;
    let mut page: PageLayout =
        serde_json::from_str(&text).with_context(|| "parse page layout JSON")?;

    page.reduced_motion |= args.reduced_motion;
    page.viewport = Viewport {
        width: args.viewport_width.unwrap_or(page.viewport.width),
        height: args.viewport_height.unwrap_or(page.viewport.height),
    };
    page.validate()
        .with_context(|| format!("validate page layout '{}'", args.in_path.display()))?;
    Ok(page)
}

/// Mount the page at `scroll_px`, lay it out and let discovery run.
fn open_session(page: &PageLayout, scroll_px: f64) -> anyhow::Result<Session> {
    let (mut choreo, extents) = page.build()?;
    let mut driver = SimDriver::new(page.viewport, page.max_scroll_px());
    driver.scroll_to(scroll_px);

    let ticket = choreo.mount(Duration::ZERO);
    let frames = choreo.layout(&extents, &page.environment(), &mut driver);
    choreo.poll(ticket.due_at(), &mut driver);

    Ok(Session {
        choreo,
        driver,
        frames,
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).with_context(|| "serialize output")?;
    println!("{out}");
    Ok(())
}

fn cmd_ranges(args: PageArgs) -> anyhow::Result<()> {
    let page = read_page(&args)?;
    let session = open_session(&page, 0.0)?;
    let engine = session
        .choreo
        .snap_engine()
        .context("snap discovery did not run")?;
    print_json(engine)
}

fn cmd_snap(args: SnapArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.at) {
        anyhow::bail!("--at must be a fraction in [0, 1], got {}", args.at);
    }
    let page = read_page(&args.page)?;
    let mut session = open_session(&page, args.at * page.max_scroll_px())?;
    let metrics = session.driver.metrics();
    let request = session.choreo.gesture_end(&mut session.driver);
    print_json(&SnapReport {
        scroll_px: metrics.scroll_px,
        fraction: metrics.fraction().unwrap_or(0.0),
        request,
    })
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let page = read_page(&args.page)?;
    let session = open_session(&page, args.scroll)?;
    print_json(&session.frames)
}
