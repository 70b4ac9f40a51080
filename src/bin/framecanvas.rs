use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use framecanvas::{
    CanvasResult, Color, Fps, FrameNode, FrameSink, NodeConfig, NodeRunner, PngSequenceSink,
    Rgba8Premul, SinkConfig, VideoFrame,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "framecanvas", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence by feeding synthetic frames through a node.
    Render(RenderArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NodeKind {
    Clock,
    Credits,
    Bounce,
    House,
    Quadrants,
}

impl NodeKind {
    fn name(self) -> &'static str {
        match self {
            Self::Clock => "clock",
            Self::Credits => "credits",
            Self::Bounce => "bounce",
            Self::House => "house",
            Self::Quadrants => "quadrants",
        }
    }
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Built-in node with default settings.
    #[arg(long, value_enum, required_unless_present = "config")]
    node: Option<NodeKind>,

    /// Node config JSON (overrides `--node`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input frame width.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Input frame height.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Input frame color (CSS syntax).
    #[arg(long, default_value = "black")]
    background: String,

    /// PNG used as the input frames instead of a solid background.
    #[arg(long)]
    input: Option<PathBuf>,

    /// PNG delivered on pad 1 before the first primary frame (two-pad nodes).
    #[arg(long)]
    overlay: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Presentation timestamp in seconds.
    #[arg(long, default_value_t = 0.0)]
    pts: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Number of primary frames to feed.
    #[arg(long, default_value_t = 30)]
    frames: u64,

    /// Frames per second used to stamp timestamps.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory for `frame_%05d.png`.
    #[arg(long)]
    out: PathBuf,

    /// Print an xxh3 digest over all emitted frames.
    #[arg(long)]
    hash: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn node_config(source: &SourceArgs) -> anyhow::Result<NodeConfig> {
    if let Some(path) = &source.config {
        return Ok(NodeConfig::from_path(path)?);
    }
    let kind = source.node.context("either --node or --config is required")?;
    Ok(NodeConfig::default_for(kind.name())?)
}

/// Source of primary frames: a decoded PNG or a solid color.
struct Inputs {
    template: VideoFrame,
}

impl Inputs {
    fn new(source: &SourceArgs) -> anyhow::Result<Self> {
        let template = match &source.input {
            Some(path) => framecanvas::load_frame_png(path, 0.0)?,
            None => {
                let color: Color = source
                    .background
                    .parse()
                    .with_context(|| format!("parse --background '{}'", source.background))?;
                if source.width == 0 || source.height == 0 {
                    anyhow::bail!("--width and --height must be > 0");
                }
                VideoFrame::filled(source.width, source.height, 0.0, color.to_premul(1.0))
            }
        };
        Ok(Self { template })
    }

    fn at(&self, pts: f64) -> VideoFrame {
        let mut frame = self.template.clone();
        frame.pts = pts;
        frame
    }
}

fn overlay_frame(source: &SourceArgs) -> anyhow::Result<VideoFrame> {
    match &source.overlay {
        Some(path) => Ok(framecanvas::load_frame_png(path, 0.0)?),
        None => Ok(test_card(64, 48)),
    }
}

// Four-color checker used when no overlay image is given.
fn test_card(width: u32, height: u32) -> VideoFrame {
    const COLORS: [Rgba8Premul; 4] = [
        Rgba8Premul::new(230, 57, 70, 255),
        Rgba8Premul::new(241, 250, 238, 255),
        Rgba8Premul::new(69, 123, 157, 255),
        Rgba8Premul::new(29, 53, 87, 255),
    ];
    let mut card = VideoFrame::new(width, height, 0.0);
    for y in 0..height {
        for x in 0..width {
            let cell = ((x / 8) % 2 + 2 * ((y / 8) % 2)) as usize;
            card.set_pixel(x, y, COLORS[cell]);
        }
    }
    card
}

fn make_runner(source: &SourceArgs) -> anyhow::Result<NodeRunner<Box<dyn FrameNode>>> {
    let cfg = node_config(source)?;
    let pads = cfg.pad_count();
    let mut runner = NodeRunner::new(cfg.build()?)?;
    if pads > 1 {
        let emitted = runner.push_frame(overlay_frame(source)?, 1)?;
        if !emitted.is_empty() {
            tracing::debug!(count = emitted.len(), "overlay pad emitted frames");
        }
    }
    Ok(runner)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut runner = make_runner(&args.source)?;
    let inputs = Inputs::new(&args.source)?;

    let emitted = runner.push_frame(inputs.at(args.pts), 0)?;
    let frame = emitted.last().context("node did not emit a frame")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    framecanvas::encode::png::save_frame_png(frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Wraps a sink and folds every frame's fingerprint into one digest.
struct HashingSink<S> {
    inner: S,
    hasher: xxhash_rust::xxh3::Xxh3,
}

impl<S: FrameSink> FrameSink for HashingSink<S> {
    fn begin(&mut self, cfg: SinkConfig) -> CanvasResult<()> {
        self.hasher.reset();
        self.inner.begin(cfg)
    }

    fn push_frame(&mut self, idx: u64, frame: &VideoFrame) -> CanvasResult<()> {
        self.hasher.update(&frame.fingerprint().to_le_bytes());
        self.inner.push_frame(idx, frame)
    }

    fn end(&mut self) -> CanvasResult<()> {
        self.inner.end()
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    let mut runner = make_runner(&args.source)?;
    let inputs = Inputs::new(&args.source)?;

    let mut sink = HashingSink {
        inner: PngSequenceSink::new(&args.out),
        hasher: xxhash_rust::xxh3::Xxh3::new(),
    };
    let cfg = SinkConfig {
        width: inputs.template.width,
        height: inputs.template.height,
        fps,
    };
    let frames = (0..args.frames).map(|i| (0, inputs.at(fps.pts_of(i))));
    let stats = runner.run_into(frames, &mut sink, cfg)?;

    tracing::info!(?stats, "render finished");
    if args.hash {
        println!("{:016x}", sink.hasher.digest());
    }
    eprintln!(
        "wrote {} frames to {}",
        stats.frames_out,
        sink.inner.dir().display()
    );
    Ok(())
}
