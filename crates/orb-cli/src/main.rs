mod input;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use orb_core::{ConversationState, OrbConfig, OrbScene};
use orb_render::{Compositor, FrameSink, OrbEngine, OverlayImage, WriterSink};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Seed used by `snapshot` when none is given, so repeated runs match.
const SNAPSHOT_SEED: u64 = 42;

#[derive(Parser)]
#[command(name = "orb", about = "Procedural voice-orb animation renderer")]
struct Cli {
    /// TOML config file, merged over the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render frames continuously, reading state changes from stdin
    Run {
        #[command(flatten)]
        render: RenderArgs,

        /// Raw RGBA output file, or `-` for stdout
        #[arg(long, default_value = "-")]
        output: PathBuf,

        /// Stop after this many seconds
        #[arg(long)]
        duration: Option<f64>,
    },

    /// Render a single frame after a number of ticks and save it as PNG
    Snapshot {
        #[command(flatten)]
        render: RenderArgs,

        /// PNG output path
        #[arg(long)]
        out: PathBuf,

        /// Ticks to simulate before capturing (at least 1)
        #[arg(long, default_value_t = 48, value_parser = clap::value_parser!(u32).range(1..))]
        ticks: u32,
    },

    /// Print the default configuration as TOML
    Config,
}

/// Flags shared by the rendering subcommands; each overrides the config file.
#[derive(Args)]
struct RenderArgs {
    /// Frame width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Target frame rate
    #[arg(long)]
    fps: Option<f64>,

    /// Overlay image (PNG or JPEG)
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Initial state: idle, thinking or speaking
    #[arg(long, default_value = "idle")]
    state: ConversationState,

    /// Seed for burst randomness
    #[arg(long)]
    seed: Option<u64>,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(path: Option<&Path>, args: &RenderArgs) -> Result<OrbConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => OrbConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(logo) = &args.logo {
        config.overlay.path = Some(logo.clone());
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Run {
            render,
            output,
            duration,
        } => cmd_run(&cli, render, output, *duration).await,
        Commands::Snapshot { render, out, ticks } => cmd_snapshot(&cli, render, out, *ticks),
        Commands::Config => cmd_config(),
    }
}

fn open_sink(output: &Path) -> Result<Box<dyn FrameSink>> {
    if output == Path::new("-") {
        return Ok(Box::new(WriterSink::new(std::io::stdout())));
    }
    let file = File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
    Ok(Box::new(WriterSink::new(BufWriter::new(file))))
}

async fn cmd_run(cli: &Cli, args: &RenderArgs, output: &Path, duration: Option<f64>) -> Result<()> {
    let config = load_config(cli.config.as_deref(), args)?;
    let duration = duration
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --duration")?;

    let overlay = OverlayImage::from_spec(&config.overlay);
    let mut engine = OrbEngine::new(&config, overlay, open_sink(output)?)?;
    if let Some(seed) = args.seed {
        engine = engine.with_rng(SmallRng::seed_from_u64(seed));
    }
    engine.set_state(args.state);

    // Blocking reads cannot be cancelled; a plain thread dies with the process.
    let handle = engine.state_handle();
    std::thread::spawn(move || input::pump_states(std::io::stdin().lock(), &handle));

    tracing::info!(
        "rendering {}x{} at {} fps to {}",
        config.width,
        config.height,
        config.fps,
        output.display()
    );
    engine.start()?;

    let deadline = async {
        match duration {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    };
    tokio::select! {
        _ = shutdown_signal() => {}
        _ = deadline => tracing::info!("duration elapsed"),
        _ = engine.closed() => tracing::warn!("frame loop exited on its own"),
    }

    let result = engine.stop().await;
    // stdout may carry frames, so the summary goes to stderr.
    eprintln!("rendered {} frames", engine.frames_emitted());
    result.context("frame loop failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

fn cmd_snapshot(cli: &Cli, args: &RenderArgs, out: &Path, ticks: u32) -> Result<()> {
    let config = load_config(cli.config.as_deref(), args)?;
    let overlay = OverlayImage::from_spec(&config.overlay);
    let compositor = Compositor::new(&config, overlay);
    let mut scene = OrbScene::new(&config);
    let mut rng = SmallRng::seed_from_u64(args.seed.unwrap_or(SNAPSHOT_SEED));

    let mut motion = scene.step(args.state, &mut rng);
    for _ in 1..ticks {
        motion = scene.step(args.state, &mut rng);
    }

    let frame = compositor
        .compose(&scene, &motion)
        .context("failed to compose frame")?;
    frame
        .save_png(out)
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!(
        "wrote {} ({}x{}, {} ticks, {} bursts)",
        out.display(),
        frame.width(),
        frame.height(),
        scene.ticks(),
        scene.particles().len()
    );
    Ok(())
}

fn cmd_config() -> Result<()> {
    let text = toml::to_string_pretty(&OrbConfig::default()).context("failed to serialize config")?;
    print!("{text}");
    Ok(())
}
