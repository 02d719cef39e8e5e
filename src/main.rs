use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use thermcam::config::SourceKind;
use thermcam::keyboard_input::KeyboardInput;
use thermcam::session::KEYMAP_HELP;
use thermcam::{ThermalViewer, ThermcamConfig};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "thermcam")]
#[command(about = "Live viewer for dual-plane thermal camera modules")]
#[command(version)]
#[command(long_about = "Displays the visible channel of a thermal camera module with a \
color map, marks the hottest and coldest points of the thermal channel, and can save \
still images and record video of the annotated output.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "thermcam.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without opening the camera")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,

    /// Camera device index override
    #[arg(long, value_name = "INDEX", help = "Capture from /dev/video<INDEX>")]
    device: Option<u32>,

    /// Use the synthetic frame source
    #[arg(long, conflicts_with = "replay", help = "Use synthetic frames instead of a camera")]
    mock: bool,

    /// Replay a raw frame dump
    #[arg(long, value_name = "PATH", help = "Replay raw stacked frames from a file")]
    replay: Option<PathBuf>,

    /// Run without a window
    #[arg(long, help = "Do not open a display window")]
    headless: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Handle special modes that don't require full initialization
    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    init_logging(&args)?;

    info!("Starting thermcam v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let mut config = match ThermcamConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    apply_overrides(&mut config, &args);

    match config.validate() {
        Ok(()) if args.validate_config => {
            info!("Configuration validation successful");
            println!("✓ Configuration is valid");
            return Ok(());
        }
        Ok(()) => {}
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            eprintln!("✗ Configuration validation failed: {}", e);
            std::process::exit(1);
        }
    }

    println!("thermcam v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", KEYMAP_HELP);

    let input = KeyboardInput::new().map_err(|e| {
        error!("Failed to open keyboard input: {}", e);
        e
    })?;

    let mut viewer = ThermalViewer::from_config(&config, Box::new(input)).map_err(|e| {
        error!("Failed to initialize viewer: {}", e);
        e
    })?;

    let summary = viewer.run().map_err(|e| {
        error!("Viewer error during execution: {}", e);
        e
    })?;

    info!(
        "thermcam exited ({:?}, {} frames)",
        summary.reason, summary.frames_rendered
    );
    Ok(())
}

/// Command-line flags win over file and environment settings
fn apply_overrides(config: &mut ThermcamConfig, args: &Args) {
    if let Some(index) = args.device {
        config.camera.index = index;
        config.camera.source = SourceKind::Device;
    }
    if args.mock {
        config.camera.source = SourceKind::Mock;
    }
    if let Some(path) = &args.replay {
        config.camera.source = SourceKind::Replay;
        config.camera.replay_path = Some(path.clone());
    }
    if args.headless {
        config.display.headless = true;
    }
}

fn init_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Determine log level based on flags
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("thermcam={}", log_level)));

    // stdout carries the keymap; logs go to stderr
    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();

    Ok(())
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# thermcam configuration file");
    println!("# Every key is optional");
    println!("# THERMCAM_<SECTION>__<KEY> environment variables override file values");
    println!();
    println!("{}", toml::to_string_pretty(&ThermcamConfig::default())?);
    Ok(())
}
