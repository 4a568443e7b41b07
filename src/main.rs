use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tokio::sync::mpsc;
use touchstick::plugins::gamepad::{GamepadPlugin, GilrsSource};
use touchstick::{AppConfig, Joystick, JoystickCommand, JoystickHandle, MoveEvent};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "usage: touchstick [--init | CONFIG]";

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--init") => return write_default_config(),
        Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(path) => AppConfig::load(&PathBuf::from(path))?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Using config: {:?}", config);

    let source = GilrsSource::new().map_err(|e| eyre!("Failed to open gamepads: {}", e))?;
    let (event_tx, mut event_rx) = mpsc::channel::<MoveEvent>(100);

    let joystick = Joystick::new(config.joystick.clone())
        .with_plugin(GamepadPlugin::new(source, config.gamepad.clone()))
        .on_move(move |event| {
            if let Err(e) = event_tx.try_send(*event) {
                debug!("Dropping move event: {}", e);
            }
        });

    let mut handle = JoystickHandle::spawn(joystick, config.runner.clone())?;
    handle
        .send(JoystickCommand::Layout(config.layout.clone()))
        .await?;
    info!(
        "Monitoring gamepad {} with {} bounding, press Ctrl+C to quit",
        config.gamepad.index, config.joystick.bounding_model
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down");
                break;
            }

            event = event_rx.recv() => {
                match event {
                    Some(event) => info!("{}", event),
                    None => {
                        warn!("Joystick stopped emitting events");
                        break;
                    }
                }
            }
        }
    }

    let (_joystick, stats) = handle.shutdown().await?;
    info!(
        "Emitted {} move events over {} frames",
        stats.emitted, stats.frames
    );
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}

fn write_default_config() -> Result<()> {
    let path = AppConfig::default_path().ok_or_else(|| eyre!("No config directory available"))?;
    if path.exists() {
        warn!("Config already exists at {}, leaving it alone", path.display());
        return Ok(());
    }
    AppConfig::default().save(&path)?;
    println!("{}", path.display());
    Ok(())
}
