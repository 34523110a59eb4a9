//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::OverlayBackend;
use crate::domain::event::ScreenShareEvent;
use crate::domain::indicator::DisplayBounds;

/// share-indicator - screen sharing border overlays
#[derive(Parser, Debug)]
#[command(name = "share-indicator")]
#[command(version)]
#[command(about = "Draws border overlays around the screen while it is being shared")]
#[command(long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the indicator until interrupted
    Run(RunArgs),
    /// Send a screen sharing event to the running indicator
    Send {
        /// Event to send (open, close, stop, or a raw event name)
        event: String,
        /// JSON payload attached to the event
        #[arg(long, value_name = "JSON")]
        payload: Option<String>,
    },
    /// Show overlay states of the running indicator
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `run`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Overlay backend
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<BackendArg>,

    /// Primary display work area (X,Y,WIDTH,HEIGHT)
    #[arg(short = 'w', long, value_name = "X,Y,W,H")]
    pub work_area: Option<String>,

    /// Border strip thickness in pixels
    #[arg(short = 't', long, value_name = "PIXELS")]
    pub thickness: Option<u32>,

    /// PNG drawn on each strip
    #[arg(short = 'a', long, value_name = "PATH")]
    pub asset: Option<PathBuf>,
}

/// Backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Headless,
    Wayland,
}

impl From<BackendArg> for OverlayBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Headless => OverlayBackend::Headless,
            BackendArg::Wayland => OverlayBackend::Wayland,
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for the running indicator
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub channel: String,
    pub backend: OverlayBackend,
    pub work_area: DisplayBounds,
    pub border_thickness: u32,
    pub asset: PathBuf,
}

/// Map the `send` shorthand to an event.
///
/// `open`, `close` and `stop` name the three screen sharing events; anything
/// else is sent verbatim as an event name.
pub fn parse_event_arg(arg: &str) -> ScreenShareEvent {
    match arg {
        "open" => ScreenShareEvent::OpenTracker,
        "close" => ScreenShareEvent::CloseTracker,
        "stop" => ScreenShareEvent::StopScreenShare,
        other => ScreenShareEvent::from_name(other),
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "channel",
    "border_thickness",
    "asset",
    "backend",
    "work_area",
    "logging.level",
    "logging.json",
];

/// Valid log levels
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_defaults() {
        let cli = Cli::parse_from(["share-indicator", "run"]);
        let Commands::Run(args) = cli.command else {
            panic!("Expected Run command");
        };
        assert!(args.backend.is_none());
        assert!(args.work_area.is_none());
        assert!(args.thickness.is_none());
        assert!(args.asset.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_parses_run_options() {
        let cli = Cli::parse_from([
            "share-indicator",
            "run",
            "--backend",
            "wayland",
            "--work-area",
            "0,0,2560,1440",
            "-t",
            "8",
            "--asset",
            "/tmp/line.png",
            "-v",
        ]);
        let Commands::Run(args) = cli.command else {
            panic!("Expected Run command");
        };
        assert_eq!(args.backend, Some(BackendArg::Wayland));
        assert_eq!(args.work_area.as_deref(), Some("0,0,2560,1440"));
        assert_eq!(args.thickness, Some(8));
        assert_eq!(args.asset, Some(PathBuf::from("/tmp/line.png")));
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_send_with_payload() {
        let cli = Cli::parse_from(["share-indicator", "send", "open", "--payload", "{\"a\":1}"]);
        if let Commands::Send { event, payload } = cli.command {
            assert_eq!(event, "open");
            assert_eq!(payload.as_deref(), Some("{\"a\":1}"));
        } else {
            panic!("Expected Send command");
        }
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["share-indicator", "config", "set", "backend", "wayland"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "backend");
            assert_eq!(value, "wayland");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["share-indicator"]).is_err());
    }

    #[test]
    fn event_shorthands() {
        assert_eq!(parse_event_arg("open"), ScreenShareEvent::OpenTracker);
        assert_eq!(parse_event_arg("close"), ScreenShareEvent::CloseTracker);
        assert_eq!(parse_event_arg("stop"), ScreenShareEvent::StopScreenShare);
        assert_eq!(
            parse_event_arg("open-tracker-window"),
            ScreenShareEvent::OpenTracker
        );
        assert_eq!(
            parse_event_arg("resize"),
            ScreenShareEvent::Unrecognized("resize".to_string())
        );
    }

    #[test]
    fn backend_arg_converts() {
        assert_eq!(OverlayBackend::from(BackendArg::Wayland), OverlayBackend::Wayland);
        assert_eq!(OverlayBackend::from(BackendArg::Headless), OverlayBackend::Headless);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("channel"));
        assert!(is_valid_config_key("logging.level"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
