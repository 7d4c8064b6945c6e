//! CLI argument definitions.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, DEFAULT_MAX_BODY_BYTES, DEFAULT_PORT};

/// focusd - a small focus timer with session statistics
#[derive(Parser, Debug)]
#[command(name = "focusd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. info, focusd=debug)
    #[arg(long, global = true, env = "FOCUSD_LOG", default_value = "info")]
    pub log_level: String,

    /// Base URL of a running server (defaults to the port it recorded)
    #[arg(long, global = true, env = "FOCUSD_SERVER")]
    pub server: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server
    Serve(ServeArgs),

    /// Start a session on the running server
    Start {
        /// Planned length in minutes
        #[arg(short, long, default_value_t = 25.0)]
        duration: f64,

        /// Session label
        #[arg(short = 't', long = "type", default_value = "focus")]
        session_type: String,

        /// Ambience label
        #[arg(short, long, default_value = "default")]
        environment: String,
    },

    /// End the session in progress on the running server
    End {
        /// Minutes actually spent
        #[arg(short, long)]
        actual_duration: Option<f64>,

        /// Record the session as not completed
        #[arg(long)]
        abandoned: bool,
    },

    /// Show totals and the last seven days
    Stats,
}

/// Options for `focusd serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "FOCUSD_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "FOCUSD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory served under /static (holds audio/ and images/backgrounds/)
    #[arg(long, env = "FOCUSD_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Largest accepted request body in bytes
    #[arg(long, env = "FOCUSD_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

impl From<ServeArgs> for Config {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            static_dir: args.static_dir,
            max_body_bytes: args.max_body_bytes,
            open_browser: args.open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["focusd", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let config = Config::from(args);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(!config.open_browser);
    }

    #[test]
    fn test_start_flags() {
        let cli =
            Cli::try_parse_from(["focusd", "start", "-d", "50", "--type", "break"]).unwrap();
        match cli.command {
            Commands::Start {
                duration,
                session_type,
                environment,
            } => {
                assert!((duration - 50.0).abs() < f64::EPSILON);
                assert_eq!(session_type, "break");
                assert_eq!(environment, "default");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_end_flags() {
        let cli = Cli::try_parse_from(["focusd", "end", "--abandoned"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::End {
                actual_duration: None,
                abandoned: true
            }
        ));
    }
}
