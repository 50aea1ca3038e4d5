//! CLI command definitions for the `answerdesk` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod session;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use answerdesk_types::session::SessionKey;

/// Answer open questions in a hosted table base, one at a time.
#[derive(Parser)]
#[command(name = "answerdesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use seeded in-memory tables instead of the hosted base.
    #[arg(long, global = true)]
    pub demo: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true, env = "ANSWERDESK_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Counts, robotic systems and duplicate names in the base.
    Status,

    /// Show the current question of a session.
    #[command(alias = "current")]
    Next {
        #[command(flatten)]
        session: SessionArg,
    },

    /// Skip the current question.
    Skip {
        #[command(flatten)]
        session: SessionArg,
    },

    /// Start a session over at the first unanswered question.
    Reset {
        #[command(flatten)]
        session: SessionArg,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct SessionArg {
    /// Session key naming the cursor.
    #[arg(long, short, default_value = SessionKey::DEFAULT)]
    pub session: SessionKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_session_defaults() {
        let cli = Cli::try_parse_from(["answerdesk", "skip"]).unwrap();
        match cli.command {
            Commands::Skip { session } => assert_eq!(session.session, SessionKey::default()),
            _ => panic!("expected skip"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["answerdesk", "next", "--session", "desk-2", "--demo", "--json", "-vv"])
                .unwrap();
        assert!(cli.demo);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Next { session } => assert_eq!(session.session.as_str(), "desk-2"),
            _ => panic!("expected next"),
        }
    }

    #[test]
    fn test_invalid_session_rejected() {
        assert!(Cli::try_parse_from(["answerdesk", "reset", "--session", "a b"]).is_err());
    }
}
