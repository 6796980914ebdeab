//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for instrumented resource access.
///
/// Every command runs as a traced operation; progress of streamed
/// transfers is drawn on the terminal.
#[derive(Parser)]
#[command(name = "rescope")]
#[command(about = "Fetch, inspect, list and upload resources with tracing and progress")]
#[command(version)]
pub struct Cli {
    /// Minimum milliseconds between two progress updates
    #[arg(
        long = "progress-interval-ms",
        env = "RESCOPE_PROGRESS_INTERVAL_MS",
        default_value_t = 100,
        global = true
    )]
    pub progress_interval_ms: u64,

    /// Log progress instead of drawing it
    #[arg(long = "plain-progress", global = true)]
    pub plain_progress: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "rescope",
            "--verbose",
            "--progress-interval-ms",
            "250",
            "meta",
            "file:///tmp/a.jar",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.progress_interval_ms, 250);
        assert!(matches!(cli.command, Some(Commands::Meta { .. })));
    }

    #[test]
    fn test_fetch_args() {
        let cli = Cli::parse_from([
            "rescope",
            "fetch",
            "file:///tmp/a.jar",
            "--limit",
            "200",
            "--output",
            "/tmp/out.jar",
        ]);
        let Some(Commands::Fetch { uri, output, limit }) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(uri, "file:///tmp/a.jar");
        assert_eq!(limit, Some(200));
        assert_eq!(output.as_deref(), Some(std::path::Path::new("/tmp/out.jar")));
    }
}
