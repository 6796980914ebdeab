//! CLI entry point.
//!
//! Loads `.env`, initialises logging, composes the context through
//! [`bootstrap`] and dispatches to a handler. Failures exit with the code
//! mapped by [`CliError::exit_code`].

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use rescope_cli::{
    Cli, CliConfig, CliContext, CliError, Commands, bootstrap, handlers, log_directives,
};

fn init_tracing(cli: &Cli) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directives(cli.verbose, cli.plain_progress)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok(); // Ignore error if already initialized
}

fn dispatch(ctx: &CliContext, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Fetch { uri, output, limit } => {
            handlers::fetch::execute(ctx, &uri, output.as_deref(), limit)?;
        }
        Commands::Meta { uri } => {
            handlers::meta::execute(ctx, &uri)?;
        }
        Commands::List { uri } => {
            handlers::list::execute(ctx, &uri)?;
        }
        Commands::Put { file, uri } => {
            handlers::put::execute(ctx, &file, &uri)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(config);
    if let Err(err) = dispatch(&ctx, command) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
