use clap::{Parser, Subcommand};
use lucius::CliError;
use std::path::PathBuf;

/// Generate a static site from markdown posts and handlebars templates.
#[derive(Parser, Debug)]
#[command(name = "lucius", version, about)]
struct Cli {
    /// Project directory containing lucius.json, content and templates
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clear the output directory and render every post
    Build,
    /// Render only posts that are not in the post database yet
    Update,
    /// Build, serve the output over HTTP and rebuild on changes
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Build => lucius::report(&lucius::build(&cli.root)?),
        Command::Update => lucius::report(&lucius::update(&cli.root)?),
        Command::Serve { port } => lucius::serve(&cli.root, port)?,
    }
    Ok(())
}
