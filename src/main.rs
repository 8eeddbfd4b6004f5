use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use pepforge::config::ScoringParams;
use pepforge::error::PfResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scoring parameters; explicit flags override it
    #[arg(global = true, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score an aligned FASTA file against per-polymer substitution matrices
    Score(cmd::score::ScoreArgs),
    /// Parse and build one substitution-score source and summarize it
    Inspect(cmd::inspect::InspectArgs),
    /// Assign byte symbols to bracketed monomers for the aligner
    Encode(cmd::encode::EncodeArgs),
}

/// File parameters (if any) with the user's explicit flags applied on top.
fn resolve_params(
    path: &Option<String>,
    cli_params: &ScoringParams,
    sub_matches: &ArgMatches,
) -> PfResult<ScoringParams> {
    let params = match path {
        Some(path) => {
            info!("Loading scoring parameters from: {}", path);
            let mut file_params = ScoringParams::load_from_file(path)?;
            file_params.merge_from_cli(cli_params, sub_matches);
            file_params
        }
        None => cli_params.clone(),
    };
    params.validate()?;
    Ok(params)
}

// Subcommand flags live in the subcommand's matches, not the root.
fn sub_matches<'m>(matches: &'m ArgMatches, name: &str) -> &'m ArgMatches {
    matches.subcommand_matches(name).unwrap_or(matches)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Score(args) => {
            resolve_params(&cli.params, &args.params, sub_matches(&matches, "score"))
                .and_then(|params| cmd::score::run(args, params))
        }
        Commands::Inspect(args) => {
            resolve_params(&cli.params, &args.params, sub_matches(&matches, "inspect"))
                .and_then(|params| cmd::inspect::run(args, params))
        }
        Commands::Encode(args) => cmd::encode::run(args),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
