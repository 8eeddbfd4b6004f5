use crate::reports;
use clap::Args;
use pepforge::config::ScoringParams;
use pepforge::error::PfResult;
use pepforge::scorer::{build_matrix, load_score_source};

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub params: ScoringParams,

    /// Custom substitution-score source
    #[arg(short, long)]
    pub matrix: String,

    /// Also list every accepted entry
    #[arg(long, default_value_t = false)]
    pub entries: bool,
}

pub fn run(args: &InspectArgs, params: ScoringParams) -> PfResult<()> {
    let source = load_score_source(&args.matrix, params.symbol_radix)?;
    let matrix = build_matrix(&source, &params, &args.matrix)?;

    reports::print_source_report(&args.matrix, &source, &matrix);
    if args.entries {
        reports::print_source_entries(&source);
    }
    Ok(())
}
