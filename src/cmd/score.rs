use crate::reports;
use clap::Args;
use itertools::Itertools;
use pepforge::alignment::Alignment;
use pepforge::config::ScoringParams;
use pepforge::encoding::{SymbolEncoder, SymbolMap};
use pepforge::error::{PepForgeError, PfResult};
use pepforge::scorer::{
    ContextSelector, PolymerContextRegistry, ReferenceKind, ReferenceMatrix, ScoringEngine,
    SegmentedContexts, UniformContext,
};
use std::fs;
use strum::IntoEnumIterator;
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub params: ScoringParams,

    /// Aligned sequences (FASTA, byte-coded)
    #[arg(short, long)]
    pub alignment: String,

    /// Custom score source for a polymer type: TYPE=PATH (repeatable)
    #[arg(short, long = "matrix")]
    pub matrices: Vec<String>,

    /// Natural reference matrix for a polymer type: TYPE=blosum62|pam40|pam120|pam200|pam250
    #[arg(short, long = "reference")]
    pub references: Vec<String>,

    /// Score every column with this polymer type
    #[arg(short, long)]
    pub context: Option<String>,

    /// Column range for a polymer type: START..END=TYPE (repeatable, END exclusive)
    #[arg(short, long = "segment")]
    pub segments: Vec<String>,

    /// Symbol map written by `encode`, used to print decoded sequences
    #[arg(long)]
    pub symbols: Option<String>,

    /// Emit the score as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn split_assignment<'a>(raw: &'a str, flag: &str) -> PfResult<(&'a str, &'a str)> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .ok_or_else(|| {
            PepForgeError::Config(format!("--{} expects KEY=VALUE, got '{}'", flag, raw))
        })
}

fn parse_segments(raw: &[String]) -> PfResult<SegmentedContexts> {
    let mut selector = SegmentedContexts::new();
    for item in raw {
        let (range, name) = split_assignment(item, "segment")?;
        let bad = || PepForgeError::Config(format!("Invalid column range '{}'", range));
        let (start, end) = range.split_once("..").ok_or_else(bad)?;
        let start: usize = start.trim().parse().map_err(|_| bad())?;
        let end: usize = end.trim().parse().map_err(|_| bad())?;
        if start >= end {
            return Err(bad());
        }
        selector = selector.segment(start..end, name);
    }
    Ok(selector)
}

fn build_registry(args: &ScoreArgs, params: &ScoringParams) -> PfResult<PolymerContextRegistry> {
    let registry = PolymerContextRegistry::new(params.clone());

    let mut sources = Vec::with_capacity(args.matrices.len());
    for item in &args.matrices {
        let (name, path) = split_assignment(item, "matrix")?;
        info!("Loading score source for '{}' from: {}", name, path);
        let bytes = fs::read(path)?;
        sources.push((name.to_string(), String::from_utf8_lossy(&bytes).into_owned()));
    }
    registry.register_all(&sources)?;

    for item in &args.references {
        let (name, kind) = split_assignment(item, "reference")?;
        let kind: ReferenceKind = kind.parse().map_err(|_| {
            PepForgeError::Config(format!(
                "Unknown reference matrix '{}' (expected one of: {})",
                kind,
                ReferenceKind::iter().join(", ")
            ))
        })?;
        registry.register_reference(name, ReferenceMatrix::new(kind, params.default_score))?;
    }

    if registry.is_empty() {
        return Err(PepForgeError::Config(
            "At least one --matrix or --reference is required".to_string(),
        ));
    }
    Ok(registry)
}

fn build_selector(
    args: &ScoreArgs,
    registry: &PolymerContextRegistry,
) -> PfResult<Box<dyn ContextSelector>> {
    if !args.segments.is_empty() {
        return Ok(Box::new(parse_segments(&args.segments)?));
    }
    if let Some(name) = &args.context {
        return Ok(Box::new(UniformContext::new(name.clone())));
    }
    match registry.polymer_types().as_slice() {
        [only] => Ok(Box::new(UniformContext::new(only.clone()))),
        _ => Err(PepForgeError::Config(
            "Several polymer types registered; pick columns with --context or --segment"
                .to_string(),
        )),
    }
}

// Unscored symbols silently fall back to the default score; say so once per context.
fn warn_unscored(
    registry: &PolymerContextRegistry,
    alignment: &Alignment,
    selector: &dyn ContextSelector,
) {
    for name in registry.polymer_types() {
        let Some(matrix) = registry.resolve(&name).ok() else {
            continue;
        };
        let Some(custom) = matrix.as_custom() else {
            continue;
        };
        let used: Vec<u8> = (0..alignment.len())
            .filter(|&c| selector.context_for(c) == Some(name.as_str()))
            .flat_map(|c| alignment.column(c).unwrap_or_default())
            .filter(|&b| b != alignment.gap())
            .collect();
        let missing = custom.unscored_in(used.iter());
        if !missing.is_empty() {
            warn!(
                "'{}': {} symbol(s) not in its score source, scored as {}: {}",
                name,
                missing.len(),
                custom.default_score(),
                missing.iter().map(|s| format!("{:#04x}", s)).join(" ")
            );
        }
    }
}

pub fn run(args: &ScoreArgs, params: ScoringParams) -> PfResult<()> {
    let registry = build_registry(args, &params)?;
    let selector = build_selector(args, &registry)?;

    info!("Reading alignment from: {}", args.alignment);
    let alignment = Alignment::from_fasta(&fs::read(&args.alignment)?, params.gap_byte()?)?;

    warn_unscored(&registry, &alignment, selector.as_ref());

    let score = ScoringEngine::new(&registry, params.gap_policy())
        .with_aggregate(params.aggregate)
        .score_alignment(&alignment, selector.as_ref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&score)?);
        return Ok(());
    }

    let decoder = match &args.symbols {
        Some(path) => {
            let map: SymbolMap = serde_json::from_str(&fs::read_to_string(path)?)?;
            Some(SymbolEncoder::from_map(&map)?)
        }
        None => None,
    };

    reports::print_alignment(&alignment, decoder.as_ref());
    reports::print_score_report(&score, &alignment, &params);
    Ok(())
}
