use clap::Args;
use pepforge::encoding::SymbolEncoder;
use pepforge::error::{PepForgeError, PfResult};
use std::fs;
use std::io::Write;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// FASTA with natural residues and bracketed monomers, e.g. A[Ahp]C
    #[arg(short, long)]
    pub input: String,

    /// Polymer type the symbols belong to
    #[arg(short, long, default_value = "PEPTIDE1")]
    pub polymer: String,

    /// Treat each whole sequence as one monomer (chemical polymers)
    #[arg(long, default_value_t = false)]
    pub whole: bool,

    /// Where to write the JSON symbol map
    #[arg(long)]
    pub map_out: String,
}

pub fn run(args: &EncodeArgs) -> PfResult<()> {
    let text = fs::read_to_string(&args.input)?;
    let mut encoder = SymbolEncoder::new(args.polymer.clone());
    let mut out: Vec<u8> = Vec::new();
    let mut header_seen = false;

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('>') {
            header_seen = true;
            out.extend_from_slice(line.as_bytes());
        } else if !header_seen {
            return Err(PepForgeError::Validation(format!(
                "Line {} has sequence data before any '>' header",
                idx + 1
            )));
        } else if args.whole {
            out.push(encoder.encode_whole(line)?);
        } else {
            out.extend(encoder.encode_sequence(line)?);
        }
        out.push(b'\n');
    }

    fs::write(&args.map_out, serde_json::to_string_pretty(&encoder.to_map())?)?;
    info!(
        "Assigned {} symbols for '{}'; map written to {}",
        encoder.len(),
        args.polymer,
        args.map_out
    );

    // Encoded bytes are Latin-1; write them raw.
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.flush()?;
    Ok(())
}
