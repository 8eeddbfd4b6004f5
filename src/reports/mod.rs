use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pepforge::alignment::Alignment;
use pepforge::config::ScoringParams;
use pepforge::encoding::SymbolEncoder;
use pepforge::scorer::{AlignmentScore, ScoreSource, SubstitutionMatrix};

fn header(cells: &[&str]) -> Vec<Cell> {
    cells
        .iter()
        .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect()
}

fn num(v: f64) -> Cell {
    Cell::new(format!("{:.3}", v)).set_alignment(CellAlignment::Right)
}

fn symbol_label(s: u8) -> String {
    if s.is_ascii_graphic() {
        format!("{:#04x} '{}'", s, s as char)
    } else {
        format!("{:#04x}", s)
    }
}

pub fn print_alignment(alignment: &Alignment, decoder: Option<&SymbolEncoder>) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["Sequence", "Aligned"]));

    for seq in alignment.sequences() {
        let shown = match decoder {
            Some(dec) => dec.decode_sequence(&seq.symbols),
            None => seq.symbols.iter().map(|&b| symbol_text(b)).collect(),
        };
        table.add_row(vec![Cell::new(&seq.id), Cell::new(shown)]);
    }
    println!("\n{}", table);
}

// Non-printable symbols show as their hex code.
fn symbol_text(b: u8) -> String {
    if b.is_ascii_graphic() {
        (b as char).to_string()
    } else {
        format!("<{:02x}>", b)
    }
}

pub fn print_score_report(score: &AlignmentScore, alignment: &Alignment, params: &ScoringParams) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(header(&["Metric", "Value"]));

    table.add_row(vec![Cell::new("Aggregate"), Cell::new(score.aggregate)]);
    table.add_row(vec![Cell::new("Gap policy"), Cell::new(format!("{:?}", params.gap_policy()))]);
    table.add_row(vec![Cell::new("Sequences"), Cell::new(score.sequences)]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(score.columns)]);
    table.add_row(vec![
        Cell::new("Total score").add_attribute(Attribute::Bold),
        num(score.total).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Normalized score"),
        match score.normalized {
            Some(v) => num(v),
            None => Cell::new("n/a (fewer than 2 sequences)").fg(Color::Yellow),
        },
    ]);
    table.add_row(vec![
        Cell::new("Non-gap cells (%)"),
        num(alignment.percentage_non_gaps()),
    ]);
    table.add_row(vec![
        Cell::new("Conserved columns (%)"),
        num(alignment.percentage_conserved_columns()),
    ]);
    println!("\n=== ALIGNMENT SCORE ===\n{}", table);

    if score.per_context.len() > 1 {
        let mut ctx = Table::new();
        ctx.load_preset(ASCII_FULL)
            .set_header(header(&["Polymer type", "Score"]));
        for (name, value) in &score.per_context {
            ctx.add_row(vec![Cell::new(name), num(*value)]);
        }
        println!("\n=== PER CONTEXT ===\n{}", ctx);
    }
}

pub fn print_source_report(path: &str, source: &ScoreSource, matrix: &SubstitutionMatrix) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(header(&["Property", "Value"]));

    let range = match source.symbol_range() {
        Some((lo, hi)) => format!("{} .. {}", symbol_label(lo), symbol_label(hi)),
        None => "empty".to_string(),
    };

    table.add_row(vec![Cell::new("Source"), Cell::new(path)]);
    table.add_row(vec![Cell::new("Lines read"), Cell::new(source.lines_read())]);
    table.add_row(vec![Cell::new("Distinct pairs"), Cell::new(matrix.pair_count())]);
    table.add_row(vec![
        Cell::new("Repeated pairs (consistent)"),
        Cell::new(source.duplicates()),
    ]);
    table.add_row(vec![
        Cell::new("Scored symbols"),
        Cell::new(matrix.scored_symbols().len()),
    ]);
    table.add_row(vec![Cell::new("Symbol range"), Cell::new(range)]);
    table.add_row(vec![Cell::new("Default score"), Cell::new(matrix.default_score())]);
    table.add_row(vec![Cell::new("Self score"), Cell::new(matrix.self_score())]);
    println!("\n=== SCORE SOURCE ===\n{}", table);
}

pub fn print_source_entries(source: &ScoreSource) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_header(header(&["Line", "Symbol A", "Symbol B", "Score", "Note"]));
    for e in source.entries() {
        table.add_row(vec![
            Cell::new(e.line),
            Cell::new(symbol_label(e.pair.symbol_a)),
            Cell::new(symbol_label(e.pair.symbol_b)),
            num(e.pair.score),
            Cell::new(e.comment.as_deref().unwrap_or("")),
        ]);
    }
    println!("{}", table);
}
