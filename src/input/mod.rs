//! Reading a decision matrix from a delimited text file.
//!
//! The first non-comment line is the header: an identifier column name
//! followed by one name per criterion. Every following line is an
//! alternative identifier followed by its scores.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::outranking::DecisionMatrix;

/// Load a decision matrix from `path`.
///
/// `.csv` files are comma separated; anything else is tab separated.
pub fn load_matrix(path: &Path) -> Result<DecisionMatrix> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read decision matrix at {}", path.display()))?;
    let delimiter = delimiter_for(path);
    parse_matrix(&content, delimiter)
        .with_context(|| format!("Invalid decision matrix in {}", path.display()))
}

fn delimiter_for(path: &Path) -> char {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => ',',
        _ => '\t',
    }
}

/// Parse a delimited table. Blank lines and lines starting with `#` are skipped.
pub fn parse_matrix(content: &str, delimiter: char) -> Result<DecisionMatrix> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let Some((header_no, header)) = lines.next() else {
        bail!("Decision matrix is empty");
    };
    let criteria: Vec<String> = header
        .split(delimiter)
        .skip(1)
        .map(|c| c.trim().to_string())
        .collect();
    if let Some(column) = criteria.iter().position(String::is_empty) {
        bail!(
            "line {}: criterion name in column {} is empty",
            header_no,
            column + 2
        );
    }

    let mut alternatives = Vec::new();
    let mut scores = Vec::new();
    for (line_no, line) in lines {
        let mut fields = line.split(delimiter).map(str::trim);
        let id = fields.next().unwrap_or_default().to_string();
        let row = fields
            .enumerate()
            .map(|(j, field)| {
                field.parse::<f64>().with_context(|| {
                    format!(
                        "line {}: '{}' is not a number (alternative '{}', criterion '{}')",
                        line_no,
                        field,
                        id,
                        criteria.get(j).map(String::as_str).unwrap_or("?")
                    )
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        alternatives.push(id);
        scores.push(row);
    }

    Ok(DecisionMatrix::new(alternatives, criteria, scores)?)
}
