use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::outranking::{AlternativeScore, ColumnSummary, Table};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// How a table cell is printed.
pub trait CellDisplay: Copy {
    fn render(self, precision: usize) -> String;

    /// Whether the cell should be emphasised in colour output.
    fn is_marked(self) -> bool {
        false
    }
}

impl CellDisplay for f64 {
    fn render(self, precision: usize) -> String {
        format!("{:.*}", precision, self)
    }
}

impl CellDisplay for bool {
    fn render(self, _precision: usize) -> String {
        let digit = if self { "1" } else { "0" };
        digit.to_string()
    }

    fn is_marked(self) -> bool {
        self
    }
}

/// Format a labelled table with right-aligned columns.
///
/// Column headers are shortened when the table would not fit the terminal;
/// piped output is never truncated.
pub fn format_table<T: CellDisplay>(table: &Table<T>, precision: usize, use_colors: bool) -> String {
    let separator = "  ";
    let label_width = table.rows().iter().map(|r| r.chars().count()).max().unwrap_or(0);

    let rendered: Vec<Vec<String>> = (0..table.n_rows())
        .map(|i| table.row(i).iter().map(|cell| cell.render(precision)).collect())
        .collect();
    let cell_widths: Vec<usize> = (0..table.n_columns())
        .map(|j| rendered.iter().map(|row| row[j].len()).max().unwrap_or(0))
        .collect();

    let mut headers: Vec<String> = table.columns().iter().map(str::to_string).collect();
    let full_width = |headers: &[String]| -> usize {
        label_width
            + headers
                .iter()
                .zip(&cell_widths)
                .map(|(h, w)| separator.len() + h.chars().count().max(*w))
                .sum::<usize>()
    };
    if let Some(term_width) = get_terminal_width() {
        if full_width(&headers) > term_width {
            headers = headers
                .iter()
                .zip(&cell_widths)
                .map(|(h, w)| truncate_label(h, (*w).max(6)))
                .collect();
        }
    }
    let widths: Vec<usize> = headers
        .iter()
        .zip(&cell_widths)
        .map(|(h, w)| h.chars().count().max(*w))
        .collect();

    let mut lines = Vec::with_capacity(table.n_rows() + 1);

    let header_line: String = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{}{:>width$}", separator, h, width = w))
        .collect();
    let header_line = format!("{:width$}{}", "", header_line, width = label_width);
    lines.push(if use_colors {
        header_line.bold().to_string()
    } else {
        header_line
    });

    for (i, label) in table.rows().iter().enumerate() {
        let label_padded = format!("{:<width$}", label, width = label_width);
        let mut line = if use_colors {
            label_padded.cyan().to_string()
        } else {
            label_padded
        };
        for (j, text) in rendered[i].iter().enumerate() {
            let padded = format!("{:>width$}", text, width = widths[j]);
            line.push_str(separator);
            if use_colors && table.at(i, j).is_marked() {
                line.push_str(&padded.green().bold().to_string());
            } else {
                line.push_str(&padded);
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Format ranked alternatives, one per line:
/// index, identifier, outranks count, outranked-by count.
/// Alternatives in `kernel` (outranked by nobody) are marked with `*`.
pub fn format_ranking(ranked: &[AlternativeScore], kernel: &[String], use_colors: bool) -> String {
    if ranked.is_empty() {
        return "No alternatives found.".to_string();
    }

    let term_width = get_terminal_width();
    let id_width = ranked.iter().map(|s| s.alternative.chars().count()).max().unwrap_or(0);
    // " 1. " + "  outranks NN  outranked by NN" + marker
    let fixed_width = 4 + 32 + 2;
    let id_width = match term_width {
        Some(width) if width > fixed_width + 10 => id_width.min(width - fixed_width),
        Some(_) => id_width.min(20),
        None => id_width,
    };

    ranked
        .iter()
        .enumerate()
        .map(|(idx, score)| {
            let index_str = format!("{:>2}.", idx + 1);
            let marker = if kernel.contains(&score.alternative) { "*" } else { " " };
            let id = format!(
                "{:<width$}",
                truncate_label(&score.alternative, id_width),
                width = id_width
            );
            let counts = format!(
                "outranks {:>2}  outranked by {:>2}",
                score.outranks, score.outranked_by
            );

            if use_colors {
                format!(
                    "{} {}{}  {}",
                    index_str.dimmed(),
                    id.bold(),
                    marker.yellow(),
                    counts
                )
            } else {
                format!("{} {}{}  {}", index_str, id, marker, counts)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked alternatives as tab-separated values for scripting
/// Columns: alternative, outranks, outranked_by (no headers, no colors)
pub fn format_tsv(ranked: &[AlternativeScore]) -> String {
    ranked
        .iter()
        .map(|s| format!("{}\t{}\t{}", s.alternative, s.outranks, s.outranked_by))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Side-by-side column statistics before and after normalization.
pub fn format_summaries(before: &[ColumnSummary], after: &[ColumnSummary], use_colors: bool) -> String {
    if before.is_empty() {
        return "No criteria found.".to_string();
    }

    let name_width = before
        .iter()
        .map(|s| s.criterion.chars().count())
        .max()
        .unwrap_or(0)
        .max("criterion".len());
    let stats = |s: &ColumnSummary| {
        format!(
            "{:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            s.min, s.max, s.mean, s.std
        )
    };
    let title = format!(
        "{:<name$}  {:>43}  |  {:>43}",
        "criterion",
        "raw: min max mean std",
        "normalized: min max mean std",
        name = name_width
    );

    let mut lines = vec![if use_colors { title.bold().to_string() } else { title }];
    for (raw, norm) in before.iter().zip(after) {
        let name = format!("{:<width$}", raw.criterion, width = name_width);
        let name = if use_colors { name.cyan().to_string() } else { name };
        lines.push(format!("{}  {}  |  {}", name, stats(raw), stats(norm)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outranking::{BinaryMatrix, PairwiseMatrix};

    fn score(alternative: &str, outranks: usize, outranked_by: usize) -> AlternativeScore {
        AlternativeScore {
            alternative: alternative.to_string(),
            outranks,
            outranked_by,
        }
    }

    // truncate_label tests
    #[test]
    fn test_truncate_label_short() {
        assert_eq!(truncate_label("battery", 20), "battery");
    }

    #[test]
    fn test_truncate_label_long() {
        assert_eq!(truncate_label("battery capacity (mAh)", 10), "battery...");
    }

    #[test]
    fn test_truncate_label_very_narrow() {
        assert_eq!(truncate_label("battery", 3), "bat");
    }

    // format_table tests
    #[test]
    fn test_format_table_real_cells() {
        let matrix = PairwiseMatrix::from_rows(["a", "bb"], vec![vec![0.0, 0.25], vec![0.75, 0.0]]).unwrap();
        let result = format_table(&*matrix, 2, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("bb"));
        assert!(lines[1].starts_with("a "));
        assert!(lines[1].contains("0.25"));
        assert!(lines[2].starts_with("bb"));
        assert!(lines[2].contains("0.75"));
    }

    #[test]
    fn test_format_table_binary_cells() {
        let matrix = BinaryMatrix::from_rows(["x", "y"], vec![vec![false, true], vec![false, false]]).unwrap();
        let result = format_table(&*matrix, 3, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines[1], "x  0  1");
        assert_eq!(lines[2], "y  0  0");
    }

    // format_ranking tests
    #[test]
    fn test_format_ranking_empty() {
        assert_eq!(format_ranking(&[], &[], false), "No alternatives found.");
    }

    #[test]
    fn test_format_ranking_marks_kernel() {
        let ranked = vec![score("B", 1, 0), score("C", 0, 1)];
        let result = format_ranking(&ranked, &["B".to_string()], false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1. B*"));
        assert!(lines[0].contains("outranks  1  outranked by  0"));
        assert!(lines[1].starts_with(" 2. C "));
    }

    // format_tsv tests
    #[test]
    fn test_format_tsv() {
        let ranked = vec![score("B", 1, 0), score("A", 0, 0)];
        assert_eq!(format_tsv(&ranked), "B\t1\t0\nA\t0\t0");
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_format_summaries() {
        let raw = ColumnSummary {
            criterion: "price".to_string(),
            min: 200.0,
            max: 600.0,
            mean: 375.0,
            std: 147.9,
        };
        let norm = ColumnSummary {
            criterion: "price".to_string(),
            min: 0.0,
            max: 1.0,
            mean: 0.5625,
            std: 0.37,
        };
        let result = format_summaries(&[raw], &[norm], false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("price"));
        assert!(lines[1].contains("600.000"));
        assert!(lines[1].contains("0.562") || lines[1].contains("0.563"));
    }
}
