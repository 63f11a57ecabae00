use crate::core::TagDifficulty;

pub const HEADERS: [&str; 4] = ["Sub-Tag Group", "Median Difficulty", "Card Count", "Metric"];
pub const NO_CARDS_MESSAGE: &str = "No reviewed, non-suspended cards found for this tag.";

pub fn format_difficulty(difficulty: f64) -> String {
    format!("{:.1}%", difficulty)
}

pub fn table_row(row: &TagDifficulty) -> [String; 4] {
    [
        row.tag.clone(),
        format_difficulty(row.difficulty),
        row.card_count.to_string(),
        row.metric_used.clone(),
    ]
}

/// Plain-text table with columns padded to their widest cell.
pub fn render_table(results: &[TagDifficulty]) -> String {
    if results.is_empty() {
        return format!("{NO_CARDS_MESSAGE}\n");
    }

    let rows: Vec<[String; 4]> = results.iter().map(table_row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(String::from);
    for line in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = line
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(column, (cell, &width))| {
                // Numeric columns align right.
                if column == 1 || column == 2 {
                    format!("{:>width$}", cell)
                } else {
                    format!("{:<width$}", cell)
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}
