use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    utils::TAG_SEPARATOR,
    TagDifficulty,
};

pub const DEFAULT_CHART_LIMIT: usize = 25;
const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub full_tag: String,
}

/// The `limit` hardest groups, labelled by their last tag segment.
pub fn chart_points(results: &[TagDifficulty], limit: usize) -> Vec<ChartPoint> {
    results
        .iter()
        .take(limit)
        .map(|row| ChartPoint {
            label: row.tag.rsplit(TAG_SEPARATOR).next().unwrap_or(row.tag.as_str()).to_string(),
            value: row.difficulty,
            full_tag: row.tag.clone(),
        })
        .collect()
}

/// Horizontal bar chart on a fixed 0-100% axis.
pub fn render_bars(points: &[ChartPoint]) -> String {
    let label_width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for point in points {
        let filled = ((point.value.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{:<width$} |{}{}| {:>5.1}%\n",
            point.label,
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            point.value,
            width = label_width
        ));
    }
    out
}
