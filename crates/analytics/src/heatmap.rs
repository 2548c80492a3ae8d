use crate::palette::{ColorStop, ColorTable, discrete_colorscale};
use core_types::RankMatrix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Code stored for a label that is not in the category universe.
///
/// It sits below `zmin`, so renderers clamp it into the first category's band;
/// the cell's hover text still names the real label.
pub const UNKNOWN_CATEGORY: i32 = -1;

/// Hover text used when a cell has no usable value.
const NOT_AVAILABLE: &str = "N/A";

/// A rank matrix encoded for a continuous heatmap renderer.
///
/// Rows are ranks (row 0 is rank 1), columns are months. `z` holds the index
/// of each cell's category within `categories`; cells a month does not reach
/// and cells with no label are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankHeatmap {
    pub months: Vec<String>,
    pub rank_labels: Vec<String>,
    pub categories: Vec<String>,
    pub z: Vec<Vec<Option<i32>>>,
    pub text: Vec<Vec<String>>,
    pub colorscale: Vec<ColorStop>,
    /// Color axis bounds that put each code at the center of its band.
    pub zmin: f64,
    pub zmax: f64,
    /// Renderers that draw row 0 at the bottom must flip the y axis.
    pub reverse_y_axis: bool,
}

impl RankHeatmap {
    /// The category label behind a code, if the code is in range.
    pub fn decode(&self, code: i32) -> Option<&str> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.categories.get(i))
            .map(String::as_str)
    }

    /// The same heatmap with rows flipped, for renderers without axis reversal.
    pub fn bottom_up(&self) -> Self {
        let mut flipped = self.clone();
        flipped.z.reverse();
        flipped.text.reverse();
        flipped.rank_labels.reverse();
        flipped.reverse_y_axis = false;
        flipped
    }
}

/// Formats a fractional value as a percentage with two decimals, or `N/A`.
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Encodes `matrix` into integer codes, hover text and a stepped colorscale.
pub fn encode_rank_heatmap(matrix: &RankMatrix, colors: &ColorTable) -> RankHeatmap {
    let codes: HashMap<&str, i32> = matrix
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i as i32))
        .collect();

    let ranks = matrix.rank_count();
    let month_count = matrix.months.len().max(matrix.ranked_labels.len());

    let mut z = vec![vec![None; month_count]; ranks];
    let mut text = vec![vec![String::new(); month_count]; ranks];
    let mut unknown = 0usize;

    for month in 0..month_count {
        for rank in 0..ranks {
            let Some((label, value)) = matrix.cell(month, rank) else {
                continue;
            };
            if label.is_empty() {
                continue;
            }
            let code = codes.get(label).copied().unwrap_or_else(|| {
                unknown += 1;
                UNKNOWN_CATEGORY
            });
            z[rank][month] = Some(code);
            text[rank][month] = format!("{}: {}", label, format_pct(value));
        }
    }

    if unknown > 0 {
        tracing::warn!(unknown, "Rank matrix has labels outside the category list.");
    }

    let k = matrix.categories.len() as f64;
    RankHeatmap {
        months: matrix.months.clone(),
        rank_labels: (1..=ranks).map(|r| format!("#{r}")).collect(),
        categories: matrix.categories.clone(),
        z,
        text,
        colorscale: discrete_colorscale(&matrix.categories, colors),
        zmin: -0.5,
        zmax: k - 0.5,
        reverse_y_axis: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> RankMatrix {
        RankMatrix::new(
            vec!["2020-01".into(), "2020-02".into()],
            vec!["A".into(), "B".into(), "C".into()],
            vec![
                vec!["B".into(), "A".into(), "C".into()],
                vec!["C".into(), "Z".into()],
            ],
            vec![
                vec![Some(0.0123), Some(-0.005), None],
                vec![Some(f64::NAN), Some(0.01)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn two_category_single_month() {
        let matrix = RankMatrix::new(
            vec!["2020-01".into()],
            vec!["A".into(), "B".into()],
            vec![vec!["B".into(), "A".into()]],
            vec![vec![Some(0.02), Some(0.01)]],
        )
        .unwrap();
        let heatmap = encode_rank_heatmap(&matrix, &ColorTable::default());
        assert_eq!(heatmap.z[0][0], Some(1));
        assert_eq!(heatmap.z[1][0], Some(0));
        assert_eq!(heatmap.colorscale.len(), 4);
        assert_eq!(heatmap.zmin, -0.5);
        assert_eq!(heatmap.zmax, 1.5);
    }

    #[test]
    fn codes_round_trip_through_categories() {
        let matrix = matrix();
        let heatmap = encode_rank_heatmap(&matrix, &ColorTable::default());
        for (month, labels) in matrix.ranked_labels.iter().enumerate() {
            for (rank, label) in labels.iter().enumerate() {
                if !matrix.categories.contains(label) {
                    continue;
                }
                let code = heatmap.z[rank][month].unwrap();
                assert_eq!(heatmap.decode(code), Some(label.as_str()));
            }
        }
    }

    #[test]
    fn unknown_labels_and_missing_cells() {
        let heatmap = encode_rank_heatmap(&matrix(), &ColorTable::default());
        assert_eq!(heatmap.z[1][1], Some(UNKNOWN_CATEGORY));
        assert_eq!(heatmap.decode(UNKNOWN_CATEGORY), None);
        assert_eq!(heatmap.z[2][1], None);
        assert_eq!(heatmap.text[2][1], "");
    }

    #[test]
    fn missing_labels_are_empty_cells_not_unknown() {
        let matrix = RankMatrix::new(
            vec!["2020-01".into()],
            vec!["A".into(), "B".into()],
            vec![vec!["A".into(), String::new()]],
            vec![vec![Some(0.1), Some(0.2)]],
        )
        .unwrap();
        let heatmap = encode_rank_heatmap(&matrix, &ColorTable::default());
        assert_eq!(heatmap.z, vec![vec![Some(0)], vec![None]]);
        assert_eq!(heatmap.text[0][0], "A: 10.00%");
        assert_eq!(heatmap.text[1][0], "");
    }

    #[test]
    fn unknown_cell_keeps_label_in_text() {
        let heatmap = encode_rank_heatmap(&matrix(), &ColorTable::default());
        assert_eq!(heatmap.z[1][1], Some(UNKNOWN_CATEGORY));
        assert!(f64::from(UNKNOWN_CATEGORY) < heatmap.zmin);
        assert_eq!(heatmap.text[1][1], "Z: 1.00%");
    }

    #[test]
    fn hover_text_formats_percentages() {
        let heatmap = encode_rank_heatmap(&matrix(), &ColorTable::default());
        assert_eq!(heatmap.text[0][0], "B: 1.23%");
        assert_eq!(heatmap.text[1][0], "A: -0.50%");
        assert_eq!(heatmap.text[2][0], "C: N/A");
        assert_eq!(heatmap.text[0][1], "C: N/A");
    }

    #[test]
    fn colorscale_follows_palette() {
        let colors = ColorTable::default().with_color("A", "#111111");
        let heatmap = encode_rank_heatmap(&matrix(), &colors);
        assert_eq!(heatmap.colorscale[0].1, "#111111");
        assert_eq!(heatmap.colorscale[2].1, crate::palette::DEFAULT_COLOR);
    }

    #[test]
    fn rank_one_is_top_row() {
        let heatmap = encode_rank_heatmap(&matrix(), &ColorTable::default());
        assert_eq!(heatmap.rank_labels, vec!["#1", "#2", "#3"]);
        assert!(heatmap.reverse_y_axis);

        let flipped = heatmap.bottom_up();
        assert_eq!(flipped.rank_labels, vec!["#3", "#2", "#1"]);
        assert_eq!(flipped.z[2][0], Some(1));
        assert!(!flipped.reverse_y_axis);
    }

    #[test]
    fn format_pct_handles_missing_values() {
        assert_eq!(format_pct(Some(0.1)), "10.00%");
        assert_eq!(format_pct(None), "N/A");
        assert_eq!(format_pct(Some(f64::INFINITY)), "N/A");
    }
}
