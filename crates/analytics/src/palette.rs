use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Neutral gray used for categories missing from a `ColorTable`.
pub const DEFAULT_COLOR: &str = "#cccccc";

/// Caller-supplied category → color mapping with a fallback color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTable {
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default = "default_color")]
    pub default_color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            colors: HashMap::new(),
            default_color: default_color(),
        }
    }
}

impl ColorTable {
    pub fn new(colors: HashMap<String, String>, default_color: impl Into<String>) -> Self {
        Self {
            colors,
            default_color: default_color.into(),
        }
    }

    pub fn with_color(mut self, category: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(category.into(), color.into());
        self
    }

    /// The color for `category`, or the default color if it has none.
    pub fn color_for(&self, category: &str) -> &str {
        self.colors
            .get(category)
            .map_or(self.default_color.as_str(), String::as_str)
    }
}

/// A `(position, color)` colorscale stop. Serializes as a two-element array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop(pub f64, pub String);

/// Builds a stepped colorscale with one flat band per category.
///
/// For `k` categories, `[0, 1]` is cut into `k` equal bands and category `i`
/// gets two stops, at `i/k` and `(i+1)/k`, both in its own color. A continuous
/// renderer then never blends neighbouring categories.
pub fn discrete_colorscale<S: AsRef<str>>(categories: &[S], table: &ColorTable) -> Vec<ColorStop> {
    let k = categories.len() as f64;
    categories
        .iter()
        .enumerate()
        .flat_map(|(i, category)| {
            let color = table.color_for(category.as_ref()).to_string();
            let start = i as f64 / k;
            let end = (i + 1) as f64 / k;
            [ColorStop(start, color.clone()), ColorStop(end, color)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_color_falls_back_to_default() {
        let table = ColorTable::default().with_color("Value", "#1f77b4");
        assert_eq!(table.color_for("Value"), "#1f77b4");
        assert_eq!(table.color_for("Momentum"), DEFAULT_COLOR);
    }

    #[test]
    fn two_stops_per_category_in_equal_bands() {
        let table = ColorTable::default()
            .with_color("A", "red")
            .with_color("B", "blue")
            .with_color("C", "green");
        let scale = discrete_colorscale(&["A", "B", "C"], &table);
        assert_eq!(scale.len(), 6);
        assert_eq!(scale[0], ColorStop(0.0, "red".into()));
        assert_eq!(scale[1], ColorStop(1.0 / 3.0, "red".into()));
        assert_eq!(scale[2], ColorStop(1.0 / 3.0, "blue".into()));
        assert_eq!(scale[3], ColorStop(2.0 / 3.0, "blue".into()));
        assert_eq!(scale[5], ColorStop(1.0, "green".into()));
    }

    #[test]
    fn no_categories_no_stops() {
        let empty: [&str; 0] = [];
        assert!(discrete_colorscale(&empty, &ColorTable::default()).is_empty());
    }

    #[test]
    fn stop_serializes_as_pair() {
        let json = serde_json::to_string(&ColorStop(0.5, "#000".into())).unwrap();
        assert_eq!(json, r##"[0.5,"#000"]"##);
    }
}
