use serde::Serialize;

/// The visualization shapes the insights screen knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
    Scatter,
    Box,
    Line,
}

/// Which chart to draw for a result table and which columns feed it.
///
/// Each canned question declares its own spec, so selection is a plain
/// lookup instead of matching keywords in the question label. Column
/// indexes refer to the result table's column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x: usize,
    pub y: Option<usize>,
    pub color: Option<usize>,
    pub title: &'static str,
}

impl ChartSpec {
    pub const fn new(kind: ChartKind, x: usize, y: usize, title: &'static str) -> Self {
        Self {
            kind,
            x,
            y: Some(y),
            color: None,
            title,
        }
    }

    pub const fn with_color(mut self, color: usize) -> Self {
        self.color = Some(color);
        self
    }

    /// Single-axis bar chart, for questions that only produce one
    /// interesting column.
    pub const fn bar_x_only(x: usize, title: &'static str) -> Self {
        Self {
            kind: ChartKind::Bar,
            x,
            y: None,
            color: None,
            title,
        }
    }
}

impl Default for ChartSpec {
    /// The fallback for any question without a declared chart: a bar
    /// chart over the first two columns.
    fn default() -> Self {
        ChartSpec::new(ChartKind::Bar, 0, 1, "General Analysis")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bar_over_first_two_columns() {
        let spec = ChartSpec::default();
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.x, 0);
        assert_eq!(spec.y, Some(1));
        assert_eq!(spec.color, None);
    }

    #[test]
    fn serializes_kind_as_snake_case() {
        let spec = ChartSpec::new(ChartKind::Pie, 0, 1, "t");
        let json = serde_json::to_value(spec).expect("spec serializes");
        assert_eq!(json["kind"], "pie");
        assert_eq!(json["y"], 1);
    }
}
