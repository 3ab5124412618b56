// Chart descriptors published alongside every exported dataset.
//
// Rendering happens elsewhere; a renderer reads the manifest from the summary
// JSON and binds the named CSV columns to the chart's axes.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    StackedBar,
    Heatmap,
    Scatter,
    Pie,
    Histogram,
    Bubble,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    /// File name of the exported dataset, relative to the output directory.
    pub dataset: String,
    pub x: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: &str, dataset: &str, x: &str) -> Self {
        Self {
            title: title.to_string(),
            kind,
            dataset: dataset.to_string(),
            x: x.to_string(),
            y: None,
            color: None,
            size: None,
        }
    }

    pub fn y(mut self, field: &str) -> Self {
        self.y = Some(field.to_string());
        self
    }

    pub fn color(mut self, field: &str) -> Self {
        self.color = Some(field.to_string());
        self
    }

    pub fn size(mut self, field: &str) -> Self {
        self.size = Some(field.to_string());
        self
    }

    /// Column holding the plotted quantity: the cell colour of a heatmap, the
    /// binned axis of a histogram, `y` for every other kind.
    pub fn measure(&self) -> Option<&str> {
        match self.kind {
            ChartKind::Heatmap => self.color.as_deref(),
            ChartKind::Histogram => Some(self.x.as_str()),
            _ => self.y.as_deref(),
        }
    }

    /// Every column the chart binds, in `x, y, color, size` order.
    pub fn columns(&self) -> Vec<&str> {
        std::iter::once(self.x.as_str())
            .chain(self.y.as_deref())
            .chain(self.color.as_deref())
            .chain(self.size.as_deref())
            .collect()
    }
}
