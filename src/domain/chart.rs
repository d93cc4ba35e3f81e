// Chart domain models
use super::table::AxisValue;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: AxisValue,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: AxisValue, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, color: Option<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id,
            name,
            color,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKind {
    Line {
        y_title: Option<String>,
        series: Vec<SeriesData>,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
    /// Square matrix indexed by `labels`; `None` where a coefficient is undefined.
    Heatmap {
        labels: Vec<String>,
        matrix: Vec<Vec<Option<f64>>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub kind: ChartKind,
}

impl ChartData {
    pub fn new(id: String, title: String, kind: ChartKind) -> Self {
        Self { id, title, kind }
    }
}
