//! Chart widget configuration.
//!
//! Builds the configuration object the charting library expects and hands
//! it to a [`ChartBackend`] bound to a canvas.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::DOUGHNUT_PALETTE;
use crate::core::error::WidgetError;

/// Chart kinds supported by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

/// One data series.
///
/// Points are passed to the library as given: numbers, `null` gaps or
/// `{x, y}` objects. `extra` carries library styling keys (`borderColor`,
/// `tension`, ...) through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dataset {
    pub fn new<I, P>(label: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Value>,
    {
        Self {
            label: Some(Value::String(label.into())),
            data: data.into_iter().map(Into::into).collect(),
            extra: Map::new(),
        }
    }

    /// Attach a library-specific styling key.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<Value>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

/// Complete configuration passed to the charting library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

fn zero_based_options() -> ChartOptions {
    ChartOptions {
        responsive: true,
        plugins: Plugins {
            legend: Legend {
                display: Some(true),
                position: None,
            },
        },
        scales: Some(Scales {
            y: Axis { begin_at_zero: true },
        }),
    }
}

/// Responsive line chart with a visible legend and a zero-based y axis.
pub fn line_config(labels: Vec<Value>, datasets: Vec<Dataset>) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData { labels, datasets },
        options: zero_based_options(),
    }
}

/// Responsive bar chart with a visible legend and a zero-based y axis.
pub fn bar_config(labels: Vec<Value>, datasets: Vec<Dataset>) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData { labels, datasets },
        options: zero_based_options(),
    }
}

/// Responsive doughnut with the fixed slice palette and a bottom legend.
pub fn doughnut_config(labels: Vec<Value>, data: Vec<Value>) -> ChartConfig {
    let dataset = Dataset {
        label: None,
        data,
        extra: Map::new(),
    }
    .with("backgroundColor", DOUGHNUT_PALETTE.to_vec());

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels,
            datasets: vec![dataset],
        },
        options: ChartOptions {
            responsive: true,
            plugins: Plugins {
                legend: Legend {
                    display: None,
                    position: Some("bottom"),
                },
            },
            scales: None,
        },
    }
}

/// Charting library bound to canvases on the page.
pub trait ChartBackend {
    /// Live chart instance.
    type Chart;

    /// Create a chart on the canvas with the given id.
    fn render(&self, canvas_id: &str, config: &ChartConfig) -> Result<Self::Chart, WidgetError>;
}

/// Line, bar and doughnut constructors over a [`ChartBackend`].
pub struct ChartFactory<B> {
    backend: B,
}

impl<B: ChartBackend> ChartFactory<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn create_line_chart(
        &self,
        canvas_id: &str,
        labels: Vec<Value>,
        datasets: Vec<Dataset>,
    ) -> Result<B::Chart, WidgetError> {
        self.backend.render(canvas_id, &line_config(labels, datasets))
    }

    pub fn create_bar_chart(
        &self,
        canvas_id: &str,
        labels: Vec<Value>,
        datasets: Vec<Dataset>,
    ) -> Result<B::Chart, WidgetError> {
        self.backend.render(canvas_id, &bar_config(labels, datasets))
    }

    pub fn create_doughnut_chart(
        &self,
        canvas_id: &str,
        labels: Vec<Value>,
        data: Vec<Value>,
    ) -> Result<B::Chart, WidgetError> {
        self.backend.render(canvas_id, &doughnut_config(labels, data))
    }
}
