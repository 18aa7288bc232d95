//! Line-chart configuration handed to the external chart renderer.
//!
//! The heatmap is drawn as a filled, decorative line chart: no legend,
//! tooltip, axes or animation. The serialized shape follows the common
//! `{type, data: {labels, datasets}, options}` layout browser chart libraries
//! accept.

use serde::{Deserialize, Serialize};

use super::HeatmapSeries;
use crate::config::ChartStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapChart {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<f64>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub data: Vec<f64>,
    pub fill: bool,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
    pub point_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: ChartPlugins,
    pub scales: ChartScales,
    pub animation: bool,
    pub interaction: ChartInteraction,
    pub elements: ChartElements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlugins {
    pub legend: Toggle,
    pub tooltip: TooltipOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: Toggle,
    pub y: Toggle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInteraction {
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartElements {
    pub line: LineElement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub border_width: f64,
}

impl HeatmapChart {
    pub fn new(series: &HeatmapSeries, style: &ChartStyle) -> Self {
        Self {
            chart_type: "line".to_string(),
            data: ChartData {
                labels: series.labels.clone(),
                datasets: vec![ChartDataset {
                    data: series.values.clone(),
                    fill: true,
                    border_color: style.border_color.clone(),
                    background_color: style.background_color.clone(),
                    tension: style.line_tension,
                    point_radius: 0,
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                plugins: ChartPlugins {
                    legend: Toggle { display: false },
                    tooltip: TooltipOptions { enabled: false },
                },
                scales: ChartScales {
                    x: Toggle { display: false },
                    y: Toggle { display: false },
                },
                animation: false,
                interaction: ChartInteraction { intersect: false },
                elements: ChartElements {
                    line: LineElement {
                        border_width: style.line_width,
                    },
                },
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
