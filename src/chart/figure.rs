//! Plotly figure types
//!
//! Serializable subset of the plotly.js figure schema needed for an
//! animated bubble chart. Field names follow plotly.js exactly.

use serde::Serialize;
use serde_json::Value;

/// Complete figure: initial traces, layout and animation frames
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub frames: Vec<Frame>,
}

impl Figure {
    /// Frame names in playback order
    pub fn frame_names(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.name.as_str()).collect()
    }
}

/// One scatter trace (one department)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub legendgroup: String,
    pub showlegend: bool,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    pub textposition: &'static str,
    /// Animation group keys; plotly.js tweens points with equal ids
    pub ids: Vec<String>,
    pub marker: Marker,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub color: String,
    pub size: Vec<f64>,
    pub sizemode: &'static str,
    pub sizeref: f64,
    pub symbol: &'static str,
}

/// Chart state for one month
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Frame {
    pub name: String,
    pub data: Vec<Trace>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
    pub height: u32,
    pub updatemenus: Vec<UpdateMenu>,
    pub sliders: Vec<Slider>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Axis {
    pub title: Title,
    pub range: [f64; 2],
    pub autorange: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Legend {
    pub title: Title,
    pub tracegrouporder: &'static str,
}

/// Play/Pause button strip
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateMenu {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub direction: &'static str,
    pub showactive: bool,
    pub x: f64,
    pub y: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Button {
    pub label: String,
    pub method: &'static str,
    /// Heterogeneous plotly.js `Plotly.animate` arguments
    pub args: Value,
}

/// Frame scrubber under the plot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Slider {
    pub active: usize,
    pub x: f64,
    pub y: f64,
    pub len: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub currentvalue: CurrentValue,
    pub steps: Vec<SliderStep>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentValue {
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SliderStep {
    pub label: String,
    pub method: &'static str,
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub showarrow: bool,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Font {
    pub size: u32,
}
