//! Chart builder
//!
//! Maps filtered records to an animated bubble chart:
//! x = margin percent, y = revenue, bubble area = headcount,
//! color = department, one animation frame per month.

use serde::Deserialize;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

use super::figure::{
    Annotation, Axis, Button, CurrentValue, Figure, Font, Frame, Layout, Legend, Marker, Slider,
    SliderStep, Title, Trace, UpdateMenu,
};
use crate::dataset::{Month, Record};

/// Plotly's default qualitative palette
pub const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Chart appearance and animation settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_x_range")]
    pub x_range: [f64; 2],

    #[serde(default = "default_y_range")]
    pub y_range: [f64; 2],

    /// How long each frame is shown while playing
    #[serde(default = "default_frame_duration")]
    pub frame_duration_ms: u64,

    #[serde(default = "default_transition_duration")]
    pub transition_duration_ms: u64,

    #[serde(default = "default_easing")]
    pub easing: String,

    /// Diameter in pixels of the largest bubble
    #[serde(default = "default_max_marker")]
    pub max_marker_px: f64,

    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String {
    "Animated Scatter Plot: Revenue vs Margin by Department".to_string()
}

fn default_x_range() -> [f64; 2] {
    [0.0, 30.0]
}

fn default_y_range() -> [f64; 2] {
    [0.0, 1500.0]
}

fn default_frame_duration() -> u64 {
    1000
}

fn default_transition_duration() -> u64 {
    300
}

fn default_easing() -> String {
    "quadratic-in-out".to_string()
}

fn default_max_marker() -> f64 {
    20.0
}

fn default_height() -> u32 {
    600
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x_range: default_x_range(),
            y_range: default_y_range(),
            frame_duration_ms: default_frame_duration(),
            transition_duration_ms: default_transition_duration(),
            easing: default_easing(),
            max_marker_px: default_max_marker(),
            height: default_height(),
        }
    }
}

/// Builds figures from filtered records
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    config: ChartConfig,
}

impl ChartBuilder {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Build the animated figure
    ///
    /// Produces exactly one frame per distinct month, ascending. The
    /// initial traces are those of the first frame. Axis ranges are fixed
    /// so bubbles stay comparable between frames.
    pub fn build(&self, records: &[&Record]) -> Figure {
        let departments = departments_in_order(records);
        let colors: HashMap<&str, &str> = departments
            .iter()
            .enumerate()
            .map(|(i, d)| (*d, PALETTE[i % PALETTE.len()]))
            .collect();
        let sizeref = self.sizeref(records);

        let mut by_month: BTreeMap<Month, Vec<&Record>> = BTreeMap::new();
        for record in records {
            by_month.entry(record.month).or_default().push(record);
        }

        let frames: Vec<Frame> = by_month
            .iter()
            .map(|(month, rows)| Frame {
                name: month.label(),
                data: departments
                    .iter()
                    .filter_map(|d| self.trace(d, *month, rows, colors[d], sizeref))
                    .collect(),
            })
            .collect();

        let data = frames.first().map(|f| f.data.clone()).unwrap_or_default();
        let names: Vec<String> = frames.iter().map(|f| f.name.clone()).collect();

        tracing::debug!(
            records = records.len(),
            frames = frames.len(),
            departments = departments.len(),
            "Built chart"
        );

        Figure {
            data,
            layout: self.layout(&names),
            frames,
        }
    }

    /// Plotly `sizeref` for area sizing, scaled so the largest headcount
    /// maps to `max_marker_px`
    fn sizeref(&self, records: &[&Record]) -> f64 {
        let max = records.iter().map(|r| r.headcount).max().unwrap_or(0);
        if max == 0 || self.config.max_marker_px <= 0.0 {
            return 1.0;
        }
        2.0 * max as f64 / (self.config.max_marker_px * self.config.max_marker_px)
    }

    fn trace(
        &self,
        department: &str,
        month: Month,
        rows: &[&Record],
        color: &str,
        sizeref: f64,
    ) -> Option<Trace> {
        let rows: Vec<&&Record> = rows.iter().filter(|r| r.department == department).collect();
        if rows.is_empty() {
            return None;
        }

        Some(Trace {
            kind: "scatter",
            mode: "markers+text",
            name: department.to_string(),
            legendgroup: department.to_string(),
            showlegend: true,
            x: rows.iter().map(|r| r.margin_percent).collect(),
            y: rows.iter().map(|r| r.revenue as f64).collect(),
            text: rows.iter().map(|r| r.department.clone()).collect(),
            textposition: "middle center",
            ids: rows.iter().map(|r| r.department.clone()).collect(),
            marker: Marker {
                color: color.to_string(),
                size: rows.iter().map(|r| r.headcount as f64).collect(),
                sizemode: "area",
                sizeref,
                symbol: "circle",
            },
            hovertemplate: format!(
                "Department={}<br>Month={}<br>Margin %=%{{x:.2f}}<br>Revenue=%{{y}}<br>Headcount=%{{marker.size}}<extra></extra>",
                department, month
            ),
        })
    }

    fn layout(&self, frame_names: &[String]) -> Layout {
        let cfg = &self.config;

        let play = Button {
            label: "Play".to_string(),
            method: "animate",
            args: json!([null, {
                "frame": {"duration": cfg.frame_duration_ms, "redraw": false},
                "fromcurrent": true,
                "transition": {"duration": cfg.transition_duration_ms, "easing": cfg.easing},
            }]),
        };
        let pause = Button {
            label: "Pause".to_string(),
            method: "animate",
            args: json!([[null], {
                "frame": {"duration": 0, "redraw": false},
                "mode": "immediate",
                "transition": {"duration": 0},
            }]),
        };

        let steps = frame_names
            .iter()
            .map(|name| SliderStep {
                label: name.clone(),
                method: "animate",
                args: json!([[name], {
                    "frame": {"duration": 0, "redraw": false},
                    "mode": "immediate",
                    "fromcurrent": true,
                    "transition": {"duration": 0, "easing": "linear"},
                }]),
            })
            .collect::<Vec<_>>();

        let sliders = if steps.is_empty() {
            Vec::new()
        } else {
            vec![Slider {
                active: 0,
                x: 0.1,
                y: 0.0,
                len: 0.9,
                xanchor: "left",
                yanchor: "top",
                currentvalue: CurrentValue {
                    prefix: "Month=".to_string(),
                },
                steps,
            }]
        };

        Layout {
            title: Title::new(cfg.title.clone()),
            xaxis: Axis {
                title: Title::new("Margin %"),
                range: cfg.x_range,
                autorange: false,
            },
            yaxis: Axis {
                title: Title::new("Revenue"),
                range: cfg.y_range,
                autorange: false,
            },
            legend: Legend {
                title: Title::new("Department"),
                tracegrouporder: "normal",
            },
            height: cfg.height,
            updatemenus: vec![UpdateMenu {
                kind: "buttons",
                direction: "left",
                showactive: false,
                x: 0.1,
                y: 0.0,
                xanchor: "right",
                yanchor: "top",
                buttons: vec![play, pause],
            }],
            sliders,
            annotations: vec![Annotation {
                text: "Month: ".to_string(),
                x: 0.5,
                y: 1.15,
                xref: "paper",
                yref: "paper",
                showarrow: false,
                font: Font { size: 16 },
            }],
        }
    }
}

/// Departments in order of first appearance
fn departments_in_order<'a>(records: &[&'a Record]) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for r in records {
        if !out.contains(&r.department.as_str()) {
            out.push(r.department.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{generate, DatasetSpec, DateRange, DepartmentSelection, Filter};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn records(dataset: &crate::dataset::Dataset) -> Vec<&Record> {
        dataset.records().iter().collect()
    }

    #[test]
    fn test_one_frame_per_month() {
        let dataset = generate(&DatasetSpec::default());
        let figure = ChartBuilder::default().build(&records(&dataset));

        assert_eq!(figure.frames.len(), 12);
        assert_eq!(figure.frame_names()[0], "2023-01");
        assert_eq!(figure.frame_names()[11], "2023-12");
        for frame in &figure.frames {
            assert_eq!(frame.data.len(), 6);
        }
        assert_eq!(figure.data, figure.frames[0].data);
    }

    #[test]
    fn test_frames_match_distinct_months_of_filtered_input() {
        let dataset = generate(&DatasetSpec::default());
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 4, 30).unwrap(),
        )
        .unwrap();
        let view = Filter::new(range, DepartmentSelection::only(["HR", "IT"])).apply(&dataset);
        let figure = ChartBuilder::default().build(view.records());

        let distinct: BTreeSet<_> = view.records().iter().map(|r| r.month).collect();
        assert_eq!(figure.frames.len(), distinct.len());
        assert_eq!(figure.frame_names(), vec!["2023-02", "2023-03", "2023-04"]);
        assert_eq!(figure.layout.sliders[0].steps.len(), 3);
    }

    #[test]
    fn test_encodings() {
        let dataset = generate(&DatasetSpec::default());
        let figure = ChartBuilder::default().build(&records(&dataset));

        let hr_jan = &dataset.records()[0];
        let trace = &figure.frames[0].data[0];
        assert_eq!(trace.name, "HR");
        assert_eq!(trace.x, vec![hr_jan.margin_percent]);
        assert_eq!(trace.y, vec![hr_jan.revenue as f64]);
        assert_eq!(trace.marker.size, vec![hr_jan.headcount as f64]);
        assert_eq!(trace.ids, vec!["HR".to_string()]);
        assert_eq!(trace.text, vec!["HR".to_string()]);
    }

    #[test]
    fn test_colors_stable_across_frames() {
        let dataset = generate(&DatasetSpec::default());
        let figure = ChartBuilder::default().build(&records(&dataset));

        for frame in &figure.frames {
            for (i, trace) in frame.data.iter().enumerate() {
                assert_eq!(trace.marker.color, PALETTE[i]);
            }
        }
    }

    #[test]
    fn test_legend_follows_department_order() {
        let dataset = generate(&DatasetSpec::default());
        let figure = ChartBuilder::default().build(&records(&dataset));

        let names: Vec<&str> = figure.data.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["HR", "BU2", "BU3", "Finance", "IT", "Sales"]);

        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["layout"]["legend"]["tracegrouporder"], "normal");
    }

    #[test]
    fn test_axis_ranges_fixed() {
        let dataset = generate(&DatasetSpec::default());
        let figure = ChartBuilder::default().build(&records(&dataset));

        assert_eq!(figure.layout.xaxis.range, [0.0, 30.0]);
        assert_eq!(figure.layout.yaxis.range, [0.0, 1500.0]);
        assert!(!figure.layout.xaxis.autorange);
        assert!(!figure.layout.yaxis.autorange);

        let json = serde_json::to_value(&figure).unwrap();
        for frame in json["frames"].as_array().unwrap() {
            assert!(frame.get("layout").is_none());
        }
    }

    #[test]
    fn test_transport_controls() {
        let figure = ChartBuilder::default().build(&[]);
        let buttons = &figure.layout.updatemenus[0].buttons;
        assert_eq!(buttons.len(), 2);

        let play = &buttons[0];
        assert_eq!(play.label, "Play");
        assert!(play.args[0].is_null());
        assert_eq!(play.args[1]["frame"]["duration"], 1000);
        assert_eq!(play.args[1]["transition"]["duration"], 300);
        assert_eq!(play.args[1]["transition"]["easing"], "quadratic-in-out");
        assert_eq!(play.args[1]["fromcurrent"], true);

        let pause = &buttons[1];
        assert_eq!(pause.label, "Pause");
        assert!(pause.args[0][0].is_null());
        assert_eq!(pause.args[1]["mode"], "immediate");
        assert_eq!(pause.args[1]["frame"]["duration"], 0);
        assert_eq!(pause.args[1]["transition"]["duration"], 0);
    }

    #[test]
    fn test_empty_input() {
        let figure = ChartBuilder::default().build(&[]);
        assert!(figure.data.is_empty());
        assert!(figure.frames.is_empty());
        assert!(figure.layout.sliders.is_empty());
    }

    #[test]
    fn test_sizeref_scales_to_largest_headcount() {
        let dataset = generate(&DatasetSpec::default());
        let rows = records(&dataset);
        let figure = ChartBuilder::default().build(&rows);

        let max = rows.iter().map(|r| r.headcount).max().unwrap() as f64;
        let expected = 2.0 * max / (20.0 * 20.0);
        assert!((figure.data[0].marker.sizeref - expected).abs() < 1e-12);
    }

    #[test]
    fn test_serialized_shape() {
        let dataset = generate(&DatasetSpec::default());
        let figure = ChartBuilder::default().build(&records(&dataset));
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["data"][0]["marker"]["sizemode"], "area");
        assert_eq!(json["layout"]["updatemenus"][0]["type"], "buttons");
        assert_eq!(json["layout"]["annotations"][0]["text"], "Month: ");
        assert_eq!(json["frames"].as_array().unwrap().len(), 12);
    }
}
