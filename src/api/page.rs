//! Dashboard page
//!
//! Server-rendered HTML: the two controls, the warning banner, the chart
//! (drawn client-side by plotly.js from the embedded figure) and the raw
//! data table. Every control change resubmits the form, so each
//! interaction is a full recomputation on the server.

use std::fmt::Write as _;

use crate::api::state::ApiConfig;
use crate::dataset::{DateRange, DepartmentSelection};
use crate::pipeline::Rendered;

pub const WARNING_CLASS: &str = "warning";

/// Render the full dashboard for one pipeline run
pub fn render_dashboard(
    config: &ApiConfig,
    rendered: &Rendered,
) -> Result<String, serde_json::Error> {
    let figure_json = script_safe(&serde_json::to_string(&rendered.figure)?);
    let span = DateRange::for_dataset(&rendered.dataset);

    let mut html = String::with_capacity(16 * 1024);
    let _ = write!(
        html,
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="{plotly}" charset="utf-8"></script>
<style>{STYLE}</style>
</head>
<body>
<main>
"#,
        title = escape_html(&config.page_title),
        plotly = escape_html(&config.plotly_url),
    );

    if let Some(warning) = rendered.warning {
        let _ = writeln!(
            html,
            r#"<div class="{WARNING_CLASS}" role="alert">{}</div>"#,
            escape_html(warning.message())
        );
    }

    render_controls(&mut html, rendered, span);

    let _ = write!(
        html,
        r#"<h2 class="rainbow">{chart_title}</h2>
<div id="chart"></div>
<p class="meta">{count} of {total} records selected &middot; <a href="/api/v1/export?{query}">Download CSV</a></p>
"#,
        chart_title = escape_html(&rendered.figure.layout.title.text),
        count = rendered.records.len(),
        total = rendered.dataset.len(),
        query = export_query(rendered),
    );

    let _ = write!(
        html,
        r#"<script>
const figure = {figure_json};
if (figure.frames.length > 0) {{
  Plotly.newPlot("chart", figure.data, figure.layout).then(function () {{
    Plotly.addFrames("chart", figure.frames);
  }});
}} else {{
  document.getElementById("chart").textContent = "No data for the current selection.";
}}
</script>
"#
    );

    render_table(&mut html, rendered);

    html.push_str("</main>\n</body>\n</html>\n");
    Ok(html)
}

fn render_controls(html: &mut String, rendered: &Rendered, span: Option<DateRange>) {
    let min = span.map(|s| s.start().to_string()).unwrap_or_default();
    let max = span.map(|s| s.end().to_string()).unwrap_or_default();

    let _ = write!(
        html,
        r#"<form method="get" action="/" id="controls">
<fieldset>
<label>Which month-years are you interested in?</label>
<input type="date" name="from" value="{from}" min="{min}" max="{max}" onchange="this.form.submit()">
<input type="date" name="to" value="{to}" min="{min}" max="{max}" onchange="this.form.submit()">
</fieldset>
<fieldset>
<label for="department">Which departments would you like to view?</label>
<input type="hidden" name="department" value="">
<select id="department" name="department" multiple size="{size}" onchange="this.form.submit()">
"#,
        from = rendered.filter.range.start(),
        to = rendered.filter.range.end(),
        size = rendered.dataset.departments().len().max(1),
    );

    for department in rendered.dataset.departments() {
        let selected = if rendered.filter.departments.includes(department) {
            " selected"
        } else {
            ""
        };
        let name = escape_html(department);
        let _ = writeln!(html, r#"<option value="{name}"{selected}>{name}</option>"#);
    }

    html.push_str("</select>\n</fieldset>\n</form>\n");
}

fn render_table(html: &mut String, rendered: &Rendered) {
    html.push_str(
        r#"<h2 class="grey">Random Data Generated</h2>
<table>
<thead><tr><th>Department</th><th>Month_Year</th><th>Revenue</th><th>Margin(%)</th><th>Headcount</th></tr></thead>
<tbody>
"#,
    );

    for r in rendered.dataset.records() {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
            escape_html(&r.department),
            r.month,
            r.revenue,
            r.margin_percent,
            r.headcount
        );
    }

    html.push_str("</tbody>\n</table>\n");
}

/// Query string reproducing the current filter for the export link
fn export_query(rendered: &Rendered) -> String {
    let filter = &rendered.filter;
    let mut parts = vec![
        "format=csv".to_string(),
        format!("from={}", filter.range.start()),
        format!("to={}", filter.range.end()),
    ];

    if let DepartmentSelection::Only(set) = &filter.departments {
        parts.push("department=".to_string());
        parts.extend(
            set.iter()
                .map(|d| format!("department={}", urlencoding::encode(d))),
        );
    }

    escape_html(&parts.join("&"))
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON may contain `</script>` inside strings; break it up
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", sans-serif; margin: 0; color: #31333f; }
main { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
fieldset { border: none; padding: 0; margin: 0 0 1rem 0; }
label { display: block; font-size: 0.9rem; margin-bottom: 0.25rem; }
select { min-width: 14rem; }
.warning { background: #fffce7; border: 1px solid #ffe08a; color: #926c05; padding: 0.75rem 1rem; border-radius: 0.5rem; margin-bottom: 1rem; }
h2.rainbow { border-bottom: 3px solid; border-image: linear-gradient(to right, #ff4b4b, #ffbd45, #3dd56d, #1c83e1, #803df5) 1; padding-bottom: 0.25rem; }
h2.grey { border-bottom: 3px solid #d6d6d9; padding-bottom: 0.25rem; }
.meta { font-size: 0.85rem; color: #808495; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border: 1px solid #e6e9ef; padding: 0.25rem 0.5rem; text-align: right; }
th:first-child, td:first-child, th:nth-child(2), td:nth-child(2) { text-align: left; }
"#;
