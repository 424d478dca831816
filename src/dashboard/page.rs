//! HTML page rendering
//!
//! The page works without JavaScript: the sliders sit in one GET form and
//! submitting it re-runs the whole render with the new query string. With
//! JavaScript, slider moves go over the `/ws` socket and only the affected
//! chart is redrawn.

use std::fmt::Write;

use serde_json::json;

use super::commentary::*;
use super::view::{ChartPanel, DashboardView};
use crate::dataset::{DataSample, YearBounds};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: "Source Sans Pro", system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #31333f; }
h1 { font-size: 2.2rem; }
details { border: 1px solid #e6e6e6; border-radius: 6px; padding: 0.5rem 1rem; margin: 1rem 0; }
summary { cursor: pointer; font-weight: 600; }
table { border-collapse: collapse; font-size: 0.9rem; margin-top: 0.5rem; }
th, td { border: 1px solid #e6e6e6; padding: 0.25rem 0.6rem; text-align: right; }
.range-slider { display: grid; grid-template-columns: auto 1fr auto; gap: 0.25rem 0.75rem; align-items: center; margin: 0.5rem 0; }
.range-slider label { grid-column: 1 / 4; }
.range-value { font-variant-numeric: tabular-nums; }
.chart { width: 100%; min-height: 420px; }
#status { color: #b00020; }
"#;

const SCRIPT: &str = r#"
(function () {
  var figures = JSON.parse(document.getElementById('figures').textContent);
  ['line', 'scatter'].forEach(function (kind) {
    var fig = figures[kind];
    Plotly.newPlot('chart-' + kind, fig.data, fig.layout, { responsive: true });
  });

  if (!('WebSocket' in window)) { return; }
  var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  var ws = new WebSocket(scheme + location.host + '/ws');
  var live = false;
  var status = document.getElementById('status');
  ws.onopen = function () { live = true; };
  ws.onclose = function () { live = false; };
  ws.onmessage = function (event) {
    var msg = JSON.parse(event.data);
    if (msg.type === 'chart_update') {
      status.textContent = '';
      document.querySelector('p.empty[data-chart="' + msg.chart + '"]').hidden = msg.points !== 0;
      Plotly.react('chart-' + msg.chart, msg.figure.data, msg.figure.layout);
    } else if (msg.type === 'error') {
      status.textContent = msg.message;
    }
  };

  document.querySelectorAll('.range-slider').forEach(function (group) {
    var kind = group.dataset.chart;
    var from = group.querySelector('input[name="' + kind + '_from"]');
    var to = group.querySelector('input[name="' + kind + '_to"]');
    var label = group.querySelector('.range-value');
    function changed(moved) {
      if (+from.value > +to.value) {
        if (moved === from) { to.value = from.value; } else { from.value = to.value; }
      }
      label.textContent = from.value + ' - ' + to.value;
      if (live) {
        ws.send(JSON.stringify({ type: 'set_range', chart: kind, from: +from.value, to: +to.value }));
      }
    }
    from.addEventListener('input', function () { changed(from); });
    to.addEventListener('input', function () { changed(to); });
  });
})();
"#;

/// Render the full dashboard page
pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::with_capacity(16 * 1024);
    head(&mut html, PAGE_TITLE);

    let _ = write!(html, "<h1>{}</h1>\n<p>{}</p>\n", escape_html(PAGE_TITLE), escape_html(INTRO));

    let _ = write!(
        html,
        "<details>\n<summary>{}</summary>\n{}</details>\n",
        escape_html(SAMPLE_LABEL),
        sample_table(&view.sample)
    );

    html.push_str("<form method=\"get\" action=\"/\">\n");
    html.push_str("<p id=\"status\"></p>\n");

    let _ = write!(html, "<section>\n<h3>{}</h3>\n", escape_html(LINE_HEADING));
    chart_section(&mut html, &view.line, view.bounds, LINE_SLIDER_LABEL);
    html.push_str("</section>\n");

    let _ = write!(
        html,
        "<section>\n<h3>{}</h3>\n<p>{}</p>\n",
        escape_html(SCATTER_HEADING),
        escape_html(SCATTER_BLURB)
    );
    chart_section(&mut html, &view.scatter, view.bounds, SCATTER_SLIDER_LABEL);
    html.push_str("</section>\n</form>\n");

    html.push_str("<section class=\"insights\">\n");
    html.push_str(INSIGHTS_HTML);
    html.push_str("</section>\n");

    let figures = json!({
        "line": view.line.figure(),
        "scatter": view.scatter.figure(),
    });
    let _ = write!(
        html,
        "<script type=\"application/json\" id=\"figures\">{}</script>\n<script>{}</script>\n",
        escape_script_json(&figures.to_string()),
        SCRIPT
    );

    html.push_str("</body>\n</html>\n");
    html
}

/// Render the page shown when the dataset could not be loaded
pub fn render_error_page(message: &str) -> String {
    let mut html = String::new();
    head(&mut html, PAGE_TITLE);
    let _ = write!(
        html,
        "<h1>{}</h1>\n<h3>Could not load the debt dataset</h3>\n<pre id=\"status\">{}</pre>\n</body>\n</html>\n",
        escape_html(PAGE_TITLE),
        escape_html(message)
    );
    html
}

fn head(html: &mut String, title: &str) {
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<script src=\"{}\"></script>\n<style>{}</style>\n</head>\n<body>\n",
        escape_html(title),
        PLOTLY_CDN,
        STYLE
    );
}

fn chart_section(html: &mut String, panel: &ChartPanel, bounds: Option<YearBounds>, label: &str) {
    let kind = panel.kind;
    let (min, max, disabled) = match bounds {
        Some(b) => (b.min, b.max, ""),
        None => (0, 0, " disabled"),
    };

    let _ = write!(
        html,
        "<div class=\"range-slider\" data-chart=\"{kind}\">\n\
         <label>{label}</label>\n\
         <input type=\"range\" name=\"{kind}_from\" min=\"{min}\" max=\"{max}\" value=\"{from}\"{disabled}>\n\
         <input type=\"range\" name=\"{kind}_to\" min=\"{min}\" max=\"{max}\" value=\"{to}\"{disabled}>\n\
         <span class=\"range-value\">{from} - {to}</span>\n\
         <button type=\"submit\"{disabled}>Apply</button>\n\
         </div>\n\
         <div class=\"chart\" id=\"chart-{kind}\"></div>\n",
        kind = kind,
        label = escape_html(label),
        min = min,
        max = max,
        from = panel.selection.lower,
        to = panel.selection.upper,
        disabled = disabled,
    );

    let hidden = if panel.spec.is_empty() { "" } else { " hidden" };
    let _ = writeln!(
        html,
        "<p class=\"empty\" data-chart=\"{}\"{}>No data in the selected range.</p>",
        kind, hidden
    );
}

fn sample_table(sample: &DataSample) -> String {
    if sample.rows.is_empty() {
        return "<p>The dataset is empty.</p>\n".to_string();
    }

    let mut html = String::from("<table>\n<thead><tr><th></th>");
    for col in &sample.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(col));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (i, row) in sample.rows.iter().enumerate() {
        let _ = write!(html, "<tr><th>{}</th>", i);
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Escape text for HTML element and attribute content
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

/// JSON inside a `<script>` block must not contain a closing tag
fn escape_script_json(s: &str) -> String {
    s.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardSession;
    use crate::dataset::{Dataset, Record};

    fn page_for(ds: &Dataset, session: &DashboardSession) -> String {
        render_page(&session.view(ds))
    }

    #[test]
    fn test_page_contains_all_sections() {
        let ds = Dataset::new(vec![Record::new(2008, 44.0), Record::new(2009, 60.0), Record::new(2010, 80.0)]);
        let html = page_for(&ds, &DashboardSession::new(ds.bounds()));

        assert!(html.contains("<h1>Lebanon&#39;s External Debt Visualizations</h1>"));
        assert!(html.contains("<summary>View Data Sample</summary>"));
        assert!(html.contains("Select year range for line chart:"));
        assert!(html.contains("Select year range for scatter plot:"));
        assert!(html.contains("id=\"chart-line\""));
        assert!(html.contains("id=\"chart-scatter\""));
        assert!(html.contains("<h4>Combining Both Charts:</h4>"));
        assert!(html.contains("External Debt Trend (Filtered by Year Range)"));
    }

    #[test]
    fn test_sliders_reflect_selection_and_bounds() {
        let ds = Dataset::new((1960..=2022).map(|y| Record::new(y, 1.0)).collect());
        let session = DashboardSession::from_widgets(ds.bounds(), (Some(2008), Some(2010)), (None, None));
        let html = page_for(&ds, &session);

        assert!(html.contains(r#"name="line_from" min="1960" max="2022" value="2008""#));
        assert!(html.contains(r#"name="line_to" min="1960" max="2022" value="2010""#));
        assert!(html.contains(r#"name="scatter_from" min="1960" max="2022" value="1960""#));
    }

    #[test]
    fn test_empty_range_notice() {
        let ds = Dataset::new(vec![Record::new(2008, 44.0), Record::new(2010, 80.0)]);
        let session = DashboardSession::from_widgets(ds.bounds(), (Some(2009), Some(2009)), (None, None));
        let html = page_for(&ds, &session);

        assert!(html.contains(r#"<p class="empty" data-chart="line">No data"#));
        assert!(html.contains(r#"<p class="empty" data-chart="scatter" hidden>No data"#));
        assert!(html.contains("msg.points !== 0"));
    }

    #[test]
    fn test_empty_dataset_disables_sliders() {
        let ds = Dataset::default();
        let html = page_for(&ds, &DashboardSession::new(None));
        assert!(html.contains("The dataset is empty."));
        assert!(html.contains(" disabled>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
        assert_eq!(escape_script_json(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error_page("HTTP 500 from <upstream>");
        assert!(html.contains("HTTP 500 from &lt;upstream&gt;"));
    }
}
