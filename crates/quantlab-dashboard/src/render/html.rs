use std::fmt::Write;

use quantlab_core::view::{DashboardView, MetricBlock, BACKWARDATION_WARNING};

use super::{chart, PageContext, FOOTER, UNAVAILABLE_MESSAGE};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem;color:#1f2933}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #d9e2ec;padding:.4rem .6rem;text-align:left}\
th{background:#f0f4f8}\
.warning{background:#fff3c4;border-left:4px solid #f0b429;padding:.6rem}\
.error{background:#ffe3e3;border-left:4px solid #e12d39;padding:.6rem}\
.stale{color:#7b8794}\
footer{margin-top:2rem;color:#7b8794}";

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
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

fn open(out: &mut String, title: &str) {
    let title = escape(title);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><style>{STYLE}</style></head><body><h1>{title}</h1>"
    );
}

fn close(out: &mut String) {
    let _ = write!(out, "<footer><hr><p>{}</p></footer></body></html>", escape(FOOTER));
}

/// Page shown when no snapshot can be produced: title and message only.
pub fn error_page(title: &str) -> String {
    let mut out = String::new();
    open(&mut out, title);
    let _ = write!(out, "<div class=\"error\" role=\"alert\">{}</div>", escape(UNAVAILABLE_MESSAGE));
    out.push_str("</body></html>");
    out
}

pub fn dashboard_page(ctx: &PageContext<'_>) -> String {
    let v = ctx.view;
    let mut out = String::with_capacity(8 * 1024);
    open(&mut out, ctx.title);

    let _ = write!(out, "<p><strong>Data last updated:</strong> {}</p>", escape(&v.updated));
    if let Some(age) = ctx.stale_age {
        let _ = write!(
            out,
            "<p class=\"stale\">Refresh failed; showing data fetched {}s ago.</p>",
            age.as_secs()
        );
    }

    breadth_table(&mut out, v);
    metric_block(&mut out, &v.options);
    if let Some(flow) = &v.flow {
        metric_block(&mut out, flow);
    }
    metric_block(&mut out, &v.volatility);
    if v.backwardation {
        let _ = write!(
            out,
            "<div class=\"warning\" role=\"alert\">{}</div>",
            escape(BACKWARDATION_WARNING)
        );
    }
    metric_block(&mut out, &v.currencies);

    if let Some(c) = ctx.chart {
        out.push_str("<h2>Visualizations</h2>");
        out.push_str(&chart::line_chart_svg(c));
    }

    close(&mut out);
    out
}

fn breadth_table(out: &mut String, v: &DashboardView) {
    out.push_str(
        "<h2>Breadth and Momentum Data</h2><table><thead><tr>\
         <th>Index</th><th>Momentum Factor</th><th>% 52W High</th>\
         </tr></thead><tbody>",
    );
    for row in &v.breadth_rows {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.index),
            escape(&row.momentum_factor),
            escape(&row.percent_52w_high)
        );
    }
    out.push_str("</tbody></table>");
}

fn metric_block(out: &mut String, block: &MetricBlock) {
    let _ = write!(out, "<h2>{}</h2><ul>", escape(block.title));
    for line in &block.lines {
        let _ = write!(
            out,
            "<li><strong>{}:</strong> {}</li>",
            escape(line.label),
            escape(&line.value)
        );
    }
    out.push_str("</ul>");
}
