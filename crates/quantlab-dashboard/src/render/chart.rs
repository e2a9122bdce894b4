//! Inline SVG line chart.

use std::fmt::Write;

use quantlab_core::view::ChartView;

use super::escape;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 240.0;
const PAD: f64 = 40.0;

pub fn line_chart_svg(c: &ChartView) -> String {
    let points = c
        .scaled(WIDTH, HEIGHT)
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x + PAD, y + PAD / 2.0))
        .collect::<Vec<_>>()
        .join(" ");

    let label = match &c.symbol {
        Some(s) => format!("{} close, last {} points", s, c.points.len()),
        None => format!("Close, last {} points", c.points.len()),
    };
    let label = escape(&label);

    let mut out = String::new();
    let _ = write!(
        out,
        "<figure><svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"{label}\" \
         width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = WIDTH + 2.0 * PAD,
        h = HEIGHT + PAD,
    );
    let _ = write!(
        out,
        "<text x=\"0\" y=\"{top}\" font-size=\"11\">{max:.2}</text>\
         <text x=\"0\" y=\"{bottom}\" font-size=\"11\">{min:.2}</text>",
        top = PAD / 2.0 + 4.0,
        bottom = HEIGHT + PAD / 2.0,
        max = c.max,
        min = c.min,
    );
    let _ = write!(
        out,
        "<polyline fill=\"none\" stroke=\"#2680c2\" stroke-width=\"2\" points=\"{points}\"/>"
    );
    let _ = write!(out, "</svg><figcaption>{label}</figcaption></figure>");
    out
}
