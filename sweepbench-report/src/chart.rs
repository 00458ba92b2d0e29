//! SVG Line Chart
//!
//! Latency (ms) against input size, one line per strategy. Failed points are
//! absent from the numeric series, so a strategy that starts failing simply
//! stops early. The y axis runs from 0 to `ceil(max * 1.2 + 1)`.

use crate::report::Report;
use std::fmt::Write;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 190.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICKS: usize = 5;

const PALETTE: [&str; 8] = [
    "#d62728", "#1f77b4", "#2ca02c", "#ff7f0e", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Chart labels and dimensions
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Title drawn above the plot
    pub title: String,
    /// Horizontal axis label
    pub x_label: String,
    /// Vertical axis label
    pub y_label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Execution Time vs Input Size".to_string(),
            x_label: "Input length (n)".to_string(),
            y_label: "Time (ms)".to_string(),
            width: 1000,
            height: 500,
        }
    }
}

/// Upper bound of the y axis for a given maximum latency
pub fn y_axis_max(max_ms: f64) -> f64 {
    (max_ms * 1.2 + 1.0).ceil()
}

struct Scale {
    x_min: f64,
    x_span: f64,
    y_max: f64,
    plot_w: f64,
    plot_h: f64,
}

impl Scale {
    fn x(&self, size: f64) -> f64 {
        MARGIN_LEFT + (size - self.x_min) / self.x_span * self.plot_w
    }

    fn y(&self, ms: f64) -> f64 {
        MARGIN_TOP + self.plot_h - ms / self.y_max * self.plot_h
    }
}

/// Render the report as a standalone SVG document
pub fn generate_svg_chart(report: &Report, options: &ChartOptions) -> String {
    let width = f64::from(options.width);
    let height = f64::from(options.height);

    let x_min = report.sizes.iter().copied().min().unwrap_or(0) as f64;
    let x_max = report.sizes.iter().copied().max().unwrap_or(1) as f64;
    let scale = Scale {
        x_min,
        x_span: (x_max - x_min).max(1.0),
        y_max: y_axis_max(report.max_elapsed_ms()),
        plot_w: (width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
        plot_h: (height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
    };
    let bottom = MARGIN_TOP + scale.plot_h;
    let right = MARGIN_LEFT + scale.plot_w;

    let mut svg = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = options.width,
        h = options.height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="28" text-anchor="middle" font-size="18">{}</text>"#,
        MARGIN_LEFT + scale.plot_w / 2.0,
        escape_xml(&options.title)
    );

    // Grid and tick labels
    for i in 0..=TICKS {
        let frac = i as f64 / TICKS as f64;

        let ms = scale.y_max * frac;
        let y = scale.y(ms);
        let _ = writeln!(
            svg,
            r##"<line x1="{:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="#e0e0e0"/>"##,
            MARGIN_LEFT
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="12">{}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            format_tick(ms)
        );

        let size = scale.x_min + scale.x_span * frac;
        let x = scale.x(size);
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
            bottom + 18.0,
            format_tick(size)
        );
    }

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{bottom:.1}" x2="{right:.1}" y2="{bottom:.1}" stroke="black"/>"#,
        l = MARGIN_LEFT
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{bottom:.1}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14">{}</text>"#,
        MARGIN_LEFT + scale.plot_w / 2.0,
        height - 15.0,
        escape_xml(&options.x_label)
    );
    let _ = writeln!(
        svg,
        r#"<text x="20" y="{cy:.1}" text-anchor="middle" font-size="14" transform="rotate(-90 20 {cy:.1})">{}</text>"#,
        escape_xml(&options.y_label),
        cy = MARGIN_TOP + scale.plot_h / 2.0
    );

    // Series
    for (index, series) in report.series.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let coords: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (scale.x(p.size as f64), scale.y(p.elapsed_ms)))
            .collect();

        if coords.len() >= 2 {
            let path: Vec<String> = coords
                .iter()
                .map(|(x, y)| format!("{:.1},{:.1}", x, y))
                .collect();
            let _ = writeln!(
                svg,
                r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{}"/>"#,
                path.join(" ")
            );
        }
        for (x, y) in &coords {
            let _ = writeln!(
                svg,
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="3.5" fill="{color}"/>"#
            );
        }

        // Legend
        let ly = MARGIN_TOP + 10.0 + index as f64 * 22.0;
        let lx = right + 20.0;
        let failed = report
            .points
            .iter()
            .filter(|p| p.strategy == series.strategy && p.failure.is_some())
            .count();
        let label = if failed > 0 {
            format!("{} ({} ERR)", series.strategy, failed)
        } else {
            series.strategy.clone()
        };
        let _ = writeln!(
            svg,
            r#"<rect x="{lx:.1}" y="{:.1}" width="14" height="4" fill="{color}"/>"#,
            ly - 2.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="13">{}</text>"#,
            lx + 20.0,
            ly + 4.0,
            escape_xml(&label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn format_tick(value: f64) -> String {
    if value >= 100.0 {
        format!("{:.0}", value)
    } else if value >= 10.0 || value == value.trunc() {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
