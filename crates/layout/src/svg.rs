//! Standalone SVG rendering of a [`ChartFrame`].

use std::fmt::Write;

use salesperf_core::{AnnotationDecision, BoxBounds};

use crate::chart::ChartFrame;

pub const BOP_COLOR: &str = "#23299E";
pub const SH_COLOR: &str = "#4EB1FF";
pub const SP_COLOR: &str = "#FA7B25";
const GRID_COLOR: &str = "#E5E7EB";
const AXIS_TEXT_COLOR: &str = "#6B7280";
const TITLE_COLOR: &str = "#111827";

/// Render a laid-out chart as an SVG document.
pub fn render_svg(frame: &ChartFrame) -> String {
    let mut out = String::new();
    let plot = frame.plot;
    let right = plot.x + plot.width;
    let axis_text = format!(r#"font-size="10" fill="{}""#, AXIS_TEXT_COLOR);

    let _ = writeln!(
        out,
        r#"<svg xmlns="{}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{}">"#,
        "http://www.w3.org/2000/svg",
        "sans-serif",
        w = frame.width,
        h = frame.height,
    );
    let _ = writeln!(
        out,
        r#"  <rect width="{}" height="{}" fill="white"/>"#,
        frame.width, frame.height
    );
    let title_attrs = format!(r#"font-size="16" font-weight="bold" fill="{}""#, TITLE_COLOR);
    text(&mut out, plot.x, 24.0, &title_attrs, &frame.title);

    // Legend
    let legend = [("BOP", BOP_COLOR), ("SH", SH_COLOR), ("SP", SP_COLOR)];
    for (i, (name, color)) in legend.iter().enumerate() {
        let x = plot.x + i as f64 * 70.0;
        let swatch = BoxBounds {
            x,
            y: 40.0,
            width: 10.0,
            height: 10.0,
        };
        rect(&mut out, &swatch, &format!(r#"fill="{}""#, color));
        let attrs = format!(r#"font-size="11" fill="{}""#, AXIS_TEXT_COLOR);
        text(&mut out, x + 14.0, 49.0, &attrs, name);
    }

    // Grid and axis ticks
    for tick in &frame.volume_ticks {
        let _ = writeln!(
            out,
            r#"  <line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" {}/>"#,
            plot.x,
            right,
            GRID_COLOR,
            r#"stroke-dasharray="3 3""#,
            y = tick.position,
        );
        let attrs = format!(r#"{} text-anchor="end" dominant-baseline="middle""#, axis_text);
        text(&mut out, plot.x - 6.0, tick.position, &attrs, &tick.text);
    }
    for tick in &frame.ratio_ticks {
        let attrs = format!(r#"{} dominant-baseline="middle""#, axis_text);
        text(&mut out, right + 6.0, tick.position, &attrs, &tick.text);
    }

    // Bars with native hover tooltips
    let label_attrs = format!(r#"{} text-anchor="middle""#, axis_text);
    for column in &frame.columns {
        let _ = writeln!(out, "  <g>");
        let _ = writeln!(out, "    <title>{}</title>", escape(&column.tooltip.join("\n")));
        for (bar, color) in [(column.primary_bar, BOP_COLOR), (column.secondary_bar, SH_COLOR)] {
            if let Some(b) = bar {
                rect(&mut out, &b, &format!(r#"fill="{}""#, color));
            }
        }
        text(&mut out, column.center_x, plot.bottom() + 16.0, &label_attrs, &column.label);
        let _ = writeln!(out, "  </g>");
    }

    // Ratio line, broken at absent values
    for segment in &frame.ratio_segments {
        let points: Vec<String> =
            segment.iter().map(|(x, y)| format!("{:.1},{:.1}", x, y)).collect();
        let _ = writeln!(
            out,
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            points.join(" "),
            SP_COLOR
        );
    }
    for (x, y) in frame.columns.iter().filter_map(|c| c.ratio_point) {
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
            x, y, SP_COLOR
        );
    }

    // Annotations drawn last so they sit above the line
    let style = &frame.label_style;
    let box_attrs = format!(r#"rx="{r}" ry="{r}" fill="black""#, r = style.corner_radius);
    let text_attrs = format!(
        r#"font-size="{}" fill="white" text-anchor="middle" dominant-baseline="middle""#,
        style.font_size
    );
    for column in &frame.columns {
        if let AnnotationDecision::Draw {
            bounds,
            text: label,
            text_x,
            text_y,
        } = &column.annotation
        {
            rect(&mut out, bounds, &box_attrs);
            text(&mut out, *text_x, *text_y, &text_attrs, label);
        }
    }

    out.push_str("</svg>\n");
    out
}

fn rect(out: &mut String, b: &BoxBounds, attrs: &str) {
    let _ = writeln!(
        out,
        r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" {}/>"#,
        b.x, b.y, b.width, b.height, attrs
    );
}

fn text(out: &mut String, x: f64, y: f64, attrs: &str, content: &str) {
    let _ = writeln!(
        out,
        r#"  <text x="{:.1}" y="{:.1}" {}>{}</text>"#,
        x,
        y,
        attrs,
        escape(content)
    );
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
