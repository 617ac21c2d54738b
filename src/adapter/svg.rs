//! Standalone SVG rendition of one evaluated frame.
//!
//! Good enough for previews and golden checks; blur is approximated with one Gaussian filter
//! per shape and glow with a drop shadow.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::eval::{EvaluatedFrame, EvaluatedLayer};
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::math::finite_or_zero;
use crate::layers::record::{Element, RenderRecord};

/// Background painted under every layer.
pub const BACKGROUND: Color = Color::rgb(0x05, 0x05, 0x10);

pub fn render_svg(frame: &EvaluatedFrame, canvas: Canvas) -> String {
    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    let _ = writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        BACKGROUND.to_hex_rgb()
    );
    for layer in &frame.layers {
        write_layer(&mut out, layer, canvas);
    }
    out.push_str("</svg>\n");
    out
}

fn write_layer(out: &mut String, layer: &EvaluatedLayer, canvas: Canvas) {
    let _ = writeln!(
        out,
        r#"<g id="{}" data-kind="{}" opacity="{}">"#,
        escape(&layer.id),
        layer.kind,
        num(layer.opacity)
    );
    for (i, rec) in layer.records.iter().enumerate() {
        let def_id = format!("{}-{i}", escape(&layer.id));
        match rec.element {
            Element::Flash => write_flash(out, rec, &def_id, canvas),
            Element::Shape => write_shape(out, rec, &def_id),
            Element::Bar | Element::BarMirror => write_bar(out, rec, &def_id),
            Element::Dot => write_dot(out, rec),
            Element::Ring => write_ring(out, rec),
            Element::Waveform => write_waveform(out, rec, &def_id),
        }
    }
    out.push_str("</g>\n");
}

fn write_flash(out: &mut String, rec: &RenderRecord, id: &str, canvas: Canvas) {
    let (fill, _) = paint(rec, "color");
    let opacity = get(rec, "opacity");
    let extent = get(rec, "extent");
    let _ = writeln!(
        out,
        r#"<defs><radialGradient id="{id}" cx="50%" cy="50%" r="50%"><stop offset="0" stop-color="{fill}" stop-opacity="{o}"/><stop offset="{e}" stop-color="{fill}" stop-opacity="0"/></radialGradient></defs>"#,
        o = num(opacity),
        e = num(extent)
    );
    let _ = writeln!(
        out,
        r#"<rect width="{}" height="{}" fill="url(#{id})"/>"#,
        canvas.width, canvas.height
    );
}

fn write_shape(out: &mut String, rec: &RenderRecord, id: &str) {
    let (fill, alpha) = paint(rec, "color");
    let size = get(rec, "size");
    let half = size / 2.0;
    let _ = writeln!(
        out,
        r#"<defs><filter id="{id}" x="-100%" y="-100%" width="300%" height="300%"><feGaussianBlur stdDeviation="{}"/></filter></defs>"#,
        num(get(rec, "blur") / 2.0)
    );
    let body = match rec.get_text("shape").unwrap_or("circle") {
        "diamond" => format!(
            r#"<polygon points="0,{n} {h},0 0,{h} {n},0""#,
            h = num(half),
            n = num(-half)
        ),
        "triangle" => format!(
            r#"<polygon points="0,{n} {h},{h} {n},{h}""#,
            h = num(half),
            n = num(-half)
        ),
        _ => format!(r#"<circle r="{}""#, num(half)),
    };
    let _ = writeln!(
        out,
        r#"{body} transform="translate({} {}) rotate({}) scale({})" fill="{fill}" opacity="{}" filter="url(#{id})"/>"#,
        num(get(rec, "x")),
        num(get(rec, "y")),
        num(get(rec, "rotation_deg")),
        num(get(rec, "scale")),
        num(get(rec, "opacity") * alpha)
    );
}

fn write_bar(out: &mut String, rec: &RenderRecord, id: &str) {
    let (start, start_alpha) = paint(rec, "color_start");
    let (end, end_alpha) = paint(rec, "color_end");
    let (y1, y2) = if rec.element == Element::BarMirror {
        (0, 1)
    } else {
        (1, 0)
    };
    let _ = writeln!(
        out,
        r#"<defs><linearGradient id="{id}" x1="0" y1="{y1}" x2="0" y2="{y2}"><stop offset="0" stop-color="{start}" stop-opacity="{}"/><stop offset="1" stop-color="{end}" stop-opacity="{}"/></linearGradient></defs>"#,
        num(start_alpha),
        num(end_alpha)
    );
    let glow = rec.get_num("glow").unwrap_or(0.0);
    let filter = if glow > 0.0 {
        format!(
            r#" style="filter: drop-shadow(0 0 {}px {start})""#,
            num(glow)
        )
    } else {
        String::new()
    };
    let _ = writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="url(#{id})" opacity="{}"{filter}/>"#,
        num(get(rec, "x")),
        num(get(rec, "y")),
        num(get(rec, "width")),
        num(get(rec, "height")),
        num(get(rec, "corner_radius")),
        num(get(rec, "opacity"))
    );
}

fn write_dot(out: &mut String, rec: &RenderRecord) {
    let (fill, alpha) = paint(rec, "color");
    let _ = writeln!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}" opacity="{}" style="filter: drop-shadow(0 0 {}px {fill})"/>"#,
        num(get(rec, "x")),
        num(get(rec, "y")),
        num(get(rec, "size") / 2.0),
        num(get(rec, "opacity") * alpha),
        num(get(rec, "glow"))
    );
}

fn write_ring(out: &mut String, rec: &RenderRecord) {
    let (stroke, alpha) = paint(rec, "color");
    let cx = get(rec, "cx");
    let cy = get(rec, "cy");
    let dash = rec
        .get_text("dash")
        .map(|d| format!(r#" stroke-dasharray="{}""#, escape(d)))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        r#"<circle cx="{x}" cy="{y}" r="{}" fill="none" stroke="{stroke}" stroke-width="{}" opacity="{}" transform="rotate({} {x} {y})"{dash}/>"#,
        num(get(rec, "radius")),
        num(get(rec, "stroke_width")),
        num(get(rec, "opacity") * alpha),
        num(get(rec, "rotation_deg")),
        x = num(cx),
        y = num(cy)
    );
}

fn write_waveform(out: &mut String, rec: &RenderRecord, id: &str) {
    let (start, _) = paint(rec, "color_start");
    let (end, _) = paint(rec, "color_end");
    let _ = writeln!(
        out,
        r#"<defs><linearGradient id="{id}" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{start}"/><stop offset="1" stop-color="{end}"/></linearGradient></defs>"#
    );
    let _ = writeln!(
        out,
        r#"<path d="{}" fill="url(#{id})" fill-opacity="{}" stroke="url(#{id})" stroke-width="{}" opacity="{}" style="filter: drop-shadow(0 0 {}px {start})"/>"#,
        rec.get_text("d").unwrap_or(""),
        num(get(rec, "fill_opacity")),
        num(get(rec, "stroke_width")),
        num(get(rec, "opacity")),
        num(get(rec, "glow"))
    );
}

fn get(rec: &RenderRecord, key: &str) -> f64 {
    rec.get_num(key).unwrap_or(0.0)
}

/// Split a record color into an SVG-safe `#RRGGBB` and its alpha in `[0, 1]`.
fn paint(rec: &RenderRecord, key: &str) -> (String, f64) {
    let c = rec
        .get_text(key)
        .and_then(|s| Color::from_str(s).ok())
        .unwrap_or(Color::WHITE);
    (c.to_hex_rgb(), f64::from(c.a) / 255.0)
}

fn num(v: f64) -> String {
    let s = format!("{:.3}", finite_or_zero(v));
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" || s == "-0" {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../../tests/unit/adapter/svg.rs"]
mod tests;
