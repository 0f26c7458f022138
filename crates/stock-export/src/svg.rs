//! Minimal SVG document builder.

use std::fmt::Write;

const FONT: &str = "monospace";

pub struct SvgBuilder {
    width: u32,
    height: u32,
    content: Vec<String>,
}

impl SvgBuilder {
    /// A document with a solid background.
    pub fn new(width: u32, height: u32, background: &str) -> Self {
        Self {
            width,
            height,
            content: vec![format!(
                r#"<rect width="100%" height="100%" fill="{}" />"#,
                background
            )],
        }
    }

    pub fn text(&mut self, x: f64, y: f64, size: u32, fill: &str, body: &str) -> &mut Self {
        self.content.push(format!(
            r#"<text x="{}" y="{}" fill="{}" font-family="{}" font-size="{}">{}</text>"#,
            x,
            y,
            fill,
            FONT,
            size,
            escape(body)
        ));
        self
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) -> &mut Self {
        self.content.push(format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
            point_list(points),
            stroke,
            width
        ));
        self
    }

    /// A closed path through `points`.
    pub fn closed_path(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) -> &mut Self {
        let mut d = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{} {:.2} {:.2} ", cmd, x, y);
        }
        d.push('Z');
        self.content.push(format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
            d, stroke, width
        ));
        self
    }

    pub fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str) -> &mut Self {
        self.content.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-dasharray="5,5" />"#,
            from.0, from.1, to.0, to.1, stroke
        ));
        self
    }

    /// Wrap everything added since `mark` in a group with the given attributes.
    pub fn group_since(&mut self, mark: usize, attributes: &str) -> &mut Self {
        let inner: Vec<String> = self.content.drain(mark..).collect();
        self.content
            .push(format!("<g {}>{}</g>", attributes, inner.join("")));
        self
    }

    /// Position to pass to [`SvgBuilder::group_since`].
    pub fn mark(&self) -> usize {
        self.content.len()
    }

    pub fn build(&self) -> String {
        format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">{}</svg>"#,
            self.content.join("\n"),
            w = self.width,
            h = self.height,
        )
    }
}

fn point_list(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text content for XML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
