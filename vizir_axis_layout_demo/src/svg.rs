// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `vizir_axis_layout_demo`.

use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

#[derive(Debug)]
enum SvgItem {
    Rect {
        rect: Rect,
        fill: Brush,
        stroke: Option<Brush>,
    },
    Text {
        pos: Point,
        font_size: f64,
        text: String,
    },
}

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    items: Vec<SvgItem>,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn push_rect(&mut self, rect: Rect, fill: impl Into<Brush>) {
        self.items.push(SvgItem::Rect {
            rect,
            fill: fill.into(),
            stroke: None,
        });
    }

    pub(crate) fn push_outline(&mut self, rect: Rect, stroke: impl Into<Brush>) {
        self.items.push(SvgItem::Rect {
            rect,
            fill: Brush::Solid(css::BLACK.with_alpha(0.0)),
            stroke: Some(stroke.into()),
        });
    }

    pub(crate) fn push_label(&mut self, pos: Point, font_size: f64, text: impl Into<String>) {
        self.items.push(SvgItem::Text {
            pos,
            font_size,
            text: text.into(),
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        // Pad so outlines on the canvas edge are not clipped.
        let pad = 10.0;
        let view_box = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0))
            .inflate(pad, pad);
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        for item in &self.items {
            match item {
                SvgItem::Rect { rect, fill, stroke } => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                    ));
                    write_paint_attr(&mut out, "fill", fill);
                    if let Some(stroke) = stroke {
                        write_paint_attr(&mut out, "stroke", stroke);
                        out.push_str(r#" stroke-width="1""#);
                    }
                    out.push_str("/>\n");
                }
                SvgItem::Text {
                    pos,
                    font_size,
                    text,
                } => {
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="middle" text-anchor="middle">"#,
                        pos.x, pos.y, font_size
                    ));
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
