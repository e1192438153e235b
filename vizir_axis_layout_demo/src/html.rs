// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report collecting the demo SVGs.

use crate::svg::escape_xml;

#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: &'static str,
    pub(crate) description: &'static str,
    pub(crate) svg: String,
    /// One line per reported layout issue, plus any demo-specific notes.
    pub(crate) notes: Vec<String>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", escape_xml(title)));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:24px;background:#f6f6f6}\
         section{background:#fff;padding:16px;margin-bottom:16px;border-radius:8px}\
         svg{border:1px dashed #bbb}ul{color:#844}</style>",
    );
    out.push_str("</head><body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_xml(title)));

    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", escape_xml(section.title)));
        out.push_str(&format!("<p>{}</p>\n", escape_xml(section.description)));
        out.push_str(&section.svg);
        if !section.notes.is_empty() {
            out.push_str("<ul>\n");
            for note in &section.notes {
                out.push_str(&format!("<li>{}</li>\n", escape_xml(note)));
            }
            out.push_str("</ul>\n");
        }
        out.push_str("</section>\n");
    }

    out.push_str("</body></html>\n");
    out
}
