//! Minimal SVG markup emission: a flat element list rendered into one
//! `<svg>` document. Coordinates are in final pixel space; all layout
//! happens in the plotting module.

use std::fmt::Write;

// Writing into a String cannot fail.
const FAILED_STRING_WRITE: &str = "failed to write into string buffer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Middle,
    End,
}

impl Anchor {
    fn as_svg(&self) -> &'static str {
        match self {
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Element {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        width: f64,
    },
    Polyline {
        points: Vec<[f64; 2]>,
        stroke: String,
        width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        stroke: Option<String>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: Anchor,
        size_pt: f64,
        fill: String,
        /// Rotation around (x, y), degrees clockwise.
        angle: f64,
    },
}

impl Element {
    fn render(&self, buf: &mut String) {
        match self {
            Element::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                width,
            } => write!(
                buf,
                "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" \
                 stroke=\"{stroke}\" stroke-width=\"{width}\" />"
            )
            .expect(FAILED_STRING_WRITE),
            Element::Polyline {
                points,
                stroke,
                width,
            } => {
                write!(buf, "<polyline points=\"").expect(FAILED_STRING_WRITE);
                for [x, y] in points.iter() {
                    write!(buf, "{x:.2},{y:.2} ").expect(FAILED_STRING_WRITE);
                }
                if !points.is_empty() {
                    // Remove last surplus space.
                    buf.pop();
                }
                write!(
                    buf,
                    "\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{width}\" />"
                )
                .expect(FAILED_STRING_WRITE);
            }
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
                stroke,
            } => {
                write!(
                    buf,
                    "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" \
                     fill=\"{fill}\""
                )
                .expect(FAILED_STRING_WRITE);
                if let Some(stroke) = stroke {
                    write!(buf, " stroke=\"{stroke}\"").expect(FAILED_STRING_WRITE);
                }
                write!(buf, " />").expect(FAILED_STRING_WRITE);
            }
            Element::Circle { cx, cy, r, fill } => write!(
                buf,
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{fill}\" />"
            )
            .expect(FAILED_STRING_WRITE),
            Element::Text {
                x,
                y,
                content,
                anchor,
                size_pt,
                fill,
                angle,
            } => {
                write!(
                    buf,
                    "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{}\" \
                     font-size=\"{size_pt}pt\" fill=\"{fill}\"",
                    anchor.as_svg()
                )
                .expect(FAILED_STRING_WRITE);
                if *angle != 0.0 {
                    write!(buf, " transform=\"rotate({angle:.1} {x:.2} {y:.2})\"")
                        .expect(FAILED_STRING_WRITE);
                }
                write!(buf, ">{}</text>", escape(content)).expect(FAILED_STRING_WRITE);
            }
        }
    }
}

pub fn render_document(width: u64, height: u64, elements: &[Element]) -> String {
    let mut buf = String::new();
    write!(
        buf,
        "<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" \
         xmlns=\"http://www.w3.org/2000/svg\">"
    )
    .expect(FAILED_STRING_WRITE);
    for element in elements {
        element.render(&mut buf);
    }
    buf.push_str("</svg>");
    buf
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for chr in text.chars() {
        match chr {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
