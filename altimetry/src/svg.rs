//! SVG serialization of a [VectorDocument].
//!
//! Output is deterministic: primitives are written in document order,
//! coordinates with a fixed number of decimals, and attributes in a
//! fixed order.

use crate::{Primitive, Stroke, TextStyle, VectorDocument};
use htmlize::{escape_attribute, escape_text};
use std::fmt::{self, Display, Formatter, Write};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serializes `doc`, writing coordinates with `precision` decimals.
pub fn to_svg(doc: &VectorDocument, precision: usize) -> String {
    Svg { doc, precision }.to_string()
}

struct Svg<'a> {
    doc: &'a VectorDocument,
    precision: usize,
}

impl Display for Svg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { doc, precision } = *self;
        let fixed = |value| Fixed(value, precision);

        writeln!(f, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
        writeln!(
            f,
            r#"<svg xmlns="{SVG_NAMESPACE}" version="2.0" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = Plain(doc.width),
            h = Plain(doc.height),
        )?;
        for primitive in doc.primitives() {
            f.write_str("  ")?;
            match primitive {
                Primitive::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    write!(
                        f,
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        fixed(*x),
                        fixed(*y),
                        fixed(*width),
                        fixed(*height)
                    )?;
                    write_fill(f, fill.as_deref())?;
                    match stroke {
                        Some(stroke) => write_stroke(f, stroke)?,
                        None => f.write_str(r#" stroke="none""#)?,
                    }
                    f.write_str(" />")?;
                }
                Primitive::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                } => {
                    write!(
                        f,
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                        fixed(*x1),
                        fixed(*y1),
                        fixed(*x2),
                        fixed(*y2)
                    )?;
                    write_stroke(f, stroke)?;
                    f.write_str(" />")?;
                }
                Primitive::Polyline {
                    points,
                    fill,
                    stroke,
                } => {
                    f.write_str(r#"<polyline points=""#)?;
                    for (idx, (x, y)) in points.iter().enumerate() {
                        if idx > 0 {
                            f.write_char(' ')?;
                        }
                        write!(f, "{},{}", fixed(*x), fixed(*y))?;
                    }
                    f.write_char('"')?;
                    write_fill(f, fill.as_deref())?;
                    write_stroke(f, stroke)?;
                    f.write_str(" />")?;
                }
                Primitive::Text {
                    x,
                    y,
                    content,
                    style,
                } => {
                    write!(f, r#"<text x="{}" y="{}""#, fixed(*x), fixed(*y))?;
                    write_text_style(f, style)?;
                    write!(f, ">{}</text>", escape_text(content.as_str()))?;
                }
            }
            f.write_char('\n')?;
        }
        writeln!(f, "</svg>")
    }
}

fn write_fill(f: &mut Formatter<'_>, fill: Option<&str>) -> fmt::Result {
    write!(f, r#" fill="{}""#, escape_attribute(fill.unwrap_or("none")))
}

fn write_stroke(f: &mut Formatter<'_>, Stroke { color, width }: &Stroke) -> fmt::Result {
    write!(
        f,
        r#" stroke="{}" stroke-width="{}""#,
        escape_attribute(color.as_str()),
        Plain(*width)
    )
}

fn write_text_style(f: &mut Formatter<'_>, style: &TextStyle) -> fmt::Result {
    write!(
        f,
        r#" font-family="{}" font-size="{}" fill="{}""#,
        escape_attribute(style.font_family.as_str()),
        Plain(style.font_size),
        escape_attribute(style.fill.as_str())
    )?;
    if style.bold {
        f.write_str(r#" font-weight="bold""#)?;
    }
    if style.vertical {
        f.write_str(r#" writing-mode="tb" glyph-orientation-vertical="0""#)?;
    }
    Ok(())
}

/// Fixed-decimal number, never rendered as `-0`.
struct Fixed(f64, usize);

impl Display for Fixed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self(value, precision) = *self;
        let text = format!("{value:.precision$}");
        match text.strip_prefix('-') {
            Some(abs) if abs.chars().all(|c| c == '0' || c == '.') => f.write_str(abs),
            _ => f.write_str(&text),
        }
    }
}

/// Shortest round-trip number for sizes and widths.
struct Plain(f64);

impl Display for Plain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Adding 0.0 turns -0.0 into 0.0.
        write!(f, "{}", self.0 + 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{to_svg, Fixed, Plain};
    use crate::{Stroke, TextStyle, VectorDocument};

    #[test]
    fn test_fixed() {
        assert_eq!(Fixed(1.0, 2).to_string(), "1.00");
        assert_eq!(Fixed(123.456, 2).to_string(), "123.46");
        assert_eq!(Fixed(-0.0, 2).to_string(), "0.00");
        assert_eq!(Fixed(-0.001, 2).to_string(), "0.00");
        assert_eq!(Fixed(-1.5, 1).to_string(), "-1.5");
        assert_eq!(Fixed(7.0, 0).to_string(), "7");
        assert_eq!(Plain(2.0).to_string(), "2");
        assert_eq!(Plain(-0.0).to_string(), "0");
        assert_eq!(Plain(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_to_svg() {
        let mut doc = VectorDocument::new(100.0, 50.0);
        doc.rect((0.0, 0.0), (100.0, 50.0), Some("#f9fafc"), None);
        doc.line((1.0, 2.0), (3.0, 4.0), Stroke::new("#222", 2.0));
        doc.polyline(
            vec![(0.0, 10.0), (5.5, 2.25)],
            None,
            Stroke::new("#0066ff", 2.0),
        );
        doc.text(
            "A & <B>",
            (10.0, 20.0),
            TextStyle::new("Verdana", 12.0, "#444").bold(),
        );
        doc.text("v", (1.0, 1.0), TextStyle::new("Verdana", 14.0, "#333").vertical());

        let expected = r##"<?xml version="1.0" encoding="utf-8"?>
<svg xmlns="http://www.w3.org/2000/svg" version="2.0" width="100" height="50" viewBox="0 0 100 50">
  <rect x="0.00" y="0.00" width="100.00" height="50.00" fill="#f9fafc" stroke="none" />
  <line x1="1.00" y1="2.00" x2="3.00" y2="4.00" stroke="#222" stroke-width="2" />
  <polyline points="0.00,10.00 5.50,2.25" fill="none" stroke="#0066ff" stroke-width="2" />
  <text x="10.00" y="20.00" font-family="Verdana" font-size="12" fill="#444" font-weight="bold">A &amp; &lt;B&gt;</text>
  <text x="1.00" y="1.00" font-family="Verdana" font-size="14" fill="#333" writing-mode="tb" glyph-orientation-vertical="0">v</text>
</svg>
"##;
        assert_eq!(to_svg(&doc, 2), expected);
    }

    #[test]
    fn test_precision() {
        let mut doc = VectorDocument::new(10.0, 10.0);
        doc.line((1.23456, 0.0), (0.0, 0.0), Stroke::new("#000", 1.0));
        assert!(to_svg(&doc, 3).contains(r#"x1="1.235""#));
        assert!(to_svg(&doc, 0).contains(r#"x1="1""#));
    }
}
