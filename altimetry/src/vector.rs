//! Backend-independent 2-D vector document.

/// Outline color and width.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_owned(),
            width,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub fill: String,
    pub bold: bool,

    /// Lay glyphs out top to bottom.
    pub vertical: bool,
}

impl TextStyle {
    pub fn new(font_family: &str, font_size: f64, fill: &str) -> Self {
        Self {
            font_family: font_family.to_owned(),
            font_size,
            fill: fill.to_owned(),
            bold: false,
            vertical: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

/// A single drawing element.
///
/// A `None` fill leaves the shape unfilled, a `None` stroke leaves it
/// unoutlined.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        fill: Option<String>,
        stroke: Stroke,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
    },
}

/// Ordered, append-only list of primitives on a fixed-size canvas.
///
/// Later primitives are drawn over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    pub width: f64,
    pub height: f64,
    primitives: Vec<Primitive>,
}

impl VectorDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn rect(
        &mut self,
        (x, y): (f64, f64),
        (width, height): (f64, f64),
        fill: Option<&str>,
        stroke: Option<Stroke>,
    ) {
        self.push(Primitive::Rect {
            x,
            y,
            width,
            height,
            fill: fill.map(String::from),
            stroke,
        });
    }

    pub fn line(&mut self, (x1, y1): (f64, f64), (x2, y2): (f64, f64), stroke: Stroke) {
        self.push(Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        });
    }

    pub fn polyline(&mut self, points: Vec<(f64, f64)>, fill: Option<&str>, stroke: Stroke) {
        self.push(Primitive::Polyline {
            points,
            fill: fill.map(String::from),
            stroke,
        });
    }

    pub fn text<S: Into<String>>(&mut self, content: S, (x, y): (f64, f64), style: TextStyle) {
        self.push(Primitive::Text {
            x,
            y,
            content: content.into(),
            style,
        });
    }

    /// Every text primitive's content, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Primitive, Stroke, TextStyle, VectorDocument};

    #[test]
    fn test_append_order() {
        let mut doc = VectorDocument::new(10.0, 10.0);
        doc.rect((0.0, 0.0), (10.0, 10.0), Some("#fff"), None);
        doc.line((0.0, 0.0), (5.0, 5.0), Stroke::new("#000", 1.0));
        doc.text("a", (1.0, 1.0), TextStyle::new("Verdana", 12.0, "#000"));
        doc.polyline(vec![(0.0, 0.0)], None, Stroke::new("#000", 2.0));
        doc.text("b", (2.0, 2.0), TextStyle::new("Verdana", 12.0, "#000").bold());

        assert!(matches!(doc.primitives()[0], Primitive::Rect { .. }));
        assert!(matches!(doc.primitives()[1], Primitive::Line { .. }));
        assert!(matches!(doc.primitives()[3], Primitive::Polyline { .. }));
        assert_eq!(doc.texts().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
