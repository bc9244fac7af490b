use crate::Layout;

/// Presentation constants for the profile diagram.
///
/// The default reproduces the standard altimetry sheet; tests and
/// callers may override any part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramStyle {
    pub layout: Layout,

    /// Decimal places for every coordinate in the output.
    pub precision: usize,

    pub font_family: String,
    pub font_sizes: FontSizes,
    pub stroke_widths: StrokeWidths,
    pub palette: Palette,
    pub captions: Captions,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            precision: 2,
            font_family: "Verdana".into(),
            font_sizes: FontSizes::default(),
            stroke_widths: StrokeWidths::default(),
            palette: Palette::default(),
            captions: Captions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    /// Tick, min/max and marker labels.
    pub label: f64,
    pub title: f64,
    pub summary: f64,
    pub axis_caption: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            label: 12.0,
            title: 22.0,
            summary: 13.0,
            axis_caption: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeWidths {
    pub plot_border: f64,
    pub grid: f64,
    pub axis: f64,
    pub profile: f64,
    pub ground: f64,
    pub marker: f64,
}

impl Default for StrokeWidths {
    fn default() -> Self {
        Self {
            plot_border: 1.0,
            grid: 1.0,
            axis: 2.0,
            profile: 2.0,
            ground: 1.0,
            marker: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: String,
    pub plot_fill: String,
    pub plot_border: String,
    pub x_grid: String,
    pub y_grid: String,
    pub axis: String,
    pub profile: String,
    pub ground_stroke: String,
    pub ground_fill: String,
    pub label: String,
    pub title: String,
    pub summary: String,
    pub axis_caption: String,
    pub marker_label: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#f9fafc".into(),
            plot_fill: "#ffffff".into(),
            plot_border: "#ccd3db".into(),
            x_grid: "#e8edf3".into(),
            y_grid: "#edf1f5".into(),
            axis: "#222".into(),
            profile: "#0066ff".into(),
            ground_stroke: "#cce0ff".into(),
            ground_fill: "#e6f0ff".into(),
            label: "#444".into(),
            title: "#111".into(),
            summary: "#555".into(),
            axis_caption: "#333".into(),
            marker_label: "#111".into(),
        }
    }
}

/// Fixed wording on the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Captions {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub origin: String,
    pub end: String,

    /// Lead-in of the distance figure in the summary line.
    pub distance: String,

    /// Lead-in of the altitude range in the summary line.
    pub altitude: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            title: "Altimetría del circuito".into(),
            x_axis: "Distancia acumulada (m)".into(),
            y_axis: "Altitud (m)".into(),
            origin: "ORIGEN".into(),
            end: "FIN".into(),
            distance: "Distancia".into(),
            altitude: "Altitud".into(),
        }
    }
}
