//! Composition of the elevation profile diagram.

use crate::{
    climb, svg, Captions, Climb, DiagramStyle, ProfileSeries, ScalePlan, Stroke, TextStyle,
    VectorDocument,
};

/// An elevation profile diagram ready to be drawn.
pub struct Diagram<'a> {
    series: &'a ProfileSeries,
    style: &'a DiagramStyle,
    scale: ScalePlan,
    climb: Climb,
}

impl<'a> Diagram<'a> {
    pub fn new(series: &'a ProfileSeries, style: &'a DiagramStyle) -> Self {
        let scale = ScalePlan::new(series, &style.layout);
        let climb = climb(series.altitudes());
        Self {
            series,
            style,
            scale,
            climb,
        }
    }

    pub fn scale(&self) -> &ScalePlan {
        &self.scale
    }

    pub fn climb(&self) -> Climb {
        self.climb
    }

    pub fn to_svg(&self) -> String {
        svg::to_svg(&self.document(), self.style.precision)
    }

    /// Draws the diagram.
    ///
    /// Primitives are appended back to front: frame, grid and labels,
    /// axes, ground fill, profile line, titles, then origin/end
    /// markers.
    pub fn document(&self) -> VectorDocument {
        let layout = &self.style.layout;
        let mut doc = VectorDocument::new(layout.width, layout.height);
        self.draw_frame(&mut doc);
        self.draw_distance_grid(&mut doc);
        self.draw_altitude_grid(&mut doc);
        self.draw_axes(&mut doc);
        self.draw_profile(&mut doc);
        self.draw_titles(&mut doc);
        self.draw_markers(&mut doc);
        doc
    }

    fn draw_frame(&self, doc: &mut VectorDocument) {
        let DiagramStyle {
            layout,
            stroke_widths,
            palette,
            ..
        } = self.style;
        doc.rect(
            (0.0, 0.0),
            (layout.width, layout.height),
            Some(palette.background.as_str()),
            None,
        );
        doc.rect(
            (layout.margin_left, layout.margin_top),
            (layout.plot_width(), layout.plot_height()),
            Some(palette.plot_fill.as_str()),
            Some(Stroke::new(&palette.plot_border, stroke_widths.plot_border)),
        );
    }

    fn draw_distance_grid(&self, doc: &mut VectorDocument) {
        let DiagramStyle {
            layout,
            stroke_widths,
            palette,
            ..
        } = self.style;
        let grid = Stroke::new(&palette.x_grid, stroke_widths.grid);
        let label_y = layout.height - layout.margin_bottom + 30.0;

        for &tick in &self.scale.x.ticks {
            let x = self.scale.x.map(tick);
            doc.line(
                (x, layout.margin_top),
                (x, layout.plot_bottom()),
                grid.clone(),
            );
            doc.text(distance_label(tick), (x - 18.0, label_y), self.label_style());
        }

        let end_x = self.scale.end_x();
        doc.line((end_x, layout.margin_top), (end_x, layout.plot_bottom()), grid);
    }

    /// Unlabeled grid lines, plus labels at the true minimum and
    /// maximum altitudes only.
    fn draw_altitude_grid(&self, doc: &mut VectorDocument) {
        let DiagramStyle {
            layout,
            stroke_widths,
            palette,
            ..
        } = self.style;
        let grid = Stroke::new(&palette.y_grid, stroke_widths.grid);

        for &tick in &self.scale.y.ticks {
            let y = self.scale.y.map(tick);
            doc.line((layout.margin_left, y), (layout.plot_right(), y), grid.clone());
        }

        for altitude in [self.scale.y.data_min, self.scale.y.data_max] {
            doc.text(
                format!("{} m", round(altitude)),
                (layout.margin_left - 55.0, self.scale.y.map(altitude) + 4.0),
                self.label_style(),
            );
        }
    }

    fn draw_axes(&self, doc: &mut VectorDocument) {
        let DiagramStyle {
            layout,
            stroke_widths,
            palette,
            ..
        } = self.style;
        let axis = Stroke::new(&palette.axis, stroke_widths.axis);
        doc.line(
            (layout.margin_left, layout.plot_bottom()),
            (layout.plot_right(), layout.plot_bottom()),
            axis.clone(),
        );
        doc.line(
            (layout.margin_left, layout.margin_top),
            (layout.margin_left, layout.plot_bottom()),
            axis,
        );
    }

    /// Ground silhouette first, closed down to the padded floor, then
    /// the profile line on top of it.
    fn draw_profile(&self, doc: &mut VectorDocument) {
        let DiagramStyle {
            stroke_widths,
            palette,
            ..
        } = self.style;
        let line: Vec<(f64, f64)> = self
            .series
            .points()
            .map(|(distance, altitude)| self.scale.project(distance, altitude))
            .collect();

        let floor_y = self.scale.floor_y();
        let start_x = self.scale.x.map(self.scale.x.data_min);
        let mut ground = line.clone();
        ground.push((self.scale.end_x(), floor_y));
        ground.push((start_x, floor_y));

        doc.polyline(
            ground,
            Some(palette.ground_fill.as_str()),
            Stroke::new(&palette.ground_stroke, stroke_widths.ground),
        );
        doc.polyline(
            line,
            None,
            Stroke::new(&palette.profile, stroke_widths.profile),
        );
    }

    fn draw_titles(&self, doc: &mut VectorDocument) {
        let DiagramStyle {
            layout,
            font_family,
            font_sizes,
            palette,
            captions,
            ..
        } = self.style;
        let center = layout.width / 2.0;

        doc.text(
            captions.title.as_str(),
            (center - 160.0, 28.0),
            TextStyle::new(font_family, font_sizes.title, &palette.title).bold(),
        );
        doc.text(
            self.summary(),
            (center - 260.0, 52.0),
            TextStyle::new(font_family, font_sizes.summary, &palette.summary),
        );

        let caption = TextStyle::new(font_family, font_sizes.axis_caption, &palette.axis_caption);
        doc.text(
            captions.x_axis.as_str(),
            (
                layout.margin_left + layout.plot_width() / 2.0 - 80.0,
                layout.height - 25.0,
            ),
            caption.clone(),
        );
        doc.text(
            captions.y_axis.as_str(),
            (25.0, layout.margin_top + layout.plot_height() / 2.0),
            caption.vertical(),
        );
    }

    /// Origin and end labels, each with a short tick below the axis.
    fn draw_markers(&self, doc: &mut VectorDocument) {
        let DiagramStyle {
            layout,
            font_family,
            font_sizes,
            stroke_widths,
            palette,
            captions,
            ..
        } = self.style;
        let label = TextStyle::new(font_family, font_sizes.label, &palette.marker_label);
        let tick = Stroke::new(&palette.axis, stroke_widths.marker);
        let label_y = layout.height - layout.margin_bottom + 48.0;
        let bottom = layout.plot_bottom();

        let start_x = self.scale.x.map(self.scale.x.data_min);
        doc.text(captions.origin.as_str(), (start_x - 30.0, label_y), label.clone());
        doc.line((start_x, bottom), (start_x, bottom + 10.0), tick.clone());

        let end_x = self.scale.end_x();
        doc.text(captions.end.as_str(), (end_x - 10.0, label_y), label);
        doc.line((end_x, bottom), (end_x, bottom + 10.0), tick);
    }

    /// `Distancia: 3000 m  |  Altitud: 90–120 m  |  +20 m / -30 m`
    fn summary(&self) -> String {
        let Captions {
            distance, altitude, ..
        } = &self.style.captions;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let total = self.series.total_distance() as u64;
        #[allow(clippy::cast_possible_truncation)]
        let (min, max) = (
            self.scale.y.data_min as i64,
            self.scale.y.data_max as i64,
        );
        format!(
            "{distance}: {total} m  |  {altitude}: {min}–{max} m  |  +{} m / -{} m",
            round(self.climb.ascent_m),
            round(self.climb.descent_m)
        )
    }

    fn label_style(&self) -> TextStyle {
        TextStyle::new(
            &self.style.font_family,
            self.style.font_sizes.label,
            &self.style.palette.label,
        )
    }
}

/// `1000 → "1 km"`, `1500 → "1500 m"`.
fn distance_label(distance_m: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let distance_m = distance_m as u64;
    if distance_m % 1000 == 0 {
        format!("{} km", distance_m / 1000)
    } else {
        format!("{distance_m} m")
    }
}

/// Nearest integer, ties to even.
#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round_ties_even() as i64
}
