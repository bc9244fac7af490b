//! Circuit description (`circuitoEsquema.xml`) document reader.
//!
//! The source document is an XML tree in the [NAMESPACE] namespace
//! describing a race circuit: some free-form metadata, an origin
//! point, and an ordered list of segments (`tramo`), each carrying a
//! length and the point where it ends.
//!
//! [Circuit] is a typed, owned view over that tree. Every lookup is
//! done once, here, with explicit defaults for missing or malformed
//! values:
//!
//! | value                  | missing / malformed   |
//! |------------------------|-----------------------|
//! | altitude               | `0.0`                 |
//! | longitude, latitude    | `None`                |
//! | segment distance       | `None`                |
//! | metadata text          | `None`                |
//!
//! A malformed value is logged and replaced, it never aborts parsing.

mod error;

pub use crate::error::CircuitError;
use geo::geometry::Coord;
use log::{debug, warn};
use roxmltree::{Document, Node};
use std::{io::ErrorKind, path::Path, str::FromStr};

/// Namespace every circuit element lives in.
pub const NAMESPACE: &str = "http://www.uniovi.es";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    pub name: Option<String>,

    /// Advertised circuit length, as written in the document.
    pub length_m: Option<String>,

    pub mean_width_m: Option<String>,
    pub race_date: Option<String>,
    pub start_time: Option<String>,
    pub laps: Option<String>,
    pub locality: Option<String>,
    pub country: Option<String>,
    pub sponsor: Option<String>,

    /// Start/finish point.
    pub origin: Waypoint,

    /// Circuit legs, in document order.
    pub segments: Vec<Segment>,

    pub photos: Vec<Media>,
    pub videos: Vec<Media>,
    pub winner: Option<Winner>,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Waypoint {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,

    /// Meters above mean sea level.
    pub altitude_m: f64,
}

impl Waypoint {
    /// Returns this point as an `x: longitude, y: latitude` coord, if
    /// both are known.
    pub fn coord(&self) -> Option<Coord<f64>> {
        Some(Coord {
            x: self.longitude?,
            y: self.latitude?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Segment {
    /// Segment length in meters, `None` when absent or unusable.
    pub distance_m: Option<u32>,

    /// Where this segment ends.
    pub end: Waypoint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub file: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub rider: String,

    /// ISO-8601 duration, e.g. `PT41M11.100S`.
    pub total_time: String,
}

impl Circuit {
    /// Reads and parses the circuit document at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CircuitError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CircuitError::NotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let circuit = Self::parse(&text)?;
        debug!(
            "loaded {}; segments: {}, photos: {}, videos: {}",
            path.display(),
            circuit.segments.len(),
            circuit.photos.len(),
            circuit.videos.len()
        );
        Ok(circuit)
    }

    pub fn parse(text: &str) -> Result<Self, CircuitError> {
        let doc = Document::parse(text)?;
        let root = doc.root_element();

        let origin = find(root, &["puntoOrigen"])
            .map(Waypoint::from_node)
            .unwrap_or_default();

        let segments = root
            .descendants()
            .filter(|node| is(node, "tramos"))
            .flat_map(|tramos| tramos.children().filter(|node| is(node, "tramo")))
            .map(Segment::from_node)
            .collect();

        let winner = match (
            metadata(root, &["vencedor", "piloto"]),
            metadata(root, &["vencedor", "tiempoTotal"]),
        ) {
            (Some(rider), Some(total_time)) => Some(Winner { rider, total_time }),
            _ => None,
        };

        let references = all(root, &["referencias", "ref"])
            .filter_map(|node| node.text())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            name: metadata(root, &["nombre"]),
            length_m: metadata(root, &["longitud"]),
            mean_width_m: metadata(root, &["anchuraMedia"]),
            race_date: metadata(root, &["fechaCarrera"]),
            start_time: metadata(root, &["horaInicio"]),
            laps: metadata(root, &["vueltas"]),
            locality: metadata(root, &["localidad"]),
            country: metadata(root, &["pais"]),
            sponsor: metadata(root, &["patrocinador"]),
            origin,
            segments,
            photos: media(root, &["galeriaFotos", "foto"]),
            videos: media(root, &["galeriaVideos", "video"]),
            winner,
            references,
        })
    }

    /// Returns the origin followed by every segment's end point.
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        std::iter::once(&self.origin).chain(self.segments.iter().map(|segment| &segment.end))
    }
}

impl Waypoint {
    fn from_node(node: Node<'_, '_>) -> Self {
        let altitude_m = recover(parse_finite("altitudMSNM", child_text(node, "altitudMSNM")))
            .unwrap_or(0.0);
        let longitude = recover(parse_finite("longitudGeo", child_text(node, "longitudGeo")));
        let latitude = recover(parse_finite("latitudGeo", child_text(node, "latitudGeo")));
        Self {
            longitude,
            latitude,
            altitude_m,
        }
    }
}

impl Segment {
    fn from_node(node: Node<'_, '_>) -> Self {
        let distance_m = recover(parse_field("distancia", child_text(node, "distancia")));
        let end = child(node, "puntoFinal")
            .map(Waypoint::from_node)
            .unwrap_or_default();
        Self { distance_m, end }
    }
}

fn is(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.has_tag_name((NAMESPACE, name))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|node| is(node, name))
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|node| node.text())
}

/// Every node matching `path`, where the first path element may
/// appear anywhere below `scope` and the rest are direct children.
fn all<'a, 'input: 'a>(
    scope: Node<'a, 'input>,
    path: &'a [&'a str],
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    let (first, rest) = path.split_first().map_or((None, &[][..]), |(f, r)| (Some(*f), r));
    scope
        .descendants()
        .filter(move |node| first.map_or(false, |first| is(node, first)))
        .flat_map(move |start| {
            rest.iter().fold(vec![start], |nodes, name| {
                nodes
                    .into_iter()
                    .flat_map(|node| node.children().filter(|node| is(node, name)))
                    .collect()
            })
        })
}

/// First node matching `path`, see [all].
fn find<'a, 'input: 'a>(scope: Node<'a, 'input>, path: &'a [&'a str]) -> Option<Node<'a, 'input>> {
    all(scope, path).next()
}

fn metadata(scope: Node<'_, '_>, path: &[&str]) -> Option<String> {
    find(scope, path)
        .and_then(|node| node.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(String::from)
}

fn media(scope: Node<'_, '_>, path: &[&str]) -> Vec<Media> {
    all(scope, path)
        .filter_map(|node| match node.attribute("archivo") {
            Some(file) if !file.trim().is_empty() => Some(Media {
                file: file.trim().to_owned(),
                title: node.attribute("titulo").map(String::from),
            }),
            _ => {
                warn!("{} without archivo attribute, skipping", node.tag_name().name());
                None
            }
        })
        .collect()
}

fn parse_field<T: FromStr>(field: &'static str, raw: Option<&str>) -> Result<Option<T>, CircuitError> {
    match raw.map(str::trim).filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| CircuitError::MalformedField {
                field,
                value: text.to_owned(),
            }),
    }
}

fn parse_finite(field: &'static str, raw: Option<&str>) -> Result<Option<f64>, CircuitError> {
    match parse_field::<f64>(field, raw)? {
        Some(value) if !value.is_finite() => Err(CircuitError::MalformedField {
            field,
            value: value.to_string(),
        }),
        value => Ok(value),
    }
}

/// Logs and drops a malformed value.
fn recover<T>(parsed: Result<Option<T>, CircuitError>) -> Option<T> {
    parsed.unwrap_or_else(|e| {
        warn!("{e}, using default");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::{Circuit, CircuitError, Media, Winner};
    use approx::assert_relative_eq;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<circuito xmlns="http://www.uniovi.es">
  <nombre>Termas de Río Hondo</nombre>
  <longitud>4806</longitud>
  <anchuraMedia>16</anchuraMedia>
  <fechaCarrera>2025-03-16</fechaCarrera>
  <horaInicio>14:00</horaInicio>
  <vueltas>25</vueltas>
  <localidad>Termas de Río Hondo</localidad>
  <pais>Argentina</pais>
  <patrocinador>Michelin</patrocinador>
  <referencias>
    <ref> https://example.org/a </ref>
    <ref></ref>
  </referencias>
  <galeriaFotos>
    <foto archivo="multimedia/a.jpg" titulo="Recta"/>
    <foto titulo="sin archivo"/>
  </galeriaFotos>
  <galeriaVideos>
    <video archivo="multimedia/v.mp4"/>
  </galeriaVideos>
  <vencedor>
    <piloto>Marc Márquez</piloto>
    <tiempoTotal>PT41M11.100S</tiempoTotal>
  </vencedor>
  <puntoOrigen>
    <longitudGeo>-64.86</longitudGeo>
    <latitudGeo>-27.50</latitudGeo>
    <altitudMSNM>100</altitudMSNM>
  </puntoOrigen>
  <tramos>
    <tramo>
      <distancia>1000</distancia>
      <puntoFinal>
        <longitudGeo>-64.85</longitudGeo>
        <latitudGeo>-27.51</latitudGeo>
        <altitudMSNM>120</altitudMSNM>
      </puntoFinal>
    </tramo>
    <tramo>
      <distancia> 2000 </distancia>
      <puntoFinal>
        <longitudGeo>-64.84</longitudGeo>
        <latitudGeo>-27.52</latitudGeo>
        <altitudMSNM>90.5</altitudMSNM>
      </puntoFinal>
    </tramo>
  </tramos>
</circuito>"#;

    #[test]
    fn test_parse_profile_fields() {
        let circuit = Circuit::parse(DOC).unwrap();
        assert_relative_eq!(circuit.origin.altitude_m, 100.0);
        assert_eq!(circuit.segments.len(), 2);
        assert_eq!(circuit.segments[0].distance_m, Some(1000));
        assert_eq!(circuit.segments[1].distance_m, Some(2000));
        assert_relative_eq!(circuit.segments[1].end.altitude_m, 90.5);
        let coord = circuit.segments[0].end.coord().unwrap();
        assert_relative_eq!(coord.x, -64.85);
        assert_relative_eq!(coord.y, -27.51);
        assert_eq!(circuit.waypoints().count(), 3);
    }

    #[test]
    fn test_parse_metadata() {
        let circuit = Circuit::parse(DOC).unwrap();
        assert_eq!(circuit.name.as_deref(), Some("Termas de Río Hondo"));
        assert_eq!(circuit.length_m.as_deref(), Some("4806"));
        assert_eq!(circuit.laps.as_deref(), Some("25"));
        assert_eq!(circuit.country.as_deref(), Some("Argentina"));
        assert_eq!(circuit.references, vec!["https://example.org/a".to_string()]);
        assert_eq!(
            circuit.photos,
            vec![Media {
                file: "multimedia/a.jpg".into(),
                title: Some("Recta".into())
            }]
        );
        assert_eq!(circuit.videos[0].title, None);
        assert_eq!(
            circuit.winner,
            Some(Winner {
                rider: "Marc Márquez".into(),
                total_time: "PT41M11.100S".into()
            })
        );
    }

    #[test]
    fn test_malformed_fields_use_defaults() {
        let doc = r#"<c xmlns="http://www.uniovi.es">
          <puntoOrigen><altitudMSNM>high</altitudMSNM><longitudGeo>west</longitudGeo></puntoOrigen>
          <tramos>
            <tramo><distancia>12.5</distancia><puntoFinal><altitudMSNM>3</altitudMSNM></puntoFinal></tramo>
            <tramo><distancia>-4</distancia></tramo>
            <tramo><distancia>7</distancia><puntoFinal><altitudMSNM>NaN</altitudMSNM></puntoFinal></tramo>
          </tramos>
        </c>"#;
        let circuit = Circuit::parse(doc).unwrap();
        assert_relative_eq!(circuit.origin.altitude_m, 0.0);
        assert_eq!(circuit.origin.longitude, None);
        assert_eq!(circuit.origin.coord(), None);
        assert_eq!(circuit.segments[0].distance_m, None);
        assert_eq!(circuit.segments[1].distance_m, None);
        assert_relative_eq!(circuit.segments[1].end.altitude_m, 0.0);
        assert_eq!(circuit.segments[2].distance_m, Some(7));
        assert_relative_eq!(circuit.segments[2].end.altitude_m, 0.0);
    }

    #[test]
    fn test_foreign_namespace_is_ignored() {
        let doc = r#"<circuito><puntoOrigen><altitudMSNM>50</altitudMSNM></puntoOrigen>
          <tramos><tramo><distancia>10</distancia></tramo></tramos></circuito>"#;
        let circuit = Circuit::parse(doc).unwrap();
        assert!(circuit.segments.is_empty());
        assert_relative_eq!(circuit.origin.altitude_m, 0.0);
    }

    #[test]
    fn test_invalid_xml() {
        assert!(matches!(
            Circuit::parse("<circuito>"),
            Err(CircuitError::Xml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Circuit::load("does/not/exist.xml").unwrap_err();
        assert!(matches!(err, CircuitError::NotFound(_)));
    }
}
