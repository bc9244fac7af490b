//! KML track overlay of a circuit.

use anyhow::{anyhow, Error as AnyError};
use circuit::{Circuit, Waypoint};
use kml::{
    types::{
        AltitudeMode, Coord, Element, Geometry, LineString, LineStyle, Placemark, Point, Style,
    },
    Kml, KmlDocument, KmlWriter,
};
use log::{debug, warn};
use std::collections::HashMap;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

const XML_PROLOG: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

const TRACK_STYLE_ID: &str = "trackLine";

/// Opaque red, in KML's aabbggrr order.
const TRACK_COLOR: &str = "ff0000ff";

const TRACK_WIDTH: f64 = 4.0;

/// Returns a KML document with a start/finish placemark and the
/// closed circuit line: origin, every segment end, and back to the
/// origin.
///
/// Points without coordinates are left out of the line.
pub fn to_kml(circuit: &Circuit) -> Result<Vec<u8>, AnyError> {
    let name = circuit.name.clone().unwrap_or_else(|| "Circuito".into());

    let mut coords: Vec<Coord> = circuit
        .waypoints()
        .enumerate()
        .filter_map(|(idx, waypoint)| {
            let coord = kml_coord(waypoint);
            if coord.is_none() {
                warn!("waypoint {idx} has no coordinates, leaving it out of the track");
            }
            coord
        })
        .collect();
    if let Some(origin) = kml_coord(&circuit.origin) {
        coords.push(origin);
    }
    debug!("track; points: {}", coords.len());

    let mut elements = vec![
        Kml::Element(Element {
            name: "name".into(),
            content: Some(name.clone()),
            ..Default::default()
        }),
        Kml::Style(Style {
            id: Some(TRACK_STYLE_ID.into()),
            line: Some(LineStyle {
                color: TRACK_COLOR.into(),
                width: TRACK_WIDTH,
                ..Default::default()
            }),
            ..Default::default()
        }),
    ];

    if let Some(coord) = kml_coord(&circuit.origin) {
        elements.push(Kml::Placemark(Placemark {
            name: Some("Salida / Meta".into()),
            geometry: Some(Geometry::Point(Point {
                coord,
                ..Default::default()
            })),
            ..Default::default()
        }));
    }

    elements.push(Kml::Placemark(Placemark {
        name: Some(name),
        geometry: Some(Geometry::LineString(LineString {
            coords,
            extrude: true,
            tessellate: true,
            altitude_mode: AltitudeMode::RelativeToGround,
            ..Default::default()
        })),
        style_url: Some(format!("#{TRACK_STYLE_ID}")),
        ..Default::default()
    }));

    let kml = Kml::KmlDocument(KmlDocument {
        attrs: HashMap::from([("xmlns".to_string(), KML_NAMESPACE.to_string())]),
        elements: vec![Kml::Document {
            attrs: HashMap::new(),
            elements,
        }],
        ..Default::default()
    });

    let mut buf = XML_PROLOG.to_vec();
    KmlWriter::from_writer(&mut buf)
        .write(&kml)
        .map_err(|e| anyhow!("failed to write KML, {e}"))?;
    buf.push(b'\n');
    Ok(buf)
}

fn kml_coord(waypoint: &Waypoint) -> Option<Coord> {
    waypoint.coord().map(|coord| Coord {
        x: coord.x,
        y: coord.y,
        z: Some(waypoint.altitude_m),
    })
}
