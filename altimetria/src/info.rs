//! HTML information page for a circuit.

use circuit::Circuit;
use htmlize::{escape_attribute, escape_text};
use std::fmt::{self, Display, Formatter};

pub fn to_html(circuit: &Circuit) -> String {
    InfoPage(circuit).to_string()
}

struct InfoPage<'a>(&'a Circuit);

impl Display for InfoPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let circuit = self.0;
        let text = |field: &Option<String>| escape_text(field.as_deref().unwrap_or("")).into_owned();

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="es">"#)?;
        writeln!(f, "  <head>")?;
        writeln!(f, r#"    <meta charset="UTF-8" />"#)?;
        writeln!(
            f,
            r#"    <meta name="description" content="Información del circuito del mundial MotoGP" />"#
        )?;
        writeln!(
            f,
            r#"    <meta name="viewport" content="width=device-width, initial-scale=1.0" />"#
        )?;
        writeln!(f, "    <title>MotoGP - Circuito</title>")?;
        writeln!(
            f,
            r#"    <link rel="stylesheet" type="text/css" href="css/estilo.css" />"#
        )?;
        writeln!(f, "  </head>")?;
        writeln!(f, "  <body>")?;
        writeln!(f, "    <main>")?;
        writeln!(f, "      <section>")?;
        writeln!(f, "        <h2>{}</h2>", text(&circuit.name))?;
        writeln!(
            f,
            "        <p>Ubicado en {} ({}), este circuito cuenta con una longitud total de {} metros \
             y una anchura media de {} metros. El patrocinador principal es {}.</p>",
            text(&circuit.locality),
            text(&circuit.country),
            text(&circuit.length_m),
            text(&circuit.mean_width_m),
            text(&circuit.sponsor)
        )?;
        writeln!(
            f,
            "        <p>La carrera del mundial MotoGP se disputará el día {} a las {}, \
             con un total de {} vueltas al trazado.</p>",
            text(&circuit.race_date),
            text(&circuit.start_time),
            text(&circuit.laps)
        )?;

        if !circuit.photos.is_empty() {
            writeln!(f, "        <h3>Galería de imágenes</h3>")?;
            for photo in &circuit.photos {
                let title = photo.title.as_deref().unwrap_or("Imagen");
                writeln!(f, "        <figure>")?;
                writeln!(
                    f,
                    r#"          <img src="{}" alt="{}" />"#,
                    escape_attribute(photo.file.as_str()),
                    escape_attribute(title)
                )?;
                writeln!(f, "          <figcaption>{}</figcaption>", escape_text(title))?;
                writeln!(f, "        </figure>")?;
            }
        }

        if let Some(video) = circuit.videos.first() {
            writeln!(f, "        <h3>Vídeos destacados</h3>")?;
            writeln!(f, r#"        <video controls preload="auto">"#)?;
            writeln!(
                f,
                r#"          <source src="{}" type="video/mp4" />"#,
                escape_attribute(video.file.as_str())
            )?;
            writeln!(f, "          <p>Tu navegador no soporta el elemento video.</p>")?;
            writeln!(f, "        </video>")?;
            writeln!(
                f,
                "        <p>{}</p>",
                escape_text(video.title.as_deref().unwrap_or("Vídeo"))
            )?;
        }

        if let Some(winner) = &circuit.winner {
            writeln!(f, "        <h3>Último vencedor</h3>")?;
            writeln!(
                f,
                "        <p>El último ganador fue <strong>{}</strong> con un tiempo total de {}.</p>",
                escape_text(winner.rider.as_str()),
                escape_text(race_time(&winner.total_time))
            )?;
        }

        if !circuit.references.is_empty() {
            writeln!(f, "        <h3>Fuentes de información</h3>")?;
            writeln!(f, "        <ul>")?;
            for url in &circuit.references {
                writeln!(
                    f,
                    r#"          <li><a href="{}" hreflang="es" rel="noopener noreferrer">{}</a></li>"#,
                    escape_attribute(url.as_str()),
                    escape_text(url.as_str())
                )?;
            }
            writeln!(f, "        </ul>")?;
        }

        writeln!(f, "      </section>")?;
        writeln!(f, "    </main>")?;
        writeln!(f, "  </body>")?;
        writeln!(f, "</html>")
    }
}

/// Renders an ISO-8601 `PT[nM][s[.f]S]` duration as `n min s.f s`.
///
/// Anything else is returned unchanged.
fn race_time(iso: &str) -> String {
    fn is_int(text: &str) -> bool {
        !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
    }

    fn is_decimal(text: &str) -> bool {
        match text.split_once('.') {
            Some((int, frac)) => is_int(int) && is_int(frac),
            None => is_int(text),
        }
    }

    fn parse(iso: &str) -> Option<(&str, &str)> {
        let rest = iso.strip_prefix("PT")?;
        let (minutes, rest) = match rest.split_once('M') {
            Some((minutes, rest)) => (Some(minutes), rest),
            None => (None, rest),
        };
        let seconds = match rest {
            "" => None,
            rest => Some(rest.strip_suffix('S')?),
        };
        if minutes.map_or(true, is_int) && seconds.map_or(true, is_decimal) {
            Some((minutes.unwrap_or("0"), seconds.unwrap_or("0")))
        } else {
            None
        }
    }

    match parse(iso) {
        Some((minutes, seconds)) => format!("{minutes} min {seconds} s"),
        None => iso.to_owned(),
    }
}
