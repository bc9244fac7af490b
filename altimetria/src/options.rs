use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Generate circuit artifacts from a circuit description document.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Circuit description document.
    #[arg(default_value = "circuitoEsquema.xml")]
    pub input: PathBuf,

    /// Output file [default: altimetria.svg, circuito.kml, or
    /// InfoCircuito.html depending on the artifact].
    pub output: Option<PathBuf>,

    /// What to generate.
    #[arg(short, long, value_enum, default_value_t = Artifact::Altimetry)]
    pub artifact: Artifact,

    /// Decimal places for SVG coordinates.
    #[arg(short, long, default_value_t = 2)]
    pub precision: usize,
}

impl Cli {
    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.artifact.default_output()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    /// Elevation profile diagram (SVG).
    Altimetry,

    /// Geographic track overlay (KML).
    Kml,

    /// Descriptive page (HTML).
    Html,
}

impl Artifact {
    pub fn default_output(self) -> &'static str {
        match self {
            Self::Altimetry => "altimetria.svg",
            Self::Kml => "circuito.kml",
            Self::Html => "InfoCircuito.html",
        }
    }
}
