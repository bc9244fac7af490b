mod info;
mod options;
mod track;

use altimetry::{write_atomic, AltimetryError, DiagramStyle, ProfileSeries};
use anyhow::Error as AnyError;
use circuit::{Circuit, CircuitError};
use clap::Parser;
use options::{Artifact, Cli};
use std::{path::PathBuf, process::ExitCode};

/// Input document missing, unreadable, or not XML.
const EXIT_INPUT: u8 = 1;

/// Input parsed but yielded no usable profile.
const EXIT_EMPTY_PROFILE: u8 = 2;

const EXIT_OTHER: u8 = 3;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(out) => {
            println!("wrote {}", out.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf, AnyError> {
    let out = cli.output();
    let circuit = Circuit::load(&cli.input)?;
    match cli.artifact {
        Artifact::Altimetry => {
            let series = ProfileSeries::from_circuit(&circuit)?;
            let style = DiagramStyle {
                precision: cli.precision,
                ..DiagramStyle::default()
            };
            altimetry::write_svg(&out, &series, &style)?;
        }
        Artifact::Kml => write_atomic(&out, &track::to_kml(&circuit)?)?,
        Artifact::Html => write_atomic(&out, info::to_html(&circuit).as_bytes())?,
    }
    Ok(out)
}

fn exit_status(e: &AnyError) -> u8 {
    if let Some(CircuitError::NotFound(_) | CircuitError::Io(_) | CircuitError::Xml(_)) =
        e.downcast_ref::<CircuitError>()
    {
        EXIT_INPUT
    } else if let Some(AltimetryError::EmptyProfile) = e.downcast_ref::<AltimetryError>() {
        EXIT_EMPTY_PROFILE
    } else {
        EXIT_OTHER
    }
}
