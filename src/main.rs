use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use tilt_scene::data::loader::load_file;
use tilt_scene::scene::{ScenePlan, DEFAULT_MARKER_RADIUS};

#[derive(Parser, Debug)]
#[clap(version, about = "Place tilt-series particle markers relative to a reference dataset")]
struct Args {
    /// Tilt file to read.
    input: PathBuf,

    /// Dataset the tilt angles are measured against (default: first in file).
    #[arg(long)]
    reference: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    #[arg(long = "marker-radius", default_value_t = DEFAULT_MARKER_RADIUS)]
    marker_radius: f64,

    /// Write here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per dataset: id, tilt angle, colour, marker count.
    Summary,
    /// Full scene plan as JSON.
    Json,
    /// One row per marker.
    Csv,
}

/// Flat marker row for the CSV output.
#[derive(Serialize)]
struct MarkerRow<'a> {
    group: &'a str,
    marker: &'a str,
    x: f64,
    y: f64,
    z: f64,
    angle: f64,
    r: f32,
    g: f32,
    b: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let datasets = load_file(&args.input)?;
    info!("loaded {} dataset(s) from {}", datasets.len(), args.input.display());

    let plan = ScenePlan::build(&datasets, args.reference.as_deref(), args.marker_radius)
        .with_context(|| format!("planning scene for {}", args.input.display()))?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Summary => write_summary(&mut out, &plan)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &plan).context("writing JSON")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&mut out, &plan)?,
    }
    out.flush()?;
    Ok(())
}

fn write_summary(out: &mut dyn Write, plan: &ScenePlan) -> Result<()> {
    writeln!(out, "reference: {}", plan.reference)?;
    for group in &plan.groups {
        let [r, g, b] = group.color;
        writeln!(
            out,
            "{:<16} {:>10.4}°  rgb({r:.2}, {g:.2}, {b:.2})  {} marker(s)",
            group.id,
            group.tilt_angle_degrees,
            group.markers.len()
        )?;
    }
    writeln!(out, "{} group(s), {} marker(s)", plan.groups.len(), plan.marker_count())?;
    Ok(())
}

fn write_csv(out: &mut dyn Write, plan: &ScenePlan) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for group in &plan.groups {
        let [r, g, b] = group.color;
        for marker in &group.markers {
            let [x, y, z] = marker.location;
            writer
                .serialize(MarkerRow {
                    group: &group.id,
                    marker: &marker.name,
                    x,
                    y,
                    z,
                    angle: group.tilt_angle_degrees,
                    r,
                    g,
                    b,
                })
                .with_context(|| format!("writing marker {}", marker.name))?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilt_scene::data::loader::parse_str;

    #[test]
    fn summary_lists_colours_and_marker_total() {
        let datasets = parse_str("ID: a\nx: 0\ny: 0\n1,2\n3,4\n\nID: b\nx: 0\ny: 90\n5,6\n").unwrap();
        let plan = ScenePlan::build(&datasets, None, DEFAULT_MARKER_RADIUS).unwrap();

        let mut out = Vec::new();
        write_summary(&mut out, &plan).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("reference: a\n"));
        assert!(text.contains("rgb(1.00, 0.00, 0.00)  2 marker(s)"), "{text}");
        assert!(text.contains("rgb(0.00, 1.00, 0.00)  1 marker(s)"), "{text}");
        assert!(text.ends_with("2 group(s), 3 marker(s)\n"), "{text}");
    }
}
