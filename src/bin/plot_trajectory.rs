use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use plotters::prelude::*;

use rocket_visualizer::cli::init_logging;
use rocket_visualizer::consts::{EARTH_ATMOSPHERE_ALTITUDE, EARTH_RADIUS};
use rocket_visualizer::trajectory::{self, GeoRecordList};

/// Draws a top-down (x/z) view of a trajectory file to a PNG.
#[derive(Debug, Parser)]
struct Args {
    path: PathBuf,

    #[arg(short, long, default_value = "trajectory.png")]
    output: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let records = trajectory::load(&args.path)
        .with_context(|| format!("Failed to load trajectory from {}", args.path.display()))?;
    draw_plot(&args.output, &records)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to draw plot to {}", args.output.display()))?;

    log::info!("Wrote {}", args.output.display());
    Ok(())
}

fn draw_plot(name: &Path, records: &GeoRecordList) -> Result<(), Box<dyn std::error::Error>> {
    // Square bounds that fit both the planet and the whole path
    let extent = records
        .iter()
        .flat_map(|pt| [pt.x.abs(), pt.z.abs()])
        .fold(EARTH_RADIUS + EARTH_ATMOSPHERE_ALTITUDE, f32::max)
        * 1.1;

    let root = BitMapBackend::new(name, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} records", records.count()), ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart.configure_mesh().x_desc("x (m)").y_desc("z (m)").draw()?;

    // Planet and atmosphere outlines
    for (radius, color) in [
        (EARTH_RADIUS, RGBColor(93, 161, 224)),
        (EARTH_RADIUS + EARTH_ATMOSPHERE_ALTITUDE, RGBColor(180, 180, 180)),
    ] {
        chart.draw_series(LineSeries::new(
            (0..=360).map(|deg| {
                let theta = (deg as f32).to_radians();
                (radius * theta.cos(), radius * theta.sin())
            }),
            &color,
        ))?;
    }

    // Same as the live view: consecutive records, no closing segment
    chart.draw_series(LineSeries::new(
        records.iter().map(|pt| (pt.x, pt.z)),
        &RED,
    ))?;

    if let Some(start) = records.get(0) {
        chart.draw_series(std::iter::once(Circle::new((start.x, start.z), 4, GREEN.filled())))?;
    }

    root.present()?;
    Ok(())
}
