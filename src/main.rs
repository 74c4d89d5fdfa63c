use serde::Deserialize;
use std::fs;

use triangulation::{Localizer, LocalizerConfig, Matrix3, Observation, Point, Vector3};

/// Observation batch file: an optional localizer configuration and the
/// observations to fuse
#[derive(Debug, Deserialize)]
struct ObservationBatch {
    #[serde(default)]
    config: LocalizerConfig,
    observations: Vec<Observation>,
}

fn print_point(label: &str, point: &Point) {
    println!(
        "{}: x={:.6} y={:.6} z={:.6} (dx={:.3} dy={:.3} dz={:.3})",
        label,
        point.position.x(),
        point.position.y(),
        point.position.z(),
        point.uncertainty.dx,
        point.uncertainty.dy,
        point.uncertainty.dz
    );
}

fn run_batch(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read observation file '{}': {}", path, e))?;
    let batch: ObservationBatch = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse observation file '{}': {}", path, e))?;

    for (i, observation) in batch.observations.iter().enumerate() {
        observation
            .validate()
            .map_err(|e| format!("Observation {} is invalid: {}", i, e))?;
    }

    let localizer = Localizer::with_config(batch.config)?;
    let result = localizer.localize_detailed(&batch.observations)?;

    for pair in &result.intersections {
        print_point(&format!("pair ({}, {})", pair.first, pair.second), &pair.point);
    }
    for (first, second) in &result.skipped {
        println!("pair ({}, {}): skipped, lines are parallel", first, second);
    }
    print_point("fused", &result.position);
    Ok(())
}

fn demo() -> Result<(), Box<dyn std::error::Error>> {
    let m = Matrix3::ned2ecef(5.0, 45.0);
    println!("NED -> ECEF at lon=5 lat=45:\n{}\n", m);
    println!("north x east:\n{}\n", m[0].cross(&m[1])?);
    println!("M * M^T:\n{}\n", m.multiply_matrix_matrix(&m.transpose()));

    let a = Point::from_components(0.0, 0.0, 0.0, 1.0, 1.0, 5.0)?;
    let b = Point::from_components(10.0, 0.0, 10.0, 1.0, 2.0, 10.0)?;
    let c = Point::from_components(10.0, 0.0, 0.0, 1.0, 2.0, 10.0)?;
    let observations = [
        Observation::new(a, Vector3::xyz(1.0, 10.0, 0.0)),
        Observation::new(b, Vector3::xyz(-1.0, 10.0, -1.0)),
        Observation::new(c, Vector3::xyz(-1.0, 10.0, 0.0)),
    ];

    let result = Localizer::new().localize_detailed(&observations)?;
    for pair in &result.intersections {
        print_point(&format!("pair ({}, {})", pair.first, pair.second), &pair.point);
    }
    print_point("fused", &result.position);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => demo(),
        2 => run_batch(&args[1]),
        _ => {
            eprintln!(
                "Usage: {} [observations.json]",
                args.first().map_or("triangulation", |s| s.as_str())
            );
            Err("Invalid arguments".into())
        }
    }
}
