use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use log::info;

use tilt_scene::data::model::{AngleBundle, Dataset, ParseResult};
use tilt_scene::data::writer::write_all;

/// Seeded splitmix64 stream; the same seed always writes the same file.
struct Jitter {
    state: u64,
}

impl Jitter {
    fn seeded(seed: u64) -> Self {
        Jitter { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

/// Round to two decimals so the file reads like measured data.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = Jitter::seeded(42);

    // Same particles seen at each stage orientation, jittered a little.
    let particles: Vec<(f64, f64)> = (0..12)
        .map(|_| (rng.uniform(-10.0, 10.0), rng.uniform(-10.0, 10.0)))
        .collect();

    let stages = [
        ("untilted", 0.0, 0.0),
        ("tilt_x_15", 15.0, 0.0),
        ("tilt_x_-15", -15.0, 0.0),
        ("tilt_y_30", 0.0, 30.0),
        ("tilt_xy_45", 20.0, 45.0),
        ("tilt_y_-60", 0.0, -60.0),
        ("tilt_x_40", 40.0, 10.0),
    ];

    let datasets: ParseResult = stages
        .iter()
        .map(|&(id, x_angle, y_angle)| {
            let positions = particles
                .iter()
                .map(|&(x, y)| {
                    (
                        round2(x + rng.uniform(-0.2, 0.2)),
                        round2(y + rng.uniform(-0.2, 0.2)),
                    )
                })
                .collect();
            Dataset::new(id, AngleBundle::new(x_angle, y_angle), positions)
        })
        .collect();

    let output_path = "sample_tilts.txt";
    let file = File::create(output_path).with_context(|| format!("creating {output_path}"))?;
    let mut writer = BufWriter::new(file);
    write_all(&mut writer, &datasets).context("writing datasets")?;
    writer.flush()?;

    info!("wrote {output_path}");
    println!(
        "Wrote {} datasets ({} particles each) to {output_path}",
        datasets.len(),
        particles.len()
    );
    Ok(())
}
