use std::f64::consts::TAU;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Raw ADC counts are centred on this value.
const ADC_MID: f64 = 2048.0;
const SAMPLE_RATE_HZ: f64 = 1000.0;
const DURATION_S: f64 = 2.0;

/// Channels written to both files, in column order.
const CHANNELS: [&str; 7] = ["Va", "Vb", "Vc", "Ia", "Ib", "Speed", "Angle"];

/// `(scale, offset)` per channel turning ADC counts into physical units.
const SHAPING: [(f64, f64); 7] = [
    (0.0122, -25.0),
    (0.0122, -25.0),
    (0.0122, -25.0),
    (0.00488, -10.0),
    (0.00488, -10.0),
    (1.0, 0.0),
    (0.001534, 0.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform noise in `[-amplitude, amplitude)`.
    fn noise(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

/// One row of raw counts at time `t`. Speed ramps up, the electrical
/// frequency follows it, and the phases are 120° apart.
fn raw_row(t: f64, rng: &mut SimpleRng) -> [f64; 7] {
    let speed_rpm = 3000.0 * (t / DURATION_S).min(1.0);
    // 4 pole pairs
    let electrical_hz = speed_rpm / 60.0 * 4.0;
    let theta = TAU * electrical_hz * t / 2.0;

    let phase = |shift: f64, amp: f64, rng: &mut SimpleRng| {
        (ADC_MID + amp * (theta - shift).sin() + rng.noise(6.0)).round()
    };

    [
        phase(0.0, 1200.0, rng),
        phase(TAU / 3.0, 1200.0, rng),
        phase(2.0 * TAU / 3.0, 1200.0, rng),
        phase(0.3, 800.0, rng),
        phase(0.3 + TAU / 3.0, 800.0, rng),
        (speed_rpm + rng.noise(15.0)).round(),
        ((theta % TAU) / 0.001534).round(),
    ]
}

fn write_raw(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "# Raw motor bench capture (ADC counts)")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(std::iter::once("time").chain(CHANNELS))?;

    let n = (DURATION_S * SAMPLE_RATE_HZ) as usize;
    for i in 0..n {
        let t = i as f64 / SAMPLE_RATE_HZ;
        let row = raw_row(t, rng);
        let mut record = vec![format!("{t:.3}")];
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(n)
}

fn write_shaping(path: &Path, time_offset: f64) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    writeln!(file, "# Shaping: row 1 = scale, row 2 = offset")?;
    writeln!(file, "# time column: row 2 holds the global time offset [s]")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(std::iter::once("time").chain(CHANNELS))?;

    let scale = SHAPING.iter().map(|(s, _)| s.to_string());
    let offset = SHAPING.iter().map(|(_, o)| o.to_string());
    writer.write_record(std::iter::once("_".to_string()).chain(scale))?;
    writer.write_record(std::iter::once(time_offset.to_string()).chain(offset))?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let raw_path = dir.join("sample_raw.csv");
    let rows = write_raw(&raw_path, &mut rng)?;
    println!("Wrote {rows} rows to {}", raw_path.display());

    let shaping_path = dir.join("sample_shaping.csv");
    write_shaping(&shaping_path, 0.5)?;
    println!("Wrote shaping spec to {}", shaping_path.display());

    Ok(())
}
