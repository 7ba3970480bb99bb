use std::fs::File;
use std::io::{BufWriter, Write};

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
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Model one compression run: ratio climbs with level, throughput drops with
/// level and scales sub-linearly with threads.
fn simulate(level: i64, threads: i64, rng: &mut SimpleRng) -> (f64, f64) {
    let ratio = 1.5 + 0.32 * level as f64 + rng.gauss(0.0, 0.03);
    let base = 620.0 / (1.0 + 0.22 * level as f64);
    let datarate = base * (threads as f64).powf(0.82) + rng.gauss(0.0, base * 0.02);
    (ratio, datarate.max(1.0))
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_result.log".to_string());
    let file = File::create(&output_path).expect("Failed to create output file");
    let mut out = BufWriter::new(file);

    let dataset_mb = 10240.0;
    let thread_counts = [1i64, 2, 4, 8];
    let levels = 1i64..=9;

    // Two header lines, then one harness run per (threads, level) pair.
    writeln!(out, "synthetic-frames.h5").unwrap();
    writeln!(out, "/entry/instrument/detector/data").unwrap();

    let mut scans = 0;
    for &threads in &thread_counts {
        for level in levels.clone() {
            let (ratio, datarate) = simulate(level, threads, &mut rng);
            let compressed_mb = dataset_mb / ratio;
            let wall = dataset_mb / datarate;

            writeln!(
                out,
                " Dataset={dataset_mb}MB\tCompressed={compressed_mb:.1}MB"
            )
            .unwrap();
            writeln!(
                out,
                "Time: Wall={wall:.2}\tUser={:.2}\tSystem={:.2}",
                wall * threads as f64 * 0.92,
                wall * 0.04
            )
            .unwrap();
            writeln!(out, "CONFIG:\talgo=zstd\tlevel={level}\tthreads={threads}").unwrap();
            writeln!(out, "RESULT:\tRatio={ratio:.3}\tDatarate={datarate:.1} MB/s").unwrap();
            scans += 1;
        }
    }

    out.flush().expect("Failed to write output file");
    println!(
        "Wrote {scans} scans across {} thread groups to {output_path}",
        thread_counts.len()
    );
}
