use clap::Parser;
use log::info;
use std::f64::consts::FRAC_1_SQRT_2;
use ziggurat_rs::{Ziggurat, erf};

#[derive(Parser, Debug)]
#[command(version, about = "Histogram of Ziggurat normal deviates against the expected counts", long_about = None)]
struct Args {
    /// Number of variates to draw
    #[arg(short = 'n', long, default_value_t = 10_000_000)]
    samples: usize,

    /// Number of histogram bins
    #[arg(short, long, default_value_t = 100)]
    bins: usize,

    /// Seed for the uniform source
    #[arg(short, long, default_value_t = 17)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.bins > 0, "need at least one bin");

    let mut rng = Ziggurat::new(args.seed)?;

    // Heap-allocated buffers
    let variate: Vec<f64> = (0..args.samples).map(|_| rng.normal()).collect();
    let mut bin = vec![0usize; args.bins];

    let minv = variate.iter().cloned().fold(0.0f64, f64::min);
    let maxv = variate.iter().cloned().fold(0.0f64, f64::max);
    info!("{} variates in [{}, {}]", args.samples, minv, maxv);

    let binwidth = (maxv - minv) / args.bins as f64;

    // Histogram
    for &v in &variate {
        let j = (((v - minv) / binwidth).floor() as usize).min(args.bins - 1);
        bin[j] += 1;
    }

    let mut chi2 = 0.0;
    for (i, &count) in bin.iter().enumerate() {
        let x0 = minv + binwidth * i as f64;
        let x1 = x0 + binwidth;
        let p = 0.5 * (erf(x1 * FRAC_1_SQRT_2) - erf(x0 * FRAC_1_SQRT_2));
        let expected = args.samples as f64 * p;
        if expected > 0.0 {
            chi2 += (count as f64 - expected).powi(2) / expected;
        }
        println!("{} {} {}", x0 + 0.5 * binwidth, count, expected);
    }
    info!("chi-squared over {} bins: {}", args.bins, chi2);

    Ok(())
}
