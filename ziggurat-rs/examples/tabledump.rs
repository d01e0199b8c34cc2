use clap::Parser;
use ziggurat_rs::{BisectSettings, DensityCurve, Gaussian, area_diff, calibrate};

#[derive(Parser, Debug)]
#[command(version, about = "Calibrate a standard normal Ziggurat table and print it", long_about = None)]
struct Args {
    /// Number of strips
    #[arg(short, long, default_value_t = 256)]
    layers: usize,

    /// Bisection tolerance on the tail boundary
    #[arg(short, long, default_value_t = 1e-5)]
    eps: f64,

    /// Bisection iteration budget
    #[arg(short, long, default_value_t = 100)]
    max_iter: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let curve = Gaussian::STANDARD;
    let settings = BisectSettings {
        eps: args.eps,
        max_iter: args.max_iter,
    };
    let table = calibrate(args.layers, &curve, &settings)?;

    println!("# layers     {}", table.layers());
    println!("# x1         {}", table.x1());
    println!("# layer area {}", table.layer_area());
    println!("# area diff  {}", area_diff(table.x1(), args.layers, &curve)?);
    println!("# peak       {}", curve.peak());
    for (i, b) in table.boundaries().iter().enumerate() {
        println!("{} {} {}", i, b.x, b.y);
    }

    Ok(())
}
