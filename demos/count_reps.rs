//! Streams a synthetic landmark trace through a `RepCounter`.
//!
//! The counter configuration and the trace shape come from a TOML document,
//! either an embedded recipe or a file. Every frame is fed through
//! `RepCounter::count` exactly as a pose pipeline would.
//!
//! Run with:
//!   cargo run --example count_reps --features serde                       # squats recipe
//!   cargo run --example count_reps --features serde -- --recipe raw
//!   cargo run --example count_reps --features serde -- --config my.toml
//!   RUST_LOG=repcount=debug cargo run --example count_reps --features serde
//!
//! Output: `output/count_reps.csv` and `output/count_reps.png`

mod common;

use clap::Parser;
use plotters::prelude::*;
use repcount::{find_peaks, RepCounter, RepCounterConfig};
use serde::Deserialize;
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// Recipe Constants
// ============================================================================

const RECIPE_SQUATS: &str = r#"
[counter]
min_buffer_size = 20
distance = 10
filter_constant = 10.0
use_filter = true

[signal]
lead_in = 30
reps = 8
period = 40
lead_out = 30
amplitude = 0.25
jitter = 0.03
seed = 42
"#;

const RECIPE_JUMPING_JACKS: &str = r#"
[counter]
distance = 8
filter_constant = 3.0
prominence = 0.05

[signal]
lead_in = 20
reps = 15
period = 18
lead_out = 20
amplitude = 0.15
jitter = 0.02
seed = 7
"#;

const RECIPE_RAW: &str = r#"
[counter]
use_filter = false
distance = 10

[signal]
lead_in = 20
reps = 5
period = 20
lead_out = 0
amplitude = 1.0
jitter = 0.0
seed = 0
"#;

// ============================================================================
// Configuration Structures
// ============================================================================

#[derive(Deserialize)]
struct DemoConfig {
    #[serde(default)]
    counter: RepCounterConfig,
    signal: SignalConfig,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Deserialize)]
struct SignalConfig {
    lead_in: usize,
    reps: usize,
    period: usize,
    lead_out: usize,
    amplitude: f64,
    #[serde(default)]
    jitter: f64,
    #[serde(default)]
    seed: u64,
}

#[derive(Deserialize)]
#[serde(default)]
struct OutputConfig {
    csv_path: String,
    plot_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "output/count_reps.csv".to_string(),
            plot_path: "output/count_reps.png".to_string(),
        }
    }
}

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recipe name (squats, jumping-jacks, raw)
    #[arg(short, long)]
    recipe: Option<String>,

    /// Custom config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Skip the PNG plot
    #[arg(long)]
    no_plot: bool,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repcount=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let args = Args::parse();

    println!("=== Repetition Counter Demo ===\n");

    let config_str = if let Some(config_path) = args.config {
        println!("Loading config: {}", config_path);
        fs::read_to_string(config_path)?
    } else {
        let recipe_name = args.recipe.as_deref().unwrap_or("squats");
        println!("Using recipe: {}", recipe_name);
        load_recipe(recipe_name)?.to_string()
    };

    let config: DemoConfig =
        toml::from_str(&config_str).map_err(|e| format!("Failed to parse TOML config: {}", e))?;

    let counter_config = config.counter;
    println!();
    println!("Counter:");
    println!("  min_buffer_size: {}", counter_config.min_buffer_size);
    println!("  distance:        {}", counter_config.distance);
    println!("  prominence:      {}", counter_config.prominence);
    println!("  use_filter:      {}", counter_config.use_filter);
    println!("  filter_constant: {}", counter_config.filter_constant);

    let s = &config.signal;
    let signal = common::session(
        s.lead_in,
        s.reps,
        s.period,
        s.lead_out,
        s.amplitude,
        s.jitter,
        s.seed,
    );
    println!();
    println!(
        "Signal: {} frames, {} reps of {} frames, jitter {}",
        signal.len(),
        s.reps,
        s.period,
        s.jitter
    );

    let mut counter = RepCounter::new(counter_config)?;
    let mut per_frame = Vec::with_capacity(signal.len());
    let mut last = 0;

    for (frame, &y) in signal.iter().enumerate() {
        let reps = match counter.count(y) {
            Ok(reps) => reps,
            Err(e) => {
                println!("  frame {:4}: {}", frame + 1, e);
                counter.rep_count()
            }
        };
        if reps != last {
            println!("  frame {:4}: reps = {}", frame + 1, reps);
            last = reps;
        }
        per_frame.push(reps);
    }

    println!();
    println!("Expected reps: {}", s.reps);
    println!("Counted reps:  {}", counter.rep_count());

    let trace = if counter.smoothed().is_empty() {
        counter.buffer()
    } else {
        counter.smoothed()
    };
    let peaks = find_peaks(trace, counter_config.distance, counter_config.prominence);

    if let Some(parent) = std::path::Path::new(&config.output.csv_path).parent() {
        fs::create_dir_all(parent)?;
    }
    println!("\nWriting CSV to {}...", config.output.csv_path);
    write_csv(&config.output.csv_path, counter.buffer(), counter.smoothed(), &per_frame)?;

    if !args.no_plot {
        if let Some(parent) = std::path::Path::new(&config.output.plot_path).parent() {
            fs::create_dir_all(parent)?;
        }
        println!("Generating plot to {}...", config.output.plot_path);
        generate_plot(&config.output.plot_path, counter.buffer(), counter.smoothed(), &peaks)?;
    }

    println!("\nDone!");
    Ok(())
}

fn load_recipe(name: &str) -> Result<&'static str, Box<dyn Error>> {
    match name {
        "squats" => Ok(RECIPE_SQUATS),
        "jumping-jacks" => Ok(RECIPE_JUMPING_JACKS),
        "raw" => Ok(RECIPE_RAW),
        _ => Err(format!(
            "Unknown recipe: {}. Available: squats, jumping-jacks, raw",
            name
        )
        .into()),
    }
}

fn write_csv(
    path: &str,
    raw: &[f64],
    smoothed: &[f64],
    reps: &[usize],
) -> Result<(), Box<dyn Error>> {
    let mut file = File::create(path)?;
    writeln!(file, "frame,raw,smoothed,reps")?;

    for (i, (&y, &r)) in raw.iter().zip(reps).enumerate() {
        match smoothed.get(i) {
            Some(s) => writeln!(file, "{},{:.6},{:.6},{}", i, y, s, r)?,
            None => writeln!(file, "{},{:.6},,{}", i, y, r)?,
        }
    }

    Ok(())
}

fn generate_plot(
    path: &str,
    raw: &[f64],
    smoothed: &[f64],
    peaks: &[usize],
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = raw
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let margin = ((hi - lo) * 0.1).max(1e-3);
    let trace = if smoothed.is_empty() { raw } else { smoothed };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Repetition count: {}", peaks.len()),
            ("sans-serif", 24).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..raw.len() as f64, (lo - margin)..(hi + margin))?;

    chart
        .configure_mesh()
        .x_desc("Frame")
        .y_desc("Landmark height")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            raw.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            ShapeStyle::from(&RGBColor(200, 200, 200)).stroke_width(1),
        ))?
        .label("Raw")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RGBColor(200, 200, 200)));

    if !smoothed.is_empty() {
        chart
            .draw_series(LineSeries::new(
                smoothed.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                ShapeStyle::from(&BLUE).stroke_width(2),
            ))?
            .label("LOESS")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    }

    chart
        .draw_series(
            peaks
                .iter()
                .map(|&p| Circle::new((p as f64, trace[p]), 5, RED.filled())),
        )?
        .label("Peaks")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}
