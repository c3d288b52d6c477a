#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::indexing_slicing)]

//! Drives both maps with the same random keys and plots how their load
//! factor and empty buckets evolve as keys are inserted.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use plotters::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use strmap::{
    ChainedMap, OpenAddressingMap, StringMap, additive_hash, positional_hash, std_hash,
};
use tracing_subscriber::{EnvFilter, fmt};

/// Plot load-factor and empty-bucket curves for both collision strategies
#[derive(Parser, Debug)]
#[command(name = "growth_report")]
#[command(version)]
struct Args {
    /// Number of `put` calls to issue
    #[arg(short, long, default_value = "2000")]
    keys: usize,

    /// Requested capacity for both tables
    #[arg(short, long, default_value = "53")]
    initial_capacity: usize,

    /// Hash function used by both tables
    #[arg(long, value_enum, default_value = "positional")]
    hash: HashChoice,

    /// Seed for the key generator
    #[arg(short, long, default_value = "7")]
    seed: u64,

    /// Directory the PNG files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HashChoice {
    Additive,
    Positional,
    Std,
}

impl HashChoice {
    fn function(self) -> fn(&str) -> u64 {
        match self {
            Self::Additive => additive_hash,
            Self::Positional => positional_hash,
            Self::Std => std_hash,
        }
    }
}

/// Table state observed right after one `put`
#[derive(Debug, Clone, Copy)]
struct Sample {
    load: f64,
    empty_fraction: f64,
    capacity: usize,
}

/// One strategy's samples, one per `put`
#[derive(Debug)]
struct Run {
    name: &'static str,
    color: RGBColor,
    samples: Vec<Sample>,
}

fn record<M: StringMap<usize>>(mut map: M, keys: &[String]) -> Vec<Sample> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            map.put(key, i);
            Sample {
                load: map.table_load(),
                empty_fraction: map.empty_buckets() as f64 / map.capacity() as f64,
                capacity: map.capacity(),
            }
        })
        .collect()
}

fn resize_count(samples: &[Sample]) -> usize {
    samples.windows(2).filter(|pair| pair[0].capacity != pair[1].capacity).count()
}

fn plot(
    path: &Path,
    caption: &str,
    y_desc: &str,
    runs: &[Run],
    value: fn(&Sample) -> f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let line_width = 2;
    let text_size = 16;
    let title_size = 35;

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let puts = runs.iter().map(|run| run.samples.len()).max().unwrap_or(0);
    let max_y = runs
        .iter()
        .flat_map(|run| run.samples.iter().map(value))
        .fold(0.0, f64::max)
        .max(0.1) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..puts + 1, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of put calls")
        .y_desc(y_desc)
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for run in runs {
        let line_style = ShapeStyle::from(&run.color).stroke_width(line_width);
        chart
            .draw_series(LineSeries::new(
                run.samples.iter().enumerate().map(|(i, sample)| (i + 1, value(sample))),
                line_style,
            ))?
            .label(run.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,strmap=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();
    tracing::info!(?args, "starting growth report");

    // Draw keys from a range larger than the number of puts so some repeat
    let mut rng = StdRng::seed_from_u64(args.seed);
    let key_space = args.keys.saturating_mul(2).max(1);
    let keys: Vec<String> =
        (0..args.keys).map(|_| format!("key{}", rng.random_range(0..key_space))).collect();

    let hash_fn = args.hash.function();
    let runs = [
        Run {
            name: "Open addressing (quadratic probing)",
            color: RGBColor(220, 50, 50),
            samples: record(OpenAddressingMap::new(args.initial_capacity, hash_fn), &keys),
        },
        Run {
            name: "Separate chaining",
            color: RGBColor(50, 90, 220),
            samples: record(ChainedMap::new(args.initial_capacity, hash_fn), &keys),
        },
    ];

    for run in &runs {
        if let Some(last) = run.samples.last() {
            tracing::info!(
                strategy = run.name,
                capacity = last.capacity,
                load = last.load,
                resizes = resize_count(&run.samples),
                "finished inserting"
            );
        }
    }

    std::fs::create_dir_all(&args.output_dir)?;
    let load_path = args.output_dir.join("load_factor.png");
    let empty_path = args.output_dir.join("empty_buckets.png");

    plot(&load_path, "Load Factor per Put", "size / capacity", &runs, |s| s.load)?;
    plot(&empty_path, "Empty Buckets per Put", "empty / capacity", &runs, |s| s.empty_fraction)?;

    tracing::info!(
        load = %load_path.display(),
        empty = %empty_path.display(),
        "wrote plot images"
    );
    Ok(())
}
