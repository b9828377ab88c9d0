// Trains a network on a JSON data set and prints its predictions.
//
//   anny <data.json> [options.json] [hidden sizes...]
//
// `data.json` is an array of {"input": [...], "output": [...]} samples;
// `options.json` holds training options such as {"maxEpochs": 5000}.
// Hidden layer sizes default to a single layer of 3 neurons.
// Set RUST_LOG=debug for more detail.
use std::process::ExitCode;

use anny::{validate, Network, TrainingOptions};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: anny <data.json> [options.json] [hidden sizes...]";

fn run(data_path: &str, args: &[String]) -> anny::Result<()> {
    let data: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(
        std::fs::File::open(data_path)?,
    ))?;

    let mut options = match args.first() {
        Some(path) => TrainingOptions::load_json(path)?,
        None => TrainingOptions::default(),
    };
    if options.on_progress.is_none() {
        options.on_progress = Some(anny::train::log_progress());
    }

    let hidden: Vec<usize> = args.iter().skip(1).filter_map(|s| s.parse().ok()).collect();
    let hidden = if hidden.is_empty() { vec![3] } else { hidden };

    // Peek at the first sample to size the input and output layers.
    let first = data.get(0);
    let width = |key: &str| {
        first.and_then(|s| s.get(key)).and_then(|v| v.as_array()).map_or(1, Vec::len)
    };
    let mut sizes = vec![width("input")];
    sizes.extend(hidden);
    sizes.push(width("output"));

    let mut network = Network::new(&sizes)?;
    let samples = validate::training_data(&network, &data)?;
    let result = network.train(&samples, options)?;
    tracing::info!(
        "Training finished: {:?} after {} epochs, mean error {:.6}",
        result.status,
        result.epoch,
        result.mean_error
    );

    for sample in &samples {
        let output = network.activate(&sample.input)?;
        println!("{:?} -> {:.4?} (expected {:?})", sample.input, output, sample.output);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((data_path, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    match run(data_path, rest) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
