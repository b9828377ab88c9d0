// End-to-end behaviour of network construction, activation and training.

use anny::{
    validate, Batch, Error, Network, TrainingOptions, TrainingSample, TrainingStatus,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn xor() -> Vec<TrainingSample> {
    vec![
        TrainingSample::new(vec![0.0, 0.0], vec![0.0]),
        TrainingSample::new(vec![0.0, 1.0], vec![1.0]),
        TrainingSample::new(vec![1.0, 0.0], vec![1.0]),
        TrainingSample::new(vec![1.0, 1.0], vec![0.0]),
    ]
}

#[test]
fn single_epoch_reports_its_outcome() {
    let mut network = Network::new(&[1, 1]).unwrap();
    let samples = [TrainingSample::new(vec![0.0], vec![0.0])];
    let options = TrainingOptions::default().max_epochs(1).error_threshold(0.0);

    let result = network.train(&samples, options).unwrap();

    assert!(matches!(result.status, TrainingStatus::Success | TrainingStatus::Failure));
    assert_eq!(result.epoch, 1);
}

#[test]
fn activation_is_repeatable() {
    let mut network = Network::new(&[3, 4, 2]).unwrap();
    let first = network.activate(&[0.1, 0.2, 0.3]).unwrap();
    let second = network.activate(&[0.1, 0.2, 0.3]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn layers_are_fully_connected() {
    let network = Network::new(&[3, 5, 2, 4]).unwrap();
    for pair in network.layers().windows(2) {
        let (source, target) = (&pair[0], &pair[1]);
        assert!(source.neurons.iter().all(|n| n.outgoing.len() == target.size()));
        assert!(target.neurons.iter().all(|n| n.incoming.len() == source.size()));
    }
}

#[test]
fn same_seed_same_training_run() {
    let run = || {
        let mut network = Network::with_rng(&[2, 3, 1], &mut StdRng::seed_from_u64(42)).unwrap();
        let options = TrainingOptions::default().max_epochs(50).error_threshold(0.0);
        let result = network.train(&xor(), options).unwrap();
        (result, network.activate(&[1.0, 0.0]).unwrap())
    };
    assert_eq!(run(), run());
}

#[test]
fn learns_xor_online() {
    let mut network = Network::with_rng(&[2, 4, 1], &mut StdRng::seed_from_u64(7)).unwrap();
    let options = TrainingOptions::default().error_threshold(0.01).max_epochs(20_000);
    let result = network.train(&xor(), options).unwrap();

    assert!(result.mean_error < 0.1, "{result:?}");
    for sample in xor() {
        let output = network.activate(&sample.input).unwrap()[0];
        assert!((output - sample.output[0]).abs() < 0.5, "{:?} -> {output}", sample.input);
    }
}

#[test]
fn mini_batches_reduce_error() {
    let mut network = Network::with_rng(&[2, 3, 1], &mut StdRng::seed_from_u64(3)).unwrap();
    let once = TrainingOptions::default().batch(Batch::Size(2)).max_epochs(1).error_threshold(0.0);
    let start = network.train(&xor(), once).unwrap().mean_error;

    let more = TrainingOptions::default().batch(Batch::Size(2)).max_epochs(3000).error_threshold(0.0);
    let end = network.train(&xor(), more).unwrap().mean_error;
    assert!(end < start);
}

#[test]
fn failed_validation_leaves_weights_untouched() {
    let mut network = Network::with_rng(&[2, 1], &mut StdRng::seed_from_u64(1)).unwrap();
    let before = network.activate(&[0.5, 0.5]).unwrap();

    let mut samples = xor();
    samples.push(TrainingSample::new(vec![1.0], vec![0.0]));
    let err = network.train(&samples, TrainingOptions::default()).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { expected: 2, actual: 1, .. }));

    let err = network.train(&xor(), TrainingOptions::default().max_epochs(0)).unwrap_err();
    assert!(matches!(err, Error::InvalidTrainingOptions(_)));

    assert_eq!(network.activate(&[0.5, 0.5]).unwrap(), before);
}

#[test]
fn trains_from_json_input() {
    let mut network = Network::new(&[2, 1]).unwrap();
    let data = json!([
        { "input": [0, 0], "output": [0] },
        { "input": [1, 1], "output": [1] }
    ]);
    let samples = validate::training_data(&network, &data).unwrap();
    let options = TrainingOptions::from_value(&json!({ "maxEpochs": 5, "errorThreshold": 0 })).unwrap();

    let result = network.train(&samples, options).unwrap();
    assert_eq!(result.epoch, 5);
}

#[test]
fn loads_options_from_a_file() {
    let path = std::env::temp_dir().join(format!("anny-options-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"batch": true, "frequency": 10, "maxEpochs": 25}"#).unwrap();
    let options = TrainingOptions::load_json(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(options.batch, Batch::Epoch);
    assert_eq!(options.frequency, 10);
    assert_eq!(options.max_epochs, 25);

    assert!(matches!(TrainingOptions::load_json("/nonexistent/anny.json"), Err(Error::Io(_))));
}
