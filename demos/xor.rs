use anny::{Batch, Network, TrainingOptions, TrainingSample};

fn main() {
    tracing_subscriber::fmt::init();

    let mut network = Network::new(&[2, 3, 1]).expect("valid topology");

    let samples = vec![
        TrainingSample::new(vec![1.0, 0.0], vec![1.0]),
        TrainingSample::new(vec![1.0, 1.0], vec![0.0]),
        TrainingSample::new(vec![0.0, 1.0], vec![1.0]),
        TrainingSample::new(vec![0.0, 0.0], vec![0.0]),
    ];

    let options = TrainingOptions::default()
        .batch(Batch::Online)
        .error_threshold(0.001)
        .frequency(1000)
        .max_epochs(20_000)
        .on_progress(|epoch, error| {
            println!("Epoch {epoch}: error = {error:.6}");
            Ok(())
        })
        .on_success(|epoch, error| {
            println!("Converged at epoch {epoch} (error {error:.6})");
            Ok(())
        })
        .on_fail(|epoch, error| {
            println!("Gave up after {epoch} epochs (error {error:.6})");
            Ok(())
        });

    network.train(&samples, options).expect("training data is valid");

    for sample in &samples {
        let output = network.activate(&sample.input).expect("input fits");
        println!("Input: {:?} -> Output: {:.4}", sample.input, output[0]);
    }
}
