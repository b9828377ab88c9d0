use crate::error::Result;
use crate::layers::Update;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::result::{TrainingResult, TrainingStatus};
use crate::train::sample::TrainingSample;
use crate::train::train_config::TrainingOptions;
use crate::validate;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `samples` with back-propagation.
///
/// Each epoch walks the samples in order: forward pass, output errors
/// `target - output`, then correction from the output layer back to the first
/// hidden layer. After the epoch the mean per-sample error is compared with
/// `options.error_threshold`.
///
/// # Callbacks
/// - `on_progress(epoch, mean_error)` every `options.frequency` epochs
/// - `on_success` once the threshold is reached
/// - `on_fail` when `options.max_epochs` run out first
///
/// All run inline. A callback returning `Err` stops training and the error is
/// returned as is.
///
/// # Errors
/// Invalid samples or options are rejected before any weight changes.
pub fn train_loop(
    network: &mut Network,
    samples: &[TrainingSample],
    mut options: TrainingOptions,
) -> Result<TrainingResult> {
    validate::training_set(network, samples)?;
    options.check()?;

    let batch_size = options.batch.size(samples.len());
    tracing::debug!(
        "Training {:?} on {} samples: batch size {}, threshold {}, max {} epochs",
        network.layer_sizes(),
        samples.len(),
        batch_size,
        options.error_threshold,
        options.max_epochs
    );

    let mut epoch = 0;
    let mut mean_error = f64::INFINITY;

    while epoch < options.max_epochs {
        epoch += 1;
        mean_error = run_one_epoch(network, samples, batch_size)?;
        tracing::trace!("Epoch {}: mean error {}", epoch, mean_error);

        if options.frequency > 0 && epoch % options.frequency == 0 {
            if let Some(on_progress) = options.on_progress.as_mut() {
                on_progress(epoch, mean_error)?;
            }
        }

        if mean_error <= options.error_threshold {
            tracing::debug!("Converged after {} epochs, mean error {}", epoch, mean_error);
            if let Some(on_success) = options.on_success.as_mut() {
                on_success(epoch, mean_error)?;
            }
            return Ok(TrainingResult { status: TrainingStatus::Success, epoch, mean_error });
        }
    }

    tracing::debug!("Stopped at {} epochs without converging, mean error {}", epoch, mean_error);
    if let Some(on_fail) = options.on_fail.as_mut() {
        on_fail(epoch, mean_error)?;
    }
    Ok(TrainingResult { status: TrainingStatus::Failure, epoch, mean_error })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one pass over the samples in their given order and returns the mean
/// per-sample error. With `batch_size == 1` weights change after every
/// sample; otherwise changes are accumulated and the batch average applied
/// at the end of each batch.
fn run_one_epoch(network: &mut Network, samples: &[TrainingSample], batch_size: usize) -> Result<f64> {
    let update = if batch_size == 1 { Update::Immediate } else { Update::Accumulate };
    let mut total_error = 0.0;

    for batch in samples.chunks(batch_size) {
        for sample in batch {
            let output = network.activate(&sample.input)?;
            total_error += MseLoss::loss(&output, &sample.output);

            let errors = MseLoss::residual(&output, &sample.output);
            network.correct_with(&errors, update)?;
        }

        if update == Update::Accumulate {
            network.apply_pending(1.0 / batch.len() as f64);
        }
    }

    Ok(total_error / samples.len() as f64)
}
