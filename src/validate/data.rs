//! Checks on training data as it arrives from outside the program (parsed
//! JSON), and on already-typed sample sets.
//!
//! Every check returns `Ok(())` or the error describing the first problem.
//! Per-sample checks take the sample's position so messages can name it.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::network::Network;
use crate::train::TrainingSample;

fn invalid(message: String) -> Error {
    Error::InvalidTrainingData(message)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn field<'a>(sample: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    sample.get(key).and_then(Value::as_array)
}

fn numbers(values: &[Value]) -> Vec<f64> {
    values.iter().filter_map(Value::as_f64).collect()
}

pub fn data_is_array(data: &Value) -> Result<()> {
    if data.is_array() {
        Ok(())
    } else {
        Err(invalid(format!("training data must be an array, got {}.", kind(data))))
    }
}

pub fn data_is_not_empty(data: &Value) -> Result<()> {
    match data.as_array() {
        Some(samples) if !samples.is_empty() => Ok(()),
        _ => Err(invalid("training data must not be empty.".to_string())),
    }
}

pub fn sample_is_object(sample: &Value, index: usize) -> Result<()> {
    if sample.is_object() {
        Ok(())
    } else {
        Err(invalid(format!("training sample {index} must be an object, got {}.", kind(sample))))
    }
}

pub fn sample_has_input(sample: &Value, index: usize) -> Result<()> {
    field(sample, "input")
        .map(|_| ())
        .ok_or_else(|| invalid(format!("training sample {index} must have an \"input\" array.")))
}

pub fn sample_has_output(sample: &Value, index: usize) -> Result<()> {
    field(sample, "output")
        .map(|_| ())
        .ok_or_else(|| invalid(format!("training sample {index} must have an \"output\" array.")))
}

pub fn sample_input_is_not_empty(sample: &Value, index: usize) -> Result<()> {
    match field(sample, "input") {
        Some(input) if !input.is_empty() => Ok(()),
        _ => Err(invalid(format!("training sample {index} \"input\" must not be empty."))),
    }
}

pub fn sample_output_is_not_empty(sample: &Value, index: usize) -> Result<()> {
    match field(sample, "output") {
        Some(output) if !output.is_empty() => Ok(()),
        _ => Err(invalid(format!("training sample {index} \"output\" must not be empty."))),
    }
}

pub fn sample_input_is_only_numbers(sample: &Value, index: usize) -> Result<()> {
    match field(sample, "input") {
        Some(input) if input.iter().all(Value::is_number) => Ok(()),
        _ => Err(invalid(format!("training sample {index} \"input\" must contain only numbers."))),
    }
}

pub fn sample_output_is_only_numbers(sample: &Value, index: usize) -> Result<()> {
    match field(sample, "output") {
        Some(output) if output.iter().all(Value::is_number) => Ok(()),
        _ => Err(invalid(format!("training sample {index} \"output\" must contain only numbers."))),
    }
}

pub fn sample_input_fits_network(sample: &Value, index: usize, network: &Network) -> Result<()> {
    let len = field(sample, "input").map_or(0, Vec::len);
    input_fits(len, index, network)
}

pub fn sample_output_fits_network(sample: &Value, index: usize, network: &Network) -> Result<()> {
    let len = field(sample, "output").map_or(0, Vec::len);
    output_fits(len, index, network)
}

fn input_fits(len: usize, index: usize, network: &Network) -> Result<()> {
    if len == network.input_size() {
        Ok(())
    } else {
        Err(Error::shape(format!("training sample {index} \"input\""), network.input_size(), len))
    }
}

fn output_fits(len: usize, index: usize, network: &Network) -> Result<()> {
    if len == network.output_size() {
        Ok(())
    } else {
        Err(Error::shape(format!("training sample {index} \"output\""), network.output_size(), len))
    }
}

/// Runs every data check, sample by sample, stopping at the first failure.
/// On success returns the samples converted to `TrainingSample`s.
pub fn training_data(network: &Network, data: &Value) -> Result<Vec<TrainingSample>> {
    data_is_array(data)?;
    data_is_not_empty(data)?;

    let raw = data.as_array().map(Vec::as_slice).unwrap_or_default();
    let mut samples = Vec::with_capacity(raw.len());

    for (index, sample) in raw.iter().enumerate() {
        sample_is_object(sample, index)?;
        sample_has_input(sample, index)?;
        sample_has_output(sample, index)?;
        sample_input_is_not_empty(sample, index)?;
        sample_output_is_not_empty(sample, index)?;
        sample_input_is_only_numbers(sample, index)?;
        sample_output_is_only_numbers(sample, index)?;
        sample_input_fits_network(sample, index, network)?;
        sample_output_fits_network(sample, index, network)?;

        let input = field(sample, "input").map_or_else(Vec::new, |v| numbers(v));
        let output = field(sample, "output").map_or_else(Vec::new, |v| numbers(v));
        samples.push(TrainingSample::new(input, output));
    }

    Ok(samples)
}

/// The checks that still apply once samples are typed: a non-empty set,
/// non-empty vectors, and sizes that match the network. Every `f64` counts
/// as a number, NaN and infinities included.
pub fn training_set(network: &Network, samples: &[TrainingSample]) -> Result<()> {
    if samples.is_empty() {
        return Err(invalid("training data must not be empty.".to_string()));
    }

    for (index, sample) in samples.iter().enumerate() {
        if sample.input.is_empty() {
            return Err(invalid(format!("training sample {index} \"input\" must not be empty.")));
        }
        if sample.output.is_empty() {
            return Err(invalid(format!("training sample {index} \"output\" must not be empty.")));
        }
        input_fits(sample.input.len(), index, network)?;
        output_fits(sample.output.len(), index, network)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn network(sizes: &[usize]) -> Network {
        Network::new(sizes).unwrap()
    }

    #[test]
    fn data_is_array_accepts_any_array() {
        assert!(data_is_array(&json!("not array")).is_err());
        assert!(data_is_array(&json!(null)).is_err());
        assert!(data_is_array(&json!([])).is_ok());
        assert!(data_is_array(&json!(["array"])).is_ok());
    }

    #[test]
    fn data_is_not_empty_needs_one_item() {
        assert!(data_is_not_empty(&json!([])).is_err());
        assert!(data_is_not_empty(&json!(["item"])).is_ok());
    }

    #[test]
    fn sample_must_be_an_object() {
        for bad in [json!(null), json!("not an object"), json!(1), json!([])] {
            assert!(sample_is_object(&bad, 0).is_err(), "{bad}");
        }
        assert!(sample_is_object(&json!({}), 0).is_ok());
    }

    #[test]
    fn input_and_output_must_be_arrays() {
        for bad in [json!(null), json!("not an array"), json!(1), json!({})] {
            let sample = json!({ "input": bad.clone(), "output": bad });
            assert!(sample_has_input(&sample, 0).is_err());
            assert!(sample_has_output(&sample, 0).is_err());
        }
        assert!(sample_has_input(&json!({ "output": [] }), 0).is_err());

        let sample = json!({ "input": [], "output": [] });
        assert!(sample_has_input(&sample, 0).is_ok());
        assert!(sample_has_output(&sample, 0).is_ok());
        assert!(sample_input_is_not_empty(&sample, 0).is_err());
        assert!(sample_output_is_not_empty(&sample, 0).is_err());
    }

    #[test]
    fn entries_must_be_numbers() {
        for bad in [json!(null), json!("a"), json!({}), json!([])] {
            let sample = json!({ "input": [bad.clone()], "output": [bad] });
            assert!(sample_input_is_only_numbers(&sample, 0).is_err());
            assert!(sample_output_is_only_numbers(&sample, 0).is_err());
        }
        let sample = json!({ "input": [1], "output": [0.5] });
        assert!(sample_input_is_only_numbers(&sample, 0).is_ok());
        assert!(sample_output_is_only_numbers(&sample, 0).is_ok());
    }

    #[test]
    fn sample_sizes_must_fit_the_network() {
        let sample = json!({ "input": [0, 0], "output": [0, 0] });
        assert!(matches!(
            sample_input_fits_network(&sample, 0, &network(&[1, 1])),
            Err(Error::ShapeMismatch { expected: 1, actual: 2, .. })
        ));
        assert!(sample_output_fits_network(&sample, 0, &network(&[1, 1])).is_err());
        assert!(sample_input_fits_network(&sample, 0, &network(&[2, 1])).is_ok());
        assert!(sample_output_fits_network(&sample, 0, &network(&[1, 2])).is_ok());
    }

    #[test]
    fn training_data_names_the_offending_sample() {
        let data = json!([
            { "input": [0], "output": [1] },
            { "input": [0], "output": ["x"] }
        ]);
        let err = training_data(&network(&[1, 1]), &data).unwrap_err();
        assert!(err.to_string().contains("sample 1"), "{err}");
    }

    #[test]
    fn training_data_returns_typed_samples() {
        let data = json!([{ "input": [0, 1], "output": [1] }]);
        let samples = training_data(&network(&[2, 1]), &data).unwrap();
        assert_eq!(samples, vec![TrainingSample::new(vec![0.0, 1.0], vec![1.0])]);
    }

    #[test]
    fn training_set_checks_emptiness_and_size_only() {
        let net = network(&[1, 1]);
        assert!(matches!(training_set(&net, &[]), Err(Error::InvalidTrainingData(_))));
        let empty = [TrainingSample::new(vec![], vec![0.0])];
        assert!(matches!(training_set(&net, &empty), Err(Error::InvalidTrainingData(_))));
        let wide = [TrainingSample::new(vec![0.0, 1.0], vec![0.0])];
        assert!(matches!(training_set(&net, &wide), Err(Error::ShapeMismatch { .. })));

        let non_finite = [TrainingSample::new(vec![f64::NAN], vec![f64::INFINITY])];
        assert!(training_set(&net, &non_finite).is_ok());
    }
}
