use serde_json::Value;

use crate::error::{Error, Result};

/// Every key `training_options` accepts.
pub const TRAINING_OPTION_KEYS: [&str; 7] = [
    "batch",
    "errorThreshold",
    "frequency",
    "maxEpochs",
    "onFail",
    "onProgress",
    "onSuccess",
];

const CALLBACK_KEYS: [&str; 3] = ["onFail", "onProgress", "onSuccess"];

fn invalid(message: String) -> Error {
    Error::InvalidTrainingOptions(message)
}

/// Checks untyped training options: a JSON object with only known keys, each
/// of the right type.
///
/// JSON has no callables, so a callback key is only accepted as `null`
/// (meaning "not set"); callbacks are attached with the `TrainingOptions`
/// builder methods.
pub fn training_options(options: &Value) -> Result<()> {
    let options = options
        .as_object()
        .ok_or_else(|| invalid("training \"options\" must be a plain object.".to_string()))?;

    for (key, value) in options {
        let ok = match key.as_str() {
            "batch" => value.is_boolean() || value.is_number(),
            "errorThreshold" | "frequency" | "maxEpochs" => value.is_number(),
            k if CALLBACK_KEYS.contains(&k) => value.is_null(),
            _ => {
                return Err(invalid(format!(
                    "Unknown training option \"{key}\", try: {}",
                    TRAINING_OPTION_KEYS.join(", ")
                )));
            }
        };

        if !ok {
            let expected = match key.as_str() {
                "batch" => "a boolean or number",
                k if CALLBACK_KEYS.contains(&k) => "a function",
                _ => "a number",
            };
            return Err(invalid(format!("training option \"{key}\" must be {expected}.")));
        }
    }

    Ok(())
}
