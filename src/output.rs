use std::io::{self, Write};

use serde::Serialize;
use serde_json::{Value, json};

use crate::app::LookupResult;
use crate::error::KiraError;
use crate::record::BatchResult;

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_lookup(result: &LookupResult) -> Result<(), KiraError> {
        Self::print_json(result)
    }

    pub fn print_batch(result: &BatchResult) -> Result<(), KiraError> {
        Self::print_json(result)
    }

    pub fn print_summaries(result: &serde_json::Map<String, Value>) -> Result<(), KiraError> {
        Self::print_json(result)
    }

    /// Structured error document for requests rejected before any lookup.
    pub fn print_error(err: &KiraError) -> Result<(), KiraError> {
        Self::print_json(&error_document(err))
    }

    fn print_json<T: Serialize>(value: &T) -> Result<(), KiraError> {
        let json =
            serde_json::to_string_pretty(value).map_err(|err| KiraError::Output(err.to_string()))?;
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(json.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .map_err(|err| KiraError::Output(err.to_string()))
    }
}

pub fn error_document(err: &KiraError) -> Value {
    json!({ "error": err.to_string() })
}
