use serde::Deserialize;
use serde_json::Value;

use crate::domain::{GeneQuery, Species};
use crate::error::KiraError;

/// Accepted shapes of a combined-lookup body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Symbols(Vec<String>),
    Object(ObjectBody),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectBody {
    #[serde(default)]
    pub gene_symbols: Vec<String>,
    #[serde(default)]
    pub species: Option<String>,
}

impl TryFrom<Value> for RequestBody {
    type Error = KiraError;

    /// Dispatches on the JSON type first so an array never parses as an object.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(_) => serde_json::from_value(value).map(RequestBody::Symbols),
            Value::Object(_) => serde_json::from_value(value).map(RequestBody::Object),
            _ => return Err(KiraError::invalid_format()),
        }
        .map_err(|_| KiraError::invalid_format())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRequest {
    pub queries: Vec<GeneQuery>,
    pub species: Species,
}

impl GeneRequest {
    /// A blank symbol makes the body itself malformed, so it is reported as
    /// `InvalidRequest`. Any non-blank symbol is accepted as given.
    pub fn from_symbols<S: AsRef<str>>(symbols: &[S], species: Species) -> Result<Self, KiraError> {
        let queries = symbols
            .iter()
            .map(|symbol| {
                GeneQuery::parse(symbol.as_ref(), &species)
                    .map_err(|err| KiraError::InvalidRequest(err.to_string()))
            })
            .collect::<Result<Vec<_>, KiraError>>()?;
        Ok(Self { queries, species })
    }

    pub fn from_body(body: RequestBody, default_species: &Species) -> Result<Self, KiraError> {
        match body {
            RequestBody::Symbols(symbols) => Self::from_symbols(&symbols, default_species.clone()),
            RequestBody::Object(ObjectBody {
                gene_symbols,
                species,
            }) => {
                let species = match species.as_deref().map(str::trim) {
                    Some(value) if !value.is_empty() => value.parse()?,
                    _ => default_species.clone(),
                };
                Self::from_symbols(&gene_symbols, species)
            }
        }
    }

    pub fn from_value(value: Value, default_species: &Species) -> Result<Self, KiraError> {
        Self::from_body(RequestBody::try_from(value)?, default_species)
    }

    pub fn from_json(raw: &str, default_species: &Species) -> Result<Self, KiraError> {
        let value: Value = serde_json::from_str(raw).map_err(|_| KiraError::invalid_format())?;
        Self::from_value(value, default_species)
    }
}
