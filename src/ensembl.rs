use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::KiraError;
use crate::http::{ServiceErrors, build_client, trim_base};

pub const ENSEMBL_BASE: &str = "https://rest.ensembl.org";

const ERRORS: ServiceErrors = ServiceErrors {
    name: "Ensembl",
    http: KiraError::EnsemblHttp,
    status: |status, message| KiraError::EnsemblStatus { status, message },
    parse: KiraError::EnsemblParse,
};

pub trait AnnotationClient: Send + Sync {
    fn lookup(&self, species: &str, symbol: &str) -> Result<Value, KiraError>;
}

#[derive(Clone)]
pub struct EnsemblHttpClient {
    client: Client,
    base_url: String,
}

impl EnsemblHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, KiraError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: trim_base(base_url),
        })
    }

    pub fn lookup_url(&self, species: &str, symbol: &str) -> Result<Url, KiraError> {
        ERRORS.url(&self.base_url, &["lookup", "symbol", species, symbol])
    }
}

impl AnnotationClient for EnsemblHttpClient {
    fn lookup(&self, species: &str, symbol: &str) -> Result<Value, KiraError> {
        let request = self
            .client
            .get(self.lookup_url(species, symbol)?)
            .query(&[("content-type", "application/json")]);
        ERRORS.json(request)
    }
}
