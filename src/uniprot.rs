use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::domain::UniprotId;
use crate::error::KiraError;
use crate::http::{ServiceErrors, build_client, trim_base};

pub const UNIPROT_BASE: &str = "https://rest.uniprot.org/uniprotkb";

const ERRORS: ServiceErrors = ServiceErrors {
    name: "UniProt",
    http: KiraError::UniprotHttp,
    status: |status, message| KiraError::UniprotStatus { status, message },
    parse: KiraError::UniprotParse,
};

pub trait ProteinClient: Send + Sync {
    /// Candidate accessions for a UniProtKB query, in the order UniProt ranks them.
    fn search(&self, query: &str) -> Result<Vec<String>, KiraError>;

    /// Full UniProtKB entry as returned by the service.
    fn entry(&self, accession: &str) -> Result<Value, KiraError>;

    /// Entry for the first search hit, `None` when the search matched nothing.
    fn best_match(&self, query: &str) -> Result<Option<Value>, KiraError> {
        let candidates = self.search(query)?;
        let Some(first) = candidates.first() else {
            tracing::debug!(query, "uniprot search returned no candidates");
            return Ok(None);
        };
        self.entry(first).map(Some)
    }
}

#[derive(Clone)]
pub struct UniprotHttpClient {
    client: Client,
    base_url: String,
}

impl UniprotHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, KiraError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: trim_base(base_url),
        })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub fn entry_url(&self, id: &UniprotId) -> String {
        format!("{}/{}.json", self.base_url, id.as_str())
    }
}

impl ProteinClient for UniprotHttpClient {
    fn search(&self, query: &str) -> Result<Vec<String>, KiraError> {
        let request = self.client.get(self.search_url()).query(&[
            ("query", query),
            ("format", "json"),
            ("fields", "accession"),
        ]);
        let payload = ERRORS.json(request)?;
        Ok(search_accessions(&payload))
    }

    fn entry(&self, accession: &str) -> Result<Value, KiraError> {
        let id: UniprotId = accession.parse()?;
        ERRORS.json(self.client.get(self.entry_url(&id)))
    }
}

pub fn search_accessions(payload: &Value) -> Vec<String> {
    payload
        .get("results")
        .and_then(|v| v.as_array())
        .map(|results| results.iter().filter_map(primary_accession).collect())
        .unwrap_or_default()
}

pub fn primary_accession(entry: &Value) -> Option<String> {
    entry
        .get("primaryAccession")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
}
