use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::KiraError;
use crate::http::{ServiceErrors, build_client, trim_base};

pub const EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

pub const DEFAULT_MAX_RESULTS: usize = 5;

const ERRORS: ServiceErrors = ServiceErrors {
    name: "PubMed",
    http: KiraError::PubmedHttp,
    status: |status, message| KiraError::PubmedStatus { status, message },
    parse: KiraError::PubmedParse,
};

/// Search hits that survived the summary step, in search order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LiteratureHits {
    pub ids: Vec<String>,
    pub summaries: Map<String, Value>,
}

impl LiteratureHits {
    /// Keeps the search ids the summary payload actually describes.
    pub fn from_summaries(search_ids: &[String], result: &Map<String, Value>) -> Self {
        let mut hits = Self::default();
        for id in search_ids {
            if let Some(summary) = result.get(id) {
                hits.ids.push(id.clone());
                hits.summaries.insert(id.clone(), summary.clone());
            }
        }
        hits
    }
}

pub trait LiteratureClient: Send + Sync {
    /// PubMed ids matching `term`, at most `max_results`, in relevance order.
    fn search(&self, term: &str, max_results: usize) -> Result<Vec<String>, KiraError>;

    /// Raw `result` object of an esummary call (`uid -> summary`).
    fn summaries(&self, ids: &[String]) -> Result<Map<String, Value>, KiraError>;

    fn search_with_summaries(
        &self,
        term: &str,
        max_results: usize,
    ) -> Result<LiteratureHits, KiraError> {
        let ids = self.search(term, max_results)?;
        if ids.is_empty() {
            return Ok(LiteratureHits::default());
        }
        let result = self.summaries(&ids)?;
        let hits = LiteratureHits::from_summaries(&ids, &result);
        if hits.ids.len() < ids.len() {
            tracing::debug!(
                term,
                searched = ids.len(),
                summarized = hits.ids.len(),
                "pubmed omitted summaries"
            );
        }
        Ok(hits)
    }
}

#[derive(Clone)]
pub struct PubmedHttpClient {
    client: Client,
    base_url: String,
}

impl PubmedHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, KiraError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: trim_base(base_url),
        })
    }
}

impl LiteratureClient for PubmedHttpClient {
    fn search(&self, term: &str, max_results: usize) -> Result<Vec<String>, KiraError> {
        let retmax = max_results.to_string();
        let request = self
            .client
            .get(format!("{}/esearch.fcgi", self.base_url))
            .query(&[
                ("db", "pubmed"),
                ("term", term),
                ("retmode", "json"),
                ("retmax", retmax.as_str()),
            ]);
        let payload = ERRORS.json(request)?;
        let mut ids = parse_search_ids(&payload)?;
        ids.truncate(max_results);
        Ok(ids)
    }

    fn summaries(&self, ids: &[String]) -> Result<Map<String, Value>, KiraError> {
        let id_list = ids.join(",");
        let request = self
            .client
            .get(format!("{}/esummary.fcgi", self.base_url))
            .query(&[
                ("db", "pubmed"),
                ("id", id_list.as_str()),
                ("retmode", "json"),
            ]);
        let payload = ERRORS.json(request)?;
        parse_summary_result(&payload)
    }
}

pub fn parse_search_ids(payload: &Value) -> Result<Vec<String>, KiraError> {
    let list = payload["esearchresult"]["idlist"].as_array().ok_or_else(|| {
        KiraError::PubmedParse("esearch response has no esearchresult.idlist".to_string())
    })?;
    Ok(list
        .iter()
        .filter_map(|v| v.as_str().map(|s| s.to_string()))
        .collect())
}

/// The esummary `result` object minus its `uids` index entry.
pub fn parse_summary_result(payload: &Value) -> Result<Map<String, Value>, KiraError> {
    let mut result = payload["result"].as_object().cloned().ok_or_else(|| {
        KiraError::PubmedParse("esummary response has no result object".to_string())
    })?;
    result.remove("uids");
    Ok(result)
}
