#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use serde_json::{Map, Value, json};

use kira_multiomics::aggregate::Aggregator;
use kira_multiomics::batch::BatchOrchestrator;
use kira_multiomics::ensembl::AnnotationClient;
use kira_multiomics::error::KiraError;
use kira_multiomics::kegg::PathwayClient;
use kira_multiomics::pubmed::LiteratureClient;
use kira_multiomics::uniprot::ProteinClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Behavior {
    #[default]
    Ok,
    Fail,
    Timeout,
}

#[derive(Default)]
pub struct MockKegg {
    pub behavior: Behavior,
    pub delay: Option<Duration>,
    pub calls: Mutex<Vec<String>>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockKegg {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }
}

impl PathwayClient for MockKegg {
    fn links(&self, gene_id: &str) -> Result<Vec<String>, KiraError> {
        self.calls.lock().unwrap().push(gene_id.to_string());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Ok => Ok(vec![format!("{gene_id}\tpath:hsa04115")]),
            Behavior::Fail => Err(KiraError::KeggStatus {
                status: 500,
                message: "internal error".to_string(),
            }),
            Behavior::Timeout => Err(KiraError::Timeout("KEGG".to_string())),
        }
    }
}

#[derive(Default)]
pub struct MockEnsembl {
    pub behavior: Behavior,
    pub calls: Mutex<Vec<String>>,
}

impl AnnotationClient for MockEnsembl {
    fn lookup(&self, species: &str, symbol: &str) -> Result<Value, KiraError> {
        self.calls.lock().unwrap().push(format!("{species}/{symbol}"));
        match self.behavior {
            Behavior::Ok => Ok(json!({"display_name": symbol, "species": species})),
            Behavior::Fail => Err(KiraError::EnsemblStatus {
                status: 400,
                message: "No valid lookup found".to_string(),
            }),
            Behavior::Timeout => Err(KiraError::Timeout("Ensembl".to_string())),
        }
    }
}

#[derive(Default)]
pub struct MockUniprot {
    pub behavior: Behavior,
    pub candidates: Vec<String>,
    pub searches: Mutex<Vec<String>>,
    pub entries: Mutex<Vec<String>>,
}

impl MockUniprot {
    pub fn with_candidates(candidates: &[&str]) -> Self {
        Self {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl ProteinClient for MockUniprot {
    fn search(&self, query: &str) -> Result<Vec<String>, KiraError> {
        self.searches.lock().unwrap().push(query.to_string());
        match self.behavior {
            Behavior::Ok => Ok(self.candidates.clone()),
            Behavior::Fail => Err(KiraError::UniprotStatus {
                status: 503,
                message: "unavailable".to_string(),
            }),
            Behavior::Timeout => Err(KiraError::Timeout("UniProt".to_string())),
        }
    }

    fn entry(&self, accession: &str) -> Result<Value, KiraError> {
        self.entries.lock().unwrap().push(accession.to_string());
        Ok(json!({"primaryAccession": accession}))
    }
}

#[derive(Default)]
pub struct MockPubmed {
    pub behavior: Behavior,
    pub search_ids: Vec<String>,
    pub summarized: Vec<String>,
    pub terms: Mutex<Vec<(String, usize)>>,
    pub summary_calls: AtomicUsize,
}

impl MockPubmed {
    pub fn new(search_ids: &[&str], summarized: &[&str]) -> Self {
        Self {
            search_ids: search_ids.iter().map(|id| id.to_string()).collect(),
            summarized: summarized.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl LiteratureClient for MockPubmed {
    fn search(&self, term: &str, max_results: usize) -> Result<Vec<String>, KiraError> {
        self.terms
            .lock()
            .unwrap()
            .push((term.to_string(), max_results));
        match self.behavior {
            Behavior::Ok => Ok(self.search_ids.iter().take(max_results).cloned().collect()),
            Behavior::Fail => Err(KiraError::PubmedParse(
                "esearch response has no esearchresult.idlist".to_string(),
            )),
            Behavior::Timeout => Err(KiraError::Timeout("PubMed".to_string())),
        }
    }

    fn summaries(&self, ids: &[String]) -> Result<Map<String, Value>, KiraError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        let mut result = Map::new();
        for id in ids {
            if self.summarized.contains(id) {
                result.insert(id.clone(), json!({"uid": id, "title": format!("paper {id}")}));
            }
        }
        Ok(result)
    }
}

pub type MockAggregator = Aggregator<MockKegg, MockEnsembl, MockUniprot, MockPubmed>;
pub type MockBatch = BatchOrchestrator<MockKegg, MockEnsembl, MockUniprot, MockPubmed>;

pub fn healthy() -> MockAggregator {
    Aggregator::new(
        MockKegg::default(),
        MockEnsembl::default(),
        MockUniprot::with_candidates(&["P04637", "K7PPA8"]),
        MockPubmed::new(&["101", "102", "103"], &["101", "103"]),
        5,
    )
}

pub fn failing(behavior: Behavior) -> MockAggregator {
    Aggregator::new(
        MockKegg {
            behavior,
            ..MockKegg::default()
        },
        MockEnsembl {
            behavior,
            ..MockEnsembl::default()
        },
        MockUniprot {
            behavior,
            ..MockUniprot::default()
        },
        MockPubmed {
            behavior,
            ..MockPubmed::default()
        },
        5,
    )
}
