use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::aggregate::Aggregator;
use crate::batch::BatchOrchestrator;
use crate::config::Settings;
use crate::domain::{GeneSymbol, Species, UniprotId};
use crate::ensembl::{AnnotationClient, EnsemblHttpClient};
use crate::error::KiraError;
use crate::kegg::{KeggHttpClient, PathwayClient};
use crate::pubmed::{LiteratureClient, PubmedHttpClient};
use crate::record::{BatchResult, UpstreamResult};
use crate::request::GeneRequest;
use crate::uniprot::{ProteinClient, UniprotHttpClient};

/// Results of a single-source lookup, keyed by the identifier the caller gave.
pub type LookupResult = BTreeMap<String, UpstreamResult>;

pub type HttpApp = App<KeggHttpClient, EnsemblHttpClient, UniprotHttpClient, PubmedHttpClient>;

#[derive(Clone)]
pub struct App<P, A, U, L>
where
    P: PathwayClient,
    A: AnnotationClient,
    U: ProteinClient,
    L: LiteratureClient,
{
    batch: BatchOrchestrator<P, A, U, L>,
    default_species: Species,
}

impl HttpApp {
    pub fn from_settings(settings: &Settings) -> Result<Self, KiraError> {
        let endpoints = &settings.endpoints;
        let aggregator = Aggregator::new(
            KeggHttpClient::new(&endpoints.kegg, settings.timeout)?,
            EnsemblHttpClient::new(&endpoints.ensembl, settings.timeout)?,
            UniprotHttpClient::new(&endpoints.uniprot, settings.timeout)?,
            PubmedHttpClient::new(&endpoints.eutils, settings.timeout)?,
            settings.max_results,
        );
        Ok(App::new(
            BatchOrchestrator::new(aggregator, settings.concurrency),
            settings.default_species.clone(),
        ))
    }
}

impl<P, A, U, L> App<P, A, U, L>
where
    P: PathwayClient,
    A: AnnotationClient,
    U: ProteinClient,
    L: LiteratureClient,
{
    pub fn new(batch: BatchOrchestrator<P, A, U, L>, default_species: Species) -> Self {
        Self {
            batch,
            default_species,
        }
    }

    pub fn default_species(&self) -> &Species {
        &self.default_species
    }

    pub fn batch(&self) -> &BatchOrchestrator<P, A, U, L> {
        &self.batch
    }

    /// KEGG pathway links per KEGG gene id (`hsa:7157`, `hsa:TP53`).
    pub fn pathways(&self, gene_ids: &[String]) -> LookupResult {
        let client = self.batch.aggregator().pathway();
        gene_ids
            .iter()
            .map(|id| (id.clone(), UpstreamResult::from_result(client.links(id))))
            .collect()
    }

    /// Ensembl symbol lookup per gene symbol.
    pub fn gene_info(&self, symbols: &[GeneSymbol], species: Option<&Species>) -> LookupResult {
        let client = self.batch.aggregator().annotation();
        let species = species.unwrap_or(&self.default_species);
        symbols
            .iter()
            .map(|symbol| {
                let result = client.lookup(species.as_str(), symbol.as_str());
                (symbol.to_string(), UpstreamResult::from_result(result))
            })
            .collect()
    }

    /// Full UniProtKB entry per accession.
    pub fn protein_info(&self, ids: &[UniprotId]) -> LookupResult {
        let client = self.batch.aggregator().protein();
        ids.iter()
            .map(|id| {
                let result = client.entry(id.as_str());
                (id.to_string(), UpstreamResult::from_result(result))
            })
            .collect()
    }

    /// PubMed summaries for a free-text query, limited to ids the summary
    /// step actually returned.
    pub fn pubmed_search(
        &self,
        query: &str,
        max_results: Option<usize>,
    ) -> Result<Map<String, Value>, KiraError> {
        let aggregator = self.batch.aggregator();
        let max_results = max_results.unwrap_or(aggregator.max_results());
        if max_results == 0 {
            return Err(KiraError::InvalidRequest(
                "max_results must be at least 1".to_string(),
            ));
        }
        let hits = aggregator
            .literature()
            .search_with_summaries(query, max_results)?;
        Ok(hits.summaries)
    }

    /// Combined lookup over all sources for every requested symbol.
    pub fn all(&self, request: &GeneRequest) -> BatchResult {
        self.batch.run(&request.queries)
    }

    /// Combined lookup from a raw body: a JSON array of symbols or an object
    /// with `gene_symbols` and optional `species`.
    pub fn query(&self, raw_body: &str) -> Result<BatchResult, KiraError> {
        let request = GeneRequest::from_json(raw_body, &self.default_species)?;
        Ok(self.all(&request))
    }
}
