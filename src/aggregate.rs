use std::thread;

use crate::domain::{GeneQuery, Source};
use crate::ensembl::AnnotationClient;
use crate::error::KiraError;
use crate::kegg::PathwayClient;
use crate::normalize::{Address, normalize};
use crate::pubmed::LiteratureClient;
use crate::record::{GeneRecord, UpstreamResult};
use crate::uniprot::ProteinClient;

/// Fans one gene symbol out to the four upstream services and merges the
/// answers. A failing service never hides the others.
#[derive(Clone)]
pub struct Aggregator<P, A, U, L>
where
    P: PathwayClient,
    A: AnnotationClient,
    U: ProteinClient,
    L: LiteratureClient,
{
    pathway: P,
    annotation: A,
    protein: U,
    literature: L,
    max_results: usize,
}

impl<P, A, U, L> Aggregator<P, A, U, L>
where
    P: PathwayClient,
    A: AnnotationClient,
    U: ProteinClient,
    L: LiteratureClient,
{
    pub fn new(pathway: P, annotation: A, protein: U, literature: L, max_results: usize) -> Self {
        Self {
            pathway,
            annotation,
            protein,
            literature,
            max_results,
        }
    }

    pub fn pathway(&self) -> &P {
        &self.pathway
    }

    pub fn annotation(&self) -> &A {
        &self.annotation
    }

    pub fn protein(&self) -> &U {
        &self.protein
    }

    pub fn literature(&self) -> &L {
        &self.literature
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn aggregate(&self, query: &GeneQuery) -> GeneRecord {
        let addresses = Source::ALL.map(|source| {
            (source, normalize(source, &query.symbol, &query.species))
        });

        let outcomes = thread::scope(|scope| {
            let handles = addresses
                .iter()
                .map(|(source, address)| (*source, scope.spawn(move || self.fetch(address))))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|(source, handle)| {
                    let outcome = handle.join().unwrap_or_else(|_| {
                        Some(UpstreamResult::failure(&worker_panicked(source)))
                    });
                    (source, outcome)
                })
                .collect::<Vec<_>>()
        });

        let mut record = GeneRecord::new();
        for (source, outcome) in outcomes {
            match outcome {
                Some(result) => {
                    if let UpstreamResult::Failure { error } = &result {
                        tracing::warn!(
                            symbol = %query.symbol,
                            source = source.key(),
                            kind = ?error.kind,
                            "{}",
                            error.message
                        );
                    }
                    record.insert(source, result);
                }
                None => {
                    tracing::debug!(symbol = %query.symbol, source = source.key(), "no result");
                }
            }
        }
        record
    }

    /// `None` means the service legitimately had nothing for this address.
    fn fetch(&self, address: &Address) -> Option<UpstreamResult> {
        match address {
            Address::Pathway(gene_id) => {
                Some(UpstreamResult::from_result(self.pathway.links(gene_id)))
            }
            Address::Annotation { species, symbol } => Some(UpstreamResult::from_result(
                self.annotation.lookup(species, symbol),
            )),
            Address::Protein(query) => match self.protein.best_match(query) {
                Ok(Some(entry)) => Some(UpstreamResult::success(entry)),
                Ok(None) => None,
                Err(err) => Some(UpstreamResult::failure(&err)),
            },
            Address::Literature(term) => Some(UpstreamResult::from_result(
                self.literature
                    .search_with_summaries(term, self.max_results)
                    .map(|hits| hits.ids),
            )),
        }
    }
}

fn worker_panicked(source: Source) -> KiraError {
    let message = format!("{} lookup worker panicked", source.registry());
    match source {
        Source::Pathway => KiraError::KeggHttp(message),
        Source::Annotation => KiraError::EnsemblHttp(message),
        Source::Protein => KiraError::UniprotHttp(message),
        Source::LiteratureIds => KiraError::PubmedHttp(message),
    }
}
