use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crate::aggregate::Aggregator;
use crate::domain::GeneQuery;
use crate::ensembl::AnnotationClient;
use crate::kegg::PathwayClient;
use crate::pubmed::LiteratureClient;
use crate::record::{BatchResult, GeneRecord};
use crate::uniprot::ProteinClient;

/// Runs the per-symbol aggregator over a list of queries with at most
/// `concurrency` symbols in flight.
#[derive(Clone)]
pub struct BatchOrchestrator<P, A, U, L>
where
    P: PathwayClient,
    A: AnnotationClient,
    U: ProteinClient,
    L: LiteratureClient,
{
    aggregator: Aggregator<P, A, U, L>,
    concurrency: usize,
}

impl<P, A, U, L> BatchOrchestrator<P, A, U, L>
where
    P: PathwayClient,
    A: AnnotationClient,
    U: ProteinClient,
    L: LiteratureClient,
{
    pub fn new(aggregator: Aggregator<P, A, U, L>, concurrency: usize) -> Self {
        Self {
            aggregator,
            concurrency: concurrency.max(1),
        }
    }

    pub fn aggregator(&self) -> &Aggregator<P, A, U, L> {
        &self.aggregator
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// One entry per distinct symbol. Duplicates are all looked up and the
    /// last occurrence in `queries` wins, whatever order they finish in.
    pub fn run(&self, queries: &[GeneQuery]) -> BatchResult {
        let mut batch = BatchResult::new();
        if queries.is_empty() {
            return batch;
        }

        let workers = self.concurrency.min(queries.len());
        tracing::info!(symbols = queries.len(), workers, "batch started");
        let started = Instant::now();

        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<(usize, GeneRecord)>();
        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move || {
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(query) = queries.get(index) else {
                            break;
                        };
                        let record = self.aggregator.aggregate(query);
                        if tx.send((index, record)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(tx);

        let mut records = rx.into_iter().collect::<Vec<_>>();
        records.sort_by_key(|(index, _)| *index);
        for (index, record) in records {
            batch.insert(queries[index].symbol.to_string(), record);
        }

        tracing::info!(
            symbols = batch.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "batch finished"
        );
        batch
    }
}
