pub mod aggregate;
pub mod app;
pub mod batch;
pub mod config;
pub mod domain;
pub mod ensembl;
pub mod error;
pub mod http;
pub mod kegg;
pub mod normalize;
pub mod output;
pub mod pubmed;
pub mod record;
pub mod request;
pub mod uniprot;
