use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format. Send either an array or an object.";

#[derive(Debug, Error, Diagnostic)]
pub enum KiraError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("invalid gene symbol: {0:?}")]
    InvalidGeneSymbol(String),

    #[error("invalid species: {0:?}")]
    InvalidSpecies(String),

    #[error("invalid UniProt accession: {0}")]
    InvalidUniprotId(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid config value: {0}")]
    ConfigValue(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("{0} request timed out")]
    Timeout(String),

    #[error("KEGG request failed: {0}")]
    KeggHttp(String),

    #[error("KEGG returned status {status}: {message}")]
    KeggStatus { status: u16, message: String },

    #[error("KEGG returned a malformed body: {0}")]
    KeggParse(String),

    #[error("Ensembl request failed: {0}")]
    EnsemblHttp(String),

    #[error("Ensembl returned status {status}: {message}")]
    EnsemblStatus { status: u16, message: String },

    #[error("Ensembl returned a malformed body: {0}")]
    EnsemblParse(String),

    #[error("uniprot request failed: {0}")]
    UniprotHttp(String),

    #[error("uniprot returned status {status}: {message}")]
    UniprotStatus { status: u16, message: String },

    #[error("uniprot returned a malformed body: {0}")]
    UniprotParse(String),

    #[error("PubMed request failed: {0}")]
    PubmedHttp(String),

    #[error("PubMed returned status {status}: {message}")]
    PubmedStatus { status: u16, message: String },

    #[error("PubMed returned a malformed body: {0}")]
    PubmedParse(String),

    #[error("failed to write output: {0}")]
    Output(String),
}

impl KiraError {
    pub fn invalid_format() -> Self {
        KiraError::InvalidRequest(INVALID_FORMAT_MESSAGE.to_string())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, KiraError::Timeout(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            KiraError::Timeout(_)
                | KiraError::KeggHttp(_)
                | KiraError::KeggStatus { .. }
                | KiraError::KeggParse(_)
                | KiraError::EnsemblHttp(_)
                | KiraError::EnsemblStatus { .. }
                | KiraError::EnsemblParse(_)
                | KiraError::UniprotHttp(_)
                | KiraError::UniprotStatus { .. }
                | KiraError::UniprotParse(_)
                | KiraError::PubmedHttp(_)
                | KiraError::PubmedStatus { .. }
                | KiraError::PubmedParse(_)
        )
    }
}
