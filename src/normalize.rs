//! Translation of a gene symbol + species into each upstream service's
//! addressing convention. Pure string construction, no failure cases.

use crate::domain::{GeneSymbol, Source, Species};

pub const DEFAULT_KEGG_PREFIX: &str = "hsa";

/// UniProt taxon used by the protein search for every species.
/// Known limitation: the requested species is not mapped to a taxon.
pub const UNIPROT_ORGANISM_ID: u32 = 9606;

/// KEGG organism codes. Only these species are distinguished; everything else
/// is looked up under [`DEFAULT_KEGG_PREFIX`].
const KEGG_PREFIXES: &[(&str, &str)] = &[("homo_sapiens", "hsa"), ("rattus_norvegicus", "rno")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    /// KEGG gene id, e.g. `hsa:TP53`.
    Pathway(String),
    /// Ensembl lookup path, e.g. `homo_sapiens/TP53`.
    Annotation { species: String, symbol: String },
    /// UniProtKB search expression.
    Protein(String),
    /// PubMed free-text term.
    Literature(String),
}

impl Address {
    pub fn as_query(&self) -> String {
        match self {
            Address::Pathway(id) => id.clone(),
            Address::Annotation { species, symbol } => format!("{species}/{symbol}"),
            Address::Protein(query) => query.clone(),
            Address::Literature(term) => term.clone(),
        }
    }
}

pub fn normalize(source: Source, symbol: &GeneSymbol, species: &Species) -> Address {
    match source {
        Source::Pathway => Address::Pathway(kegg_gene_id(symbol, species)),
        Source::Annotation => Address::Annotation {
            species: species.as_str().to_string(),
            symbol: symbol.as_str().to_string(),
        },
        Source::Protein => Address::Protein(uniprot_gene_query(symbol)),
        Source::LiteratureIds => Address::Literature(pubmed_gene_term(symbol, species)),
    }
}

pub fn kegg_prefix(species: &Species) -> &'static str {
    KEGG_PREFIXES
        .iter()
        .find(|(name, _)| *name == species.as_str())
        .map(|(_, prefix)| *prefix)
        .unwrap_or(DEFAULT_KEGG_PREFIX)
}

pub fn kegg_gene_id(symbol: &GeneSymbol, species: &Species) -> String {
    format!("{}:{}", kegg_prefix(species), symbol.as_str())
}

pub fn uniprot_gene_query(symbol: &GeneSymbol) -> String {
    format!(
        "gene_exact:{} AND organism_id:{UNIPROT_ORGANISM_ID}",
        symbol.as_str()
    )
}

pub fn pubmed_gene_term(symbol: &GeneSymbol, species: &Species) -> String {
    format!(
        "{}[gene] AND {}[orgn]",
        symbol.as_str(),
        species.organism_name()
    )
}
