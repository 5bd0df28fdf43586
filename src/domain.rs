use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::KiraError;

pub const DEFAULT_SPECIES: &str = "homo_sapiens";

static SPECIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)*$").unwrap());

static UNIPROT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([OPQ][0-9][A-Z0-9]{3}[0-9]|[A-NR-Z][0-9]([A-Z][A-Z0-9]{2}[0-9]){1,2})(-[0-9]+)?$",
    )
    .unwrap()
});

/// Gene symbol as supplied by the caller, trimmed and never empty. Case and
/// punctuation are preserved (`Trp53`, `Su(H)`, `TRBV20/OR9-2`); clients
/// percent-encode it wherever it lands in a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeneSymbol(String);

impl GeneSymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GeneSymbol {
    type Err = KiraError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(KiraError::InvalidGeneSymbol(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Ensembl-style species name: lowercase, words joined by underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Species(String);

impl Species {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form used in free-text organism qualifiers (`Homo sapiens`).
    pub fn organism_name(&self) -> String {
        let spaced = self.0.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Default for Species {
    fn default() -> Self {
        Self(DEFAULT_SPECIES.to_string())
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Species {
    type Err = KiraError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        if !SPECIES_RE.is_match(&normalized) {
            return Err(KiraError::InvalidSpecies(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UniprotId(String);

impl UniprotId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniprotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UniprotId {
    type Err = KiraError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        if !UNIPROT_ID_RE.is_match(&normalized) {
            return Err(KiraError::InvalidUniprotId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneQuery {
    pub symbol: GeneSymbol,
    pub species: Species,
}

impl GeneQuery {
    pub fn new(symbol: GeneSymbol, species: Species) -> Self {
        Self { symbol, species }
    }

    pub fn parse(symbol: &str, species: &Species) -> Result<Self, KiraError> {
        Ok(Self {
            symbol: symbol.parse()?,
            species: species.clone(),
        })
    }
}

/// Upstream service, named by the key it occupies in a merged record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Pathway,
    Annotation,
    Protein,
    LiteratureIds,
}

impl Source {
    pub const ALL: [Source; 4] = [
        Source::Pathway,
        Source::Annotation,
        Source::Protein,
        Source::LiteratureIds,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Source::Pathway => "pathway",
            Source::Annotation => "annotation",
            Source::Protein => "protein",
            Source::LiteratureIds => "literature_ids",
        }
    }

    pub fn registry(&self) -> &'static str {
        match self {
            Source::Pathway => "kegg",
            Source::Annotation => "ensembl",
            Source::Protein => "uniprot",
            Source::LiteratureIds => "pubmed",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
