use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;

use crate::error::KiraError;
use crate::http::{ServiceErrors, build_client, trim_base};

pub const KEGG_BASE: &str = "https://rest.kegg.jp";

const ERRORS: ServiceErrors = ServiceErrors {
    name: "KEGG",
    http: KiraError::KeggHttp,
    status: |status, message| KiraError::KeggStatus { status, message },
    parse: KiraError::KeggParse,
};

pub trait PathwayClient: Send + Sync {
    /// Pathway links for one KEGG gene id (`hsa:TP53`), one record per line.
    fn links(&self, gene_id: &str) -> Result<Vec<String>, KiraError>;
}

#[derive(Clone)]
pub struct KeggHttpClient {
    client: Client,
    base_url: String,
}

impl KeggHttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, KiraError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: trim_base(base_url),
        })
    }

    pub fn link_url(&self, gene_id: &str) -> Result<Url, KiraError> {
        ERRORS.url(&self.base_url, &["link", "pathway", gene_id])
    }
}

impl PathwayClient for KeggHttpClient {
    fn links(&self, gene_id: &str) -> Result<Vec<String>, KiraError> {
        let body = ERRORS.text(self.client.get(self.link_url(gene_id)?))?;
        parse_link_lines(&body)
    }
}

/// Non-empty lines of a `link` response. Every record is a tab-separated
/// `gene<TAB>pathway` pair; anything else means the body is not a link table.
pub fn parse_link_lines(body: &str) -> Result<Vec<String>, KiraError> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.contains('\t') {
                Ok(line.to_string())
            } else {
                Err((ERRORS.parse)(format!("unexpected link line {line:?}")))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines_skips_blank_lines() {
        let body = "hsa:7157\tpath:hsa04115\nhsa:7157\tpath:hsa04110\n\n";
        assert_eq!(
            parse_link_lines(body).unwrap(),
            vec!["hsa:7157\tpath:hsa04115", "hsa:7157\tpath:hsa04110"]
        );
    }

    #[test]
    fn empty_body_is_empty_list() {
        assert!(parse_link_lines("").unwrap().is_empty());
        assert!(parse_link_lines("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn html_body_is_a_parse_failure() {
        assert!(matches!(
            parse_link_lines("<html><body>Not found</body></html>"),
            Err(KiraError::KeggParse(_))
        ));
    }

    #[test]
    fn link_url_uses_gene_id() {
        let client = KeggHttpClient::new("https://rest.kegg.jp/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.link_url("hsa:TP53").unwrap().as_str(),
            "https://rest.kegg.jp/link/pathway/hsa:TP53"
        );
        assert_eq!(
            client.link_url("hsa:TRBV20/OR9-2").unwrap().as_str(),
            "https://rest.kegg.jp/link/pathway/hsa:TRBV20%2FOR9-2"
        );
    }
}
