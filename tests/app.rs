mod common;

use assert_matches::assert_matches;
use serde_json::json;

use kira_multiomics::app::App;
use kira_multiomics::batch::BatchOrchestrator;
use kira_multiomics::domain::{GeneSymbol, Source, Species, UniprotId};
use kira_multiomics::error::KiraError;
use kira_multiomics::output::error_document;
use kira_multiomics::record::{FailureKind, UpstreamResult};

use common::{MockBatch, healthy};

type MockApp = App<
    common::MockKegg,
    common::MockEnsembl,
    common::MockUniprot,
    common::MockPubmed,
>;

fn app() -> MockApp {
    let batch: MockBatch = BatchOrchestrator::new(healthy(), 4);
    App::new(batch, Species::default())
}

#[test]
fn pathways_are_keyed_by_gene_id() {
    let app = app();
    let result = app.pathways(&["hsa:7157".to_string()]);

    assert_eq!(
        result["hsa:7157"],
        UpstreamResult::Success(json!(["hsa:7157\tpath:hsa04115"]))
    );
}

#[test]
fn gene_info_uses_default_species() {
    let app = app();
    let symbols = vec!["TP53".parse::<GeneSymbol>().unwrap()];
    let result = app.gene_info(&symbols, None);

    assert_eq!(
        result["TP53"].payload(),
        Some(&json!({"display_name": "TP53", "species": "homo_sapiens"}))
    );
}

#[test]
fn protein_info_fetches_each_accession() {
    let app = app();
    let ids = vec![
        "P04637".parse::<UniprotId>().unwrap(),
        "P38398".parse::<UniprotId>().unwrap(),
    ];
    let result = app.protein_info(&ids);

    assert_eq!(result.len(), 2);
    assert_eq!(
        result["P38398"],
        UpstreamResult::Success(json!({"primaryAccession": "P38398"}))
    );
}

#[test]
fn pubmed_search_returns_only_summarized_ids() {
    let app = app();
    let summaries = app.pubmed_search("TP53 apoptosis", Some(2)).unwrap();

    let keys = summaries.keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, vec!["101"]);
}

#[test]
fn pubmed_search_rejects_zero_results() {
    let app = app();
    assert_matches!(
        app.pubmed_search("TP53", Some(0)),
        Err(KiraError::InvalidRequest(_))
    );
}

#[test]
fn query_with_array_body() {
    let app = app();
    let result = app.query(r#"["TP53"]"#).unwrap();

    let record = &result["TP53"];
    assert_eq!(record.len(), 4);
    assert!(record.contains_key(&Source::LiteratureIds));
}

#[test]
fn query_with_object_body_uses_requested_species() {
    let app = app();
    let result = app
        .query(r#"{"gene_symbols": ["BRCA1"], "species": "mus_musculus"}"#)
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(
        result["BRCA1"][&Source::Annotation].payload(),
        Some(&json!({"display_name": "BRCA1", "species": "mus_musculus"}))
    );
}

#[test]
fn malformed_body_is_rejected_without_outbound_calls() {
    let app = app();
    let err = app.query("42").unwrap_err();

    assert_eq!(
        error_document(&err),
        json!({"error": "Invalid format. Send either an array or an object."})
    );
    let aggregator = app.batch().aggregator();
    assert!(aggregator.pathway().calls.lock().unwrap().is_empty());
    assert!(aggregator.annotation().calls.lock().unwrap().is_empty());
    assert!(aggregator.protein().searches.lock().unwrap().is_empty());
    assert!(aggregator.literature().terms.lock().unwrap().is_empty());
}

#[test]
fn punctuated_symbols_each_get_a_record() {
    let app = app();
    let result = app
        .query(r#"{"gene_symbols": ["Notch", "Su(H)"], "species": "drosophila_melanogaster"}"#)
        .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result["Su(H)"].len(), 4);
    assert_eq!(
        result["Notch"][&Source::Annotation].payload(),
        Some(&json!({"display_name": "Notch", "species": "drosophila_melanogaster"}))
    );

    let result = app.query(r#"["TP53", "TRBV20/OR9-2"]"#).unwrap();
    assert!(result.contains_key("TP53"));
    assert!(result.contains_key("TRBV20/OR9-2"));
}

#[test]
fn blank_symbol_is_an_invalid_request() {
    let app = app();
    assert_matches!(app.query(r#"["TP53", ""]"#), Err(KiraError::InvalidRequest(_)));
    assert!(app.batch().aggregator().pathway().calls.lock().unwrap().is_empty());
}

#[test]
fn failure_document_shape_in_combined_output() {
    let batch: MockBatch = BatchOrchestrator::new(common::failing(common::Behavior::Timeout), 1);
    let app = App::new(batch, Species::default());
    let result = app.query(r#"["EGFR"]"#).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["EGFR"]["pathway"]["error"]["kind"], json!("timeout"));
    assert_eq!(
        result["EGFR"][&Source::Protein].failure_kind(),
        Some(FailureKind::Timeout)
    );
}
