use std::cell::Cell;

use super::fakes::{FailingOn, RecordingSummarizer, SAMPLE_CONTRACT};
use crate::{
    process_contract, segment_document, validate_clauses, ContractPipeline, KeywordSet,
    ModelError, PipelineError, PipelineOutcome, Segmenter, Simplification, SimplificationStatus,
    SimplifyConfig, ERROR_PREFIX, NO_KEY_CLAUSES_MESSAGE, REVIEW_NOTE,
};

const TWO_CLAUSES: &str = "Clause 1.1 This Agreement shall be governed by California law. \
                           Clause 2.3 No termination shall occur without notice.";

#[test]
fn end_to_end_two_clauses() {
    let pipeline = ContractPipeline::new();
    assert_eq!(pipeline.segment(TWO_CLAUSES).len(), 2);
    assert_eq!(pipeline.key_clauses(TWO_CLAUSES).len(), 1);

    let summarizer = RecordingSummarizer::default();
    let outcome = process_contract(TWO_CLAUSES, &summarizer);

    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original, "Clause 2.3 No termination shall occur without notice.");
    assert_eq!(records[0].simplified, "summary of 8 words");
    assert_eq!(records[0].validation, REVIEW_NOTE);
    assert_eq!(records[0].validation, "Requires legal review for compliance.");
    assert_eq!(outcome.message(), None);
    assert_eq!(summarizer.call_count(), 1);
}

#[test]
fn no_labels_never_loads_the_model() {
    let loaded = Cell::new(false);
    let outcome = ContractPipeline::new()
        .run_with_loader("This Agreement covers payment and termination.", || {
            loaded.set(true);
            Ok(RecordingSummarizer::default())
        })
        .unwrap();

    assert!(!loaded.get());
    assert_eq!(outcome, PipelineOutcome::NoKeyClauses { clauses_found: 0 });
    assert!(outcome.is_empty());
    assert!(outcome.into_records().is_empty());
}

#[test]
fn no_key_clauses_never_calls_the_model() {
    let summarizer = RecordingSummarizer::default();
    let outcome = process_contract(
        "Clause 1 The Supplier shall deliver the goods. Clause 2 Title passes on delivery.",
        &summarizer,
    );

    assert_eq!(outcome, PipelineOutcome::NoKeyClauses { clauses_found: 2 });
    assert_eq!(outcome.message(), Some(NO_KEY_CLAUSES_MESSAGE));
    assert_eq!(summarizer.call_count(), 0);
}

#[test]
fn model_is_loaded_once_per_run() {
    let loads = Cell::new(0);
    let summarizer = RecordingSummarizer::default();
    let outcome = ContractPipeline::new()
        .run_with_loader(SAMPLE_CONTRACT, || {
            loads.set(loads.get() + 1);
            Ok(&summarizer)
        })
        .unwrap();

    assert_eq!(loads.get(), 1);
    assert_eq!(outcome.records().len(), 3);
    assert_eq!(summarizer.call_count(), 3);
}

#[test]
fn load_failure_aborts_the_run() {
    let result = ContractPipeline::new().run_with_loader(TWO_CLAUSES, || {
        Err::<RecordingSummarizer, _>(ModelError::Transport("connection refused".to_string()))
    });

    match result {
        Err(PipelineError::ModelLoad(err)) => assert!(err.is_transient()),
        other => panic!("expected a load failure, got {:?}", other),
    }
}

#[test]
fn records_stay_aligned_with_key_clauses() {
    let pipeline = ContractPipeline::new();
    let key_clauses = pipeline.key_clauses(SAMPLE_CONTRACT);
    let summarizer = FailingOn::new("payment", ModelError::Timeout { seconds: 30 });
    let outcome = pipeline.run(SAMPLE_CONTRACT, &summarizer);
    let records = outcome.records();

    assert_eq!(records.len(), key_clauses.len());
    for (record, clause) in records.iter().zip(&key_clauses) {
        assert_eq!(record.original, clause.text());
        assert_eq!(record.validation, REVIEW_NOTE);
    }

    assert!(records[1].original.starts_with("Clause 6.1"));
    assert!(records[1].simplified.contains(ERROR_PREFIX));
    assert_eq!(records[1].status, SimplificationStatus::Failed { transient: true });
    assert_eq!(records[0].status, SimplificationStatus::Summarized);
    assert_eq!(records[2].status, SimplificationStatus::Summarized);
}

#[test]
#[should_panic(expected = "every key clause needs exactly one simplification")]
fn validate_rejects_unequal_lengths() {
    let clauses = segment_document(TWO_CLAUSES);
    let simplified = vec![Simplification::PassedThrough("only one".to_string())];
    validate_clauses(&clauses, &simplified);
}

#[test]
fn short_key_clause_passes_through() {
    let summarizer = RecordingSummarizer::default();
    let outcome = process_contract("Clause 9 Payment is due.", &summarizer);

    assert_eq!(outcome.records()[0].simplified, "Clause 9 Payment is due.");
    assert_eq!(outcome.records()[0].status, SimplificationStatus::PassedThrough);
    assert_eq!(summarizer.call_count(), 0);
}

#[test]
fn custom_keywords_and_anchored_labels() {
    let text = "Clause 1 Warranty claims must follow the procedure in Clause 2 below.\n\
                Clause 2 Claims are sent to the Supplier in writing.";
    let summarizer = RecordingSummarizer::default();

    let pipeline = ContractPipeline::new()
        .with_keywords(KeywordSet::new(["warranty"]))
        .with_segmenter(Segmenter::anchored());
    let outcome = pipeline.run(text, &summarizer);

    assert_eq!(outcome.records().len(), 1);
    assert_eq!(
        outcome.records()[0].original,
        "Clause 1 Warranty claims must follow the procedure in Clause 2 below."
    );
}

#[test]
fn pipeline_from_config() {
    let config = SimplifyConfig::from_toml_str(
        r#"
keywords = ["notice"]
min_words = 3

[summary]
min_length = 2
max_length = 8
"#,
    )
    .unwrap();
    let summarizer = RecordingSummarizer::default();
    let outcome = ContractPipeline::from_config(&config).run(TWO_CLAUSES, &summarizer);

    assert_eq!(outcome.records().len(), 1);
    assert_eq!(summarizer.params()[0].max_length, 8);
    assert_eq!(summarizer.params()[0].min_length, 2);
}

#[test]
fn outcome_serializes_with_named_fields() {
    let summarizer = RecordingSummarizer::default();
    let outcome = process_contract(TWO_CLAUSES, &summarizer);
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "outcome": "validated",
            "records": [{
                "original": "Clause 2.3 No termination shall occur without notice.",
                "simplified": "summary of 8 words",
                "validation": "Requires legal review for compliance.",
                "status": { "kind": "summarized" }
            }]
        })
    );

    let empty = serde_json::to_value(&PipelineOutcome::NoKeyClauses { clauses_found: 0 }).unwrap();
    assert_eq!(
        empty,
        serde_json::json!({ "outcome": "no_key_clauses", "clauses_found": 0 })
    );
}
