//! Caller-facing JSON shapes.

use lens_core::{
    AnalysisResponse, ErrorKind, EvidenceCategory, PipelineError, ReportNode, SourceId, SourceRef,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn analysis_response_keeps_report_key_order() {
    let report: ReportNode = serde_json::from_str(
        r#"{"red_flag_status":"Low Risk","culture_fit":{"wlb":"Good [1]","salary":"Fair"},"value_match_score":72}"#,
    )
    .unwrap();

    let response = AnalysisResponse {
        company_name: "Acme".into(),
        report,
        sources: vec![SourceRef {
            id: SourceId::new(1),
            title: "Acme on LinkedIn".into(),
            url: "https://www.linkedin.com/company/acme".into(),
            snippet: "Acme builds anvils.".into(),
            category: EvidenceCategory::ProfessionalNetwork,
        }],
    };

    let rendered = serde_json::to_string(&response).unwrap();
    assert!(rendered.starts_with(
        r#"{"company_name":"Acme","report":{"red_flag_status":"Low Risk","culture_fit":{"wlb":"Good [1]""#
    ));

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value["sources"],
        json!([{
            "id": 1,
            "title": "Acme on LinkedIn",
            "url": "https://www.linkedin.com/company/acme",
            "snippet": "Acme builds anvils.",
            "category": "professional_network"
        }])
    );
}

#[test]
fn each_terminal_error_has_a_distinct_kind() {
    let errors = [
        PipelineError::NoEvidenceFound,
        PipelineError::GenerationBlocked("SAFETY".into()),
        PipelineError::GenerationMalformed("not json".into()),
        PipelineError::GenerationTransport("timeout".into()),
        PipelineError::InvalidRequest("empty subject".into()),
        PipelineError::Internal(anyhow::anyhow!("boom")),
    ];

    let kinds: Vec<ErrorKind> = errors.iter().map(PipelineError::kind).collect();
    let mut unique = kinds.clone();
    unique.dedup();
    assert_eq!(kinds.len(), unique.len());

    let response = errors[0].to_response();
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"error": "no_evidence_found", "message": "no evidence found for this subject"})
    );
}
