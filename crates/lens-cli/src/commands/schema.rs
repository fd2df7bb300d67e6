use lens_core::{AnalysisResponse, ErrorResponse};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct Schemas {
    analysis_response: schemars::Schema,
    error_response: schemars::Schema,
}

/// Handle `lens schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schemas(), flags.format)
}

fn schemas() -> Schemas {
    Schemas {
        analysis_response: schemars::schema_for!(AnalysisResponse),
        error_response: schemars::schema_for!(ErrorResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_schema_names_top_level_fields() {
        let value = serde_json::to_value(schemas()).unwrap();
        let properties = &value["analysis_response"]["properties"];
        for field in ["company_name", "report", "sources"] {
            assert!(properties.get(field).is_some(), "missing {field}");
        }
        let kinds = serde_json::to_string(&value["error_response"]).unwrap();
        assert!(kinds.contains("generation_transport_error"));
    }
}
