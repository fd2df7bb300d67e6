use lens_core::SubjectEntities;
use lens_retrieval::plan_queries;

use crate::cli::GlobalFlags;
use crate::cli::commands::PlanArgs;
use crate::output::output;

/// Handle `lens plan`.
pub fn handle(args: &PlanArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entities = entities(args);
    if entities.company.is_empty() {
        anyhow::bail!("company must not be empty");
    }
    output(&plan_queries(&entities), flags.format)
}

fn entities(args: &PlanArgs) -> SubjectEntities {
    SubjectEntities {
        company: args.company.clone(),
        role: args.role.clone().unwrap_or_default(),
        location: args.location.clone().unwrap_or_default(),
    }
    .or_subject("")
}
