//! Generation instructions.
//!
//! The report prompt keeps the citation contract explicit: evidence arrives
//! as `[Source ID: N]` blocks and may only be cited as `[N]`. Whatever the
//! model does with that contract is checked afterwards by the grounding crate.

use crate::GenerationRequest;

const NO_RESUME: &str = "No resume provided.";
const NOT_SPECIFIED: &str = "Not Specified";

/// Prompt for extracting subject entities as JSON.
#[must_use]
pub fn entity_extraction_prompt(subject_text: &str) -> String {
    format!(
        r#"From the text below, extract the company name, job title, and location. Respond with a JSON object: {{"company_name": "...", "job_title": "...", "location": "..."}}.
If a value isn't found, return an empty string "".

Text:
---
{subject_text}
---
"#
    )
}

/// Prompt for the grounded analysis report.
#[must_use]
pub fn analysis_prompt(request: &GenerationRequest) -> String {
    let entities = &request.entities;
    let role = non_empty_or(&entities.role, NOT_SPECIFIED);
    let location = non_empty_or(&entities.location, NOT_SPECIFIED);
    let resume = request
        .applicant_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_RESUME);

    format!(
        r#"As 'Project Lens', an expert career analyst, generate a detailed analysis report in {language} as a JSON object.
**Citation Rules (VERY IMPORTANT):**
1. Cite information by embedding the corresponding source tag (e.g., `[1]`, `[2]`).
2. **NEVER include URLs directly in the report text.** Use only the source ID tags for citation.
3. **You MUST ONLY use the source IDs provided in the `Research Data` section. DO NOT invent any source IDs that are not explicitly given to you.**
4. When multiple sources support a single point, cite them individually, like `[21], [22]`.
5. Include all genuinely used IDs in the final `cited_ids` array.
**Information Provided:**
1. **Company, Role & Location:** {company} - {role} in {location}
2. **Current Date:** {date}
3. **Applicant's Resume/Bio:**
   ```{resume}```
4. **Research Data (Each block has a `[Source ID: X]`):**
   ```{context}```
**Your Task:** Synthesize all info into a single JSON object with the following structure:
```json
{{
  "report": {{
    "company_location": "{location}",
    "red_flag_status": "Your assessment (e.g., 'Low Risk').",
    "red_flag_text": "Detailed explanation for red flags. Cite sources like [1] or [2], [3].",
    "hiring_experience_text": "Analysis of hiring process. Cite sources.",
    "timeliness_analysis": "1. Analyze info recency. 2. Analyze job posting status (e.g., 'Likely open', 'Potentially expired') and give a reason. Cite sources.",
    "culture_fit": {{ "reputation": "", "management": "", "sustainability": "", "wlb": "", "growth": "", "salary": "", "overtime": "", "innovation": "", "benefits": "", "diversity": "", "training": "" }},
    "value_match_score": "A number from 0-100. 0 if no resume.",
    "value_match_text": "Explanation of the match score. Cite sources.",
    "final_risk_rating": "Your final risk rating.",
    "final_risk_text": "Summary justifying the final rating. Cite sources."
  }},
  "cited_ids": []
}}
```"#,
        language = request.language.display_name(),
        company = entities.company,
        date = request.current_date.format("%Y-%m-%d"),
        context = request.context_payload,
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
