//! Query planning: subject entities × fixed topics, plus site-restricted
//! queries for employer review and professional network sites.

use lens_core::{QueryTask, QueryTopic, SubjectEntities};

/// Site-restricted topics, issued after the aspect queries.
const SITE_QUERIES: [(QueryTopic, &str, &str); 3] = [
    (QueryTopic::ProfessionalNetwork, "site:linkedin.com", ""),
    (QueryTopic::JobBoardReviews, "site:indeed.com", " reviews"),
    (QueryTopic::EmployerReviews, "site:glassdoor.com", " reviews"),
];

/// Plan the query tasks for one request.
///
/// Returns an empty plan when the company is blank. Duplicate query texts are
/// dropped, keeping the first.
#[must_use]
pub fn plan_queries(entities: &SubjectEntities) -> Vec<QueryTask> {
    let company = quoted(&entities.company);
    if company.is_empty() {
        return Vec::new();
    }
    let role = quoted(&entities.role);
    let location = quoted(&entities.location);
    let location_part = if location.is_empty() {
        String::new()
    } else {
        format!(" {location}")
    };

    let aspects = QueryTopic::ASPECTS.into_iter().map(|topic| {
        let query_text = if topic == QueryTopic::HiringProcess && !role.is_empty() {
            format!("{company} {role}{location_part} {}", topic.phrase())
        } else {
            format!("{company}{location_part} {}", topic.phrase())
        };
        QueryTask { query_text, topic }
    });

    let sites = SITE_QUERIES
        .into_iter()
        .map(|(topic, site, suffix)| QueryTask {
            query_text: format!("{site} {company}{location_part}{suffix}"),
            topic,
        });

    let mut tasks: Vec<QueryTask> = Vec::with_capacity(QueryTopic::ASPECTS.len() + SITE_QUERIES.len());
    for task in aspects.chain(sites) {
        if !tasks.iter().any(|t| t.query_text == task.query_text) {
            tasks.push(task);
        }
    }
    tasks
}

/// Exact-phrase form of an entity, or empty when it has no content.
fn quoted(value: &str) -> String {
    let cleaned = value.replace('"', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        cleaned
    } else {
        format!("\"{cleaned}\"")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn entities(company: &str, role: &str, location: &str) -> SubjectEntities {
        SubjectEntities {
            company: company.into(),
            role: role.into(),
            location: location.into(),
        }
    }

    #[test]
    fn full_plan_with_location_and_role() {
        let tasks = plan_queries(&entities("Acme", "Backend Engineer", "Berlin"));
        assert_eq!(tasks.len(), 15);
        assert_eq!(tasks[0].query_text, r#""Acme" "Berlin" company culture review"#);
        assert_eq!(tasks[0].topic, QueryTopic::CultureReview);
        assert_eq!(
            tasks[4].query_text,
            r#""Acme" "Backend Engineer" "Berlin" hiring process interview"#
        );
        assert_eq!(tasks[11].query_text, r#""Acme" "Berlin" scam fraud"#);
        assert_eq!(tasks[12].query_text, r#"site:linkedin.com "Acme" "Berlin""#);
        assert_eq!(tasks[13].query_text, r#"site:indeed.com "Acme" "Berlin" reviews"#);
        assert_eq!(tasks[14].query_text, r#"site:glassdoor.com "Acme" "Berlin" reviews"#);
    }

    #[test]
    fn location_is_omitted_when_unknown() {
        let tasks = plan_queries(&entities("Acme", "", "  "));
        assert_eq!(tasks[1].query_text, r#""Acme" work life balance"#);
        assert_eq!(tasks[4].query_text, r#""Acme" hiring process interview"#);
        assert_eq!(tasks[12].query_text, r#"site:linkedin.com "Acme""#);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\"\"")]
    fn blank_company_plans_nothing(#[case] company: &str) {
        assert!(plan_queries(&entities(company, "Engineer", "Paris")).is_empty());
    }

    #[test]
    fn embedded_quotes_do_not_break_phrases() {
        let tasks = plan_queries(&entities(r#"Acme "Labs""#, "", ""));
        assert_eq!(tasks[0].query_text, r#""Acme Labs" company culture review"#);
    }

    #[test]
    fn plan_has_no_duplicate_queries() {
        let tasks = plan_queries(&entities("Acme", "Engineer", "Berlin"));
        let mut texts: Vec<_> = tasks.iter().map(|t| t.query_text.as_str()).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), tasks.len());
    }
}
