//! Query planning types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Entities extracted from the caller's subject text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SubjectEntities {
    #[serde(default, alias = "company_name")]
    pub company: String,
    #[serde(default, alias = "job_title")]
    pub role: String,
    #[serde(default)]
    pub location: String,
}

impl SubjectEntities {
    /// Treat the whole subject text as the company name.
    #[must_use]
    pub fn from_raw(subject: &str) -> Self {
        Self {
            company: subject.trim().to_string(),
            role: String::new(),
            location: String::new(),
        }
    }

    /// Fill a blank company from the raw subject and trim every field.
    #[must_use]
    pub fn or_subject(self, subject: &str) -> Self {
        let company = self.company.trim();
        Self {
            company: if company.is_empty() {
                subject.trim().to_string()
            } else {
                company.to_string()
            },
            role: self.role.trim().to_string(),
            location: self.location.trim().to_string(),
        }
    }
}

/// The aspect a query targets. Used for planning and logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryTopic {
    CultureReview,
    WorkLifeBalance,
    SalaryBenefits,
    GrowthOpportunities,
    HiringProcess,
    ManagementStyle,
    OvertimeCulture,
    InnovationCulture,
    DiversityInclusion,
    TrainingPrograms,
    Sustainability,
    ScamFraud,
    ProfessionalNetwork,
    JobBoardReviews,
    EmployerReviews,
}

impl QueryTopic {
    /// Topics combined with the subject entities, in planning order.
    pub const ASPECTS: [Self; 12] = [
        Self::CultureReview,
        Self::WorkLifeBalance,
        Self::SalaryBenefits,
        Self::GrowthOpportunities,
        Self::HiringProcess,
        Self::ManagementStyle,
        Self::OvertimeCulture,
        Self::InnovationCulture,
        Self::DiversityInclusion,
        Self::TrainingPrograms,
        Self::Sustainability,
        Self::ScamFraud,
    ];

    /// Search phrase appended to aspect queries. Empty for site-restricted topics.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::CultureReview => "company culture review",
            Self::WorkLifeBalance => "work life balance",
            Self::SalaryBenefits => "salary benefits",
            Self::GrowthOpportunities => "growth opportunities",
            Self::HiringProcess => "hiring process interview",
            Self::ManagementStyle => "management style",
            Self::OvertimeCulture => "overtime culture",
            Self::InnovationCulture => "innovation culture",
            Self::DiversityInclusion => "diversity inclusion",
            Self::TrainingPrograms => "training programs",
            Self::Sustainability => "sustainability",
            Self::ScamFraud => "scam fraud",
            Self::ProfessionalNetwork | Self::JobBoardReviews | Self::EmployerReviews => "",
        }
    }
}

/// A fully composed provider query. Consumed exactly once by the fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QueryTask {
    pub query_text: String,
    pub topic: QueryTopic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_company_falls_back_to_subject() {
        let entities = SubjectEntities {
            company: "  ".into(),
            role: " Engineer ".into(),
            location: "Berlin".into(),
        }
        .or_subject(" Acme GmbH ");
        assert_eq!(entities.company, "Acme GmbH");
        assert_eq!(entities.role, "Engineer");
    }

    #[test]
    fn deserializes_extraction_field_names() {
        let entities: SubjectEntities = serde_json::from_str(
            r#"{"company_name":"Acme","job_title":"SRE","location":"Austin"}"#,
        )
        .unwrap();
        assert_eq!(entities.company, "Acme");
        assert_eq!(entities.role, "SRE");
        assert_eq!(entities.location, "Austin");
    }
}
