//! Final source list assembly.

use std::collections::BTreeSet;

use lens_core::{SourceId, SourceRef};

use crate::{GroundingError, SourceRegistry};

/// Sources for exactly the grounded ids, ascending by id.
///
/// # Errors
///
/// Returns [`GroundingError::MissingSource`] if a grounded id has no
/// registered evidence. Grounded ids come from the registry, so this only
/// happens when the two were taken from different requests.
pub fn reconcile(
    grounded: &BTreeSet<SourceId>,
    registry: &SourceRegistry,
) -> Result<Vec<SourceRef>, GroundingError> {
    grounded
        .iter()
        .map(|&id| {
            registry
                .lookup(id)
                .map(|item| SourceRef::from(&item))
                .ok_or(GroundingError::MissingSource(id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use lens_core::{EvidenceCandidate, EvidenceCategory};
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> SourceRegistry {
        let registry = SourceRegistry::new();
        for url in [
            "https://www.linkedin.com/company/acme",
            "https://www.glassdoor.com/Reviews/acme",
            "https://news.test/acme",
        ] {
            registry.register(EvidenceCandidate {
                title: url.into(),
                url: url.into(),
                snippet: "snippet".into(),
                body: Some("body text".into()),
            });
        }
        registry
    }

    #[test]
    fn lists_only_grounded_sources_in_order() {
        let grounded: BTreeSet<_> = [SourceId::new(3), SourceId::new(1)].into_iter().collect();
        let sources = reconcile(&grounded, &registry()).unwrap();
        assert_eq!(
            sources.iter().map(|s| s.id.get()).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(sources[0].category, EvidenceCategory::ProfessionalNetwork);
        assert_eq!(sources[1].category, EvidenceCategory::Web);
    }

    #[test]
    fn empty_grounded_set_gives_no_sources() {
        assert!(reconcile(&BTreeSet::new(), &registry()).unwrap().is_empty());
    }

    #[test]
    fn unknown_id_is_an_error() {
        let grounded: BTreeSet<_> = [SourceId::new(7)].into_iter().collect();
        assert!(matches!(
            reconcile(&grounded, &registry()),
            Err(GroundingError::MissingSource(id)) if id.get() == 7
        ));
    }
}
