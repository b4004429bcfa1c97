//! Eligibility rules for adding a published date

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Frontmatter keys consulted when deciding eligibility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerKeys {
    /// Key whose boolean `true` value marks a draft
    pub draft: String,

    /// Key whose presence marks a document as already dated
    pub published: String,
}

impl Default for MarkerKeys {
    fn default() -> Self {
        Self {
            draft: "draft".to_string(),
            published: "published".to_string(),
        }
    }
}

/// Whether a document should receive a published date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,

    /// `draft: true`
    Draft,

    /// Already has a published key, whatever its value
    AlreadyPublished,
}

impl Eligibility {
    /// Evaluates the rules in order: missing metadata, draft, published.
    pub fn of(metadata: Option<&Mapping>, keys: &MarkerKeys) -> Self {
        let Some(metadata) = metadata else {
            return Eligibility::Eligible;
        };

        if metadata.get(keys.draft.as_str()) == Some(&Value::Bool(true)) {
            return Eligibility::Draft;
        }

        if metadata.contains_key(keys.published.as_str()) {
            return Eligibility::AlreadyPublished;
        }

        Eligibility::Eligible
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// Short human-readable reason for a skip
    pub fn reason(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "eligible",
            Eligibility::Draft => "draft",
            Eligibility::AlreadyPublished => "already has published field",
        }
    }
}

/// Returns true if a document with this frontmatter should be dated
pub fn is_eligible(metadata: Option<&Mapping>) -> bool {
    Eligibility::of(metadata, &MarkerKeys::default()).is_eligible()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn missing_metadata_is_eligible() {
        assert!(is_eligible(None));
    }

    #[test]
    fn empty_metadata_is_eligible() {
        assert!(is_eligible(Some(&Mapping::new())));
    }

    #[test]
    fn draft_true_is_skipped() {
        let fm = mapping("title: Post\ndraft: true\n");
        assert!(!is_eligible(Some(&fm)));
        assert_eq!(Eligibility::of(Some(&fm), &MarkerKeys::default()), Eligibility::Draft);
    }

    #[test]
    fn draft_false_is_eligible() {
        assert!(is_eligible(Some(&mapping("draft: false\n"))));
    }

    #[test]
    fn draft_must_be_boolean_true() {
        // Strings that merely look truthy do not count
        assert!(is_eligible(Some(&mapping("draft: \"true\"\n"))));
        assert!(is_eligible(Some(&mapping("draft: yes\n"))));
        assert!(is_eligible(Some(&mapping("draft: 1\n"))));
    }

    #[test]
    fn published_any_value_is_skipped() {
        for yaml in [
            "published: 2020-01-01\n",
            "published: \"\"\n",
            "published: null\n",
            "published: [a]\n",
            "published: false\n",
        ] {
            let fm = mapping(yaml);
            assert_eq!(
                Eligibility::of(Some(&fm), &MarkerKeys::default()),
                Eligibility::AlreadyPublished,
                "{yaml}"
            );
        }
    }

    #[test]
    fn draft_checked_before_published() {
        let fm = mapping("draft: true\npublished: 2020-01-01\n");
        assert_eq!(Eligibility::of(Some(&fm), &MarkerKeys::default()), Eligibility::Draft);
    }

    #[test]
    fn custom_keys() {
        let keys = MarkerKeys {
            draft: "hidden".to_string(),
            published: "date".to_string(),
        };

        let fm = mapping("hidden: true\n");
        assert_eq!(Eligibility::of(Some(&fm), &keys), Eligibility::Draft);

        let fm = mapping("date: 2021-05-05\ndraft: true\n");
        assert_eq!(Eligibility::of(Some(&fm), &keys), Eligibility::AlreadyPublished);

        let fm = mapping("published: 2021-05-05\n");
        assert!(Eligibility::of(Some(&fm), &keys).is_eligible());
    }
}
