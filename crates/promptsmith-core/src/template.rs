//! Phrasing templates and variable substitution.
//!
//! Templates come from the catalog and are matched against a detected
//! (domain, intent, complexity) triple. Filling is plain `{name}`
//! substitution; strict fill refuses on any missing variable while
//! partial fill keeps unknown placeholders and reports them.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Complexity, Domain, Intent};

/// Templates offered per recommendation request.
pub const RECOMMENDATION_LIMIT: usize = 3;

/// One phrasing template from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub domain: Domain,
    pub intent: Intent,
    pub body: String,
    pub variables: Vec<String>,
    pub description: String,
    pub example_usage: String,
    pub complexity: Complexity,
}

impl Template {
    /// Substitute every declared variable; `None` if any is missing.
    pub fn fill(&self, values: &HashMap<String, String>) -> Option<String> {
        if self.variables.iter().any(|v| !values.contains_key(v)) {
            return None;
        }
        Some(self.substitute(values))
    }

    /// Substitute what is available, keeping unresolved placeholders in
    /// place, and return the variables still missing in declared order.
    pub fn fill_partial(&self, values: &HashMap<String, String>) -> (String, Vec<String>) {
        let missing = self
            .variables
            .iter()
            .filter(|v| !values.contains_key(v.as_str()))
            .cloned()
            .collect();
        (self.substitute(values), missing)
    }

    fn substitute(&self, values: &HashMap<String, String>) -> String {
        let mut filled = self.body.clone();
        for var in &self.variables {
            if let Some(value) = values.get(var) {
                filled = filled.replace(&format!("{{{var}}}"), value);
            }
        }
        filled
    }

    fn complexity_distance(&self, target: Complexity) -> u8 {
        self.complexity.ordinal().abs_diff(target.ordinal())
    }
}

/// Pick the best template for a classification triple.
///
/// Both domain and intent must match; among those, the template whose
/// complexity tier is nearest the target wins, ties broken by catalog
/// order. `None` when no template matches the pair at all.
pub fn find_best(
    templates: &[Template],
    domain: Domain,
    intent: Intent,
    complexity: Complexity,
) -> Option<&Template> {
    templates
        .iter()
        .filter(|t| t.domain == domain && t.intent == intent)
        .min_by_key(|t| t.complexity_distance(complexity))
}

/// Up to [`RECOMMENDATION_LIMIT`] templates for a domain, the intent
/// match first, then nearest complexity, then catalog order.
pub fn recommendations(
    templates: &[Template],
    domain: Domain,
    intent: Intent,
    complexity: Complexity,
) -> Vec<&Template> {
    let mut candidates: Vec<(usize, &Template)> = templates
        .iter()
        .enumerate()
        .filter(|(_, t)| t.domain == domain)
        .collect();

    candidates.sort_by_key(|(position, t)| {
        (t.intent != intent, t.complexity_distance(complexity), *position)
    });

    candidates
        .into_iter()
        .take(RECOMMENDATION_LIMIT)
        .map(|(_, t)| t)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fill_complete() {
        let catalog = Catalog::builtin();
        let template = catalog.template("code_review").unwrap();
        let vals: HashMap<String, String> = template
            .variables
            .iter()
            .map(|v| (v.clone(), format!("<{v}>")))
            .collect();
        let filled = template.fill(&vals).unwrap();
        assert!(!filled.contains('{'));
    }

    #[test]
    fn test_fill_refuses_on_missing_variable() {
        let catalog = Catalog::builtin();
        let template = catalog.template("code_review").unwrap();
        assert!(template.fill(&HashMap::new()).is_none());
    }

    #[test]
    fn test_fill_partial_reports_missing_in_declared_order() {
        let catalog = Catalog::builtin();
        let template = catalog.template("code_review").unwrap();
        let (filled, missing) = template.fill_partial(&HashMap::new());
        assert_eq!(filled, template.body);
        assert_eq!(missing, template.variables);
    }

    #[test]
    fn test_fill_ignores_extra_values() {
        let catalog = Catalog::builtin();
        let template = catalog.template("code_review").unwrap();
        let mut vals: HashMap<String, String> = template
            .variables
            .iter()
            .map(|v| (v.clone(), "x".to_string()))
            .collect();
        vals.insert("unrelated".to_string(), "y".to_string());
        assert!(template.fill(&vals).is_some());
    }

    #[test]
    fn test_find_best_requires_domain_and_intent() {
        let catalog = Catalog::builtin();
        let best = find_best(
            catalog.templates(),
            Domain::Development,
            Intent::Analyze,
            Complexity::Low,
        );
        assert_eq!(best.map(|t| t.id.as_str()), Some("code_review"));

        let none = find_best(
            catalog.templates(),
            Domain::Development,
            Intent::Compare,
            Complexity::Low,
        );
        assert!(none.is_none());
    }

    #[test]
    fn test_recommendations_capped_and_domain_bound() {
        let catalog = Catalog::builtin();
        let recs = recommendations(
            catalog.templates(),
            Domain::Content,
            Intent::Create,
            Complexity::Medium,
        );
        assert!(recs.len() <= RECOMMENDATION_LIMIT);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|t| t.domain == Domain::Content));
    }

    #[test]
    fn test_recommendations_prefer_matching_intent() {
        let catalog = Catalog::builtin();
        let recs = recommendations(
            catalog.templates(),
            Domain::Development,
            Intent::Fix,
            Complexity::Medium,
        );
        assert_eq!(recs[0].id, "debug_help");
    }
}
