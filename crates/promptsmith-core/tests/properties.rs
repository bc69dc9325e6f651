//! Property tests over the public pipeline API.

use std::collections::HashMap;
use std::sync::OnceLock;

use proptest::prelude::*;

use promptsmith_core::{
    catalog::Catalog, classify, features, rewrite, score, Domain, OptimizationLevel,
};

fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::builtin)
}

/// Mixed Korean/ASCII text, the pipeline's working alphabet.
fn prompt_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("코드".to_string()),
            Just("리뷰".to_string()),
            Just("자세히".to_string()),
            Just("설명해주세요".to_string()),
            Just("블로그".to_string()),
            Just("만약".to_string()),
            Just("1.".to_string()),
            Just("never".to_string()),
            Just("always".to_string()),
            Just("immediately".to_string()),
            Just("api".to_string()),
            Just("?".to_string()),
            "[a-z가-힣]{1,8}",
        ],
        0..20,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn principle_scores_stay_in_declared_range(text in prompt_strategy()) {
        let result = score::analyze(catalog(), &text, Domain::Auto, OptimizationLevel::Balanced);
        for (_, &s) in &result.scores {
            prop_assert!((1..=5).contains(&s));
        }
        prop_assert!(result.total_score >= 1.0 && result.total_score <= 5.0);
    }

    #[test]
    fn aggregate_is_mean_of_principles(text in prompt_strategy()) {
        let result = score::analyze(catalog(), &text, Domain::Auto, OptimizationLevel::Balanced);
        let mean = result.scores.values().map(|&s| s as f64).sum::<f64>()
            / result.scores.len() as f64;
        prop_assert!((result.total_score - mean).abs() < 1e-9);
    }

    #[test]
    fn domain_confidence_is_normalized(text in prompt_strategy()) {
        let (_, confidence) = classify::detect_domain_with_confidence(catalog(), &text);
        prop_assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn classification_is_idempotent(text in prompt_strategy()) {
        let a = score::analyze(catalog(), &text, Domain::Auto, OptimizationLevel::Balanced);
        let b = score::analyze(catalog(), &text, Domain::Auto, OptimizationLevel::Balanced);
        prop_assert_eq!(a.domain, b.domain);
        prop_assert_eq!(a.detected_intent, b.detected_intent);
        prop_assert_eq!(a.scores, b.scores);
    }

    #[test]
    fn compaction_never_increases_tokens(text in prompt_strategy()) {
        let before = features::estimate_tokens(&text);
        let (compacted, _) = rewrite::compact_tokens(catalog(), &text);
        prop_assert!(features::estimate_tokens(&compacted) <= before);
    }

    #[test]
    fn partial_fill_reports_exactly_the_unresolved_variables(mask in proptest::collection::vec(any::<bool>(), 8)) {
        let template = catalog().template("code_review").unwrap();
        let values: HashMap<String, String> = template
            .variables
            .iter()
            .zip(mask.iter().cycle())
            .filter(|(_, &keep)| keep)
            .map(|(v, _)| (v.clone(), "값".to_string()))
            .collect();

        let (filled, missing) = template.fill_partial(&values);
        for var in &template.variables {
            let placeholder = format!("{{{var}}}");
            if missing.contains(var) {
                prop_assert!(filled.contains(&placeholder));
            } else {
                prop_assert!(!filled.contains(&placeholder));
            }
        }
    }
}
