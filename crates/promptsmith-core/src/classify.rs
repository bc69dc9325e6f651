//! Domain and intent classification over weighted keyword tables.
//!
//! Both classifiers are deterministic: tables iterate in catalog order
//! (which mirrors enum declaration order) and ties resolve to the first
//! maximum seen.

use crate::catalog::Catalog;
use crate::types::{Domain, Intent};

/// Minimum weighted total before a domain label is trusted; below it
/// the text resolves to `auto`.
pub const DOMAIN_CONFIDENCE_THRESHOLD: f64 = 1.0;

/// Weight applied to each simple keyword hit.
const SIMPLE_WEIGHT: f64 = 1.0;

/// Weight applied to each compound (multi-word) keyword hit.
const COMPOUND_WEIGHT: f64 = 2.0;

/// Resolve the domain of the text, or `auto` when no domain clears the
/// confidence threshold.
pub fn detect_domain(catalog: &Catalog, text: &str) -> Domain {
    let scores = domain_scores(catalog, text);

    let Some((best, best_score)) = best_entry(&scores) else {
        return Domain::Auto;
    };
    if best_score >= DOMAIN_CONFIDENCE_THRESHOLD {
        best
    } else {
        Domain::Auto
    }
}

/// Resolve the domain and report `best / total` as a confidence in
/// [0, 1].
///
/// Unlike [`detect_domain`], the absolute threshold is not applied:
/// confidence reporting and label resolution are separate concerns.
pub fn detect_domain_with_confidence(catalog: &Catalog, text: &str) -> (Domain, f64) {
    let scores = domain_scores(catalog, text);
    let total: f64 = scores.iter().map(|(_, s)| s).sum();

    match best_entry(&scores) {
        Some((best, best_score)) if total > 0.0 => (best, best_score / total),
        _ => (Domain::Auto, 0.0),
    }
}

/// Resolve the dominant intent, or `general` when no intent keyword
/// appears.
pub fn detect_intent(catalog: &Catalog, text: &str) -> Intent {
    let lower = text.to_lowercase();

    let mut best = Intent::General;
    let mut best_hits = 0usize;
    for (intent, keywords) in &catalog.intents {
        let hits = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
        if hits > best_hits {
            best = *intent;
            best_hits = hits;
        }
    }
    best
}

fn domain_scores(catalog: &Catalog, text: &str) -> Vec<(Domain, f64)> {
    let lower = text.to_lowercase();

    catalog
        .domains
        .iter()
        .map(|table| {
            let mut score = 0.0;
            for keyword in &table.simple {
                if lower.contains(keyword.as_str()) {
                    score += SIMPLE_WEIGHT;
                }
            }
            for phrase in &table.compound {
                if lower.contains(phrase.as_str()) {
                    score += COMPOUND_WEIGHT;
                }
            }
            for (keyword, weight) in &table.weighted {
                if lower.contains(keyword.as_str()) {
                    score += weight;
                }
            }
            (table.domain, score)
        })
        .collect()
}

/// First strict maximum with a positive score, in table order.
fn best_entry(scores: &[(Domain, f64)]) -> Option<(Domain, f64)> {
    let mut best: Option<(Domain, f64)> = None;
    for &(domain, score) in scores {
        if score > 0.0 && best.map_or(true, |(_, b)| score > b) {
            best = Some((domain, score));
        }
    }
    best
}
