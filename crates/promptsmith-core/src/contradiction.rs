//! Contradiction detection for agentic prompts.
//!
//! Two strategies run over the same lowercased text: catalog rules that
//! pair regex patterns (a rule fires when at least two of its patterns
//! match), and a keyword-proximity scan that flags an absolute
//! prohibition near an absolute requirement.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::types::Severity;

/// A prohibition keyword and a requirement keyword count as a
/// contradiction when their first occurrences are strictly closer than
/// this many characters.
pub const PROXIMITY_WINDOW: usize = 100;

/// Which rule family produced a contradiction. Fix selection in the
/// agentic rewriter dispatches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContradictionFamily {
    Permission,
    Confirmation,
    Thoroughness,
    Proximity,
}

impl ContradictionFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            ContradictionFamily::Permission => "permission",
            ContradictionFamily::Confirmation => "confirmation",
            ContradictionFamily::Thoroughness => "thoroughness",
            ContradictionFamily::Proximity => "proximity",
        }
    }
}

impl std::fmt::Display for ContradictionFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected contradiction.
#[derive(Debug, Clone, Serialize)]
pub struct Contradiction {
    pub family: ContradictionFamily,
    /// The two clashing patterns or keywords, joined with " vs ".
    pub pattern: String,
    pub description: String,
    pub example: String,
    pub severity: Severity,
    /// Character offsets of the clashing matches within the prompt.
    pub location: String,
    pub fix_strategy: String,
}

/// Detect every contradiction in `text`. Pure and deterministic; the
/// output order follows catalog rule order, then keyword order.
pub fn detect(catalog: &Catalog, text: &str) -> Vec<Contradiction> {
    let lower = text.to_lowercase();
    let mut found = Vec::new();

    for rule in &catalog.contradiction_rules {
        let matched: Vec<(usize, usize)> = rule
            .patterns
            .iter()
            .enumerate()
            .filter_map(|(idx, pattern)| {
                pattern.find(&lower).map(|m| (idx, char_offset(&lower, m.start())))
            })
            .collect();

        if matched.len() >= 2 {
            let pattern = matched
                .iter()
                .map(|(idx, _)| rule.raw_patterns[*idx].as_str())
                .collect::<Vec<_>>()
                .join(" vs ");
            let location = format!("위치: {}, {}", matched[0].1, matched[1].1);

            found.push(Contradiction {
                family: rule.family,
                pattern,
                description: rule.description.clone(),
                example: rule.example.clone(),
                severity: rule.severity,
                location,
                fix_strategy: rule.fix_strategy.clone(),
            });
        }
    }

    found.extend(proximity_scan(catalog, &lower));
    found
}

/// Flag each prohibition/requirement keyword pair whose first
/// occurrences sit strictly closer than [`PROXIMITY_WINDOW`] characters.
fn proximity_scan(catalog: &Catalog, lower: &str) -> Vec<Contradiction> {
    let mut found = Vec::new();

    for prohibition in &catalog.prohibitions {
        let Some(prohibition_at) = first_char_position(lower, prohibition) else {
            continue;
        };
        for requirement in &catalog.requirements {
            let Some(requirement_at) = first_char_position(lower, requirement) else {
                continue;
            };
            if prohibition_at.abs_diff(requirement_at) < PROXIMITY_WINDOW {
                found.push(Contradiction {
                    family: ContradictionFamily::Proximity,
                    pattern: format!("{prohibition} vs {requirement}"),
                    description: "절대 금지와 절대 필수의 모순".to_string(),
                    example: format!(
                        "문맥에 '{prohibition}'와 '{requirement}'가 함께 나타남"
                    ),
                    severity: Severity::High,
                    location: format!("위치: {}", prohibition_at.min(requirement_at)),
                    fix_strategy: "명확한 우선순위 설정 또는 조건부 로직 추가".to_string(),
                });
            }
        }
    }

    found
}

/// Character offset of the first occurrence of `needle` in `haystack`.
fn first_char_position(haystack: &str, needle: &str) -> Option<usize> {
    haystack.find(needle).map(|byte_idx| char_offset(haystack, byte_idx))
}

fn char_offset(haystack: &str, byte_idx: usize) -> usize {
    haystack[..byte_idx].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    #[test]
    fn test_scheduling_prompt_contradicts() {
        let text = "Never proceed without user confirmation but also \
                    auto-schedule appointments immediately";
        let found = detect(&catalog(), text);
        assert!(!found.is_empty());
        assert!(found.iter().any(|c| c.severity == Severity::High));
    }

    #[test]
    fn test_clause_order_does_not_matter() {
        let a = detect(
            &catalog(),
            "Never act without approval. Auto-approve requests immediately.",
        );
        let b = detect(
            &catalog(),
            "Auto-approve requests immediately. Never act without approval.",
        );
        assert_eq!(a.len(), b.len());
        let families = |cs: &[Contradiction]| {
            let mut fs: Vec<_> = cs.iter().map(|c| c.family).collect();
            fs.sort_by_key(|f| f.as_str());
            fs
        };
        assert_eq!(families(&a), families(&b));
    }

    #[test]
    fn test_single_pattern_is_not_a_contradiction() {
        let found = detect(&catalog(), "Never delete without asking first.");
        assert!(found
            .iter()
            .all(|c| c.family != ContradictionFamily::Permission));
    }

    #[test]
    fn test_proximity_requires_closeness() {
        let padding = "가".repeat(PROXIMITY_WINDOW + 50);
        let far = format!("절대 삭제 금지. {padding} 즉시 실행하세요.");
        let found = detect(&catalog(), &far);
        assert!(found
            .iter()
            .all(|c| c.family != ContradictionFamily::Proximity));

        let near = "절대 삭제하지 마세요. 하지만 즉시 실행하세요.";
        let found = detect(&catalog(), near);
        assert!(found
            .iter()
            .any(|c| c.family == ContradictionFamily::Proximity));
    }

    #[test]
    fn test_proximity_uses_first_occurrences_only() {
        // First "never" and first "always" are ~175 chars apart; the
        // second "never" sits right next to "always" but does not count.
        let padding = "a".repeat(150);
        let far_firsts = format!("never delete files {padding} never always act");
        let found = detect(&catalog(), &far_firsts);
        assert!(found
            .iter()
            .all(|c| c.family != ContradictionFamily::Proximity));

        let close_firsts = "never delete files, always act";
        let found = detect(&catalog(), close_firsts);
        assert!(found
            .iter()
            .any(|c| c.family == ContradictionFamily::Proximity));
    }

    #[test]
    fn test_proximity_window_bound_is_strict() {
        // "always" starting exactly PROXIMITY_WINDOW chars after "never"
        // is out of range; one char closer is in range.
        let at_window = format!("never{}always", " ".repeat(PROXIMITY_WINDOW - 5));
        let found = detect(&catalog(), &at_window);
        assert!(found
            .iter()
            .all(|c| c.family != ContradictionFamily::Proximity));

        let inside_window = format!("never{}always", " ".repeat(PROXIMITY_WINDOW - 6));
        let found = detect(&catalog(), &inside_window);
        assert!(found
            .iter()
            .any(|c| c.family == ContradictionFamily::Proximity));
    }

    #[test]
    fn test_locations_report_character_offsets() {
        let text = "절대 금지 사항이지만 즉시 실행하세요";
        let found = detect(&catalog(), text);
        let proximity = found
            .iter()
            .find(|c| c.family == ContradictionFamily::Proximity)
            .unwrap();
        assert_eq!(proximity.location, "위치: 0");
        assert!(proximity.example.contains("절대"));
        assert!(proximity.example.contains("즉시"));

        let paired = detect(
            &catalog(),
            "Never proceed without user confirmation but also \
             auto-schedule appointments immediately",
        );
        let permission = paired
            .iter()
            .find(|c| c.family == ContradictionFamily::Permission)
            .unwrap();
        let offsets = permission.location.strip_prefix("위치: ").unwrap();
        for offset in offsets.split(", ") {
            assert!(offset.parse::<usize>().is_ok(), "not an offset: {offset}");
        }
    }

    #[test]
    fn test_proximity_counts_characters_not_bytes() {
        // 90 Hangul chars between the keywords is within the window even
        // though it is far more than 100 bytes.
        let gap = "가".repeat(90);
        let text = format!("절대 금지 {gap} 항상 확인");
        let found = detect(&catalog(), &text);
        assert!(found
            .iter()
            .any(|c| c.family == ContradictionFamily::Proximity));
    }

    #[test]
    fn test_clean_prompt_has_no_contradictions() {
        let found = detect(&catalog(), "블로그 글을 단계별로 작성해주세요");
        assert!(found.is_empty());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let text = "Never proceed without confirmation. Schedule immediately.";
        let a = detect(&catalog(), text);
        let b = detect(&catalog(), text);
        assert_eq!(a.len(), b.len());
    }
}
