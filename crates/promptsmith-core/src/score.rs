//! Classic seven-principle rubric scoring.
//!
//! Each principle starts at 1, earns up to 2 points for keyword hits
//! and up to 2 for indicator hits, clamps to [1, 5], and runs one
//! specialized check that may append an issue and a suggestion without
//! touching the numeric score.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::classify;
use crate::features::{self, TextFeatures};
use crate::types::{Complexity, Domain, Intent, OptimizationLevel, Principle};

/// Lower bound of a principle score.
pub const PRINCIPLE_SCORE_MIN: u8 = 1;

/// Upper bound of a principle score.
pub const PRINCIPLE_SCORE_MAX: u8 = 5;

/// Prompts shorter than this (words) are flagged as lacking clarity.
const MIN_CLARITY_WORDS: usize = 5;

/// Prompts shorter than this (words) are flagged as lacking context.
const MIN_CONTEXT_WORDS: usize = 10;

/// Suggestions kept under the conservative level.
const CONSERVATIVE_SUGGESTION_CAP: usize = 3;

/// Immutable snapshot of a full classic analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub original_prompt: String,
    pub domain: Domain,
    pub optimization_level: OptimizationLevel,
    pub scores: BTreeMap<Principle, u8>,
    pub total_score: f64,
    pub token_count: usize,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub detected_intent: Intent,
    pub complexity: Complexity,
}

impl AnalysisResult {
    pub fn score(&self, principle: Principle) -> u8 {
        self.scores.get(&principle).copied().unwrap_or(PRINCIPLE_SCORE_MIN)
    }
}

/// Run the full classic analysis.
///
/// `domain` may be `Auto`, in which case the classifier resolves it.
pub fn analyze(
    catalog: &Catalog,
    text: &str,
    domain: Domain,
    level: OptimizationLevel,
) -> AnalysisResult {
    let domain = match domain {
        Domain::Auto => classify::detect_domain(catalog, text),
        explicit => explicit,
    };

    let feats = features::extract(text);
    let detected_intent = classify::detect_intent(catalog, text);
    let complexity = features::complexity(&feats);

    let mut scores = BTreeMap::new();
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    for &(principle, ref keywords, ref indicators) in &catalog.principles {
        let score = score_principle(text, keywords, indicators);
        scores.insert(principle, score);
        specialized_check(principle, text, &feats, &mut issues, &mut suggestions);
    }

    let total_score =
        scores.values().map(|&s| s as f64).sum::<f64>() / scores.len().max(1) as f64;

    apply_level_filter(level, &mut issues, &mut suggestions);

    AnalysisResult {
        original_prompt: text.to_string(),
        domain,
        optimization_level: level,
        scores,
        total_score,
        token_count: feats.estimated_tokens,
        issues,
        suggestions,
        detected_intent,
        complexity,
    }
}

fn score_principle(text: &str, keywords: &[String], indicators: &[String]) -> u8 {
    let lower = text.to_lowercase();

    let keyword_hits = keywords.iter().filter(|k| lower.contains(k.as_str())).count();
    let indicator_hits = indicators.iter().filter(|i| lower.contains(i.as_str())).count();

    let score = 1 + keyword_hits.min(2) + indicator_hits.min(2);
    (score as u8).clamp(PRINCIPLE_SCORE_MIN, PRINCIPLE_SCORE_MAX)
}

fn specialized_check(
    principle: Principle,
    text: &str,
    feats: &TextFeatures,
    issues: &mut Vec<String>,
    suggestions: &mut Vec<String>,
) {
    match principle {
        Principle::Clarity => {
            if feats.word_count < MIN_CLARITY_WORDS {
                issues.push("프롬프트가 너무 짧아 명확성 부족".to_string());
                suggestions.push("더 구체적인 목표와 요구사항을 명시해주세요".to_string());
            }
            if !text.contains('?') && !text.contains("요청") && !text.contains("부탁") {
                issues.push("명확한 요청 형태가 아님".to_string());
                suggestions.push("무엇을 원하는지 명확히 요청해주세요".to_string());
            }
        }
        Principle::Context => {
            if feats.word_count < MIN_CONTEXT_WORDS {
                issues.push("충분한 배경 정보 부족".to_string());
                suggestions.push("작업의 배경과 관련 정보를 더 제공해주세요".to_string());
            }
        }
        Principle::Examples => {
            if !text.contains("예시") && !text.contains("예를") {
                issues.push("구체적인 예시 부재".to_string());
                suggestions.push("기대하는 결과물의 예시를 포함해주세요".to_string());
            }
        }
        Principle::Structure => {}
        Principle::Role => {
            let role_markers = ["역할", "전문가", "관점", "입장"];
            if !role_markers.iter().any(|m| text.contains(m)) {
                issues.push("AI 역할이 정의되지 않음".to_string());
                suggestions.push(
                    "AI에게 특정 역할을 부여해주세요 (예: '전문가로서', '관리자 관점에서')"
                        .to_string(),
                );
            }
        }
        Principle::Format => {
            let format_markers = ["형식", "방식", "구조", "템플릿"];
            if !format_markers.iter().any(|m| text.contains(m)) {
                issues.push("출력 형식이 지정되지 않음".to_string());
                suggestions.push("원하는 결과물의 형식이나 구조를 명시해주세요".to_string());
            }
        }
        Principle::Constraints => {
            let negative_markers = ["하지 않도록", "피해", "제외", "주의"];
            if !negative_markers.iter().any(|m| text.contains(m)) {
                issues.push("피해야 할 사항이 명시되지 않음".to_string());
                suggestions.push("원치 않는 결과나 피해야 할 사항을 명시해주세요".to_string());
            }
        }
    }
}

fn apply_level_filter(
    level: OptimizationLevel,
    issues: &mut Vec<String>,
    suggestions: &mut Vec<String>,
) {
    match level {
        OptimizationLevel::Conservative => {
            issues.retain(|i| i.contains("너무 짧아") || i.contains("부족"));
            suggestions.truncate(CONSERVATIVE_SUGGESTION_CAP);
        }
        OptimizationLevel::Aggressive => {
            suggestions.extend([
                "더 구체적인 수치나 목표를 추가해보세요".to_string(),
                "실제 사용 사례를 포함해보세요".to_string(),
                "결과물의 활용 방법을 명시해보세요".to_string(),
            ]);
        }
        OptimizationLevel::Balanced => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn analyze_balanced(text: &str) -> AnalysisResult {
        analyze(&catalog(), text, Domain::Auto, OptimizationLevel::Balanced)
    }

    #[test]
    fn test_scores_stay_in_range() {
        for text in [
            "",
            "코드 리뷰를 부탁드립니다",
            "구체적 명확 자세히 상세 정확 목표 요구사항 원하는 결과 형식 구조 예시",
        ] {
            let result = analyze_balanced(text);
            for (_, &score) in &result.scores {
                assert!((PRINCIPLE_SCORE_MIN..=PRINCIPLE_SCORE_MAX).contains(&score));
            }
            assert!(result.total_score >= PRINCIPLE_SCORE_MIN as f64);
            assert!(result.total_score <= PRINCIPLE_SCORE_MAX as f64);
        }
    }

    #[test]
    fn test_total_is_mean_of_principles() {
        let result = analyze_balanced("코드 리뷰를 부탁드립니다");
        let mean =
            result.scores.values().map(|&s| s as f64).sum::<f64>() / result.scores.len() as f64;
        assert!((result.total_score - mean).abs() < 1e-9);
    }

    #[test]
    fn test_review_scenario_classification() {
        let result = analyze_balanced("코드 리뷰를 부탁드립니다");
        assert_eq!(result.domain, Domain::Development);
        assert_eq!(result.detected_intent, Intent::Analyze);
        assert_eq!(result.complexity, Complexity::Low);
    }

    #[test]
    fn test_short_prompt_flags_clarity_issue() {
        let result = analyze_balanced("리뷰 부탁");
        assert!(result.issues.iter().any(|i| i.contains("너무 짧아")));
    }

    #[test]
    fn test_conservative_filters_issues_and_caps_suggestions() {
        let result = analyze(
            &catalog(),
            "글을 써줘",
            Domain::Auto,
            OptimizationLevel::Conservative,
        );
        assert!(result
            .issues
            .iter()
            .all(|i| i.contains("너무 짧아") || i.contains("부족")));
        assert!(result.suggestions.len() <= CONSERVATIVE_SUGGESTION_CAP);
    }

    #[test]
    fn test_aggressive_appends_generic_suggestions() {
        let balanced = analyze_balanced("글을 써줘");
        let aggressive = analyze(
            &catalog(),
            "글을 써줘",
            Domain::Auto,
            OptimizationLevel::Aggressive,
        );
        assert_eq!(aggressive.suggestions.len(), balanced.suggestions.len() + 3);
    }

    #[test]
    fn test_explicit_domain_wins_over_detection() {
        let result = analyze(
            &catalog(),
            "코드 리뷰를 부탁드립니다",
            Domain::Marketing,
            OptimizationLevel::Balanced,
        );
        assert_eq!(result.domain, Domain::Marketing);
    }

    #[test]
    fn test_analysis_idempotent() {
        let a = analyze_balanced("블로그 글을 단계별로 작성해주세요");
        let b = analyze_balanced("블로그 글을 단계별로 작성해주세요");
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.domain, b.domain);
        assert_eq!(a.detected_intent, b.detected_intent);
        assert_eq!(a.total_score, b.total_score);
    }
}
