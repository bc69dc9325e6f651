//! Classic rewrite engine.
//!
//! A fixed ordered pipeline of independently gated passes. Every pass is
//! a pure function from (text, analysis) to (text, improvement log); the
//! engine folds them in order and packages the final report. A pass that
//! finds nothing to change returns its input untouched with an empty
//! log, never an error.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::features;
use crate::score::AnalysisResult;
use crate::types::{Complexity, Domain, Intent, OptimizationLevel, Principle};

/// Principle scores below this gate trigger the corresponding pass.
pub const CLASSIC_PASS_GATE: u8 = 4;

/// Prompts shorter than this (words) get an explicit goal prefix.
const SHORT_PROMPT_WORDS: usize = 5;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Filler qualifiers stripped by the clarity pass, longest first so
/// that "좀 더" never leaves a dangling "더" behind.
const VAGUE_QUALIFIERS: [&str; 5] = ["좀 더", "조금", "약간", "대충", "좀"];

/// Endings that already make the text a clear request.
const REQUEST_ENDINGS: [&str; 4] = ["주세요", "해주세요", "해줘", "부탁드립니다"];

/// Outcome of a full classic rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub improvement_areas: Vec<String>,
    pub token_reduction: i64,
    pub token_reduction_percent: f64,
    pub optimization_score: f64,
    pub applied_techniques: Vec<String>,
}

/// Run every classic pass in order over the analyzed prompt.
pub fn optimize(catalog: &Catalog, analysis: &AnalysisResult) -> OptimizationResult {
    let mut text = analysis.original_prompt.clone();
    let mut improvements = Vec::new();
    let mut techniques = Vec::new();

    let passes: [(&str, PassFn); 6] = [
        ("명확성 향상", clarity_pass),
        ("역할 정의", role_pass),
        ("컨텍스트 강화", context_pass),
        ("예시 요청", examples_pass),
        ("형식 지정", format_pass),
        ("제약 조건", constraints_pass),
    ];

    for (technique, pass) in passes {
        let (next, log) = pass(catalog, &text, analysis);
        text = next;
        if !log.is_empty() {
            techniques.push(technique.to_string());
        }
        improvements.extend(log);
    }

    let (compacted, compaction_delta) = compact_tokens(catalog, &text);
    text = compacted;
    if compaction_delta > 0 {
        techniques.push("토큰 효율화".to_string());
    }

    text = normalize(&text);

    let original_tokens = analysis.token_count as i64;
    let final_tokens = features::estimate_tokens(&text) as i64;
    let token_reduction = original_tokens - final_tokens;
    let token_reduction_percent = if original_tokens > 0 {
        token_reduction as f64 / original_tokens as f64 * 100.0
    } else {
        0.0
    };

    let optimization_score = score_optimization(&improvements, token_reduction_percent);

    OptimizationResult {
        original_prompt: analysis.original_prompt.clone(),
        optimized_prompt: text,
        improvement_areas: improvements,
        token_reduction,
        token_reduction_percent,
        optimization_score,
        applied_techniques: techniques,
    }
}

type PassFn = fn(&Catalog, &str, &AnalysisResult) -> (String, Vec<String>);

fn clarity_pass(_catalog: &Catalog, text: &str, analysis: &AnalysisResult) -> (String, Vec<String>) {
    if analysis.score(Principle::Clarity) >= CLASSIC_PASS_GATE {
        return (text.to_string(), Vec::new());
    }

    let mut out = text.to_string();
    let mut log = Vec::new();

    if out.split_whitespace().count() < SHORT_PROMPT_WORDS {
        out = format!("구체적인 목표를 가지고 {out}");
        log.push("구체적인 목표 추가".to_string());
    }

    for qualifier in VAGUE_QUALIFIERS {
        if out.contains(qualifier) {
            out = out.replace(qualifier, "");
            log.push(format!("애매한 표현 '{qualifier}' 제거"));
        }
    }

    if !REQUEST_ENDINGS.iter().any(|e| out.contains(e)) && !out.contains('?') {
        out.push_str("를 제공해주세요");
        log.push("명확한 요청 형식 추가".to_string());
    }

    (out, log)
}

fn role_pass(catalog: &Catalog, text: &str, analysis: &AnalysisResult) -> (String, Vec<String>) {
    if analysis.score(Principle::Role) >= CLASSIC_PASS_GATE {
        return (text.to_string(), Vec::new());
    }

    let role = select_role(catalog, analysis.domain, analysis.detected_intent);
    let out = format!("{role} {text}");
    (out, vec![format!("역할 정의: {role}")])
}

/// Persona for a domain and intent. The auto domain borrows the
/// development persona set, matching the original fallback.
fn select_role(catalog: &Catalog, domain: Domain, intent: Intent) -> String {
    let roles = catalog
        .roles
        .get(&domain)
        .or_else(|| catalog.roles.get(&Domain::Development));

    let Some(roles) = roles else {
        return "전문가로서".to_string();
    };

    match intent {
        Intent::Analyze => roles.analyst.clone().unwrap_or_else(|| "분석가로서".to_string()),
        Intent::Fix => roles.debugger.clone().unwrap_or_else(|| roles.expert.clone()),
        _ => roles.expert.clone(),
    }
}

fn context_pass(catalog: &Catalog, text: &str, analysis: &AnalysisResult) -> (String, Vec<String>) {
    if analysis.score(Principle::Context) >= CLASSIC_PASS_GATE {
        return (text.to_string(), Vec::new());
    }

    match catalog.context_phrases.get(&analysis.domain) {
        Some(phrase) if !text.contains(phrase.as_str()) => (
            format!("{phrase} {text}"),
            vec!["실용적인 컨텍스트 추가".to_string()],
        ),
        _ => (text.to_string(), Vec::new()),
    }
}

fn examples_pass(_catalog: &Catalog, text: &str, analysis: &AnalysisResult) -> (String, Vec<String>) {
    if analysis.score(Principle::Examples) >= CLASSIC_PASS_GATE {
        return (text.to_string(), Vec::new());
    }

    if text.contains("예시") || text.contains("예") {
        return (text.to_string(), Vec::new());
    }

    (
        format!("{text} 구체적인 예시를 포함해주세요"),
        vec!["구체적인 예시 요청 추가".to_string()],
    )
}

fn format_pass(catalog: &Catalog, text: &str, analysis: &AnalysisResult) -> (String, Vec<String>) {
    if analysis.score(Principle::Format) >= CLASSIC_PASS_GATE {
        return (text.to_string(), Vec::new());
    }

    if text.contains("형식") || text.contains("구조") {
        return (text.to_string(), Vec::new());
    }

    let guide = catalog.format_guides.for_complexity(analysis.complexity);
    let label = match analysis.complexity {
        Complexity::High => "구조화된 형식 지정",
        Complexity::Medium => "핵심 포인트별 정리",
        Complexity::Low => "간결한 형식 지정",
    };

    (
        format!("{text} {guide}"),
        vec![label.to_string(), "출력 형식 지정".to_string()],
    )
}

fn constraints_pass(
    catalog: &Catalog,
    text: &str,
    analysis: &AnalysisResult,
) -> (String, Vec<String>) {
    if analysis.score(Principle::Constraints) >= CLASSIC_PASS_GATE
        || analysis.optimization_level == OptimizationLevel::Conservative
    {
        return (text.to_string(), Vec::new());
    }

    let mut selected: Vec<&str> = Vec::new();
    match analysis.optimization_level {
        OptimizationLevel::Aggressive => {
            selected.extend(catalog.constraints.generic.iter().map(String::as_str));
            if let Some(domain_specific) = catalog.constraints.per_domain.get(&analysis.domain) {
                selected.push(domain_specific);
            }
        }
        _ => {
            if let Some(first) = catalog.constraints.generic.first() {
                selected.push(first);
            }
        }
    }

    let mut out = text.to_string();
    let mut log = Vec::new();
    for constraint in selected {
        if !out.contains(constraint) {
            out = format!("{out}, {constraint}");
            log.push("제약 조건 추가".to_string());
        }
    }

    (out, log)
}

/// Apply the compaction table and return the token delta. Always runs;
/// replacements only shorten or preserve length, so the estimated
/// token count never increases.
pub fn compact_tokens(catalog: &Catalog, text: &str) -> (String, i64) {
    let before = features::estimate_tokens(text) as i64;

    let mut out = text.to_string();
    for rule in &catalog.compaction {
        if rule.pattern.is_match(&out) {
            out = rule.pattern.replace_all(&out, rule.replacement.as_str()).into_owned();
        }
    }

    let after = features::estimate_tokens(&out) as i64;
    (out, before - after)
}

/// Collapse whitespace runs and stray duplicated commas.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    collapsed.trim().replace(",,", ",")
}

/// Clipped mean of the addition/improvement count and the bucketed
/// token-reduction percentage.
fn score_optimization(improvements: &[String], token_reduction_percent: f64) -> f64 {
    let additions = improvements
        .iter()
        .filter(|i| i.contains("추가") || i.contains("향상"))
        .count() as f64;
    let token_efficiency = ((token_reduction_percent / 10.0) as i64).clamp(1, 5) as f64;

    ((additions + token_efficiency) / 2.0).min(5.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn analyze(text: &str) -> AnalysisResult {
        score::analyze(&catalog(), text, Domain::Auto, OptimizationLevel::Balanced)
    }

    #[test]
    fn test_short_review_prompt_gains_role_and_context() {
        let catalog = catalog();
        let analysis = analyze("코드 리뷰를 부탁드립니다");
        let result = optimize(&catalog, &analysis);

        assert_ne!(result.optimized_prompt, result.original_prompt);
        assert!(!result.applied_techniques.is_empty());
        assert!(result.optimized_prompt.contains("부탁드립니다"));
    }

    #[test]
    fn test_compaction_never_increases_tokens() {
        let catalog = catalog();
        for text in [
            "자세히 설명해주세요",
            "초보자도 이해할 수 있도록 차근차근 설명해서 알려줘",
            "plain english text",
            "",
        ] {
            let before = features::estimate_tokens(text) as i64;
            let (out, delta) = compact_tokens(&catalog, text);
            let after = features::estimate_tokens(&out) as i64;
            assert!(after <= before);
            assert_eq!(delta, before - after);
        }
    }

    #[test]
    fn test_compaction_shortens_verbose_request() {
        let catalog = catalog();
        let (out, delta) = compact_tokens(&catalog, "자세히 설명해주시면 감사하겠습니다");
        assert_eq!(out, "설명해주세요");
        assert!(delta > 0);
    }

    #[test]
    fn test_vague_qualifiers_stripped_longest_first() {
        let catalog = catalog();
        let analysis = analyze("좀 더 알기 쉽게 써");
        let (out, _) = clarity_pass(&catalog, "좀 더 알기 쉽게 써", &analysis);
        assert!(!out.contains("좀 더"));
        assert!(!out.contains(" 더 알기"));
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_commas() {
        assert_eq!(normalize("  a   b ,, c  "), "a b , c");
    }

    #[test]
    fn test_conservative_level_skips_constraints() {
        let catalog = catalog();
        let analysis = score::analyze(
            &catalog,
            "글을 써줘",
            Domain::Auto,
            OptimizationLevel::Conservative,
        );
        let (out, log) = constraints_pass(&catalog, "글을 써줘", &analysis);
        assert_eq!(out, "글을 써줘");
        assert!(log.is_empty());
    }

    #[test]
    fn test_aggressive_adds_more_constraints_than_balanced() {
        let catalog = catalog();
        let balanced = score::analyze(
            &catalog,
            "글을 써줘",
            Domain::Content,
            OptimizationLevel::Balanced,
        );
        let aggressive = score::analyze(
            &catalog,
            "글을 써줘",
            Domain::Content,
            OptimizationLevel::Aggressive,
        );
        let (_, balanced_log) = constraints_pass(&catalog, "글을 써줘", &balanced);
        let (_, aggressive_log) = constraints_pass(&catalog, "글을 써줘", &aggressive);
        assert!(aggressive_log.len() >= balanced_log.len());
    }

    #[test]
    fn test_high_scoring_prompt_passes_are_noops() {
        let catalog = catalog();
        let mut analysis = analyze("코드 리뷰를 부탁드립니다");
        for score in analysis.scores.values_mut() {
            *score = 5;
        }
        let text = "이미 훌륭한 프롬프트";
        for pass in [
            clarity_pass as PassFn,
            role_pass,
            context_pass,
            examples_pass,
            format_pass,
            constraints_pass,
        ] {
            let (out, log) = pass(&catalog, text, &analysis);
            assert_eq!(out, text);
            assert!(log.is_empty());
        }
    }

    #[test]
    fn test_optimization_score_bounded() {
        let catalog = catalog();
        for text in ["리뷰", "자세히 설명해주세요", "코드 리뷰를 부탁드립니다"] {
            let analysis = analyze(text);
            let result = optimize(&catalog, &analysis);
            assert!(result.optimization_score <= 5.0);
            assert!(result.optimization_score >= 0.0);
        }
    }
}
