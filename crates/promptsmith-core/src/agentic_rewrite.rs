//! Agentic rewrite engine.
//!
//! Extended passes over an [`AgenticAnalysis`]: contradiction fixes
//! dispatched on the rule family, anti-pattern substitution, preamble
//! and eagerness-tier injection, a verbosity block, and a final XML
//! structuring step that preserves existing tag structure or
//! synthesizes one around extracted role/task/constraint fragments.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::agentic::AgenticAnalysis;
use crate::catalog::{AgenticTier, Catalog};
use crate::contradiction::{Contradiction, ContradictionFamily};
use crate::types::{ReasoningEffort, Verbosity};

/// Axis scores below this gate trigger preamble/pattern injection.
pub const AGENTIC_PASS_GATE: f64 = 7.0;

/// Complexity at or above this selects the high-eagerness tier and the
/// agentic XML template.
const HIGH_COMPLEXITY: f64 = 7.0;

/// Complexity at or above this selects the medium-eagerness tier.
const MEDIUM_COMPLEXITY: f64 = 4.0;

/// Agentic scores at or above this prefer the agentic XML template.
const AGENTIC_TEMPLATE_GATE: f64 = 6.0;

lazy_static! {
    static ref PERMISSION_FIX: Regex =
        Regex::new(r"(?i)never\s+(\w+)\s+without\s+(\w+)").unwrap();
    static ref CONFIRMATION_FIX: Regex = Regex::new(r"(?i)always\s+confirm").unwrap();
    static ref THOROUGHNESS_CONTEXT_FIX: Regex =
        Regex::new(r"(?i)maximize\s+context|gather\s+all\s+possible").unwrap();
    static ref THOROUGHNESS_SCOPE_FIX: Regex =
        Regex::new(r"(?i)thoroughly\s+(\w+)\s+all").unwrap();
    static ref ROLE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)you are (?:a |an )?(\w+(?:\s+\w+)*)").unwrap(),
        Regex::new(r"(?i)act as (?:a |an )?(\w+(?:\s+\w+)*)").unwrap(),
        Regex::new(r"(?i)role:\s*(\w+(?:\s+\w+)*)").unwrap(),
    ];
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

const CONSTRAINT_LINE_KEYWORDS: [&str; 6] =
    ["must", "should", "never", "always", "constraint", "requirement"];

const ESCAPE_HATCH: &str =
    "If 70% confident in the solution, proceed with best judgment and document assumptions.";

/// Outcome of a full agentic rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct AgenticOptimization {
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub xml_structured_prompt: String,
    pub reasoning_effort: ReasoningEffort,
    pub verbosity: Verbosity,
    pub improvements: Vec<String>,
    pub removed_contradictions: usize,
    pub added_features: Vec<String>,
}

/// Run every agentic pass in order over the analyzed prompt.
pub fn optimize(catalog: &Catalog, analysis: &AgenticAnalysis) -> AgenticOptimization {
    let mut text = analysis.original_prompt.clone();
    let mut improvements = Vec::new();
    let mut added_features = Vec::new();

    if !analysis.contradictions.is_empty() {
        let (fixed, fixes) = remove_contradictions(&text, &analysis.contradictions);
        text = fixed;
        improvements.extend(fixes);
        added_features.push("모순 제거 및 통합".to_string());
    }

    let (fixed, fixes) = fix_anti_patterns(catalog, &text);
    text = fixed;
    if !fixes.is_empty() {
        improvements.extend(fixes);
        added_features.push("Anti-pattern 수정".to_string());
    }

    if analysis.tool_preamble_quality < AGENTIC_PASS_GATE {
        let (enhanced, log) = add_tool_preamble(catalog, &text);
        text = enhanced;
        improvements.extend(log);
        added_features.push("도구 프리앰블".to_string());
    }

    if analysis.agentic_score < AGENTIC_PASS_GATE {
        let (enhanced, log) = apply_agentic_patterns(catalog, &text, analysis.complexity_score);
        text = enhanced;
        improvements.extend(log);
        added_features.push("Agentic 패턴".to_string());
    }

    let (enhanced, log) = apply_verbosity(&text, analysis.verbosity);
    text = enhanced;
    improvements.extend(log);
    added_features.push("Verbosity 최적화".to_string());

    let (xml_prompt, log) = structure_xml(catalog, &text, analysis);
    improvements.extend(log);
    added_features.push("XML 구조화".to_string());

    AgenticOptimization {
        original_prompt: analysis.original_prompt.clone(),
        optimized_prompt: text,
        xml_structured_prompt: xml_prompt,
        reasoning_effort: analysis.reasoning_effort,
        verbosity: analysis.verbosity,
        improvements,
        removed_contradictions: analysis.contradictions.len(),
        added_features,
    }
}

/// Rewrite the clauses behind each detected contradiction. Dispatch is
/// exhaustive on the rule family; proximity findings have no dedicated
/// textual fix and pass through.
pub fn remove_contradictions(
    text: &str,
    contradictions: &[Contradiction],
) -> (String, Vec<String>) {
    let mut out = text.to_string();
    let mut fixes = Vec::new();

    for contradiction in contradictions {
        let fixed = match contradiction.family {
            ContradictionFamily::Permission => Some((
                PERMISSION_FIX
                    .replace_all(&out, "Only $1 after obtaining $2, except in emergency situations")
                    .into_owned(),
                "우선순위 명시",
            )),
            ContradictionFamily::Confirmation => Some((
                CONFIRMATION_FIX
                    .replace_all(
                        &out,
                        "Confirm for critical actions; proceed automatically for routine tasks",
                    )
                    .into_owned(),
                "조건부 확인 로직",
            )),
            ContradictionFamily::Thoroughness => {
                let balanced = THOROUGHNESS_CONTEXT_FIX
                    .replace_all(&out, "Gather sufficient and relevant context")
                    .into_owned();
                Some((
                    THOROUGHNESS_SCOPE_FIX
                        .replace_all(&balanced, "Efficiently $1 relevant")
                        .into_owned(),
                    "균형잡힌 접근",
                ))
            }
            ContradictionFamily::Proximity => None,
        };

        if let Some((next, strategy)) = fixed {
            out = next;
            fixes.push(format!("모순 제거: {} → {strategy}", contradiction.description));
        }
    }

    (out, fixes)
}

/// Substitute known anti-pattern phrases with their balanced forms.
pub fn fix_anti_patterns(catalog: &Catalog, text: &str) -> (String, Vec<String>) {
    let mut out = text.to_string();
    let mut fixes = Vec::new();

    for anti in &catalog.anti_patterns {
        for matcher in &anti.matchers {
            if matcher.is_match(&out) {
                out = matcher.replace_all(&out, anti.replacement.as_str()).into_owned();
                fixes.push(format!("Anti-pattern 수정: {}", anti.description));
            }
        }
    }

    (out, fixes)
}

fn add_tool_preamble(catalog: &Catalog, text: &str) -> (String, Vec<String>) {
    let mut section = String::from("\n\n## Tool Usage Guidelines\n\n");
    for component in &catalog.tool_preamble.components {
        section.push_str(&format!("- {component}\n"));
    }
    section.push_str("\n### Example:\n");
    for example in &catalog.tool_preamble.examples {
        section.push_str(&format!("- {example}\n"));
    }

    (
        format!("{text}{section}"),
        vec!["도구 프리앰블 추가 (목표 재구성, 계획, 진행 상황 업데이트)".to_string()],
    )
}

fn eagerness_tier(catalog: &Catalog, complexity: f64) -> (&'static str, &AgenticTier) {
    if complexity >= HIGH_COMPLEXITY {
        ("high_eagerness", &catalog.agentic_tiers.high)
    } else if complexity >= MEDIUM_COMPLEXITY {
        ("medium_eagerness", &catalog.agentic_tiers.medium)
    } else {
        ("low_eagerness", &catalog.agentic_tiers.low)
    }
}

fn apply_agentic_patterns(catalog: &Catalog, text: &str, complexity: f64) -> (String, Vec<String>) {
    let (name, tier) = eagerness_tier(catalog, complexity);

    let mut section = format!("\n\n## Agentic Behavior ({})\n\n", tier.description);
    for pattern in &tier.prompt_patterns {
        section.push_str(&format!("- {pattern}\n"));
    }

    (
        format!("{text}{section}"),
        vec![format!("Agentic 패턴 적용: {name} ({})", tier.description)],
    )
}

fn apply_verbosity(text: &str, verbosity: Verbosity) -> (String, Vec<String>) {
    let mut section = String::from("\n\n## Response Style\n\n");
    let label = match verbosity {
        Verbosity::Low => {
            section.push_str("- Be concise and direct\n");
            section.push_str("- Focus on essential information only\n");
            section.push_str("- Avoid unnecessary explanations\n");
            "간결한 응답"
        }
        Verbosity::High => {
            section.push_str("- Provide detailed explanations\n");
            section.push_str("- Include examples and alternatives\n");
            section.push_str("- Explain reasoning and background\n");
            "상세한 응답"
        }
        Verbosity::Medium => {
            section.push_str("- Provide balanced explanations\n");
            section.push_str("- Include context where helpful\n");
            "균형잡힌 응답"
        }
    };

    (
        format!("{text}{section}"),
        vec![format!("Verbosity 최적화: {label}")],
    )
}

/// Final structuring step. Existing XML structure is preserved; plain
/// prompts get a synthesized template chosen by complexity and agentic
/// score.
pub fn structure_xml(
    catalog: &Catalog,
    text: &str,
    analysis: &AgenticAnalysis,
) -> (String, Vec<String>) {
    if analysis.xml_structured {
        return (text.to_string(), vec!["기존 XML 구조 유지 및 개선".to_string()]);
    }

    let constraints = extract_constraints(text);

    let xml = if analysis.complexity_score >= HIGH_COMPLEXITY
        || analysis.agentic_score >= AGENTIC_TEMPLATE_GATE
    {
        let preambles = bulleted(&catalog.tool_preamble.components);
        let persistence = if analysis.complexity_score >= HIGH_COMPLEXITY {
            bulleted(&catalog.agentic_tiers.high.characteristics)
        } else {
            bulleted(&catalog.agentic_tiers.medium.characteristics)
        };

        catalog
            .xml_templates
            .agentic
            .replace("{preambles}", &preambles)
            .replace("{persistence}", &persistence)
            .replace("{escapes}", ESCAPE_HATCH)
            .replace("{constraints}", &constraints)
    } else {
        let role = extract_role(text);
        let task = extract_task(text);
        let mut filled = catalog
            .xml_templates
            .basic
            .replace("{role}", &role)
            .replace("{task}", &task)
            .replace("{constraints}", &constraints);

        if task.is_empty() {
            filled.push_str(&format!("\n\n<!-- 원본 프롬프트 내용 -->\n{text}"));
        }
        filled
    };

    (xml, vec!["XML 구조 생성".to_string()])
}

fn bulleted(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_role(text: &str) -> String {
    for pattern in ROLE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            if let Some(role) = captures.get(1) {
                return role.as_str().to_string();
            }
        }
    }
    "AI assistant".to_string()
}

fn extract_task(text: &str) -> String {
    match SENTENCE_BOUNDARY.split(text).next() {
        Some(first) => first.trim().to_string(),
        None => text.chars().take(100).collect(),
    }
}

fn extract_constraints(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            CONSTRAINT_LINE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(str::trim)
        .collect();

    if lines.is_empty() {
        "No specific constraints".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agentic;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    const SCHEDULING_PROMPT: &str =
        "Never proceed without user confirmation but also auto-schedule appointments immediately";

    #[test]
    fn test_permission_contradiction_becomes_conditional() {
        let catalog = catalog();
        let analysis = agentic::analyze(&catalog, SCHEDULING_PROMPT);
        assert!(!analysis.contradictions.is_empty());

        let result = optimize(&catalog, &analysis);
        assert!(!PERMISSION_FIX.is_match(&result.optimized_prompt));
        assert!(result
            .optimized_prompt
            .contains("Only proceed after obtaining user"));
        assert_eq!(result.removed_contradictions, analysis.contradictions.len());
    }

    #[test]
    fn test_anti_pattern_substitution() {
        let catalog = catalog();
        let (out, fixes) =
            fix_anti_patterns(&catalog, "Use tools as needed and be extremely thorough.");
        assert!(out.contains("Use tools when: 1) Information is missing"));
        assert!(out.contains("Gather sufficient and relevant information"));
        assert_eq!(fixes.len(), 2);
    }

    #[test]
    fn test_low_preamble_quality_injects_guidelines() {
        let catalog = catalog();
        let analysis = agentic::analyze(&catalog, "리뷰해줘");
        assert!(analysis.tool_preamble_quality < AGENTIC_PASS_GATE);

        let result = optimize(&catalog, &analysis);
        assert!(result.optimized_prompt.contains("## Tool Usage Guidelines"));
        assert!(result
            .added_features
            .iter()
            .any(|f| f == "도구 프리앰블"));
    }

    #[test]
    fn test_verbosity_block_always_present() {
        let catalog = catalog();
        let analysis = agentic::analyze(&catalog, "간단히 요약해줘");
        let result = optimize(&catalog, &analysis);
        assert!(result.optimized_prompt.contains("## Response Style"));
        assert!(result.optimized_prompt.contains("Be concise and direct"));
    }

    #[test]
    fn test_existing_xml_structure_preserved() {
        let catalog = catalog();
        let text = "<role>reviewer</role>\n<task>review the diff</task>";
        let analysis = agentic::analyze(&catalog, text);
        assert!(analysis.xml_structured);

        let (xml, log) = structure_xml(&catalog, text, &analysis);
        assert_eq!(xml, text);
        assert_eq!(log, vec!["기존 XML 구조 유지 및 개선".to_string()]);
    }

    #[test]
    fn test_plain_prompt_gets_basic_template() {
        let catalog = catalog();
        let analysis = agentic::analyze(&catalog, "act as a security auditor. Review the login flow.");
        let (xml, _) = structure_xml(&catalog, &analysis.original_prompt, &analysis);
        assert!(xml.contains("<role>") || xml.contains("<tool_preambles>"));
    }

    #[test]
    fn test_role_extraction() {
        assert_eq!(extract_role("You are a senior engineer"), "senior engineer");
        assert_eq!(extract_role("act as an auditor"), "auditor");
        assert_eq!(extract_role("그냥 해줘"), "AI assistant");
    }

    #[test]
    fn test_constraint_extraction() {
        let text = "Review the code.\nYou must not skip tests.\nHave fun.";
        assert_eq!(extract_constraints(text), "You must not skip tests.");
        assert_eq!(extract_constraints("없음"), "No specific constraints");
    }

    #[test]
    fn test_eagerness_tier_selection() {
        let catalog = catalog();
        assert_eq!(eagerness_tier(&catalog, 8.0).0, "high_eagerness");
        assert_eq!(eagerness_tier(&catalog, 5.0).0, "medium_eagerness");
        assert_eq!(eagerness_tier(&catalog, 1.0).0, "low_eagerness");
    }
}
