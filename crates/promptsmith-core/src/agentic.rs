//! Extended rubric for agentic prompts.
//!
//! Four axes scored independently on a 0-10 scale, each starting from a
//! fixed base and adjusted by keyword families; a continuous complexity
//! score drives the reasoning-effort and verbosity recommendations.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::contradiction::{self, Contradiction};
use crate::types::{ReasoningEffort, Severity, Verbosity};

/// Bounds for every extended-rubric axis.
pub const AXIS_MIN: f64 = 0.0;
pub const AXIS_MAX: f64 = 10.0;

/// Axes below this raise a structural issue on the result.
const AXIS_ISSUE_GATE: f64 = 6.0;

lazy_static! {
    static ref OPENING_TAG: Regex = Regex::new(r"<(\w+)>").unwrap();
    static ref CLOSING_TAG: Regex = Regex::new(r"</(\w+)>").unwrap();
    static ref STEP_MARKER: Regex =
        Regex::new(r"(?im)(?:step|단계)\s*\d+|^\d+\.|^-\s").unwrap();
    static ref TOOL_MENTION: Regex = Regex::new(r"(?i)tool|function|api|도구|함수").unwrap();
    static ref CONDITIONAL: Regex = Regex::new(r"(?i)if|when|unless|만약|경우").unwrap();
    static ref CONSTRAINT: Regex = Regex::new(r"(?i)must|should|constraint|제약|필수").unwrap();
}

const TOOL_KEYWORDS: [&str; 6] = ["tool", "function", "api", "call", "도구", "함수"];
const PERSISTENCE_KEYWORDS: [&str; 6] =
    ["continue", "keep going", "until", "completely", "계속", "끝까지"];
const ESCAPE_KEYWORDS: [&str; 5] =
    ["if uncertain", "if unsure", "best judgment", "불확실하면", "판단"];
const OVER_THOROUGH_KEYWORDS: [&str; 5] =
    ["maximize", "all possible", "every single", "모든", "완벽하게"];
const AMBIGUOUS_KEYWORDS: [&str; 5] =
    ["as needed", "when appropriate", "if necessary", "필요하면", "적절히"];
const EXCESSIVE_CONTEXT_PHRASES: [&str; 6] = [
    "maximize context",
    "all possible information",
    "gather everything",
    "read all files",
    "모든 정보",
    "모든 파일",
];
const BALANCED_CONTEXT_KEYWORDS: [&str; 5] =
    ["sufficient", "relevant", "necessary", "필요한", "관련된"];
const RESTATE_KEYWORDS: [&str; 5] = ["rephrase", "restate", "clarify goal", "재구성", "명확히"];
const PLAN_KEYWORDS: [&str; 5] = ["plan", "outline", "steps", "계획", "단계"];
const PROGRESS_KEYWORDS: [&str; 5] = ["progress", "update", "status", "진행", "상황"];
const CONCISE_KEYWORDS: [&str; 6] = ["brief", "concise", "short", "quick", "간단히", "간결하게"];
const DETAILED_KEYWORDS: [&str; 6] =
    ["detailed", "comprehensive", "thorough", "explain", "상세히", "자세히"];

// Case-sensitive on purpose; "Step" headings are capitalized markers.
const SECTION_INDICATORS: [&str; 5] = ["##", "1.", "2.", "Step", "단계"];

/// A structural issue on an agentic analysis, distinct from the free
/// suggestion strings.
#[derive(Debug, Clone, Serialize)]
pub struct AgenticIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub description: String,
    pub fix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Contradiction,
    AgenticStructure,
    Clarity,
    ContextEfficiency,
}

/// Full extended-rubric analysis of one prompt.
#[derive(Debug, Clone, Serialize)]
pub struct AgenticAnalysis {
    pub original_prompt: String,
    pub contradictions: Vec<Contradiction>,
    pub agentic_score: f64,
    pub clarity_score: f64,
    pub context_efficiency_score: f64,
    pub tool_preamble_quality: f64,
    pub reasoning_effort: ReasoningEffort,
    pub verbosity: Verbosity,
    pub xml_structured: bool,
    pub issues: Vec<AgenticIssue>,
    pub suggestions: Vec<String>,
    pub complexity_score: f64,
}

/// Run the full extended analysis.
pub fn analyze(catalog: &Catalog, text: &str) -> AgenticAnalysis {
    let contradictions = contradiction::detect(catalog, text);

    let (agentic_score, agentic_suggestions) = agentic_structure(text);
    let (clarity_score, clarity_suggestions) = clarity(text);
    let (context_efficiency_score, context_suggestions) = context_efficiency(text);
    let (tool_preamble_quality, preamble_suggestions) = tool_preamble(text);

    let complexity_score = complexity(text);
    let reasoning_effort = recommend_reasoning_effort(complexity_score);
    let verbosity = recommend_verbosity(text, complexity_score);

    let mut issues: Vec<AgenticIssue> = contradictions
        .iter()
        .map(|c| AgenticIssue {
            kind: IssueKind::Contradiction,
            severity: c.severity,
            description: c.description.clone(),
            fix: c.fix_strategy.clone(),
        })
        .collect();

    if agentic_score < AXIS_ISSUE_GATE {
        issues.push(AgenticIssue {
            kind: IssueKind::AgenticStructure,
            severity: Severity::Medium,
            description: format!("Agentic 구조 점수가 낮습니다 ({agentic_score:.1}/10)"),
            fix: "Agentic 패턴을 추가하세요".to_string(),
        });
    }
    if clarity_score < AXIS_ISSUE_GATE {
        issues.push(AgenticIssue {
            kind: IssueKind::Clarity,
            severity: Severity::Medium,
            description: format!("명확성 점수가 낮습니다 ({clarity_score:.1}/10)"),
            fix: "XML 구조나 명확한 섹션 구분을 추가하세요".to_string(),
        });
    }
    if context_efficiency_score < AXIS_ISSUE_GATE {
        issues.push(AgenticIssue {
            kind: IssueKind::ContextEfficiency,
            severity: Severity::Low,
            description: format!("컨텍스트 효율성이 낮습니다 ({context_efficiency_score:.1}/10)"),
            fix: "균형잡힌 컨텍스트 수집 지시를 사용하세요".to_string(),
        });
    }

    let mut suggestions = agentic_suggestions;
    suggestions.extend(clarity_suggestions);
    suggestions.extend(context_suggestions);
    suggestions.extend(preamble_suggestions);

    AgenticAnalysis {
        original_prompt: text.to_string(),
        contradictions,
        agentic_score,
        clarity_score,
        context_efficiency_score,
        tool_preamble_quality,
        reasoning_effort,
        verbosity,
        xml_structured: is_xml_structured(text),
        issues,
        suggestions,
        complexity_score,
    }
}

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}

fn count_hits(lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lower.contains(*k)).count()
}

/// Agentic-structure axis, base 5.
pub fn agentic_structure(text: &str) -> (f64, Vec<String>) {
    let lower = text.to_lowercase();
    let mut score: f64 = 5.0;
    let mut suggestions = Vec::new();

    if contains_any(&lower, &TOOL_KEYWORDS) {
        score += 2.0;
    } else {
        suggestions.push("도구 사용 방법을 명시하면 Agentic 구조가 개선됩니다".to_string());
    }

    if contains_any(&lower, &PERSISTENCE_KEYWORDS) {
        score += 2.0;
    } else {
        suggestions.push("작업 지속성 지시를 추가하면 자율성이 향상됩니다".to_string());
    }

    if contains_any(&lower, &ESCAPE_KEYWORDS) {
        score += 1.0;
    } else {
        suggestions.push("불확실성 처리 방법(escape hatch)을 추가하세요".to_string());
    }

    if count_hits(&lower, &OVER_THOROUGH_KEYWORDS) >= 3 {
        score -= 2.0;
        suggestions.push("과도한 철저함 강조는 불필요한 도구 과다 사용을 유발합니다".to_string());
    }

    (score.clamp(AXIS_MIN, AXIS_MAX), suggestions)
}

/// Clarity axis, base 5.
pub fn clarity(text: &str) -> (f64, Vec<String>) {
    let lower = text.to_lowercase();
    let mut score: f64 = 5.0;
    let mut suggestions = Vec::new();

    if text.contains('<') && text.contains('>') {
        if OPENING_TAG.find_iter(text).count() >= 2 {
            score += 3.0;
        } else {
            score += 1.5;
            suggestions.push("더 체계적인 XML 구조를 사용하세요".to_string());
        }
    } else {
        suggestions.push("XML 구조를 사용하면 명확성이 크게 향상됩니다".to_string());
    }

    if SECTION_INDICATORS.iter().filter(|i| text.contains(*i)).count() >= 2 {
        score += 2.0;
    } else {
        suggestions.push("번호나 제목으로 섹션을 구분하세요".to_string());
    }

    let ambiguous = count_hits(&lower, &AMBIGUOUS_KEYWORDS);
    if ambiguous > 2 {
        score -= ambiguous as f64 * 0.5;
        suggestions.push(format!("애매한 표현({ambiguous}개)을 구체적으로 바꾸세요"));
    }

    (score.clamp(AXIS_MIN, AXIS_MAX), suggestions)
}

/// Context-efficiency axis, base 7.
pub fn context_efficiency(text: &str) -> (f64, Vec<String>) {
    let lower = text.to_lowercase();
    let mut score: f64 = 7.0;
    let mut suggestions = Vec::new();

    let excessive = count_hits(&lower, &EXCESSIVE_CONTEXT_PHRASES);
    if excessive > 0 {
        score -= excessive as f64 * 1.5;
        suggestions.push("과도한 컨텍스트 수집 지시는 토큰을 낭비합니다".to_string());
    }

    if contains_any(&lower, &BALANCED_CONTEXT_KEYWORDS) {
        score += 2.0;
    } else {
        suggestions
            .push("'sufficient' 또는 'relevant' 같은 균형잡힌 표현을 사용하세요".to_string());
    }

    (score.clamp(AXIS_MIN, AXIS_MAX), suggestions)
}

/// Tool-preamble axis, base 3. Preamble-free prompts score low.
pub fn tool_preamble(text: &str) -> (f64, Vec<String>) {
    let lower = text.to_lowercase();
    let mut score: f64 = 3.0;
    let mut suggestions = Vec::new();

    if contains_any(&lower, &RESTATE_KEYWORDS) {
        score += 2.0;
    } else {
        suggestions.push("사용자 목표를 재구성하도록 요청하세요".to_string());
    }

    if contains_any(&lower, &PLAN_KEYWORDS) {
        score += 2.0;
    } else {
        suggestions.push("구조화된 계획을 작성하도록 요청하세요".to_string());
    }

    if contains_any(&lower, &PROGRESS_KEYWORDS) {
        score += 3.0;
    } else {
        suggestions.push("진행 상황 업데이트를 요청하세요".to_string());
    }

    (score.clamp(AXIS_MIN, AXIS_MAX), suggestions)
}

/// Continuous complexity in [0,10]: clipped sum of five capped
/// sub-scores (length bucket, step count, tool mentions, conditionals,
/// constraint keywords).
pub fn complexity(text: &str) -> f64 {
    let mut score: f64 = 0.0;

    score += match text.chars().count() {
        0..=99 => 0.5,
        100..=299 => 1.0,
        300..=599 => 1.5,
        _ => 2.0,
    };

    let steps = STEP_MARKER.find_iter(text).count();
    score += (steps as f64 * 0.4).min(2.0);

    let tools = TOOL_MENTION.find_iter(text).count();
    score += (tools as f64 * 0.5).min(2.0);

    let conditionals = CONDITIONAL.find_iter(text).count();
    score += (conditionals as f64 * 0.4).min(2.0);

    let constraints = CONSTRAINT.find_iter(text).count();
    score += (constraints as f64 * 0.4).min(2.0);

    score.min(AXIS_MAX)
}

/// low <= 3 < medium <= 7 < high.
pub fn recommend_reasoning_effort(complexity: f64) -> ReasoningEffort {
    if complexity <= 3.0 {
        ReasoningEffort::Low
    } else if complexity <= 7.0 {
        ReasoningEffort::Medium
    } else {
        ReasoningEffort::High
    }
}

/// Explicit keyword requests win over the complexity fallback.
pub fn recommend_verbosity(text: &str, complexity: f64) -> Verbosity {
    let lower = text.to_lowercase();

    if contains_any(&lower, &CONCISE_KEYWORDS) {
        return Verbosity::Low;
    }
    if contains_any(&lower, &DETAILED_KEYWORDS) {
        return Verbosity::High;
    }

    if complexity < 4.0 {
        Verbosity::Low
    } else if complexity < 7.0 {
        Verbosity::Medium
    } else {
        Verbosity::High
    }
}

/// At least two opening and two closing tags.
pub fn is_xml_structured(text: &str) -> bool {
    OPENING_TAG.find_iter(text).count() >= 2 && CLOSING_TAG.find_iter(text).count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_axes_stay_in_range() {
        let catalog = Catalog::builtin();
        for text in [
            "",
            "코드 리뷰를 부탁드립니다",
            "maximize context, gather everything, read all files, 모든 정보, 모든 파일",
            "<role>dev</role><task>review</task> use tools, plan steps, report progress",
        ] {
            let result = analyze(&catalog, text);
            for score in [
                result.agentic_score,
                result.clarity_score,
                result.context_efficiency_score,
                result.tool_preamble_quality,
                result.complexity_score,
            ] {
                assert!((AXIS_MIN..=AXIS_MAX).contains(&score), "{score} for {text:?}");
            }
        }
    }

    #[test]
    fn test_tool_keywords_raise_agentic_score() {
        let (without, _) = agentic_structure("finish the report");
        let (with, _) = agentic_structure("use the api tool, continue until complete");
        assert!(with > without);
    }

    #[test]
    fn test_axes_clamp_at_the_upper_bound() {
        let (agentic, _) =
            agentic_structure("use the api tool, continue until done, best judgment if unsure");
        assert_eq!(agentic, AXIS_MAX);

        let (preamble, _) =
            tool_preamble("restate the goal, outline a plan, report progress updates");
        assert_eq!(preamble, AXIS_MAX);
    }

    #[test]
    fn test_over_thoroughness_penalized() {
        let (score, suggestions) =
            agentic_structure("maximize all possible checks on every single file");
        assert!(score < 5.0 + 0.1);
        assert!(suggestions.iter().any(|s| s.contains("철저함")));
    }

    #[test]
    fn test_xml_structure_detection() {
        assert!(is_xml_structured("<role>a</role><task>b</task>"));
        assert!(!is_xml_structured("<role>unclosed and <task> too"));
        assert!(!is_xml_structured("no tags at all"));
    }

    #[test]
    fn test_xml_tags_raise_clarity() {
        let (plain, _) = clarity("review this");
        let (tagged, _) = clarity("<role>reviewer</role>\n<task>review this</task>");
        assert!(tagged > plain);
    }

    #[test]
    fn test_excessive_context_lowers_efficiency() {
        let (score, _) = context_efficiency("maximize context and read all files");
        assert!(score < 7.0);
    }

    #[test]
    fn test_reasoning_effort_thresholds() {
        assert_eq!(recommend_reasoning_effort(0.0), ReasoningEffort::Low);
        assert_eq!(recommend_reasoning_effort(3.0), ReasoningEffort::Low);
        assert_eq!(recommend_reasoning_effort(5.0), ReasoningEffort::Medium);
        assert_eq!(recommend_reasoning_effort(7.0), ReasoningEffort::Medium);
        assert_eq!(recommend_reasoning_effort(8.5), ReasoningEffort::High);
    }

    #[test]
    fn test_verbosity_keyword_override() {
        assert_eq!(recommend_verbosity("간단히 답해줘", 9.0), Verbosity::Low);
        assert_eq!(recommend_verbosity("자세히 설명해줘", 0.0), Verbosity::High);
        assert_eq!(recommend_verbosity("do the thing", 5.0), Verbosity::Medium);
    }

    #[test]
    fn test_contradiction_becomes_issue() {
        let catalog = Catalog::builtin();
        let result = analyze(
            &catalog,
            "Never proceed without user confirmation but also auto-schedule \
             appointments immediately",
        );
        assert!(!result.contradictions.is_empty());
        assert!(result
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::Contradiction));
    }

    #[test]
    fn test_low_axes_raise_issues() {
        let catalog = Catalog::builtin();
        let result = analyze(&catalog, "도와줘");
        assert!(result
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::AgenticStructure));
        assert!(result.issues.iter().any(|i| i.kind == IssueKind::Clarity));
    }
}
