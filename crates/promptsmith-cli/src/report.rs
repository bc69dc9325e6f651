//! Human-readable report formatting.

use promptsmith_core::pipeline::OptimizationResponse;
use promptsmith_core::{AgenticAnalysis, AgenticOptimization, AnalysisResult, OptimizationResult};

const RULE: &str = "────────────────────────────────────────";

fn stars(score: u8) -> String {
    let filled = score.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn analysis(result: &AnalysisResult) -> String {
    let mut out = Vec::new();

    out.push("📊 프롬프트 분석 결과".to_string());
    out.push(RULE.to_string());
    out.push(format!("• 도메인: {}", result.domain));
    out.push(format!("• 의도: {}", result.detected_intent));
    out.push(format!("• 복잡도: {}", result.complexity));
    out.push(format!("• 예상 토큰: {}", result.token_count));
    out.push(String::new());

    out.push("📈 원칙별 점수:".to_string());
    for (principle, &score) in &result.scores {
        out.push(format!("  • {principle}: {} ({score}/5)", stars(score)));
    }
    out.push(format!("  총점: {:.1}/5.0", result.total_score));

    if !result.issues.is_empty() {
        out.push(String::new());
        out.push("⚠️  발견된 이슈:".to_string());
        for issue in &result.issues {
            out.push(format!("  • {issue}"));
        }
    }

    if !result.suggestions.is_empty() {
        out.push(String::new());
        out.push("💡 개선 제안:".to_string());
        for suggestion in &result.suggestions {
            out.push(format!("  • {suggestion}"));
        }
    }

    out.join("\n")
}

pub fn optimization(result: &OptimizationResult) -> String {
    let mut out = Vec::new();

    out.push("✅ 최적화된 프롬프트:".to_string());
    out.push(RULE.to_string());
    out.push(result.optimized_prompt.clone());
    out.push(String::new());

    out.push("🎯 최적화 결과:".to_string());
    out.push(format!(
        "  • 토큰 절감: {:.1}% ({} 토큰)",
        result.token_reduction_percent, result.token_reduction
    ));
    out.push(format!(
        "  • 적용 기법: {}",
        result.applied_techniques.join(", ")
    ));
    out.push(format!(
        "  • 최적화 점수: {:.1}/5.0",
        result.optimization_score
    ));

    if !result.improvement_areas.is_empty() {
        out.push(String::new());
        out.push("🔧 개선 사항:".to_string());
        for improvement in &result.improvement_areas {
            out.push(format!("  • {improvement}"));
        }
    }

    out.join("\n")
}

pub fn agentic_analysis(result: &AgenticAnalysis) -> String {
    let mut out = Vec::new();

    out.push("📊 확장 분석 결과".to_string());
    out.push(RULE.to_string());
    out.push(format!("  • Agentic 구조: {:.1}/10", result.agentic_score));
    out.push(format!("  • 명확성: {:.1}/10", result.clarity_score));
    out.push(format!(
        "  • 컨텍스트 효율성: {:.1}/10",
        result.context_efficiency_score
    ));
    out.push(format!(
        "  • 도구 프리앰블 품질: {:.1}/10",
        result.tool_preamble_quality
    ));
    out.push(format!("  • 복잡도: {:.1}/10", result.complexity_score));
    out.push(String::new());

    out.push("🎯 추천 파라미터:".to_string());
    out.push(format!("  • reasoning_effort: {}", result.reasoning_effort));
    out.push(format!("  • verbosity: {}", result.verbosity));
    out.push(format!(
        "  • XML 구조 사용: {}",
        if result.xml_structured { "예" } else { "아니오" }
    ));

    if !result.contradictions.is_empty() {
        out.push(String::new());
        out.push("⚠️  감지된 모순:".to_string());
        for (i, contradiction) in result.contradictions.iter().enumerate() {
            out.push(format!("  {}. {}", i + 1, contradiction.description));
            out.push(format!("     심각도: {}", contradiction.severity));
            out.push(format!("     수정 전략: {}", contradiction.fix_strategy));
        }
    }

    if !result.suggestions.is_empty() {
        out.push(String::new());
        out.push("💡 개선 제안:".to_string());
        for suggestion in &result.suggestions {
            out.push(format!("  • {suggestion}"));
        }
    }

    out.join("\n")
}

pub fn agentic_optimization(result: &AgenticOptimization) -> String {
    let mut out = Vec::new();

    out.push("✅ 최적화된 프롬프트:".to_string());
    out.push(RULE.to_string());
    out.push(result.optimized_prompt.clone());
    out.push(String::new());

    out.push("🎯 권장 파라미터:".to_string());
    out.push(format!("  • reasoning_effort: {}", result.reasoning_effort));
    out.push(format!("  • verbosity: {}", result.verbosity));
    out.push(String::new());

    out.push("🔧 적용된 개선사항:".to_string());
    for (i, improvement) in result.improvements.iter().enumerate() {
        out.push(format!("  {}. {improvement}", i + 1));
    }
    out.push(String::new());

    out.push("📊 최적화 통계:".to_string());
    out.push(format!(
        "  • 제거된 모순: {}개",
        result.removed_contradictions
    ));
    out.push(format!("  • 추가된 기능: {}개", result.added_features.len()));
    out.push(String::new());

    out.push("📋 XML 구조화 버전:".to_string());
    out.push(RULE.to_string());
    out.push(result.xml_structured_prompt.clone());

    out.join("\n")
}

pub fn response(resp: &OptimizationResponse) -> String {
    let mut out = Vec::new();

    if !resp.success {
        out.push(format!("❌ {}", resp.message));
        return out.join("\n");
    }

    if let Some(analysis) = &resp.analysis {
        out.push(self::analysis(analysis));
    }
    if let Some(optimization) = &resp.optimization {
        out.push(String::new());
        out.push(self::optimization(optimization));
    }
    if let Some(template) = &resp.template {
        out.push(String::new());
        out.push(format!("📄 템플릿: {} (ID: {})", template.name, template.id));
    }
    if let Some(filled) = &resp.optimized_prompt {
        if resp.optimization.is_none() {
            out.push(String::new());
            out.push(filled.clone());
        }
    }
    if !resp.recommendations.is_empty() {
        out.push(String::new());
        for recommendation in &resp.recommendations {
            out.push(format!("• {recommendation}"));
        }
    }

    out.join("\n")
}
