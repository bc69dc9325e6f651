//! End-to-end scenarios over the service API.

use std::collections::HashMap;

use promptsmith_core::{
    Complexity, Domain, Intent, OptimizationLevel, Optimizer, Severity,
};

#[test]
fn review_request_classifies_and_rewrites() {
    let service = Optimizer::with_builtin();

    let analysis = service.analyze(
        "코드 리뷰를 부탁드립니다",
        Domain::Auto,
        OptimizationLevel::Balanced,
    );
    assert_eq!(analysis.domain, Domain::Development);
    assert_eq!(analysis.detected_intent, Intent::Analyze);
    assert_eq!(analysis.complexity, Complexity::Low);

    let optimization = service.optimize(&analysis);
    assert_eq!(optimization.original_prompt, "코드 리뷰를 부탁드립니다");
    assert!(!optimization.optimized_prompt.is_empty());
    assert!(optimization.optimization_score <= 5.0);
}

#[test]
fn contradictory_scheduling_prompt_is_flagged_and_fixed() {
    let service = Optimizer::with_builtin();
    let prompt =
        "Never proceed without user confirmation but also auto-schedule appointments immediately";

    let analysis = service.analyze_agentic(prompt);
    assert!(analysis
        .contradictions
        .iter()
        .any(|c| c.severity == Severity::High));

    let optimization = service.optimize_agentic(&analysis);
    assert!(optimization
        .optimized_prompt
        .contains("Only proceed after obtaining user"));
    assert!(optimization.removed_contradictions >= 1);
}

#[test]
fn code_review_template_fills_completely() {
    let service = Optimizer::with_builtin();
    let template = service.catalog().template("code_review").unwrap();

    let mut values: HashMap<String, String> = template
        .variables
        .iter()
        .map(|v| (v.clone(), format!("<{v}>")))
        .collect();
    values.insert("focus".to_string(), "성능 최적화".to_string());
    values.insert(
        "additional_requirements".to_string(),
        "시간 복잡도 분석 포함".to_string(),
    );

    let filled = template.fill(&values).unwrap();
    assert!(filled.contains("성능 최적화"));
    assert!(filled.contains("시간 복잡도 분석 포함"));
    assert!(!filled.contains("{focus}"));
    assert!(!filled.contains("{additional_requirements}"));
}

#[test]
fn service_is_shareable_across_threads() {
    let service = std::sync::Arc::new(Optimizer::with_builtin());

    let handles: Vec<_> = ["코드 리뷰를 부탁드립니다", "블로그 글을 써줘", "캠페인 기획"]
        .into_iter()
        .map(|prompt| {
            let service = std::sync::Arc::clone(&service);
            std::thread::spawn(move || service.analyze_and_optimize(prompt))
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.analysis.total_score >= 1.0);
    }
}
