//! # promptsmith-core
//!
//! Deterministic prompt analysis and rewrite pipeline.
//!
//! This crate analyzes free-text prompts, answering:
//! - What domain and intent does this prompt express?
//! - How does it score against a fixed quality rubric?
//! - Which instructions contradict each other?
//! - How should the text be rewritten to score higher?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No LLM calls**: All analysis is rule-based keyword/pattern matching
//! 3. **Pure after load**: The catalog is built once; every call is a pure
//!    function of its arguments and that read-only catalog
//! 4. **Thread-safe**: Callers may share one [`Optimizer`] across threads
//!
//! ## Example
//!
//! ```rust,ignore
//! use promptsmith_core::{Catalog, Optimizer};
//!
//! let service = Optimizer::new(Catalog::from_yaml_file("catalog.yaml")?);
//! let result = service.analyze_and_optimize("코드 리뷰를 부탁드립니다");
//!
//! println!("{} -> {}", result.analysis.total_score, result.optimization.optimized_prompt);
//! ```

pub mod agentic;
pub mod agentic_rewrite;
pub mod catalog;
pub mod classify;
pub mod contradiction;
pub mod features;
pub mod pipeline;
pub mod rewrite;
pub mod score;
pub mod template;
pub mod types;

// Re-export main types at crate root
pub use agentic::{AgenticAnalysis, AgenticIssue};
pub use agentic_rewrite::AgenticOptimization;
pub use catalog::{Catalog, CatalogError, CatalogSpec};
pub use contradiction::{Contradiction, ContradictionFamily};
pub use features::TextFeatures;
pub use pipeline::{
    AgenticPipelineResult, ExecutionMode, OptimizationRequest, OptimizationResponse, Optimizer,
    PipelineResult,
};
pub use rewrite::OptimizationResult;
pub use score::AnalysisResult;
pub use template::Template;
pub use types::{
    Complexity, Domain, Intent, LabelError, OptimizationLevel, Principle, ReasoningEffort,
    Severity, Verbosity,
};
