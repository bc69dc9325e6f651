//! Pipeline orchestration.
//!
//! [`Optimizer`] is an explicit service object built around one
//! immutable catalog. Every call is a pure function of its arguments
//! and the catalog; callers may share the service across threads
//! freely. The request boundary catches internal panics and converts
//! them into structured failure responses.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::agentic::{self, AgenticAnalysis};
use crate::agentic_rewrite::{self, AgenticOptimization};
use crate::catalog::Catalog;
use crate::rewrite::{self, OptimizationResult};
use crate::score::{self, AnalysisResult};
use crate::template::{self, Template};
use crate::types::{Complexity, Domain, Intent, OptimizationLevel};

/// Prompts with fewer words than this route to template mode.
const TEMPLATE_MODE_WORD_LIMIT: usize = 5;

/// How a request should be executed; `Auto` lets the service decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Auto,
    Analyze,
    Optimize,
    Template,
}

/// One pipeline request.
#[derive(Debug, Clone)]
pub struct OptimizationRequest {
    pub prompt: String,
    pub domain: Domain,
    pub level: OptimizationLevel,
    pub mode: ExecutionMode,
    pub template_id: Option<String>,
    pub template_variables: HashMap<String, String>,
}

impl OptimizationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        OptimizationRequest {
            prompt: prompt.into(),
            domain: Domain::Auto,
            level: OptimizationLevel::Balanced,
            mode: ExecutionMode::Auto,
            template_id: None,
            template_variables: HashMap::new(),
        }
    }
}

/// Structured response for one request. Failures carry a message and
/// the elapsed time; they never propagate as panics to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResponse {
    pub success: bool,
    pub original_prompt: String,
    pub optimized_prompt: Option<String>,
    pub analysis: Option<AnalysisResult>,
    pub optimization: Option<OptimizationResult>,
    pub template: Option<Template>,
    pub missing_variables: Vec<String>,
    pub recommendations: Vec<String>,
    pub message: String,
    pub execution_time: f64,
    pub evaluated_at: DateTime<Utc>,
}

/// Classic analysis paired with its rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub analysis: AnalysisResult,
    pub optimization: OptimizationResult,
}

/// Agentic analysis paired with its rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct AgenticPipelineResult {
    pub analysis: AgenticAnalysis,
    pub optimization: AgenticOptimization,
}

/// The analysis-and-rewrite service.
#[derive(Debug, Clone)]
pub struct Optimizer {
    catalog: Catalog,
}

impl Optimizer {
    pub fn new(catalog: Catalog) -> Self {
        Optimizer { catalog }
    }

    /// Service over the builtin catalog.
    pub fn with_builtin() -> Self {
        Self::new(Catalog::builtin())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Classic analysis of one prompt.
    pub fn analyze(&self, text: &str, domain: Domain, level: OptimizationLevel) -> AnalysisResult {
        score::analyze(&self.catalog, text, domain, level)
    }

    /// Classic rewrite of an analyzed prompt.
    pub fn optimize(&self, analysis: &AnalysisResult) -> OptimizationResult {
        rewrite::optimize(&self.catalog, analysis)
    }

    /// Analysis plus rewrite in one call, with defaults.
    pub fn analyze_and_optimize(&self, text: &str) -> PipelineResult {
        let analysis = self.analyze(text, Domain::Auto, OptimizationLevel::Balanced);
        let optimization = self.optimize(&analysis);
        PipelineResult {
            analysis,
            optimization,
        }
    }

    /// Extended analysis of one prompt.
    pub fn analyze_agentic(&self, text: &str) -> AgenticAnalysis {
        agentic::analyze(&self.catalog, text)
    }

    /// Extended rewrite of an analyzed prompt.
    pub fn optimize_agentic(&self, analysis: &AgenticAnalysis) -> AgenticOptimization {
        agentic_rewrite::optimize(&self.catalog, analysis)
    }

    /// Extended analysis plus rewrite in one call.
    pub fn analyze_and_optimize_agentic(&self, text: &str) -> AgenticPipelineResult {
        let analysis = self.analyze_agentic(text);
        let optimization = self.optimize_agentic(&analysis);
        AgenticPipelineResult {
            analysis,
            optimization,
        }
    }

    /// Best template for a classification triple; `None` is a lookup
    /// miss, not an error.
    pub fn match_template(
        &self,
        domain: Domain,
        intent: Intent,
        complexity: Complexity,
    ) -> Option<&Template> {
        template::find_best(self.catalog.templates(), domain, intent, complexity)
    }

    /// Up to three templates matching the domain.
    pub fn template_recommendations(
        &self,
        domain: Domain,
        intent: Intent,
        complexity: Complexity,
    ) -> Vec<&Template> {
        template::recommendations(self.catalog.templates(), domain, intent, complexity)
    }

    /// Full request boundary; internal faults become failure responses.
    pub fn process_request(&self, request: &OptimizationRequest) -> OptimizationResponse {
        let start = Instant::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run_request(request)));

        match outcome {
            Ok(mut response) => {
                response.execution_time = start.elapsed().as_secs_f64();
                debug!(
                    success = response.success,
                    elapsed = response.execution_time,
                    "request processed"
                );
                response
            }
            Err(payload) => {
                let detail = panic_message(&payload);
                info!(detail, "request failed");
                OptimizationResponse {
                    success: false,
                    original_prompt: request.prompt.clone(),
                    optimized_prompt: None,
                    analysis: None,
                    optimization: None,
                    template: None,
                    missing_variables: Vec::new(),
                    recommendations: Vec::new(),
                    message: format!("오류가 발생했습니다: {detail}"),
                    execution_time: start.elapsed().as_secs_f64(),
                    evaluated_at: Utc::now(),
                }
            }
        }
    }

    fn run_request(&self, request: &OptimizationRequest) -> OptimizationResponse {
        let mode = match request.mode {
            ExecutionMode::Auto => select_mode(request),
            explicit => explicit,
        };

        let analysis = self.analyze(&request.prompt, request.domain, request.level);

        let mut response = OptimizationResponse {
            success: true,
            original_prompt: request.prompt.clone(),
            optimized_prompt: None,
            analysis: None,
            optimization: None,
            template: None,
            missing_variables: Vec::new(),
            recommendations: Vec::new(),
            message: String::new(),
            execution_time: 0.0,
            evaluated_at: Utc::now(),
        };

        match mode {
            ExecutionMode::Template => self.run_template_mode(request, &analysis, &mut response),
            ExecutionMode::Analyze => {}
            ExecutionMode::Optimize | ExecutionMode::Auto => {
                let optimization = self.optimize(&analysis);
                response.optimized_prompt = Some(optimization.optimized_prompt.clone());
                response.optimization = Some(optimization);
                response.recommendations = self
                    .template_recommendations(
                        analysis.domain,
                        analysis.detected_intent,
                        analysis.complexity,
                    )
                    .iter()
                    .map(|t| format!("템플릿 추천: {}", t.name))
                    .collect();
            }
        }

        response.analysis = Some(analysis);
        response
    }

    fn run_template_mode(
        &self,
        request: &OptimizationRequest,
        analysis: &AnalysisResult,
        response: &mut OptimizationResponse,
    ) {
        let found = match &request.template_id {
            Some(id) => self.catalog.template(id),
            None => self.match_template(
                analysis.domain,
                analysis.detected_intent,
                analysis.complexity,
            ),
        };

        match found {
            Some(template) => {
                response.template = Some(template.clone());
                match template.fill(&request.template_variables) {
                    Some(filled) => response.optimized_prompt = Some(filled),
                    None => {
                        let (partial, missing) =
                            template.fill_partial(&request.template_variables);
                        response.optimized_prompt = Some(partial);
                        response
                            .recommendations
                            .push(format!("누락된 변수: {}", missing.join(", ")));
                        response.missing_variables = missing;
                    }
                }
            }
            None => {
                response.recommendations = self
                    .template_recommendations(
                        analysis.domain,
                        analysis.detected_intent,
                        analysis.complexity,
                    )
                    .iter()
                    .map(|t| format!("추천 템플릿: {} (ID: {})", t.name, t.id))
                    .collect();
            }
        }
    }
}

/// Resolve the auto mode: explicit template id or a very short prompt
/// routes to template mode; a slash command containing "analyze" routes
/// to analysis; everything else optimizes.
fn select_mode(request: &OptimizationRequest) -> ExecutionMode {
    if request.template_id.is_some() {
        return ExecutionMode::Template;
    }
    if request.prompt.split_whitespace().count() < TEMPLATE_MODE_WORD_LIMIT {
        return ExecutionMode::Template;
    }
    if request.prompt.starts_with('/') && request.prompt.to_lowercase().contains("analyze") {
        return ExecutionMode::Analyze;
    }
    ExecutionMode::Optimize
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "internal fault"
    }
}
