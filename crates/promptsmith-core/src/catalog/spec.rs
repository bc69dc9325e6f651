//! Raw, serde-facing catalog schema.
//!
//! This is the on-disk shape: plain strings, no compiled matchers.
//! [`Catalog::compile`](super::Catalog) turns a spec into the runtime
//! catalog, rejecting malformed data with a fatal error.

use serde::{Deserialize, Serialize};

use crate::contradiction::ContradictionFamily;
use crate::types::{Complexity, Domain, Intent, Principle, Severity};

/// Root of a catalog file (JSON or YAML).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSpec {
    /// Weighted keyword tables, one entry per concrete domain.
    pub domains: Vec<DomainKeywordsSpec>,

    /// Keyword lists, one entry per detectable intent. Order is the
    /// classifier tie-break order.
    pub intents: Vec<IntentKeywordsSpec>,

    /// Rubric keyword/indicator lists, one entry per principle.
    pub principles: Vec<PrincipleRubricSpec>,

    /// Persona phrases prepended by the role rewrite pass.
    pub roles: Vec<RoleSetSpec>,

    /// Background clauses prepended by the context rewrite pass.
    pub context_phrases: Vec<ContextPhraseSpec>,

    /// Format guides appended by the format pass, keyed by complexity.
    pub format_guides: FormatGuidesSpec,

    /// "Avoid X" clauses appended by the constraints pass.
    pub constraint_phrases: ConstraintPhrasesSpec,

    /// Verbose-phrase -> concise-phrase substitutions (regex).
    pub compaction_rules: Vec<CompactionRuleSpec>,

    /// Paired-pattern contradiction rules.
    pub contradiction_rules: Vec<ContradictionRuleSpec>,

    /// Absolute-prohibition keywords for the proximity rule.
    pub prohibition_keywords: Vec<String>,

    /// Absolute-requirement keywords for the proximity rule.
    pub requirement_keywords: Vec<String>,

    /// Known anti-patterns and their literal replacements.
    pub anti_patterns: Vec<AntiPatternSpec>,

    /// Tool-preamble guideline block content.
    pub tool_preamble: ToolPreambleSpec,

    /// Eagerness tiers for the agentic-pattern pass.
    pub agentic_tiers: AgenticTiersSpec,

    /// Skeletons for the XML structuring pass.
    pub xml_templates: XmlTemplatesSpec,

    /// Phrasing templates with `{name}` placeholders.
    pub templates: Vec<TemplateSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainKeywordsSpec {
    pub domain: Domain,

    /// Weight 1.0 per hit.
    #[serde(default)]
    pub simple: Vec<String>,

    /// Multi-word phrases, weight 2.0 per hit.
    #[serde(default)]
    pub compound: Vec<String>,

    /// Individually weighted keywords.
    #[serde(default)]
    pub weighted: Vec<WeightedKeywordSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedKeywordSpec {
    pub keyword: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentKeywordsSpec {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipleRubricSpec {
    pub principle: Principle,
    pub keywords: Vec<String>,
    pub indicators: Vec<String>,
}

/// Persona phrases for one domain. `expert` is required; the rewrite
/// pass falls back to generic phrases for the optional slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSetSpec {
    pub domain: Domain,
    pub expert: String,
    #[serde(default)]
    pub analyst: Option<String>,
    #[serde(default)]
    pub debugger: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPhraseSpec {
    pub domain: Domain,
    pub phrase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatGuidesSpec {
    pub low: String,
    pub medium: String,
    pub high: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintPhrasesSpec {
    /// Domain-agnostic clauses, in append priority order.
    pub generic: Vec<String>,

    /// Optional domain-specific clause.
    #[serde(default)]
    pub per_domain: Vec<DomainConstraintSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConstraintSpec {
    pub domain: Domain,
    pub phrase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompactionRuleSpec {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContradictionRuleSpec {
    pub family: ContradictionFamily,

    /// At least two regex patterns; the rule fires when two distinct
    /// patterns match the same text.
    pub patterns: Vec<String>,

    pub description: String,
    pub example: String,
    pub severity: Severity,
    pub fix_strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntiPatternSpec {
    pub description: String,

    /// Literal phrases matched case-insensitively.
    pub examples: Vec<String>,

    pub replacement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPreambleSpec {
    pub components: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgenticTiersSpec {
    pub low: AgenticTierSpec,
    pub medium: AgenticTierSpec,
    pub high: AgenticTierSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgenticTierSpec {
    pub description: String,
    pub prompt_patterns: Vec<String>,
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XmlTemplatesSpec {
    /// Uses `{role}`, `{task}`, `{constraints}`.
    pub basic: String,

    /// Uses `{preambles}`, `{persistence}`, `{escapes}`, `{constraints}`.
    pub agentic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub id: String,
    pub name: String,
    pub domain: Domain,
    pub intent: Intent,
    pub body: String,
    pub variables: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example_usage: String,
    pub complexity: Complexity,
}
