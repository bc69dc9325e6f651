//! The rule/template catalog.
//!
//! A catalog is loaded (or taken from [`Catalog::builtin`]) exactly once
//! at service construction, validated fatally, and never mutated
//! afterward. All regex patterns are compiled here so that analysis
//! calls never pay recompilation cost.

pub mod builtin;
pub mod spec;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::info;

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\w+)\}").unwrap();
}

use crate::contradiction::ContradictionFamily;
use crate::template::Template;
use crate::types::{Complexity, Domain, Intent, Principle, Severity};

pub use spec::CatalogSpec;

/// Fatal catalog-load errors. A service must refuse to start on any of
/// these; they are never surfaced per analysis call.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("catalog validation failed: {0}")]
    Validation(String),
}

/// Weighted keyword table for one concrete domain.
#[derive(Debug, Clone)]
pub struct DomainKeywords {
    pub domain: Domain,
    pub simple: Vec<String>,
    pub compound: Vec<String>,
    pub weighted: Vec<(String, f64)>,
}

/// Persona phrases for one domain.
#[derive(Debug, Clone)]
pub struct RoleSet {
    pub expert: String,
    pub analyst: Option<String>,
    pub debugger: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FormatGuides {
    pub low: String,
    pub medium: String,
    pub high: String,
}

impl FormatGuides {
    pub fn for_complexity(&self, complexity: Complexity) -> &str {
        match complexity {
            Complexity::Low => &self.low,
            Complexity::Medium => &self.medium,
            Complexity::High => &self.high,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstraintPhrases {
    pub generic: Vec<String>,
    pub per_domain: HashMap<Domain, String>,
}

/// A compiled verbose-phrase -> concise-phrase substitution.
#[derive(Debug, Clone)]
pub struct CompactionRule {
    pub pattern: Regex,
    pub replacement: String,
}

/// A compiled paired-pattern contradiction rule.
#[derive(Debug, Clone)]
pub struct ContradictionRule {
    pub family: ContradictionFamily,
    pub patterns: Vec<Regex>,
    pub raw_patterns: Vec<String>,
    pub description: String,
    pub example: String,
    pub severity: Severity,
    pub fix_strategy: String,
}

/// A compiled anti-pattern: literal phrases and their replacement.
#[derive(Debug, Clone)]
pub struct AntiPattern {
    pub description: String,
    pub matchers: Vec<Regex>,
    pub replacement: String,
}

#[derive(Debug, Clone)]
pub struct ToolPreamble {
    pub components: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AgenticTier {
    pub description: String,
    pub prompt_patterns: Vec<String>,
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AgenticTiers {
    pub low: AgenticTier,
    pub medium: AgenticTier,
    pub high: AgenticTier,
}

#[derive(Debug, Clone)]
pub struct XmlTemplates {
    pub basic: String,
    pub agentic: String,
}

/// The validated, compiled, read-only catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) domains: Vec<DomainKeywords>,
    pub(crate) intents: Vec<(Intent, Vec<String>)>,
    pub(crate) principles: Vec<(Principle, Vec<String>, Vec<String>)>,
    pub(crate) roles: HashMap<Domain, RoleSet>,
    pub(crate) context_phrases: HashMap<Domain, String>,
    pub(crate) format_guides: FormatGuides,
    pub(crate) constraints: ConstraintPhrases,
    pub(crate) compaction: Vec<CompactionRule>,
    pub(crate) contradiction_rules: Vec<ContradictionRule>,
    pub(crate) prohibitions: Vec<String>,
    pub(crate) requirements: Vec<String>,
    pub(crate) anti_patterns: Vec<AntiPattern>,
    pub(crate) tool_preamble: ToolPreamble,
    pub(crate) agentic_tiers: AgenticTiers,
    pub(crate) xml_templates: XmlTemplates,
    pub(crate) templates: Vec<Template>,
}

impl Catalog {
    /// The default catalog compiled into the crate.
    ///
    /// Infallible by construction; the builtin spec is exercised by
    /// tests through the same validation path as file-loaded catalogs.
    pub fn builtin() -> Self {
        Self::compile(builtin::spec()).expect("builtin catalog must be valid")
    }

    /// Load and compile a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = serde_json::from_str(json)?;
        Self::compile(spec)
    }

    /// Load and compile a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = serde_yaml::from_str(yaml)?;
        Self::compile(spec)
    }

    /// Load and compile a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load and compile a catalog from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Validate a raw spec and compile every declared pattern.
    pub fn compile(spec: CatalogSpec) -> Result<Self, CatalogError> {
        validate(&spec)?;

        let domains = spec
            .domains
            .iter()
            .map(|d| DomainKeywords {
                domain: d.domain,
                simple: lowercase_all(&d.simple),
                compound: lowercase_all(&d.compound),
                weighted: d
                    .weighted
                    .iter()
                    .map(|w| (w.keyword.to_lowercase(), w.weight))
                    .collect(),
            })
            .collect();

        let intents = spec
            .intents
            .iter()
            .map(|i| (i.intent, lowercase_all(&i.keywords)))
            .collect();

        let principles = spec
            .principles
            .iter()
            .map(|p| (p.principle, lowercase_all(&p.keywords), lowercase_all(&p.indicators)))
            .collect();

        let roles = spec
            .roles
            .iter()
            .map(|r| {
                (
                    r.domain,
                    RoleSet {
                        expert: r.expert.clone(),
                        analyst: r.analyst.clone(),
                        debugger: r.debugger.clone(),
                    },
                )
            })
            .collect();

        let context_phrases = spec
            .context_phrases
            .iter()
            .map(|c| (c.domain, c.phrase.clone()))
            .collect();

        let compaction = spec
            .compaction_rules
            .iter()
            .map(|r| {
                Ok(CompactionRule {
                    pattern: compile_pattern(&r.pattern, false)?,
                    replacement: r.replacement.clone(),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let contradiction_rules = spec
            .contradiction_rules
            .iter()
            .map(|r| {
                Ok(ContradictionRule {
                    family: r.family,
                    patterns: r
                        .patterns
                        .iter()
                        .map(|p| compile_pattern(p, true))
                        .collect::<Result<Vec<_>, CatalogError>>()?,
                    raw_patterns: r.patterns.clone(),
                    description: r.description.clone(),
                    example: r.example.clone(),
                    severity: r.severity,
                    fix_strategy: r.fix_strategy.clone(),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let anti_patterns = spec
            .anti_patterns
            .iter()
            .map(|a| {
                Ok(AntiPattern {
                    description: a.description.clone(),
                    matchers: a
                        .examples
                        .iter()
                        .map(|e| compile_pattern(&regex::escape(e), true))
                        .collect::<Result<Vec<_>, CatalogError>>()?,
                    replacement: a.replacement.clone(),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let templates = spec
            .templates
            .iter()
            .map(|t| Template {
                id: t.id.clone(),
                name: t.name.clone(),
                domain: t.domain,
                intent: t.intent,
                body: t.body.clone(),
                variables: t.variables.clone(),
                description: t.description.clone(),
                example_usage: t.example_usage.clone(),
                complexity: t.complexity,
            })
            .collect::<Vec<_>>();

        let catalog = Catalog {
            domains,
            intents,
            principles,
            roles,
            context_phrases,
            format_guides: FormatGuides {
                low: spec.format_guides.low,
                medium: spec.format_guides.medium,
                high: spec.format_guides.high,
            },
            constraints: ConstraintPhrases {
                generic: spec.constraint_phrases.generic,
                per_domain: spec
                    .constraint_phrases
                    .per_domain
                    .iter()
                    .map(|d| (d.domain, d.phrase.clone()))
                    .collect(),
            },
            compaction,
            contradiction_rules,
            prohibitions: lowercase_all(&spec.prohibition_keywords),
            requirements: lowercase_all(&spec.requirement_keywords),
            anti_patterns,
            tool_preamble: ToolPreamble {
                components: spec.tool_preamble.components,
                examples: spec.tool_preamble.examples,
            },
            agentic_tiers: AgenticTiers {
                low: compile_tier(spec.agentic_tiers.low),
                medium: compile_tier(spec.agentic_tiers.medium),
                high: compile_tier(spec.agentic_tiers.high),
            },
            xml_templates: XmlTemplates {
                basic: spec.xml_templates.basic,
                agentic: spec.xml_templates.agentic,
            },
            templates,
        };

        info!(
            domains = catalog.domains.len(),
            templates = catalog.templates.len(),
            contradiction_rules = catalog.contradiction_rules.len(),
            "catalog compiled"
        );

        Ok(catalog)
    }

    /// All phrasing templates, in catalog order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Look up a template by id.
    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }
}

fn compile_tier(spec: spec::AgenticTierSpec) -> AgenticTier {
    AgenticTier {
        description: spec.description,
        prompt_patterns: spec.prompt_patterns,
        characteristics: spec.characteristics,
    }
}

fn compile_pattern(pattern: &str, case_insensitive: bool) -> Result<Regex, CatalogError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| CatalogError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

/// Structural validation, all failures fatal.
fn validate(spec: &CatalogSpec) -> Result<(), CatalogError> {
    for concrete in Domain::CONCRETE {
        if !spec.domains.iter().any(|d| d.domain == concrete) {
            return Err(CatalogError::Validation(format!(
                "missing keyword table for domain {concrete}"
            )));
        }
    }
    for d in &spec.domains {
        if d.domain == Domain::Auto {
            return Err(CatalogError::Validation(
                "the auto domain cannot carry keywords".to_string(),
            ));
        }
        if d.simple.is_empty() && d.compound.is_empty() && d.weighted.is_empty() {
            return Err(CatalogError::Validation(format!(
                "empty keyword table for domain {}",
                d.domain
            )));
        }
        for w in &d.weighted {
            if w.weight <= 0.0 {
                return Err(CatalogError::Validation(format!(
                    "non-positive weight {} for keyword {:?}",
                    w.weight, w.keyword
                )));
            }
        }
    }

    for i in &spec.intents {
        if i.intent == Intent::General {
            return Err(CatalogError::Validation(
                "the general intent is the fallback and cannot carry keywords".to_string(),
            ));
        }
        if i.keywords.is_empty() {
            return Err(CatalogError::Validation(format!(
                "empty keyword list for intent {}",
                i.intent
            )));
        }
    }

    for principle in Principle::ALL {
        let count = spec
            .principles
            .iter()
            .filter(|p| p.principle == principle)
            .count();
        if count != 1 {
            return Err(CatalogError::Validation(format!(
                "principle {principle} must appear exactly once, found {count}"
            )));
        }
    }

    for rule in &spec.contradiction_rules {
        if rule.patterns.len() < 2 {
            return Err(CatalogError::Validation(format!(
                "contradiction rule {:?} needs at least two patterns",
                rule.description
            )));
        }
    }

    let mut seen_templates = std::collections::HashSet::new();
    for t in &spec.templates {
        if !seen_templates.insert(&t.id) {
            return Err(CatalogError::Validation(format!(
                "duplicate template id: {}",
                t.id
            )));
        }
        for var in &t.variables {
            let placeholder = format!("{{{var}}}");
            if !t.body.contains(&placeholder) {
                return Err(CatalogError::Validation(format!(
                    "template {} declares variable {:?} absent from its body",
                    t.id, var
                )));
            }
        }
        for caps in PLACEHOLDER.captures_iter(&t.body) {
            let name = &caps[1];
            if !t.variables.iter().any(|v| v == name) {
                return Err(CatalogError::Validation(format!(
                    "template {} body uses undeclared placeholder {:?}",
                    t.id, name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_compiles() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.domains.len(), 4);
        assert_eq!(catalog.principles.len(), 7);
        assert!(catalog.template("code_review").is_some());
    }

    #[test]
    fn test_bad_regex_is_fatal() {
        let mut spec = builtin::spec();
        spec.compaction_rules.push(spec::CompactionRuleSpec {
            pattern: "([unclosed".to_string(),
            replacement: String::new(),
        });
        assert!(matches!(
            Catalog::compile(spec),
            Err(CatalogError::BadPattern { .. })
        ));
    }

    #[test]
    fn test_duplicate_template_id_is_fatal() {
        let mut spec = builtin::spec();
        let dup = spec.templates[0].clone();
        spec.templates.push(dup);
        assert!(matches!(
            Catalog::compile(spec),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_undeclared_variable_is_fatal() {
        let mut spec = builtin::spec();
        spec.templates[0].variables.push("ghost".to_string());
        assert!(matches!(
            Catalog::compile(spec),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_undeclared_body_placeholder_is_fatal() {
        let mut spec = builtin::spec();
        spec.templates[0].body.push_str(" {ghost}");
        assert!(matches!(
            Catalog::compile(spec),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_single_pattern_contradiction_rule_is_fatal() {
        let mut spec = builtin::spec();
        spec.contradiction_rules[0].patterns.truncate(1);
        assert!(matches!(
            Catalog::compile(spec),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_spec_round_trips_through_json() {
        let json = serde_json::to_string(&builtin::spec()).unwrap();
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.templates.len(), Catalog::builtin().templates.len());
    }
}
