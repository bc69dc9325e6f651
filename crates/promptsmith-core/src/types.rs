//! Closed label vocabularies used throughout the pipeline.
//!
//! Every category the pipeline dispatches on is a closed enum matched
//! exhaustively, so an "unknown label" can only arise at the caller
//! boundary, where `FromStr` rejects it with a [`LabelError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A caller supplied a label outside the closed vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("unknown domain label: {0}")]
    Domain(String),

    #[error("unknown intent label: {0}")]
    Intent(String),

    #[error("unknown optimization level: {0}")]
    Level(String),

    #[error("unknown complexity label: {0}")]
    Complexity(String),
}

/// Coarse subject-matter label assigned to input text.
///
/// Declaration order is the documented classifier tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Auto,
    Development,
    Marketing,
    Content,
    Business,
}

impl Domain {
    /// The concrete (non-auto) domains, in tie-break order.
    pub const CONCRETE: [Domain; 4] = [
        Domain::Development,
        Domain::Marketing,
        Domain::Content,
        Domain::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Auto => "auto",
            Domain::Development => "development",
            Domain::Marketing => "marketing",
            Domain::Content => "content",
            Domain::Business => "business",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Domain::Auto),
            "development" => Ok(Domain::Development),
            "marketing" => Ok(Domain::Marketing),
            "content" => Ok(Domain::Content),
            "business" => Ok(Domain::Business),
            other => Err(LabelError::Domain(other.to_string())),
        }
    }
}

/// High-level action the text requests.
///
/// Declaration order is the documented classifier tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    General,
    Create,
    Analyze,
    Optimize,
    Explain,
    Fix,
    Compare,
    Plan,
}

impl Intent {
    /// Intents carrying keyword tables, in tie-break order.
    pub const DETECTABLE: [Intent; 7] = [
        Intent::Create,
        Intent::Analyze,
        Intent::Optimize,
        Intent::Explain,
        Intent::Fix,
        Intent::Compare,
        Intent::Plan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::General => "general",
            Intent::Create => "create",
            Intent::Analyze => "analyze",
            Intent::Optimize => "optimize",
            Intent::Explain => "explain",
            Intent::Fix => "fix",
            Intent::Compare => "compare",
            Intent::Plan => "plan",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Intent::General),
            "create" => Ok(Intent::Create),
            "analyze" => Ok(Intent::Analyze),
            "optimize" => Ok(Intent::Optimize),
            "explain" => Ok(Intent::Explain),
            "fix" => Ok(Intent::Fix),
            "compare" => Ok(Intent::Compare),
            "plan" => Ok(Intent::Plan),
            other => Err(LabelError::Intent(other.to_string())),
        }
    }
}

/// How far the rewrite engine is allowed to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    Conservative,
    Balanced,
    Aggressive,
}

impl OptimizationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationLevel::Conservative => "conservative",
            OptimizationLevel::Balanced => "balanced",
            OptimizationLevel::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationLevel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" => Ok(OptimizationLevel::Conservative),
            "balanced" => Ok(OptimizationLevel::Balanced),
            "aggressive" => Ok(OptimizationLevel::Aggressive),
            other => Err(LabelError::Level(other.to_string())),
        }
    }
}

/// Discrete complexity tier, ordered low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Ordinal used for nearest-tier template matching.
    pub fn ordinal(&self) -> u8 {
        match self {
            Complexity::Low => 0,
            Complexity::Medium => 1,
            Complexity::High => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Complexity::Low),
            "medium" => Ok(Complexity::Medium),
            "high" => Ok(Complexity::High),
            other => Err(LabelError::Complexity(other.to_string())),
        }
    }
}

/// One axis of the classic seven-principle rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Principle {
    Clarity,
    Context,
    Examples,
    Structure,
    Role,
    Format,
    Constraints,
}

impl Principle {
    /// All principles, in rubric order.
    pub const ALL: [Principle; 7] = [
        Principle::Clarity,
        Principle::Context,
        Principle::Examples,
        Principle::Structure,
        Principle::Role,
        Principle::Format,
        Principle::Constraints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Principle::Clarity => "clarity",
            Principle::Context => "context",
            Principle::Examples => "examples",
            Principle::Structure => "structure",
            Principle::Role => "role",
            Principle::Format => "format",
            Principle::Constraints => "constraints",
        }
    }
}

impl fmt::Display for Principle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier attached to contradictions and issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended reasoning depth for the downstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended response length for the downstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

impl Verbosity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Low => "low",
            Verbosity::Medium => "medium",
            Verbosity::High => "high",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_round_trip() {
        for domain in Domain::CONCRETE {
            assert_eq!(domain.as_str().parse::<Domain>().unwrap(), domain);
        }
        assert_eq!("auto".parse::<Domain>().unwrap(), Domain::Auto);
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert!(matches!(
            "finance".parse::<Domain>(),
            Err(LabelError::Domain(_))
        ));
        assert!(matches!(
            "summarize".parse::<Intent>(),
            Err(LabelError::Intent(_))
        ));
        assert!(matches!(
            "extreme".parse::<OptimizationLevel>(),
            Err(LabelError::Level(_))
        ));
    }

    #[test]
    fn test_complexity_ordering() {
        assert!(Complexity::Low < Complexity::Medium);
        assert!(Complexity::Medium < Complexity::High);
        assert_eq!(Complexity::High.ordinal(), 2);
    }
}
