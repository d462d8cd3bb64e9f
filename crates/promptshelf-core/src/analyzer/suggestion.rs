//! Suggestion value types.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What aspect of the prompt a suggestion addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    /// Ambiguous wording.
    Clarity,
    /// Missing detail or scope.
    Specificity,
    /// Missing prompt-engineering scaffolding.
    Structure,
    /// Missing background information.
    Context,
    /// Register and complexity of the language.
    Tone,
}

impl SuggestionCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Clarity,
        Self::Specificity,
        Self::Structure,
        Self::Context,
        Self::Tone,
    ];

    /// Wire name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clarity => "clarity",
            Self::Specificity => "specificity",
            Self::Structure => "structure",
            Self::Context => "context",
            Self::Tone => "tone",
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SuggestionCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// How urgently a suggestion should be addressed.
///
/// Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Nice to have.
    Low,
    /// Worth fixing.
    Medium,
    /// Likely to hurt results.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire name of the priority.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// A string that names no known category or priority.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0:?}")]
pub struct UnknownVariant(pub String);

/// A categorized, prioritized improvement hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    /// Aspect of the prompt this addresses.
    pub category: SuggestionCategory,
    /// Urgency.
    pub priority: Priority,
    /// Human-readable hint.
    pub message: String,
}

impl Suggestion {
    /// Create a suggestion.
    pub fn new(
        category: SuggestionCategory,
        priority: Priority,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            priority,
            message: message.into(),
        }
    }
}
