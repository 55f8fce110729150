//! Core types for ticket triage

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PredictionFault;

/// Support group used when nothing better is known
pub const FIRST_LINE_GROUP: &str = "1 линия";

/// Raw ticket text as submitted by the requester
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketText {
    /// Ticket subject line
    #[serde(default)]
    pub subject: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl TicketText {
    /// Create a new ticket text
    pub fn new(subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
        }
    }

    /// Subject and description joined by a space and trimmed
    pub fn combined(&self) -> String {
        format!("{} {}", self.subject, self.description)
            .trim()
            .to_string()
    }
}

/// Ticket category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Почта", alias = "Mail")]
    Mail,
    #[serde(rename = "Сеть", alias = "Network")]
    Network,
    #[serde(rename = "1C", alias = "1С", alias = "OneC")]
    OneC,
    #[serde(rename = "Оборудование", alias = "Hardware")]
    Hardware,
    #[serde(rename = "Доступ", alias = "Access")]
    Access,
    #[serde(rename = "Прочее", alias = "Other")]
    Other,
}

impl Category {
    /// All categories in keyword-evaluation order, `Other` last
    pub const ALL: [Category; 6] = [
        Category::Mail,
        Category::Network,
        Category::OneC,
        Category::Hardware,
        Category::Access,
        Category::Other,
    ];

    /// Display name used on the wire and in the ticketing system
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mail => "Почта",
            Self::Network => "Сеть",
            Self::OneC => "1C",
            Self::Hardware => "Оборудование",
            Self::Access => "Доступ",
            Self::Other => "Прочее",
        }
    }

    /// Support group that owns tickets of this category
    pub fn support_group(&self) -> &'static str {
        match self {
            Self::Mail => "email-support-team",
            Self::Network => "network-support-team",
            Self::OneC => "1c-support-team",
            Self::Hardware => "hardware-support-team",
            Self::Access => "access-support-team",
            Self::Other => "general-support-team",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PredictionFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Почта" | "Mail" => Ok(Self::Mail),
            "Сеть" | "Network" => Ok(Self::Network),
            "1C" | "1С" | "OneC" => Ok(Self::OneC),
            "Оборудование" | "Hardware" => Ok(Self::Hardware),
            "Доступ" | "Access" => Ok(Self::Access),
            "Прочее" | "Other" => Ok(Self::Other),
            other => Err(PredictionFault::UnknownLabel {
                kind: "category",
                label: other.to_string(),
            }),
        }
    }
}

/// Ticket priority (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[serde(alias = "Medium")]
    Normal,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = PredictionFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Low" => Ok(Self::Low),
            "Normal" | "Medium" => Ok(Self::Normal),
            "High" => Ok(Self::High),
            "Critical" => Ok(Self::Critical),
            other => Err(PredictionFault::UnknownLabel {
                kind: "priority",
                label: other.to_string(),
            }),
        }
    }
}

/// How a classification was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Trained statistical model
    MlModel,
    /// Keyword rules
    RuleBased,
    /// Empty input, nothing to classify
    Default,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MlModel => "ml_model",
            Self::RuleBased => "rule_based",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a classification, decided by confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Route to a human without a suggestion
    Manual,
    /// Post the classification as a suggestion
    Suggest,
    /// Apply the classification to the ticket
    AutoApply,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Manual, Action::Suggest, Action::AutoApply];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Suggest => "suggest",
            Self::AutoApply => "auto_apply",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Predicted category
    pub category: Category,

    /// Support group resolved from the category
    pub support_group: String,

    /// Predicted priority
    pub priority: Priority,

    /// Confidence score (0.0-1.0)
    pub confidence: f64,

    /// Which path produced this result
    pub method: Method,
}

impl ClassificationResult {
    /// Create a result whose support group is resolved from the category
    pub fn new(category: Category, priority: Priority, confidence: f64, method: Method) -> Self {
        Self {
            category,
            support_group: category.support_group().to_string(),
            priority,
            confidence,
            method,
        }
    }

    /// Terminal result for input that normalizes to nothing
    pub fn empty_input() -> Self {
        Self {
            category: Category::Other,
            support_group: FIRST_LINE_GROUP.to_string(),
            priority: Priority::Normal,
            confidence: 0.5,
            method: Method::Default,
        }
    }
}
