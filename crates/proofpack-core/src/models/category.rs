use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of an uploaded proof document.
///
/// Well-known categories have their own variants; anything else an operator
/// configures lands in `Other` under its normalized name. Names are
/// lowercase snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DocumentCategory {
    Insurance,
    License,
    Certification,
    TaxCompliance,
    FinancialStatement,
    PastPerformance,
    SafetyRecord,
    Reference,
    CapabilityStatement,
    Other(String),
}

impl DocumentCategory {
    /// Build a category from a name, normalizing case, whitespace, and dashes.
    /// Unknown names become `Other`.
    pub fn from_name(name: &str) -> Self {
        let normalized = normalize(name);
        match normalized.as_str() {
            "insurance" => Self::Insurance,
            "license" | "licence" => Self::License,
            "certification" => Self::Certification,
            "tax_compliance" => Self::TaxCompliance,
            "financial_statement" => Self::FinancialStatement,
            "past_performance" => Self::PastPerformance,
            "safety_record" => Self::SafetyRecord,
            "reference" => Self::Reference,
            "capability_statement" => Self::CapabilityStatement,
            _ => Self::Other(normalized),
        }
    }

    /// Canonical wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Insurance => "insurance",
            Self::License => "license",
            Self::Certification => "certification",
            Self::TaxCompliance => "tax_compliance",
            Self::FinancialStatement => "financial_statement",
            Self::PastPerformance => "past_performance",
            Self::SafetyRecord => "safety_record",
            Self::Reference => "reference",
            Self::CapabilityStatement => "capability_statement",
            Self::Other(name) => name,
        }
    }

    /// Human-readable label, e.g. "Tax Compliance".
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

impl FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("document category must not be empty".to_string());
        }
        Ok(Self::from_name(s))
    }
}

impl TryFrom<String> for DocumentCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentCategory> for String {
    fn from(category: DocumentCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
