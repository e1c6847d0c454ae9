use catalog::{FieldValue, Record};
use serde::{Deserialize, Serialize};

/// A WCAG success criterion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Guideline {
    pub id: String,                  // "2.1.1"
    pub principle: String,
    pub guideline: String,
    pub level: String,               // A | AA | AAA
    pub version: String,             // WCAG version that introduced it
    pub summary: String,
    pub w3c_link: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub impacts: Vec<String>,        // affected user groups
}

impl Record for Guideline {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "principle" => FieldValue::Text(&self.principle),
            "guideline" => FieldValue::Text(&self.guideline),
            "level" => FieldValue::Text(&self.level),
            "version" => FieldValue::Text(&self.version),
            "summary" => FieldValue::Text(&self.summary),
            "w3c_link" => FieldValue::Text(&self.w3c_link),
            "tags" => FieldValue::List(&self.tags),
            "impacts" => FieldValue::List(&self.impacts),
            _ => return None,
        })
    }
}

/// A PDF/UA validator finding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PdfUaError {
    pub category: String,
    pub code: String,
    pub severity: String,            // Error | Warning | Need manual
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guideline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_link: Option<String>,
}

impl Record for PdfUaError {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "category" => Some(FieldValue::Text(&self.category)),
            "code" => Some(FieldValue::Text(&self.code)),
            "severity" => Some(FieldValue::Text(&self.severity)),
            "message" => Some(FieldValue::Text(&self.message)),
            "guideline" => self.guideline.as_deref().map(FieldValue::Text),
            "fix_hint" => self.fix_hint.as_deref().map(FieldValue::Text),
            "example_link" => self.example_link.as_deref().map(FieldValue::Text),
            _ => None,
        }
    }
}

/// A readability metric as exposed by a text-analysis API. Reference text
/// only; nothing here computes the metric.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadabilityMetric {
    pub category: String,
    pub subcategory: String,
    pub name: String,
    pub api_key: String,
    pub description: String,
    pub notes: String,
}

impl Record for ReadabilityMetric {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(FieldValue::Text(match name {
            "category" => &self.category,
            "subcategory" => &self.subcategory,
            "name" => &self.name,
            "api_key" => &self.api_key,
            "description" => &self.description,
            "notes" => &self.notes,
            _ => return None,
        }))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PdfUaTerm {
    pub term: String,
    pub description: String,
    pub importance: String,
}

impl Record for PdfUaTerm {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(FieldValue::Text(match name {
            "term" => &self.term,
            "description" => &self.description,
            "importance" => &self.importance,
            _ => return None,
        }))
    }
}
