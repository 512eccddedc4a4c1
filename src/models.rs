use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PROPERTY_STATUS;

fn default_status() -> String {
    String::from(DEFAULT_PROPERTY_STATUS)
}

/// A property listing as served by `GET /properties`.
///
/// Read-only from the client's point of view. Unknown fields are ignored so
/// server-side additions do not break decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub address: String,
    pub price: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub sqft: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Property {
    /// "3 bd · 2 ba · 1,200 sqft"
    pub fn specs_line(&self) -> String {
        format!(
            "{} bd · {} ba · {} sqft",
            self.bedrooms,
            self.bathrooms,
            group_thousands(self.sqft)
        )
    }
}

fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Body of `POST /contact`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Current value of a form field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Checked(_) => "",
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_decodes_server_shape() {
        let json = r#"{
            "id": "42",
            "title": "Maple St",
            "address": "12 Maple St",
            "price": "$250,000",
            "bedrooms": 3,
            "bathrooms": 2,
            "sqft": 1450,
            "image": "https://example.com/maple.jpg",
            "description": "Quiet street",
            "status": "Under Contract",
            "created_at": "2025-01-15T10:30:00Z",
            "internal_notes": "ignored"
        }"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.title, "Maple St");
        assert_eq!(property.status, "Under Contract");
        assert!(property.created_at.is_some());
    }

    #[test]
    fn test_property_defaults_missing_status() {
        let json = r#"{"id":"1","title":"Loft","price":"$1"}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.status, "Available");
        assert_eq!(property.bedrooms, 0);
        assert!(property.created_at.is_none());
    }

    #[test]
    fn test_specs_line_groups_sqft() {
        let json = r#"{"id":"1","title":"Villa","price":"$1","bedrooms":5,"bathrooms":4,"sqft":3800}"#;
        let property: Property = serde_json::from_str(json).unwrap();
        assert_eq!(property.specs_line(), "5 bd · 4 ba · 3,800 sqft");
        assert_eq!(group_thousands(650), "650");
        assert_eq!(group_thousands(1_250_000), "1,250,000");
    }
}
