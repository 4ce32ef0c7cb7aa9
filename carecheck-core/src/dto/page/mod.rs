//! Paged response DTOs
//!
//! Search and slot endpoints wrap their results as `{ data: { content: [...] } }`.
//! A missing `data` or `content` is read as an empty page.

use serde::{Deserialize, Serialize};

use crate::domain::entity::EntityRef;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<Page<T>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
}

impl<T> PageResponse<T> {
    pub fn content(&self) -> &[T] {
        self.data.as_ref().map(|page| page.content.as_slice()).unwrap_or(&[])
    }
}

/// One row of a provider or patient search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl EntitySummary {
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}

impl PageResponse<EntitySummary> {
    /// Identifier of the first search result
    ///
    /// First match wins; duplicate display names are not disambiguated.
    pub fn first_ref(&self) -> Option<EntityRef> {
        self.content()
            .first()
            .map(|entry| EntityRef::new(entry.uuid.clone()))
            .filter(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> PageResponse<EntitySummary> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_first_ref_takes_first_entry() {
        let page = parse(json!({
            "data": { "content": [
                { "uuid": "first-uuid", "firstName": "Jordan", "lastName": "Ellis" },
                { "uuid": "second-uuid", "firstName": "Jordan", "lastName": "Ellis" }
            ]}
        }));
        assert_eq!(page.first_ref(), Some(EntityRef::new("first-uuid")));
        assert_eq!(page.content()[0].full_name().as_deref(), Some("Jordan Ellis"));
    }

    #[test]
    fn test_empty_and_missing_pages_have_no_ref() {
        assert!(parse(json!({"data": {"content": []}})).first_ref().is_none());
        assert!(parse(json!({"data": {}})).first_ref().is_none());
        assert!(parse(json!({})).first_ref().is_none());
        assert!(parse(json!({"data": null})).first_ref().is_none());
    }

    #[test]
    fn test_blank_uuid_is_not_a_ref() {
        let page = parse(json!({"data": {"content": [{"firstName": "No", "lastName": "Id"}]}}));
        assert!(page.first_ref().is_none());
    }
}
