use serde::{Deserialize, Serialize};

use super::wire::RawId;

/// Canonical form of a foreign key.
///
/// The backend sometimes sends a bare id and sometimes an embedded object
/// (`{ "_id": 3, "title": "Roofing" }`). Both shapes are folded into a
/// `Reference` during deserialization so filters never re-check the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawReference")]
pub struct Reference {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// True when `key` equals either the id or the denormalized name.
    pub fn matches_key(&self, key: &str) -> bool {
        self.id == key || self.name.as_deref() == Some(key)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReference {
    Bare(RawId),
    Embedded {
        #[serde(alias = "_id")]
        id: RawId,
        #[serde(default, alias = "title")]
        name: Option<String>,
    },
}

impl From<RawReference> for Reference {
    fn from(raw: RawReference) -> Self {
        match raw {
            RawReference::Bare(id) => Reference::new(String::from(id)),
            RawReference::Embedded { id, name } => Reference {
                id: id.into(),
                name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn bare_ids_and_embedded_objects_normalize_alike() {
        let bare: Reference = serde_json::from_value(json!(7)).unwrap();
        let text: Reference = serde_json::from_value(json!("7")).unwrap();
        let embedded: Reference =
            serde_json::from_value(json!({ "_id": 7, "title": "Roofing" })).unwrap();

        assert_eq!(bare, Reference::new("7"));
        assert_eq!(text, Reference::new("7"));
        assert_eq!(embedded, Reference::named("7", "Roofing"));
    }

    #[test]
    fn matches_id_or_name() {
        let reference = Reference::named("p-1", "Harbour Bridge");
        assert!(reference.matches_key("p-1"));
        assert!(reference.matches_key("Harbour Bridge"));
        assert!(!reference.matches_key("harbour bridge"));
    }
}
