use serde::{Deserialize, Serialize};

/// Opaque document identifier assigned by the entity store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_displays_inner_value() {
        let id = DocumentId::new("sp-1");
        assert_eq!(id.as_str(), "sp-1");
        assert_eq!(id.to_string(), "sp-1");
    }
}
