use serde::{Deserialize, Serialize};

/// `modules.usuarios` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct UsuariosConfig {
    /// Collection holding the user documents.
    pub collection: String,
    /// Create the unique `email` index on startup.
    pub ensure_indexes: bool,
}

impl Default for UsuariosConfig {
    fn default() -> Self {
        Self {
            collection: "usuarios".to_string(),
            ensure_indexes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let cfg: UsuariosConfig =
            serde_json::from_value(serde_json::json!({ "collection": "people" })).unwrap();
        assert_eq!(cfg.collection, "people");
        assert!(cfg.ensure_indexes);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<UsuariosConfig, _> =
            serde_json::from_value(serde_json::json!({ "colection": "typo" }));
        assert!(res.is_err());
    }
}
