use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub last_updated: String,
}

impl Material {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            ..Default::default()
        }
    }

    /// Key used for this material inside a material-usage mapping.
    pub fn usage_key(&self) -> String {
        self.id.to_string()
    }
}

/// id → display name lookup built from the material list.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    names: HashMap<String, String>,
}

impl MaterialCatalog {
    pub fn from_materials(materials: &[Material]) -> Self {
        let names = materials
            .iter()
            .map(|m| (m.usage_key(), m.name.clone()))
            .collect();
        Self { names }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.names.contains_key(id)
    }

    pub fn lookup(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Catalog name, or `Material {id}` for ids the catalog does not know.
    pub fn display_name(&self, id: &str) -> String {
        match self.lookup(id) {
            Some(name) => name.to_string(),
            None => format!("Material {}", id),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(String, String)> for MaterialCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_gets_placeholder_name() {
        let catalog: MaterialCatalog = [("1".to_string(), "Starch".to_string())]
            .into_iter()
            .collect();

        assert_eq!(catalog.display_name("1"), "Starch");
        assert_eq!(catalog.display_name("77"), "Material 77");
        assert!(!catalog.contains("77"));
    }
}
