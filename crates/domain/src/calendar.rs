use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub id: ID,
    pub name: String,
    pub slug: String,
}

impl Calendar {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            slug: slugify(name),
        }
    }
}

impl Entity for Calendar {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Lowercases `name` and joins its alphanumeric runs with `-`
fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
