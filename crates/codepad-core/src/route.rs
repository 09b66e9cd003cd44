//! Navigation route mirrored into the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Route name of the "saved document" view.
pub const SAVED_ROUTE: &str = "saved";

/// Route name of the blank editor view.
pub const EDITOR_ROUTE: &str = "editor";

/// The view the user is currently on, with its path parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl Route {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Route of a saved document (`/saved/:id`).
    pub fn saved(id: impl Into<String>) -> Self {
        let mut route = Self::new(SAVED_ROUTE);
        route.params.insert("id".to_string(), id.into());
        route
    }

    pub fn is_saved(&self) -> bool {
        self.name == SAVED_ROUTE
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new(EDITOR_ROUTE)
    }
}
