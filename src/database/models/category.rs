use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,               // emoji glyph
    pub description: String,
    pub color: String,              // hex, e.g. "#EF4444"
    pub is_custom: bool,
}

/// Partial update applied by the category manager. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

impl Category {
    pub fn apply(&mut self, update: CategoryUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(icon) = update.icon {
            self.icon = icon;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}
