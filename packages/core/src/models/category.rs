//! Category Data Structure
//!
//! Categories form a forest through `parent_id` (empty means root). The
//! links are not checked for existence or cycles; deleting a category
//! leaves its children and notes pointing at the removed id.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::color::Color;
use super::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CategoryRecord")]
pub struct Category {
    id: String,
    name: String,
    color: Color,
    parent_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    name: String,
    #[serde(default, deserialize_with = "lenient::color")]
    color: Color,
    #[serde(default, deserialize_with = "lenient::string")]
    parent_id: String,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            color: record.color,
            parent_id: record.parent_id,
        }
    }
}

impl Category {
    /// Create a root category with a fresh UUID and the default colour.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: Color::default(),
            parent_id: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.name == name {
            return false;
        }
        self.name = name;
        true
    }

    pub fn set_color(&mut self, color: Color) -> bool {
        if self.color == color {
            return false;
        }
        self.color = color;
        true
    }

    /// Pass `""` to make this a root category.
    pub fn set_parent_id(&mut self, parent_id: impl Into<String>) -> bool {
        let parent_id = parent_id.into();
        if self.parent_id == parent_id {
            return false;
        }
        self.parent_id = parent_id;
        true
    }

    pub(crate) fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Same leniency as [`Note::from_json`](super::Note::from_json): an
    /// unreadable colour falls back to the default blue.
    pub fn from_json(value: &Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde::de::Error::custom("category record must be a JSON object"));
        }
        Category::deserialize(value)
    }
}
