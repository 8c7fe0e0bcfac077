//! JSON collection documents and the items they carry

use crate::io::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::path::{Path, PathBuf};

const ID_FIELD: &str = "id";
const COVER_FIELD: &str = "cover_image";

/// Stable item identifier, numeric or textual
///
/// Numbers keep their JSON representation, so negative and fractional ids
/// are accepted as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemId {
    /// Numeric identifier
    Number(Number),
    /// Textual identifier
    Text(String),
}

impl ItemId {
    /// Read an id from a JSON value, `None` unless it is a number or string
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<ItemId> for Value {
    fn from(id: ItemId) -> Self {
        match id {
            ItemId::Number(n) => Self::Number(n),
            ItemId::Text(s) => Self::String(s),
        }
    }
}

/// Collection entry with an image locator
///
/// The full JSON object is kept in document order and written back as read;
/// `id` and `cover_image` are validated on load and read through accessors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Item {
    id: ItemId,
    cover_image: String,
    fields: Map<String, Value>,
}

impl Item {
    /// Create an item without extra metadata
    pub fn new(id: impl Into<ItemId>, cover_image: impl Into<String>) -> Self {
        let id = id.into();
        let cover_image = cover_image.into();
        let mut fields = Map::new();
        fields.insert(ID_FIELD.to_string(), id.clone().into());
        fields.insert(COVER_FIELD.to_string(), Value::String(cover_image.clone()));
        Self {
            id,
            cover_image,
            fields,
        }
    }

    /// Add a metadata field after the existing ones
    ///
    /// `id` and `cover_image` are fixed at construction and are left as is.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != ID_FIELD && key != COVER_FIELD {
            self.fields.insert(key, value.into());
        }
        self
    }

    /// Stable identifier
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// URL or path of the cover image
    pub fn cover_image(&self) -> &str {
        &self.cover_image
    }

    /// Every field of the item, in document order
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Human-readable label: the `title` field if it is a string, else the id
    pub fn label(&self) -> String {
        self.fields
            .get("title")
            .and_then(Value::as_str)
            .map_or_else(|| self.id.to_string(), str::to_string)
    }
}

impl TryFrom<Map<String, Value>> for Item {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let id = match fields.get(ID_FIELD) {
            Some(value) => ItemId::from_value(value)
                .ok_or_else(|| format!("'{ID_FIELD}' must be a number or a string"))?,
            None => return Err(format!("missing field '{ID_FIELD}'")),
        };
        let cover_image = match fields.get(COVER_FIELD) {
            Some(Value::String(locator)) => locator.clone(),
            Some(_) => return Err(format!("'{COVER_FIELD}' must be a string")),
            None => return Err(format!("missing field '{COVER_FIELD}'")),
        };
        Ok(Self {
            id,
            cover_image,
            fields,
        })
    }
}

impl From<Item> for Map<String, Value> {
    fn from(item: Item) -> Self {
        item.fields
    }
}

/// Item array plus the envelope it was read from
///
/// A document is either a bare JSON array of items or an object holding the
/// array under `key`; other envelope fields survive a load/save round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionDocument {
    /// Envelope object, `None` for a bare array
    pub envelope: Option<Map<String, Value>>,
    /// Key of the item array inside the envelope
    pub key: String,
    /// Items in document order
    pub items: Vec<Item>,
}

impl CollectionDocument {
    /// Parse a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not valid JSON
    /// - The document is an object without an array under `key`
    /// - The document is neither an array nor an object
    /// - An item lacks `id` or `cover_image`
    pub fn from_json(text: &str, key: &str, path: &Path) -> Result<Self> {
        let parse_error = |source| LayoutError::CollectionParse {
            path: path.to_path_buf(),
            source,
        };

        let value: Value = serde_json::from_str(text).map_err(parse_error)?;
        match value {
            Value::Array(entries) => Ok(Self {
                envelope: None,
                key: key.to_string(),
                items: serde_json::from_value(Value::Array(entries)).map_err(parse_error)?,
            }),
            Value::Object(mut envelope) => {
                let entries = match envelope.remove(key) {
                    Some(Value::Array(entries)) => entries,
                    Some(_) => {
                        return Err(LayoutError::CollectionFormat {
                            path: path.to_path_buf(),
                            reason: format!("'{key}' is not an array"),
                        });
                    }
                    None => {
                        return Err(LayoutError::CollectionFormat {
                            path: path.to_path_buf(),
                            reason: format!("missing '{key}' array"),
                        });
                    }
                };
                Ok(Self {
                    envelope: Some(envelope),
                    key: key.to_string(),
                    items: serde_json::from_value(Value::Array(entries)).map_err(parse_error)?,
                })
            }
            _ => Err(LayoutError::CollectionFormat {
                path: path.to_path_buf(),
                reason: "expected an array or an object".to_string(),
            }),
        }
    }

    /// Read and parse a document from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path, key: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LayoutError::FileSystem {
            path: path.to_path_buf(),
            operation: "read collection",
            source: e,
        })?;
        Self::from_json(&text, key, path)
    }

    /// Render the document as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if an item cannot be serialized
    pub fn to_json(&self) -> Result<String> {
        let items = serde_json::to_value(&self.items)?;
        let document = match &self.envelope {
            None => items,
            Some(envelope) => {
                let mut object = envelope.clone();
                object.insert(self.key.clone(), items);
                Value::Object(object)
            }
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Write the document to disk, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_json()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| LayoutError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        std::fs::write(path, text).map_err(|e| LayoutError::FileSystem {
            path: PathBuf::from(path),
            operation: "write collection",
            source: e,
        })
    }
}
