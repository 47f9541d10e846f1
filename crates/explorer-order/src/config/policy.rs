//! Ordering policy model: order entries, policy trees, and the config document.
//!
//! The JSON form is loose (an entry is a string or a `{ "dir": [...] }` object), so documents are
//! read into `serde_json::Value` first and coerced into typed values once, here. Anything with the
//! wrong shape becomes an empty fragment plus a warning; the sorter never sees raw JSON.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ============================================================================
// Order entries and policies
// ============================================================================

/// A single ordering rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEntry {
    /// A bare name: `"README.md"`.
    Simple(String),
    /// A directory name with its own policy: `{ "src": ["main.rs", "lib.rs"] }`.
    Nested { name: String, policy: Policy },
}

impl OrderEntry {
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple(name.into())
    }

    pub fn nested(name: impl Into<String>, policy: Policy) -> Self {
        Self::Nested {
            name: name.into(),
            policy,
        }
    }

    /// The name this entry ranks, for both variants.
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(name) => name,
            Self::Nested { name, .. } => name,
        }
    }

    /// The nested policy, if this is a `Nested` entry.
    pub fn policy(&self) -> Option<&Policy> {
        match self {
            Self::Simple(_) => None,
            Self::Nested { policy, .. } => Some(policy),
        }
    }
}

/// Ordering rules for one directory level: an ordered list of entries where position is rank.
///
/// The global policy uses the same type; only the names of its entries matter there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    entries: Vec<OrderEntry>,
}

impl Policy {
    /// Builds a policy, dropping repeated names (the first occurrence keeps its rank).
    ///
    /// A later `Nested` duplicate of a `Simple` name still contributes its sub-policy: the kept
    /// entry becomes `Nested` at the first occurrence's rank.
    pub fn new(entries: Vec<OrderEntry>) -> Self {
        let mut unique: Vec<OrderEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(kept) = unique.iter_mut().find(|kept| kept.name() == entry.name()) else {
                unique.push(entry);
                continue;
            };
            match (&*kept, entry) {
                (OrderEntry::Simple(_), nested @ OrderEntry::Nested { .. }) => {
                    log::warn!(
                        "Duplicate order entry '{}': keeping the first rank and the folder order",
                        nested.name()
                    );
                    *kept = nested;
                }
                (_, duplicate) => log::warn!("Dropping duplicate order entry '{}'", duplicate.name()),
            }
        }
        Self { entries: unique }
    }

    /// Shorthand for a flat policy of `Simple` names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(OrderEntry::simple).collect())
    }

    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of `name` in this list, by linear scan.
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name() == name)
    }

    /// The nested policy for a child directory. `Simple` entries never have one.
    pub fn child(&self, name: &str) -> Option<&Policy> {
        self.entries.iter().find_map(|entry| match entry {
            OrderEntry::Nested { name: entry_name, policy } if entry_name == name => Some(policy),
            _ => None,
        })
    }

    /// Coerces a JSON value into a policy. Never fails; ill-shaped parts are dropped with a warning.
    pub fn from_value(value: &Value) -> Self {
        parse_policy(value, "")
    }
}

fn parse_policy(value: &Value, location: &str) -> Policy {
    let Some(items) = value.as_array() else {
        if !value.is_null() {
            log::warn!(
                "Ignoring {}: expected a list of names, got {}",
                describe_location(location),
                kind_of(value)
            );
        }
        return Policy::default();
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::String(name) => entries.push(OrderEntry::Simple(name.clone())),
            Value::Object(map) => {
                if map.len() > 1 {
                    log::warn!(
                        "Entry #{} in {} names {} folders in one object, treating each as its own entry",
                        index,
                        describe_location(location),
                        map.len()
                    );
                }
                for (name, nested) in map {
                    let nested_location = format!("{}/{}", location, name);
                    entries.push(OrderEntry::Nested {
                        name: name.clone(),
                        policy: parse_policy(nested, &nested_location),
                    });
                }
            }
            other => log::warn!(
                "Ignoring entry #{} in {}: expected a name or a {{\"folder\": [...]}} object, got {}",
                index,
                describe_location(location),
                kind_of(other)
            ),
        }
    }

    Policy::new(entries)
}

fn describe_location(location: &str) -> String {
    if location.is_empty() {
        "the top-level order list".to_string()
    } else {
        format!("the order list for '{}'", location.trim_start_matches('/'))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

impl Serialize for OrderEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Simple(name) => serializer.serialize_str(name),
            Self::Nested { name, policy } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, policy)?;
                map.end()
            }
        }
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

// ============================================================================
// Config document
// ============================================================================

/// Key of the root folder policy.
pub const SORT_FOLDERS_KEY: &str = "sortFolders";
/// Key of the global policy.
pub const SORT_GLOBAL_KEY: &str = "sortGlobal";
/// Key used by the first version of the config format for the root folder policy.
pub const LEGACY_SORT_KEY: &str = "sort";

/// The parsed `sorting-config.json`. `Default` is the empty document (no policies at all).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_global: Option<Policy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_folders: Option<Policy>,
}

impl ConfigDocument {
    pub fn new(sort_folders: Option<Policy>, sort_global: Option<Policy>) -> Self {
        Self {
            sort_global,
            sort_folders,
        }
    }

    /// Root folder policy, rooted at the workspace root.
    pub fn folders(&self) -> Option<&Policy> {
        self.sort_folders.as_ref()
    }

    /// Workspace-wide policy applied ahead of every folder policy.
    pub fn global(&self) -> Option<&Policy> {
        self.sort_global.as_ref()
    }

    /// True when no policy would affect ordering.
    pub fn is_empty(&self) -> bool {
        self.sort_folders.as_ref().is_none_or(Policy::is_empty)
            && self.sort_global.as_ref().is_none_or(Policy::is_empty)
    }

    /// Coerces a parsed JSON document. A non-object document is treated as empty.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            log::warn!("Ignoring sorting config: expected an object, got {}", kind_of(value));
            return Self::default();
        };

        let present = |key: &str| object.get(key).filter(|v| !v.is_null());

        let sort_folders = match present(SORT_FOLDERS_KEY) {
            Some(folders) => Some(Policy::from_value(folders)),
            None => present(LEGACY_SORT_KEY).map(|legacy| {
                log::debug!("Using legacy '{}' key as the folder policy", LEGACY_SORT_KEY);
                Policy::from_value(legacy)
            }),
        };
        let sort_global = present(SORT_GLOBAL_KEY).map(Policy::from_value);

        Self {
            sort_global,
            sort_folders,
        }
    }

    /// Parses document text. Only invalid JSON is an error; shape problems are coerced.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<'de> Deserialize<'de> for ConfigDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
