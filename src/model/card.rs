use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single card from the tracked list, with its label names already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub label_ids: Vec<String>,
    /// Display names for `label_ids`, same order. Unknown ids resolve to "".
    /// Empty when the cards were fetched without labels.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Card {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        label_ids: Vec<String>,
        label_map: Option<&LabelMap>,
    ) -> Self {
        let labels = label_map
            .map(|map| map.resolve(&label_ids))
            .unwrap_or_default();
        Self {
            name: name.into(),
            description: description.into(),
            label_ids,
            labels,
        }
    }

    /// All label names joined into the single string the categorizer matches against.
    pub fn label_text(&self) -> String {
        self.labels.join(" ")
    }
}

/// Label id to display name, built once per run from the board's labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap(HashMap<String, String>);

impl LabelMap {
    #[cfg(test)]
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.0.insert(id.into(), name.into());
    }

    pub fn name_of(&self, id: &str) -> &str {
        self.0.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn resolve(&self, ids: &[String]) -> Vec<String> {
        ids.iter().map(|id| self.name_of(id).to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        )
    }
}
