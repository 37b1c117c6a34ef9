use serde::ser::{Serialize, SerializeMap, Serializer};

/// One row of input variables, in column order.
/// Column names come straight from the uploaded header line, so there is no
/// fixed schema: lookups are by name, display is by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableRow {
    columns: Vec<(String, String)>,
}

impl VariableRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value. An existing column keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = VariableRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

// Serialized as a plain JSON object, keeping column order.
impl Serialize for VariableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
