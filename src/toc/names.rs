use std::collections::HashMap;

/// Ordered set of display names with stable indices.
///
/// The first registration of a name fixes its index for the rest of the parse.
#[derive(Debug, Default, Clone)]
pub struct NameIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `name`, registering it first if it is new.
    pub fn register(&mut self, name: &str) -> usize {
        if let Some(&index) = self.positions.get(name) {
            return index;
        }

        let index = self.names.len();
        self.names.push(name.to_string());
        self.positions.insert(name.to_string(), index);
        index
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}
