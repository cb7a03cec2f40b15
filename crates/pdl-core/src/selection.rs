use crate::TreeError;

/// One key out of a fixed, ordered list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    items: Vec<String>,
    index: usize,
}

impl Selection {
    /// Panics if `index` is out of range; the compiler validates defaults
    /// before any code constructs a selection from them.
    pub fn new<I, S>(items: I, index: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        assert!(
            index < items.len(),
            "selection index {index} out of range for {} items",
            items.len()
        );
        Self { items, index }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> &str {
        &self.items[self.index]
    }

    pub fn select(&mut self, key: &str) -> Result<(), TreeError> {
        let Some(index) = self.items.iter().position(|item| item == key) else {
            return Err(TreeError::unknown_selection(key, &self.items));
        };
        self.index = index;
        Ok(())
    }
}
