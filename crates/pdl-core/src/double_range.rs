use std::fmt;

/// Ordered set of distinct doubles, such as a list of sample times.
///
/// Values stay sorted by [`f64::total_cmp`]; inserting a value already present
/// is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoubleRange {
    values: Vec<f64>,
}

impl DoubleRange {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        values.into_iter().collect()
    }

    /// Returns `false` if `value` was already present.
    pub fn insert(&mut self, value: f64) -> bool {
        match self.search(value) {
            Ok(_) => false,
            Err(i) => {
                self.values.insert(i, value);
                true
            }
        }
    }

    pub fn remove(&mut self, value: f64) -> bool {
        match self.search(value) {
            Ok(i) => {
                self.values.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.search(value).is_ok()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    fn search(&self, value: f64) -> Result<usize, usize> {
        self.values.binary_search_by(|v| v.total_cmp(&value))
    }
}

impl FromIterator<f64> for DoubleRange {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut values: Vec<f64> = iter.into_iter().collect();
        values.sort_by(f64::total_cmp);
        values.dedup_by(|a, b| a.total_cmp(b).is_eq());
        Self { values }
    }
}

impl fmt::Display for DoubleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("}")
    }
}
