use std::fmt;

/// Dense row-major matrix of doubles.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// # Panics
    ///
    /// When `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = Self::len_for(rows, cols).expect("matrix dimensions overflow usize");
        Self {
            rows,
            cols,
            values: vec![0.0; len],
        }
    }

    /// Returns `None` when `values` does not hold exactly `rows * cols`
    /// entries, or when that product overflows.
    pub fn from_row_major(rows: usize, cols: usize, values: Vec<f64>) -> Option<Self> {
        (Some(values.len()) == Self::len_for(rows, cols)).then_some(Self { rows, cols, values })
    }

    /// Entry count of a `rows` x `cols` matrix, `None` on overflow.
    pub fn len_for(rows: usize, cols: usize) -> Option<usize> {
        rows.checked_mul(cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.offset(row, col).map(|i| self.values[i])
    }

    /// Returns `false` if the cell is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows).then(|| &self.values[row * self.cols..(row + 1) * self.cols])
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for row in 0..self.rows {
            if row > 0 {
                f.write_str("; ")?;
            }
            for (col, value) in self.row(row).unwrap_or_default().iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{value}")?;
            }
        }
        f.write_str("]")
    }
}
