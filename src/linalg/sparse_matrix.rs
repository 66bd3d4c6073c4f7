use std::collections::BTreeMap;

use nalgebra::DMatrix;

/// Wrapper around a BTreeMap to store rectangular matrices in a sparse data structure
///
/// Indices are 0-based `[row, col]`. Entries inserted at the same location are summed.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    /// Matrix Entries
    entries: BTreeMap<[usize; 2], f64>,
}

impl SparseMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Insert a value into the matrix, adding it to any value already at that location
    pub fn insert(&mut self, [row_idx, col_idx]: [usize; 2], value: f64) {
        assert!(
            row_idx < self.rows,
            "row_idx exceeded matrix dimension; cannot insert value!"
        );
        assert!(
            col_idx < self.cols,
            "col_idx exceeded matrix dimension; cannot insert value!"
        );

        *self.entries.entry([row_idx, col_idx]).or_insert(0.0) += value;
    }

    /// Insert a group of entries
    pub fn insert_group(&mut self, mut entry_group: Vec<([usize; 2], f64)>) {
        for (rc, value) in entry_group.drain(0..) {
            self.insert(rc, value);
        }
    }

    /// Value at a location (zero if nothing was inserted there)
    pub fn get(&self, rc: [usize; 2]) -> f64 {
        self.entries.get(&rc).copied().unwrap_or(0.0)
    }

    /// Iterate over the stored entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 2], f64)> + '_ {
        self.entries.iter().map(|(rc, value)| (*rc, *value))
    }

    /// Matrix-vector product
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        assert!(
            x.len() == self.cols,
            "vector length does not match the number of columns; cannot multiply!"
        );

        let mut y = vec![0.0; self.rows];
        for ([r, c], v) in self.iter() {
            y[r] += v * x[c];
        }
        y
    }
}

impl From<&SparseMatrix> for DMatrix<f64> {
    fn from(sm: &SparseMatrix) -> Self {
        let mut dense = DMatrix::zeros(sm.rows, sm.cols);
        for ([r, c], v) in sm.iter() {
            dense[(r, c)] = v;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_insertion() {
        let mut sm = SparseMatrix::new(4, 3);

        sm.insert([0, 0], 1.0);
        sm.insert([0, 0], 1.0);
        sm.insert([3, 2], 10.0);
        sm.insert_group(vec![([2, 1], 0.25), ([1, 2], 0.125)]);

        assert_eq!(sm.num_entries(), 4);
        assert!((sm.get([0, 0]) - 2.0).abs() < 1e-15);
        assert!((sm.get([3, 2]) - 10.0).abs() < 1e-15);
        assert!((sm.get([2, 1]) - 0.25).abs() < 1e-15);
        assert!((sm.get([1, 2]) - 0.125).abs() < 1e-15);
        assert_eq!(sm.get([1, 1]), 0.0);

        // not symmetric
        assert!(sm.get([1, 2]) != sm.get([2, 1]));
    }

    #[test]
    fn dense_conversion_and_product() {
        let mut sm = SparseMatrix::new(2, 3);
        sm.insert([0, 0], 0.5);
        sm.insert([0, 1], 0.5);
        sm.insert([1, 2], 2.0);

        let dense: DMatrix<f64> = (&sm).into();
        assert_eq!(dense.nrows(), 2);
        assert_eq!(dense.ncols(), 3);
        assert_eq!(dense[(1, 2)], 2.0);
        assert_eq!(dense[(1, 0)], 0.0);

        assert_eq!(sm.mul_vec(&[2.0, 4.0, 1.0]), vec![3.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_insertion() {
        let mut sm = SparseMatrix::new(10, 2);
        sm.insert([3, 2], 1.0);
    }
}
