//! Dense distance matrix.

use crate::error::{GraspError, Result};
use crate::models::Point;

/// Row-major n×n distances between cities, `get(i, j)` being the cost of
/// travelling from `i` to `j`.
///
/// Entries need not be symmetric. The validating constructors reject
/// non-square grids and negative or non-finite entries.
///
/// # Examples
///
/// ```
/// use u_grasp::distance::DistanceMatrix;
/// use u_grasp::models::Point;
///
/// let dm = DistanceMatrix::from_points(&[Point::new(0.0, 0.0), Point::new(6.0, 8.0)]);
/// assert_eq!(dm.get(1, 0), 10.0);
///
/// let dm = DistanceMatrix::from_rows(&[vec![0.0, 2.0], vec![7.0, 0.0]]).unwrap();
/// assert!(!dm.is_symmetric(1e-9));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// All-zero matrix over `size` cities.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Euclidean distances between `points`.
    pub fn from_points(points: &[Point]) -> Self {
        let mut dm = Self::new(points.len());
        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                let d = a.distance_to(b);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Wraps a flat row-major grid of `size * size` entries.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidInput`] on a length mismatch or a negative or
    /// non-finite entry.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(GraspError::InvalidInput(format!(
                "expected {} entries for {size} cities, got {}",
                size * size,
                data.len()
            )));
        }
        if let Some(k) = data.iter().position(|d| !d.is_finite() || *d < 0.0) {
            return Err(GraspError::InvalidInput(format!(
                "distance ({}, {}) = {} is not a finite nonnegative number",
                k / size,
                k % size,
                data[k]
            )));
        }
        Ok(Self { data, size })
    }

    /// Builds the matrix from explicit rows.
    ///
    /// # Errors
    ///
    /// [`GraspError::InvalidInput`] if there are no rows, a row's length
    /// differs from the row count, or an entry is rejected by
    /// [`from_data`](Self::from_data).
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(GraspError::InvalidInput(
                "distance matrix has no rows".into(),
            ));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(GraspError::InvalidInput(format!(
                "distance matrix must be square: row {i} has {} entries, expected {n}",
                row.len()
            )));
        }
        Self::from_data(n, rows.concat())
    }

    /// Distance from `from` to `to`. Panics on an out-of-range index.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of cities.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distances leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        let start = from * self.size;
        &self.data[start..start + self.size]
    }

    /// Whether `get(i, j)` and `get(j, i)` agree within `tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.size).all(|i| {
            (i + 1..self.size).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }

    /// The `k` cities closest to `from` by raw row distance.
    ///
    /// `from` itself takes part in the ranking (its own distance is usually
    /// zero). Ties go to the lower index.
    pub fn nearest(&self, from: usize, k: usize) -> Vec<usize> {
        let row = self.row(from);
        let mut order: Vec<usize> = (0..self.size).collect();
        order.sort_by(|&a, &b| row[a].total_cmp(&row[b]).then(a.cmp(&b)));
        order.truncate(k.min(self.size));
        order
    }
}
