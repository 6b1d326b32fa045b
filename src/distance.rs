//! Symmetric distance matrix for routing instances.

use crate::error::{CvrpError, CvrpResult};

/// Dense symmetric distance matrix indexed by vertex (0 = depot).
///
/// The matrix is read-only for the duration of a search; all engine
/// components share it by reference.
///
/// # Examples
///
/// ```
/// use u_cvrp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 4.0)]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.get(1, 1), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds a matrix from precomputed rows.
    ///
    /// The rows must form a square, symmetric, nonnegative matrix with a
    /// zero diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> CvrpResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(CvrpError::InvalidConfig(
                "distance matrix must not be empty".into(),
            ));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(CvrpError::InvalidConfig(format!(
                    "distance matrix row {i} has length {}, expected {size}",
                    row.len()
                )));
            }
        }

        let mut data = Vec::with_capacity(size * size);
        for row in &rows {
            data.extend_from_slice(row);
        }
        let matrix = Self { size, data };

        for i in 0..size {
            if matrix.get(i, i) != 0.0 {
                return Err(CvrpError::InvalidConfig(format!(
                    "distance matrix diagonal entry ({i}, {i}) must be zero"
                )));
            }
            for j in (i + 1)..size {
                let d = matrix.get(i, j);
                if d < 0.0 || !d.is_finite() {
                    return Err(CvrpError::InvalidConfig(format!(
                        "distance ({i}, {j}) = {d} must be finite and nonnegative"
                    )));
                }
                if (d - matrix.get(j, i)).abs() > 1e-9 {
                    return Err(CvrpError::InvalidConfig(format!(
                        "distance matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }
        Ok(matrix)
    }

    /// Builds a Euclidean matrix from vertex coordinates (index 0 = depot).
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Self {
        let size = coords.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let dx = coords[i].0 - coords[j].0;
                let dy = coords[i].1 - coords[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { size, data }
    }

    /// Returns the distance between two vertices.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of vertices (depot included).
    pub fn size(&self) -> usize {
        self.size
    }
}
