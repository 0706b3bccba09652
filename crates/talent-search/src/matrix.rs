//! Dense `(n × D)` matrices of embedding rows.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// A stack of embedding vectors sharing one dimension.
#[derive(Debug, Clone)]
pub struct EmbeddingMatrix {
    data: Array2<f32>,
}

impl EmbeddingMatrix {
    /// A matrix with no rows and `dimensions` columns.
    pub fn empty(dimensions: usize) -> Self {
        Self {
            data: Array2::zeros((0, dimensions)),
        }
    }

    /// Stack rows, taking the dimension from the first one.
    ///
    /// An empty slice yields a zero-dimension empty matrix.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        match rows.first() {
            Some(first) => Self::from_rows_with_dimensions(rows, first.as_ref().len()),
            None => Ok(Self::empty(0)),
        }
    }

    /// Stack rows that must all have exactly `dimensions` values.
    pub fn from_rows_with_dimensions<R: AsRef<[f32]>>(
        rows: &[R],
        dimensions: usize,
    ) -> Result<Self> {
        let mut flat = Vec::with_capacity(rows.len() * dimensions);
        for row in rows {
            let row = row.as_ref();
            if row.len() != dimensions {
                return Err(Error::DimensionMismatch {
                    expected: dimensions,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }

        let data = Array2::from_shape_vec((rows.len(), dimensions), flat)
            .map_err(|e| Error::Index(format!("Failed to shape matrix: {}", e)))?;
        Ok(Self { data })
    }

    /// A single-row matrix, the usual shape of a query.
    pub fn from_row(row: &[f32]) -> Self {
        Self {
            data: Array1::from(row.to_vec()).insert_axis(Axis(0)),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// True when the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Row length
    pub fn dimensions(&self) -> usize {
        self.data.ncols()
    }

    /// View a single row
    pub fn row(&self, index: usize) -> ArrayView1<'_, f32> {
        self.data.row(index)
    }

    /// Underlying array
    pub fn as_array(&self) -> &Array2<f32> {
        &self.data
    }
}

/// Divide every row by its L2 norm plus `epsilon`, in place.
///
/// Rows whose norm is zero are left untouched when `epsilon` is zero.
pub(crate) fn l2_normalize_rows(data: &mut Array2<f32>, epsilon: f32) {
    for mut row in data.rows_mut() {
        let norm = row.dot(&row).sqrt() + epsilon;
        if norm > 0.0 {
            row.mapv_inplace(|x| x / norm);
        }
    }
}
