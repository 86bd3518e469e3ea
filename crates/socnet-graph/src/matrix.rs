use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use socnet_core::errors::{ErrorInfo, NetError};

/// Numeric domain of an adjacency matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    /// Cells hold `0` or `1`.
    Bit,
    /// Cells hold signed 8-bit integers.
    Byte,
    /// Cells hold double precision floats.
    Double,
}

/// Narrow/widen rule between `f64` and the stored cell type.
pub trait CellCodec: fmt::Debug + Clone + Copy + PartialEq + Send + Sync + 'static {
    /// Stored representation of a cell.
    type Cell: Copy + Default + PartialEq + fmt::Debug + Send + Sync;

    /// Domain tag of the codec.
    const KIND: MatrixKind;

    /// Narrows a value into the cell domain. Values outside the domain are
    /// mapped silently (bit: any non-zero is `1`; byte: truncated then wrapped).
    fn encode(value: f64) -> Self::Cell;

    /// Widens a cell back to `f64`.
    fn decode(cell: Self::Cell) -> f64;

    /// Narrows a value only when it is exactly representable.
    fn checked_encode(value: f64) -> Option<Self::Cell>;

    /// Reads a row of cells as `f64` values.
    fn row(cells: &[Self::Cell]) -> Cow<'_, [f64]> {
        Cow::Owned(cells.iter().map(|cell| Self::decode(*cell)).collect())
    }
}

/// `{0, 1}` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitCell;

impl CellCodec for BitCell {
    type Cell = bool;
    const KIND: MatrixKind = MatrixKind::Bit;

    fn encode(value: f64) -> bool {
        value != 0.0
    }

    fn decode(cell: bool) -> f64 {
        if cell {
            1.0
        } else {
            0.0
        }
    }

    fn checked_encode(value: f64) -> Option<bool> {
        if value == 0.0 {
            Some(false)
        } else if value == 1.0 {
            Some(true)
        } else {
            None
        }
    }
}

/// Signed 8-bit cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteCell;

impl CellCodec for ByteCell {
    type Cell = i8;
    const KIND: MatrixKind = MatrixKind::Byte;

    fn encode(value: f64) -> i8 {
        // truncate toward zero, then keep the low byte
        (value as i64) as i8
    }

    fn decode(cell: i8) -> f64 {
        f64::from(cell)
    }

    fn checked_encode(value: f64) -> Option<i8> {
        if value.fract() == 0.0 && (f64::from(i8::MIN)..=f64::from(i8::MAX)).contains(&value) {
            Some(value as i8)
        } else {
            None
        }
    }
}

/// Double precision cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DoubleCell;

impl CellCodec for DoubleCell {
    type Cell = f64;
    const KIND: MatrixKind = MatrixKind::Double;

    fn encode(value: f64) -> f64 {
        value
    }

    fn decode(cell: f64) -> f64 {
        cell
    }

    fn checked_encode(value: f64) -> Option<f64> {
        Some(value)
    }

    fn row(cells: &[f64]) -> Cow<'_, [f64]> {
        Cow::Borrowed(cells)
    }
}

/// Square adjacency matrix whose rows and columns denote the same node set.
///
/// Cell `(i, j)` holds the weight of the link from node `i` to node `j`; the
/// diagonal may be non-zero. Optional labels name row `i` and column `i` at
/// once. The matrix label records which edge kind the matrix represents.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix<C: CellCodec> {
    size: usize,
    cells: Vec<C::Cell>,
    labels: Option<Vec<String>>,
    matrix_label: String,
    comment: String,
    codec: PhantomData<C>,
}

/// Matrix of `{0, 1}` cells.
pub type BitMatrix = AdjacencyMatrix<BitCell>;
/// Matrix of signed 8-bit cells.
pub type ByteMatrix = AdjacencyMatrix<ByteCell>;
/// Matrix of double precision cells.
pub type DoubleMatrix = AdjacencyMatrix<DoubleCell>;

impl<C: CellCodec> AdjacencyMatrix<C> {
    /// Creates an unlabelled `size` x `size` matrix of zeros.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![C::Cell::default(); size * size],
            labels: None,
            matrix_label: String::new(),
            comment: String::new(),
            codec: PhantomData,
        }
    }

    /// Creates a zero matrix sized and labelled after `labels`.
    pub fn with_labels(labels: Vec<String>) -> Self {
        let mut matrix = Self::new(labels.len());
        matrix.labels = Some(labels);
        matrix
    }

    /// Copies raw tabular data. Every row must have as many entries as there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, NetError> {
        let size = rows.len();
        let mut matrix = Self::new(size);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(matrix_error("not-square", "matrix rows must match the row count")
                    .with_context("row", row_idx)
                    .with_context("columns", row.len())
                    .with_context("rows", size));
            }
            for (col_idx, value) in row.iter().enumerate() {
                matrix.cells[row_idx * size + col_idx] = C::encode(*value);
            }
        }
        Ok(matrix)
    }

    /// Sets the matrix label, consuming the matrix.
    pub fn with_matrix_label(mut self, label: impl Into<String>) -> Self {
        self.matrix_label = label.into();
        self
    }

    /// Returns the number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell domain of the matrix.
    pub fn kind(&self) -> MatrixKind {
        C::KIND
    }

    /// Returns the row/column labels, if any.
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// Returns the label of row (and column) `index`.
    pub fn label_of(&self, index: usize) -> Option<&str> {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(index))
            .map(String::as_str)
    }

    /// Replaces the row/column labels. A label list must have one entry per row.
    pub fn set_labels(&mut self, labels: Option<Vec<String>>) -> Result<(), NetError> {
        if let Some(list) = &labels {
            if list.len() != self.size {
                return Err(matrix_error("label-count", "one label per row is required")
                    .with_context("labels", list.len())
                    .with_context("size", self.size));
            }
        }
        self.labels = labels;
        Ok(())
    }

    /// Returns the matrix label.
    pub fn matrix_label(&self) -> &str {
        &self.matrix_label
    }

    /// Replaces the matrix label.
    pub fn set_matrix_label(&mut self, label: impl Into<String>) {
        self.matrix_label = label.into();
    }

    /// Returns the free-text comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Replaces the free-text comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Reads a cell widened to `f64`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, NetError> {
        let offset = self.offset(row, col)?;
        Ok(C::decode(self.cells[offset]))
    }

    /// Writes a cell, narrowing the value silently into the cell domain.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), NetError> {
        let offset = self.offset(row, col)?;
        self.cells[offset] = C::encode(value);
        Ok(())
    }

    /// Writes a cell only when the value is exactly representable.
    pub fn set_checked(&mut self, row: usize, col: usize, value: f64) -> Result<(), NetError> {
        let offset = self.offset(row, col)?;
        let cell = C::checked_encode(value).ok_or_else(|| {
            matrix_error("unrepresentable-value", "value does not fit the cell domain")
                .with_context("value", value)
                .with_context("kind", format!("{:?}", C::KIND))
        })?;
        self.cells[offset] = cell;
        Ok(())
    }

    /// Returns row `row` as `f64` values; borrowed for double matrices, copied otherwise.
    pub fn row(&self, row: usize) -> Result<Cow<'_, [f64]>, NetError> {
        let start = self.offset(row, 0)?;
        Ok(C::row(&self.cells[start..start + self.size]))
    }

    /// Returns the sum of row `row`.
    pub fn row_sum(&self, row: usize) -> Result<f64, NetError> {
        Ok(self.row(row)?.iter().sum())
    }

    /// Returns the sum of all cells.
    pub fn sum(&self) -> f64 {
        self.cells.iter().map(|cell| C::decode(*cell)).sum()
    }

    /// Returns `sum / (N * (N - 1))`, or `0.0` below two rows.
    pub fn density(&self) -> f64 {
        if self.size < 2 {
            return 0.0;
        }
        self.sum() / (self.size * (self.size - 1)) as f64
    }

    /// Returns `sum / N`, or `0.0` for an empty matrix.
    pub fn avg_degree(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        self.sum() / self.size as f64
    }

    /// Returns whether cell `(i, j)` equals cell `(j, i)` everywhere.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|row| {
            (row + 1..self.size).all(|col| self.cell(row, col) == self.cell(col, row))
        })
    }

    /// Copies the matrix into another cell domain, keeping labels and comment.
    pub fn recode<D: CellCodec>(&self) -> AdjacencyMatrix<D> {
        AdjacencyMatrix {
            size: self.size,
            cells: self
                .cells
                .iter()
                .map(|cell| D::encode(C::decode(*cell)))
                .collect(),
            labels: self.labels.clone(),
            matrix_label: self.matrix_label.clone(),
            comment: self.comment.clone(),
            codec: PhantomData,
        }
    }

    /// Widens the matrix to double precision.
    pub fn to_double(&self) -> DoubleMatrix {
        self.recode::<DoubleCell>()
    }

    /// Computes the matrix product `self * other` in double precision.
    pub fn multiply<D: CellCodec>(
        &self,
        other: &AdjacencyMatrix<D>,
    ) -> Result<DoubleMatrix, NetError> {
        if self.size != other.size() {
            return Err(matrix_error(
                "dimension-mismatch",
                "matrix product needs equal dimensions",
            )
            .with_context("left", self.size)
            .with_context("right", other.size()));
        }
        let n = self.size;
        let mut product = DoubleMatrix::new(n);
        product.labels = self.labels.clone();
        for row in 0..n {
            for k in 0..n {
                let left = self.cell(row, k);
                if left == 0.0 {
                    continue;
                }
                for col in 0..n {
                    product.cells[row * n + col] += left * other.cell(k, col);
                }
            }
        }
        Ok(product)
    }

    /// Reads a cell without bounds reporting; indices must be below `size`.
    pub(crate) fn cell(&self, row: usize, col: usize) -> f64 {
        C::decode(self.cells[row * self.size + col])
    }

    /// Writes a cell without bounds reporting; indices must be below `size`.
    pub(crate) fn put(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.size + col] = C::encode(value);
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize, NetError> {
        if row >= self.size || col >= self.size {
            return Err(
                matrix_error("index-out-of-range", "cell index outside the matrix")
                    .with_context("row", row)
                    .with_context("col", col)
                    .with_context("size", self.size),
            );
        }
        Ok(row * self.size + col)
    }
}

fn matrix_error(code: impl Into<String>, message: impl Into<String>) -> NetError {
    NetError::Matrix(ErrorInfo::new(code, message))
}
