//! Flat text serialization of encoded matrices.
//!
//! One line per matrix row, each line the row's elements encoded with
//! [`encode`](crate::encode::encode) and concatenated without a separator.
//! A column vector is a one-column matrix, so it comes out one element per
//! line. There is no header and no trailing metadata.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{Array2, ArrayView2};

use crate::encode::{encode, from_signed_binary, BitWidth, OverflowMode};
use crate::error::{bit_string_error, io_error, Result};

/// Inner dimension shared by every generated entity.
pub const INNER_DIM: usize = 8;

/// The five matrices a run can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// Operand A, `n x 8`.
    MatrixA,
    /// Operand B, `8 x n`.
    MatrixB,
    /// Product `C = B x A`, `8 x 8`.
    ProductC,
    /// Operand V, `8 x 1`.
    VectorV,
    /// Product `AV = A x V`, `n x 1`.
    ProductAV,
}

impl Entity {
    /// All entities in generation order.
    pub const ALL: [Entity; 5] = [
        Entity::MatrixA,
        Entity::MatrixB,
        Entity::ProductC,
        Entity::VectorV,
        Entity::ProductAV,
    ];

    /// Short logical name.
    pub fn label(self) -> &'static str {
        match self {
            Entity::MatrixA => "A",
            Entity::MatrixB => "B",
            Entity::ProductC => "C",
            Entity::VectorV => "V",
            Entity::ProductAV => "AV",
        }
    }

    /// Encoding width: 8 bits for generated operands, 16 for products.
    pub fn width(self) -> BitWidth {
        match self {
            Entity::MatrixA | Entity::MatrixB | Entity::VectorV => BitWidth::BYTE,
            Entity::ProductC | Entity::ProductAV => BitWidth::HALF_WORD,
        }
    }

    /// Shape for dimension `n`.
    pub fn shape(self, n: usize) -> (usize, usize) {
        match self {
            Entity::MatrixA => (n, INNER_DIM),
            Entity::MatrixB => (INNER_DIM, n),
            Entity::ProductC => (INNER_DIM, INNER_DIM),
            Entity::VectorV => (INNER_DIM, 1),
            Entity::ProductAV => (n, 1),
        }
    }

    /// Output file name for `prefix` and dimension `n`.
    ///
    /// ```
    /// use rtlvec::serialize::Entity;
    ///
    /// assert_eq!(
    ///     Entity::MatrixA.file_name("my_data", 4),
    ///     "my_data_A_4x8_8bit_binary_no_space.txt"
    /// );
    /// ```
    pub fn file_name(self, prefix: &str, n: usize) -> String {
        let (rows, cols) = self.shape(n);
        let bits = self.width().bits();
        match self {
            Entity::MatrixA | Entity::MatrixB => format!(
                "{prefix}_{}_{rows}x{cols}_{bits}bit_binary_no_space.txt",
                self.label()
            ),
            Entity::ProductC => {
                format!("{prefix}_C_product_BxA_{rows}x{cols}_{bits}bit_binary_no_space.txt")
            }
            Entity::VectorV => {
                format!("{prefix}_vector_V_{rows}x{cols}_{bits}bit_binary_no_space.txt")
            }
            Entity::ProductAV => {
                format!("{prefix}_result_vector_AxV_{rows}x{cols}_{bits}bit_binary_no_space.txt")
            }
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Encodes every row of `matrix` into one concatenated bit string.
pub fn format_rows<T>(matrix: ArrayView2<'_, T>, width: BitWidth, mode: OverflowMode) -> Result<Vec<String>>
where
    T: Copy + Into<i64>,
{
    matrix
        .rows()
        .into_iter()
        .map(|row| -> Result<String> {
            let mut line = String::with_capacity(row.len() * width.bits() as usize);
            for &value in row.iter() {
                line.push_str(&encode(value.into(), width, mode)?);
            }
            Ok(line)
        })
        .collect()
}

/// Writes `lines` to `path`, one per line, replacing any existing file.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = File::create(path).map_err(|e| io_error(path, &e))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}").map_err(|e| io_error(path, &e))?;
    }
    writer.flush().map_err(|e| io_error(path, &e))
}

/// Encodes `matrix` at `width` and writes it to `path`. Returns the number of
/// lines written.
///
/// Every line is encoded before the file is opened, so an encoding failure in
/// [`OverflowMode::Strict`] leaves no file behind.
pub fn write_matrix<T>(
    path: &Path,
    matrix: ArrayView2<'_, T>,
    width: BitWidth,
    mode: OverflowMode,
) -> Result<usize>
where
    T: Copy + Into<i64>,
{
    let lines = format_rows(matrix, width, mode)?;
    write_lines(path, &lines)?;
    Ok(lines.len())
}

/// Reads a file produced by [`write_matrix`] back into signed integers.
///
/// Each line must be a whole number of `width`-bit fields and all lines must
/// have the same length.
pub fn read_matrix(path: &Path, width: BitWidth) -> Result<Array2<i64>> {
    let file = File::open(path).map_err(|e| io_error(path, &e))?;
    let w = width.bits() as usize;

    let mut values = Vec::new();
    let mut rows = 0;
    let mut cols = None;
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| io_error(path, &e))?;
        if !line.is_ascii() || line.len() % w != 0 {
            return Err(bit_string_error(
                &line,
                format!("line is not a whole number of {w}-bit fields"),
            ));
        }
        let fields = line.len() / w;
        if *cols.get_or_insert(fields) != fields {
            return Err(bit_string_error(&line, "ragged row"));
        }
        for start in (0..line.len()).step_by(w) {
            values.push(from_signed_binary(&line[start..start + w])?);
        }
        rows += 1;
    }

    Array2::from_shape_vec((rows, cols.unwrap_or(0)), values)
        .map_err(|e| bit_string_error(&path.display().to_string(), e.to_string()))
}
