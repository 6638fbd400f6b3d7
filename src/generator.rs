//! # Scenario Driver
//!
//! Ties generation, multiplication and serialization together for one run.
//!
//! A run is described by a [`DataConfig`]: which operands to draw, which
//! products to compute, the dimension `n`, and where the files go. The
//! driver walks through the steps in a fixed order:
//!
//! 1. `A` (`n x 8`), if requested
//! 2. `B` (`8 x n`), if requested
//! 3. `C = B x A` (`8 x 8`), if requested and both operands exist
//! 4. `V` (`8 x 1`) and `AV = A x V` (`n x 1`), if requested and `A` exists
//!
//! Nothing in a run is fatal except an invalid `n`, which stops the run
//! before anything is drawn or written. Every other failure (a product
//! without its operand, a file that cannot be written) is printed to stderr,
//! recorded in the [`GenerationReport`], and the remaining steps still run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::encode::OverflowMode;
use crate::error::{missing_prerequisite, GenError, Result};
use crate::matmul::{widening_matmul, widening_matvec};
use crate::random::random_int8_matrix;
use crate::serialize::{write_matrix, Entity, INNER_DIM};

/// Options for a single generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Variable dimension of A (`n x 8`) and B (`8 x n`). Must be positive.
    pub n: i64,
    /// Prefix of every output file name.
    pub file_prefix: String,
    /// Draw and write matrix A.
    pub generate_matrix_a: bool,
    /// Draw and write matrix B.
    pub generate_matrix_b: bool,
    /// Compute and write `C = B x A`.
    pub perform_matrix_multiplication: bool,
    /// Draw V, then compute and write `AV = A x V`.
    pub perform_vector_multiplication: bool,
    /// Directory the files are written to. It is not created.
    pub output_dir: PathBuf,
    /// Treatment of values that do not fit their output width.
    pub overflow: OverflowMode,
    /// Seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Print matrices and progress to stdout.
    pub verbose: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            n: 8,
            file_prefix: "matrix".to_string(),
            generate_matrix_a: true,
            generate_matrix_b: true,
            perform_matrix_multiplication: true,
            perform_vector_multiplication: true,
            output_dir: PathBuf::from("."),
            overflow: OverflowMode::Saturate,
            seed: None,
            verbose: true,
        }
    }
}

impl DataConfig {
    /// Default flags with the given dimension and prefix.
    pub fn new(n: i64, file_prefix: impl Into<String>) -> Self {
        DataConfig {
            n,
            file_prefix: file_prefix.into(),
            ..Default::default()
        }
    }

    /// Toggles drawing and writing A.
    pub fn with_matrix_a(mut self, enabled: bool) -> Self {
        self.generate_matrix_a = enabled;
        self
    }

    /// Toggles drawing and writing B.
    pub fn with_matrix_b(mut self, enabled: bool) -> Self {
        self.generate_matrix_b = enabled;
        self
    }

    /// Toggles `C = B x A`.
    pub fn with_matrix_multiplication(mut self, enabled: bool) -> Self {
        self.perform_matrix_multiplication = enabled;
        self
    }

    /// Toggles V and `AV = A x V`.
    pub fn with_vector_multiplication(mut self, enabled: bool) -> Self {
        self.perform_vector_multiplication = enabled;
        self
    }

    /// Sets the directory files are written to.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets how out-of-range values are encoded.
    pub fn with_overflow(mut self, mode: OverflowMode) -> Self {
        self.overflow = mode;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Toggles stdout progress and matrix dumps.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// `n` as a matrix dimension.
    ///
    /// # Errors
    ///
    /// [`GenError::InvalidDimension`] if `n <= 0`, or if an `n x 8` matrix
    /// would hold more than `isize::MAX` elements.
    pub fn dimension(&self) -> Result<usize> {
        match usize::try_from(self.n) {
            Ok(n)
                if n > 0
                    && n
                        .checked_mul(INNER_DIM)
                        .is_some_and(|len| len <= isize::MAX as usize) =>
            {
                Ok(n)
            }
            _ => Err(GenError::InvalidDimension { n: self.n }),
        }
    }

    /// Full path of the file `entity` is written to.
    pub fn output_path(&self, entity: Entity, n: usize) -> PathBuf {
        self.output_dir.join(entity.file_name(&self.file_prefix, n))
    }
}

/// Preset flag combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// A, B and `C = B x A`.
    MatrixMultiplication,
    /// A, V and `AV = A x V`.
    VectorMultiplication,
    /// Everything.
    AllOperations,
    /// A and B, no products.
    BaseMatrices,
    /// A only.
    MatrixAOnly,
}

impl Scenario {
    /// Every preset, in declaration order.
    pub const ALL: [Scenario; 5] = [
        Scenario::MatrixMultiplication,
        Scenario::VectorMultiplication,
        Scenario::AllOperations,
        Scenario::BaseMatrices,
        Scenario::MatrixAOnly,
    ];

    /// Suffix appended to the caller's prefix.
    pub fn prefix_suffix(self) -> &'static str {
        match self {
            Scenario::MatrixMultiplication => "_matrix_mult",
            Scenario::VectorMultiplication => "_vector_mult",
            Scenario::AllOperations => "_all_operations",
            Scenario::BaseMatrices => "_base_matrices",
            Scenario::MatrixAOnly => "_matrix_A_only",
        }
    }

    /// Configuration for this scenario.
    pub fn config(self, n: i64, prefix: &str) -> DataConfig {
        let (a, b, mat, vec) = match self {
            Scenario::MatrixMultiplication => (true, true, true, false),
            Scenario::VectorMultiplication => (true, false, false, true),
            Scenario::AllOperations => (true, true, true, true),
            Scenario::BaseMatrices => (true, true, false, false),
            Scenario::MatrixAOnly => (true, false, false, false),
        };
        DataConfig::new(n, format!("{prefix}{}", self.prefix_suffix()))
            .with_matrix_a(a)
            .with_matrix_b(b)
            .with_matrix_multiplication(mat)
            .with_vector_multiplication(vec)
    }
}

/// A file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// What the file holds.
    pub entity: Entity,
    /// Where it was written.
    pub path: PathBuf,
    /// Number of lines, one per matrix row.
    pub rows: usize,
}

/// Everything a run produced, including what went wrong.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// When the run started.
    pub started: DateTime<Local>,
    /// A, if it was drawn.
    pub matrix_a: Option<Array2<i16>>,
    /// B, if it was drawn.
    pub matrix_b: Option<Array2<i16>>,
    /// `B x A`, if it was computed.
    pub product_c: Option<Array2<i32>>,
    /// V, if it was drawn.
    pub vector_v: Option<Array2<i16>>,
    /// `A x V`, if it was computed.
    pub product_av: Option<Array2<i32>>,
    /// Files written successfully, in write order.
    pub written: Vec<WrittenFile>,
    /// Diagnostics, in the order they were raised.
    pub errors: Vec<GenError>,
}

impl GenerationReport {
    fn new() -> Self {
        GenerationReport {
            started: Local::now(),
            matrix_a: None,
            matrix_b: None,
            product_c: None,
            vector_v: None,
            product_av: None,
            written: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// `true` if no diagnostic was raised.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Path `entity` was written to, if it was.
    pub fn path_of(&self, entity: Entity) -> Option<&Path> {
        self.written
            .iter()
            .find(|w| w.entity == entity)
            .map(|w| w.path.as_path())
    }

    pub fn summary(&self) -> String {
        let entities: Vec<&str> = self.written.iter().map(|w| w.entity.label()).collect();
        format!(
            "run started {}: {} file(s) written [{}], {} diagnostic(s)",
            self.started.format("%Y-%m-%d %H:%M:%S"),
            self.written.len(),
            entities.join(", "),
            self.errors.len()
        )
    }
}

/// Runs [`DataConfig`]s against a random source.
pub struct DataGenerator<R = StdRng> {
    config: DataConfig,
    rng: R,
}

impl DataGenerator<StdRng> {
    /// Seeds from `config.seed`, or from the OS when unset.
    pub fn new(config: DataConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        DataGenerator { config, rng }
    }
}

impl<R: Rng> DataGenerator<R> {
    /// Uses `rng` for every draw; `config.seed` is ignored.
    pub fn with_rng(config: DataConfig, rng: R) -> Self {
        DataGenerator { config, rng }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Executes one run. Never panics on bad input and never returns an error;
    /// failures are collected in the report.
    pub fn run(&mut self) -> GenerationReport {
        let DataGenerator { config, rng } = self;
        let mut report = GenerationReport::new();

        let n = match config.dimension() {
            Ok(n) => n,
            Err(err) => {
                fail(&mut report, err);
                return report;
            }
        };

        if config.verbose {
            println!(
                "[{}] n = {n}, prefix = {}",
                report.started.format("%Y-%m-%d %H:%M:%S"),
                config.file_prefix
            );
        }

        if config.generate_matrix_a {
            match random_int8_matrix(rng, n, INNER_DIM) {
                Ok(a) => {
                    emit(config, &mut report, Entity::MatrixA, n, a.view());
                    report.matrix_a = Some(a);
                }
                Err(err) => fail(&mut report, err),
            }
        }

        if config.generate_matrix_b {
            match random_int8_matrix(rng, INNER_DIM, n) {
                Ok(b) => {
                    emit(config, &mut report, Entity::MatrixB, n, b.view());
                    report.matrix_b = Some(b);
                }
                Err(err) => fail(&mut report, err),
            }
        }

        if config.perform_matrix_multiplication {
            let product = match (report.matrix_a.as_ref(), report.matrix_b.as_ref()) {
                (Some(a), Some(b)) => widening_matmul::<i16, i32>(b.view(), a.view()),
                (None, None) => Err(missing_prerequisite("B@A", "A and B")),
                (None, Some(_)) => Err(missing_prerequisite("B@A", "A")),
                (Some(_), None) => Err(missing_prerequisite("B@A", "B")),
            };
            match product {
                Ok(c) => {
                    emit(config, &mut report, Entity::ProductC, n, c.view());
                    report.product_c = Some(c);
                }
                Err(err) => fail(&mut report, err),
            }
        }

        if config.perform_vector_multiplication {
            let drawn = match report.matrix_a.as_ref() {
                Some(a) => random_int8_matrix(rng, INNER_DIM, 1)
                    .map(|v| (widening_matvec::<i16, i32>(a.view(), v.view()), v)),
                None => Err(missing_prerequisite("A@V", "A")),
            };
            match drawn {
                Ok((product, v)) => {
                    emit(config, &mut report, Entity::VectorV, n, v.view());
                    report.vector_v = Some(v);
                    match product {
                        Ok(av) => {
                            emit(config, &mut report, Entity::ProductAV, n, av.view());
                            report.product_av = Some(av);
                        }
                        Err(err) => fail(&mut report, err),
                    }
                }
                Err(err) => fail(&mut report, err),
            }
        }

        if config.verbose {
            println!("\n{}", report.summary());
        }
        report
    }
}

/// Runs `config` once with a fresh random source.
pub fn generate_and_save_data(config: &DataConfig) -> GenerationReport {
    DataGenerator::new(config.clone()).run()
}

fn emit<T>(
    config: &DataConfig,
    report: &mut GenerationReport,
    entity: Entity,
    n: usize,
    matrix: ArrayView2<'_, T>,
) where
    T: Copy + Into<i64> + std::fmt::Display,
{
    let (rows, cols) = matrix.dim();
    if config.verbose {
        println!("\n{entity} ({rows} x {cols}):\n{matrix}");
    }

    let path = config.output_path(entity, n);
    let width = entity.width();
    match write_matrix(&path, matrix, width, config.overflow) {
        Ok(rows) => {
            if config.verbose {
                println!(
                    "{entity} ({}-bit binary, no separator) saved to {}",
                    width.bits(),
                    path.display()
                );
            }
            report.written.push(WrittenFile { entity, path, rows });
        }
        Err(err) => fail(report, err),
    }
}

fn fail(report: &mut GenerationReport, err: GenError) {
    eprintln!("error: {err}");
    report.errors.push(err);
}
