//! Invert command - invert a matrix through the cache

use crate::cache::{cache_solve, CacheMatrix};
use crate::cli::args::InvertArgs;
use crate::cli::load_matrix;
use crate::config::{Config, MatrixFormat};
use crate::error::MatcacheResult;
use crate::linalg::{DenseInverter, Invert, InvertMethod};
use crate::matrix::Matrix;
use crate::ui::{self, UiContext};
use serde::Serialize;
use std::cell::Cell;
use tracing::debug;

/// Execute the invert command
pub async fn execute(args: InvertArgs, config: &Config) -> MatcacheResult<()> {
    let matrix = load_matrix(&args.file).await?;
    let options = config
        .solver
        .options(args.solver.method, args.solver.tolerance);
    let format = args.format.unwrap_or(config.output.format);
    let precision = args.precision.unwrap_or(config.output.precision);

    let inverter = CountingInverter::new(&DenseInverter);
    let mut cache = CacheMatrix::new(matrix);

    let inverse = cache_solve(&mut cache, &inverter, &options)?;
    for request in 1..args.repeat {
        cache_solve(&mut cache, &inverter, &options)?;
        debug!("Request {} served", request + 1);
    }

    let summary = InvertSummary {
        rows: inverse.rows(),
        method: options.method,
        tolerance: options.tolerance,
        requests: args.repeat,
        computed: inverter.calls(),
        inverse: &inverse,
    };

    match format {
        MatrixFormat::Table => print_table(&summary, precision),
        MatrixFormat::Json => print_json(&summary)?,
    }

    Ok(())
}

/// Wraps a backend and counts the inversions it actually performs
struct CountingInverter<'a, I: ?Sized> {
    inner: &'a I,
    calls: Cell<u32>,
}

impl<'a, I: Invert + ?Sized> CountingInverter<'a, I> {
    fn new(inner: &'a I) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl<I: Invert + ?Sized> Invert for CountingInverter<'_, I> {
    type Options = I::Options;
    type Error = I::Error;

    fn invert(&self, matrix: &Matrix, options: &Self::Options) -> Result<Matrix, Self::Error> {
        self.calls.set(self.calls.get() + 1);
        self.inner.invert(matrix, options)
    }
}

#[derive(Serialize)]
struct InvertSummary<'a> {
    rows: usize,
    method: InvertMethod,
    tolerance: f64,
    requests: u32,
    computed: u32,
    inverse: &'a Matrix,
}

fn print_table(summary: &InvertSummary<'_>, precision: usize) {
    let ctx = UiContext::detect();
    ui::step_ok_detail(
        &ctx,
        &format!("Inverted {0}x{0} matrix", summary.rows),
        &format!(
            "{}, {} computed, {} from cache",
            summary.method,
            summary.computed,
            summary.requests - summary.computed
        ),
    );
    println!();
    print!("{:.*}", precision, summary.inverse);
}

fn print_json(summary: &InvertSummary<'_>) -> MatcacheResult<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::InvertOptions;

    fn sample() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 0.0], vec![1.0, 2.0]]).unwrap()
    }

    #[test]
    fn counts_only_real_inversions() {
        let inverter = CountingInverter::new(&DenseInverter);
        let options = InvertOptions::default();
        let mut cache = CacheMatrix::new(sample());

        for _ in 0..3 {
            cache_solve(&mut cache, &inverter, &options).unwrap();
        }
        assert_eq!(inverter.calls(), 1);

        cache.set_matrix(Matrix::identity(2));
        cache_solve(&mut cache, &inverter, &options).unwrap();
        assert_eq!(inverter.calls(), 2);
    }

    #[test]
    fn failed_inversions_are_counted() {
        let inverter = CountingInverter::new(&DenseInverter);
        let singular = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        let mut cache = CacheMatrix::new(singular);

        assert!(cache_solve(&mut cache, &inverter, &InvertOptions::default()).is_err());
        assert!(cache_solve(&mut cache, &inverter, &InvertOptions::default()).is_err());
        assert_eq!(inverter.calls(), 2);
    }
}
