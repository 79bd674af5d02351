//! Polynomial least-squares fitting.
//!
//! Ordinary least squares by the normal-equations method: build the
//! Vandermonde design matrix, form AᵗA and Aᵗy, and solve the small
//! (degree+1)-square system with Gaussian elimination and partial pivoting.
//! The degree is capped well below the sample counts this tool sees, so the
//! dense solve is never more than 9x9.

use crate::error::CurveError;

/// Pivot floor for the elimination. A pivot whose magnitude falls below this
/// is replaced by it, regularizing near-singular systems (duplicate x
/// values, degree above the information in the data) instead of failing.
const PIVOT_FLOOR: f64 = 1e-12;

/// A fitted polynomial, lowest-order coefficient first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Coefficients, `coeffs[i]` multiplying `tⁱ`.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Degree of the polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Evaluate at `t` (Horner's method).
    pub fn eval(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// Evaluate at each of the given positions.
    pub fn sample(&self, positions: &[f64]) -> Vec<f64> {
        positions.iter().map(|&t| self.eval(t)).collect()
    }
}

/// Fit a polynomial of the given degree to (x, y) samples.
///
/// Errors only when the series is empty or the arrays disagree in length.
/// Near-singular normal equations are regularized via the pivot floor, so a
/// degenerate fit still returns a usable polynomial.
///
/// # Examples
/// ```
/// use stepweave_curve::fit_polynomial;
///
/// let line = fit_polynomial(&[0.0, 1.0], &[0.0, 1.0], 1).unwrap();
/// assert!((line.eval(0.5) - 0.5).abs() < 1e-9);
/// ```
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial, CurveError> {
    if x.is_empty() || y.is_empty() {
        return Err(CurveError::InvalidInput("empty series".to_string()));
    }
    if x.len() != y.len() {
        return Err(CurveError::InvalidInput(format!(
            "x and y lengths differ: {} vs {}",
            x.len(),
            y.len()
        )));
    }

    let n = degree + 1;

    // Vandermonde design matrix: one row of powers 0..=degree per sample.
    let design: Vec<Vec<f64>> = x
        .iter()
        .map(|&xi| {
            let mut row = Vec::with_capacity(n);
            let mut power = 1.0;
            for _ in 0..n {
                row.push(power);
                power *= xi;
            }
            row
        })
        .collect();

    // Normal equations: (AᵗA) c = Aᵗy.
    let mut matrix = vec![vec![0.0; n]; n];
    let mut rhs = vec![0.0; n];
    for (row, &yi) in design.iter().zip(y) {
        for i in 0..n {
            for j in 0..n {
                matrix[i][j] += row[i] * row[j];
            }
            rhs[i] += row[i] * yi;
        }
    }

    let coeffs = solve(matrix, rhs);
    Ok(Polynomial { coeffs })
}

/// Solve a dense linear system with Gaussian elimination and partial
/// pivoting, substituting the pivot floor for vanishing pivots.
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Vec<f64> {
    let n = rhs.len();

    for col in 0..n {
        // Partial pivoting: bring the largest remaining magnitude up.
        let mut pivot_row = col;
        for row in col + 1..n {
            if matrix[row][col].abs() > matrix[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        if matrix[col][col].abs() < PIVOT_FLOOR {
            matrix[col][col] = PIVOT_FLOOR;
        }
        let pivot = matrix[col][col];

        for row in col + 1..n {
            let factor = matrix[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution.
    let mut coeffs = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for j in i + 1..n {
            sum -= matrix[i][j] * coeffs[j];
        }
        let mut pivot = matrix[i][i];
        if pivot.abs() < PIVOT_FLOOR {
            pivot = PIVOT_FLOOR;
        }
        coeffs[i] = sum / pivot;
    }

    coeffs
}
