use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use num_traits::{One, Zero};

use super::elementary::{echelon_in_place, row_canonical_in_place};
use crate::traits::{LinalgScalar, MatrixRef};
use crate::Matrix;

/// Classification of a linear system `A X = B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolutionStatus {
    /// Inconsistent system, or unusable inputs.
    NoSolution,
    Unique,
    Infinite,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolutionStatus::NoSolution => "no solution",
            SolutionStatus::Unique => "unique solution",
            SolutionStatus::Infinite => "infinitely many solutions",
        })
    }
}

/// Outcome of [`gaussian_elimination`].
///
/// `Unique` holds the `A.ncols() x B.ncols()` solution block. `Infinite`
/// holds one column per free variable: the solution obtained by setting that
/// free variable to one and every other free variable to zero. For a
/// homogeneous system these columns span the null space of `A`.
#[derive(Debug, Clone)]
pub enum LinearSolution<T> {
    NoSolution,
    Unique(Matrix<T>),
    Infinite(Matrix<T>),
}

impl<T> LinearSolution<T> {
    pub fn status(&self) -> SolutionStatus {
        match self {
            LinearSolution::NoSolution => SolutionStatus::NoSolution,
            LinearSolution::Unique(_) => SolutionStatus::Unique,
            LinearSolution::Infinite(_) => SolutionStatus::Infinite,
        }
    }

    /// The solution matrix, if any.
    pub fn matrix(&self) -> Option<&Matrix<T>> {
        match self {
            LinearSolution::NoSolution => None,
            LinearSolution::Unique(x) | LinearSolution::Infinite(x) => Some(x),
        }
    }

    /// The solution matrix, or null when there is none.
    pub fn into_matrix(self) -> Matrix<T> {
        match self {
            LinearSolution::NoSolution => Matrix::null(),
            LinearSolution::Unique(x) | LinearSolution::Infinite(x) => x,
        }
    }
}

/// Intermediate results of [`gaussian_elimination_aux`].
#[derive(Debug, Clone)]
pub struct LinearSystemAux<T> {
    /// Rank of the coefficient matrix.
    pub rank_a: usize,
    /// Rank of the augmented matrix `[A|B]`.
    pub rank_m: usize,
    /// Number of unknowns, `A.ncols()`.
    pub num_unknowns: usize,
    /// Echelon form of `[A|B]`.
    pub echelon: Matrix<T>,
    /// Row-canonical form of `[A|B]`; null when the system is inconsistent.
    pub canonical: Matrix<T>,
    /// Pivot column of each row of the echelon form (1-indexed, 0 for none).
    pub pivots: Vec<usize>,
    /// Columns of `A` (1-indexed) that carry no pivot.
    pub free_vars: Vec<usize>,
}

impl<T> Default for LinearSystemAux<T> {
    fn default() -> Self {
        Self {
            rank_a: 0,
            rank_m: 0,
            num_unknowns: 0,
            echelon: Matrix::null(),
            canonical: Matrix::null(),
            pivots: Vec::new(),
            free_vars: Vec::new(),
        }
    }
}

/// Solve `A X = B` by Gaussian elimination on the augmented matrix.
///
/// ```
/// use corematrix::Matrix;
/// use corematrix::linalg::{gaussian_elimination, SolutionStatus};
///
/// let a = Matrix::from_row_major(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
/// let b = Matrix::column_vector(&[3.0, 5.0]);
/// let x = gaussian_elimination(&a, &b);
/// assert_eq!(x.status(), SolutionStatus::Unique);
/// let x = x.into_matrix();
/// assert!((x[(1, 1)] - 0.8).abs() < 1e-12);
/// assert!((x[(2, 1)] - 1.4).abs() < 1e-12);
/// ```
pub fn gaussian_elimination<T: LinalgScalar>(a: &Matrix<T>, b: &Matrix<T>) -> LinearSolution<T> {
    gaussian_elimination_aux(a, b).0
}

/// [`gaussian_elimination`], also returning the intermediate forms, ranks and
/// pivot bookkeeping.
pub fn gaussian_elimination_aux<T: LinalgScalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> (LinearSolution<T>, LinearSystemAux<T>) {
    let mut aux = LinearSystemAux::default();
    if a.is_null() || b.is_null() || a.nrows() != b.nrows() {
        return (LinearSolution::NoSolution, aux);
    }
    let mut m = a.hcat(b);
    if m.is_null() {
        return (LinearSolution::NoSolution, aux);
    }

    let unknowns = a.ncols();
    aux.num_unknowns = unknowns;

    let pivots = echelon_in_place(&mut m);
    let rank_m = pivots.iter().filter(|&&p| p > 0).count();
    let rank_a = pivots.iter().filter(|&&p| p > 0 && p <= unknowns).count();
    aux.rank_a = rank_a;
    aux.rank_m = rank_m;
    aux.echelon = m.clone();

    let mut free_vars = Vec::with_capacity(unknowns - rank_a);
    let mut i = 0;
    for f in 1..=unknowns {
        if pivots.get(i) == Some(&f) {
            i += 1;
        } else {
            free_vars.push(f);
        }
    }
    aux.free_vars = free_vars;

    if rank_a != rank_m {
        log::trace!("inconsistent system: rank(A) = {rank_a}, rank([A|B]) = {rank_m}");
        aux.pivots = pivots;
        return (LinearSolution::NoSolution, aux);
    }

    row_canonical_in_place(&mut m, &pivots);

    let solution = if rank_m == unknowns {
        LinearSolution::Unique(m.submatrix(1, unknowns + 1, unknowns, b.ncols()))
    } else {
        let s = aux.free_vars.len();
        let mut basis = Matrix::zeros(unknowns, s);
        let mut values = vec![T::zero(); s];
        for k in 0..s {
            if k > 0 {
                values[k - 1] = T::zero();
            }
            values[k] = T::one();
            let x = solve_free_var_system(&m, &aux.free_vars, &values, &pivots, rank_a, unknowns);
            basis.set_submatrix(1, k + 1, &x);
        }
        LinearSolution::Infinite(basis)
    };

    aux.canonical = m;
    aux.pivots = pivots;
    (solution, aux)
}

/// Back-substitute a row-canonical augmented matrix for one assignment of
/// the free variables.
///
/// `free` lists the free columns (1-indexed, ascending) and `values` their
/// assigned values. The right-hand side is the last column of `c`. Entries in
/// pivot columns other than the row's own pivot are zero in canonical form, so
/// only the free columns contribute.
fn solve_free_var_system<T: LinalgScalar>(
    c: &Matrix<T>,
    free: &[usize],
    values: &[T],
    pivots: &[usize],
    rank: usize,
    unknowns: usize,
) -> Matrix<T> {
    let mut x = Matrix::zeros(unknowns, 1);
    for (&f, &v) in free.iter().zip(values) {
        x[(f, 1)] = v;
    }

    let rhs = c.ncols() - 1;
    let mut l = 0;
    for (i, &p) in pivots.iter().enumerate().take(rank) {
        while l < free.len() && free[l] < p {
            l += 1;
        }
        let mut r = *c.get(i, rhs);
        for (&f, &v) in free.iter().zip(values).skip(l) {
            r = r - *c.get(i, f - 1) * v;
        }
        x[(p, 1)] = r;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn m(rows: usize, cols: usize, v: &[f64]) -> Matrix<f64> {
        Matrix::from_row_major(rows, cols, v)
    }

    #[test]
    fn unique_three_by_three() {
        let a = m(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let b = Matrix::column_vector(&[8.0, -11.0, -3.0]);
        let (sol, aux) = gaussian_elimination_aux(&a, &b);
        assert_eq!(sol.status(), SolutionStatus::Unique);
        let x = sol.into_matrix();
        assert_eq!(x, Matrix::column_vector(&[2.0, 3.0, -1.0]));
        assert_eq!(aux.rank_a, 3);
        assert_eq!(aux.rank_m, 3);
        assert_eq!(aux.num_unknowns, 3);
        assert!(aux.free_vars.is_empty());
        assert_eq!(aux.pivots, vec![1, 2, 3]);
    }

    #[test]
    fn multiple_right_hand_sides() {
        let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let x = gaussian_elimination(&a, &Matrix::identity(2)).into_matrix();
        assert_eq!(x, m(2, 2, &[-2.0, 1.0, 1.5, -0.5]));
    }

    #[test]
    fn inconsistent_system() {
        let a = m(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let b = Matrix::column_vector(&[1.0, 2.0]);
        let (sol, aux) = gaussian_elimination_aux(&a, &b);
        assert_eq!(sol.status(), SolutionStatus::NoSolution);
        assert!(sol.into_matrix().is_null());
        assert_eq!(aux.rank_a, 1);
        assert_eq!(aux.rank_m, 2);
        assert!(aux.canonical.is_null());
        assert!(!aux.echelon.is_null());
    }

    #[test]
    fn infinite_homogeneous_basis() {
        // x + y + z = 0: two free variables.
        let a = m(1, 3, &[1.0, 1.0, 1.0]);
        let b = Matrix::column_vector(&[0.0]);
        let (sol, aux) = gaussian_elimination_aux(&a, &b);
        assert_eq!(sol.status(), SolutionStatus::Infinite);
        assert_eq!(aux.free_vars, vec![2, 3]);
        let s = sol.into_matrix();
        assert_eq!((s.nrows(), s.ncols()), (3, 2));
        assert_eq!(s, m(3, 2, &[-1.0, -1.0, 1.0, 0.0, 0.0, 1.0]));
        assert!((&a * &s).is_zero());
    }

    #[test]
    fn infinite_non_homogeneous() {
        let a = m(2, 3, &[1.0, 0.0, 1.0, 0.0, 1.0, 1.0]);
        let b = Matrix::column_vector(&[2.0, 3.0]);
        let s = gaussian_elimination(&a, &b).into_matrix();
        // z = 1 gives x = 1, y = 2.
        assert_eq!(s, Matrix::column_vector(&[1.0, 2.0, 1.0]));
    }

    #[test]
    fn invalid_inputs() {
        let a = Matrix::<f64>::identity(2);
        let (sol, aux) = gaussian_elimination_aux(&a, &Matrix::null());
        assert_eq!(sol.status(), SolutionStatus::NoSolution);
        assert_eq!(aux.rank_a, 0);
        assert!(aux.pivots.is_empty());
        let b = Matrix::column_vector(&[1.0, 2.0, 3.0]);
        assert_eq!(gaussian_elimination(&a, &b).status(), SolutionStatus::NoSolution);
    }

    #[test]
    fn status_display() {
        assert_eq!(SolutionStatus::Unique.to_string(), "unique solution");
        assert_eq!(SolutionStatus::NoSolution.to_string(), "no solution");
    }
}
