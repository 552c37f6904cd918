use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use corematrix::linalg::{gaussian_elimination, LinalgError, SolutionStatus};
use corematrix::Matrix;

fn m(rows: usize, cols: usize, v: &[f64]) -> Matrix<f64> {
    Matrix::from_row_major(rows, cols, v)
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
    Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..1.0))
}

/// Diagonally dominant, hence non-singular.
fn random_nonsingular(rng: &mut StdRng, n: usize) -> Matrix<f64> {
    random_matrix(rng, n, n) + Matrix::identity(n) * (n as f64 + 1.0)
}

fn random_spd(rng: &mut StdRng, n: usize) -> Matrix<f64> {
    let b = random_matrix(rng, n, n);
    &b * &b.transpose() + Matrix::identity(n) * (n as f64)
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn scenario_determinant_and_inverse() {
    let a = m(2, 2, &[4.0, 3.0, 6.0, 3.0]);
    assert_abs_diff_eq!(a.det(), -6.0, epsilon = 1e-12);
    let inv = a.inv();
    let expected = [-0.5, 0.5, 1.0, -0.667];
    for (k, want) in expected.iter().enumerate() {
        assert_abs_diff_eq!(inv[(k / 2 + 1, k % 2 + 1)], *want, epsilon = 1e-3);
    }
}

#[test]
fn scenario_unique_solution() {
    let a = m(2, 2, &[1.0, 1.0, 1.0, -1.0]);
    let b = Matrix::column_vector(&[3.0, 1.0]);
    let sol = gaussian_elimination(&a, &b);
    assert_eq!(sol.status(), SolutionStatus::Unique);
    assert_eq!(sol.into_matrix(), Matrix::column_vector(&[2.0, 1.0]));
}

#[test]
fn scenario_infinite_solutions() {
    let a = m(2, 2, &[1.0, 2.0, 2.0, 4.0]);
    let b = Matrix::zeros(2, 1);
    let sol = gaussian_elimination(&a, &b);
    assert_eq!(sol.status(), SolutionStatus::Infinite);
    let basis = sol.into_matrix();
    assert_eq!((basis.nrows(), basis.ncols()), (2, 1));
    // Proportional to (2, -1).
    assert!(basis[(2, 1)].abs() > 1e-6);
    assert_abs_diff_eq!(basis[(1, 1)], -2.0 * basis[(2, 1)], epsilon = 1e-12);
    assert!((&a * &basis).is_zero());
}

#[test]
fn scenario_echelon_pivots() {
    let e = m(2, 2, &[0.0, 1.0, 1.0, 0.0]).into_echelon();
    assert_eq!(e.pivots(), &[1, 2]);
}

#[test]
fn inconsistent_system() {
    let a = m(2, 2, &[1.0, 1.0, 2.0, 2.0]);
    let b = Matrix::column_vector(&[1.0, 3.0]);
    let sol = gaussian_elimination(&a, &b);
    assert_eq!(sol.status(), SolutionStatus::NoSolution);
    assert!(sol.into_matrix().is_null());
}

// ── Null algebra ────────────────────────────────────────────────────

#[test]
fn null_algebra() {
    let x = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let null = Matrix::<f64>::null();

    assert_eq!(&null + &x, x);
    assert_eq!(&x + &null, x);
    assert_eq!(&null - &x, x);
    assert!((&null + &null).is_null());
    assert!((&null * &x).is_null());
    assert!((&x * &null).is_null());
    assert_eq!(null, Matrix::null());
    assert!((-&null).is_null());
    assert!(null.transpose().is_null());
}

#[test]
fn shape_mismatch_gives_null() {
    let a = Matrix::<f64>::zeros(2, 3);
    let b = Matrix::<f64>::zeros(3, 2);
    assert!((&a + &b).is_null());
    assert!((&a - &b).is_null());
    assert!((&a * &a).is_null());
    assert!((&a | &b).is_null());
    assert!(a.vcat(&b).is_null());
    assert_ne!(a, b);
    assert_eq!((&a * &b).nrows(), 2);
}

// ── LUP ─────────────────────────────────────────────────────────────

#[test]
fn lup_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for n in [1, 2, 3, 5, 8] {
        let a = random_nonsingular(&mut rng, n);
        let f = a.lup_factors().unwrap();
        assert_eq!(&f.l * &f.u, &f.p * &a, "n = {n}");

        let x = random_matrix(&mut rng, n, 2);
        let b = &a * &x;
        let solved = a.lup_decomp().unwrap().solve(&b);
        assert_eq!(solved, x, "n = {n}");
    }
}

#[test]
fn lup_rejects_bad_input() {
    assert_eq!(
        m(2, 2, &[1.0, 2.0, 2.0, 4.0]).lup_decomp().unwrap_err(),
        LinalgError::Singular
    );
    assert_eq!(
        Matrix::<f64>::zeros(3, 2).lup_decomp().unwrap_err(),
        LinalgError::NotSquare { rows: 3, cols: 2 }
    );
}

// ── Inverse and determinant ─────────────────────────────────────────

#[test]
fn inverse_random() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [1, 2, 4, 6] {
        let a = random_nonsingular(&mut rng, n);
        let inv = a.inv();
        assert_eq!(&a * &inv, Matrix::identity(n), "n = {n}");
        assert_eq!(a.pow(-1), inv);
    }
    assert!(m(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).inv().is_null());
}

#[test]
fn closed_form_det_agrees_with_lup() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in [2, 3] {
        for _ in 0..10 {
            let a = random_nonsingular(&mut rng, n);
            let lup = a.lup_decomp().unwrap().det();
            assert_abs_diff_eq!(a.det(), lup, epsilon = 1e-10);
        }
    }
    for n in 1..=6 {
        assert_abs_diff_eq!(Matrix::<f64>::identity(n).det(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn adjugate_identity() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_nonsingular(&mut rng, 4);
    assert_eq!(&a * &a.adj(), Matrix::identity(4) * a.det());
}

// ── Rank ────────────────────────────────────────────────────────────

#[test]
fn rank_plus_nullity() {
    let mut rng = StdRng::seed_from_u64(11);
    for (rows, cols, rank) in [(4, 4, 2), (3, 5, 3), (5, 3, 1)] {
        let a = &random_matrix(&mut rng, rows, rank) * &random_matrix(&mut rng, rank, cols);
        assert_eq!(a.rank(), rank, "{rows}x{cols}");
        assert_eq!(a.rank() + a.nullity(), cols);
    }
    for n in 1..=5 {
        assert_eq!(Matrix::<f64>::identity(n).rank(), n);
    }
}

// ── Cholesky ────────────────────────────────────────────────────────

#[test]
fn cholesky_reconstructs_spd() {
    let mut rng = StdRng::seed_from_u64(99);
    for n in [1, 3, 6] {
        let a = random_spd(&mut rng, n);
        assert!(a.is_posdef());
        let l = a.cholesky_decomp().unwrap();
        for i in 1..=n {
            for j in i + 1..=n {
                assert_eq!(l[(i, j)], 0.0);
            }
        }
        assert_eq!(&l * &l.transpose(), a, "n = {n}");
    }
}

#[test]
fn cholesky_rejects_indefinite() {
    let a = m(3, 3, &[1.0, 2.0, 0.0, 2.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    assert!(a.is_symmetric());
    assert!(!a.is_posdef());
    assert_eq!(a.cholesky_decomp().unwrap_err(), LinalgError::NotPositiveDefinite);
}

// ── Structure ───────────────────────────────────────────────────────

#[test]
fn blocks_and_concatenation() {
    let a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    let wide = &a | &Matrix::identity(2);
    assert_eq!(wide.submatrix(1, 3, 2, 2), Matrix::identity(2));
    let tall = a.vcat(&a);
    assert_eq!(tall.remove_row_col(3, 0).row(3), a.row(2));

    let mut z = Matrix::<f64>::zeros(3, 3);
    z.set_submatrix(2, 2, &a);
    assert_eq!(z[(3, 3)], 4.0);
    assert_eq!(z.trace(), 5.0);
}

#[test]
fn display_format() {
    let a = Matrix::from_row_major(2, 2, &[1, 20, 300, 4]);
    let s = format!("{a}");
    assert!(s.starts_with("(2, 2)...\n"));
    assert!(s.contains("  1   20  \n"));
    assert_eq!(format!("{}", Matrix::<i32>::null()), "(NULL matrix)\n");
}
