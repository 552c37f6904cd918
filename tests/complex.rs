use corematrix::linalg::{LinalgError, SolutionStatus};
use corematrix::{Complex, Matrix, NormKind};

type C = Complex<f64>;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

const TOL: f64 = 1e-10;

fn assert_complex_near(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{}: {:?} vs {:?}",
        msg,
        a,
        b
    );
}

fn sample() -> Matrix<C> {
    Matrix::from_row_major(2, 2, &[c(2.0, 1.0), c(1.0, -1.0), c(1.0, 0.0), c(3.0, 2.0)])
}

// ── Determinant and inverse ─────────────────────────────────────────

#[test]
fn complex_det_closed_form() {
    let a = Matrix::from_row_major(2, 2, &[c(1.0, 1.0), c(2.0, 0.0), c(0.0, 1.0), c(1.0, -1.0)]);
    // (1+i)(1-i) - 2i = 2 - 2i
    assert_complex_near(a.det(), c(2.0, -2.0), TOL, "det");
}

#[test]
fn complex_det_closed_form_matches_lup() {
    let a = Matrix::from_row_major(
        3,
        3,
        &[
            c(2.0, 1.0), c(0.0, 1.0), c(1.0, 0.0),
            c(1.0, -1.0), c(3.0, 0.0), c(0.0, 2.0),
            c(0.0, 0.0), c(1.0, 1.0), c(4.0, -1.0),
        ],
    );
    let lup = a.lup_decomp().unwrap().det();
    assert_complex_near(a.det(), lup, 1e-9, "3x3 det");
}

#[test]
fn complex_inverse() {
    let a = sample();
    let inv = a.inv();
    assert!(!inv.is_null());
    assert_eq!(&a * &inv, Matrix::identity(2));
    assert_eq!(&inv * &a, Matrix::identity(2));
}

#[test]
fn complex_singular_inverse_is_null() {
    let row = [c(1.0, 1.0), c(2.0, -1.0)];
    let twice = [row[0] * 2.0, row[1] * 2.0];
    let a = Matrix::from_row_major(2, 2, &[row[0], row[1], twice[0], twice[1]]);
    assert!(a.inv().is_null());
    assert_eq!(a.rank(), 1);
    assert_eq!(a.lup_decomp().unwrap_err(), LinalgError::Singular);
}

// ── Linear systems ──────────────────────────────────────────────────

#[test]
fn complex_lup_solve() {
    let a = sample();
    let b = Matrix::column_vector(&[c(5.0, 3.0), c(7.0, 4.0)]);
    let x = a.lup_decomp().unwrap().solve(&b);
    assert_eq!(&a * &x, b);
}

#[test]
fn complex_gaussian_elimination() {
    let a = Matrix::from_row_major(
        3,
        3,
        &[
            c(1.0, 0.0), c(0.0, 1.0), c(2.0, 0.0),
            c(0.0, -1.0), c(3.0, 0.0), c(1.0, 1.0),
            c(2.0, 0.0), c(1.0, -1.0), c(5.0, 0.0),
        ],
    );
    let x_true = Matrix::column_vector(&[c(1.0, 2.0), c(-1.0, 0.0), c(0.5, -0.5)]);
    let b = &a * &x_true;
    let sol = a.solve(&b);
    assert_eq!(sol.status(), SolutionStatus::Unique);
    assert_eq!(sol.into_matrix(), x_true);
}

// ── Conjugates and predicates ───────────────────────────────────────

#[test]
fn conjugate_transpose() {
    let a = sample();
    let h = a.hconj();
    assert_eq!(h[(1, 2)], c(1.0, 0.0));
    assert_eq!(h[(2, 1)], c(1.0, 1.0));
    assert_eq!(a.conj()[(1, 1)], c(2.0, -1.0));
    assert_eq!(a.hconj().hconj(), a);
}

#[test]
fn hermitian_matrix() {
    let a = Matrix::from_row_major(2, 2, &[c(2.0, 0.0), c(1.0, -1.0), c(1.0, 1.0), c(3.0, 0.0)]);
    assert!(a.is_hermitian());
    assert!(a.is_normal());
    assert!(!a.is_symmetric());
    assert!(a.is_complex());
    assert!(!a.is_real());
    // Leading minors 2 and 6 - 2 = 4.
    assert!(a.is_posdef());
}

#[test]
fn cholesky_rejects_complex() {
    let a = Matrix::<C>::identity(3);
    assert_eq!(a.cholesky_decomp().unwrap_err(), LinalgError::NotReal);
    assert_eq!(a.hessenberg_form(true).unwrap_err(), LinalgError::NotReal);
}

// ── Norms ───────────────────────────────────────────────────────────

#[test]
fn complex_norms() {
    let a = Matrix::from_row_major(2, 2, &[c(3.0, 4.0), c(0.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)]);
    assert!((a.norm(NormKind::Max) - 5.0).abs() < TOL);
    assert!((a.norm(NormKind::Frobenius) - 27.0_f64.sqrt()).abs() < TOL);
    assert!((a.norm(NormKind::One) - 6.0).abs() < TOL);
    assert!((a.norm(NormKind::Infinity) - 5.0).abs() < TOL);
}
