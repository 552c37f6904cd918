use crate::linalg::{LinalgError, MAX_SWEEPS};
use crate::traits::{lit, FloatScalar, MatrixMut};

/// Householder tridiagonalization of a real symmetric matrix, in place.
///
/// On return:
/// - `a` is replaced by the orthogonal transform Q with `Q^T A Q = T`
/// - `d[0..n]` contains the diagonal of T
/// - `e[1..n]` contains the sub-diagonal (`e[i] = T(i, i-1)`), `e[0] = 0`
///
/// Only the lower triangle of `a` is read.
pub fn tred2<T: FloatScalar>(a: &mut impl MatrixMut<T>, d: &mut [T], e: &mut [T]) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "tred2 requires a square matrix");
    assert!(d.len() >= n && e.len() >= n, "work slices shorter than matrix order");
    if n == 0 {
        return;
    }

    for i in (1..n).rev() {
        let l = i - 1;
        let mut h = T::zero();
        if l > 0 {
            let mut scale = T::zero();
            for k in 0..=l {
                scale = scale + a.get(i, k).abs();
            }
            if scale == T::zero() {
                e[i] = *a.get(i, l);
            } else {
                for k in 0..=l {
                    let v = *a.get(i, k) / scale;
                    *a.get_mut(i, k) = v;
                    h = h + v * v;
                }
                let mut f = *a.get(i, l);
                let mut g = if f > T::zero() { -h.sqrt() } else { h.sqrt() };
                e[i] = scale * g;
                h = h - f * g;
                *a.get_mut(i, l) = f - g;
                f = T::zero();
                for j in 0..=l {
                    *a.get_mut(j, i) = *a.get(i, j) / h;
                    g = T::zero();
                    for k in 0..=j {
                        g = g + *a.get(j, k) * *a.get(i, k);
                    }
                    for k in j + 1..=l {
                        g = g + *a.get(k, j) * *a.get(i, k);
                    }
                    e[j] = g / h;
                    f = f + e[j] * *a.get(i, j);
                }
                let hh = f / (h + h);
                for j in 0..=l {
                    let f = *a.get(i, j);
                    let g = e[j] - hh * f;
                    e[j] = g;
                    for k in 0..=j {
                        let v = *a.get(j, k) - (f * e[k] + g * *a.get(i, k));
                        *a.get_mut(j, k) = v;
                    }
                }
            }
        } else {
            e[i] = *a.get(i, l);
        }
        d[i] = h;
    }

    d[0] = T::zero();
    e[0] = T::zero();

    // Accumulate the transform.
    for i in 0..n {
        if d[i] != T::zero() {
            for j in 0..i {
                let mut g = T::zero();
                for k in 0..i {
                    g = g + *a.get(i, k) * *a.get(k, j);
                }
                for k in 0..i {
                    let v = *a.get(k, j) - g * *a.get(k, i);
                    *a.get_mut(k, j) = v;
                }
            }
        }
        d[i] = *a.get(i, i);
        *a.get_mut(i, i) = T::one();
        for j in 0..i {
            *a.get_mut(j, i) = T::zero();
            *a.get_mut(i, j) = T::zero();
        }
    }
}

/// Implicit-shift QL on a symmetric tridiagonal matrix.
///
/// `d` holds the diagonal and `e[1..n]` the sub-diagonal, as left by
/// [`tred2`]. On success `d` holds the eigenvalues (unsorted) and the
/// columns of `z` the matching orthonormal eigenvectors: pass the Q from
/// `tred2`, or the identity for a matrix that was tridiagonal to begin
/// with. `e` is destroyed.
///
/// An off-diagonal entry is negligible once adding it to the neighbouring
/// diagonal magnitudes leaves them unchanged. Each eigenvalue gets at most
/// [`MAX_SWEEPS`] iterations.
pub fn tqli<T: FloatScalar>(
    d: &mut [T],
    e: &mut [T],
    z: &mut impl MatrixMut<T>,
) -> Result<(), LinalgError> {
    let n = d.len();
    assert!(e.len() >= n, "off-diagonal slice shorter than diagonal");
    if n == 0 {
        return Ok(());
    }
    let two = lit::<T>(2.0);

    for i in 1..n {
        e[i - 1] = e[i];
    }
    e[n - 1] = T::zero();

    for l in 0..n {
        let mut iter = 0;
        loop {
            let mut m = l;
            while m + 1 < n {
                let dd = d[m].abs() + d[m + 1].abs();
                if e[m].abs() + dd == dd {
                    break;
                }
                m += 1;
            }
            if m == l {
                break;
            }
            if iter == MAX_SWEEPS {
                log::warn!("tqli: no convergence after {MAX_SWEEPS} sweeps on eigenvalue {l} of {n}");
                return Err(LinalgError::ConvergenceFailure { sweeps: MAX_SWEEPS });
            }
            iter += 1;

            let mut g = (d[l + 1] - d[l]) / (two * e[l]);
            let mut r = (g * g + T::one()).sqrt();
            let signed_r = if g < T::zero() { -r.abs() } else { r.abs() };
            g = d[m] - d[l] + e[l] / (g + signed_r);
            let (mut s, mut c, mut p) = (T::one(), T::one(), T::zero());

            for i in (l..m).rev() {
                let mut f = s * e[i];
                let b = c * e[i];
                if f.abs() >= g.abs() {
                    c = g / f;
                    r = (c * c + T::one()).sqrt();
                    e[i + 1] = f * r;
                    s = T::one() / r;
                    c = c * s;
                } else {
                    s = f / g;
                    r = (s * s + T::one()).sqrt();
                    e[i + 1] = g * r;
                    c = T::one() / r;
                    s = s * c;
                }
                g = d[i + 1] - p;
                r = (d[i] - g) * s + two * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;

                for k in 0..z.nrows() {
                    f = *z.get(k, i + 1);
                    let zi = *z.get(k, i);
                    *z.get_mut(k, i + 1) = s * zi + c * f;
                    *z.get_mut(k, i) = c * zi - s * f;
                }
            }

            d[l] = d[l] - p;
            e[l] = g;
            e[m] = T::zero();
        }
    }

    Ok(())
}
