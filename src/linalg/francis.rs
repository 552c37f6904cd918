//! Francis double-shift QR on an upper Hessenberg matrix.
//!
//! The sweeps walk their deflation and shift indices down past zero, so the
//! loops run on signed indices through [`Signed`].

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use num_complex::Complex;

use super::{LinalgError, Result, MAX_SWEEPS};
use crate::traits::{lit, FloatScalar, MatrixMut};

/// Signed-index view over a matrix.
struct Signed<'a, T, M> {
    m: &'a mut M,
    _marker: PhantomData<T>,
}

impl<'a, T: Copy, M: MatrixMut<T>> Signed<'a, T, M> {
    fn new(m: &'a mut M) -> Self {
        Self {
            m,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn at(&self, i: isize, j: isize) -> T {
        *self.m.get(i as usize, j as usize)
    }

    #[inline]
    fn set(&mut self, i: isize, j: isize, v: T) {
        *self.m.get_mut(i as usize, j as usize) = v;
    }
}

#[inline]
fn sign<T: FloatScalar>(a: T, b: T) -> T {
    if b > T::zero() {
        a.abs()
    } else {
        -a.abs()
    }
}

/// Sum of moduli over the Hessenberg band (on and above the first sub-diagonal).
fn hessenberg_norm<T: FloatScalar>(a: &impl MatrixMut<T>) -> T {
    let n = a.nrows();
    let mut anorm = T::zero();
    for i in 0..n {
        for j in i.saturating_sub(1)..n {
            anorm = anorm + a.get(i, j).abs();
        }
    }
    anorm
}

fn no_convergence(kernel: &str, n: usize) -> LinalgError {
    log::warn!("{kernel}: no convergence after {MAX_SWEEPS} sweeps on {n}x{n} Hessenberg matrix");
    LinalgError::ConvergenceFailure { sweeps: MAX_SWEEPS }
}

/// Eigenvalues of an upper Hessenberg matrix.
///
/// `a` is destroyed. Entries below the first sub-diagonal are ignored
/// (and overwritten). The eigenvalues are returned in the order they
/// deflate, which is not sorted. A sub-diagonal entry is negligible once
/// adding it to the neighbouring diagonal magnitudes leaves them unchanged.
pub fn hqr<T: FloatScalar>(a: &mut impl MatrixMut<T>) -> Result<Vec<Complex<T>>> {
    let n = a.nrows();
    let anorm = hessenberg_norm(a);
    let mut a = Signed::new(a);
    let mut wr = vec![Complex::new(T::zero(), T::zero()); n];

    let half = lit::<T>(0.5);
    let (shift_a, shift_b) = (lit::<T>(0.75), lit::<T>(-0.4375));
    let zero = T::zero();

    let (mut p, mut q, mut r) = (zero, zero, zero);
    let mut t = zero;
    let (mut s, mut w): (T, T);
    let (mut x, mut y, mut z): (T, T, T);

    let mut nn = n as isize - 1;
    while nn >= 0 {
        let mut its = 0;
        loop {
            let mut l = nn;
            while l >= 1 {
                s = a.at(l - 1, l - 1).abs() + a.at(l, l).abs();
                if s == zero {
                    s = anorm;
                }
                if a.at(l, l - 1).abs() + s == s {
                    break;
                }
                l -= 1;
            }

            x = a.at(nn, nn);
            if l == nn {
                wr[nn as usize] = Complex::new(x + t, zero);
                nn -= 1;
            } else {
                y = a.at(nn - 1, nn - 1);
                w = a.at(nn, nn - 1) * a.at(nn - 1, nn);
                if l == nn - 1 {
                    p = half * (y - x);
                    q = p * p + w;
                    z = q.abs().sqrt();
                    x = x + t;
                    if q >= zero {
                        z = p + sign(z, p);
                        wr[nn as usize] = Complex::new(if z != zero { x - w / z } else { x + z }, zero);
                        wr[nn as usize - 1] = Complex::new(x + z, zero);
                    } else {
                        wr[nn as usize] = Complex::new(x + p, z);
                        wr[nn as usize - 1] = Complex::new(x + p, -z);
                    }
                    nn -= 2;
                } else {
                    if its == MAX_SWEEPS {
                        return Err(no_convergence("hqr", n));
                    }
                    if its == 10 || its == 20 {
                        t = t + x;
                        for i in 0..=nn {
                            a.set(i, i, a.at(i, i) - x);
                        }
                        s = a.at(nn, nn - 1).abs() + a.at(nn - 1, nn - 2).abs();
                        x = shift_a * s;
                        y = x;
                        w = shift_b * s * s;
                    }
                    its += 1;

                    let mut m = nn - 2;
                    while m >= l {
                        z = a.at(m, m);
                        r = x - z;
                        s = y - z;
                        p = (r * s - w) / a.at(m + 1, m) + a.at(m, m + 1);
                        q = a.at(m + 1, m + 1) - z - r - s;
                        r = a.at(m + 2, m + 1);
                        s = p.abs() + q.abs() + r.abs();
                        p = p / s;
                        q = q / s;
                        r = r / s;
                        if m == l {
                            break;
                        }
                        let u = a.at(m, m - 1).abs() * (q.abs() + r.abs());
                        let v = p.abs() * (a.at(m - 1, m - 1).abs() + z.abs() + a.at(m + 1, m + 1).abs());
                        if u + v == v {
                            break;
                        }
                        m -= 1;
                    }

                    for i in m + 2..=nn {
                        a.set(i, i - 2, zero);
                        if i != m + 2 {
                            a.set(i, i - 3, zero);
                        }
                    }

                    for k in m..nn {
                        if k != m {
                            p = a.at(k, k - 1);
                            q = a.at(k + 1, k - 1);
                            r = zero;
                            if k != nn - 1 {
                                r = a.at(k + 2, k - 1);
                            }
                            x = p.abs() + q.abs() + r.abs();
                            if x != zero {
                                p = p / x;
                                q = q / x;
                                r = r / x;
                            }
                        }
                        s = sign((p * p + q * q + r * r).sqrt(), p);
                        if s == zero {
                            continue;
                        }
                        if k == m {
                            if l != m {
                                a.set(k, k - 1, -a.at(k, k - 1));
                            }
                        } else {
                            a.set(k, k - 1, -s * x);
                        }
                        p = p + s;
                        x = p / s;
                        y = q / s;
                        z = r / s;
                        q = q / p;
                        r = r / p;
                        for j in k..=nn {
                            p = a.at(k, j) + q * a.at(k + 1, j);
                            if k != nn - 1 {
                                p = p + r * a.at(k + 2, j);
                                a.set(k + 2, j, a.at(k + 2, j) - p * z);
                            }
                            a.set(k + 1, j, a.at(k + 1, j) - p * y);
                            a.set(k, j, a.at(k, j) - p * x);
                        }
                        let mmin = nn.min(k + 3);
                        for i in l..=mmin {
                            p = x * a.at(i, k) + y * a.at(i, k + 1);
                            if k != nn - 1 {
                                p = p + z * a.at(i, k + 2);
                                a.set(i, k + 2, a.at(i, k + 2) - p * r);
                            }
                            a.set(i, k + 1, a.at(i, k + 1) - p * q);
                            a.set(i, k, a.at(i, k) - p);
                        }
                    }
                }
            }

            if l + 1 >= nn {
                break;
            }
        }
    }

    Ok(wr)
}

/// Eigenvalues and eigenvectors of an upper Hessenberg matrix.
///
/// On entry `z` holds the accumulated reduction transform (from
/// [`eltran`](super::eltran), or the identity if `a` was already Hessenberg).
/// On success `a` is destroyed and `z` holds the eigenvectors of the
/// original matrix, unnormalised. A real eigenvalue owns its column. For a
/// conjugate pair stored at `k, k + 1` with positive imaginary part first,
/// columns `k` and `k + 1` hold the real and imaginary parts of the
/// eigenvector of eigenvalue `k`.
///
/// Negligibility is judged relative to machine epsilon: a sub-diagonal entry
/// is dropped once `|a(l, l-1)| <= eps * (|a(l-1, l-1)| + |a(l, l)|)`.
/// Exceptional shifts are applied after 10 and 20 iterations on one
/// eigenvalue, and the 30th is a failure.
pub fn hqr2<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    z_out: &mut impl MatrixMut<T>,
) -> Result<Vec<Complex<T>>> {
    let n = a.nrows();
    if (z_out.nrows(), z_out.ncols()) != (n, n) {
        return Err(LinalgError::DimensionMismatch {
            expected: (n, n),
            got: (z_out.nrows(), z_out.ncols()),
        });
    }
    let ni = n as isize;
    let eps = T::epsilon();
    let anorm = hessenberg_norm(a);
    let mut a = Signed::new(a);
    let mut zz = Signed::new(z_out);
    let mut wri = vec![Complex::new(T::zero(), T::zero()); n];

    let half = lit::<T>(0.5);
    let two = lit::<T>(2.0);
    let (shift_a, shift_b) = (lit::<T>(0.75), lit::<T>(-0.4375));
    let zero = T::zero();
    let one = T::one();

    let (mut p, mut q, mut r) = (zero, zero, zero);
    let (mut s, mut t, mut z) = (zero, zero, zero);
    let (mut w, mut x, mut y): (T, T, T);

    let mut nn = ni - 1;
    while nn >= 0 {
        let mut its = 0;
        loop {
            let mut l = nn;
            while l > 0 {
                s = a.at(l - 1, l - 1).abs() + a.at(l, l).abs();
                if s == zero {
                    s = anorm;
                }
                if a.at(l, l - 1).abs() <= eps * s {
                    a.set(l, l - 1, zero);
                    break;
                }
                l -= 1;
            }

            x = a.at(nn, nn);
            if l == nn {
                a.set(nn, nn, x + t);
                wri[nn as usize] = Complex::new(x + t, zero);
                nn -= 1;
            } else {
                y = a.at(nn - 1, nn - 1);
                w = a.at(nn, nn - 1) * a.at(nn - 1, nn);
                if l == nn - 1 {
                    p = half * (y - x);
                    q = p * p + w;
                    z = q.abs().sqrt();
                    x = x + t;
                    a.set(nn, nn, x);
                    a.set(nn - 1, nn - 1, y + t);
                    if q >= zero {
                        z = p + sign(z, p);
                        wri[nn as usize - 1] = Complex::new(x + z, zero);
                        wri[nn as usize] = Complex::new(if z != zero { x - w / z } else { x + z }, zero);

                        x = a.at(nn, nn - 1);
                        s = x.abs() + z.abs();
                        p = x / s;
                        q = z / s;
                        r = (p * p + q * q).sqrt();
                        p = p / r;
                        q = q / r;
                        for j in nn - 1..ni {
                            z = a.at(nn - 1, j);
                            a.set(nn - 1, j, q * z + p * a.at(nn, j));
                            a.set(nn, j, q * a.at(nn, j) - p * z);
                        }
                        for i in 0..=nn {
                            z = a.at(i, nn - 1);
                            a.set(i, nn - 1, q * z + p * a.at(i, nn));
                            a.set(i, nn, q * a.at(i, nn) - p * z);
                        }
                        for i in 0..ni {
                            z = zz.at(i, nn - 1);
                            zz.set(i, nn - 1, q * z + p * zz.at(i, nn));
                            zz.set(i, nn, q * zz.at(i, nn) - p * z);
                        }
                    } else {
                        wri[nn as usize] = Complex::new(x + p, -z);
                        wri[nn as usize - 1] = Complex::new(x + p, z);
                    }
                    nn -= 2;
                } else {
                    if its == MAX_SWEEPS {
                        return Err(no_convergence("hqr2", n));
                    }
                    if its == 10 || its == 20 {
                        t = t + x;
                        for i in 0..=nn {
                            a.set(i, i, a.at(i, i) - x);
                        }
                        s = a.at(nn, nn - 1).abs() + a.at(nn - 1, nn - 2).abs();
                        x = shift_a * s;
                        y = x;
                        w = shift_b * s * s;
                    }
                    its += 1;

                    let mut m = nn - 2;
                    while m >= l {
                        z = a.at(m, m);
                        r = x - z;
                        s = y - z;
                        p = (r * s - w) / a.at(m + 1, m) + a.at(m, m + 1);
                        q = a.at(m + 1, m + 1) - z - r - s;
                        r = a.at(m + 2, m + 1);
                        s = p.abs() + q.abs() + r.abs();
                        p = p / s;
                        q = q / s;
                        r = r / s;
                        if m == l {
                            break;
                        }
                        let u = a.at(m, m - 1).abs() * (q.abs() + r.abs());
                        let v = p.abs() * (a.at(m - 1, m - 1).abs() + z.abs() + a.at(m + 1, m + 1).abs());
                        if u <= eps * v {
                            break;
                        }
                        m -= 1;
                    }

                    for i in m..nn - 1 {
                        a.set(i + 2, i, zero);
                        if i != m {
                            a.set(i + 2, i - 1, zero);
                        }
                    }

                    for k in m..nn {
                        if k != m {
                            p = a.at(k, k - 1);
                            q = a.at(k + 1, k - 1);
                            r = zero;
                            if k + 1 != nn {
                                r = a.at(k + 2, k - 1);
                            }
                            x = p.abs() + q.abs() + r.abs();
                            if x != zero {
                                p = p / x;
                                q = q / x;
                                r = r / x;
                            }
                        }
                        s = sign((p * p + q * q + r * r).sqrt(), p);
                        if s == zero {
                            continue;
                        }
                        if k == m {
                            if l != m {
                                a.set(k, k - 1, -a.at(k, k - 1));
                            }
                        } else {
                            a.set(k, k - 1, -s * x);
                        }
                        p = p + s;
                        x = p / s;
                        y = q / s;
                        z = r / s;
                        q = q / p;
                        r = r / p;
                        for j in k..ni {
                            p = a.at(k, j) + q * a.at(k + 1, j);
                            if k + 1 != nn {
                                p = p + r * a.at(k + 2, j);
                                a.set(k + 2, j, a.at(k + 2, j) - p * z);
                            }
                            a.set(k + 1, j, a.at(k + 1, j) - p * y);
                            a.set(k, j, a.at(k, j) - p * x);
                        }
                        let mmin = nn.min(k + 3);
                        for i in 0..=mmin {
                            p = x * a.at(i, k) + y * a.at(i, k + 1);
                            if k + 1 != nn {
                                p = p + z * a.at(i, k + 2);
                                a.set(i, k + 2, a.at(i, k + 2) - p * r);
                            }
                            a.set(i, k + 1, a.at(i, k + 1) - p * q);
                            a.set(i, k, a.at(i, k) - p);
                        }
                        for i in 0..ni {
                            p = x * zz.at(i, k) + y * zz.at(i, k + 1);
                            if k + 1 != nn {
                                p = p + z * zz.at(i, k + 2);
                                zz.set(i, k + 2, zz.at(i, k + 2) - p * r);
                            }
                            zz.set(i, k + 1, zz.at(i, k + 1) - p * q);
                            zz.set(i, k, zz.at(i, k) - p);
                        }
                    }
                }
            }

            if l + 1 >= nn {
                break;
            }
        }
    }

    if anorm == zero {
        return Ok(wri);
    }

    // Back-substitute for the eigenvectors of the upper triangular form.
    for nn in (0..ni).rev() {
        p = wri[nn as usize].re;
        q = wri[nn as usize].im;
        let na = nn - 1;

        if q == zero {
            let mut m = nn;
            a.set(nn, nn, one);
            for i in (0..nn).rev() {
                w = a.at(i, i) - p;
                r = zero;
                for j in m..=nn {
                    r = r + a.at(i, j) * a.at(j, nn);
                }
                if wri[i as usize].im < zero {
                    z = w;
                    s = r;
                } else {
                    m = i;
                    if wri[i as usize].im == zero {
                        t = w;
                        if t == zero {
                            t = eps * anorm;
                        }
                        a.set(i, nn, -r / t);
                    } else {
                        x = a.at(i, i + 1);
                        y = a.at(i + 1, i);
                        let dr = wri[i as usize].re - p;
                        q = dr * dr + wri[i as usize].im * wri[i as usize].im;
                        t = (x * s - z * r) / q;
                        a.set(i, nn, t);
                        if x.abs() > z.abs() {
                            a.set(i + 1, nn, (-r - w * t) / x);
                        } else {
                            a.set(i + 1, nn, (-s - y * t) / z);
                        }
                    }
                    t = a.at(i, nn).abs();
                    if eps * t * t > one {
                        for j in i..=nn {
                            a.set(j, nn, a.at(j, nn) / t);
                        }
                    }
                }
            }
        } else if q < zero {
            let mut m = na;
            if a.at(nn, na).abs() > a.at(na, nn).abs() {
                a.set(na, na, q / a.at(nn, na));
                a.set(na, nn, -(a.at(nn, nn) - p) / a.at(nn, na));
            } else {
                let c = Complex::new(zero, -a.at(na, nn)) / Complex::new(a.at(na, na) - p, q);
                a.set(na, na, c.re);
                a.set(na, nn, c.im);
            }
            a.set(nn, na, zero);
            a.set(nn, nn, one);

            for i in (0..nn - 1).rev() {
                w = a.at(i, i) - p;
                let (mut ra, mut sa) = (zero, zero);
                for j in m..=nn {
                    ra = ra + a.at(i, j) * a.at(j, na);
                    sa = sa + a.at(i, j) * a.at(j, nn);
                }
                if wri[i as usize].im < zero {
                    z = w;
                    r = ra;
                    s = sa;
                } else {
                    m = i;
                    if wri[i as usize].im == zero {
                        let c = Complex::new(-ra, -sa) / Complex::new(w, q);
                        a.set(i, na, c.re);
                        a.set(i, nn, c.im);
                    } else {
                        x = a.at(i, i + 1);
                        y = a.at(i + 1, i);
                        let dr = wri[i as usize].re - p;
                        let di = wri[i as usize].im;
                        let mut vr = dr * dr + di * di - q * q;
                        let vi = two * q * dr;
                        if vr == zero && vi == zero {
                            vr = eps * anorm * (w.abs() + q.abs() + x.abs() + y.abs() + z.abs());
                        }
                        let c = Complex::new(x * r - z * ra + q * sa, x * s - z * sa - q * ra)
                            / Complex::new(vr, vi);
                        a.set(i, na, c.re);
                        a.set(i, nn, c.im);
                        if x.abs() > z.abs() + q.abs() {
                            a.set(i + 1, na, (-ra - w * a.at(i, na) + q * a.at(i, nn)) / x);
                            a.set(i + 1, nn, (-sa - w * a.at(i, nn) - q * a.at(i, na)) / x);
                        } else {
                            let c = Complex::new(-r - y * a.at(i, na), -s - y * a.at(i, nn))
                                / Complex::new(z, q);
                            a.set(i + 1, na, c.re);
                            a.set(i + 1, nn, c.im);
                        }
                    }
                }
                t = a.at(i, na).abs().max(a.at(i, nn).abs());
                if eps * t * t > one {
                    for j in i..=nn {
                        a.set(j, na, a.at(j, na) / t);
                        a.set(j, nn, a.at(j, nn) / t);
                    }
                }
            }
        }
    }

    // Eigenvectors of the original matrix: Z = Z * (upper triangle of A).
    for j in (0..ni).rev() {
        for i in 0..ni {
            z = zero;
            for k in 0..=j {
                z = z + zz.at(i, k) * a.at(k, j);
            }
            zz.set(i, j, z);
        }
    }

    Ok(wri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Matrix;

    fn sorted_re(mut v: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
        v.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
        v
    }

    #[test]
    fn hqr_triangular() {
        let mut a = Matrix::from_row_major(3, 3, &[3.0_f64, 1.0, 2.0, 0.0, -1.0, 4.0, 0.0, 0.0, 2.0]);
        let ev = sorted_re(hqr(&mut a).unwrap());
        assert!((ev[0].re + 1.0).abs() < 1e-12);
        assert!((ev[1].re - 2.0).abs() < 1e-12);
        assert!((ev[2].re - 3.0).abs() < 1e-12);
        assert!(ev.iter().all(|e| e.im == 0.0));
    }

    #[test]
    fn hqr_rotation_pair() {
        let mut a = Matrix::from_row_major(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
        let ev = hqr(&mut a).unwrap();
        assert_eq!(ev.len(), 2);
        assert!(ev.iter().all(|e| e.re.abs() < 1e-12 && (e.im.abs() - 1.0).abs() < 1e-12));
        assert!((ev[0].im + ev[1].im).abs() < 1e-12);
    }

    #[test]
    fn hqr_hessenberg_4x4() {
        // Companion-style Hessenberg matrix of (x-1)(x-2)(x-3)(x-4).
        let mut a = Matrix::from_row_major(
            4,
            4,
            &[
                10.0_f64, -35.0, 50.0, -24.0, //
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0,
            ],
        );
        let ev = sorted_re(hqr(&mut a).unwrap());
        for (k, e) in ev.iter().enumerate() {
            assert!((e.re - (k as f64 + 1.0)).abs() < 1e-8, "{e}");
            assert!(e.im.abs() < 1e-8);
        }
    }

    #[test]
    fn hqr2_rotation_vectors() {
        let mut a = Matrix::from_row_major(2, 2, &[0.0_f64, -1.0, 1.0, 0.0]);
        let orig = a.clone();
        let mut z = Matrix::identity(2);
        let ev = hqr2(&mut a, &mut z).unwrap();
        assert!((ev[0].im - 1.0).abs() < 1e-12);
        assert!((ev[1].im + 1.0).abs() < 1e-12);

        // v = Z[:, 0] + i Z[:, 1] belongs to ev[0].
        for i in 1..=2 {
            let mut av = Complex::new(0.0, 0.0);
            for j in 1..=2 {
                av += Complex::new(z[(j, 1)], z[(j, 2)]) * orig[(i, j)];
            }
            let lv = ev[0] * Complex::new(z[(i, 1)], z[(i, 2)]);
            assert!((av - lv).norm() < 1e-12);
        }
    }

    #[test]
    fn hqr2_real_vectors() {
        let orig = Matrix::from_row_major(3, 3, &[4.0_f64, 1.0, 2.0, 1.0, 3.0, 0.0, 0.0, 2.0, 1.0]);
        let mut a = orig.clone();
        let mut z = Matrix::identity(3);
        let ev = hqr2(&mut a, &mut z).unwrap();
        for (k, e) in ev.iter().enumerate() {
            if e.im != 0.0 {
                continue;
            }
            let v = z.column(k + 1);
            let residual = &orig * &v - &v * e.re;
            assert!(residual.frobenius_norm() < 1e-9 * v.frobenius_norm().max(1.0));
        }
    }

    #[test]
    fn hqr2_checks_vector_shape() {
        let mut a = Matrix::from_row_major(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let mut z = Matrix::identity(3);
        assert_eq!(
            hqr2(&mut a, &mut z).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: (2, 2),
                got: (3, 3)
            }
        );
    }

    #[test]
    fn empty_input() {
        let mut a = Matrix::<f64>::null();
        assert!(hqr(&mut a).unwrap().is_empty());
    }
}
