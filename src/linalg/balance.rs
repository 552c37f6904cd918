use crate::traits::{lit, FloatScalar, MatrixMut};

/// Balance a square matrix in place with Osborne's algorithm, radix 2.
///
/// Repeatedly applies diagonal similarity transforms `D^-1 A D` that bring
/// the off-diagonal norms of each row and its matching column closer
/// together, until a full sweep changes nothing. The factors are powers of
/// two, so no rounding error is introduced. Eigenvalues are preserved; the
/// transform is undone on the eigenvectors by [`balbak`].
///
/// When `scale` is supplied, each applied factor is multiplied into the
/// entry for its row. Pass a slice of ones to record the full transform.
pub fn balance_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>, mut scale: Option<&mut [T]>) {
    let n = a.nrows();
    let radix = lit::<T>(2.0);
    let sqrdx = radix * radix;
    let threshold = lit::<T>(0.95);

    let mut sweeps = 0usize;
    let mut done = false;
    while !done {
        done = true;
        sweeps += 1;
        for i in 0..n {
            let mut r = T::zero();
            let mut c = T::zero();
            for j in (0..n).filter(|&j| j != i) {
                c = c + a.get(j, i).abs();
                r = r + a.get(i, j).abs();
            }
            if c == T::zero() || r == T::zero() {
                continue;
            }

            let mut g = r / radix;
            let mut f = T::one();
            let s = c + r;
            while c < g {
                f = f * radix;
                c = c * sqrdx;
            }
            g = r * radix;
            while c > g {
                f = f / radix;
                c = c / sqrdx;
            }

            if (c + r) / f < threshold * s {
                done = false;
                let g = T::one() / f;
                if let Some(s) = scale.as_deref_mut() {
                    if let Some(e) = s.get_mut(i) {
                        *e = *e * f;
                    }
                }
                for j in 0..n {
                    let v = *a.get(i, j);
                    *a.get_mut(i, j) = v * g;
                }
                for j in 0..n {
                    let v = *a.get(j, i);
                    *a.get_mut(j, i) = v * f;
                }
            }
        }
    }
    log::trace!("balanced {n}x{n} matrix in {sweeps} sweeps");
}

/// Back-transform eigenvectors of a balanced matrix: row `i` of `z` is
/// multiplied by `scale[i]`.
pub fn balbak<T: FloatScalar>(z: &mut impl MatrixMut<T>, scale: &[T]) {
    for (i, &s) in scale.iter().enumerate().take(z.nrows()) {
        for j in 0..z.ncols() {
            let v = *z.get(i, j);
            *z.get_mut(i, j) = v * s;
        }
    }
}
