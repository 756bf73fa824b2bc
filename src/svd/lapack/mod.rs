use anyhow::anyhow;
use ndarray::{s, Array1, Array2, ArrayView2};
use nshare::{IntoNalgebra, IntoNdarray2};

pub struct SVD {
    u: Option<Array2<f64>>,
    s: Option<Array1<f64>>,
    vt: Option<Array2<f64>>,
}

impl SVD {
    pub fn new() -> Self {
        SVD {
            u: None,
            s: None,
            vt: None,
        }
    }

    /// LAPACK returns the full decomposition; only the thin part is kept.
    pub fn compute(&mut self, x: ArrayView2<f64>) -> anyhow::Result<()> {
        let (m, n) = x.dim();
        let k = m.min(n);

        let svd = nalgebra_lapack::SVD::new(x.to_owned().into_nalgebra())
            .ok_or_else(|| anyhow!("LAPACK SVD failed for {} x {} matrix", m, n))?;

        self.s = Some(Array1::from(svd.singular_values.as_slice()[..k].to_vec()));
        self.u = Some(svd.u.into_ndarray2().slice(s![.., ..k]).to_owned());
        self.vt = Some(svd.vt.into_ndarray2().slice(s![..k, ..]).to_owned());

        Ok(())
    }

    pub fn u(&self) -> Option<&Array2<f64>> {
        self.u.as_ref()
    }

    pub fn s(&self) -> Option<&Array1<f64>> {
        self.s.as_ref()
    }

    pub fn vt(&self) -> Option<&Array2<f64>> {
        self.vt.as_ref()
    }

    pub fn into_parts(self) -> anyhow::Result<(Array2<f64>, Array1<f64>, Array2<f64>)> {
        match (self.u, self.s, self.vt) {
            (Some(u), Some(s), Some(vt)) => Ok((u, s, vt)),
            _ => Err(anyhow!("SVD has not been computed yet")),
        }
    }
}

impl Default for SVD {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn test_simple_svd() {
        let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let mut svd = SVD::new();
        svd.compute(a.view()).unwrap();
        let (u, s, vt) = svd.into_parts().unwrap();

        assert_eq!(u.shape(), &[3, 2]);
        assert_eq!(s.len(), 2);
        assert_eq!(vt.shape(), &[2, 2]);

        let reconstructed = u.dot(&Array2::from_diag(&s)).dot(&vt);
        for (r, x) in reconstructed.iter().zip(a.iter()) {
            assert_abs_diff_eq!(*r, *x, epsilon = 1e-8);
        }
    }
}
