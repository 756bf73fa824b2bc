use anyhow::{anyhow, bail};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use nshare::{IntoNalgebra, IntoNdarray2};

const MAX_ITERATIONS: usize = 0; // unbounded

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

    pub fn compute(&mut self, x: ArrayView2<f64>) -> anyhow::Result<()> {
        let (m, n) = x.dim();
        if m == 0 || n == 0 {
            bail!("SVD of an empty {} x {} matrix", m, n);
        }

        let svd = nalgebra::linalg::SVD::try_new(
            x.to_owned().into_nalgebra(),
            true,
            true,
            f64::EPSILON,
            MAX_ITERATIONS,
        )
        .ok_or_else(|| anyhow!("SVD did not converge for {} x {} matrix", m, n))?;

        let u = svd.u.ok_or_else(|| anyhow!("SVD returned no U"))?;
        let vt = svd.v_t.ok_or_else(|| anyhow!("SVD returned no Vt"))?;
        let s = svd.singular_values.as_slice();

        let mut order: Vec<usize> = (0..s.len()).collect();
        order.sort_by(|&a, &b| s[b].total_cmp(&s[a]));

        self.u = Some(u.into_ndarray2().select(Axis(1), &order));
        self.s = Some(order.iter().map(|&i| s[i]).collect());
        self.vt = Some(vt.into_ndarray2().select(Axis(0), &order));

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

    // Reconstruct the original matrix
    pub fn reconstruct(&self) -> Option<Array2<f64>> {
        match (self.u(), self.s(), self.vt()) {
            (Some(u), Some(s), Some(vt)) => {
                let s_diag = Array2::from_diag(s);
                Some(u.dot(&s_diag).dot(vt))
            }
            _ => None,
        }
    }
}

impl Default for SVD {
    fn default() -> Self {
        Self::new()
    }
}
