use faer_ext::*;
use ndarray::{Array1, Array2, ArrayView2};

pub struct SVD {
    u: Array2<f64>,
    s: Array1<f64>,
    vt: Array2<f64>,
}

impl SVD {
    /// Thin SVD; faer returns `V`, which is transposed on the way out.
    pub fn new(array: &ArrayView2<f64>) -> Self {
        let faer_mat = array.view().into_faer();
        let svd = faer_mat.thin_svd();
        let u = svd.u().into_ndarray().to_owned();
        let s_diag = svd.s_diagonal();
        let s: Array1<f64> = (0..s_diag.nrows()).map(|i| s_diag.read(i)).collect();
        let vt = svd.v().into_ndarray().t().to_owned();

        SVD { u, s, vt }
    }

    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    pub fn s(&self) -> &Array1<f64> {
        &self.s
    }

    pub fn vt(&self) -> &Array2<f64> {
        &self.vt
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn test_faer_singular_values() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let svd = SVD::new(&a.view());

        assert_abs_diff_eq!(svd.s()[0], 5.4649857, epsilon = 1e-6);
        assert_abs_diff_eq!(svd.s()[1], 0.3659662, epsilon = 1e-6);
        assert_eq!(svd.vt().shape(), &[2, 2]);
    }
}
