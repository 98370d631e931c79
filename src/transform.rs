//! Forward point transforms between coordinate systems, evaluated in batches.

use ndarray::Array2;

use crate::error::ProjError;
use crate::proj::pipeline::Pipeline;

/// Forward point transform from a source CRS into a target CRS.
///
/// Points outside the transform's domain come back as NaN instead of
/// failing the batch.
pub trait PointTransform: Send + Sync {
    /// Transform a single point. Out-of-domain points yield `(NaN, NaN)`.
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64);

    /// Batch transform, in place (default: loop, override for SIMD).
    fn transform_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        for c in coords.iter_mut() {
            *c = self.transform_point(c.0, c.1);
        }
        Ok(())
    }
}

impl<T: PointTransform + ?Sized> PointTransform for &T {
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (**self).transform_point(x, y)
    }

    fn transform_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        (**self).transform_batch(coords)
    }
}

impl<T: PointTransform + ?Sized> PointTransform for Box<T> {
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (**self).transform_point(x, y)
    }

    fn transform_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), ProjError> {
        (**self).transform_batch(coords)
    }
}

/// Adapts a plain function `(x, y) -> (x', y')` into a [`PointTransform`].
pub struct FnTransform<F>(pub F);

impl<F> PointTransform for FnTransform<F>
where
    F: Fn(f64, f64) -> (f64, f64) + Send + Sync,
{
    fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (self.0)(x, y)
    }
}

/// Anything that can resolve a point transform into another coordinate system.
pub trait CoordinateSystem {
    type Transform: PointTransform;

    fn transform_to(&self, target: &Self) -> Result<Self::Transform, ProjError>;
}

/// CRS strings: EPSG codes ("EPSG:3857") or PROJ strings.
impl CoordinateSystem for str {
    type Transform = Pipeline;

    fn transform_to(&self, target: &str) -> Result<Pipeline, ProjError> {
        Pipeline::new(self, target)
    }
}

impl CoordinateSystem for String {
    type Transform = Pipeline;

    fn transform_to(&self, target: &String) -> Result<Pipeline, ProjError> {
        Pipeline::new(self, target)
    }
}

/// Shape-preserving batch evaluation of a [`PointTransform`] over 2D arrays.
pub struct TransformEvaluator<'a, T: ?Sized> {
    transform: &'a T,
}

impl<'a, T: PointTransform + ?Sized> TransformEvaluator<'a, T> {
    pub fn new(transform: &'a T) -> Self {
        Self { transform }
    }

    /// Transform every `(xs[i, j], ys[i, j])` pair.
    ///
    /// Outputs have the same shape as the inputs. Mismatched input shapes are
    /// an error; out-of-domain points are NaN.
    pub fn evaluate(
        &self,
        xs: &Array2<f64>,
        ys: &Array2<f64>,
    ) -> Result<(Array2<f64>, Array2<f64>), ProjError> {
        if xs.dim() != ys.dim() {
            return Err(ProjError::InvalidParameter(format!(
                "x and y must have the same shape, got {:?} and {:?}",
                xs.dim(),
                ys.dim()
            )));
        }

        let mut coords: Vec<(f64, f64)> =
            xs.iter().zip(ys.iter()).map(|(&x, &y)| (x, y)).collect();
        self.transform.transform_batch(&mut coords)?;

        let (tx, ty): (Vec<f64>, Vec<f64>) = coords.into_iter().unzip();
        let shape = xs.dim();
        let tx = Array2::from_shape_vec(shape, tx)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;
        let ty = Array2::from_shape_vec(shape, ty)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;
        Ok((tx, ty))
    }

    /// Transform one point through the batch path.
    pub fn evaluate_point(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let mut coords = [(x, y)];
        self.transform.transform_batch(&mut coords)?;
        Ok(coords[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_evaluate_preserves_shape() {
        let shift = FnTransform(|x: f64, y: f64| (x + 1.0, y * 2.0));
        let eval = TransformEvaluator::new(&shift);

        let xs = array![[0.0, 1.0, 2.0], [0.0, 1.0, 2.0]];
        let ys = array![[5.0, 5.0, 5.0], [6.0, 6.0, 6.0]];
        let (tx, ty) = eval.evaluate(&xs, &ys).unwrap();

        assert_eq!(tx.dim(), (2, 3));
        assert_eq!(ty.dim(), (2, 3));
        assert_relative_eq!(tx[(1, 2)], 3.0);
        assert_relative_eq!(ty[(1, 2)], 12.0);
        assert_relative_eq!(ty[(0, 0)], 10.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let ident = FnTransform(|x: f64, y: f64| (x, y));
        let eval = TransformEvaluator::new(&ident);
        let xs = Array2::zeros((2, 3));
        let ys = Array2::zeros((3, 2));
        assert!(matches!(
            eval.evaluate(&xs, &ys),
            Err(ProjError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_nan_is_positional() {
        // NaN only where the input is outside the unit disk
        let disk = FnTransform(|x: f64, y: f64| {
            if x * x + y * y <= 1.0 {
                (x, y)
            } else {
                (f64::NAN, f64::NAN)
            }
        });
        let eval = TransformEvaluator::new(&disk);
        let xs = array![[0.0, 2.0]];
        let ys = array![[0.5, 0.0]];
        let (tx, ty) = eval.evaluate(&xs, &ys).unwrap();
        assert_relative_eq!(tx[(0, 0)], 0.0);
        assert_relative_eq!(ty[(0, 0)], 0.5);
        assert!(tx[(0, 1)].is_nan());
        assert!(ty[(0, 1)].is_nan());
    }

    #[test]
    fn test_boxed_dyn_transform() {
        let boxed: Box<dyn PointTransform> = Box::new(FnTransform(|x: f64, y: f64| (-x, -y)));
        let eval = TransformEvaluator::new(&boxed);
        let (x, y) = eval.evaluate_point(3.0, -4.0).unwrap();
        assert_relative_eq!(x, -3.0);
        assert_relative_eq!(y, 4.0);
    }

    #[test]
    fn test_crs_string_resolves_pipeline() {
        let pipe = "EPSG:4326".transform_to("EPSG:3857").unwrap();
        let (x, y) = pipe.transform_point(0.0, 0.0);
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }
}
