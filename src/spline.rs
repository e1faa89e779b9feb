use log::trace;
use nalgebra::{Point2, Vector2};

use crate::{
    basis::{cox_de_boor, BasisTable},
    error::SplineError,
    knot::{validate_domain, KnotVector},
};

/// B-spline curve in the plane defined by `last_index + 1` control points, a knot vector and
/// the order of the basis functions (degree + 1).
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline {
    control_points: Vec<Point2<f64>>,
    knots: Vec<f64>,
    order: usize,
    min_t: f64,
    max_t: f64,
}

impl BSpline {
    /// Validates the curve eagerly, nothing is evaluated before the whole configuration is known
    /// to be usable.
    /// # Example
    /// ```
    /// use click_spline::BSpline;
    /// use nalgebra::Point2;
    ///
    /// let points = vec![Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(1.0, 1.0)];
    /// let spline = BSpline::new(points, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0], 3).unwrap();
    ///
    /// assert_eq!((0.0, 1.0), spline.domain());
    /// assert_eq!(Point2::new(0.25, 0.75), spline.evaluate(0.5).unwrap());
    /// ```
    pub fn new(control_points: Vec<Point2<f64>>, knots: Vec<f64>, order: usize) -> Result<Self, SplineError> {
        if control_points.is_empty() {
            return Err(SplineError::DegenerateDomain("at least one control point is required".to_string()));
        }

        let last_index = control_points.len() - 1;
        let (min_t, max_t) = validate_domain(&knots, last_index, order)?;

        Ok(BSpline { control_points, knots, order, min_t, max_t })
    }

    pub fn from_knot_vector(control_points: Vec<Point2<f64>>, knots: KnotVector) -> Result<Self, SplineError> {
        let expected = knots.get_last_index() + 1;
        if control_points.len() != expected {
            return Err(SplineError::ControlPointCount { expected, found: control_points.len() });
        }
        let order = knots.get_order();
        BSpline::new(control_points, knots.into_inner(), order)
    }

    pub fn last_index(&self) -> usize {
        self.control_points.len() - 1
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn degree(&self) -> usize {
        self.order - 1
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn control_points(&self) -> &[Point2<f64>] {
        &self.control_points
    }

    /// Parameter range `[knots[order - 1], knots[last_index + 1]]` the curve is defined on.
    pub fn domain(&self) -> (f64, f64) {
        (self.min_t, self.max_t)
    }

    pub fn is_in_domain(&self, t: f64) -> bool {
        self.min_t <= t && t <= self.max_t
    }

    pub fn basis(&self, t: f64) -> Result<BasisTable, SplineError> {
        self.check_domain(t)?;
        Ok(cox_de_boor(t, self.last_index(), self.order, &self.knots))
    }

    pub fn evaluate(&self, t: f64) -> Result<Point2<f64>, SplineError> {
        self.check_domain(t)?;
        Ok(self.point_at(t))
    }

    /// Evaluates every parameter or none: a single value outside of the domain fails the batch.
    pub fn batch_evaluate(&self, parameters: &[f64]) -> Result<Vec<Point2<f64>>, SplineError> {
        if let Some(t) = parameters.iter().find(|t| !self.is_in_domain(**t)) {
            return Err(self.out_of_domain(*t));
        }
        Ok(parameters.iter().map(|t| self.point_at(*t)).collect())
    }

    /// `count` evenly spaced parameters covering the whole domain, both ends included.
    pub fn parameters(&self, count: usize) -> Vec<f64> {
        spaced_parameters(self.min_t, self.max_t, count)
    }

    pub fn sample(&self, count: usize) -> Vec<Point2<f64>> {
        self.parameters(count).into_iter().map(|t| self.point_at(t)).collect()
    }

    /// Samples the part of the domain that also lies within `[u_min, u_max]`.
    pub fn sample_within(&self, count: usize, u_min: f64, u_max: f64) -> Result<Vec<Point2<f64>>, SplineError> {
        let min = self.min_t.max(u_min);
        let max = self.max_t.min(u_max);
        if !(max > min) {
            return Err(SplineError::DegenerateDomain(format!(
                "bounds [{}, {}] leave nothing of the curve domain [{}, {}]",
                u_min, u_max, self.min_t, self.max_t
            )));
        }
        trace!(
            "clamped sampling domain [{}, {}] to [{}, {}]",
            self.min_t,
            self.max_t,
            min,
            max
        );

        Ok(spaced_parameters(min, max, count)
            .into_iter()
            .map(|t| self.point_at(t))
            .collect())
    }

    fn point_at(&self, t: f64) -> Point2<f64> {
        let table = cox_de_boor(t, self.last_index(), self.order, &self.knots);
        weighted_sum(&self.control_points, &table)
    }

    fn check_domain(&self, t: f64) -> Result<(), SplineError> {
        if self.is_in_domain(t) {
            Ok(())
        } else {
            Err(self.out_of_domain(t))
        }
    }

    fn out_of_domain(&self, t: f64) -> SplineError {
        SplineError::ParameterOutOfDomain { t, min: self.min_t, max: self.max_t }
    }
}

/// Samples `sample_count` points of the curve through `control_points` (exactly `last_index + 1`
/// of them) at evenly spaced parameters over the domain `[knots[order - 1], knots[last_index + 1]]`.
///
/// Everything is validated before the first point is computed, on error no points are produced.
/// # Example
/// ```
/// use click_spline::sample_curve;
/// use nalgebra::Point2;
///
/// let points = [Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0)];
/// let curve = sample_curve(&points, 1, 2, &[0.0, 0.0, 1.0, 1.0], 3).unwrap();
///
/// assert_eq!(vec![Point2::new(-1.0, 0.0), Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)], curve);
/// ```
pub fn sample_curve(
    control_points: &[Point2<f64>],
    last_index: usize,
    order: usize,
    knots: &[f64],
    sample_count: usize,
) -> Result<Vec<Point2<f64>>, SplineError> {
    let (min, max) = validate_domain(knots, last_index, order)?;
    if control_points.len() != last_index + 1 {
        return Err(SplineError::ControlPointCount {
            expected: last_index + 1,
            found: control_points.len(),
        });
    }
    trace!("sampling {} points over [{}, {}]", sample_count, min, max);

    Ok(spaced_parameters(min, max, sample_count)
        .into_iter()
        .map(|t| weighted_sum(control_points, &cox_de_boor(t, last_index, order, knots)))
        .collect())
}

/// Interleaved `x, y` coordinates as uploaded to a vertex buffer.
pub fn flatten_points(points: &[Point2<f64>]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

fn weighted_sum(control_points: &[Point2<f64>], table: &BasisTable) -> Point2<f64> {
    let sum = control_points
        .iter()
        .zip(table.weights())
        .filter(|(_, weight)| *weight != 0.0)
        .fold(Vector2::zeros(), |sum, (point, weight)| sum + point.coords * weight);
    Point2::from(sum)
}

fn spaced_parameters(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            let mut parameters: Vec<f64> = (0..count).map(|k| min + step * k as f64).collect();
            parameters[count - 1] = max;
            parameters
        }
    }
}
