use std::str::{FromStr, SplitWhitespace};

use nalgebra::Point2;

use crate::{
    error::{ConfigError, SplineError},
    knot::{knot_count, KnotVector},
    spline::BSpline,
};

/// Curve parameters as entered on the console: `n d`, then `umin umax`, then `n + d + 1` knots,
/// all separated by whitespace.
/// - `last_index` - index `n` of the last control point,
/// - `order` - order `d` of the spline (degree + 1),
/// - `u_min`, `u_max` - bounds that additionally clamp the sampled parameter range,
/// - `knots` - validated knot vector.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveConfig {
    last_index: usize,
    order: usize,
    u_min: f64,
    u_max: f64,
    knots: KnotVector,
}

impl CurveConfig {
    pub fn new(last_index: usize, order: usize, u_min: f64, u_max: f64, knots: Vec<f64>) -> Result<Self, ConfigError> {
        let knots = KnotVector::new(knots, last_index, order)?;
        Ok(CurveConfig { last_index, order, u_min, u_max, knots })
    }

    /// Reads the configuration from its console form. Tokens after the last knot are ignored.
    /// # Example
    /// ```
    /// use click_spline::CurveConfig;
    ///
    /// let config = CurveConfig::parse("3 4\n0 1\n0 0 0 0 1 1 1 1\n").unwrap();
    ///
    /// assert_eq!(4, config.control_point_count());
    /// assert_eq!(8, config.knot_count());
    /// assert_eq!((0.0, 1.0), config.bounds());
    /// ```
    /// # Errors
    /// Error is returned when input ends early, a token is not a number or the knot vector is
    /// invalid for the given `n` and `d`.
    /// ```
    /// use click_spline::CurveConfig;
    ///
    /// // 4 control points of order 4 need 8 knots.
    /// assert!(CurveConfig::parse("3 4 0 1 0 0 0 0 1 1 1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut tokens = input.split_whitespace();

        let last_index: usize = next_value(&mut tokens, "n")?;
        let order: usize = next_value(&mut tokens, "d")?;
        let u_min: f64 = next_value(&mut tokens, "umin")?;
        let u_max: f64 = next_value(&mut tokens, "umax")?;

        if order == 0 {
            return Err(SplineError::DegenerateDomain("order must be at least 1".to_string()).into());
        }

        let mut knots = Vec::new();
        for _ in 0..knot_count(last_index, order)? {
            knots.push(next_value(&mut tokens, "knot")?);
        }

        CurveConfig::new(last_index, order, u_min, u_max, knots)
    }

    pub fn last_index(&self) -> usize {
        self.last_index
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn control_point_count(&self) -> usize {
        self.last_index + 1
    }

    pub fn knot_count(&self) -> usize {
        self.knots.get_knots().len()
    }

    pub fn knot_vector(&self) -> &KnotVector {
        &self.knots
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.u_min, self.u_max)
    }

    pub fn build(&self, control_points: Vec<Point2<f64>>) -> Result<BSpline, SplineError> {
        BSpline::from_knot_vector(control_points, self.knots.clone())
    }

    /// Samples the curve through `control_points` over the knot domain clamped to `[u_min, u_max]`.
    pub fn sample(&self, control_points: Vec<Point2<f64>>, count: usize) -> Result<Vec<Point2<f64>>, SplineError> {
        self.build(control_points)?
            .sample_within(count, self.u_min, self.u_max)
    }
}

impl FromStr for CurveConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurveConfig::parse(s)
    }
}

fn next_value<T: FromStr>(tokens: &mut SplitWhitespace<'_>, name: &'static str) -> Result<T, ConfigError> {
    let token = tokens.next().ok_or(ConfigError::MissingValue(name))?;
    token.parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    const TRANSCRIPT: &str = "3 4\n-1 2\n0 0 0 0 1 1 1 1\n";

    #[test]
    fn test_parse() {
        let config = CurveConfig::parse(TRANSCRIPT).unwrap();

        assert_eq!(3, config.last_index());
        assert_eq!(4, config.order());
        assert_eq!(4, config.control_point_count());
        assert_eq!(8, config.knot_count());
        assert_eq!((-1.0, 2.0), config.bounds());
        assert_eq!(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0], config.knot_vector().get_knots());
    }

    #[test]
    fn test_from_str() {
        let config: CurveConfig = TRANSCRIPT.parse().unwrap();

        assert_eq!(CurveConfig::parse(TRANSCRIPT).unwrap(), config);
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let config = CurveConfig::parse("1 2 0 1 0 0 1 1 these are ignored");

        assert!(config.is_ok());
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(Err(ConfigError::MissingValue("n")), CurveConfig::parse(""));
        assert_eq!(Err(ConfigError::MissingValue("d")), CurveConfig::parse("3"));
        assert_eq!(Err(ConfigError::MissingValue("umax")), CurveConfig::parse("3 4 0"));
        assert_eq!(Err(ConfigError::MissingValue("knot")), CurveConfig::parse("3 4 0 1 0 0 0"));
    }

    #[test]
    fn test_invalid_numbers() {
        assert_eq!(
            Err(ConfigError::InvalidNumber { name: "d", token: "-4".to_string() }),
            CurveConfig::parse("3 -4")
        );
        assert_eq!(
            Err(ConfigError::InvalidNumber { name: "knot", token: "x".to_string() }),
            CurveConfig::parse("1 2 0 1 0 x 1 1")
        );
    }

    #[test]
    fn test_invalid_knots() {
        let config = CurveConfig::parse("1 2 0 1 0 1 0.5 1");

        assert!(matches!(config, Err(ConfigError::Spline(SplineError::InvalidKnotVector(_)))));
    }

    #[test]
    fn test_knot_count_overflow() {
        let config = CurveConfig::parse(&format!("{} 2 0 1 0 0 1 1", usize::MAX));

        assert!(matches!(config, Err(ConfigError::Spline(SplineError::InvalidKnotVector(_)))));
    }

    #[test]
    fn test_zero_order() {
        let config = CurveConfig::parse("3 0 0 1 0 0 0 0");

        assert!(matches!(config, Err(ConfigError::Spline(SplineError::DegenerateDomain(_)))));
    }

    #[test]
    fn test_sample_with_bounds() {
        let config = CurveConfig::parse("3 4 0.5 1 0 0 0 0 1 1 1 1").unwrap();
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ];

        let curve = config.sample(points.clone(), 2).unwrap();
        assert_eq!(2, curve.len());
        assert_approx_eq!(curve[0].x, 0.5, 1e-12);
        assert_approx_eq!(curve[0].y, 0.75, 1e-12);
        assert_eq!(Point2::new(1.0, 0.0), curve[1]);

        assert!(matches!(
            config.sample(points[..3].to_vec(), 2),
            Err(SplineError::ControlPointCount { expected: 4, found: 3 })
        ));
    }
}
