use crate::error::SplineError;

/// Non-decreasing sequence of knot values for a B-spline with control points indexed `0..=last_index`
/// and given `order` (degree + 1). The number of knots is always `last_index + order + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector {
    knots: Vec<f64>,
    last_index: usize,
    order: usize,
}

impl KnotVector {
    /// The most generic constructor of [KnotVector]. Knots are validated, not sorted.
    /// # Example
    /// ```
    /// use click_spline::KnotVector;
    ///
    /// let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 2.0, 2.0, 2.0], 3, 3);
    /// assert!(knots.is_ok());
    /// ```
    /// # Errors
    /// Error is returned when the number of knots is not `last_index + order + 1`, when knots are
    /// not finite or when they decrease anywhere.
    /// ```
    /// use click_spline::KnotVector;
    ///
    /// // 4 control points of order 3 need 7 knots.
    /// let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 2.0, 2.0], 3, 3);
    /// assert!(knots.is_err());
    /// ```
    pub fn new(knots: Vec<f64>, last_index: usize, order: usize) -> Result<Self, SplineError> {
        validate_knots(&knots, last_index, order)?;
        Ok(KnotVector { knots, last_index, order })
    }

    /// Open uniform knot vector on `[0, 1]`: `order` repeated knots at each end and evenly spaced
    /// interior knots. The resulting curve starts at the first and ends at the last control point.
    /// # Example
    /// ```
    /// use click_spline::KnotVector;
    ///
    /// let knots = KnotVector::clamped(3, 4).unwrap();
    /// assert_eq!(knots.get_knots(), &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    /// ```
    pub fn clamped(last_index: usize, order: usize) -> Result<Self, SplineError> {
        if order == 0 || order - 1 > last_index {
            return Err(SplineError::DegenerateDomain(format!(
                "order {} is not within 1..=n + 1 for n = {}",
                order, last_index
            )));
        }

        let interior = last_index - (order - 1);
        let segments = (interior + 1) as f64;
        let mut knots = Vec::with_capacity(knot_count(last_index, order)?);
        knots.extend(std::iter::repeat(0.0).take(order));
        knots.extend((1..=interior).map(|k| k as f64 / segments));
        knots.extend(std::iter::repeat(1.0).take(order));

        KnotVector::new(knots, last_index, order)
    }

    /// Uniform knot vector `0, 1, 2, ...`. The curve domain is `[order - 1, last_index + 1]`.
    pub fn uniform(last_index: usize, order: usize) -> Result<Self, SplineError> {
        let knots = (0..knot_count(last_index, order)?).map(|k| k as f64).collect();
        KnotVector::new(knots, last_index, order)
    }

    /// Parameter range `[knots[order - 1], knots[last_index + 1]]` on which every basis function of
    /// the requested order has full support.
    pub fn domain(&self) -> (f64, f64) {
        knot_domain(&self.knots, self.last_index, self.order)
    }

    pub fn is_in_domain(&self, t: f64) -> bool {
        let (min, max) = self.domain();
        min <= t && t <= max
    }

    /// Index `j` of the knot interval containing `t`, see [knot_span].
    pub fn find_span(&self, t: f64) -> Option<usize> {
        knot_span(&self.knots, self.last_index, t)
    }

    pub fn get_knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn get_last_index(&self) -> usize {
        self.last_index
    }

    pub fn get_order(&self) -> usize {
        self.order
    }

    pub fn get_degree(&self) -> usize {
        self.order - 1
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.knots
    }
}

/// Number of knots `last_index + order + 1`, or an error when it does not fit into `usize`.
pub(crate) fn knot_count(last_index: usize, order: usize) -> Result<usize, SplineError> {
    last_index
        .checked_add(order)
        .and_then(|count| count.checked_add(1))
        .ok_or_else(|| {
            SplineError::InvalidKnotVector(format!(
                "n = {} and d = {} need more knots than can be addressed",
                last_index, order
            ))
        })
}

pub(crate) fn validate_knots(knots: &[f64], last_index: usize, order: usize) -> Result<(), SplineError> {
    if order == 0 {
        return Err(SplineError::DegenerateDomain("order must be at least 1".to_string()));
    }

    let expected = knot_count(last_index, order)?;
    if knots.len() != expected {
        return Err(SplineError::InvalidKnotVector(format!(
            "expected {} knots for n = {} and order {}, got {}",
            expected,
            last_index,
            order,
            knots.len()
        )));
    }

    if knots.iter().any(|k| !k.is_finite()) {
        return Err(SplineError::InvalidKnotVector(
            "knot vector contains non-finite (NaN or Infinity) values".to_string(),
        ));
    }

    if let Some(index) = knots.windows(2).position(|w| w[1] < w[0]) {
        return Err(SplineError::InvalidKnotVector(format!(
            "knot vector is not non-decreasing, knot {} ({}) is less than knot {} ({})",
            index + 1,
            knots[index + 1],
            index,
            knots[index]
        )));
    }

    Ok(())
}

pub(crate) fn knot_domain(knots: &[f64], last_index: usize, order: usize) -> (f64, f64) {
    (knots[order - 1], knots[last_index + 1])
}

/// Checks that the curve is well formed and returns its parameter domain.
pub(crate) fn validate_domain(knots: &[f64], last_index: usize, order: usize) -> Result<(f64, f64), SplineError> {
    validate_knots(knots, last_index, order)?;

    if order > last_index + 1 {
        return Err(SplineError::DegenerateDomain(format!(
            "order {} needs at least {} control points, got {}",
            order,
            order,
            last_index + 1
        )));
    }

    let (min, max) = knot_domain(knots, last_index, order);
    if max <= min {
        return Err(SplineError::DegenerateDomain(format!(
            "knots[{}] = {} is not less than knots[{}] = {}",
            order - 1,
            min,
            last_index + 1,
            max
        )));
    }
    Ok((min, max))
}

/// Index `j <= last_index` with `knots[j] <= t < knots[j + 1]`. At `t == knots[last_index + 1]`
/// the last non-empty interval is closed on the right so the upper end of the domain is reachable.
/// Returns `None` when `t` lies outside `[knots[0], knots[last_index + 1]]`.
pub(crate) fn knot_span(knots: &[f64], last_index: usize, t: f64) -> Option<usize> {
    let range = &knots[..=last_index + 1];
    let upper = range.partition_point(|&knot| knot <= t);
    if upper == 0 {
        return None;
    }

    let span = upper - 1;
    if span <= last_index {
        return Some(span);
    }

    if t == range[last_index + 1] {
        let below = range.partition_point(|&knot| knot < t);
        if below > 0 {
            return Some(below - 1);
        }
    }
    None
}
