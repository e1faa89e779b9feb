use nalgebra::DMatrix;

use crate::{
    error::SplineError,
    knot::{knot_span, validate_knots},
};

/// Cox-de Boor recursion table for a single parameter value.
///
/// Row `i` holds the basis functions of order `i + 1` (degree `i`), column `j` the function
/// belonging to control point `j`. The last row weights the control points of the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisTable {
    t: f64,
    table: DMatrix<f64>,
}

impl BasisTable {
    pub fn parameter(&self) -> f64 {
        self.t
    }

    pub fn order(&self) -> usize {
        self.table.nrows()
    }

    pub fn control_point_count(&self) -> usize {
        self.table.ncols()
    }

    /// Value of `N_{j,i}(t)`, `None` when `i` or `j` is out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.table.get((i, j)).copied()
    }

    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.order() {
            return None;
        }
        Some(self.table.row(i).iter().copied().collect())
    }

    /// Basis values of the requested order, used as control point weights.
    /// A table always has at least one row.
    pub fn final_row(&self) -> Vec<f64> {
        self.weights().collect()
    }

    pub fn row_sum(&self, i: usize) -> Option<f64> {
        if i >= self.order() {
            return None;
        }
        Some(self.table.row(i).sum())
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.table
    }

    pub(crate) fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.order() - 1;
        (0..self.control_point_count()).map(move |j| self.table[(last, j)])
    }
}

/// Builds the Cox-de Boor table of `order` rows for the control points `0..=last_index` at `t`.
///
/// Zero denominators yield a zero coefficient. In the last column the upper neighbour
/// `table[i - 1][j + 1]` does not exist, so its term is left out of the sum altogether.
///
/// # Example
/// ```
/// use click_spline::evaluate_basis;
/// use assert_approx_eq::assert_approx_eq;
///
/// let knots = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
/// let table = evaluate_basis(0.5, 3, 4, &knots).unwrap();
///
/// assert_approx_eq!(table.get(3, 0).unwrap(), 0.125, 1e-12);
/// assert_approx_eq!(table.get(3, 1).unwrap(), 0.375, 1e-12);
/// ```
pub fn evaluate_basis(t: f64, last_index: usize, order: usize, knots: &[f64]) -> Result<BasisTable, SplineError> {
    validate_knots(knots, last_index, order)?;
    Ok(cox_de_boor(t, last_index, order, knots))
}

/// Table construction for knots that are already validated.
pub(crate) fn cox_de_boor(t: f64, last_index: usize, order: usize, knots: &[f64]) -> BasisTable {
    let columns = last_index + 1;
    let mut table = DMatrix::<f64>::zeros(order, columns);

    if let Some(span) = knot_span(knots, last_index, t) {
        table[(0, span)] = 1.0;
    }

    for i in 1..order {
        for j in 0..columns {
            let a = ratio(t - knots[j], knots[j + i] - knots[j]);
            if j + 1 > last_index {
                table[(i, j)] = a * table[(i - 1, j)];
            } else {
                let b = ratio(knots[j + i + 1] - t, knots[j + i + 1] - knots[j + 1]);
                table[(i, j)] = a * table[(i - 1, j)] + b * table[(i - 1, j + 1)];
            }
        }
    }

    BasisTable { t, table }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn random_knots(rng: &mut StdRng, count: usize) -> Vec<f64> {
        let mut knots: Vec<f64> = (0..count).map(|_| rng.gen_range(0.0..10.0)).collect();
        knots.sort_by(|a, b| a.total_cmp(b));
        knots
    }

    #[test]
    fn shape() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let table = evaluate_basis(2.5, 2, 3, &knots).unwrap();

        assert_eq!(3, table.order());
        assert_eq!(3, table.control_point_count());
        assert_eq!(2.5, table.parameter());
        assert_eq!((3, 3), table.as_matrix().shape());
    }

    #[test]
    fn wrong_number_of_knots() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0];
        let table = evaluate_basis(2.5, 2, 3, &knots);

        assert!(matches!(table, Err(SplineError::InvalidKnotVector(_))));
    }

    #[test]
    fn order_overflow() {
        let table = evaluate_basis(0.5, 0, usize::MAX, &[0.0, 1.0]);
        assert!(matches!(table, Err(SplineError::InvalidKnotVector(_))));

        let table = evaluate_basis(0.5, usize::MAX, 1, &[0.0, 1.0]);
        assert!(matches!(table, Err(SplineError::InvalidKnotVector(_))));
    }

    #[test]
    fn out_of_range_lookups() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let table = evaluate_basis(2.5, 2, 3, &knots).unwrap();

        assert_eq!(None, table.get(3, 0));
        assert_eq!(None, table.get(0, 3));
        assert_eq!(None, table.row(3));
        assert_eq!(None, table.row_sum(3));
        assert_eq!(Some(1.0), table.get(0, 2));
        assert_eq!(table.row(2).unwrap(), table.final_row());
    }

    #[test]
    fn zero_order() {
        let knots = [0.0, 1.0, 2.0];
        let table = evaluate_basis(0.5, 2, 0, &knots);

        assert!(matches!(table, Err(SplineError::DegenerateDomain(_))));
    }

    #[test]
    fn indicator_row() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0];
        let table = evaluate_basis(1.5, 3, 1, &knots).unwrap();

        assert_eq!(vec![0.0, 1.0, 0.0, 0.0], table.row(0).unwrap());
        assert_eq!(1.0, table.row_sum(0).unwrap());
    }

    #[test]
    fn indicator_row_is_a_partition() {
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..200 {
            let last_index = rng.gen_range(1..8);
            let knots = random_knots(&mut rng, last_index + 2);
            let (min, max) = (knots[0], knots[last_index + 1]);
            let t = rng.gen_range(min..max);
            if knots.contains(&t) {
                continue;
            }

            let table = evaluate_basis(t, last_index, 1, &knots).unwrap();
            assert_eq!(1.0, table.row_sum(0).unwrap());
            assert!(table.row(0).unwrap().iter().all(|v| *v == 0.0 || *v == 1.0));
        }
    }

    #[test]
    fn clamped_cubic_bernstein() {
        let knots = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
        let eps = 1e-12;

        let table = evaluate_basis(0.5, 3, 4, &knots).unwrap();
        let expected = [0.125, 0.375, 0.375, 0.125];
        for (j, value) in expected.iter().enumerate() {
            assert_approx_eq!(table.get(3, j).unwrap(), *value, eps);
        }

        let t: f64 = 0.3;
        let table = evaluate_basis(t, 3, 4, &knots).unwrap();
        let s = 1.0 - t;
        let expected = [s.powi(3), 3.0 * t * s.powi(2), 3.0 * t.powi(2) * s, t.powi(3)];
        for (j, value) in expected.iter().enumerate() {
            assert_approx_eq!(table.get(3, j).unwrap(), *value, eps);
        }
    }

    #[test]
    fn clamped_cubic_ends() {
        let knots = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];

        let table = evaluate_basis(0.0, 3, 4, &knots).unwrap();
        assert_eq!(vec![1.0, 0.0, 0.0, 0.0], table.final_row());

        let table = evaluate_basis(1.0, 3, 4, &knots).unwrap();
        assert_eq!(vec![0.0, 0.0, 0.0, 1.0], table.final_row());
    }

    #[test]
    fn uniform_quadratic_recursion() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let eps = 1e-12;
        let table = evaluate_basis(2.5, 2, 3, &knots).unwrap();

        assert_eq!(vec![0.0, 0.0, 1.0], table.row(0).unwrap());

        let expected = [[0.0, 0.5, 0.5], [0.125, 0.75, 0.125]];
        for (i, row) in expected.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                assert_approx_eq!(table.get(i + 1, j).unwrap(), *value, eps);
            }
        }
    }

    #[test]
    fn partition_of_unity_inside_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let eps = 1e-9;

        for _ in 0..500 {
            let order = rng.gen_range(1..6);
            let last_index = rng.gen_range(order - 1..order + 6);
            let knots = random_knots(&mut rng, last_index + order + 1);
            let (min, max) = (knots[order - 1], knots[last_index + 1]);
            if max - min < 1e-6 {
                continue;
            }

            let t = rng.gen_range(min..max);
            let table = evaluate_basis(t, last_index, order, &knots).unwrap();
            assert_approx_eq!(table.row_sum(order - 1).unwrap(), 1.0, eps);
            assert!(table.final_row().iter().all(|w| *w >= -eps));
        }
    }

    #[test]
    fn truncated_last_column() {
        // At t = knots[last_index + 1] the last column only carries its a-term.
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let eps = 1e-12;
        let table = evaluate_basis(3.0, 2, 3, &knots).unwrap();

        assert_eq!(vec![0.0, 0.0, 1.0], table.row(0).unwrap());
        assert_eq!(vec![0.0, 0.0, 1.0], table.row(1).unwrap());
        assert_approx_eq!(table.get(2, 0).unwrap(), 0.0, eps);
        assert_approx_eq!(table.get(2, 1).unwrap(), 0.5, eps);
        assert_approx_eq!(table.get(2, 2).unwrap(), (3.0 - knots[2]) / (knots[4] - knots[2]) * table.get(1, 2).unwrap(), eps);
        assert_approx_eq!(table.row_sum(2).unwrap(), 1.0, eps);
    }

    #[test]
    fn below_domain_row_is_incomplete() {
        // t = 1.5 lies inside the support of row 1 but before the domain of order 3, which
        // starts at knots[2] = 2. The missing weight belongs to a function with no control point.
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let eps = 1e-12;
        let table = evaluate_basis(1.5, 2, 3, &knots).unwrap();

        assert_approx_eq!(table.row_sum(1).unwrap(), 1.0, eps);
        assert_approx_eq!(table.get(2, 0).unwrap(), 0.75, eps);
        assert_approx_eq!(table.get(2, 1).unwrap(), 0.125, eps);
        assert_approx_eq!(table.get(2, 2).unwrap(), 0.0, eps);
        assert_approx_eq!(table.row_sum(2).unwrap(), 0.875, eps);
    }

    #[test]
    fn outside_knots_is_all_zero() {
        let knots = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

        let table = evaluate_basis(3.5, 2, 3, &knots).unwrap();
        assert_eq!(0.0, table.as_matrix().sum());

        let table = evaluate_basis(-1.0, 2, 3, &knots).unwrap();
        assert_eq!(0.0, table.as_matrix().sum());
    }

    #[test]
    fn repeated_knots_do_not_divide_by_zero() {
        let knots = [0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0];
        let table = evaluate_basis(1.0, 3, 3, &knots).unwrap();

        assert!(table.as_matrix().iter().all(|v| v.is_finite()));
        assert_approx_eq!(table.row_sum(2).unwrap(), 1.0, 1e-12);
    }
}
