extern crate click_spline;

use click_spline::{BSpline, KnotVector};
use nalgebra::Point2;

fn main() {

    let control_points = vec![
        Point2::new(-0.8, -0.6),
        Point2::new(-0.4, 0.7),
        Point2::new(0.1, -0.2),
        Point2::new(0.5, 0.8),
        Point2::new(0.9, -0.5),
    ];

    let knots = KnotVector::clamped(control_points.len() - 1, 4).unwrap();
    let spline = BSpline::from_knot_vector(control_points, knots).unwrap();

    let number_of_steps = 40;

    println!("t;x;y");
    for (t, point) in spline.parameters(number_of_steps).iter().zip(spline.sample(number_of_steps)) {
        println!("{:.3};{:.4};{:.4}", t, point.x, point.y);
    }
}
