//! B-spline curves for control points collected by clicking in a window.
//! The crate only computes points, drawing them is left to the caller.
//!
//! Basis functions are evaluated with the Cox-de Boor recursion over a knot vector of
//! `n + d + 1` values, where `n` is the index of the last control point and `d` the order
//! (degree + 1) of the spline.
//!
//! # Example
//! ```
//! use click_spline::{sample_curve, ControlPointStore, Viewport};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let viewport = Viewport::new(800, 800).unwrap();
//! let mut store = ControlPointStore::with_batch_size(4);
//! store.add_click(400.0, 400.0, &viewport);
//! store.add_click(400.0, 0.0, &viewport);
//! store.add_click(800.0, 0.0, &viewport);
//! store.add_click(800.0, 400.0, &viewport);
//!
//! let points = store.take_batch().unwrap();
//! let knots = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
//! let curve = sample_curve(&points, 3, 4, &knots, 20).unwrap();
//!
//! assert_eq!(20, curve.len());
//! assert_eq!(points[0], curve[0]);
//! assert_eq!(points[3], curve[19]);
//! assert_approx_eq!(curve[0].x, 0.0, 1e-12);
//! ```

mod basis;
mod config;
mod control_points;
mod error;
mod knot;
mod spline;

pub use basis::{evaluate_basis, BasisTable};
pub use config::CurveConfig;
pub use control_points::{ControlPointStore, Viewport};
pub use error::{ConfigError, SplineError};
pub use knot::KnotVector;
pub use spline::{flatten_points, sample_curve, BSpline};
