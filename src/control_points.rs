use log::debug;
use nalgebra::Point2;

use crate::error::ConfigError;

/// Window size in pixels, used to map cursor positions into normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Viewport { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maps a pixel position (origin top left, y pointing down) to `[-1, 1]` on both axes
    /// with y pointing up.
    /// # Example
    /// ```
    /// use click_spline::Viewport;
    /// use nalgebra::Point2;
    ///
    /// let viewport = Viewport::new(800, 800).unwrap();
    /// assert_eq!(Point2::new(-1.0, 1.0), viewport.to_ndc(0.0, 0.0));
    /// assert_eq!(Point2::new(0.0, 0.0), viewport.to_ndc(400.0, 400.0));
    /// ```
    pub fn to_ndc(&self, x: f64, y: f64) -> Point2<f64> {
        let x_ndc = (x / self.width as f64) * 2.0 - 1.0;
        let y_ndc = -(y / self.height as f64) * 2.0 + 1.0;
        Point2::new(x_ndc, y_ndc)
    }
}

/// Ordered control points collected from clicks. A batch is complete once `batch_size` points
/// were added, after which [ControlPointStore::take_batch] hands them over and starts a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPointStore {
    points: Vec<Point2<f64>>,
    batch_size: Option<usize>,
}

impl ControlPointStore {
    /// Store without a batch size, it is never complete.
    pub fn new() -> Self {
        ControlPointStore::default()
    }

    pub fn with_batch_size(batch_size: usize) -> Self {
        ControlPointStore {
            points: Vec::with_capacity(batch_size),
            batch_size: Some(batch_size),
        }
    }

    pub fn add_point(&mut self, point: Point2<f64>) {
        self.points.push(point);
        debug!("control point {} at ({}, {})", self.points.len(), point.x, point.y);

        if self.is_batch_complete() {
            debug!("batch of {} control points complete", self.points.len());
        }
    }

    /// Converts a click at pixel `(x, y)` into normalized device coordinates and stores it.
    pub fn add_click(&mut self, x: f64, y: f64, viewport: &Viewport) -> Point2<f64> {
        debug!("click at pixel ({}, {})", x, y);
        let point = viewport.to_ndc(x, y);
        self.add_point(point);
        point
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn batch_size(&self) -> Option<usize> {
        self.batch_size
    }

    pub fn is_batch_complete(&self) -> bool {
        match self.batch_size {
            Some(size) => self.points.len() >= size,
            None => false,
        }
    }

    /// Returns the first `batch_size` points once the batch is complete and clears the store.
    pub fn take_batch(&mut self) -> Option<Vec<Point2<f64>>> {
        let size = self.batch_size?;
        if self.points.len() < size {
            return None;
        }

        let mut batch = std::mem::take(&mut self.points);
        batch.truncate(size);
        debug!("took batch of {} control points", batch.len());
        Some(batch)
    }
}
