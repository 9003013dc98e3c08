//! Triangulated 2-D outline of the floating body and the slicing that turns
//! it into an [`AreaProfile`].

use crate::domain::profile::AreaProfile;
use crate::error::SimulationError;

/// Upper bound on slices per profile.
pub const MAX_BANDS: usize = 100_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Point-in-triangle by edge sign test, inclusive of edges.
    pub fn contains(&self, p: Point) -> bool {
        let d1 = edge_sign(p, self.a, self.b);
        let d2 = edge_sign(p, self.b, self.c);
        let d3 = edge_sign(p, self.c, self.a);

        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

        !(has_neg && has_pos)
    }

    fn points(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }
}

#[inline]
fn edge_sign(p1: Point, p2: Point, p3: Point) -> f64 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Union of triangles. Overlaps are fine: area is measured by point
/// membership, so overlapping regions count once.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    triangles: Vec<Triangle>,
}

impl Shape {
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, SimulationError> {
        if triangles.is_empty() {
            return Err(SimulationError::InvalidProfile(
                "shape needs at least one triangle".to_string(),
            ));
        }

        let finite = triangles
            .iter()
            .flat_map(|t| t.points())
            .all(|p| p.x.is_finite() && p.y.is_finite());
        if !finite {
            return Err(SimulationError::InvalidProfile(
                "shape has a non-finite vertex".to_string(),
            ));
        }

        Ok(Self { triangles })
    }

    /// Regular polygon approximation of a circle centred on the origin, as a
    /// fan of `segments` triangles.
    pub fn circle(radius: f64, segments: u32) -> Result<Self, SimulationError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimulationError::InvalidParameters(format!(
                "circle radius must be positive, got {}",
                radius
            )));
        }
        if segments < 3 {
            return Err(SimulationError::InvalidParameters(format!(
                "circle needs at least 3 segments, got {}",
                segments
            )));
        }

        let center = Point::new(0.0, 0.0);
        let step = std::f64::consts::TAU / segments as f64;
        let triangles = (0..segments)
            .map(|i| {
                let start = i as f64 * step;
                let end = (i + 1) as f64 * step;
                Triangle::new(
                    center,
                    Point::new(start.cos() * radius, start.sin() * radius),
                    Point::new(end.cos() * radius, end.sin() * radius),
                )
            })
            .collect();

        Self::new(triangles)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in self.triangles.iter().flat_map(|t| t.points()) {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds
    }

    pub fn contains(&self, p: Point) -> bool {
        self.triangles.iter().any(|t| t.contains(p))
    }

    /// Area of the shape inside the horizontal band `[y_lo, y_hi]`, measured
    /// on a midpoint grid of `samples_per_axis²` points spanning the shape's
    /// width.
    ///
    /// The grid stands in for random Monte Carlo sampling: same estimator
    /// shape, but the result is reproducible for a given input.
    pub fn band_area(&self, y_lo: f64, y_hi: f64, samples_per_axis: u32) -> f64 {
        let bounds = self.bounds();
        let width = bounds.max_x - bounds.min_x;
        let height = y_hi - y_lo;
        if samples_per_axis == 0 || width <= 0.0 || height <= 0.0 {
            return 0.0;
        }

        let n = samples_per_axis as f64;
        let mut inside = 0u64;
        for iy in 0..samples_per_axis {
            let y = y_lo + (iy as f64 + 0.5) / n * height;
            for ix in 0..samples_per_axis {
                let x = bounds.min_x + (ix as f64 + 0.5) / n * width;
                if self.contains(Point::new(x, y)) {
                    inside += 1;
                }
            }
        }

        inside as f64 / (n * n) * width * height
    }

    /// Sweep bands of `slice_height` from the top of the shape downwards and
    /// accumulate their areas. Entry `i` of the result sits at height
    /// `i * slice_height` and holds the area of the top `i` bands.
    pub fn area_profile(
        &self,
        slice_height: f64,
        samples_per_axis: u32,
    ) -> Result<AreaProfile, SimulationError> {
        if !(slice_height.is_finite() && slice_height > 0.0) {
            return Err(SimulationError::InvalidParameters(format!(
                "slice height must be positive, got {}",
                slice_height
            )));
        }
        if samples_per_axis == 0 {
            return Err(SimulationError::InvalidParameters(
                "samples per axis must be at least 1".to_string(),
            ));
        }

        let bounds = self.bounds();
        // Tolerance keeps an exact multiple from growing an empty extra band.
        let bands = ((bounds.max_y - bounds.min_y) / slice_height - 1e-9).ceil().max(1.0);
        if bands > MAX_BANDS as f64 {
            return Err(SimulationError::InvalidParameters(format!(
                "slice height {} cuts the shape into more than {} bands",
                slice_height, MAX_BANDS
            )));
        }
        let bands = bands as usize;

        let mut cumulative = Vec::with_capacity(bands + 1);
        cumulative.push(0.0);
        let mut total = 0.0;
        for i in 0..bands {
            let band_top = bounds.max_y - i as f64 * slice_height;
            total += self.band_area(band_top - slice_height, band_top, samples_per_axis);
            cumulative.push(total);
        }

        log::debug!(
            "sliced shape of {} triangles into {} bands",
            self.triangles.len(),
            cumulative.len() - 1
        );

        AreaProfile::build(
            cumulative
                .into_iter()
                .enumerate()
                .map(|(i, area)| (i as f64 * slice_height, area)),
        )
    }
}
