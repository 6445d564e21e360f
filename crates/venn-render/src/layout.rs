//! Circle placement and label anchors for 2-way and 3-way diagrams.
//!
//! Geometry lives in a unit space with `y` pointing up and the base radius
//! equal to 1. The SVG writer maps it onto the canvas.

use serde::{Deserialize, Serialize};
use venn_core::{Region, RegionCountMap};

/// Ratio between largest and smallest non-zero 3-way region above which
/// circles are drawn at equal size.
pub const IMBALANCE_RATIO: u64 = 10;

const MIN_RADIUS: f64 = 0.6;
const LABEL_GAP: f64 = 0.12;

/// Point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, increasing upward.
    pub y: f64,
}

impl Point {
    const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn offset_from(self, origin: Point, distance: f64) -> Point {
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        let norm = (dx * dx + dy * dy).sqrt();
        if norm < 1e-12 {
            return self;
        }
        Point::new(self.x + dx / norm * distance, self.y + dy / norm * distance)
    }

    fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// One set's circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center.
    pub center: Point,
    /// Radius.
    pub radius: f64,
}

/// Placed circles plus anchors for every count and set label.
#[derive(Debug, Clone, PartialEq)]
pub struct VennLayout {
    /// Circles in set order.
    pub circles: Vec<Circle>,
    /// Anchor for each region's count, in canonical region order.
    pub region_anchors: Vec<(Region, Point)>,
    /// Anchor for each set's name.
    pub set_anchors: Vec<Point>,
    /// Whether circles were forced to equal size.
    pub normalized: bool,
}

impl VennLayout {
    /// Axis aligned bounds `(min, max)` covering circles and set labels.
    pub fn bounds(&self) -> (Point, Point) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for circle in &self.circles {
            min.x = min.x.min(circle.center.x - circle.radius);
            min.y = min.y.min(circle.center.y - circle.radius);
            max.x = max.x.max(circle.center.x + circle.radius);
            max.y = max.y.max(circle.center.y + circle.radius);
        }
        for anchor in &self.set_anchors {
            min.x = min.x.min(anchor.x);
            min.y = min.y.min(anchor.y - LABEL_GAP);
            max.x = max.x.max(anchor.x);
            max.y = max.y.max(anchor.y + LABEL_GAP);
        }
        (min, max)
    }
}

/// Whether a 3-way count map is unbalanced enough to draw equal circles.
pub fn is_unbalanced(map: &RegionCountMap) -> bool {
    if map.set_count() != 3 {
        return false;
    }
    let counts: Vec<u64> = map.iter().map(|(_, count)| count).collect();
    let max = counts.iter().copied().max().unwrap_or(0);
    let min_nonzero = counts.iter().copied().filter(|count| *count > 0).min();
    match min_nonzero {
        Some(min) => max > IMBALANCE_RATIO * min,
        None => false,
    }
}

fn radii(map: &RegionCountMap, normalized: bool) -> Vec<f64> {
    let totals: Vec<u64> = map
        .names()
        .iter()
        .map(|name| map.set_total(name).unwrap_or(0))
        .collect();
    let largest = totals.iter().copied().max().unwrap_or(0);
    if normalized || largest == 0 {
        return vec![1.0; totals.len()];
    }
    totals
        .iter()
        .map(|total| (*total as f64 / largest as f64).sqrt().clamp(MIN_RADIUS, 1.0))
        .collect()
}

/// Computes the layout for a 2-set or 3-set count map.
pub fn compute_layout(map: &RegionCountMap) -> VennLayout {
    let normalized = is_unbalanced(map);
    let radii = radii(map, normalized);
    let centers: Vec<Point> = if map.set_count() == 2 {
        vec![Point::new(-0.55, 0.0), Point::new(0.55, 0.0)]
    } else {
        vec![
            Point::new(-0.55, 0.32),
            Point::new(0.55, 0.32),
            Point::new(0.0, -0.63),
        ]
    };
    let circles: Vec<Circle> = centers
        .iter()
        .zip(&radii)
        .map(|(center, radius)| Circle {
            center: *center,
            radius: *radius,
        })
        .collect();
    let centroid = Point::new(
        centers.iter().map(|c| c.x).sum::<f64>() / centers.len() as f64,
        centers.iter().map(|c| c.y).sum::<f64>() / centers.len() as f64,
    );

    let region_anchors = Region::all(map.set_count())
        .into_iter()
        .map(|region| (region, region_anchor(region, &circles)))
        .collect();

    let set_anchors = circles
        .iter()
        .map(|circle| {
            if map.set_count() == 2 {
                Point::new(circle.center.x, circle.center.y - circle.radius - LABEL_GAP)
            } else {
                circle
                    .center
                    .offset_from(centroid, circle.radius + LABEL_GAP)
            }
        })
        .collect();

    VennLayout {
        circles,
        region_anchors,
        set_anchors,
        normalized,
    }
}

impl Circle {
    /// Signed distance from the circle's edge, positive inside.
    fn depth(&self, point: Point) -> f64 {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        self.radius - (dx * dx + dy * dy).sqrt()
    }
}

/// How far `point` sits from leaving `region`: inside every member circle
/// and outside every other one. Negative when the point is not in the region.
fn region_margin(region: Region, circles: &[Circle], point: Point) -> f64 {
    circles
        .iter()
        .enumerate()
        .map(|(idx, circle)| {
            let depth = circle.depth(point);
            if region.contains(idx) {
                depth
            } else {
                -depth
            }
        })
        .fold(f64::INFINITY, f64::min)
}

/// Best point on a square grid of `steps` cells per side around `center`.
fn grid_search(
    region: Region,
    circles: &[Circle],
    center: Point,
    half_width: f64,
    steps: u32,
) -> (Point, f64) {
    let step = 2.0 * half_width / f64::from(steps);
    let mut best = (center, region_margin(region, circles, center));
    for i in 0..=steps {
        for j in 0..=steps {
            let point = Point::new(
                center.x - half_width + f64::from(i) * step,
                center.y - half_width + f64::from(j) * step,
            );
            let margin = region_margin(region, circles, point);
            if margin > best.1 {
                best = (point, margin);
            }
        }
    }
    best
}

/// Anchor for a region's count: the point deepest inside the region, so the
/// label stays inside exactly the member circles whatever the radii are.
fn region_anchor(region: Region, circles: &[Circle]) -> Point {
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (idx, circle) in circles.iter().enumerate() {
        if region.contains(idx) {
            min.x = min.x.min(circle.center.x - circle.radius);
            min.y = min.y.min(circle.center.y - circle.radius);
            max.x = max.x.max(circle.center.x + circle.radius);
            max.y = max.y.max(circle.center.y + circle.radius);
        }
    }
    let half_width = (max.x - min.x).max(max.y - min.y) / 2.0;
    let (coarse, _) = grid_search(region, circles, min.midpoint(max), half_width, 160);
    let (fine, _) = grid_search(region, circles, coarse, half_width / 40.0, 40);
    fine
}
