//! Geometry functions: scaling, clamping, bounding boxes and the indicator fit test

use glam::DVec2;

use crate::types::{Point, Size};

/// `min(max(value, 0), bound)`.
///
/// NaN-free inputs only; the order of `max` then `min` matters when `bound`
/// is zero.
#[inline]
pub fn clamp(value: f64, bound: f64) -> f64 {
    value.max(0.0).min(bound)
}

/// Scale points by `fraction` on both axes and clamp them into `image`.
///
/// The fraction is derived from widths only; heights are not scaled
/// separately, so a change of aspect ratio distorts the area.
pub fn scale_points(points: &[Point], fraction: f64, image: Size) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(clamp(p.x * fraction, image.w), clamp(p.y * fraction, image.h)))
        .collect()
}

/// Axis-aligned bounding box with `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    /// A box around a single point.
    pub fn at(p: Point) -> Self {
        BoundingBox {
            x1: p.x,
            y1: p.y,
            x2: p.x,
            y2: p.y,
        }
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.x1 = self.x1.min(p.x);
        self.x2 = self.x2.max(p.x);
        self.y1 = self.y1.min(p.y);
        self.y2 = self.y2.max(p.y);
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x2).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y2).abs()
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> DVec2 {
        (self.min() + self.max()) / 2.0
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x1, self.y1)
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x2, self.y2)
    }
}

/// Fold points into a bounding box, seeded by the first one.
///
/// Returns `None` for an empty slice: a box only means something once a point
/// has gone into it.
pub fn calculate_bounding_box(points: &[Point]) -> Option<BoundingBox> {
    let (first, rest) = points.split_first()?;
    let mut bbox = BoundingBox::at(*first);
    for p in rest {
        bbox.expand_point(*p);
    }
    Some(bbox)
}

/// The footprint of the hotzone indicator, centered on an area's bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HotzoneIndicatorBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl HotzoneIndicatorBox {
    /// Negative indicator sizes count by their magnitude.
    pub fn centered(center: DVec2, size: Size) -> Self {
        let half = size.to_vec().abs() / 2.0;
        HotzoneIndicatorBox {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive on the top/left edges, exclusive on the bottom/right edges.
    pub fn fits_within(&self, image: Size) -> bool {
        self.min.cmpge(DVec2::ZERO).all() && self.max.cmplt(image.to_vec()).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(-5.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 10.0), 10.0);
        assert_eq!(clamp(7.5, 10.0), 7.5);
    }

    #[test]
    fn clamp_with_zero_bound() {
        assert_eq!(clamp(3.0, 0.0), 0.0);
        assert_eq!(clamp(-3.0, 0.0), 0.0);
    }

    #[test]
    fn scale_points_uses_width_fraction_for_both_axes() {
        let points = [Point::new(10.0, 20.0), Point::new(60.0, 80.0)];
        let scaled = scale_points(&points, 2.0, Size::new(100.0, 100.0));
        assert_eq!(scaled, vec![Point::new(20.0, 40.0), Point::new(100.0, 100.0)]);
    }

    #[test]
    fn scale_points_clamps_each_axis_to_its_own_bound() {
        let points = [Point::new(-10.0, 500.0)];
        let scaled = scale_points(&points, 1.0, Size::new(200.0, 50.0));
        assert_eq!(scaled, vec![Point::new(0.0, 50.0)]);
    }

    #[test]
    fn bounding_box_of_nothing_is_none() {
        assert_eq!(calculate_bounding_box(&[]), None);
    }

    #[test]
    fn bounding_box_of_one_point_has_no_area() {
        let bbox = calculate_bounding_box(&[Point::new(4.0, 2.0)]).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x1: 4.0,
                y1: 2.0,
                x2: 4.0,
                y2: 2.0,
            }
        );
        assert_eq!(bbox.area(), 0.0);
    }

    #[test]
    fn bounding_box_normalizes_flipped_corners() {
        let points = [
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        ];
        let bbox = calculate_bounding_box(&points).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x1: 0.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0,
            }
        );
        assert_eq!(bbox.center(), DVec2::new(50.0, 50.0));
        assert_eq!(bbox.area(), 10000.0);
    }

    #[test]
    fn indicator_box_is_centered() {
        let ind = HotzoneIndicatorBox::centered(DVec2::new(50.0, 40.0), Size::new(20.0, 10.0));
        assert_eq!(ind.min, DVec2::new(40.0, 35.0));
        assert_eq!(ind.max, DVec2::new(60.0, 45.0));
    }

    #[test]
    fn indicator_size_sign_is_ignored() {
        let a = HotzoneIndicatorBox::centered(DVec2::new(5.0, 5.0), Size::new(-4.0, -2.0));
        let b = HotzoneIndicatorBox::centered(DVec2::new(5.0, 5.0), Size::new(4.0, 2.0));
        assert_eq!(a, b);
    }

    #[test]
    fn indicator_fit_is_inclusive_top_left_exclusive_bottom_right() {
        let image = Size::new(100.0, 100.0);
        let touching_origin = HotzoneIndicatorBox {
            min: DVec2::ZERO,
            max: DVec2::new(10.0, 10.0),
        };
        assert!(touching_origin.fits_within(image));

        let touching_right = HotzoneIndicatorBox {
            min: DVec2::new(90.0, 0.0),
            max: DVec2::new(100.0, 10.0),
        };
        assert!(!touching_right.fits_within(image));

        let touching_bottom = HotzoneIndicatorBox {
            min: DVec2::new(0.0, 90.0),
            max: DVec2::new(10.0, 100.0),
        };
        assert!(!touching_bottom.fits_within(image));

        let past_left = HotzoneIndicatorBox {
            min: DVec2::new(-0.5, 0.0),
            max: DVec2::new(9.5, 10.0),
        };
        assert!(!past_left.fits_within(image));
    }
}
