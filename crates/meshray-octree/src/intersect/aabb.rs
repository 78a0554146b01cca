//! Ray-box slab test and sphere-box squared-distance test.

use crate::ray::{BoxHit, Ray};
use meshray_math::{Aabb3, Point3, Vec3};

/// Tolerance for classifying which box side the entry point lies on.
const SIDE_EPSILON: f32 = 1.0e-6;

/// Slab test between a ray and an axis-aligned box.
///
/// A ray starting inside the box reports an immediate zero-distance hit.
/// Otherwise per-axis entry/exit distances are computed from the inverse
/// direction and reduced to near/far bounds; the box is hit iff
/// `0 < t_near < t_far`. The returned `side` classifies the entry point
/// against the box sides, compared with a small tolerance so a point
/// landing exactly on a face still registers as that side.
pub fn hit_test_box(ray: &Ray, aabb: &Aabb3) -> Option<BoxHit> {
    let to_min = aabb.min - ray.origin;
    let to_max = aabb.max - ray.origin;

    // Origin inside the box: every min corner is behind us, every max
    // corner ahead.
    if to_min.max() < 0.0 && to_max.min() > 0.0 {
        return Some(BoxHit {
            t: 0.0,
            point: ray.origin,
            side: ray.direction,
        });
    }

    let inv = ray.inv_direction();
    let t_lo = to_min.component_mul(inv);
    let t_hi = to_max.component_mul(inv);
    let t_near = t_lo.inf(&t_hi).max();
    let t_far = t_lo.sup(&t_hi).min();

    if t_near > 0.0 && t_near < t_far {
        let point = ray.at(t_near);
        let side = Vec3::new(
            side_sign(point.x, aabb.min.x, aabb.max.x),
            side_sign(point.y, aabb.min.y, aabb.max.y),
            side_sign(point.z, aabb.min.z, aabb.max.z),
        );
        return Some(BoxHit {
            t: t_near,
            point,
            side,
        });
    }

    None
}

#[inline]
fn side_sign(v: f32, min: f32, max: f32) -> f32 {
    ((v > max - SIDE_EPSILON) as i32 - (v < min + SIDE_EPSILON) as i32) as f32
}

/// Arvo's squared-distance test between a sphere and a box.
///
/// `radius2` is the squared radius; no square roots are taken. For each
/// axis the squared distance from the center to the box interval is
/// accumulated; the shapes intersect iff the total does not exceed
/// `radius2`.
pub fn test_sphere_box(center: &Point3, radius2: f32, aabb: &Aabb3) -> bool {
    let mut d = 0.0;
    for i in 0..3 {
        if center[i] < aabb.min[i] {
            let s = center[i] - aabb.min[i];
            d += s * s;
        } else if center[i] > aabb.max[i] {
            let s = center[i] - aabb.max[i];
            d += s * s;
        }
    }
    d <= radius2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_box_hit_front() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = hit_test_box(&ray, &unit_box()).unwrap();
        assert_relative_eq!(hit.t, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.point.z, 1.0, epsilon = 1e-5);
        // Entered through the +Z side.
        assert_eq!(hit.side, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_box_hit_min_side() {
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let hit = hit_test_box(&ray, &unit_box()).unwrap();
        assert_relative_eq!(hit.t, 4.0, epsilon = 1e-5);
        assert_eq!(hit.side, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_box_miss() {
        let ray = Ray::new(Point3::new(0.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(hit_test_box(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_box_behind() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(hit_test_box(&ray, &unit_box()).is_none());
    }

    #[test]
    fn test_box_origin_inside() {
        let ray = Ray::new(Point3::new(0.5, -0.5, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = hit_test_box(&ray, &unit_box()).unwrap();
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.point, Point3::new(0.5, -0.5, 0.0));
    }

    #[test]
    fn test_box_diagonal() {
        let ray = Ray::new(Point3::new(-5.0, -5.0, -5.0), Vec3::new(1.0, 1.0, 1.0));
        let hit = hit_test_box(&ray, &unit_box()).unwrap();
        // Enters at the (-1,-1,-1) corner: t = 4 in direction-length units.
        assert_relative_eq!(hit.t, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_box_unnormalized_direction_scales_t() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        let hit = hit_test_box(&ray, &unit_box()).unwrap();
        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_box_overlap() {
        let aabb = unit_box();
        // Center inside.
        assert!(test_sphere_box(&Point3::origin(), 0.01, &aabb));
        // Touching a face from outside.
        assert!(test_sphere_box(&Point3::new(1.5, 0.0, 0.0), 0.25, &aabb));
        // Near a corner: distance to (1,1,1) is sqrt(3)*0.5 ≈ 0.866.
        assert!(test_sphere_box(&Point3::new(1.5, 1.5, 1.5), 0.76, &aabb));
        assert!(!test_sphere_box(&Point3::new(1.5, 1.5, 1.5), 0.74, &aabb));
        // Clearly separated.
        assert!(!test_sphere_box(&Point3::new(5.0, 0.0, 0.0), 1.0, &aabb));
    }
}
