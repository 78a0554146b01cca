//! Ray-triangle intersection: plane solve + barycentric inside test.

use crate::ray::{Ray, RayCastOptions, RayHit};
use meshray_math::Point3;

/// Intersect a ray with the triangle `(a, b, c)`.
///
/// The plane normal is the normalized cross product of the edges `ab` and
/// `ac`, so a counter-clockwise winding (viewed from the front) yields a
/// front-facing normal. Unless `test_backfaces` is set, triangles whose
/// normal does not oppose the ray are rejected. Hits behind the origin or
/// outside `[t_min, t_max]` are rejected, then the barycentric weights of
/// the plane intersection decide containment.
///
/// Degenerate (zero-area) triangles are not detected; the NaN they
/// produce fails the barycentric comparisons and reports a miss.
pub fn hit_test_triangle(
    ray: &Ray,
    a: &Point3,
    b: &Point3,
    c: &Point3,
    opts: &RayCastOptions,
) -> Option<RayHit> {
    let ab = b - a;
    let ac = c - a;
    let normal = ab.cross(&ac).normalize();

    if !opts.test_backfaces && normal.dot(&ray.direction) > 0.0 {
        return None;
    }

    let t = normal.dot(&(a - ray.origin)) / normal.dot(&ray.direction);
    if !(t > 0.0) || t < opts.t_min || t > opts.t_max {
        return None;
    }

    let point = ray.at(t);
    let to_hit = point - a;

    let dot00 = ac.dot(&ac);
    let dot01 = ac.dot(&ab);
    let dot02 = ac.dot(&to_hit);
    let dot11 = ab.dot(&ab);
    let dot12 = ab.dot(&to_hit);
    let denom = dot00 * dot11 - dot01 * dot01;
    let u = (dot11 * dot02 - dot01 * dot12) / denom;
    let v = (dot00 * dot12 - dot01 * dot02) / denom;

    if u >= 0.0 && v >= 0.0 && u + v <= 1.0 {
        Some(RayHit {
            t,
            point,
            normal,
            face: None,
        })
    } else {
        None
    }
}
