//! Sphere-triangle separating-axis test.
//!
//! After Ericson, "Real-Time Collision Detection" (the realtimecollisiondetection.net
//! formulation): the sphere and triangle are disjoint iff a separating axis
//! exists among the triangle plane normal, the three vertex Voronoi
//! regions, and the three edge Voronoi regions.

use meshray_math::Point3;

/// Test whether a sphere intersects the triangle `(a, b, c)`.
///
/// `radius2` is the squared radius; every comparison is done on squared
/// quantities so no square roots are taken. All seven separation tests are
/// evaluated unconditionally and combined with non-short-circuiting
/// operators, keeping the evaluation branch-free.
pub fn test_sphere_triangle(center: &Point3, radius2: f32, a: &Point3, b: &Point3, c: &Point3) -> bool {
    // Translate the triangle into the sphere's local frame.
    let a = a - center;
    let b = b - center;
    let c = c - center;

    let ab = b - a;
    let ac = c - a;

    // Separation along the triangle plane normal.
    let v = ab.cross(&ac);
    let d = a.dot(&v);
    let e = v.dot(&v);
    let sep1 = d * d > radius2 * e;

    // Vertex Voronoi regions.
    let aa = a.dot(&a);
    let dab = a.dot(&b);
    let dac = a.dot(&c);
    let bb = b.dot(&b);
    let dbc = b.dot(&c);
    let cc = c.dot(&c);
    let sep2 = (aa > radius2) & (dab > aa) & (dac > aa);
    let sep3 = (bb > radius2) & (dab > bb) & (dbc > bb);
    let sep4 = (cc > radius2) & (dac > cc) & (dbc > cc);

    // Edge Voronoi regions.
    let d1 = dab - aa;
    let d2 = dbc - bb;
    let d3 = dac - cc;

    let bc = c - b;
    let ca = a - c;

    let e1 = ab.dot(&ab);
    let e2 = bc.dot(&bc);
    let e3 = ca.dot(&ca);

    let q1 = a * e1 - ab * d1;
    let q2 = b * e2 - bc * d2;
    let q3 = c * e3 - ca * d3;

    let qc = c * e1 - q1;
    let qa = a * e2 - q2;
    let qb = b * e3 - q3;

    let sep5 = (q1.dot(&q1) > radius2 * e1 * e1) & (q1.dot(&qc) > 0.0);
    let sep6 = (q2.dot(&q2) > radius2 * e2 * e2) & (q2.dot(&qa) > 0.0);
    let sep7 = (q3.dot(&q3) > radius2 * e3 * e3) & (q3.dot(&qb) > 0.0);

    let separated = sep1 | sep2 | sep3 | sep4 | sep5 | sep6 | sep7;
    !separated
}
