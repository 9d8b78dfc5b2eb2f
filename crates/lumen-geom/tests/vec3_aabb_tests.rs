use lumen_geom::{Aabb, Axis, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    assert!(vec3_approx_eq(a + b, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq((a + b) - a, b, 1e-6));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-6));
    assert!(vec3_approx_eq(a * 2.0 / 2.0, a, 1e-6));
}

#[test]
fn vec3_floor_rounds_toward_negative_infinity() {
    let v = Vec3::new(-0.5, 1.5, -2.0).floor();
    assert_eq!(v, Vec3::new(-1.0, 1.0, -2.0));
}

#[test]
fn normalized_zero_is_noop() {
    let n = Vec3::ZERO.normalized();
    assert_eq!(n, Vec3::ZERO);
    assert!(approx_eq(Vec3::new(3.0, 4.0, 0.0).normalized().length(), 1.0, 1e-6));
}

#[test]
fn exit_picks_nearest_plane() {
    let b = Aabb::unit_at(Vec3::new(2.0, 0.0, 0.0));
    let e = b.exit(Vec3::new(2.5, 0.9, 0.5), Vec3::new(0.0, 1.0, 0.0)).unwrap();
    assert_eq!(e.axis, Axis::Y);
    assert_eq!(e.sign, 1);
    assert!(approx_eq(e.t, 0.1, 1e-5));

    let e = b.exit(Vec3::new(2.2, 0.5, 0.5), Vec3::new(-1.0, 0.0, 0.0)).unwrap();
    assert_eq!(e.axis, Axis::X);
    assert_eq!(e.sign, -1);
    assert!(approx_eq(e.t, 0.2, 1e-5));
}

#[test]
fn exit_with_zero_direction_is_none() {
    let b = Aabb::unit_at(Vec3::ZERO);
    assert!(b.exit(Vec3::new(0.5, 0.5, 0.5), Vec3::ZERO).is_none());
}

#[test]
fn aabb_contains_bounds_inclusive() {
    let b = Aabb::unit_at(Vec3::ZERO);
    assert!(b.contains(Vec3::ZERO));
    assert!(b.contains(Vec3::ONE));
    assert!(!b.contains(Vec3::new(1.01, 0.5, 0.5)));
}
