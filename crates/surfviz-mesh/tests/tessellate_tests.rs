// Integration tests for grid tessellation

use approx::assert_abs_diff_eq;
use surfviz_core::{SurfvizError, Validate};
use surfviz_geometry::surface::{Droplet, KleinBottle, Sphere, Torus};
use surfviz_geometry::ParametricEquation;
use surfviz_math::{DVec3, Point2};
use surfviz_mesh::{tessellate, Resolution};

const UNIT_EPSILON: f64 = 1e-5;

fn unit_sphere() -> Sphere {
    Sphere::new(1.0)
}

#[test]
fn test_counts_for_many_resolutions() {
    for segments in 1..=12i64 {
        let mesh = tessellate(&Torus::default(), segments).unwrap();
        let s = segments as usize;
        assert_eq!(mesh.vertex_count(), (s + 1) * (s + 1));
        assert_eq!(mesh.triangle_count(), 2 * s * s);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }
}

#[test]
fn test_indices_in_range() {
    for segments in [1, 2, 7, 64] {
        let mesh = tessellate(&Droplet::default(), segments).unwrap();
        let n = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < n, "Index {} out of bounds (n={})", idx, n);
        }
        mesh.validate().unwrap();
    }
}

#[test]
fn test_deterministic() {
    let klein = KleinBottle::default();
    let a = tessellate(&klein, 20).unwrap();
    let b = tessellate(&klein, 20).unwrap();
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.uvs, b.uvs);
    assert_eq!(a.indices, b.indices);
    for (na, nb) in a.normals.iter().zip(&b.normals) {
        assert!((*na - *nb).length() < UNIT_EPSILON);
    }
}

#[test]
fn test_corner_uvs() {
    let segments = 5;
    let mesh = tessellate(&Torus::default(), segments).unwrap();
    let r = Resolution::new(segments).unwrap();
    let s = r.segments();

    assert_eq!(mesh.uvs[r.vertex_index(0, 0)], Point2::new(0.0, 0.0));
    assert_eq!(mesh.uvs[r.vertex_index(s, 0)], Point2::new(1.0, 0.0));
    assert_eq!(mesh.uvs[r.vertex_index(0, s)], Point2::new(0.0, 1.0));
    assert_eq!(mesh.uvs[r.vertex_index(s, s)], Point2::new(1.0, 1.0));
}

#[test]
fn test_uvs_are_unscaled_domain_coordinates() {
    let mesh = tessellate(&Droplet::default(), 8).unwrap();
    let r = Resolution::new(8).unwrap();
    for i in 0..=8 {
        for j in 0..=8 {
            let uv = mesh.uvs[r.vertex_index(i, j)];
            assert_eq!(uv, Point2::new(i as f64 / 8.0, j as f64 / 8.0));
        }
    }
}

#[test]
fn test_normals_unit_length() {
    let equations: Vec<Box<dyn ParametricEquation>> = vec![
        Box::new(Droplet::default()),
        Box::new(Torus::default()),
        Box::new(KleinBottle::default()),
        Box::new(unit_sphere()),
    ];
    for eq in &equations {
        let mesh = tessellate(eq.as_ref(), 32).unwrap();
        for n in &mesh.normals {
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = UNIT_EPSILON);
        }
    }
}

#[test]
fn test_sphere_scenario() {
    let mesh = tessellate(&unit_sphere(), 4).unwrap();
    let r = Resolution::new(4).unwrap();

    assert_eq!(mesh.vertex_count(), 25);
    assert_eq!(mesh.triangle_count(), 32);

    let north = mesh.positions[r.vertex_index(0, 0)];
    let south = mesh.positions[r.vertex_index(4, 4)];
    assert!((north - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    assert!((south - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);

    // Every row repeats the pole as its own vertex
    let north_pole_vertices = (0..=4)
        .filter(|&i| (mesh.positions[r.vertex_index(i, 0)] - north).length() < 1e-12)
        .count();
    assert_eq!(north_pole_vertices, 5);
}

#[test]
fn test_sphere_normals_point_outward() {
    // (a, b, c) spans +v then +u; for this parameterization that faces outward
    let mesh = tessellate(&unit_sphere(), 16).unwrap();
    let r = Resolution::new(16).unwrap();
    for i in 1..16 {
        for j in 1..16 {
            let idx = r.vertex_index(i, j);
            let p = mesh.positions[idx];
            let n = mesh.normals[idx];
            assert!(n.dot(p) > 0.9, "normal {:?} at {:?}", n, p);
        }
    }
}

#[test]
fn test_pole_normals_point_along_axis() {
    let mesh = tessellate(&unit_sphere(), 4).unwrap();
    let r = Resolution::new(4).unwrap();

    // (0, 0) and (4, 4) only touch zero-area triangles
    let north = mesh.normals[r.vertex_index(0, 0)];
    let south = mesh.normals[r.vertex_index(4, 4)];
    assert!((north - DVec3::Z).length() < 1e-9, "{:?}", north);
    assert!((south + DVec3::Z).length() < 1e-9, "{:?}", south);

    for i in 0..=4 {
        let n = mesh.normals[r.vertex_index(i, 0)];
        assert_abs_diff_eq!(n.length(), 1.0, epsilon = UNIT_EPSILON);
        assert!(n.z > 0.8, "north pole normal {:?}", n);
        let s = mesh.normals[r.vertex_index(i, 4)];
        assert_abs_diff_eq!(s.length(), 1.0, epsilon = UNIT_EPSILON);
        assert!(s.z < -0.8, "south pole normal {:?}", s);
    }
}

#[test]
fn test_single_segment_scenario() {
    let mesh = tessellate(&Torus::default(), 1).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [1, 3, 2]]);
}

#[test]
fn test_non_positive_resolution() {
    for segments in [0, -1, -100] {
        let result = tessellate(&Torus::default(), segments);
        assert!(
            matches!(result, Err(SurfvizError::InvalidResolution { .. })),
            "segments {} should fail",
            segments
        );
    }
}

#[test]
fn test_torus_seam_not_welded() {
    let mesh = tessellate(&Torus::default(), 8).unwrap();
    let r = Resolution::new(8).unwrap();
    for j in 0..=8 {
        let start = r.vertex_index(0, j);
        let end = r.vertex_index(8, j);
        assert_ne!(start, end);
        assert!((mesh.positions[start] - mesh.positions[end]).length() < 1e-12);
    }
}
