//! Integration tests for aperture sampling, mount kinematics and dome obstruction
use approx::{assert_abs_diff_eq, assert_relative_eq};
use dome_obstruction::{
    Aperture, ApertureError, DomeIntersector, GeometryError, ObservatoryConfig, Ray,
};
use nalgebra::Point3;

/// Always reports the same shell point, whatever the ray
struct FixedHit(Point3<f64>);

impl DomeIntersector for FixedHit {
    fn intersect(&self, _ray: &Ray) -> Result<Option<Point3<f64>>, GeometryError> {
        Ok(Some(self.0))
    }
}

fn reference_aperture() -> Aperture {
    Aperture::new(1.0, 0.0, 8).expect("valid aperture")
}

mod disk_sampling {
    use super::*;

    #[test]
    fn test_points_stay_inside_annulus() {
        for sample_rate in 1..=12 {
            let aperture = Aperture::new(1.0, 0.0, sample_rate).unwrap();
            for min_radius in [0.0, 0.1, 0.35, 0.5, 0.9, 1.0] {
                let points = aperture.sample_disk(min_radius).unwrap();
                assert_eq!(points.x.len(), points.y.len());
                let skip = usize::from(points.has_center());
                for (x, y) in points.x.iter().zip(points.y.iter()).skip(skip) {
                    let r2 = x * x + y * y;
                    assert!(r2 <= 1.0 + 1e-12, "r^2={r2} outside unit disk");
                    assert!(
                        r2 >= min_radius * min_radius - 1e-12,
                        "r^2={r2} inside min radius {min_radius}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_center_only_without_exclusion() {
        let aperture = reference_aperture();
        assert!(aperture.sample_disk(0.0).unwrap().has_center());
        assert!(!aperture.sample_disk(0.2).unwrap().has_center());
    }

    #[test]
    fn test_ring_sizes_non_decreasing() {
        let points = reference_aperture().sample_disk(0.0).unwrap();
        assert_eq!(points.ring_sizes, vec![7, 13, 20, 26, 32, 39, 45, 51]);
        assert!(points.ring_sizes.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(points.len(), 1 + points.ring_sizes.iter().sum::<usize>());
    }

    #[test]
    fn test_annulus_ring_sizes() {
        let aperture = Aperture::new(1.0, 0.0, 4).unwrap();
        let points = aperture.sample_disk(0.5).unwrap();
        assert_eq!(points.ring_sizes, vec![20, 26, 32, 39]);
    }

    #[test]
    fn test_invalid_min_radius() {
        let aperture = reference_aperture();
        assert!(matches!(
            aperture.sample_disk(-0.5),
            Err(ApertureError::InvalidMinRadius(_))
        ));
    }
}

mod kinematics {
    use super::*;

    #[test]
    fn test_zero_pointing_fixture() {
        let aperture = reference_aperture();
        let config = aperture.config();
        let colat = (90.0 - config.latitude_deg).to_radians();
        let t = aperture.transform(0.0, 0.0).translation.vector;

        assert_abs_diff_eq!(t.x, -config.mount.dec_to_optical_axis, epsilon = 1e-12);
        assert_abs_diff_eq!(t.y, -config.mount.ra_to_dec_axis * colat.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            t.z,
            config.mount.pier_to_ra_axis + config.mount.ra_to_dec_axis * colat.cos(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_direction_is_deterministic() {
        let aperture = reference_aperture();
        for (ha, dec) in [(0.0, 0.0), (12.5, -33.0), (-90.0, 89.0)] {
            let a = aperture.aperture_direction(ha, dec);
            let b = aperture.aperture_direction(ha, dec);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_direction_length_for_rigid_pose() {
        let d = reference_aperture().aperture_direction(40.0, 15.0);
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_aperture_shape_and_mismatch() {
        let aperture = reference_aperture();
        let points = aperture
            .sample_aperture(0.0, 45.0, &[0.0, 0.5, -0.5], &[0.0, 0.5, 0.5])
            .unwrap();
        assert_eq!(points.shape(), &[3, 3]);

        assert!(matches!(
            aperture.sample_aperture(0.0, 45.0, &[0.0], &[]),
            Err(ApertureError::LengthMismatch { x: 1, z: 0 })
        ));
    }
}

mod obstruction {
    use super::*;

    #[test]
    fn test_constructed_slit_point() {
        let aperture = reference_aperture();
        let dome = aperture.config().dome;
        let origin = Point3::origin();

        let inside = Point3::new(0.0, 0.25 * dome.diameter, dome.extent + 1.0);
        assert!(!aperture.is_ray_blocked_with(&FixedHit(inside), &origin, 0.0, 0.0, 180.0));

        let outside = Point3::new(dome.slit_width, inside.y, inside.z);
        assert!(aperture.is_ray_blocked_with(&FixedHit(outside), &origin, 0.0, 0.0, 180.0));
    }

    #[test]
    fn test_ratio_within_unit_interval() {
        let aperture = reference_aperture();
        for (ha, dec, az) in [
            (0.0, 90.0, 0.0),
            (30.0, 20.0, 0.0),
            (-45.0, 10.0, 90.0),
            (60.0, -20.0, 270.0),
        ] {
            let ratio = aperture.obstruction(ha, dec, az).unwrap();
            assert!((0.0..=1.0).contains(&ratio), "ratio {ratio} out of range");
        }
    }

    #[test]
    fn test_partial_obstruction_is_fractional() {
        // The slit is narrower than the aperture, so the rim is always shadowed
        let ratio = reference_aperture().obstruction(0.0, 90.0, 0.0).unwrap();
        assert!(ratio > 0.0 && ratio < 1.0, "expected fractional ratio, got {ratio}");
    }

    #[test]
    fn test_slit_turned_away_blocks_more() {
        let aperture = reference_aperture();
        let facing = aperture.obstruction(0.0, 90.0, 0.0).unwrap();
        let away = aperture.obstruction(0.0, 90.0, 180.0).unwrap();
        assert!(away > facing);
    }

    #[test]
    fn test_pointing_below_pole_toward_closed_shell() {
        let ratio = reference_aperture().obstruction(0.0, -30.0, 0.0).unwrap();
        assert!(ratio > 0.9, "expected near-total obstruction, got {ratio}");
    }

    #[test]
    fn test_repeated_queries_are_stable() {
        let aperture = reference_aperture();
        let first = aperture.obstruction(0.0, 90.0, 0.0).unwrap();
        for _ in 0..5 {
            assert_eq!(aperture.obstruction(0.0, 90.0, 0.0).unwrap(), first);
        }
    }

    #[test]
    fn test_obstruction_map_matches_single_queries() {
        let aperture = reference_aperture();
        let azimuths = [0.0, 90.0, 180.0, 270.0];
        let map = aperture.obstruction_map(0.0, 90.0, &azimuths).unwrap();
        assert_eq!(map.len(), azimuths.len());
        for (i, &az) in azimuths.iter().enumerate() {
            assert_eq!(map[i], aperture.obstruction(0.0, 90.0, az).unwrap());
        }
    }

    #[test]
    fn test_obstruction_grid_shape_and_values() {
        let aperture = reference_aperture();
        let has = [-30.0, 0.0];
        let decs = [20.0, 60.0, 90.0];
        let grid = aperture.obstruction_grid(&has, &decs, 0.0).unwrap();
        assert_eq!(grid.shape(), &[2, 3]);
        assert_eq!(grid[[1, 2]], aperture.obstruction(0.0, 90.0, 0.0).unwrap());
    }

    #[test]
    fn test_secondary_variant_without_secondary_matches() {
        let aperture = reference_aperture();
        assert_eq!(
            aperture.obstruction_with_secondary(30.0, 20.0, 0.0).unwrap(),
            aperture.obstruction(30.0, 20.0, 0.0).unwrap()
        );
    }

    #[test]
    fn test_secondary_variant_in_range() {
        let aperture = Aperture::new(0.5, 0.15, 6).unwrap();
        let ratio = aperture.obstruction_with_secondary(0.0, 90.0, 0.0).unwrap();
        assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn test_synthetic_geometry() {
        // A dome too small to reach the slit height blocks everything
        let json = r#"{"dome": {"diameter": 2.0, "slit_width": 1.0, "extent": 5.0}}"#;
        let config = ObservatoryConfig::from_json(json).unwrap();
        let aperture = Aperture::with_config(1.0, 0.0, 4, config).unwrap();
        assert_eq!(aperture.obstruction(0.0, 90.0, 0.0).unwrap(), 1.0);
    }
}
