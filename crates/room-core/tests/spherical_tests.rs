use room_core::{smooth_toward, Spherical};

#[test]
fn spherical_axis_convention() {
    // phi = 0 points straight up +Y
    let up = Spherical::new(2.0, 0.0, 0.0).to_vec3();
    assert!((up - glam::Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);

    // phi = pi/2, theta = 0 points along +Z
    let z = Spherical::new(2.0, std::f32::consts::FRAC_PI_2, 0.0).to_vec3();
    assert!((z - glam::Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);

    // phi = pi/2, theta = pi/2 points along +X
    let x = Spherical::new(2.0, std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2).to_vec3();
    assert!((x - glam::Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn spherical_round_trip() {
    let original = Spherical::new(5.0, 1.0, -0.6);
    let back = Spherical::from_vec3(original.to_vec3());
    assert!((back.radius - original.radius).abs() < 1e-4);
    assert!((back.phi - original.phi).abs() < 1e-4);
    assert!((back.theta - original.theta).abs() < 1e-4);
}

#[test]
fn spherical_from_zero_vector() {
    let s = Spherical::from_vec3(glam::Vec3::ZERO);
    assert_eq!(s.radius, 0.0);
    assert_eq!(s.phi, 0.0);
    assert_eq!(s.theta, 0.0);
}

#[test]
fn smoothing_converges_strictly() {
    let target = 10.0_f32;
    let mut value = 0.0_f32;
    let mut prev_dist = (target - value).abs();
    let dt = 1.0 / 60.0;
    let mut steps = 0;
    while prev_dist > 1e-4 {
        value = smooth_toward(value, target, 5.0, dt);
        let dist = (target - value).abs();
        assert!(dist < prev_dist, "distance did not shrink at step {steps}");
        prev_dist = dist;
        steps += 1;
        assert!(steps < 500, "did not converge within 500 steps");
    }
}

#[test]
fn smoothing_never_overshoots_on_long_frames() {
    // A multi-second frame clamps the blend factor and lands on the target.
    let value = smooth_toward(0.0, 10.0, 5.0, 3.0);
    assert_eq!(value, 10.0);
}
