use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{Mat4, Vec3};
use rand::prelude::*;
use room_core::{
    Camera, ConfigError, Mesh, MeshId, Navigation, PointerPress, Range, Spherical, ViewLimits,
    ViewPreset, Viewport, DEFAULT_VIEW,
};

const DT: f32 = 1.0 / 60.0;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

fn step(nav: &mut Navigation, camera: &mut Camera) {
    nav.update(DT, viewport(), camera);
}

#[test]
fn starts_in_default_with_default_pose() {
    let nav = Navigation::new();
    assert_eq!(nav.view_state(), DEFAULT_VIEW);
    let preset = nav.preset(DEFAULT_VIEW).unwrap();
    assert_eq!(nav.spherical(), preset.spherical);
    assert_eq!(nav.target_point(), preset.target);
}

#[test]
fn transition_is_idempotent() {
    let mut nav = Navigation::new();
    let notifications = Rc::new(Cell::new(0usize));
    let last_state = Rc::new(RefCell::new(String::new()));
    {
        let notifications = notifications.clone();
        let last_state = last_state.clone();
        nav.set_state_observer(move |state| {
            notifications.set(notifications.get() + 1);
            *last_state.borrow_mut() = state.to_string();
        });
    }

    nav.set_view_state("pc_screen");
    nav.set_view_state("pc_screen");

    assert_eq!(notifications.get(), 1, "repeat transition must not notify");
    assert_eq!(last_state.borrow().as_str(), "pc_screen");
    let preset = nav.preset("pc_screen").unwrap();
    assert_eq!(nav.spherical(), preset.spherical);
    assert_eq!(nav.target_point(), preset.target);
}

#[test]
fn unknown_state_changes_label_but_not_pose() {
    let mut nav = Navigation::new();
    let notifications = Rc::new(Cell::new(0usize));
    {
        let notifications = notifications.clone();
        nav.set_state_observer(move |_| notifications.set(notifications.get() + 1));
    }
    let pose_before = nav.spherical();
    let target_before = nav.target_point();

    nav.set_view_state("holo_deck");

    assert_eq!(nav.view_state(), "holo_deck");
    assert_eq!(nav.spherical(), pose_before);
    assert_eq!(nav.target_point(), target_before);
    assert_eq!(notifications.get(), 1);
}

#[test]
fn fov_widens_when_locked_and_narrows_back() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    step(&mut nav, &mut camera);
    assert!((camera.fovy_radians - 20.0_f32.to_radians()).abs() < 1e-5);

    nav.set_view_state("tv");
    step(&mut nav, &mut camera);
    assert!((camera.fovy_radians - 45.0_f32.to_radians()).abs() < 1e-5);

    nav.go_to_default();
    step(&mut nav, &mut camera);
    assert!((camera.fovy_radians - 20.0_f32.to_radians()).abs() < 1e-5);
}

#[test]
fn fade_hook_fires_on_every_transition() {
    let mut nav = Navigation::new();
    let fades: Rc<RefCell<Vec<(f32, f32)>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let fades = fades.clone();
        nav.set_fade_hook(move |opacity, duration| fades.borrow_mut().push((opacity, duration)));
    }

    nav.set_view_state("tv");
    nav.go_to_default();

    let fades = fades.borrow();
    assert_eq!(fades.len(), 2);
    assert_eq!(fades[0], (0.15, 0.6));
    assert_eq!(fades[1], (1.0, 0.6));
}

#[test]
fn wheel_zooms_only_in_default_and_is_consumed_once() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();

    nav.wheel(100.0);
    step(&mut nav, &mut camera);
    assert!((nav.spherical().radius - 31.0).abs() < 1e-4);

    // Accumulator was reset; nothing moves on the next frame.
    step(&mut nav, &mut camera);
    assert!((nav.spherical().radius - 31.0).abs() < 1e-4);

    // Locked views pin the radius.
    nav.set_view_state("tv");
    let locked_radius = nav.spherical().radius;
    nav.wheel(300.0);
    step(&mut nav, &mut camera);
    assert!((nav.spherical().radius - locked_radius).abs() < 1e-4);
}

#[test]
fn primary_drag_orbits() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    let theta_before = nav.spherical().theta;
    let phi_before = nav.spherical().phi;

    nav.pointer_down(PointerPress {
        x: 100.0,
        y: 100.0,
        ..PointerPress::default()
    });
    nav.pointer_move(150.0, 160.0);
    nav.pointer_up();
    step(&mut nav, &mut camera);

    let s = nav.spherical();
    assert!((s.theta - (theta_before - 50.0 / 720.0)).abs() < 1e-4);
    assert!((s.phi - (phi_before - 60.0 / 720.0)).abs() < 1e-4);
}

#[test]
fn drag_accumulates_between_frames_from_moving_anchor() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    let theta_before = nav.spherical().theta;

    nav.pointer_down(PointerPress {
        x: 0.0,
        y: 0.0,
        ..PointerPress::default()
    });
    nav.pointer_move(10.0, 0.0);
    nav.pointer_move(30.0, 0.0);
    step(&mut nav, &mut camera);
    let after_first = nav.spherical().theta;
    assert!((after_first - (theta_before - 30.0 / 720.0)).abs() < 1e-4);

    // The anchor moved with the pointer: a further move only adds its own
    // delta, not the whole distance since the press.
    nav.pointer_move(40.0, 0.0);
    step(&mut nav, &mut camera);
    assert!((nav.spherical().theta - (after_first - 10.0 / 720.0)).abs() < 1e-4);
}

#[test]
fn modifier_drag_pans_the_target() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    step(&mut nav, &mut camera); // give pan a valid camera basis
    let target_before = nav.target_point();

    nav.pointer_down(PointerPress {
        x: 200.0,
        y: 200.0,
        ctrl: true,
        ..PointerPress::default()
    });
    nav.pointer_move(260.0, 240.0);
    step(&mut nav, &mut camera);

    let target = nav.target_point();
    assert!(
        (target - target_before).length() > 1e-4,
        "pan did not move the target"
    );
    let limits = nav.limits();
    assert!(target.x >= limits.target_x.min && target.x <= limits.target_x.max);
    assert!(target.y >= limits.target_y.min && target.y <= limits.target_y.max);
    assert!(target.z >= limits.target_z.min && target.z <= limits.target_z.max);
}

#[test]
fn locked_views_ignore_drag() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    nav.set_view_state("tv");
    let pose = nav.spherical();

    nav.pointer_down(PointerPress {
        x: 0.0,
        y: 0.0,
        ..PointerPress::default()
    });
    nav.pointer_move(500.0, 500.0);
    step(&mut nav, &mut camera);

    assert_eq!(nav.spherical(), pose);
}

#[test]
fn touch_drag_mirrors_pointer_and_multi_touch_pans() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    step(&mut nav, &mut camera);
    let theta_before = nav.spherical().theta;

    nav.touch_start(&[(100.0, 100.0)]);
    nav.touch_move(&[(180.0, 100.0)]);
    nav.touch_end();
    step(&mut nav, &mut camera);
    assert!((nav.spherical().theta - (theta_before - 80.0 / 720.0)).abs() < 1e-4);

    let target_before = nav.target_point();
    nav.touch_start(&[(100.0, 100.0), (300.0, 300.0)]);
    nav.touch_move(&[(160.0, 100.0), (300.0, 300.0)]);
    nav.touch_end();
    step(&mut nav, &mut camera);
    assert!((nav.target_point() - target_before).length() > 1e-4);
}

#[test]
fn smoothed_pose_converges_monotonically_after_transition() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    step(&mut nav, &mut camera);
    nav.set_view_state("tv");

    let distance = |nav: &Navigation| {
        let s = nav.spherical();
        let sm = nav.spherical_smoothed();
        let ds = ((s.radius - sm.radius).powi(2)
            + (s.phi - sm.phi).powi(2)
            + (s.theta - sm.theta).powi(2))
        .sqrt();
        ds + (nav.target_point() - nav.target_point_smoothed()).length()
    };

    let mut prev = distance(&nav);
    assert!(prev > 0.1, "transition should displace the smoothed pose");
    let mut steps = 0;
    while prev > 1e-3 {
        step(&mut nav, &mut camera);
        let d = distance(&nav);
        assert!(d < prev, "smoothing distance grew at step {steps}");
        prev = d;
        steps += 1;
        assert!(steps < 600, "smoothing did not converge within 600 frames");
    }

    // Converged camera sits at the preset pose looking at its target.
    let preset = nav.preset("tv").unwrap();
    assert!((camera.target - preset.target).length() < 1e-2);
    let expected_eye = preset.spherical.to_vec3() + preset.target;
    assert!((camera.eye - expected_eye).length() < 5e-2);
}

#[test]
fn randomized_input_respects_default_limits() {
    let mut nav = Navigation::new();
    let mut camera = Camera::default();
    let mut rng = StdRng::seed_from_u64(42);

    for frame in 0..400 {
        match rng.gen_range(0..6) {
            0 => nav.pointer_down(PointerPress {
                x: rng.gen_range(0.0..1280.0),
                y: rng.gen_range(0.0..720.0),
                button: *[0u8, 1, 2].choose(&mut rng).unwrap(),
                ctrl: rng.gen_bool(0.2),
                shift: rng.gen_bool(0.2),
            }),
            1 => nav.pointer_move(rng.gen_range(-500.0..1800.0), rng.gen_range(-500.0..1200.0)),
            2 => nav.pointer_up(),
            3 => nav.wheel(rng.gen_range(-400.0..400.0)),
            4 => nav.wheel(rng.gen_range(-50.0..50.0)),
            _ => {}
        }
        step(&mut nav, &mut camera);

        let s = nav.spherical();
        let t = nav.target_point();
        let limits = nav.limits();
        let eps = 1e-4;
        assert!(
            s.radius >= limits.radius.min - eps && s.radius <= limits.radius.max + eps,
            "radius {} escaped at frame {frame}",
            s.radius
        );
        assert!(s.phi >= limits.phi.min - eps && s.phi <= limits.phi.max + eps);
        assert!(s.theta >= limits.theta.min - eps && s.theta <= limits.theta.max + eps);
        assert!(t.x >= limits.target_x.min - eps && t.x <= limits.target_x.max + eps);
        assert!(t.y >= limits.target_y.min - eps && t.y <= limits.target_y.max + eps);
        assert!(t.z >= limits.target_z.min - eps && t.z <= limits.target_z.max + eps);
    }
}

#[test]
fn preset_from_mesh_faces_the_default_camera() {
    let mut nav = Navigation::new();
    let mesh = Mesh::quad(
        MeshId(7),
        Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        2.0,
        2.0,
    );
    nav.set_preset_from_mesh("bookshelf", &mesh, 5.0);

    let preset = nav.preset("bookshelf").expect("preset registered");
    assert!((preset.target - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-4);

    let offset = preset.spherical.to_vec3();
    assert!((offset.length() - 5.0).abs() < 1e-3);

    let default_preset = nav.preset(DEFAULT_VIEW).unwrap();
    let default_cam = default_preset.spherical.to_vec3() + default_preset.target;
    let to_camera = default_cam - preset.target;
    assert!(
        offset.dot(to_camera) > 0.0,
        "derived camera sits behind the surface"
    );

    assert!(!preset.allow_drag);
    assert!(!preset.allow_zoom);
    assert!((preset.limits.radius.min - 4.6).abs() < 1e-4);
    assert!((preset.limits.radius.max - 5.4).abs() < 1e-4);
    assert!((preset.limits.target_x.min - 0.4).abs() < 1e-4);
    assert!((preset.limits.target_x.max - 1.6).abs() < 1e-4);
    assert!((preset.limits.phi.max - preset.limits.phi.min - 0.12).abs() < 1e-4);
}

#[test]
fn preset_from_mesh_flips_an_away_facing_normal() {
    let mut nav = Navigation::new();
    // Rotate the quad so its +Z normal points away from the default camera.
    let transform = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
        * Mat4::from_rotation_y(std::f32::consts::PI);
    let mesh = Mesh::quad(MeshId(8), transform, 2.0, 2.0);
    nav.set_preset_from_mesh("bookshelf", &mesh, 5.0);

    let preset = nav.preset("bookshelf").expect("preset registered");
    let default_preset = nav.preset(DEFAULT_VIEW).unwrap();
    let default_cam = default_preset.spherical.to_vec3() + default_preset.target;
    assert!(preset.spherical.to_vec3().dot(default_cam - preset.target) > 0.0);
}

#[test]
fn preset_from_mesh_rejects_empty_geometry() {
    let mut nav = Navigation::new();
    let empty = Mesh::new(MeshId(9), Mat4::IDENTITY, Vec::new(), None);
    nav.set_preset_from_mesh("ghost", &empty, 5.0);
    assert!(nav.preset("ghost").is_none());

    nav.set_preset_from_mesh("ghost", &Mesh::quad(MeshId(10), Mat4::IDENTITY, 1.0, 1.0), 0.0);
    assert!(nav.preset("ghost").is_none(), "zero radius must be rejected");
}

#[test]
fn register_preset_rejects_inverted_ranges() {
    let mut nav = Navigation::new();
    let preset = ViewPreset {
        name: "broken".to_string(),
        spherical: Spherical::new(10.0, 1.0, 0.0),
        target: Vec3::ZERO,
        limits: ViewLimits {
            radius: Range::new(14.0, 10.0),
            phi: Range::new(0.0, 1.0),
            theta: Range::new(-1.0, 0.0),
            target_x: Range::new(-1.0, 1.0),
            target_y: Range::new(-1.0, 1.0),
            target_z: Range::new(-1.0, 1.0),
        },
        allow_drag: false,
        allow_zoom: false,
    };
    let err = nav.register_preset(preset).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange { .. }));
    assert!(nav.preset("broken").is_none());
}
