//! Scripted tour of the room scene without a window or a GPU: builds the
//! hotspot set, synthesizes pointer input, and logs the transitions and
//! camera poses the core produces.

use glam::{Mat4, Vec3};
use room_core::{
    Camera, Hotspot, HoverStyle, Interaction, Mesh, MeshId, Navigation, PointerPress, Viewport,
};

const DT: f32 = 1.0 / 60.0;

fn hotspots() -> Vec<Hotspot> {
    vec![
        Hotspot {
            mesh: Mesh::quad(
                MeshId(1),
                Mat4::from_translation(Vec3::new(-1.5, 1.8, 0.5)) * Mat4::from_rotation_y(-0.35),
                2.6,
                1.5,
            ),
            state: "pc_screen".to_string(),
            style: HoverStyle::Tint,
        },
        Hotspot {
            mesh: Mesh::quad(
                MeshId(2),
                Mat4::from_translation(Vec3::new(1.5, 1.5, 1.0)) * Mat4::from_rotation_y(0.2),
                2.2,
                1.3,
            ),
            state: "mac_screen".to_string(),
            style: HoverStyle::Tint,
        },
        Hotspot {
            mesh: Mesh::quad(
                MeshId(3),
                Mat4::from_translation(Vec3::new(4.19, 2.67, 1.82)) * Mat4::from_rotation_y(-1.57),
                4.28,
                2.42,
            ),
            state: "tv".to_string(),
            style: HoverStyle::Reveal,
        },
        Hotspot {
            mesh: Mesh::quad(
                MeshId(4),
                Mat4::from_translation(Vec3::new(-3.7, 4.7, -4.0)),
                2.2,
                1.0,
            ),
            state: "bookshelf".to_string(),
            style: HoverStyle::Reveal,
        },
    ]
}

/// Pixel coordinates a world point projects to, for synthesizing clicks.
fn screen_of(camera: &Camera, viewport: Viewport, world: Vec3) -> (f32, f32) {
    let clip = camera.projection_matrix() * camera.view_matrix() * world.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    (
        (ndc.x + 1.0) * 0.5 * viewport.width,
        (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

fn run_frames(navigation: &mut Navigation, camera: &mut Camera, viewport: Viewport, frames: u32) {
    for _ in 0..frames {
        navigation.update(DT, viewport, camera);
    }
}

fn log_camera(camera: &Camera) {
    log::info!(
        "[camera] eye=({:.2},{:.2},{:.2}) target=({:.2},{:.2},{:.2}) fov={:.0}",
        camera.eye.x,
        camera.eye.y,
        camera.eye.z,
        camera.target.x,
        camera.target.y,
        camera.target.z,
        camera.fovy_radians.to_degrees()
    );
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let viewport = Viewport::new(1280.0, 720.0);
    let mut camera = Camera::default();

    let mut navigation = Navigation::new();
    navigation.set_state_observer(|state| log::info!("[ui] view state -> {state}"));
    navigation.set_fade_hook(|opacity, duration| {
        log::info!("[fade] chair -> {opacity:.2} over {duration:.1}s")
    });

    let hotspots = hotspots();
    for hotspot in &hotspots {
        let radius = match hotspot.state.as_str() {
            "pc_screen" | "mac_screen" => 6.0,
            _ => 5.0,
        };
        navigation.set_preset_from_mesh(&hotspot.state, &hotspot.mesh, radius);
    }
    let mut interaction = Interaction::new();
    interaction.set_hotspots(hotspots);

    // Settle into the opening view.
    run_frames(&mut navigation, &mut camera, viewport, 120);
    log_camera(&camera);

    // Free-roam: a short orbit drag and a zoom out.
    navigation.pointer_down(PointerPress {
        x: 400.0,
        y: 300.0,
        ..PointerPress::default()
    });
    navigation.pointer_move(520.0, 340.0);
    navigation.pointer_up();
    navigation.wheel(-240.0);
    run_frames(&mut navigation, &mut camera, viewport, 90);
    log_camera(&camera);

    // Visit every hotspot, trying a (blocked) direct jump along the way.
    let stops = ["pc_screen", "mac_screen", "tv", "bookshelf"];
    for (i, &state) in stops.iter().enumerate() {
        let target = match navigation.preset(state) {
            Some(p) => p.target,
            None => continue,
        };
        let (x, y) = screen_of(&camera, viewport, target);
        interaction.pointer_down(x, y, viewport, &camera, &mut navigation);
        run_frames(&mut navigation, &mut camera, viewport, 180);
        log_camera(&camera);

        if let Some(&next) = stops.get(i + 1) {
            if let Some(p) = navigation.preset(next) {
                let (nx, ny) = screen_of(&camera, viewport, p.target);
                interaction.pointer_down(nx, ny, viewport, &camera, &mut navigation);
                log::info!(
                    "[demo] direct jump to {next} while locked: state stays {}",
                    navigation.view_state()
                );
            }
        }

        // Click empty space to breathe through the default view.
        interaction.pointer_down(5.0, 5.0, viewport, &camera, &mut navigation);
        run_frames(&mut navigation, &mut camera, viewport, 120);
    }

    interaction.destroy();
    log::info!("[demo] done in state `{}`", navigation.view_state());
}
