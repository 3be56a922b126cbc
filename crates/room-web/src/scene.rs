use glam::{Mat4, Vec3};
use room_core::{Hotspot, HoverStyle, Mesh, MeshId, Navigation};

// Proxy pick surfaces for the room's interactive objects. Positions and
// sizes match the baked room model; the renderer draws its own geometry.

pub const PC_SCREEN: MeshId = MeshId(1);
pub const MAC_SCREEN: MeshId = MeshId(2);
pub const TV: MeshId = MeshId(3);
pub const BOOKSHELF: MeshId = MeshId(4);

pub fn build_hotspots() -> Vec<Hotspot> {
    vec![
        Hotspot {
            mesh: Mesh::quad(
                PC_SCREEN,
                Mat4::from_translation(Vec3::new(-1.5, 1.8, 0.5)) * Mat4::from_rotation_y(-0.35),
                2.6,
                1.5,
            ),
            state: "pc_screen".to_string(),
            style: HoverStyle::Tint,
        },
        Hotspot {
            mesh: Mesh::quad(
                MAC_SCREEN,
                Mat4::from_translation(Vec3::new(1.5, 1.5, 1.0)) * Mat4::from_rotation_y(0.2),
                2.2,
                1.3,
            ),
            state: "mac_screen".to_string(),
            style: HoverStyle::Tint,
        },
        Hotspot {
            mesh: Mesh::quad(
                TV,
                Mat4::from_translation(Vec3::new(4.19, 2.67, 1.82)) * Mat4::from_rotation_y(-1.57),
                4.28,
                2.42,
            ),
            state: "tv".to_string(),
            style: HoverStyle::Reveal,
        },
        Hotspot {
            mesh: Mesh::quad(
                BOOKSHELF,
                Mat4::from_translation(Vec3::new(-3.7, 4.7, -4.0)),
                2.2,
                1.0,
            ),
            state: "bookshelf".to_string(),
            style: HoverStyle::Reveal,
        },
    ]
}

/// Re-derive the locked-view presets from the live pick geometry: screens at
/// arm's length, the larger surfaces a touch closer.
pub fn seed_presets(navigation: &mut Navigation, hotspots: &[Hotspot]) {
    for hotspot in hotspots {
        let radius = match hotspot.state.as_str() {
            "pc_screen" | "mac_screen" => 6.0,
            _ => 5.0,
        };
        navigation.set_preset_from_mesh(&hotspot.state, &hotspot.mesh, radius);
    }
}
