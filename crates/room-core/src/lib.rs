//! Host-agnostic navigation and interaction logic for the 3D room scene.
//!
//! Nothing in this crate touches a windowing system or a renderer. The host
//! forwards pointer/touch/wheel events into [`Navigation`] and
//! [`Interaction`], calls [`Navigation::update`] once per animation frame,
//! and reads back the resulting [`Camera`] pose, hover tint, and cursor hint.

pub mod camera;
pub mod constants;
pub mod interaction;
pub mod mesh;
pub mod navigation;
pub mod preset;
pub mod spherical;

pub use camera::*;
pub use constants::*;
pub use interaction::*;
pub use mesh::*;
pub use navigation::*;
pub use preset::*;
pub use spherical::*;
