use glam::{Mat4, Vec3};

/// Stable handle for a pickable scene object. The host assigns ids when it
/// registers geometry; the core never hashes render objects by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// CPU-side pick geometry for one scene object: a world transform plus the
/// triangle list used for ray tests and preset derivation. Render-side
/// buffers stay with the host.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub id: MeshId,
    pub transform: Mat4,
    pub positions: Vec<Vec3>,
    pub indices: Option<Vec<u32>>,
}

impl Mesh {
    pub fn new(
        id: MeshId,
        transform: Mat4,
        positions: Vec<Vec3>,
        indices: Option<Vec<u32>>,
    ) -> Self {
        Self {
            id,
            transform,
            positions,
            indices,
        }
    }

    /// Axis-aligned `width` x `height` plane centered at the local origin,
    /// facing +Z. Stand-in pick surface for screens and proxy hotspots.
    pub fn quad(id: MeshId, transform: Mat4, width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        let positions = vec![
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ];
        Self::new(id, transform, positions, Some(vec![0, 1, 2, 0, 2, 3]))
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(idx) => idx.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// World-space vertices of one triangle, or `None` when an index is out
    /// of bounds.
    fn triangle_world(&self, tri: usize) -> Option<[Vec3; 3]> {
        let (i0, i1, i2) = match &self.indices {
            Some(idx) => (
                *idx.get(tri * 3)? as usize,
                *idx.get(tri * 3 + 1)? as usize,
                *idx.get(tri * 3 + 2)? as usize,
            ),
            None => (tri * 3, tri * 3 + 1, tri * 3 + 2),
        };
        Some([
            self.transform.transform_point3(*self.positions.get(i0)?),
            self.transform.transform_point3(*self.positions.get(i1)?),
            self.transform.transform_point3(*self.positions.get(i2)?),
        ])
    }

    /// Mean of the transformed vertex positions; `None` for empty geometry.
    pub fn world_centroid(&self) -> Option<Vec3> {
        if self.positions.is_empty() {
            return None;
        }
        let sum: Vec3 = self
            .positions
            .iter()
            .map(|p| self.transform.transform_point3(*p))
            .sum();
        Some(sum / self.positions.len() as f32)
    }

    /// Unit face normal of the first triangle in world space; `None` when the
    /// mesh has no triangle or the triangle is degenerate.
    pub fn face_normal_world(&self) -> Option<Vec3> {
        let [v0, v1, v2] = self.triangle_world(0)?;
        let normal = (v1 - v0).cross(v2 - v0);
        if normal.length_squared() <= f32::EPSILON {
            return None;
        }
        Some(normal.normalize())
    }

    /// Nearest intersection distance along `dir`, testing every triangle.
    pub fn raycast(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let mut best: Option<f32> = None;
        for tri in 0..self.triangle_count() {
            if let Some([v0, v1, v2]) = self.triangle_world(tri) {
                if let Some(t) = ray_triangle(origin, dir, v0, v1, v2) {
                    match best {
                        Some(bt) if t >= bt => {}
                        _ => best = Some(t),
                    }
                }
            }
        }
        best
    }
}

/// Moeller-Trumbore ray/triangle intersection, double-sided. Returns the
/// distance along `dir`, `None` on a miss or a ray parallel to the plane.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
