use bytemuck::{Pod, Zeroable};

/// Vertex layout shared by tiles and the sphere.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Longitude/latitude bands of the sphere mesh.
pub(crate) const SPHERE_SEGMENTS: u32 = 32;

/// Generate a UV sphere of the given radius, centered at the origin.
///
/// `SPHERE_SEGMENTS` bands in both directions; UVs wrap the texture once
/// around. The sphere is rendered with a model matrix carrying position and
/// rolling rotation, so vertices stay in local space.
pub(crate) fn sphere_mesh(radius: f32) -> (Vec<Vertex>, Vec<u32>) {
    let stacks = SPHERE_SEGMENTS;
    let sectors = SPHERE_SEGMENTS;

    let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
    for i in 0..=stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32;
        let y = phi.cos();
        let ring = phi.sin();
        for j in 0..=sectors {
            let theta = std::f32::consts::TAU * j as f32 / sectors as f32;
            let x = ring * theta.cos();
            let z = ring * theta.sin();
            vertices.push(Vertex {
                position: [x * radius, y * radius, z * radius],
                normal: [x, y, z],
                uv: [
                    j as f32 / sectors as f32,
                    i as f32 / stacks as f32,
                ],
            });
        }
    }

    let stride = sectors + 1;
    let mut indices = Vec::with_capacity((stacks * sectors * 6) as usize);
    for i in 0..stacks {
        for j in 0..sectors {
            let a = i * stride + j;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts() {
        let (verts, indices) = sphere_mesh(1.0);
        let side = SPHERE_SEGMENTS + 1;
        assert_eq!(verts.len(), (side * side) as usize);
        assert_eq!(
            indices.len(),
            (SPHERE_SEGMENTS * SPHERE_SEGMENTS * 6) as usize
        );
    }

    #[test]
    fn vertices_lie_on_the_radius() {
        let radius = 2.5;
        let (verts, _) = sphere_mesh(radius);
        for v in &verts {
            let len =
                (v.position[0].powi(2) + v.position[1].powi(2) + v.position[2].powi(2)).sqrt();
            assert!((len - radius).abs() < 1e-4);
        }
    }

    #[test]
    fn normals_are_unit_and_radial() {
        let radius = 3.0;
        let (verts, _) = sphere_mesh(radius);
        for v in &verts {
            let n = (v.normal[0].powi(2) + v.normal[1].powi(2) + v.normal[2].powi(2)).sqrt();
            assert!((n - 1.0).abs() < 1e-4);
            for k in 0..3 {
                assert!((v.normal[k] * radius - v.position[k]).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn indices_stay_in_bounds() {
        let (verts, indices) = sphere_mesh(1.0);
        let count = verts.len() as u32;
        assert!(indices.iter().all(|&i| i < count));
    }
}
