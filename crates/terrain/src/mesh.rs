use crate::coord::TileCoord;
use glam::Vec3;

/// Quads per tile edge.
pub const TILE_SUBDIVISIONS: u32 = 10;

/// How many times the grid texture repeats across one tile.
pub const TILE_UV_REPEAT: f32 = 5.0;

/// One tile vertex, in tile-local space (the renderer translates the whole
/// tile to its world center). Plain arrays so no GPU crate leaks in here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Geometry for one ground tile: a subdivided plane lying in XZ.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMesh {
    pub vertices: Vec<TileVertex>,
    pub indices: Vec<u32>,
}

/// Terrain height at a world position.
///
/// Extension hook: tiles are built as subdivided planes so a non-flat
/// heightfield only has to change this function. It currently flattens
/// every vertex to 0.
fn height_at(_world_x: f32, _world_z: f32) -> f32 {
    0.0
}

/// Synthesize the mesh for the tile at `coord`.
///
/// A square plane of edge `tile_size` with [`TILE_SUBDIVISIONS`]^2 quads,
/// centered on the tile's world center, heights from [`height_at`] and
/// normals recomputed from those heights. UVs run 0..[`TILE_UV_REPEAT`]
/// across the tile so a wrapping grid texture repeats.
pub fn build_tile_mesh(coord: TileCoord, tile_size: f32) -> TileMesh {
    let n = TILE_SUBDIVISIONS;
    let side = n + 1;
    let center = coord.world_center(tile_size);
    let half = tile_size / 2.0;
    let step = tile_size / n as f32;

    let mut vertices = Vec::with_capacity((side * side) as usize);
    for j in 0..side {
        for i in 0..side {
            let local_x = -half + i as f32 * step;
            let local_z = -half + j as f32 * step;
            let y = height_at(center.x + local_x, center.z + local_z);
            let normal = normal_at(center.x + local_x, center.z + local_z, step);
            vertices.push(TileVertex {
                position: [local_x, y, local_z],
                normal: [normal.x, normal.y, normal.z],
                uv: [
                    i as f32 / n as f32 * TILE_UV_REPEAT,
                    j as f32 / n as f32 * TILE_UV_REPEAT,
                ],
            });
        }
    }

    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for j in 0..n {
        for i in 0..n {
            let a = j * side + i;
            let b = a + 1;
            let c = a + side;
            let d = c + 1;
            // Counter-clockwise seen from +Y.
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    TileMesh { vertices, indices }
}

/// Surface normal from central differences of the height function.
/// Flat heights yield +Y everywhere.
fn normal_at(world_x: f32, world_z: f32, step: f32) -> Vec3 {
    let dx = height_at(world_x + step, world_z) - height_at(world_x - step, world_z);
    let dz = height_at(world_x, world_z + step) - height_at(world_x, world_z - step);
    Vec3::new(-dx, 2.0 * step, -dz).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let mesh = build_tile_mesh(TileCoord::new(0, 0), 10.0);
        let side = TILE_SUBDIVISIONS + 1;
        assert_eq!(mesh.vertices.len(), (side * side) as usize);
        assert_eq!(
            mesh.indices.len(),
            (TILE_SUBDIVISIONS * TILE_SUBDIVISIONS * 6) as usize
        );
    }

    #[test]
    fn all_heights_flattened_to_zero() {
        let mesh = build_tile_mesh(TileCoord::new(7, -3), 10.0);
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn normals_point_straight_up() {
        let mesh = build_tile_mesh(TileCoord::new(-2, 5), 10.0);
        for v in &mesh.vertices {
            assert!((v.normal[0]).abs() < 1e-6);
            assert!((v.normal[1] - 1.0).abs() < 1e-6);
            assert!((v.normal[2]).abs() < 1e-6);
        }
    }

    #[test]
    fn uvs_span_the_repeat_factor() {
        let mesh = build_tile_mesh(TileCoord::new(0, 0), 10.0);
        let first = mesh.vertices.first().unwrap();
        let last = mesh.vertices.last().unwrap();
        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(last.uv, [TILE_UV_REPEAT, TILE_UV_REPEAT]);
    }

    #[test]
    fn plane_spans_tile_extent() {
        let mesh = build_tile_mesh(TileCoord::new(0, 0), 10.0);
        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.position[0]).collect();
        let min = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min, -5.0);
        assert_eq!(max, 5.0);
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mesh = build_tile_mesh(TileCoord::new(1, 1), 10.0);
        let count = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_above() {
        let mesh = build_tile_mesh(TileCoord::new(0, 0), 10.0);
        for tri in mesh.indices.chunks_exact(3) {
            let a = Vec3::from_array(mesh.vertices[tri[0] as usize].position);
            let b = Vec3::from_array(mesh.vertices[tri[1] as usize].position);
            let c = Vec3::from_array(mesh.vertices[tri[2] as usize].position);
            let face_normal = (b - a).cross(c - a);
            assert!(face_normal.y > 0.0);
        }
    }
}
