use std::collections::HashMap;

use glam::Vec3;

use crate::coord::{TileCoord, required_coords};
use crate::mesh::{TileMesh, build_tile_mesh};

/// One live ground tile: its lattice coordinate and the mesh synthesized at
/// creation. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Tile {
    coord: TileCoord,
    mesh: TileMesh,
}

impl Tile {
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn mesh(&self) -> &TileMesh {
        &self.mesh
    }
}

/// Coordinates created and removed by one streaming pass, in deterministic
/// order, so a GPU layer can mirror buffer lifecycle exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamDelta {
    pub created: Vec<TileCoord>,
    pub removed: Vec<TileCoord>,
}

impl StreamDelta {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

/// Per-frame streaming statistics for instrumentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamStats {
    pub created_this_frame: usize,
    pub removed_this_frame: usize,
    pub live_tiles: usize,
}

/// Keeps the live tile set equal to the required set around the camera.
///
/// There are no load/unload budgets: every required tile is created and
/// every stale tile removed in the same pass, so the invariant holds at the
/// end of each frame. Removal is a linear scan over live tiles; fine at this
/// scale (a spatial index is an open optimization, not a correctness need).
pub struct TerrainStreamer {
    tile_size: f32,
    steps: i32,
    tiles: HashMap<TileCoord, Tile>,
    stats: StreamStats,
}

impl TerrainStreamer {
    /// Create a streamer for the given tile edge length and view radius
    /// (both in world units).
    pub fn new(tile_size: f32, view_radius: f32) -> Self {
        assert!(tile_size > 0.0, "tile_size must be positive");
        assert!(view_radius >= 0.0, "view_radius must be non-negative");
        Self {
            tile_size,
            steps: (view_radius / tile_size) as i32,
            tiles: HashMap::new(),
            stats: StreamStats::default(),
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Reconcile live tiles against the camera's current position.
    ///
    /// Runs unconditionally every frame; when the anchor tile has not
    /// changed, nothing is created or removed and the pass is a no-op scan.
    pub fn update(&mut self, eye: Vec3) -> StreamDelta {
        let _span = tracing::trace_span!("terrain_update").entered();

        let anchor = TileCoord::from_world(eye, self.tile_size);
        let required = required_coords(anchor, self.steps);

        let mut created = Vec::new();
        for coord in &required {
            if !self.tiles.contains_key(coord) {
                let mesh = build_tile_mesh(*coord, self.tile_size);
                self.tiles.insert(*coord, Tile { coord: *coord, mesh });
                created.push(*coord);
                tracing::debug!(%coord, "tile created");
            }
        }

        // Stale = live but no longer required.
        let required_set: std::collections::HashSet<TileCoord> =
            required.into_iter().collect();
        let mut removed: Vec<TileCoord> = self
            .tiles
            .keys()
            .filter(|c| !required_set.contains(c))
            .copied()
            .collect();
        removed.sort();
        for coord in &removed {
            self.tiles.remove(coord);
            tracing::debug!(%coord, "tile removed");
        }

        self.stats = StreamStats {
            created_this_frame: created.len(),
            removed_this_frame: removed.len(),
            live_tiles: self.tiles.len(),
        };
        tracing::trace!(
            created = created.len(),
            removed = removed.len(),
            live = self.tiles.len(),
            "terrain update complete"
        );

        StreamDelta { created, removed }
    }

    /// Number of live tiles.
    pub fn live_count(&self) -> usize {
        self.tiles.len()
    }

    /// Whether a tile is currently live.
    pub fn contains(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Access a live tile.
    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// Iterate over all live tiles.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Statistics from the last update.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn live_set(s: &TerrainStreamer) -> HashSet<TileCoord> {
        s.tiles().map(|t| t.coord()).collect()
    }

    #[test]
    fn first_pass_fills_the_window() {
        let mut streamer = TerrainStreamer::new(10.0, 50.0);
        let delta = streamer.update(Vec3::ZERO);
        assert_eq!(delta.created.len(), 121);
        assert!(delta.removed.is_empty());
        assert_eq!(streamer.live_count(), 121);
    }

    #[test]
    fn live_set_equals_required_set() {
        let mut streamer = TerrainStreamer::new(10.0, 50.0);
        let path = [
            Vec3::ZERO,
            Vec3::new(12.0, 5.0, 0.0),
            Vec3::new(12.0, 5.0, -33.0),
            Vec3::new(-140.0, 5.0, 260.0),
            Vec3::new(0.5, 5.0, 0.5),
        ];
        for eye in path {
            streamer.update(eye);
            let anchor = TileCoord::from_world(eye, 10.0);
            let required: HashSet<TileCoord> =
                required_coords(anchor, 5).into_iter().collect();
            assert_eq!(live_set(&streamer), required, "eye {eye:?}");
        }
    }

    #[test]
    fn crossing_a_boundary_slides_the_window() {
        let mut streamer = TerrainStreamer::new(10.0, 50.0);
        streamer.update(Vec3::ZERO);

        // x=12 snaps the anchor to lattice x=1: the window gains the x=6
        // column (world x=60) and loses x=-5 (world x=-50).
        let delta = streamer.update(Vec3::new(12.0, 5.0, 0.0));
        assert_eq!(delta.created.len(), 11);
        assert_eq!(delta.removed.len(), 11);
        assert!(delta.created.iter().all(|c| c.x == 6));
        assert!(delta.removed.iter().all(|c| c.x == -5));
        assert_eq!(streamer.live_count(), 121);
    }

    #[test]
    fn same_anchor_pass_is_a_noop() {
        let mut streamer = TerrainStreamer::new(10.0, 50.0);
        streamer.update(Vec3::ZERO);
        // Moves within the anchor tile do not change the required set.
        let delta = streamer.update(Vec3::new(4.0, 5.0, 9.9));
        assert!(delta.is_empty());
        assert_eq!(streamer.stats().created_this_frame, 0);
        assert_eq!(streamer.stats().removed_this_frame, 0);
        assert_eq!(streamer.stats().live_tiles, 121);
    }

    #[test]
    fn no_duplicate_tiles_after_revisit() {
        let mut streamer = TerrainStreamer::new(10.0, 50.0);
        streamer.update(Vec3::ZERO);
        streamer.update(Vec3::new(200.0, 5.0, 0.0));
        streamer.update(Vec3::ZERO);
        assert_eq!(streamer.live_count(), 121);
        assert!(streamer.contains(TileCoord::new(0, 0)));
    }

    #[test]
    fn deltas_are_deterministic() {
        let path = [
            Vec3::ZERO,
            Vec3::new(12.0, 5.0, 0.0),
            Vec3::new(25.0, 5.0, -18.0),
        ];
        let mut a = TerrainStreamer::new(10.0, 50.0);
        let mut b = TerrainStreamer::new(10.0, 50.0);
        for eye in path {
            assert_eq!(a.update(eye), b.update(eye));
        }
    }

    #[test]
    fn negative_coordinates_snap_down() {
        let mut streamer = TerrainStreamer::new(10.0, 50.0);
        streamer.update(Vec3::new(-0.1, 5.0, -0.1));
        // floor(-0.01) = -1: the window centers one tile into the negative
        // quadrant.
        assert!(streamer.contains(TileCoord::new(-6, -6)));
        assert!(!streamer.contains(TileCoord::new(5, 5)));
    }

    #[test]
    fn tiles_carry_their_mesh() {
        let mut streamer = TerrainStreamer::new(10.0, 50.0);
        streamer.update(Vec3::ZERO);
        let tile = streamer.tile(TileCoord::new(0, 0)).unwrap();
        assert!(!tile.mesh().vertices.is_empty());
        assert!(!tile.mesh().indices.is_empty());
    }

    #[test]
    fn zero_view_radius_keeps_one_tile() {
        let mut streamer = TerrainStreamer::new(10.0, 0.0);
        let delta = streamer.update(Vec3::ZERO);
        assert_eq!(delta.created.len(), 1);
        assert_eq!(streamer.live_count(), 1);
    }
}
