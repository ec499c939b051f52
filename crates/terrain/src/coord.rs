use glam::Vec3;

/// A tile coordinate on the ground lattice (ignoring Y).
///
/// Structural key: the tile's world-space center is `(x, 0, z) * tile_size`.
/// Using lattice indices directly as the map key avoids the string
/// formatting/parsing a name-keyed scene graph would need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

impl TileCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Snap a world position down to the lattice (floor division), giving
    /// the anchor coordinate.
    pub fn from_world(pos: Vec3, tile_size: f32) -> Self {
        Self {
            x: (pos.x / tile_size).floor() as i32,
            z: (pos.z / tile_size).floor() as i32,
        }
    }

    /// World-space center of this tile.
    pub fn world_center(&self, tile_size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * tile_size, 0.0, self.z as f32 * tile_size)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Enumerate the required coordinates: every lattice point within `steps`
/// of the anchor on both axes, endpoint-inclusive, in row-major order.
///
/// This is a square window (side 2*steps + 1), deliberately not a circular
/// radius test.
pub fn required_coords(anchor: TileCoord, steps: i32) -> Vec<TileCoord> {
    let mut coords = Vec::with_capacity(((2 * steps + 1) * (2 * steps + 1)) as usize);
    for dx in -steps..=steps {
        for dz in -steps..=steps {
            coords.push(TileCoord::new(anchor.x + dx, anchor.z + dz));
        }
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_world_snaps_down() {
        let c = TileCoord::from_world(Vec3::new(12.0, 5.0, -0.1), 10.0);
        assert_eq!(c, TileCoord::new(1, -1));

        let c = TileCoord::from_world(Vec3::new(0.0, 0.0, 0.0), 10.0);
        assert_eq!(c, TileCoord::new(0, 0));

        let c = TileCoord::from_world(Vec3::new(-12.0, 0.0, 29.9), 10.0);
        assert_eq!(c, TileCoord::new(-2, 2));
    }

    #[test]
    fn world_center_round_trips() {
        let c = TileCoord::new(3, -4);
        let center = c.world_center(10.0);
        assert_eq!(center, Vec3::new(30.0, 0.0, -40.0));
        assert_eq!(TileCoord::from_world(center, 10.0), c);
    }

    #[test]
    fn required_window_is_endpoint_inclusive() {
        // Tile size 10, view radius 50: multiples of 10 in [-50, 50] on both
        // axes, 11 x 11 = 121 tiles.
        let coords = required_coords(TileCoord::new(0, 0), 5);
        assert_eq!(coords.len(), 121);
        assert!(coords.contains(&TileCoord::new(-5, -5)));
        assert!(coords.contains(&TileCoord::new(5, 5)));
        assert!(!coords.contains(&TileCoord::new(6, 0)));
    }

    #[test]
    fn window_slides_with_anchor() {
        let at_origin = required_coords(TileCoord::new(0, 0), 5);
        let shifted = required_coords(TileCoord::new(1, 0), 5);
        assert_eq!(shifted.len(), at_origin.len());
        // New column at x=6, dropped column at x=-5.
        assert!(shifted.contains(&TileCoord::new(6, 0)));
        assert!(!shifted.contains(&TileCoord::new(-5, 0)));
    }

    #[test]
    fn enumeration_order_is_deterministic() {
        let a = required_coords(TileCoord::new(2, -3), 2);
        let b = required_coords(TileCoord::new(2, -3), 2);
        assert_eq!(a, b);
        assert_eq!(a[0], TileCoord::new(0, -5));
    }
}
