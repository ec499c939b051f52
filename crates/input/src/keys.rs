use glam::Vec3;

/// The four directional keys the scene responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// Per-frame displacement on the ground plane, derived from held keys.
///
/// Y is absent on purpose: motion is planar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveVector {
    pub x: f32,
    pub z: f32,
}

impl MoveVector {
    /// The displacement as a full 3D vector (y = 0).
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// Length of the displacement this frame.
    pub fn magnitude(&self) -> f32 {
        self.as_vec3().length()
    }
}

/// Held/released state for the four arrow keys plus the cached movement
/// vector derived from them.
///
/// Mutated by input events, read once per frame by the integrator. The
/// movement vector is recomputed inside [`KeyState::set`], so reads are free.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    movement: MoveVector,
    speed: f32,
}

impl KeyState {
    /// Create key state producing `speed` units of displacement per held key.
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    /// Record a key-down (`held = true`) or key-up (`held = false`) event
    /// and recompute the movement vector.
    ///
    /// OS key-repeat delivers key-down for an already-held key; that re-sets
    /// the same flag and recomputes the same vector, a no-op.
    pub fn set(&mut self, key: ArrowKey, held: bool) {
        match key {
            ArrowKey::Up => self.up = held,
            ArrowKey::Down => self.down = held,
            ArrowKey::Left => self.left = held,
            ArrowKey::Right => self.right = held,
        }
        self.recompute();
        tracing::trace!(?key, held, movement = ?self.movement, "key state changed");
    }

    /// Whether a specific key is currently held.
    pub fn is_held(&self, key: ArrowKey) -> bool {
        match key {
            ArrowKey::Up => self.up,
            ArrowKey::Down => self.down,
            ArrowKey::Left => self.left,
            ArrowKey::Right => self.right,
        }
    }

    /// The current per-frame displacement.
    pub fn movement(&self) -> MoveVector {
        self.movement
    }

    /// Zero both axes, then add each held key's signed contribution.
    /// Opposing keys cancel exactly; that is deliberate.
    fn recompute(&mut self) {
        let mut mv = MoveVector::default();
        if self.up {
            mv.z -= self.speed;
        }
        if self.down {
            mv.z += self.speed;
        }
        if self.left {
            mv.x -= self.speed;
        }
        if self.right {
            mv.x += self.speed;
        }
        self.movement = mv;
    }
}
