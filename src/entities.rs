/// All game data types — pure values, no logic.

// ── Entities ──────────────────────────────────────────────────────────────────

/// What an entity is, and therefore how it moves and what it collides with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Ship,
    Enemy,
    PlayerBullet,
    EnemyBullet,
    Shield,
}

/// Any drawable, collidable game object.
///
/// `velocity` is horizontal speed for the ship and enemies (its sign flips
/// when the enemy formation bounces off an edge); bullets move at a fixed
/// kind-determined speed and shields never move, so both leave it at 0.0.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub kind: Kind,
    /// Stable across frames — the renderer correlates view elements by
    /// (kind, id).  Bullet ids are issued by `GameState::obj_count` and are
    /// never reused within one session generation.
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub radius: f32,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// One unit of input to the reducer.  The adapter delivers these in a total
/// order; the reducer matches on them exhaustively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// One logical time step.  `elapsed` is a monotonic tick counter owned
    /// by the event source (a precondition, not validated here).
    Tick { elapsed: u64 },
    /// Set the ship's horizontal velocity: -1.0 left, 0.0 stop, 1.0 right.
    Move(f32),
    /// Fire a player bullet from the ship's current position.
    Shoot,
    /// Discard everything and start a fresh session.
    Restart,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One immutable snapshot of the whole game.  Every accepted event produces
/// a brand-new snapshot; nothing is ever mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ship: Entity,
    pub player_bullets: Vec<Entity>,
    pub enemies: Vec<Entity>,
    pub enemy_bullets: Vec<Entity>,
    pub shields: Vec<Entity>,
    /// Entities removed by the event that produced this snapshot.  The
    /// renderer detaches their views; the next snapshot starts over empty.
    pub exited: Vec<Entity>,
    /// Next free entity id for spawned bullets.
    pub obj_count: u32,
    /// Sticky once set; only a `Restart` clears it.
    pub game_over: bool,
    pub score: u32,
}
