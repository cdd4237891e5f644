/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG, so a seeded
/// RNG makes the whole event fold reproducible.

use rand::Rng;

use crate::entities::{Entity, GameEvent, GameState, Kind};

// ── Canvas & rule constants ──────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 600.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

pub const SHIP_RADIUS: f32 = 20.0;
pub const ENEMY_RADIUS: f32 = 20.0;
pub const SHIELD_RADIUS: f32 = 8.0;
pub const PLAYER_BULLET_RADIUS: f32 = 5.0;
pub const ENEMY_BULLET_RADIUS: f32 = 5.0;

/// Canvas units a player bullet climbs per tick.
pub const PLAYER_BULLET_SPEED: f32 = 10.0;
/// Canvas units an enemy bullet falls per tick.
pub const ENEMY_BULLET_SPEED: f32 = 6.0;

/// One enemy fires every this-many ticks.
pub const ENEMY_FIRE_INTERVAL: u64 = 80;
/// The formation takes one horizontal step every this-many ticks.
pub const ENEMY_STEP_INTERVAL: u64 = 7;
/// Vertical drop when the formation bounces off a canvas edge.
pub const ENEMY_DESCENT: f32 = 20.0;

pub const SCORE_PER_ENEMY: u32 = 10;
/// Enemy velocity multiplier for every wave after the first.
pub const WAVE_SPEED_UP: f32 = 6.0;

pub const ENEMY_ROWS: u32 = 3;
pub const ENEMY_COLS: u32 = 5;
pub const ENEMY_COUNT: u32 = ENEMY_ROWS * ENEMY_COLS;
pub const SHIELD_COUNT: u32 = 40;

// ── Entity factory ───────────────────────────────────────────────────────────

/// Build an entity of `kind` with its kind defaults.  Enemies and shields
/// interpret `(grid_x, grid_y)` as formation coordinates; the ship and
/// bullets take raw canvas coordinates.
pub fn create_entity(kind: Kind, grid_x: f32, grid_y: f32, id: u32) -> Entity {
    match kind {
        Kind::Enemy => Entity {
            kind,
            id,
            x: grid_x * 100.0 + 20.0,
            y: 100.0 + grid_y,
            velocity: -1.0,
            radius: ENEMY_RADIUS,
        },
        Kind::Shield => Entity {
            kind,
            id,
            // Columns 120 apart, five shields 15 apart within each column.
            x: grid_x * 120.0 + (id % 5) as f32 * 15.0 + 100.0,
            y: 480.0 - grid_y,
            velocity: 0.0,
            radius: SHIELD_RADIUS,
        },
        Kind::Ship => Entity {
            kind,
            id,
            x: grid_x,
            y: grid_y,
            velocity: 0.0,
            radius: SHIP_RADIUS,
        },
        Kind::PlayerBullet => Entity {
            kind,
            id,
            x: grid_x,
            y: grid_y,
            velocity: 0.0,
            radius: PLAYER_BULLET_RADIUS,
        },
        Kind::EnemyBullet => Entity {
            kind,
            id,
            x: grid_x,
            y: grid_y,
            velocity: 0.0,
            radius: ENEMY_BULLET_RADIUS,
        },
    }
}

// ── Motion rule ──────────────────────────────────────────────────────────────

/// Advance one entity by one tick.  Bullets move vertically at their fixed
/// kind speed; everything else slides horizontally by its own velocity and
/// wraps hard at the canvas edges: `< 0` lands on `CANVAS_WIDTH`,
/// `>= CANVAS_WIDTH` lands on 0 (boundary assignment, not modulo).
pub fn move_entity(e: &Entity) -> Entity {
    match e.kind {
        Kind::PlayerBullet => Entity {
            y: e.y - PLAYER_BULLET_SPEED,
            ..e.clone()
        },
        Kind::EnemyBullet => Entity {
            y: e.y + ENEMY_BULLET_SPEED,
            ..e.clone()
        },
        _ => {
            let x = e.x + e.velocity;
            let x = if x < 0.0 {
                CANVAS_WIDTH
            } else if x >= CANVAS_WIDTH {
                0.0
            } else {
                x
            };
            Entity { x, ..e.clone() }
        }
    }
}

// ── Collision resolution ─────────────────────────────────────────────────────

/// Proximity test: centres closer than the radius sum.  Symmetric.
pub fn bodies_collide(a: &Entity, b: &Entity) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt() < a.radius + b.radius
}

/// Resolve every collision on an already-advanced snapshot.
///
/// Player bullets clear enemies and enemy bullets chew through shields.
/// Both sides of a colliding pair are removed, by id — a bullet overlapping
/// two enemies takes out both and is itself removed once.  An enemy bullet
/// reaching the ship, or an enemy reaching the canvas bottom, ends the game.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut dead_enemies: Vec<u32> = Vec::new();
    let mut spent_player_bullets: Vec<u32> = Vec::new();
    for bullet in &state.player_bullets {
        for enemy in &state.enemies {
            if bodies_collide(bullet, enemy) {
                if !spent_player_bullets.contains(&bullet.id) {
                    spent_player_bullets.push(bullet.id);
                }
                if !dead_enemies.contains(&enemy.id) {
                    dead_enemies.push(enemy.id);
                }
            }
        }
    }

    let mut dead_shields: Vec<u32> = Vec::new();
    let mut spent_enemy_bullets: Vec<u32> = Vec::new();
    for bullet in &state.enemy_bullets {
        for shield in &state.shields {
            if bodies_collide(bullet, shield) {
                if !spent_enemy_bullets.contains(&bullet.id) {
                    spent_enemy_bullets.push(bullet.id);
                }
                if !dead_shields.contains(&shield.id) {
                    dead_shields.push(shield.id);
                }
            }
        }
    }

    let ship_hit = state
        .enemy_bullets
        .iter()
        .any(|b| bodies_collide(b, &state.ship));
    let breach = state.enemies.iter().any(|e| e.y >= CANVAS_HEIGHT);

    let (dead, enemies): (Vec<Entity>, Vec<Entity>) = state
        .enemies
        .iter()
        .cloned()
        .partition(|e| dead_enemies.contains(&e.id));
    let (spent_pb, player_bullets): (Vec<Entity>, Vec<Entity>) = state
        .player_bullets
        .iter()
        .cloned()
        .partition(|b| spent_player_bullets.contains(&b.id));
    let (spent_eb, enemy_bullets): (Vec<Entity>, Vec<Entity>) = state
        .enemy_bullets
        .iter()
        .cloned()
        .partition(|b| spent_enemy_bullets.contains(&b.id));
    let (broken, shields): (Vec<Entity>, Vec<Entity>) = state
        .shields
        .iter()
        .cloned()
        .partition(|s| dead_shields.contains(&s.id));

    let destroyed = dead.len() as u32;
    let mut exited = state.exited.clone();
    exited.extend(spent_pb);
    exited.extend(dead);
    exited.extend(spent_eb);
    exited.extend(broken);

    GameState {
        ship: state.ship.clone(),
        player_bullets,
        enemies,
        enemy_bullets,
        shields,
        exited,
        obj_count: state.obj_count,
        game_over: state.game_over || ship_hit || breach,
        score: state.score + destroyed * SCORE_PER_ENEMY,
    }
}

// ── Per-tick processor ───────────────────────────────────────────────────────

/// Advance the simulation by one logical tick.  All randomness comes through
/// `rng` so callers control determinism (tests use a seeded RNG).
pub fn step(state: &GameState, elapsed: u64, rng: &mut impl Rng) -> GameState {
    // 1. Expire bullets that have left the canvas.
    let (expired_pb, player_bullets): (Vec<Entity>, Vec<Entity>) = state
        .player_bullets
        .iter()
        .cloned()
        .partition(|b| b.y <= 0.0);
    let (expired_eb, enemy_bullets): (Vec<Entity>, Vec<Entity>) = state
        .enemy_bullets
        .iter()
        .cloned()
        .partition(|b| b.y >= CANVAS_HEIGHT);

    let mut exited = expired_pb;
    exited.extend(expired_eb);

    // 2. Move the ship and every surviving bullet.
    let moved = GameState {
        ship: move_entity(&state.ship),
        player_bullets: player_bullets.iter().map(move_entity).collect(),
        enemies: state.enemies.clone(),
        enemy_bullets: enemy_bullets.iter().map(move_entity).collect(),
        shields: state.shields.clone(),
        exited,
        obj_count: state.obj_count,
        game_over: state.game_over,
        score: state.score,
    };

    // 3. Settle collisions on the advanced positions.
    let mut next = resolve_collisions(&moved);

    // 4. Enemy fire wins over formation movement when both intervals line up.
    if elapsed % ENEMY_FIRE_INTERVAL == 0 && !next.enemies.is_empty() {
        let shooter = &next.enemies[rng.gen_range(0..next.enemies.len())];
        let bullet = create_entity(Kind::EnemyBullet, shooter.x, shooter.y, next.obj_count);
        next.enemy_bullets.push(bullet);
        next.obj_count += 1;
    } else if elapsed % ENEMY_STEP_INTERVAL == 0 {
        // 5. Formation step — or bounce-and-descend once any enemy sits
        //    outside the canvas.
        let at_edge = next
            .enemies
            .iter()
            .any(|e| e.x < 0.0 || e.x >= CANVAS_WIDTH);
        next.enemies = next
            .enemies
            .iter()
            .map(|e| {
                if at_edge {
                    Entity {
                        x: e.x - e.velocity,
                        y: e.y + ENEMY_DESCENT,
                        velocity: -e.velocity,
                        ..e.clone()
                    }
                } else {
                    Entity {
                        x: e.x + e.velocity,
                        ..e.clone()
                    }
                }
            })
            .collect();
    }

    next
}

// ── Top-level reducer ────────────────────────────────────────────────────────

/// Fold one event into the state.  `Restart` always wins; once the game is
/// over every other event is a no-op until a restart arrives.  A tick with
/// no enemies left regenerates the board with faster enemies.
pub fn reduce(state: &GameState, event: &GameEvent, rng: &mut impl Rng) -> GameState {
    match *event {
        GameEvent::Restart => fresh_session(state),
        _ if state.game_over => state.clone(),
        GameEvent::Move(v) => GameState {
            ship: Entity {
                velocity: v,
                ..state.ship.clone()
            },
            exited: Vec::new(),
            ..state.clone()
        },
        GameEvent::Shoot => {
            let bullet = create_entity(
                Kind::PlayerBullet,
                state.ship.x,
                state.ship.y,
                state.obj_count,
            );
            let mut player_bullets = state.player_bullets.clone();
            player_bullets.push(bullet);
            GameState {
                player_bullets,
                obj_count: state.obj_count + 1,
                exited: Vec::new(),
                ..state.clone()
            }
        }
        GameEvent::Tick { .. } if state.enemies.is_empty() => next_wave(state),
        GameEvent::Tick { elapsed } => step(state, elapsed, rng),
    }
}

// ── Initial state & session resets ───────────────────────────────────────────

/// The fixed starting layout: ship bottom-centre, 15 enemies in 3 rows of
/// 5, 40 shields in two 4-column clusters, id counter parked past the
/// enemy ids.
pub fn initial_state() -> GameState {
    let enemies = (0..ENEMY_COUNT)
        .map(|id| {
            create_entity(
                Kind::Enemy,
                (id % ENEMY_COLS) as f32,
                (id / ENEMY_COLS * 50) as f32,
                id,
            )
        })
        .collect();
    let shields = (0..SHIELD_COUNT)
        .map(|id| {
            let cluster_y = if id < SHIELD_COUNT / 2 { 0.0 } else { 10.0 };
            create_entity(Kind::Shield, (id / 5 % 4) as f32, cluster_y, id)
        })
        .collect();

    GameState {
        ship: create_entity(Kind::Ship, CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - 50.0, 0),
        player_bullets: Vec::new(),
        enemies,
        enemy_bullets: Vec::new(),
        shields,
        exited: Vec::new(),
        obj_count: ENEMY_COUNT,
        game_over: false,
        score: 0,
    }
}

/// Everything still alive except the ship — handed to the renderer as
/// `exited` when a reset throws the board away.  The ship's view survives
/// resets, so it stays out.
fn live_entities(state: &GameState) -> Vec<Entity> {
    let mut live = state.player_bullets.clone();
    live.extend(state.enemies.iter().cloned());
    live.extend(state.enemy_bullets.iter().cloned());
    live.extend(state.shields.iter().cloned());
    live
}

/// Full restart: score and id counter back to their initial values.
fn fresh_session(state: &GameState) -> GameState {
    GameState {
        exited: live_entities(state),
        ..initial_state()
    }
}

/// Wave cleared: regenerate the board from the starting layout with faster
/// enemies, keeping the score.
fn next_wave(state: &GameState) -> GameState {
    let mut next = initial_state();
    for enemy in &mut next.enemies {
        enemy.velocity *= WAVE_SPEED_UP;
    }
    next.score = state.score;
    next.exited = live_entities(state);
    next
}
