use invaders::entities::*;

fn bullet(id: u32) -> Entity {
    Entity {
        kind: Kind::PlayerBullet,
        id,
        x: 300.0,
        y: 400.0,
        velocity: 0.0,
        radius: 5.0,
    }
}

#[test]
fn kind_and_event_derives() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Kind::Ship, Kind::Ship);
    assert_ne!(Kind::Enemy, Kind::Shield);
    assert_ne!(Kind::PlayerBullet, Kind::EnemyBullet);

    assert_eq!(GameEvent::Shoot, GameEvent::Shoot);
    assert_eq!(GameEvent::Tick { elapsed: 3 }, GameEvent::Tick { elapsed: 3 });
    assert_ne!(GameEvent::Tick { elapsed: 3 }, GameEvent::Tick { elapsed: 4 });
    assert_ne!(GameEvent::Move(-1.0), GameEvent::Move(1.0));

    // Kind is Copy — passing it by value must not move it
    let kind = Kind::Enemy;
    let copied = kind;
    assert_eq!(kind, copied);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        ship: Entity {
            kind: Kind::Ship,
            id: 0,
            x: 300.0,
            y: 550.0,
            velocity: 0.0,
            radius: 20.0,
        },
        player_bullets: Vec::new(),
        enemies: Vec::new(),
        enemy_bullets: Vec::new(),
        shields: Vec::new(),
        exited: Vec::new(),
        obj_count: 15,
        game_over: false,
        score: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.ship.x = 99.0;
    cloned.score = 999;
    cloned.player_bullets.push(bullet(15));

    assert_eq!(original.ship.x, 300.0);
    assert_eq!(original.score, 0);
    assert!(original.player_bullets.is_empty());
}

#[test]
fn entity_equality_covers_every_field() {
    let a = bullet(15);
    assert_eq!(a, a.clone());

    let moved = Entity { y: 390.0, ..a.clone() };
    assert_ne!(a, moved);

    let reissued = Entity { id: 16, ..a.clone() };
    assert_ne!(a, reissued);
}
