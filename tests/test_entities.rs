use space_survival::entities::*;

fn ship_at(x: i32, y: i32) -> SpaceObject {
    SpaceObject::new(0, x, y, Kind::Ship { health: MAX_HEALTH, score: 0 })
}

// ── Per-tick behaviour ────────────────────────────────────────────────────────

#[test]
fn bullet_rises_every_tick() {
    let mut bullet = SpaceObject::new(1, 5, 9, Kind::Bullet);
    bullet.tick(1);
    assert_eq!(bullet.position(), (5, 8));
    bullet.tick(2);
    assert_eq!(bullet.position(), (5, 7));
}

#[test]
fn descending_enemies_move_only_on_tenth_ticks() {
    let mut asteroid = SpaceObject::new(1, 3, 0, Kind::Asteroid);
    let mut enemy = SpaceObject::new(2, 7, 4, Kind::Enemy);
    for tick in 1..10 {
        asteroid.tick(tick);
        enemy.tick(tick);
    }
    assert_eq!(asteroid.position(), (3, 0));
    assert_eq!(enemy.position(), (7, 4));

    asteroid.tick(10);
    enemy.tick(10);
    assert_eq!(asteroid.position(), (3, 1));
    assert_eq!(enemy.position(), (7, 5));
}

#[test]
fn ship_and_power_ups_are_stationary() {
    let mut ship = ship_at(5, 10);
    let mut shield = SpaceObject::new(1, 2, 0, Kind::ShieldPowerUp);
    let mut health = SpaceObject::new(2, 8, 0, Kind::HealthPowerUp);
    for tick in 1..=20 {
        ship.tick(tick);
        shield.tick(tick);
        health.tick(tick);
    }
    assert_eq!(ship.position(), (5, 10));
    assert_eq!(shield.position(), (2, 0));
    assert_eq!(health.position(), (8, 0));
}

// ── Movement & bounds ─────────────────────────────────────────────────────────

#[test]
fn move_applies_unit_vector() {
    let mut ship = ship_at(5, 10);
    assert_eq!(ship.try_move(Direction::Up), Ok(()));
    assert_eq!(ship.position(), (5, 9));
    assert_eq!(ship.try_move(Direction::Down), Ok(()));
    assert_eq!(ship.position(), (5, 10));
    assert_eq!(ship.try_move(Direction::Left), Ok(()));
    assert_eq!(ship.position(), (4, 10));
    assert_eq!(ship.try_move(Direction::Right), Ok(()));
    assert_eq!(ship.position(), (5, 10));
}

#[test]
fn move_rejected_at_each_edge_without_mutation() {
    let mut ship = ship_at(0, 0);
    assert_eq!(ship.try_move(Direction::Up), Err(OutOfBounds { edge: Edge::Top }));
    assert_eq!(ship.try_move(Direction::Left), Err(OutOfBounds { edge: Edge::Left }));
    assert_eq!(ship.position(), (0, 0));

    let mut ship = ship_at(9, 19); // GAME_WIDTH - 1, GAME_HEIGHT - 1
    assert_eq!(ship.try_move(Direction::Right), Err(OutOfBounds { edge: Edge::Right }));
    assert_eq!(ship.try_move(Direction::Down), Err(OutOfBounds { edge: Edge::Bottom }));
    assert_eq!(ship.position(), (9, 19));
}

#[test]
fn out_of_bounds_messages_name_the_direction() {
    assert_eq!(
        OutOfBounds { edge: Edge::Right }.to_string(),
        "Cannot move right. Out of bounds!"
    );
    assert_eq!(
        OutOfBounds { edge: Edge::Top }.to_string(),
        "Cannot move up. Out of bounds!"
    );
}

// ── Ship health & score ───────────────────────────────────────────────────────

#[test]
fn damage_clamps_at_zero() {
    // Scenario: health 15, two asteroid hits of 10
    let mut ship = ship_at(5, 10);
    ship.take_damage(85); // down to 15
    assert_eq!(ship.health(), 15);
    ship.take_damage(10);
    assert_eq!(ship.health(), 5);
    ship.take_damage(10);
    assert_eq!(ship.health(), 0); // not negative
}

#[test]
fn heal_clamps_at_max() {
    let mut ship = ship_at(5, 10);
    ship.take_damage(30);
    ship.heal(1000);
    assert_eq!(ship.health(), MAX_HEALTH);
}

#[test]
fn clamping_survives_extreme_magnitudes() {
    let mut ship = ship_at(5, 10);
    ship.take_damage(i32::MAX);
    assert_eq!(ship.health(), 0);
    ship.heal(i32::MAX);
    assert_eq!(ship.health(), MAX_HEALTH);
    ship.take_damage(i32::MIN); // saturates instead of overflowing
    assert_eq!(ship.health(), MAX_HEALTH);
}

#[test]
fn score_is_monotonic() {
    let mut ship = ship_at(5, 10);
    ship.add_score(50);
    ship.add_score(0);
    ship.add_score(50);
    assert_eq!(ship.score(), 100);
}

#[test]
fn ship_state_is_noop_on_other_variants() {
    let mut bullet = SpaceObject::new(1, 5, 5, Kind::Bullet);
    bullet.take_damage(10);
    bullet.heal(10);
    bullet.add_score(10);
    assert_eq!(bullet.health(), 0);
    assert_eq!(bullet.score(), 0);
}

// ── Power-up effects ──────────────────────────────────────────────────────────

#[test]
fn health_power_up_heals_by_fixed_amount() {
    let mut ship = ship_at(5, 10);
    ship.take_damage(50);
    let power_up = SpaceObject::new(1, 5, 10, Kind::HealthPowerUp);
    power_up.apply_effect(&mut ship);
    assert_eq!(ship.health(), 50 + HEALING_EFFECT);
}

#[test]
fn shield_power_up_awards_fixed_score() {
    let mut ship = ship_at(5, 10);
    let power_up = SpaceObject::new(1, 5, 10, Kind::ShieldPowerUp);
    power_up.apply_effect(&mut ship);
    assert_eq!(ship.score(), SHIELD_EFFECT);
    assert_eq!(ship.health(), MAX_HEALTH);
}

// ── Render descriptors ────────────────────────────────────────────────────────

#[test]
fn render_info_is_distinct_per_variant() {
    let kinds = [
        Kind::Ship { health: MAX_HEALTH, score: 0 },
        Kind::Bullet,
        Kind::Asteroid,
        Kind::Enemy,
        Kind::ShieldPowerUp,
        Kind::HealthPowerUp,
    ];
    let infos: Vec<RenderInfo> = kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| SpaceObject::new(i as u32, 0, 0, kind).render_info())
        .collect();
    for (i, a) in infos.iter().enumerate() {
        for b in &infos[i + 1..] {
            assert_ne!(a.glyph, b.glyph);
            assert_ne!(a.asset, b.asset);
        }
    }
}
