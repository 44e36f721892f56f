use bevy_ecs::prelude::{Schedule, World};
use glam::Vec2;
use path_particles::animation::PropertyCurve;
use path_particles::config::ParticleSystemConfig;
use path_particles::ecs::Time;
use path_particles::particles::*;
use path_particles::resources::TextureLibrary;
use std::sync::Arc;

const ART_JSON: &str = r#"{
    "framerate": 4,
    "loop": true,
    "textures": [
        "spark1.png",
        { "texture": "spark2.png", "count": 2 },
        "spark3.png"
    ]
}"#;

#[test]
fn test_path_particles_in_schedule() {
    let config = ParticleSystemConfig::from_toml_str(
        r#"
        verbose = true

        [pool]
        capacity = 8
        "#,
    )
    .unwrap();

    let mut library = TextureLibrary::new();
    let art = parse_art_json(ART_JSON, &mut library).unwrap();
    assert_eq!(art[0].frame_count(), 4);
    assert_eq!(art[0].duration, 1.0);

    let extra = PathConfig::from_json(r#"{ "path": "x * 0 + 3" }"#).unwrap();
    let parsed = PathParticleService::parse_path_config(Some(&extra), config.verbose);
    assert!(parsed.path.is_some());

    let mut world = World::new();
    world.insert_resource(Time::default());
    world.insert_resource(ParticlePool::from_config(&config.pool));

    let slot = world
        .resource_mut::<ParticlePool>()
        .spawn(
            &SpawnParams {
                position: Vec2::new(10.0, 10.0),
                rotation: 90.0,
                max_life: 2.0,
                speed_curve: Some(Arc::new(PropertyCurve::constant(20.0))),
                ..Default::default()
            },
            Some(&art[0]),
            &parsed,
        )
        .unwrap();

    let mut schedule = Schedule::default();
    schedule.add_systems(path_particle_system);

    for _ in 0..2 {
        world.resource_mut::<Time>().advance(0.25);
        schedule.run(&mut world);
    }

    let pool = world.resource::<ParticlePool>();
    let particle = pool.get(slot).unwrap();
    // 前进 10，偏移 (10, 3) 旋转 90° 后为 (-3, 10)
    assert!((particle.movement - 10.0).abs() < 0.0001);
    assert!((particle.base.position - Vec2::new(7.0, 20.0)).length() < 0.001);
    assert_eq!(particle.base.animation.texture.name(), "spark2.png");

    for _ in 0..8 {
        world.resource_mut::<Time>().advance(0.25);
        schedule.run(&mut world);
    }
    let pool = world.resource::<ParticlePool>();
    assert_eq!(pool.active_count(), 0);
    assert!(pool.get(slot).is_none());
}

#[test]
fn test_invalid_path_falls_back_to_base_motion() {
    let parsed = PathParticleService::parse_path_config(Some(&PathConfig::new("sin(")), true);
    assert!(parsed.path.is_none());

    let mut pool = ParticlePool::new(4);
    let slot = pool
        .spawn(
            &SpawnParams {
                velocity: Vec2::new(0.0, -4.0),
                max_life: 5.0,
                ..Default::default()
            },
            None,
            &parsed,
        )
        .unwrap();

    pool.update(0.5);
    let particle = pool.get(slot).unwrap();
    assert_eq!(particle.base.motion, MotionMode::BaseMotion);
    assert!((particle.base.position - Vec2::new(0.0, -2.0)).length() < 0.0001);
}

#[test]
fn test_match_life_art_on_reused_slot() {
    let mut library = TextureLibrary::new();
    let art = parse_art_json(
        r#"{ "framerate": "matchLife", "textures": ["a.png", "b.png"] }"#,
        &mut library,
    )
    .unwrap();
    let parsed = PathParticleService::parse_path_config(Some(&PathConfig::new("x")), false);

    let mut pool = ParticlePool::new(1);
    let first = pool
        .spawn(&SpawnParams { max_life: 1.0, ..Default::default() }, Some(&art[0]), &parsed)
        .unwrap();
    let framerate = pool.get(first).unwrap().base.animation.framerate;
    assert_eq!(framerate, 2.0);

    pool.update(2.0);
    assert_eq!(pool.active_count(), 0);

    let second = pool
        .spawn(&SpawnParams { max_life: 4.0, ..Default::default() }, Some(&art[0]), &parsed)
        .unwrap();
    assert_eq!(second, first);
    let particle = pool.get(second).unwrap();
    assert_eq!(particle.base.animation.duration, 4.0);
    assert_eq!(particle.base.animation.framerate, 0.5);
    assert_eq!(particle.movement, 0.0);
}

#[test]
fn test_disallowed_characters_never_execute() {
    let parsed = PathParticleService::parse_path_config(Some(&PathConfig::new("x * 2;alert")), false);
    assert_eq!(parsed.path.unwrap().evaluate(5.0), 10.0);

    // 剩下的 "x * 2 (1)" 不是合法表达式
    let parsed =
        PathParticleService::parse_path_config(Some(&PathConfig::new("x * 2; while(1){}")), false);
    assert!(parsed.path.is_none());
}
