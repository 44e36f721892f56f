//! 沿路径移动的动画粒子
//!
//! 路径是关于前进距离 `movement` 的函数 `offset_y = path(movement)`。
//! 偏移向量 `(movement, offset_y)` 按粒子生成时的朝向旋转后，加到生成位置上。
//!
//! 路径字符串在注册时用 [`PathParticleService::parse_path_config`] 编译一次，
//! 之后所有粒子共享同一个 [`CompiledPath`]。

use super::particle::{MotionMode, Particle, ParticleService};
use crate::animation::ParsedAnimatedArt;
use crate::core::error::ParticleResult;
use crate::impl_default_and_new;
use crate::scripting::{self, CompiledPath};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 路径粒子的额外数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// 路径表达式，例如 `"sin(x / 20) * 30"`
    #[serde(default)]
    pub path: Option<String>,
}

impl PathConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn from_json(json: &str) -> ParticleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 编译后的路径配置
#[derive(Debug, Clone, Default)]
pub struct ParsedPathConfig {
    pub path: Option<CompiledPath>,
}

/// 路径粒子数据
#[derive(Debug, Clone)]
pub struct AnimatedPathParticle {
    pub base: Particle,
    pub path: Option<CompiledPath>,
    /// 生成时的朝向 (度)
    pub initial_rotation: f32,
    pub initial_position: Vec2,
    /// 沿路径前进的距离
    pub movement: f32,
}

impl_default_and_new!(AnimatedPathParticle {
    base: Particle::default(),
    path: None,
    initial_rotation: 0.0,
    initial_position: Vec2::ZERO,
    movement: 0.0,
});

impl AnimatedPathParticle {
    pub fn is_active(&self) -> bool {
        self.base.is_active()
    }
}

/// 路径粒子服务
pub struct PathParticleService;

impl PathParticleService {
    /// 激活粒子（包括对象池复用）
    pub fn initialize(
        particle: &mut AnimatedPathParticle,
        art: Option<&ParsedAnimatedArt>,
        extra: &ParsedPathConfig,
    ) {
        ParticleService::initialize(&mut particle.base, art);

        particle.initial_rotation = particle.base.rotation;
        particle.path = extra.path.clone();
        particle.base.motion = if particle.path.is_some() {
            MotionMode::PathMotion
        } else {
            MotionMode::BaseMotion
        };
        particle.movement = 0.0;
        particle.initial_position = particle.base.position;
    }

    /// 推进一帧，返回值与基础粒子相同
    pub fn update(particle: &mut AnimatedPathParticle, delta_time: f32) -> f32 {
        let lerp = ParticleService::update(&mut particle.base, delta_time);
        if lerp < 0.0 {
            return lerp;
        }

        if let Some(path) = &particle.path {
            let speed = ParticleService::speed_at(&particle.base, lerp);
            // 速度曲线可能给出负值，前进距离只增不减
            particle.movement += (speed * delta_time).max(0.0);

            let offset_y = path.evaluate(particle.movement as f64) as f32;
            let offset = rotate_point(particle.initial_rotation, Vec2::new(particle.movement, offset_y));
            particle.base.position = particle.initial_position + offset;
        }

        lerp
    }

    /// 回收粒子
    pub fn destroy(particle: &mut AnimatedPathParticle) {
        ParticleService::destroy(&mut particle.base);
        particle.path = None;
        particle.initial_position = Vec2::ZERO;
        particle.initial_rotation = 0.0;
        particle.movement = 0.0;
    }

    /// 编译路径配置
    ///
    /// 缺少路径或编译失败时返回 `path: None`，粒子退回基础运动；只在 `verbose` 时记录错误。
    pub fn parse_path_config(extra: Option<&PathConfig>, verbose: bool) -> ParsedPathConfig {
        let Some(source) = extra.and_then(|config| config.path.as_deref()) else {
            if verbose {
                tracing::error!(target: "path_particle", "Path particle is missing a 'path' expression");
            }
            return ParsedPathConfig { path: None };
        };

        if source.trim().is_empty() {
            if verbose {
                tracing::error!(target: "path_particle", "Path particle has an empty 'path' expression");
            }
            return ParsedPathConfig { path: None };
        }

        match scripting::compile(source) {
            Ok(path) => {
                tracing::debug!(target: "path_particle", "Compiled path '{}'", path.source());
                ParsedPathConfig { path: Some(path) }
            }
            Err(e) => {
                if verbose {
                    tracing::error!(target: "path_particle", "Failed to compile path '{}': {}", source, e);
                }
                ParsedPathConfig { path: None }
            }
        }
    }
}

/// 绕原点旋转 (角度制)
pub fn rotate_point(degrees: f32, point: Vec2) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::PropertyCurve;
    use crate::particles::ParticleState;
    use std::sync::Arc;

    fn parsed(source: &str) -> ParsedPathConfig {
        PathParticleService::parse_path_config(Some(&PathConfig::new(source)), false)
    }

    fn create_test_particle(speed: f32) -> AnimatedPathParticle {
        let mut particle = AnimatedPathParticle::new();
        particle.base.max_life = 100.0;
        particle.base.speed_curve = Some(Arc::new(PropertyCurve::constant(speed)));
        particle
    }

    #[test]
    fn test_parse_path_config_roundtrip() {
        let config = parsed("x*2");
        let path = config.path.unwrap();
        assert_eq!(path.evaluate(5.0), 10.0);
    }

    #[test]
    fn test_parse_path_config_failures_degrade() {
        assert!(PathParticleService::parse_path_config(None, true).path.is_none());
        assert!(PathParticleService::parse_path_config(Some(&PathConfig::default()), true)
            .path
            .is_none());
        assert!(parsed("").path.is_none());
        assert!(parsed("   ").path.is_none());
        assert!(parsed("(x").path.is_none());
        assert!(parsed("hello world").path.is_none());
    }

    #[test]
    fn test_path_config_from_json() {
        let config = PathConfig::from_json(r#"{ "path": "sin(x)" }"#).unwrap();
        assert_eq!(config.path.as_deref(), Some("sin(x)"));
        assert_eq!(PathConfig::from_json("{}").unwrap(), PathConfig::default());
        assert!(PathConfig::from_json("[").is_err());
    }

    #[test]
    fn test_rotate_point() {
        let p = rotate_point(90.0, Vec2::new(10.0, 0.0));
        assert!((p - Vec2::new(0.0, 10.0)).length() < 0.0001);

        let p = rotate_point(180.0, Vec2::new(1.0, 2.0));
        assert!((p - Vec2::new(-1.0, -2.0)).length() < 0.0001);
    }

    #[test]
    fn test_rotated_path() {
        let mut particle = create_test_particle(10.0);
        particle.base.rotation = 90.0;
        PathParticleService::initialize(&mut particle, None, &parsed("0"));

        PathParticleService::update(&mut particle, 1.0);
        assert!((particle.movement - 10.0).abs() < 0.0001);
        assert!((particle.base.position - Vec2::new(0.0, 10.0)).length() < 0.0001);
    }

    #[test]
    fn test_path_offsets_from_initial_position() {
        let mut particle = create_test_particle(4.0);
        particle.base.position = Vec2::new(100.0, 50.0);
        PathParticleService::initialize(&mut particle, None, &parsed("x * 0.5"));

        PathParticleService::update(&mut particle, 0.5);
        PathParticleService::update(&mut particle, 0.5);
        assert!((particle.base.position - Vec2::new(104.0, 52.0)).length() < 0.0001);
    }

    #[test]
    fn test_base_motion_suppressed() {
        let mut particle = create_test_particle(0.0);
        particle.base.velocity = Vec2::new(50.0, 50.0);
        particle.base.acceleration = Vec2::new(10.0, 10.0);
        particle.base.position = Vec2::new(1.0, 1.0);
        PathParticleService::initialize(&mut particle, None, &parsed("0"));
        assert_eq!(particle.base.motion, MotionMode::PathMotion);

        for _ in 0..10 {
            PathParticleService::update(&mut particle, 0.1);
        }
        assert_eq!(particle.base.position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_without_path_uses_base_motion() {
        let mut particle = AnimatedPathParticle::new();
        particle.base.max_life = 10.0;
        particle.base.velocity = Vec2::new(2.0, 0.0);
        PathParticleService::initialize(&mut particle, None, &ParsedPathConfig::default());
        assert_eq!(particle.base.motion, MotionMode::BaseMotion);

        PathParticleService::update(&mut particle, 1.0);
        assert!((particle.base.position - Vec2::new(2.0, 0.0)).length() < 0.0001);
        assert_eq!(particle.movement, 0.0);
    }

    #[test]
    fn test_path_without_speed_curve_uses_velocity() {
        let mut particle = AnimatedPathParticle::new();
        particle.base.max_life = 10.0;
        particle.base.velocity = Vec2::new(3.0, 4.0);
        PathParticleService::initialize(&mut particle, None, &parsed("0"));

        PathParticleService::update(&mut particle, 1.0);
        assert!((particle.movement - 5.0).abs() < 0.0001);
        assert!((particle.base.position - Vec2::new(5.0, 0.0)).length() < 0.0001);
    }

    #[test]
    fn test_negative_speed_does_not_reverse() {
        let mut particle = create_test_particle(-5.0);
        PathParticleService::initialize(&mut particle, None, &parsed("x"));

        PathParticleService::update(&mut particle, 1.0);
        assert_eq!(particle.movement, 0.0);
    }

    #[test]
    fn test_expired_returns_negative() {
        let mut particle = create_test_particle(10.0);
        particle.base.max_life = 1.0;
        PathParticleService::initialize(&mut particle, None, &parsed("x"));

        assert!(PathParticleService::update(&mut particle, 0.5) >= 0.0);
        let movement = particle.movement;
        assert!(PathParticleService::update(&mut particle, 0.6) < 0.0);
        assert_eq!(particle.movement, movement);
    }

    #[test]
    fn test_destroy_then_reinitialize_matches_fresh() {
        let config = parsed("sin(x) * 3");

        let mut reused = create_test_particle(10.0);
        reused.base.rotation = 45.0;
        reused.base.position = Vec2::new(7.0, 7.0);
        PathParticleService::initialize(&mut reused, None, &config);
        for _ in 0..5 {
            PathParticleService::update(&mut reused, 0.2);
        }
        PathParticleService::destroy(&mut reused);
        assert!(reused.path.is_none());
        assert_eq!(reused.base.state, ParticleState::Destroyed);

        let mut fresh = create_test_particle(10.0);
        for particle in [&mut reused, &mut fresh] {
            particle.base.position = Vec2::new(1.0, 2.0);
            particle.base.rotation = 30.0;
            particle.base.age = 0.0;
            particle.base.speed_curve = Some(Arc::new(PropertyCurve::constant(10.0)));
        }
        PathParticleService::initialize(&mut reused, None, &ParsedPathConfig::default());
        PathParticleService::initialize(&mut fresh, None, &ParsedPathConfig::default());

        assert_eq!(reused.movement, fresh.movement);
        assert!(reused.path.is_none());
        assert_eq!(reused.initial_position, fresh.initial_position);
        assert_eq!(reused.initial_rotation, fresh.initial_rotation);
        assert_eq!(reused.base, fresh.base);
    }
}
