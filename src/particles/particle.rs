//! 基础动画粒子 (贫血模型)
//!
//! - Particle (State): 纯数据结构
//! - ParticleService (Service): 生命周期、基础运动、旋转和帧动画

use crate::animation::{FrameAnimation, FrameAnimationService, ParsedAnimatedArt, PropertyCurve};
use crate::impl_default_and_new;
use glam::Vec2;
use std::sync::Arc;

/// 位置由谁驱动，在初始化时确定一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    /// 速度/加速度积分
    #[default]
    BaseMotion,
    /// 沿路径函数移动，基础积分不再修改位置
    PathMotion,
}

/// 粒子生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticleState {
    #[default]
    Uninitialized,
    Active,
    Destroyed,
}

/// 基础动画粒子数据
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// 最大速度，0 表示不限制
    pub max_speed: f32,
    /// 朝向 (度)
    pub rotation: f32,
    /// 旋转速度 (度/秒)
    pub rotation_speed: f32,
    pub age: f32,
    pub max_life: f32,
    /// 速度曲线，按生命周期进度采样
    pub speed_curve: Option<Arc<PropertyCurve>>,
    pub speed_multiplier: f32,
    pub motion: MotionMode,
    pub state: ParticleState,
    pub animation: FrameAnimation,
}

impl_default_and_new!(Particle {
    position: Vec2::ZERO,
    velocity: Vec2::ZERO,
    acceleration: Vec2::ZERO,
    max_speed: 0.0,
    rotation: 0.0,
    rotation_speed: 0.0,
    age: 0.0,
    max_life: 1.0,
    speed_curve: None,
    speed_multiplier: 1.0,
    motion: MotionMode::BaseMotion,
    state: ParticleState::Uninitialized,
    animation: FrameAnimation::default(),
});

impl Particle {
    pub fn is_active(&self) -> bool {
        self.state == ParticleState::Active
    }
}

/// 基础粒子服务
pub struct ParticleService;

impl ParticleService {
    /// 粒子过期时 `update` 的返回值
    pub const EXPIRED: f32 = -1.0;

    /// 激活粒子
    ///
    /// 生成参数（位置、速度、寿命等）应在调用前写好；这里只重置运行时状态。
    pub fn initialize(particle: &mut Particle, art: Option<&ParsedAnimatedArt>) {
        particle.age = 0.0;
        particle.motion = MotionMode::BaseMotion;
        particle.state = ParticleState::Active;

        match art {
            Some(art) => FrameAnimationService::apply_art(&mut particle.animation, art),
            None => particle.animation = FrameAnimation::default(),
        }
        FrameAnimationService::reset(&mut particle.animation, particle.max_life);
    }

    /// 推进一帧，返回生命周期进度 `[0, 1)`，过期时返回 [`Self::EXPIRED`]
    pub fn update(particle: &mut Particle, delta_time: f32) -> f32 {
        particle.age += delta_time;
        if particle.age >= particle.max_life || particle.age < 0.0 {
            particle.state = ParticleState::Destroyed;
            return Self::EXPIRED;
        }
        let lerp = particle.age / particle.max_life;

        if particle.motion == MotionMode::BaseMotion {
            if particle.speed_curve.is_some() {
                let speed = Self::speed_at(particle, lerp);
                particle.velocity = particle.velocity.normalize_or_zero() * speed;
            } else {
                particle.velocity += particle.acceleration * delta_time;
                if particle.max_speed > 0.0 {
                    particle.velocity = particle.velocity.clamp_length_max(particle.max_speed);
                }
            }
            particle.position += particle.velocity * delta_time;
        }

        if particle.rotation_speed != 0.0 {
            particle.rotation += particle.rotation_speed * delta_time;
        }

        FrameAnimationService::advance(&mut particle.animation, delta_time);

        lerp
    }

    /// 指定进度的速度
    ///
    /// 有速度曲线时为曲线值乘以倍率，否则为当前速度的大小。
    pub fn speed_at(particle: &Particle, lerp: f32) -> f32 {
        match &particle.speed_curve {
            Some(curve) => curve.interpolate(lerp) * particle.speed_multiplier,
            None => particle.velocity.length(),
        }
    }

    /// 回收粒子，释放共享数据
    pub fn destroy(particle: &mut Particle) {
        particle.state = ParticleState::Destroyed;
        particle.speed_curve = None;
        particle.animation = FrameAnimation::default();
    }
}
