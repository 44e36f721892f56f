use super::path::{AnimatedPathParticle, ParsedPathConfig, PathParticleService};
use crate::animation::{ParsedAnimatedArt, PropertyCurve};
use crate::config::PoolConfig;
use crate::ecs::Time;
use crate::impl_default;
use bevy_ecs::prelude::*;
use glam::Vec2;
use std::sync::Arc;

/// 粒子在池中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleSlot(pub usize);

/// 生成参数，由发射器在激活前写入粒子
#[derive(Debug, Clone)]
pub struct SpawnParams {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f32,
    /// 初始朝向 (度)
    pub rotation: f32,
    pub rotation_speed: f32,
    pub max_life: f32,
    pub speed_curve: Option<Arc<PropertyCurve>>,
    pub speed_multiplier: f32,
}

impl_default!(SpawnParams {
    position: Vec2::ZERO,
    velocity: Vec2::ZERO,
    acceleration: Vec2::ZERO,
    max_speed: 0.0,
    rotation: 0.0,
    rotation_speed: 0.0,
    max_life: 1.0,
    speed_curve: None,
    speed_multiplier: 1.0,
});

/// 路径粒子对象池 - 复用粒子槽位，避免每次发射分配
#[derive(Resource, Debug)]
pub struct ParticlePool {
    slots: Vec<AnimatedPathParticle>,
    free: Vec<usize>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(1024)),
            free: Vec::new(),
            capacity,
        }
    }

    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.capacity)
    }

    /// 生成一个粒子；池满时返回 `None`
    pub fn spawn(
        &mut self,
        params: &SpawnParams,
        art: Option<&ParsedAnimatedArt>,
        extra: &ParsedPathConfig,
    ) -> Option<ParticleSlot> {
        let index = match self.free.pop() {
            Some(index) => index,
            None if self.slots.len() < self.capacity => {
                self.slots.push(AnimatedPathParticle::new());
                self.slots.len() - 1
            }
            None => {
                tracing::warn!(target: "particle_pool", "Particle pool is full ({} slots), spawn dropped", self.capacity);
                return None;
            }
        };

        let particle = &mut self.slots[index];
        let base = &mut particle.base;
        base.position = params.position;
        base.velocity = params.velocity;
        base.acceleration = params.acceleration;
        base.max_speed = params.max_speed;
        base.rotation = params.rotation;
        base.rotation_speed = params.rotation_speed;
        base.max_life = params.max_life;
        base.speed_curve = params.speed_curve.clone();
        base.speed_multiplier = params.speed_multiplier;

        PathParticleService::initialize(particle, art, extra);
        Some(ParticleSlot(index))
    }

    /// 更新所有存活粒子，回收过期粒子；返回本帧回收的数量
    pub fn update(&mut self, delta_time: f32) -> usize {
        let mut retired = 0;
        for (index, particle) in self.slots.iter_mut().enumerate() {
            if !particle.is_active() {
                continue;
            }
            if PathParticleService::update(particle, delta_time) < 0.0 {
                PathParticleService::destroy(particle);
                self.free.push(index);
                retired += 1;
            }
        }

        if retired > 0 {
            tracing::trace!(target: "particle_pool", "Retired {} particles", retired);
        }
        retired
    }

    pub fn get(&self, slot: ParticleSlot) -> Option<&AnimatedPathParticle> {
        self.slots.get(slot.0).filter(|p| p.is_active())
    }

    pub fn get_mut(&mut self, slot: ParticleSlot) -> Option<&mut AnimatedPathParticle> {
        self.slots.get_mut(slot.0).filter(|p| p.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (ParticleSlot, &AnimatedPathParticle)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(index, p)| (ParticleSlot(index), p))
    }

    /// 回收所有粒子
    pub fn clear(&mut self) {
        for (index, particle) in self.slots.iter_mut().enumerate() {
            if particle.is_active() {
                PathParticleService::destroy(particle);
                self.free.push(index);
            }
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::from_config(&PoolConfig::default())
    }
}

/// 每帧推进所有路径粒子
pub fn path_particle_system(time: Res<Time>, mut pool: ResMut<ParticlePool>) {
    pool.update(time.delta_seconds);
}
