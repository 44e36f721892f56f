//! 粒子模块
//!
//! 沿数学表达式路径移动的动画粒子，以及驱动它们的对象池和ECS系统。
//!
//! ## 使用示例
//!
//! ```rust
//! use path_particles::particles::{
//!     ParticlePool, PathConfig, PathParticleService, SpawnParams,
//! };
//!
//! let extra = PathParticleService::parse_path_config(Some(&PathConfig::new("sin(x / 10) * 20")), true);
//! let mut pool = ParticlePool::new(16);
//! let slot = pool.spawn(&SpawnParams { max_life: 2.0, ..Default::default() }, None, &extra);
//! assert!(slot.is_some());
//! pool.update(1.0 / 60.0);
//! ```

pub mod art;
pub mod particle;
pub mod path;
pub mod pool;

pub use art::{
    parse_art_descriptor, parse_art_json, repeat_count, Framerate, RawAnimatedArt, TextureRef,
    TextureSource, DEFAULT_FRAMERATE,
};
pub use particle::{MotionMode, Particle, ParticleService, ParticleState};
pub use path::{
    rotate_point, AnimatedPathParticle, ParsedPathConfig, PathConfig, PathParticleService,
};
pub use pool::{path_particle_system, ParticlePool, ParticleSlot, SpawnParams};
