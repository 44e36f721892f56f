//! # Path Particles
//!
//! Animated 2D particles that follow arithmetic path expressions, driven by a pooled
//! particle store and a `bevy_ecs` system.
//!
//! ## Features
//!
//! - **Path Expressions**: whitelisted arithmetic (`x`, `+ - * /`, `sin`, `pow`, `PI`, ...)
//!   compiled once into a shared expression tree and evaluated per frame
//! - **Frame Animation**: texture flipbooks with fixed framerates or durations matched to particle life
//! - **Particle Pool**: slot reuse with full per-slot reset on spawn and release on retire
//! - **Configuration**: TOML/JSON config files with environment overrides
//!
//! ## Architecture Design
//!
//! This crate follows the **Anemic Domain Model (贫血模型)** pattern:
//! - **State**: Pure data structures (`AnimatedPathParticle`, `FrameAnimation`)
//! - **Service**: Business logic encapsulation with static methods (`PathParticleService`)
//! - **System**: ECS systems for scheduling (`path_particle_system`)
//!
//! ### Example
//!
//! ```rust
//! use path_particles::particles::{PathConfig, PathParticleService};
//!
//! let extra = PathParticleService::parse_path_config(Some(&PathConfig::new("x*2")), false);
//! assert_eq!(extra.path.unwrap().evaluate(5.0), 10.0);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Errors, macros and logging setup
//! - [`config`]: Configuration system
//! - [`scripting`]: Path expression compiler
//! - [`particles`]: Path particles, pool and ECS system
//! - [`animation`]: Frame animation and property curves

/// Errors, shared macros and logging setup
pub mod core;
/// Frame time resource for ECS scheduling
pub mod ecs;
/// Texture handles and name resolution
pub mod resources;
/// Path expression compiler
pub mod scripting;
/// Configuration system
pub mod config;
/// Frame animation and property curves
pub mod animation;
/// Path-following animated particles
pub mod particles;
