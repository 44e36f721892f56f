//! 动画模块
//!
//! 提供粒子使用的逐帧纹理动画和随生命周期变化的属性曲线。
//!
//! ## 功能特性
//!
//! - 逐帧纹理动画（固定帧率或跟随粒子寿命）
//! - 循环 / 停在最后一帧
//! - 线性与阶梯插值的属性曲线
//!
//! ## 使用示例
//!
//! ```rust
//! use path_particles::animation::{FrameAnimation, FrameAnimationService, PropertyCurve};
//!
//! let speed = PropertyCurve::linear(200.0, 50.0);
//! assert_eq!(speed.interpolate(0.5), 125.0);
//!
//! let mut anim = FrameAnimation::new();
//! FrameAnimationService::reset(&mut anim, 1.0);
//! FrameAnimationService::advance(&mut anim, 0.016);
//! ```

pub mod clip;
pub mod keyframe;
pub mod player;
pub mod service;

pub use clip::ParsedAnimatedArt;
pub use keyframe::{InterpolationMode, Keyframe, PropertyCurve};
pub use player::FrameAnimation;
pub use service::FrameAnimationService;
