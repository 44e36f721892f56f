//! 资源模块
//!
//! 粒子动画使用的纹理句柄

pub mod texture;

pub use texture::{TextureHandle, TextureLibrary};
