//! 帧动画服务层
//!
//! 遵循贫血模型，将逐帧动画的业务逻辑封装在Service中

use super::clip::ParsedAnimatedArt;
use super::player::FrameAnimation;
use crate::resources::TextureHandle;

/// 防止浮点误差导致帧号少一
const FRAME_EPSILON: f32 = 0.000_000_1;
/// 非循环动画停在最后一帧之前的余量
const END_EPSILON: f32 = 0.000_001;

/// 帧动画服务 - 封装帧动画业务逻辑
pub struct FrameAnimationService;

impl FrameAnimationService {
    /// 应用解析后的美术数据
    pub fn apply_art(anim: &mut FrameAnimation, art: &ParsedAnimatedArt) {
        anim.textures = art.textures.clone();
        anim.framerate = art.framerate;
        anim.duration = art.duration;
        anim.looping = art.looping;
    }

    /// 粒子激活时重置
    ///
    /// 动画跟随寿命时，在这里根据实际寿命计算时长和帧率。
    pub fn reset(anim: &mut FrameAnimation, max_life: f32) {
        anim.elapsed = 0.0;

        if anim.matches_life() {
            if max_life > 0.0 {
                anim.duration = max_life;
                anim.framerate = anim.frame_count() as f32 / max_life;
            } else {
                anim.duration = 0.0;
                anim.framerate = 0.0;
            }
        }

        anim.texture = anim.textures.first().cloned().unwrap_or(TextureHandle::EMPTY);
    }

    /// 推进动画并选择当前帧（只在粒子存活时调用）
    pub fn advance(anim: &mut FrameAnimation, delta_time: f32) {
        anim.elapsed += delta_time;

        if anim.elapsed > anim.duration {
            if anim.looping && anim.duration > 0.0 {
                anim.elapsed %= anim.duration;
            } else {
                anim.elapsed = (anim.duration - END_EPSILON).max(0.0);
            }
        }

        anim.texture = Self::frame_index(anim)
            .and_then(|index| anim.textures.get(index).cloned())
            .unwrap_or(TextureHandle::EMPTY);
    }

    /// 当前帧号；帧率非有限或为负时没有帧
    pub fn frame_index(anim: &FrameAnimation) -> Option<usize> {
        let frame = anim.elapsed * anim.framerate + FRAME_EPSILON;
        if !frame.is_finite() || frame < 0.0 {
            return None;
        }
        Some(frame as usize)
    }
}
