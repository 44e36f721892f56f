use crate::impl_default_and_new;
use crate::resources::TextureHandle;
use std::sync::Arc;

/// 逐帧纹理动画状态 (贫血模型 - 纯数据结构)
///
/// - FrameAnimation (State): 纯数据结构 ← 本文件
/// - FrameAnimationService (Service): 业务逻辑封装 → service.rs
///
/// `framerate < 0` 表示动画时长跟随粒子寿命，在粒子生成时才确定。
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAnimation {
    /// 每一帧使用的纹理（按顺序，允许重复）
    pub textures: Arc<[TextureHandle]>,
    /// 帧率 (帧/秒)
    pub framerate: f32,
    /// 动画时长 (秒)
    pub duration: f32,
    /// 已播放时间 (秒)
    pub elapsed: f32,
    /// 是否循环
    pub looping: bool,
    /// 当前显示的纹理
    pub texture: TextureHandle,
}

impl_default_and_new!(FrameAnimation {
    textures: Arc::from(Vec::new()),
    framerate: 0.0,
    duration: 0.0,
    elapsed: 0.0,
    looping: false,
    texture: TextureHandle::EMPTY,
});

impl FrameAnimation {
    pub fn frame_count(&self) -> usize {
        self.textures.len()
    }

    /// 动画时长是否由粒子寿命决定
    pub fn matches_life(&self) -> bool {
        self.framerate < 0.0
    }
}
