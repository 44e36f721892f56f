use crate::resources::TextureHandle;
use std::sync::Arc;

/// 解析后的动画美术数据
///
/// 由 `parse_art_descriptor` 生成一次，之后被该美术类型的所有粒子共享，不再修改。
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnimatedArt {
    /// 展开后的逐帧纹理
    pub textures: Arc<[TextureHandle]>,
    /// 帧率 (帧/秒)，-1 表示跟随粒子寿命
    pub framerate: f32,
    /// 时长 (秒)，跟随寿命时为 0
    pub duration: f32,
    /// 是否循环
    pub looping: bool,
}

impl ParsedAnimatedArt {
    /// 跟随粒子寿命的标记帧率
    pub const MATCH_LIFE_FRAMERATE: f32 = -1.0;

    pub fn frame_count(&self) -> usize {
        self.textures.len()
    }

    pub fn matches_life(&self) -> bool {
        self.framerate < 0.0
    }
}
