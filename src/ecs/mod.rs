use bevy_ecs::prelude::*;

/// 帧时间资源
///
/// 宿主每帧写入 `delta_seconds`，粒子系统只读取它。
#[derive(Resource, Clone, Copy, Debug)]
pub struct Time {
    pub delta_seconds: f32,
    pub elapsed_seconds: f64,
}

impl Default for Time {
    fn default() -> Self {
        Self {
            delta_seconds: 0.0,
            elapsed_seconds: 0.0,
        }
    }
}

impl Time {
    /// 推进一帧
    pub fn advance(&mut self, delta_seconds: f32) {
        self.delta_seconds = delta_seconds;
        self.elapsed_seconds += delta_seconds as f64;
    }
}
