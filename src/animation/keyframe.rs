use serde::{Deserialize, Serialize};

/// 插值模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// 线性插值
    #[default]
    Linear,
    /// 阶梯插值 (无插值)
    Step,
}

/// 关键帧
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// 生命周期进度 (0-1)
    pub time: f32,
    /// 值
    pub value: f32,
}

/// 随生命周期变化的属性曲线（例如速度）
///
/// 关键帧按时间排序；进度超出首尾关键帧时取端点值。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyCurve {
    /// 关键帧列表
    pub keyframes: Vec<Keyframe>,
    /// 插值模式
    #[serde(default)]
    pub interpolation: InterpolationMode,
}

impl PropertyCurve {
    pub fn new(interpolation: InterpolationMode) -> Self {
        Self {
            keyframes: Vec::new(),
            interpolation,
        }
    }

    /// 常量曲线
    pub fn constant(value: f32) -> Self {
        let mut curve = Self::new(InterpolationMode::Linear);
        curve.add_keyframe(0.0, value);
        curve
    }

    /// 从起点到终点的线性曲线
    pub fn linear(start: f32, end: f32) -> Self {
        let mut curve = Self::new(InterpolationMode::Linear);
        curve.add_keyframe(0.0, start);
        curve.add_keyframe(1.0, end);
        curve
    }

    /// 添加关键帧
    pub fn add_keyframe(&mut self, time: f32, value: f32) {
        // 按时间排序插入
        let index = self.keyframes.partition_point(|k| k.time <= time);
        self.keyframes.insert(index, Keyframe { time, value });
    }

    /// 采样指定进度的值，没有关键帧时为 0
    pub fn interpolate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return 0.0;
        };

        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // first.time < t < last.time，所以 1 <= index < len
        let index = self.keyframes.partition_point(|k| k.time <= t);
        let k0 = &self.keyframes[index - 1];
        let k1 = &self.keyframes[index];

        match self.interpolation {
            InterpolationMode::Step => k0.value,
            InterpolationMode::Linear => {
                let span = k1.time - k0.time;
                if span <= 0.0 {
                    return k1.value;
                }
                let f = (t - k0.time) / span;
                k0.value + (k1.value - k0.value) * f
            }
        }
    }
}
