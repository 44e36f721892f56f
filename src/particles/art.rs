//! 动画粒子美术数据
//!
//! 美术数据在注册时解析一次：纹理列表展开为逐帧序列，帧率/时长/循环确定下来，
//! 结果被该美术类型的所有粒子共享。
//!
//! ```json
//! {
//!     "framerate": 6,
//!     "loop": true,
//!     "textures": [
//!         "animFrame1.png",
//!         { "texture": "animFrame2.png", "count": 3 },
//!         "animFrame3.png"
//!     ]
//! }
//! ```
//!
//! `"framerate": "matchLife"` 让动画恰好在粒子寿命结束时播完一次。

use crate::animation::ParsedAnimatedArt;
use crate::core::error::ParticleResult;
use crate::resources::{TextureHandle, TextureLibrary};
use serde::Deserialize;
use std::sync::Arc;

/// 未指定有效帧率时使用的帧率
pub const DEFAULT_FRAMERATE: f32 = 60.0;

/// 动画帧率
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "FramerateRepr")]
pub enum Framerate {
    /// 固定帧率，非正值使用 [`DEFAULT_FRAMERATE`]
    Fixed(f32),
    /// 跟随粒子寿命
    MatchLife,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FramerateRepr {
    Number(f32),
    Keyword(String),
}

impl From<FramerateRepr> for Framerate {
    fn from(repr: FramerateRepr) -> Self {
        match repr {
            FramerateRepr::Number(fps) => Framerate::Fixed(fps),
            FramerateRepr::Keyword(keyword) if keyword == "matchLife" => Framerate::MatchLife,
            // 无法识别的关键字按无效帧率处理
            FramerateRepr::Keyword(_) => Framerate::Fixed(0.0),
        }
    }
}

/// 纹理引用：名称或已解析的句柄
#[derive(Debug, Clone, PartialEq)]
pub enum TextureRef {
    Name(String),
    Handle(TextureHandle),
}

/// 美术数据中的一个纹理条目
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "TextureEntry")]
pub enum TextureSource {
    /// 按名称解析的单帧
    Name(String),
    /// 已解析的单帧
    Handle(TextureHandle),
    /// 同一纹理连续使用 `count` 帧，见 [`repeat_count`]
    Repeated { texture: TextureRef, count: f64 },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextureEntry {
    Name(String),
    Repeated {
        texture: String,
        #[serde(default)]
        count: Option<f64>,
    },
}

impl From<TextureEntry> for TextureSource {
    fn from(entry: TextureEntry) -> Self {
        match entry {
            TextureEntry::Name(name) => TextureSource::Name(name),
            TextureEntry::Repeated { texture, count } => TextureSource::Repeated {
                texture: TextureRef::Name(texture),
                count: count.unwrap_or(0.0),
            },
        }
    }
}

/// 原始动画美术数据
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAnimatedArt {
    pub framerate: Framerate,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    pub textures: Vec<TextureSource>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawAnimatedArt>),
    One(RawAnimatedArt),
}

/// 重复条目展开的帧数
///
/// 正数向上取整；缺省、0 和 NaN 为 1 帧；负数为 0 帧。
pub fn repeat_count(count: f64) -> usize {
    if count > 0.0 {
        count.ceil() as usize
    } else if count < 0.0 {
        0
    } else {
        1
    }
}

fn resolve(reference: &TextureRef, library: &mut TextureLibrary) -> TextureHandle {
    match reference {
        TextureRef::Name(name) => library.from_name(name),
        TextureRef::Handle(handle) => handle.clone(),
    }
}

/// 解析动画美术数据
///
/// 纯转换，不接触任何粒子实例；每种美术数据调用一次并缓存结果。
pub fn parse_art_descriptor(
    raw: &[RawAnimatedArt],
    library: &mut TextureLibrary,
) -> Vec<ParsedAnimatedArt> {
    raw.iter()
        .map(|data| {
            let mut textures = Vec::with_capacity(data.textures.len());
            for source in &data.textures {
                match source {
                    TextureSource::Name(name) => textures.push(library.from_name(name)),
                    TextureSource::Handle(handle) => textures.push(handle.clone()),
                    TextureSource::Repeated { texture, count } => {
                        let handle = resolve(texture, library);
                        textures.extend(std::iter::repeat(handle).take(repeat_count(*count)));
                    }
                }
            }

            match data.framerate {
                Framerate::MatchLife => ParsedAnimatedArt {
                    textures: Arc::from(textures),
                    framerate: ParsedAnimatedArt::MATCH_LIFE_FRAMERATE,
                    duration: 0.0,
                    looping: false,
                },
                Framerate::Fixed(fps) => {
                    let framerate = if fps > 0.0 { fps } else { DEFAULT_FRAMERATE };
                    let duration = textures.len() as f32 / framerate;
                    ParsedAnimatedArt {
                        textures: Arc::from(textures),
                        framerate,
                        duration,
                        looping: data.looping,
                    }
                }
            }
        })
        .collect()
}

/// 从JSON解析美术数据（单个对象或数组）
pub fn parse_art_json(
    json: &str,
    library: &mut TextureLibrary,
) -> ParticleResult<Vec<ParsedAnimatedArt>> {
    let raw = match serde_json::from_str::<OneOrMany>(json)? {
        OneOrMany::Many(list) => list,
        OneOrMany::One(single) => vec![single],
    };
    Ok(parse_art_descriptor(&raw, library))
}
