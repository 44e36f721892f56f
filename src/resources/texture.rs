//! 纹理句柄与名称解析
//!
//! 粒子只持有纹理句柄；图像解码与上传不在这里处理。
//! 同一个名称总是解析为同一个句柄。

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 纹理句柄
///
/// 克隆只增加名称的引用计数。`id == 0` 保留给空纹理。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    id: u32,
    name: Option<Arc<str>>,
}

impl TextureHandle {
    /// 空纹理，帧索引越界或没有帧时使用
    pub const EMPTY: TextureHandle = TextureHandle { id: 0, name: None };

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}

impl Default for TextureHandle {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "TextureHandle(EMPTY)");
        }
        write!(f, "TextureHandle({}, {:?})", self.id, self.name())
    }
}

/// 纹理库：名称到句柄的驻留表
#[derive(Debug, Default)]
pub struct TextureLibrary {
    by_name: HashMap<String, TextureHandle>,
    next_id: u32,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按名称获取纹理句柄，首次出现时分配新句柄
    pub fn from_name(&mut self, name: &str) -> TextureHandle {
        if let Some(handle) = self.get(name) {
            return handle.clone();
        }

        self.next_id += 1;
        let handle = TextureHandle {
            id: self.next_id,
            name: Some(Arc::from(name)),
        };
        self.by_name.insert(name.to_string(), handle.clone());
        tracing::trace!(target: "textures", "Registered texture '{}' as {}", name, handle.id);
        handle
    }

    /// 查找已注册的纹理
    pub fn get(&self, name: &str) -> Option<&TextureHandle> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning() {
        let mut library = TextureLibrary::new();
        let a = library.from_name("spark.png");
        let b = library.from_name("spark.png");
        let c = library.from_name("smoke.png");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(library.len(), 2);
        assert_eq!(library.get("smoke.png"), Some(&c));
        assert!(library.get("missing.png").is_none());
    }

    #[test]
    fn test_empty_handle() {
        let empty = TextureHandle::default();
        assert!(empty.is_empty());
        assert_eq!(empty.name(), "");

        let mut library = TextureLibrary::new();
        let handle = library.from_name("frame1.png");
        assert!(!handle.is_empty());
        assert_eq!(handle.name(), "frame1.png");
    }
}
