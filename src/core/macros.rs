//! 核心宏定义
//!
//! 提供统一的宏来减少状态结构体的样板代码

/// 为结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use path_particles::impl_default;
///
/// struct PoolSettings {
///     capacity: usize,
///     label: String,
/// }
///
/// impl_default!(PoolSettings {
///     capacity: 256,
///     label: String::new(),
/// });
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

/// 同时实现Default和new()的宏
///
/// 粒子状态在对象池中复用时，`new()` 与 `default()` 必须给出同一个"空"值。
///
/// 使用示例:
/// ```rust
/// use path_particles::impl_default_and_new;
///
/// struct Counter {
///     frames: u32,
///     elapsed: f32,
/// }
///
/// impl_default_and_new!(Counter {
///     frames: 0,
///     elapsed: 0.0,
/// });
/// ```
#[macro_export]
macro_rules! impl_default_and_new {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }

        impl $struct_name {
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}
