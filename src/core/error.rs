//! 统一错误处理模块
//!
//! 提供粒子系统范围内的错误类型定义
//!
//! ## 错误类型分层
//!
//! - **表达式错误** (`ExpressionError`): 路径表达式编译失败（语法、未知标识符、自增目标等）
//! - **配置错误** (`config::ConfigError`): 配置文件读取、解析和验证失败
//!
//! `ParticleError` 聚合以上错误，供加载美术/路径配置等入口使用。
//! 每帧更新路径上不返回任何错误。

use crate::config::ConfigError;
use thiserror::Error;

/// 粒子系统错误类型
#[derive(Error, Debug)]
pub enum ParticleError {
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Art descriptor error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 路径表达式编译错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Expression is empty after filtering")]
    Empty,

    #[error("Invalid number literal '{literal}' at {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("Unexpected token '{token}' at {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unclosed parenthesis opened at {0}")]
    UnclosedParenthesis(usize),

    #[error("Invalid operand for '{0}', only 'x' can be incremented or decremented")]
    InvalidUpdateTarget(String),

    #[error("Unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("'{0}' is not a function")]
    NotCallable(String),

    #[error("Function '{0}' must be called")]
    MissingCall(String),
}

/// 结果类型别名
pub type ParticleResult<T> = Result<T, ParticleError>;
pub type ExpressionResult<T> = Result<T, ExpressionError>;
