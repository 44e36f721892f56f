//! 路径表达式编译器
//!
//! 把受限的算术表达式字符串编译成单参数函数 `f(x) -> f64`。
//! 不执行任何动态代码：源文本先经过白名单过滤，再解析为语法树，
//! 每次调用只对语法树求值。
//!
//! ## 使用示例
//!
//! ```rust
//! use path_particles::scripting::compile;
//!
//! let path = compile("sin(x) * 20").unwrap();
//! assert_eq!(path.evaluate(0.0), 0.0);
//!
//! // 不在白名单中的字符被直接丢弃
//! let path = compile("x * 2; drop_table").unwrap();
//! assert_eq!(path.evaluate(5.0), 10.0);
//! ```

pub mod expression;
pub mod parser;
pub mod whitelist;


pub use expression::{
    Ast, BinaryFunction, BinaryOp, CompiledPath, Constant, MathName, UnaryFunction, UpdateOp,
};
pub use whitelist::MATH_NAMES;

use crate::core::error::{ExpressionError, ExpressionResult};

/// 编译路径表达式
///
/// # 错误
///
/// 过滤后为空，或过滤后的文本不是合法表达式时返回 [`ExpressionError`]。
pub fn compile(source: &str) -> ExpressionResult<CompiledPath> {
    let filtered = whitelist::filter(source);
    if filtered.dropped > 0 {
        tracing::debug!(
            target: "expression",
            "Dropped {} disallowed character(s) from path expression",
            filtered.dropped
        );
    }

    let text = filtered.text.trim();
    if text.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let ast = parser::parse(text)?;
    tracing::debug!(target: "expression", "Compiled path expression `{}`", text);
    Ok(CompiledPath::new(ast, text))
}
