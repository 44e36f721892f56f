//! 路径表达式语法树与求值
//!
//! 编译后的表达式是一棵不可变的语法树，每次调用只做树遍历求值，
//! 不会再次解析源文本。

use std::fmt;
use std::sync::Arc;

/// 单参数数学函数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    Sqrt,
    Abs,
    Floor,
    Round,
    Ceil,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
}

impl UnaryFunction {
    pub fn apply(self, v: f64) -> f64 {
        match self {
            UnaryFunction::Sqrt => v.sqrt(),
            UnaryFunction::Abs => v.abs(),
            UnaryFunction::Floor => v.floor(),
            // 四舍五入时 .5 一律向正无穷方向取整（-2.5 -> -2）
            UnaryFunction::Round => (v + 0.5).floor(),
            UnaryFunction::Ceil => v.ceil(),
            UnaryFunction::Sin => v.sin(),
            UnaryFunction::Cos => v.cos(),
            UnaryFunction::Tan => v.tan(),
            UnaryFunction::Asin => v.asin(),
            UnaryFunction::Acos => v.acos(),
            UnaryFunction::Atan => v.atan(),
            UnaryFunction::Log => v.ln(),
        }
    }
}

/// 双参数数学函数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryFunction {
    /// `pow(base, exponent)`
    Pow,
    /// `atan2(y, x)`
    Atan2,
}

impl BinaryFunction {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            // powf 对 1^NaN、(±1)^±inf 返回 1，这里统一为 NaN
            BinaryFunction::Pow if b.is_nan() => f64::NAN,
            BinaryFunction::Pow if a.abs() == 1.0 && b.is_infinite() => f64::NAN,
            BinaryFunction::Pow => a.powf(b),
            BinaryFunction::Atan2 => a.atan2(b),
        }
    }
}

/// 数学常量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    E,
    Pi,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::E => std::f64::consts::E,
            Constant::Pi => std::f64::consts::PI,
        }
    }
}

/// 白名单中的名称解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathName {
    Unary(UnaryFunction),
    Binary(BinaryFunction),
    Constant(Constant),
}

impl MathName {
    /// 按名称查找数学函数或常量
    pub fn lookup(name: &str) -> Option<Self> {
        let found = match name {
            "pow" => MathName::Binary(BinaryFunction::Pow),
            "atan2" => MathName::Binary(BinaryFunction::Atan2),
            "sqrt" => MathName::Unary(UnaryFunction::Sqrt),
            "abs" => MathName::Unary(UnaryFunction::Abs),
            "floor" => MathName::Unary(UnaryFunction::Floor),
            "round" => MathName::Unary(UnaryFunction::Round),
            "ceil" => MathName::Unary(UnaryFunction::Ceil),
            "sin" => MathName::Unary(UnaryFunction::Sin),
            "cos" => MathName::Unary(UnaryFunction::Cos),
            "tan" => MathName::Unary(UnaryFunction::Tan),
            "asin" => MathName::Unary(UnaryFunction::Asin),
            "acos" => MathName::Unary(UnaryFunction::Acos),
            "atan" => MathName::Unary(UnaryFunction::Atan),
            "log" => MathName::Unary(UnaryFunction::Log),
            "E" => MathName::Constant(Constant::E),
            "PI" => MathName::Constant(Constant::Pi),
            _ => return None,
        };
        Some(found)
    }
}

/// 二元算术运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
        }
    }
}

/// 自增/自减
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub fn delta(self) -> f64 {
        match self {
            UpdateOp::Increment => 1.0,
            UpdateOp::Decrement => -1.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

/// 表达式语法树
///
/// 函数调用缺少的参数在解析时补为 `NaN`，多余的参数放在 `extra` 中，
/// 只为了其中对 `x` 的修改而求值。
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Number(f64),
    /// 唯一的自由变量 `x`
    Variable,
    Constant(Constant),
    Negate(Box<Ast>),
    Binary {
        op: BinaryOp,
        lhs: Box<Ast>,
        rhs: Box<Ast>,
    },
    /// `++x` / `--x` 返回修改后的值，`x++` / `x--` 返回修改前的值
    Update {
        op: UpdateOp,
        prefix: bool,
    },
    UnaryCall {
        function: UnaryFunction,
        arg: Box<Ast>,
        extra: Vec<Ast>,
    },
    BinaryCall {
        function: BinaryFunction,
        lhs: Box<Ast>,
        rhs: Box<Ast>,
        extra: Vec<Ast>,
    },
    /// 逗号表达式：从左到右求值，结果为最后一项
    Sequence(Vec<Ast>),
}

impl Ast {
    /// 以 `x` 为自变量求值
    ///
    /// `x` 是每次调用独立的局部变量，自增/自减只影响本次求值中后续对 `x` 的读取。
    pub fn eval(&self, x: f64) -> f64 {
        let mut x = x;
        self.eval_in(&mut x)
    }

    fn eval_in(&self, x: &mut f64) -> f64 {
        match self {
            Ast::Number(v) => *v,
            Ast::Variable => *x,
            Ast::Constant(c) => c.value(),
            Ast::Negate(inner) => -inner.eval_in(x),
            Ast::Binary { op, lhs, rhs } => {
                let a = lhs.eval_in(x);
                let b = rhs.eval_in(x);
                op.apply(a, b)
            }
            Ast::Update { op, prefix } => {
                let old = *x;
                *x += op.delta();
                if *prefix {
                    *x
                } else {
                    old
                }
            }
            Ast::UnaryCall {
                function,
                arg,
                extra,
            } => {
                let v = arg.eval_in(x);
                Self::eval_discarded(extra, x);
                function.apply(v)
            }
            Ast::BinaryCall {
                function,
                lhs,
                rhs,
                extra,
            } => {
                let a = lhs.eval_in(x);
                let b = rhs.eval_in(x);
                Self::eval_discarded(extra, x);
                function.apply(a, b)
            }
            Ast::Sequence(items) => items.iter().fold(f64::NAN, |_, item| item.eval_in(x)),
        }
    }

    fn eval_discarded(items: &[Ast], x: &mut f64) {
        for item in items {
            item.eval_in(x);
        }
    }

    /// 表达式是否引用了 `x`
    pub fn uses_variable(&self) -> bool {
        match self {
            Ast::Number(_) | Ast::Constant(_) => false,
            Ast::Variable | Ast::Update { .. } => true,
            Ast::Negate(inner) => inner.uses_variable(),
            Ast::Binary { lhs, rhs, .. } => lhs.uses_variable() || rhs.uses_variable(),
            Ast::UnaryCall { arg, extra, .. } => {
                arg.uses_variable() || extra.iter().any(Ast::uses_variable)
            }
            Ast::BinaryCall { lhs, rhs, extra, .. } => {
                lhs.uses_variable() || rhs.uses_variable() || extra.iter().any(Ast::uses_variable)
            }
            Ast::Sequence(items) => items.iter().any(Ast::uses_variable),
        }
    }
}

/// 编译后的路径函数 `movement -> offset_y`
///
/// 创建后不可变，克隆只增加引用计数，可被多个粒子共享。
#[derive(Clone)]
pub struct CompiledPath {
    ast: Arc<Ast>,
    source: Arc<str>,
}

impl CompiledPath {
    pub(crate) fn new(ast: Ast, source: &str) -> Self {
        Self {
            ast: Arc::new(ast),
            source: Arc::from(source),
        }
    }

    /// 在 `x` 处求值
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.ast.eval(x)
    }

    /// 过滤后实际参与编译的文本
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// 是否与另一个路径共享同一棵语法树
    pub fn ptr_eq(&self, other: &CompiledPath) -> bool {
        Arc::ptr_eq(&self.ast, &other.ast)
    }
}

impl fmt::Debug for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPath")
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_covers_whitelist() {
        for name in crate::scripting::whitelist::MATH_NAMES {
            assert!(MathName::lookup(name).is_some(), "missing {}", name);
        }
        assert!(MathName::lookup("exp").is_none());
        assert!(MathName::lookup("x").is_none());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(UnaryFunction::Round.apply(2.5), 3.0);
        assert_eq!(UnaryFunction::Round.apply(-2.5), -2.0);
        assert_eq!(UnaryFunction::Round.apply(-2.6), -3.0);
    }

    #[test]
    fn test_eval_tree() {
        // 2 * x + pow(x, 2)
        let ast = Ast::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Ast::Binary {
                op: BinaryOp::Mul,
                lhs: Box::new(Ast::Number(2.0)),
                rhs: Box::new(Ast::Variable),
            }),
            rhs: Box::new(Ast::BinaryCall {
                function: BinaryFunction::Pow,
                lhs: Box::new(Ast::Variable),
                rhs: Box::new(Ast::Number(2.0)),
                extra: Vec::new(),
            }),
        };
        assert_eq!(ast.eval(3.0), 15.0);
        assert!(ast.uses_variable());
        assert!(!Ast::Constant(Constant::Pi).uses_variable());
    }

    #[test]
    fn test_update_changes_later_reads() {
        // x++ + x
        let ast = Ast::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Ast::Update {
                op: UpdateOp::Increment,
                prefix: false,
            }),
            rhs: Box::new(Ast::Variable),
        };
        assert_eq!(ast.eval(3.0), 7.0);
        // 每次求值从传入的 x 开始
        assert_eq!(ast.eval(3.0), 7.0);

        let prefix = Ast::Update {
            op: UpdateOp::Decrement,
            prefix: true,
        };
        assert_eq!(prefix.eval(3.0), 2.0);
    }

    #[test]
    fn test_sequence_and_extra_arguments() {
        // (x--, x)
        let seq = Ast::Sequence(vec![
            Ast::Update {
                op: UpdateOp::Decrement,
                prefix: false,
            },
            Ast::Variable,
        ]);
        assert_eq!(seq.eval(5.0), 4.0);
        assert!(seq.uses_variable());

        // sin(0, x++) 的多余参数只影响 x
        let call = Ast::UnaryCall {
            function: UnaryFunction::Sin,
            arg: Box::new(Ast::Number(0.0)),
            extra: vec![Ast::Update {
                op: UpdateOp::Increment,
                prefix: false,
            }],
        };
        assert_eq!(call.eval(1.0), 0.0);
        assert!(call.uses_variable());
    }

    #[test]
    fn test_pow_nan_exponent() {
        assert!(BinaryFunction::Pow.apply(1.0, f64::NAN).is_nan());
        assert!(BinaryFunction::Pow.apply(-1.0, f64::INFINITY).is_nan());
        assert_eq!(BinaryFunction::Pow.apply(f64::NAN, 0.0), 1.0);
        assert_eq!(BinaryFunction::Pow.apply(2.0, 10.0), 1024.0);
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        let ast = Ast::Binary {
            op: BinaryOp::Div,
            lhs: Box::new(Ast::Number(1.0)),
            rhs: Box::new(Ast::Variable),
        };
        assert_eq!(ast.eval(0.0), f64::INFINITY);
    }

    #[test]
    fn test_shared_path_clone() {
        let path = CompiledPath::new(Ast::Variable, "x");
        let other = path.clone();
        assert!(path.ptr_eq(&other));
        assert_eq!(other.evaluate(4.0), 4.0);
        assert_eq!(other.source(), "x");
    }
}
