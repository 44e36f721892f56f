//! 路径表达式白名单过滤
//!
//! 从左到右扫描源文本，每个位置按顺序尝试：
//! 1. 单个允许字符：数字、`.`、`* - + /`、括号、`x`、空格、逗号
//! 2. 数学名称（按 [`MATH_NAMES`] 的顺序，先匹配者胜出）
//!
//! 什么都不匹配的字符被直接丢弃，而不是报错。

/// 允许出现在表达式中的数学函数与常量名
///
/// 顺序有意义：`atan` 位于 `atan2` 之前，所以 `atan2` 会被拆成 `atan` 和 `2`，
/// 拼接后仍然得到 `atan2`。
pub const MATH_NAMES: [&str; 16] = [
    "pow", "sqrt", "abs", "floor", "round", "ceil", "E", "PI", "sin", "cos", "tan", "asin",
    "acos", "atan", "atan2", "log",
];

fn is_allowed_char(c: char) -> bool {
    matches!(
        c,
        '0'..='9' | '.' | '*' | '-' | '+' | '/' | '(' | ')' | 'x' | ' ' | ','
    )
}

/// 过滤结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtered {
    /// 保留下来的文本（按原顺序拼接）
    pub text: String,
    /// 被丢弃的字符数
    pub dropped: usize,
}

/// 按白名单过滤表达式源文本
pub fn filter(source: &str) -> Filtered {
    let mut text = String::with_capacity(source.len());
    let mut dropped = 0;
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        if is_allowed_char(c) {
            text.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        if let Some(name) = MATH_NAMES.iter().find(|name| rest.starts_with(**name)) {
            text.push_str(name);
            rest = &rest[name.len()..];
            continue;
        }

        dropped += 1;
        rest = &rest[c.len_utf8()..];
    }

    Filtered { text, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_expression_untouched() {
        let out = filter("sin(x) * 20 + 1.5");
        assert_eq!(out.text, "sin(x) * 20 + 1.5");
        assert_eq!(out.dropped, 0);
    }

    #[test]
    fn test_disallowed_characters_dropped() {
        let out = filter("2+x;alert(1)");
        // 'alert' 中没有任何白名单名称，只剩下括号和数字
        assert_eq!(out.text, "2+x(1)");
        assert_eq!(out.dropped, 6);
    }

    #[test]
    fn test_x_survives_inside_other_words() {
        assert_eq!(filter("exp(x)").text, "x(x)");
        assert_eq!(filter("max(x,1)").text, "x(x,1)");
    }

    #[test]
    fn test_atan2_reassembles() {
        assert_eq!(filter("atan2(x, 1)").text, "atan2(x, 1)");
    }

    #[test]
    fn test_names_inside_longer_names() {
        assert_eq!(filter("asin(x)+acos(x)").text, "asin(x)+acos(x)");
        assert_eq!(filter("Math.PI").text, ".PI");
    }

    #[test]
    fn test_non_ascii_dropped() {
        let out = filter("x×2→");
        assert_eq!(out.text, "x2");
        assert_eq!(out.dropped, 2);
    }
}
