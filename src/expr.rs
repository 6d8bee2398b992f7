//! Arithmetic over integer literals and bound parameter names.
//!
//! The grammar is deliberately tiny and evaluates by the first matching
//! operator in the string, `+` checked before `-`:
//!
//! - `A+B+...` — every `+`-delimited term is evaluated recursively and the
//!   results summed.
//! - `A-B` — exactly two operands; any other number of `-`-delimited terms
//!   evaluates to 0 (strict two-operand rule). A leading `-` therefore still
//!   works: `-5` is the two operands `` and `5`.
//! - A single uppercase letter reads its numeric binding; unbound names and
//!   names bound to instruction fragments read as 0.
//! - Anything else parses as an integer literal, or 0 when it does not.
//!
//! Arithmetic saturates at the `i64` range rather than wrapping.

use crate::expand::{Arg, Bindings};

/// Whether `s` is classified as a numeric expression: nonempty and drawn
/// entirely from digits, uppercase letters, `+` and `-`. Anything else is an
/// instruction fragment, not an expression.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase() || c == '+' || c == '-')
}

/// Evaluates `expr` against the current bindings. Total: every input maps to
/// some `i64`, with 0 as the value of everything the grammar does not cover.
pub fn eval(expr: &str, bindings: &Bindings) -> i64 {
    let expr = expr.trim();

    if expr.contains('+') {
        return expr
            .split('+')
            .map(|term| eval(term, bindings))
            .fold(0i64, i64::saturating_add);
    }

    if expr.contains('-') {
        let terms: Vec<&str> = expr.split('-').collect();
        // Strict two-operand subtraction; longer chains are undefined in
        // the source grammar and evaluate to 0.
        return match terms.as_slice() {
            [left, right] => eval(left, bindings).saturating_sub(eval(right, bindings)),
            _ => 0,
        };
    }

    let mut chars = expr.chars();
    if let (Some(name), None) = (chars.next(), chars.next())
        && name.is_ascii_uppercase()
    {
        return match bindings.get(&name) {
            Some(Arg::Num(n)) => *n,
            _ => 0,
        };
    }

    expr.parse().unwrap_or(0)
}
