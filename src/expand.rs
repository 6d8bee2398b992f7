//! Recursive macro expansion of program text into a flat primitive string.
//!
//! The entry point is [`Expander`]. Build it over a parsed function table,
//! optionally adjust the depth limit, then call [`Expander::expand`] with the
//! main program text. The result is a string over the alphabet `s`/`l`/`r`
//! where every character is exactly one primitive instruction, in
//! left-to-right execution order.
//!
//! Expansion is pure: it reads the function table and produces a string, and
//! no binding table is ever shared mutably across call frames. Each frame
//! gets its own snapshot cloned from its caller, so sibling expansions cannot
//! observe each other's bindings.

use crate::expr;
use crate::program::FunctionDef;
use std::collections::HashMap;
use thiserror::Error;

/// Default recursion depth limit. Exceeding it is a reported error, the
/// usual sign of a function with no base case.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Parameter bindings of one call frame, keyed by uppercase parameter name.
pub type Bindings = HashMap<char, Arg>;

/// A value bound to a parameter.
#[derive(Clone, Debug)]
pub enum Arg {
    /// A numeric argument, used for guarded recursion counting.
    Num(i64),
    /// An instruction-valued argument: a literal fragment of program text,
    /// expanded lazily wherever the callee references it by name. The
    /// caller's bindings are captured alongside so the fragment always
    /// expands against the frame it was written in.
    Fragment {
        /// Unexpanded fragment text.
        text: String,
        /// Binding snapshot of the frame the fragment was written in.
        bindings: Bindings,
    },
}

/// Expansion failures. Collisions, step caps and other simulation outcomes
/// are *not* errors; this type covers interpreter failures only.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// A call frame exceeded the configured recursion depth.
    #[error("recursion depth limit of {limit} exceeded while expanding `{name}`")]
    DepthExceeded {
        /// Function whose call pushed past the limit.
        name: char,
        /// The configured limit.
        limit: usize,
    },
}

/// Expands instruction text against a function table.
pub struct Expander<'a> {
    functions: &'a HashMap<char, FunctionDef>,
    max_depth: usize,
}

impl<'a> Expander<'a> {
    /// Creates an expander over `functions` with the default depth limit.
    pub fn new(functions: &'a HashMap<char, FunctionDef>) -> Self {
        Self {
            functions,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the recursion depth limit (builder pattern).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expands `text` to a flat primitive-instruction string.
    ///
    /// Scanning rules, left to right:
    /// - `s`, `l`, `r` emit themselves.
    /// - An uppercase letter expands its bound instruction fragment, if any;
    ///   numeric or unbound names contribute nothing.
    /// - Any other lowercase letter is a function call. An immediately
    ///   following `(` opens an argument list, closed by the matching `)`
    ///   (paren-depth counted). A call to an unknown name contributes
    ///   nothing, as does a call with any numeric argument ≤ 0 (the guard
    ///   that terminates counted recursion).
    /// - Every other character is skipped.
    pub fn expand(&self, text: &str) -> Result<String, ExpandError> {
        let mut out = String::new();
        self.expand_into(text, &Bindings::new(), 0, &mut out)?;
        Ok(out)
    }

    fn expand_into(
        &self,
        text: &str,
        bindings: &Bindings,
        depth: usize,
        out: &mut String,
    ) -> Result<(), ExpandError> {
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                c @ ('s' | 'l' | 'r') => {
                    out.push(c);
                    i += 1;
                }
                c if c.is_ascii_uppercase() => {
                    // Fragment references expand at the same depth, against
                    // the bindings captured when the fragment was written.
                    if let Some(Arg::Fragment { text, bindings }) = bindings.get(&c) {
                        self.expand_into(text, bindings, depth, out)?;
                    }
                    i += 1;
                }
                c if c.is_ascii_lowercase() => {
                    i = self.expand_call(c, &chars, i, bindings, depth, out)?;
                }
                _ => i += 1,
            }
        }
        Ok(())
    }

    /// Expands the call starting at `chars[at]` and returns the scan index
    /// just past it (past the argument list, if one follows).
    fn expand_call(
        &self,
        name: char,
        chars: &[char],
        at: usize,
        bindings: &Bindings,
        depth: usize,
        out: &mut String,
    ) -> Result<usize, ExpandError> {
        let (raw_args, next) = split_arguments(chars, at);

        let Some(func) = self.functions.get(&name) else {
            // Unrecognized calls contribute nothing; the argument list is
            // consumed regardless.
            return Ok(next);
        };

        // Bind arguments to declared parameters by position. A call with
        // fewer arguments than parameters leaves the extras at whatever the
        // inherited snapshot holds. Numeric classification: nonempty and all
        // characters drawn from 0-9, A-Z, `+`, `-`.
        let mut bound = Vec::with_capacity(raw_args.len());
        for (param, raw) in func.params.iter().zip(raw_args) {
            let arg = if expr::is_numeric(&raw) {
                Arg::Num(expr::eval(&raw, bindings))
            } else {
                Arg::Fragment {
                    text: raw,
                    bindings: bindings.clone(),
                }
            };
            bound.push((*param, arg));
        }

        // Guard: a call with any non-positive numeric argument expands to
        // nothing. Checked before the depth limit so a guarded base case is
        // never mistaken for runaway recursion.
        if bound
            .iter()
            .any(|(_, arg)| matches!(arg, Arg::Num(n) if *n <= 0))
        {
            return Ok(next);
        }

        if depth + 1 > self.max_depth {
            return Err(ExpandError::DepthExceeded {
                name,
                limit: self.max_depth,
            });
        }

        let mut frame = bindings.clone();
        frame.extend(bound);
        self.expand_into(&func.body, &frame, depth + 1, out)?;
        Ok(next)
    }
}

/// Reads an optional `(...)`-enclosed argument list following `chars[at]`.
///
/// The closing `)` is found by paren-depth counting, so nested parentheses
/// inside an argument do not end the list early. The enclosed text is then
/// split on *every* comma: argument splitting itself is not paren-aware,
/// a documented limitation of the minimal grammar. An unterminated list
/// extends to the end of the text.
fn split_arguments(chars: &[char], at: usize) -> (Vec<String>, usize) {
    if chars.get(at + 1) != Some(&'(') {
        return (Vec::new(), at + 1);
    }

    let mut depth = 1usize;
    let mut j = at + 2;
    while j < chars.len() && depth > 0 {
        match chars[j] {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        j += 1;
    }

    let end = if depth == 0 { j - 1 } else { j };
    let inner: String = chars[at + 2..end].iter().collect();
    let args = inner
        .split(',')
        .map(|a| a.trim().to_string())
        .collect();
    (args, j)
}
