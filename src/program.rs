//! Splits program source text into function definitions and the main
//! instruction sequence.
//!
//! Each line is either a definition of the form
//! `<lowercase>['(' UPPERCASE{,UPPERCASE} ')'] ':' <body>` or, when the head
//! does not match that grammar in its entirety, part of the main program.
//! Malformed definitions are therefore never an error; they simply execute
//! as (mostly inert) main-program text.

use std::collections::HashMap;

/// A named, parameterized rewrite rule. The body stays unexpanded until a
/// call binds the parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    /// Single lowercase letter naming the function.
    pub name: char,
    /// Declared parameter names, in positional order.
    pub params: Vec<char>,
    /// Unexpanded body text.
    pub body: String,
}

/// A parsed program: the function table plus the residual main text.
///
/// The table is rebuilt from source on every parse; definitions for the same
/// name silently overwrite earlier ones.
#[derive(Clone, Debug, Default)]
pub struct Program {
    /// Function definitions keyed by name.
    pub functions: HashMap<char, FunctionDef>,
    /// All non-definition lines, trimmed and joined with newlines, in order.
    pub main: String,
    /// Byte length of the raw source, reported to presentation layers as a
    /// size metric. Not enforced as a limit.
    pub source_len: usize,
}

impl Program {
    /// Parses `source` line by line. Never fails: lines that are not
    /// definitions become main-program text.
    pub fn parse(source: &str) -> Self {
        let mut functions = HashMap::new();
        let mut main = Vec::new();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_definition(line) {
                Some(def) => {
                    // Later definitions for the same name overwrite earlier ones.
                    functions.insert(def.name, def);
                }
                None => main.push(line),
            }
        }

        Self {
            functions,
            main: main.join("\n"),
            source_len: source.len(),
        }
    }
}

/// Tries to read `line` as one complete definition. `None` means the line
/// belongs to the main program.
fn parse_definition(line: &str) -> Option<FunctionDef> {
    let name = line.chars().next()?;
    if !name.is_ascii_lowercase() {
        return None;
    }

    // name is ASCII, so byte slicing past it is safe.
    let rest = &line[1..];
    let (params, body) = if let Some(inner) = rest.strip_prefix('(') {
        let close = inner.find(')')?;
        let body = inner[close + 1..].strip_prefix(':')?;
        (parse_params(&inner[..close])?, body)
    } else {
        (Vec::new(), rest.strip_prefix(':')?)
    };

    Some(FunctionDef {
        name,
        params,
        body: body.trim().to_string(),
    })
}

/// Parses a comma-separated list of single uppercase parameter names.
/// Anything else rejects the whole definition head.
fn parse_params(list: &str) -> Option<Vec<char>> {
    let mut params = Vec::new();
    for piece in list.split(',') {
        let mut chars = piece.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(p), None) if p.is_ascii_uppercase() => params.push(p),
            _ => return None,
        }
    }
    Some(params)
}
