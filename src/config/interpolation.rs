//! Variable interpolation for endpoint URL templates.
//!
//! Templates use `${variable}` syntax, for example
//! `https://${network}.infura.io/v3/${INFURA_API_KEY}`.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$${escaped}` - produces literal `${escaped}` in output

use std::collections::{BTreeSet, HashMap};

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing ${var} interpolations.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let var_name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                segments.push(Segment::Variable(var_name));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names from an interpolated string.
pub fn extract_variables(input: &str) -> BTreeSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Context for variable resolution.
///
/// Built-in variables (such as `network`) take priority over environment
/// variables. Empty environment values count as unset.
#[derive(Debug, Default)]
pub struct InterpolationContext<'a> {
    /// Built-in variables
    pub builtins: HashMap<String, String>,

    /// Environment variables
    pub env: Option<&'a HashMap<String, String>>,
}

impl<'a> InterpolationContext<'a> {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `network` built-in.
    pub fn with_network(mut self, name: &str) -> Self {
        self.builtins
            .insert("network".to_string(), name.to_string());
        self
    }

    /// Resolve against the given environment.
    pub fn with_env(mut self, env: &'a HashMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.builtins.get(name).map(String::as_str).or_else(|| {
            self.env
                .and_then(|env| env.get(name))
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        })
    }
}

/// Resolve all variables in an interpolated string.
///
/// Unknown variables become the empty string, so a template whose key is
/// unset still produces a (keyless) URL.
///
/// # Example
///
/// ```
/// use deployrc::config::{resolve_string, InterpolationContext};
/// use std::collections::HashMap;
///
/// let env = HashMap::from([("INFURA_API_KEY".to_string(), "abc123".to_string())]);
/// let ctx = InterpolationContext::new().with_network("goerli").with_env(&env);
///
/// let url = resolve_string("https://${network}.infura.io/v3/${INFURA_API_KEY}", &ctx);
/// assert_eq!(url, "https://goerli.infura.io/v3/abc123");
/// ```
pub fn resolve_string(input: &str, context: &InterpolationContext<'_>) -> String {
    parse_interpolation(input)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Variable(name) => context.resolve(&name).unwrap_or_default().to_string(),
        })
        .collect()
}
