//! Path pattern compilation.
//!
//! Patterns are made of literal text, named parameters (`:name`) and
//! optional named parameters (`:name?`). A parameter matches exactly one
//! non-empty path segment. When a parameter directly follows a `/`, that
//! slash belongs to the parameter, so an absent optional parameter also
//! drops its separator: `/groupes/:groupPk/:tab?/` matches both
//! `/groupes/abc/` and `/groupes/abc/messages/`.
//!
//! Matching is case-insensitive and tolerates a missing or extra trailing
//! slash. Exact patterns must consume the whole path; non-exact patterns
//! also accept any deeper path below them.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use super::RouteError;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed size for a compiled pattern regex.
const MAX_REGEX_SIZE: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Param {
        name: String,
        prefix: Option<char>,
        optional: bool,
    },
}

/// One path segment as seen by the overlap analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Param,
}

/// A compiled path pattern: a matcher and its inverse link builder.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pattern: String,
    tokens: Vec<Token>,
    regex: Regex,
    exact: bool,
}

impl PathPattern {
    pub fn new(pattern: &str, exact: bool) -> Result<Self, RouteError> {
        if pattern.is_empty() {
            return Err(RouteError::EmptyPattern);
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(RouteError::PatternTooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }
        if !pattern.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(pattern.to_string()));
        }

        let tokens = tokenize(pattern)?;
        let source = to_regex(&tokens, exact);
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .size_limit(MAX_REGEX_SIZE)
            .build()
            .map_err(|e| RouteError::Regex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
            regex,
            exact,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Param { name, .. } => Some(name.as_str()),
            Token::Literal(_) => None,
        })
    }

    /// Whether generating a link requires at least one parameter.
    pub fn has_required_params(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::Param { optional: false, .. }))
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Extract the (percent-decoded) parameter values of a matching path.
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        Some(
            self.param_names()
                .filter_map(|name| {
                    let raw = caps.name(name)?.as_str();
                    let value = urlencoding::decode(raw)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| raw.to_string());
                    Some((name.to_string(), value))
                })
                .collect(),
        )
    }

    /// Substitute `params` into the pattern.
    ///
    /// Values are percent-encoded. Absent or empty optional parameters are
    /// dropped together with their leading slash.
    pub fn to_path(&self, params: &HashMap<String, String>) -> Result<String, RouteError> {
        let mut path = String::with_capacity(self.pattern.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => path.push_str(text),
                Token::Param {
                    name,
                    prefix,
                    optional,
                } => match params.get(name) {
                    Some(value) if !value.is_empty() => {
                        if let Some(prefix) = prefix {
                            path.push(*prefix);
                        }
                        path.push_str(&urlencoding::encode(value));
                    }
                    _ if *optional => {}
                    Some(_) => {
                        return Err(RouteError::InvalidParameterValue {
                            pattern: self.pattern.clone(),
                            name: name.clone(),
                        })
                    }
                    None => {
                        return Err(RouteError::MissingParameter {
                            pattern: self.pattern.clone(),
                            name: name.clone(),
                        })
                    }
                },
            }
        }
        Ok(path)
    }

    /// Every concrete segment layout this pattern can take, one per
    /// combination of present/absent optional parameters.
    pub(crate) fn segment_variants(&self) -> Vec<Vec<Segment>> {
        let mut variants: Vec<Vec<Segment>> = vec![Vec::new()];
        let trimmed = self.pattern.trim_end_matches('/');
        for piece in trimmed.split('/').skip(1) {
            if piece.starts_with(':') && piece.ends_with('?') {
                let with: Vec<_> = variants
                    .iter()
                    .cloned()
                    .map(|mut v| {
                        v.push(Segment::Param);
                        v
                    })
                    .collect();
                variants.extend(with);
            } else {
                // a piece mixing literal text and a parameter matches too much to reason about
                let segment = if piece.contains(':') {
                    Segment::Param
                } else {
                    Segment::Literal(piece.to_lowercase())
                };
                variants.iter_mut().for_each(|v| v.push(segment.clone()));
            }
        }
        variants
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.exact == other.exact
    }
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, RouteError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        if c != ':' {
            literal.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some((_, next)) = chars.next_if(|(_, n)| n.is_ascii_alphanumeric() || *n == '_') {
            name.push(next);
        }
        if !name.starts_with(|n: char| n.is_ascii_alphabetic() || n == '_') {
            return Err(RouteError::InvalidParameter {
                pattern: pattern.to_string(),
                position,
            });
        }
        let duplicate = tokens
            .iter()
            .any(|t| matches!(t, Token::Param { name: existing, .. } if *existing == name));
        if duplicate {
            return Err(RouteError::DuplicateParameter {
                pattern: pattern.to_string(),
                name,
            });
        }

        let optional = chars.next_if(|(_, n)| *n == '?').is_some();
        let prefix = if literal.ends_with('/') {
            literal.pop();
            Some('/')
        } else {
            None
        };
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(Token::Param {
            name,
            prefix,
            optional,
        });
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn to_regex(tokens: &[Token], exact: bool) -> String {
    let mut source = String::from("^");
    let last = tokens.len().saturating_sub(1);

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Literal(text) => {
                // the trailing slash is always optional, see below
                let text = if index == last {
                    text.strip_suffix('/').unwrap_or(text)
                } else {
                    text
                };
                source.push_str(&regex::escape(text));
            }
            Token::Param {
                name,
                prefix,
                optional,
            } => {
                let prefix = prefix
                    .map(|p| regex::escape(&p.to_string()))
                    .unwrap_or_default();
                let capture = format!("{prefix}(?P<{name}>[^/]+?)");
                if *optional {
                    source.push_str(&format!("(?:{capture})?"));
                } else {
                    source.push_str(&capture);
                }
            }
        }
    }

    source.push_str("/?");
    if exact {
        source.push('$');
    } else {
        source.push_str("(?:/.*)?$");
    }
    source
}
