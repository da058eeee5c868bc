//! Compound element selectors.
//!
//! Supports the subset of CSS needed to recognize behavior hooks in markup:
//! a tag name followed by any number of `.class`, `#id`, `[attr]` and
//! `[attr="value"]` parts. Combinators are not supported; every part must
//! match the same element.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a selector string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector was empty or whitespace.
    #[error("Empty selector")]
    Empty,

    /// A character that cannot start or continue a selector part.
    #[error("Unexpected character {found:?} at offset {offset} in selector {selector:?}")]
    Unexpected {
        /// Full selector text.
        selector: String,
        /// Offending character.
        found: char,
        /// Byte offset of the character.
        offset: usize,
    },

    /// A `[` or quote that was never closed.
    #[error("Unterminated attribute part in selector {0:?}")]
    Unterminated(String),

    /// `.`, `#` or `[` with no name after it.
    #[error("Missing name after {marker:?} in selector {selector:?}")]
    MissingName {
        /// Full selector text.
        selector: String,
        /// The marker character.
        marker: char,
    },
}

/// One condition an element must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// Tag name, compared case-insensitively.
    Tag(String),
    /// Element carries this class.
    Class(String),
    /// Element `id` attribute equals this value.
    Id(String),
    /// Element has the attribute, optionally with an exact value.
    Attr {
        /// Attribute name.
        name: String,
        /// Required value, if any.
        value: Option<String>,
    },
}

/// A compound selector: all parts must match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    parts: Vec<SimpleSelector>,
}

impl Selector {
    /// Selector matching a single class.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            parts: vec![SimpleSelector::Class(name.into())],
        }
    }

    /// Selector matching an id.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            parts: vec![SimpleSelector::Id(id.into())],
        }
    }

    /// Selector matching a tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            parts: vec![SimpleSelector::Tag(tag.into().to_ascii_lowercase())],
        }
    }

    /// Selector matching presence of an attribute.
    pub fn attr(name: impl Into<String>) -> Self {
        Self {
            parts: vec![SimpleSelector::Attr {
                name: name.into(),
                value: None,
            }],
        }
    }

    /// Selector matching an attribute with an exact value.
    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parts: vec![SimpleSelector::Attr {
                name: name.into(),
                value: Some(value.into()),
            }],
        }
    }

    /// Add another condition.
    pub fn and(mut self, part: SimpleSelector) -> Self {
        self.parts.push(part);
        self
    }

    /// The conditions making up this selector.
    pub fn parts(&self) -> &[SimpleSelector] {
        &self.parts
    }

    /// Parse selector text such as `button[type="submit"]` or `.dropdown`.
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let chars: Vec<(usize, char)> = trimmed.char_indices().collect();
        let mut parts = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];
            match c {
                '.' | '#' => {
                    let (name, next) = read_ident(&chars, i + 1);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName {
                            selector: trimmed.to_string(),
                            marker: c,
                        });
                    }
                    parts.push(if c == '.' {
                        SimpleSelector::Class(name)
                    } else {
                        SimpleSelector::Id(name)
                    });
                    i = next;
                }
                '[' => {
                    let (part, next) = read_attr(trimmed, &chars, i + 1)?;
                    parts.push(part);
                    i = next;
                }
                c if i == 0 && is_ident_char(c) => {
                    let (name, next) = read_ident(&chars, i);
                    parts.push(SimpleSelector::Tag(name.to_ascii_lowercase()));
                    i = next;
                }
                found => {
                    return Err(SelectorError::Unexpected {
                        selector: trimmed.to_string(),
                        found,
                        offset,
                    })
                }
            }
        }

        Ok(Self { parts })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[(usize, char)], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end].1) {
        end += 1;
    }
    (chars[start..end].iter().map(|(_, c)| c).collect(), end)
}

fn read_attr(
    selector: &str,
    chars: &[(usize, char)],
    start: usize,
) -> Result<(SimpleSelector, usize), SelectorError> {
    let (name, mut i) = read_ident(chars, start);
    if name.is_empty() {
        return Err(SelectorError::MissingName {
            selector: selector.to_string(),
            marker: '[',
        });
    }

    match chars.get(i).map(|(_, c)| *c) {
        Some(']') => Ok((SimpleSelector::Attr { name, value: None }, i + 1)),
        Some('=') => {
            i += 1;
            let value = match chars.get(i).map(|(_, c)| *c) {
                Some(quote @ ('"' | '\'')) => {
                    let close = chars[i + 1..]
                        .iter()
                        .position(|(_, c)| *c == quote)
                        .map(|p| i + 1 + p)
                        .ok_or_else(|| SelectorError::Unterminated(selector.to_string()))?;
                    let value: String = chars[i + 1..close].iter().map(|(_, c)| c).collect();
                    i = close + 1;
                    value
                }
                _ => {
                    let (value, next) = read_ident(chars, i);
                    i = next;
                    value
                }
            };
            match chars.get(i) {
                Some((_, ']')) => Ok((
                    SimpleSelector::Attr {
                        name,
                        value: Some(value),
                    },
                    i + 1,
                )),
                Some((offset, found)) => Err(SelectorError::Unexpected {
                    selector: selector.to_string(),
                    found: *found,
                    offset: *offset,
                }),
                None => Err(SelectorError::Unterminated(selector.to_string())),
            }
        }
        Some(found) => Err(SelectorError::Unexpected {
            selector: selector.to_string(),
            found,
            offset: chars[i].0,
        }),
        None => Err(SelectorError::Unterminated(selector.to_string())),
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                SimpleSelector::Tag(tag) => write!(f, "{tag}")?,
                SimpleSelector::Class(class) => write!(f, ".{class}")?,
                SimpleSelector::Id(id) => write!(f, "#{id}")?,
                SimpleSelector::Attr { name, value: None } => write!(f, "[{name}]")?,
                SimpleSelector::Attr {
                    name,
                    value: Some(value),
                } => write!(f, "[{name}=\"{value}\"]")?,
            }
        }
        Ok(())
    }
}
