//! Pattern tokenizer.
//!
//! Produces offset-carrying tokens for the parser. The two lookahead rules
//! live here: an ASCII identifier directly followed by `(` is a plugin
//! invocation (otherwise its letters are ordinary literals), and a `(`
//! directly followed by `ident=` opens a named group.

use super::error::PhonexError;
use super::matchers::PhoneClass;
use crate::ipa::is_base_glyph;
use crate::syllable::SyllableConstituentType;

/// One token of pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the pattern text.
    pub offset: usize,
}

/// Token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A literal phone (matches by base glyph)
    Literal(char),
    /// A predefined class: `\c`, `\v`, `\g`, `\w`, `\s`
    Class(PhoneClass),
    /// A glyph set `[...]`, possibly negated
    GlyphSet { glyphs: Vec<char>, negated: bool },
    /// `.`, matching any element
    Dot,
    /// `^`, the input start anchor
    Caret,
    /// `$`, the input end anchor
    Dollar,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `{m}`, `{m,}`, `{m,n}`
    Repeat { min: u32, max: Option<u32> },
    /// `(` or `(name=`
    OpenGroup { name: Option<String> },
    /// `)`
    CloseGroup,
    /// `|`
    Pipe,
    /// `:CODE`, a secondary syllable-constituent matcher
    ScType(SyllableConstituentType),
    /// `name(arg, ...)`, a plugin invocation
    Plugin { name: String, args: Vec<String> },
}

/// Tokenize pattern text.
///
/// Whitespace between tokens is insignificant. All failures report the
/// byte offset of the offending character.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<Token>, PhonexError> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '.' => {
                tokens.push(Token { kind: TokenKind::Dot, offset });
                i += 1;
            }
            '^' => {
                tokens.push(Token { kind: TokenKind::Caret, offset });
                i += 1;
            }
            '$' => {
                tokens.push(Token { kind: TokenKind::Dollar, offset });
                i += 1;
            }
            '*' => {
                tokens.push(Token { kind: TokenKind::Star, offset });
                i += 1;
            }
            '+' => {
                tokens.push(Token { kind: TokenKind::Plus, offset });
                i += 1;
            }
            '?' => {
                tokens.push(Token { kind: TokenKind::Question, offset });
                i += 1;
            }
            ')' => {
                tokens.push(Token { kind: TokenKind::CloseGroup, offset });
                i += 1;
            }
            '|' => {
                tokens.push(Token { kind: TokenKind::Pipe, offset });
                i += 1;
            }
            '\\' => {
                let Some(&(_, letter)) = chars.get(i + 1) else {
                    return Err(syntax(offset, "'\\' at end of pattern"));
                };
                let class = PhoneClass::from_letter(letter)
                    .ok_or_else(|| syntax(offset, format!("escape '\\{}'", letter)))?;
                tokens.push(Token { kind: TokenKind::Class(class), offset });
                i += 2;
            }
            '[' => {
                let (kind, next) = scan_glyph_set(&chars, i)?;
                tokens.push(Token { kind, offset });
                i = next;
            }
            '{' => {
                let (kind, next) = scan_repeat(&chars, i)?;
                tokens.push(Token { kind, offset });
                i = next;
            }
            '(' => {
                let (name, next) = scan_group_name(&chars, i);
                tokens.push(Token { kind: TokenKind::OpenGroup { name }, offset });
                i = next;
            }
            ':' => {
                let (kind, next) = scan_sc_code(&chars, i)?;
                tokens.push(Token { kind, offset });
                i = next;
            }
            c if c.is_ascii_alphabetic() => {
                // Identifier directly followed by '(' is a plugin
                // invocation; otherwise the letter is a single literal.
                let mut j = i + 1;
                while j < chars.len() && (chars[j].1.is_ascii_alphanumeric() || chars[j].1 == '_') {
                    j += 1;
                }
                if j < chars.len() && chars[j].1 == '(' {
                    let name: String = chars[i..j].iter().map(|&(_, c)| c).collect();
                    let (args, next) = scan_plugin_args(&chars, j)?;
                    tokens.push(Token { kind: TokenKind::Plugin { name, args }, offset });
                    i = next;
                } else {
                    if !is_base_glyph(c) {
                        return Err(syntax(offset, format!("glyph '{}'", c)));
                    }
                    tokens.push(Token { kind: TokenKind::Literal(c), offset });
                    i += 1;
                }
            }
            c if is_base_glyph(c) => {
                tokens.push(Token { kind: TokenKind::Literal(c), offset });
                i += 1;
            }
            c => {
                return Err(syntax(offset, format!("character '{}'", c)));
            }
        }
    }
    Ok(tokens)
}

fn syntax(offset: usize, found: impl Into<String>) -> PhonexError {
    PhonexError::Syntax {
        offset,
        found: found.into(),
    }
}

/// Scan `[...]` starting at the opening bracket; returns the token kind
/// and the index just past the closing bracket.
fn scan_glyph_set(
    chars: &[(usize, char)],
    open: usize,
) -> Result<(TokenKind, usize), PhonexError> {
    let open_offset = chars[open].0;
    let mut i = open + 1;
    let negated = matches!(chars.get(i), Some(&(_, '^')));
    if negated {
        i += 1;
    }
    let mut glyphs = Vec::new();
    loop {
        match chars.get(i) {
            Some(&(_, ']')) => {
                if glyphs.is_empty() {
                    return Err(syntax(open_offset, "empty glyph set"));
                }
                return Ok((TokenKind::GlyphSet { glyphs, negated }, i + 1));
            }
            Some(&(offset, c)) => {
                if !is_base_glyph(c) {
                    return Err(syntax(offset, format!("glyph '{}' in set", c)));
                }
                glyphs.push(c);
                i += 1;
            }
            None => return Err(syntax(open_offset, "unterminated glyph set")),
        }
    }
}

/// Scan `{m}`, `{m,}`, or `{m,n}` starting at the opening brace.
fn scan_repeat(chars: &[(usize, char)], open: usize) -> Result<(TokenKind, usize), PhonexError> {
    let open_offset = chars[open].0;
    let mut i = open + 1;

    let mut read_number = |i: &mut usize| -> Option<u32> {
        let start = *i;
        while *i < chars.len() && chars[*i].1.is_ascii_digit() {
            *i += 1;
        }
        if *i == start {
            return None;
        }
        let digits: String = chars[start..*i].iter().map(|&(_, c)| c).collect();
        digits.parse().ok()
    };

    let min = read_number(&mut i).ok_or_else(|| syntax(open_offset, "repetition bound"))?;
    let max = match chars.get(i) {
        Some(&(_, '}')) => {
            return Ok((TokenKind::Repeat { min, max: Some(min) }, i + 1));
        }
        Some(&(_, ',')) => {
            i += 1;
            read_number(&mut i)
        }
        _ => return Err(syntax(open_offset, "unterminated repetition")),
    };
    match chars.get(i) {
        Some(&(_, '}')) => {
            if let Some(max) = max {
                if max < min {
                    return Err(syntax(open_offset, "repetition with max < min"));
                }
            }
            Ok((TokenKind::Repeat { min, max }, i + 1))
        }
        _ => Err(syntax(open_offset, "unterminated repetition")),
    }
}

/// Look past `(` for `ident=`; returns the group name (if any) and the
/// index of the first token inside the group.
fn scan_group_name(chars: &[(usize, char)], open: usize) -> (Option<String>, usize) {
    let mut i = open + 1;
    if !matches!(chars.get(i), Some(&(_, c)) if c.is_ascii_alphabetic() || c == '_') {
        return (None, open + 1);
    }
    while i < chars.len() && (chars[i].1.is_ascii_alphanumeric() || chars[i].1 == '_') {
        i += 1;
    }
    if matches!(chars.get(i), Some(&(_, '='))) {
        let name: String = chars[open + 1..i].iter().map(|&(_, c)| c).collect();
        (Some(name), i + 1)
    } else {
        (None, open + 1)
    }
}

/// Scan a plugin argument list starting at the opening parenthesis;
/// returns the trimmed literal arguments and the index past `)`.
///
/// Arguments are raw literals split on `,`; nesting and escapes are not
/// supported inside argument lists.
fn scan_plugin_args(
    chars: &[(usize, char)],
    open: usize,
) -> Result<(Vec<String>, usize), PhonexError> {
    let open_offset = chars[open].0;
    let mut i = open + 1;
    let mut content = String::new();
    loop {
        match chars.get(i) {
            Some(&(_, ')')) => break,
            Some(&(_, c)) => {
                content.push(c);
                i += 1;
            }
            None => return Err(syntax(open_offset, "unterminated plugin argument list")),
        }
    }
    let args = if content.trim().is_empty() {
        Vec::new()
    } else {
        content.split(',').map(|a| a.trim().to_string()).collect()
    };
    Ok((args, i + 1))
}

/// Scan a syllable-constituent code after `:`, longest code first.
fn scan_sc_code(chars: &[(usize, char)], colon: usize) -> Result<(TokenKind, usize), PhonexError> {
    let colon_offset = chars[colon].0;
    let first = chars.get(colon + 1).map(|&(_, c)| c);
    let second = chars.get(colon + 2).map(|&(_, c)| c);

    if let (Some(c1), Some(c2)) = (first, second) {
        if c1.is_ascii_alphabetic() && c2.is_ascii_alphabetic() {
            let code: String = [c1, c2].iter().collect();
            if let Some(sc) = SyllableConstituentType::from_code(&code) {
                return Ok((TokenKind::ScType(sc), colon + 3));
            }
        }
    }
    if let Some(c1) = first {
        if c1.is_ascii_alphabetic() {
            if let Some(sc) = SyllableConstituentType::from_code(&c1.to_string()) {
                return Ok((TokenKind::ScType(sc), colon + 2));
            }
        }
    }
    Err(syntax(colon_offset, "syllable constituent code"))
}
