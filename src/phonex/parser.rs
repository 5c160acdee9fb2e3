//! Pattern parser: tokens → AST.
//!
//! A hand-written recursive-descent parser mirroring the grammar
//! documented at the crate root. Group indices are assigned here, in
//! syntactic order, so that a quantified group keeps one index across
//! fragment replication in the compiler.

use super::error::PhonexError;
use super::matchers::PhoneClass;
use super::tokenizer::{Token, TokenKind};
use crate::fsa::BoundaryKind;
use crate::syllable::SyllableConstituentType;

/// Parsed pattern syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Ast {
    /// Literal phone, matched by base glyph
    Literal(char),
    /// Predefined class
    Class(PhoneClass),
    /// Glyph set
    GlyphSet { glyphs: Vec<char>, negated: bool },
    /// `.`, matching any element
    Any,
    /// `^` / `$`
    Anchor(BoundaryKind),
    /// Plugin invocation; offset kept for registry errors
    Plugin {
        name: String,
        args: Vec<String>,
        offset: usize,
    },
    /// A matcher term narrowed by a syllable-constituent check
    WithSc {
        inner: Box<Ast>,
        sc: SyllableConstituentType,
    },
    /// Capture group; `index` is 1-based and assigned in syntactic order
    Group {
        index: usize,
        name: Option<String>,
        inner: Box<Ast>,
    },
    /// Concatenation
    Seq(Vec<Ast>),
    /// Alternation
    Alt(Vec<Ast>),
    /// Quantified sub-pattern
    Repeat {
        inner: Box<Ast>,
        min: u32,
        max: Option<u32>,
    },
}

impl Ast {
    /// True for terms a secondary `:code` matcher may attach to.
    fn is_matcher_term(&self) -> bool {
        matches!(
            self,
            Ast::Literal(_)
                | Ast::Class(_)
                | Ast::GlyphSet { .. }
                | Ast::Any
                | Ast::Plugin { .. }
                | Ast::WithSc { .. }
        )
    }
}

/// Parse a token stream.
///
/// Returns the AST and the capture-group name table (index 0 holding
/// group 1's name).
pub(crate) fn parse(tokens: &[Token]) -> Result<(Ast, Vec<Option<String>>), PhonexError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        group_names: Vec::new(),
    };
    let ast = parser.alternation()?;
    if let Some(token) = parser.peek() {
        return Err(parser.unexpected(token));
    }
    Ok((ast, parser.group_names))
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    group_names: Vec<Option<String>>,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn unexpected(&self, token: &Token) -> PhonexError {
        PhonexError::Syntax {
            offset: token.offset,
            found: format!("{:?}", token.kind),
        }
    }

    fn alternation(&mut self) -> Result<Ast, PhonexError> {
        let mut branches = vec![self.sequence()?];
        while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Pipe)) {
            self.bump();
            branches.push(self.sequence()?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap())
        } else {
            Ok(Ast::Alt(branches))
        }
    }

    fn sequence(&mut self) -> Result<Ast, PhonexError> {
        let mut items = Vec::new();
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Pipe | TokenKind::CloseGroup => break,
                _ => items.push(self.quantified()?),
            }
        }
        if items.len() == 1 {
            Ok(items.pop().unwrap())
        } else {
            Ok(Ast::Seq(items))
        }
    }

    fn quantified(&mut self) -> Result<Ast, PhonexError> {
        let term = self.term()?;
        let Some(token) = self.peek() else {
            return Ok(term);
        };
        let (min, max) = match token.kind {
            TokenKind::Star => (0, None),
            TokenKind::Plus => (1, None),
            TokenKind::Question => (0, Some(1)),
            TokenKind::Repeat { min, max } => (min, max),
            _ => return Ok(term),
        };
        self.bump();
        // A second quantifier in a row has nothing to apply to.
        if let Some(next) = self.peek() {
            if matches!(
                next.kind,
                TokenKind::Star | TokenKind::Plus | TokenKind::Question | TokenKind::Repeat { .. }
            ) {
                return Err(self.unexpected(next));
            }
        }
        Ok(Ast::Repeat {
            inner: Box::new(term),
            min,
            max,
        })
    }

    fn term(&mut self) -> Result<Ast, PhonexError> {
        let Some(token) = self.bump() else {
            return Err(PhonexError::Syntax {
                offset: self.tokens.last().map(|t| t.offset).unwrap_or(0),
                found: "end of pattern".to_string(),
            });
        };
        let mut term = match &token.kind {
            TokenKind::Literal(c) => Ast::Literal(*c),
            TokenKind::Class(class) => Ast::Class(*class),
            TokenKind::GlyphSet { glyphs, negated } => Ast::GlyphSet {
                glyphs: glyphs.clone(),
                negated: *negated,
            },
            TokenKind::Dot => Ast::Any,
            TokenKind::Caret => Ast::Anchor(BoundaryKind::InputStart),
            TokenKind::Dollar => Ast::Anchor(BoundaryKind::InputEnd),
            TokenKind::Plugin { name, args } => Ast::Plugin {
                name: name.clone(),
                args: args.clone(),
                offset: token.offset,
            },
            TokenKind::OpenGroup { name } => {
                if let Some(name) = name {
                    if self.group_names.iter().flatten().any(|n| n == name) {
                        return Err(PhonexError::Syntax {
                            offset: token.offset,
                            found: format!("duplicate group name '{}'", name),
                        });
                    }
                }
                let index = self.group_names.len() + 1;
                self.group_names.push(name.clone());
                let inner = self.alternation()?;
                match self.bump() {
                    Some(close) if close.kind == TokenKind::CloseGroup => Ast::Group {
                        index,
                        name: name.clone(),
                        inner: Box::new(inner),
                    },
                    Some(other) => return Err(self.unexpected(other)),
                    None => {
                        return Err(PhonexError::Syntax {
                            offset: token.offset,
                            found: "unbalanced group".to_string(),
                        })
                    }
                }
            }
            _ => return Err(self.unexpected(token)),
        };

        // Secondary syllable-constituent matchers attach to matcher terms
        // only; ':O' after an anchor or group is malformed.
        while let Some(next) = self.peek() {
            let TokenKind::ScType(sc) = next.kind else {
                break;
            };
            if !term.is_matcher_term() {
                return Err(self.unexpected(next));
            }
            self.bump();
            term = Ast::WithSc {
                inner: Box::new(term),
                sc,
            };
        }
        Ok(term)
    }
}
