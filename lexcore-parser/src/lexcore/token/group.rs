//! Bracket groups and their separator discipline
//!
//! A group owns its content once:
//!
//!     - `fields`: the interior split by its top-level separators, the view
//!       builders consume.
//!     - the separator tokens and the delimiters, kept aside so that
//!       [`Group::into_original`] can rebuild the exact run the group was
//!       built from. Angled and temporary groups are speculative and can be
//!       undone by splicing this run back.
//!
//! The discipline is decided once, at construction, by scanning the top-level
//! separators of the (already nested) interior:
//!
//!     - no content              -> Empty
//!     - content, no separators  -> Single
//!     - commas                  -> Comma, one field per comma
//!     - any semicolon           -> Semicolon; comma fields seen before the
//!                                  first semicolon are folded back into one
//!                                  field and later commas stay inside fields

use serde::Serialize;
use std::fmt;

use super::core::Token;
use crate::lexcore::error::ParseError;
use crate::lexcore::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupKind {
    Parens,
    Braces,
    Brackets,
    Angled,
    Temporary,
    Template,
}

impl GroupKind {
    /// Kind opened by a bracket symbol. Angled groups are only opened by
    /// the speculative scan, but `<` still maps here.
    pub fn from_open(symbol: &str) -> Option<GroupKind> {
        match symbol {
            "(" => Some(GroupKind::Parens),
            "{" => Some(GroupKind::Braces),
            "[" => Some(GroupKind::Brackets),
            "<" => Some(GroupKind::Angled),
            _ => None,
        }
    }

    pub fn open(&self) -> &'static str {
        match self {
            GroupKind::Parens => "(",
            GroupKind::Braces => "{",
            GroupKind::Brackets => "[",
            GroupKind::Angled => "<",
            GroupKind::Temporary | GroupKind::Template => "",
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            GroupKind::Parens => ")",
            GroupKind::Braces => "}",
            GroupKind::Brackets => "]",
            GroupKind::Angled => ">",
            GroupKind::Temporary | GroupKind::Template => "",
        }
    }

    /// Whether `symbol` may close a group of this kind. Angled groups also
    /// close on the compound shift symbols split by the angled scan.
    pub fn is_close(&self, symbol: &str) -> bool {
        match self {
            GroupKind::Angled => matches!(symbol, ">" | ">>" | ">>>"),
            _ => !self.close().is_empty() && symbol == self.close(),
        }
    }

    pub fn is_close_symbol(symbol: &str) -> bool {
        matches!(symbol, ")" | "}" | "]")
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKind::Parens => "Parens",
            GroupKind::Braces => "Braces",
            GroupKind::Brackets => "Brackets",
            GroupKind::Angled => "Angled",
            GroupKind::Temporary => "Tmp",
            GroupKind::Template => "Template",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Separator {
    Empty,
    Single,
    Comma,
    Semicolon,
    Temporary,
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Separator::Empty => "empty",
            Separator::Single => "single",
            Separator::Comma => "comma",
            Separator::Semicolon => "semicolon",
            Separator::Temporary => "tmp",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    kind: GroupKind,
    separator: Separator,
    fields: Vec<Vec<Token>>,
    /// Top-level separators; the i-th one follows the i-th field
    #[serde(skip)]
    separators: Vec<Token>,
    #[serde(skip)]
    delimiters: Option<(Box<Token>, Box<Token>)>,
    span: Span,
}

impl Group {
    /// Build a bracket group from its opener, nested interior and closer.
    pub fn from_tokens(open: Token, inner: Vec<Token>, close: Token) -> Result<Group, ParseError> {
        let kind = open
            .as_symbol()
            .and_then(|s| GroupKind::from_open(&s.value))
            .ok_or_else(|| ParseError::internal("group opener is not a bracket", Some(open.span().clone())))?;

        let closes = close.as_symbol().is_some_and(|s| kind.is_close(&s.value));
        if !closes {
            return Err(ParseError::internal(
                format!("{} group closed by a foreign token", kind),
                Some(close.span().clone()),
            ));
        }

        let span = open.span().merge(close.span());
        let (separator, fields, separators) = split_fields(inner);

        Ok(Group {
            kind,
            separator,
            fields,
            separators,
            delimiters: Some((Box::new(open), Box::new(close))),
            span,
        })
    }

    /// Provisional container around a run of atoms.
    pub fn temporary(tokens: Vec<Token>) -> Result<Group, ParseError> {
        let span = Span::merge_all(tokens.iter().map(Token::span))
            .ok_or_else(|| ParseError::internal("empty temporary group", None))?;

        Ok(Group {
            kind: GroupKind::Temporary,
            separator: Separator::Temporary,
            fields: vec![tokens],
            separators: Vec::new(),
            delimiters: None,
            span,
        })
    }

    /// Interpolated string: literal segments alternating with expressions.
    pub fn template(fields: Vec<Vec<Token>>, span: Span) -> Group {
        let separator = match fields.len() {
            0 => Separator::Empty,
            1 => Separator::Single,
            _ => Separator::Comma,
        };
        Group {
            kind: GroupKind::Template,
            separator,
            fields,
            separators: Vec::new(),
            delimiters: None,
            span,
        }
    }

    /// Rebuild every field, e.g. to resolve operators inside the group.
    pub fn try_map_fields<E>(
        mut self,
        f: impl FnMut(Vec<Token>) -> Result<Vec<Token>, E>,
    ) -> Result<Group, E> {
        let fields = std::mem::take(&mut self.fields);
        self.fields = fields.into_iter().map(f).collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn fields(&self) -> &[Vec<Token>] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Vec<Token>> {
        self.fields
    }

    /// The run this group was built from, delimiters included. Fields
    /// rebuilt with [`Group::try_map_fields`] come back in their new form.
    pub fn into_original(self) -> Vec<Token> {
        let mut run = Vec::new();
        let (open, close) = match self.delimiters {
            Some((open, close)) => (Some(*open), Some(*close)),
            None => (None, None),
        };
        run.extend(open);
        run.extend(interleave(self.fields, self.separators));
        run.extend(close);
        run
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn is_empty(&self) -> bool {
        self.separator == Separator::Empty
    }

    pub fn is_single(&self) -> bool {
        self.separator == Separator::Single
    }

    pub fn is_comma(&self) -> bool {
        self.separator == Separator::Comma
    }

    pub fn is_semicolon(&self) -> bool {
        self.separator == Separator::Semicolon
    }

    pub fn is_temporary(&self) -> bool {
        self.kind == GroupKind::Temporary
    }
}

fn split_fields(inner: Vec<Token>) -> (Separator, Vec<Vec<Token>>, Vec<Token>) {
    let mut separator = Separator::Empty;
    let mut fields: Vec<Vec<Token>> = Vec::new();
    let mut separators: Vec<Token> = Vec::new();
    let mut buffer: Vec<Token> = Vec::new();

    for token in inner {
        if token.is_symbol(";") {
            if separator == Separator::Comma {
                let mut folded = interleave(std::mem::take(&mut fields), std::mem::take(&mut separators));
                folded.append(&mut buffer);
                fields.push(folded);
            } else {
                fields.push(std::mem::take(&mut buffer));
            }
            separators.push(token);
            separator = Separator::Semicolon;
        } else if token.is_symbol(",") && separator != Separator::Semicolon {
            fields.push(std::mem::take(&mut buffer));
            separators.push(token);
            separator = Separator::Comma;
        } else {
            buffer.push(token);
        }
    }

    if !buffer.is_empty() {
        if separator == Separator::Empty {
            separator = Separator::Single;
        }
        fields.push(buffer);
    }

    (separator, fields, separators)
}

fn interleave(fields: Vec<Vec<Token>>, separators: Vec<Token>) -> Vec<Token> {
    let mut run = Vec::new();
    let mut separators = separators.into_iter();
    for field in fields {
        run.extend(field);
        run.extend(separators.next());
    }
    run.extend(separators);
    run
}
