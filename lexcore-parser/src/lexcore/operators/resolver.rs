//! Precedence resolution, one level per sweep
//!
//! Every table symbol met in a sweep looks at its neighbours. The side the
//! sweep comes from has already been resolved at this level; the other side
//! is still raw. A neighbour is operable unless it is a non-word symbol, and
//! a missing neighbour counts as inoperable:
//!
//!     left and right operable   ternary if the partner symbol follows, else binary
//!     only right operable       prefix
//!     only left operable        postfix
//!     neither                   singular
//!
//! When the level does not allow the fixity the layout asks for, the symbol
//! is left in place if a looser level still knows it (unary `-` at a tight
//! level, binary `-` at a looser one). Otherwise it is a syntax error.

use std::collections::VecDeque;

use crate::lexcore::error::ParseError;
use crate::lexcore::settings::operators::{LevelEntry, OperatorLevel, OperatorTable};
use crate::lexcore::token::{Fixity, Operator, Token};

type Slots = Vec<Option<Token>>;

fn take(slots: &mut Slots, i: usize) -> Result<Token, ParseError> {
    slots
        .get_mut(i)
        .and_then(Option::take)
        .ok_or_else(|| ParseError::internal(format!("operand {} consumed twice", i), None))
}

fn operable(slots: &Slots, i: Option<usize>) -> bool {
    i.and_then(|i| slots.get(i))
        .and_then(Option::as_ref)
        .is_some_and(Token::is_operable)
}

/// The fixity the layout of the neighbours asks for.
fn fixity_for(left: bool, right: bool) -> Fixity {
    match (left, right) {
        (true, true) => Fixity::Binary,
        (false, true) => Fixity::Prefix,
        (true, false) => Fixity::Postfix,
        (false, false) => Fixity::Singular,
    }
}

fn unresolved(table: &OperatorTable, level: usize, token: Token, fixity: Fixity) -> Result<Token, ParseError> {
    let Token::Symbol(symbol) = token else {
        return Err(ParseError::internal("operator slot holds a non-symbol", Some(token.span().clone())));
    };
    if table.resolvable_after(level, &symbol.value) {
        Ok(Token::Symbol(symbol))
    } else {
        Err(ParseError::OperatorFixity {
            symbol: symbol.value,
            fixity,
            span: symbol.span,
        })
    }
}

fn operator(entry: &LevelEntry, fixity: Fixity, token: &Token, args: Vec<Token>) -> Token {
    Token::Operator(Operator::new(fixity, entry.symbol.clone(), token.span().clone(), args))
}

/// Sweep a level from left to right.
pub fn resolve_left_to_right(
    tokens: Vec<Token>,
    table: &OperatorTable,
    level_index: usize,
) -> Result<Vec<Token>, ParseError> {
    let level = &table.levels()[level_index];
    let n = tokens.len();
    let mut slots: Slots = tokens.into_iter().map(Some).collect();
    let mut result: Vec<Token> = Vec::with_capacity(n);
    let mut i = 0;

    while i < n {
        let token = take(&mut slots, i)?;
        let Some(entry) = level.lookup(&token) else {
            result.push(token);
            i += 1;
            continue;
        };

        let left = result.last().is_some_and(Token::is_operable);
        let right = operable(&slots, Some(i + 1));
        let fixity = fixity_for(left, right);

        if fixity == Fixity::Binary && i + 3 < n && is_ternary_ahead(level, &token, &slots, i + 2) {
            let first = pop_last(&mut result)?;
            let second = take(&mut slots, i + 1)?;
            take(&mut slots, i + 2)?;
            let third = take(&mut slots, i + 3)?;
            result.push(operator(entry, Fixity::Ternary, &token, vec![first, second, third]));
            i += 4;
            continue;
        }

        if !entry.kinds.allows(fixity) {
            result.push(unresolved(table, level_index, token, fixity)?);
            i += 1;
            continue;
        }

        match fixity {
            Fixity::Binary => {
                let lhs = pop_last(&mut result)?;
                let rhs = take(&mut slots, i + 1)?;
                result.push(operator(entry, fixity, &token, vec![lhs, rhs]));
                i += 2;
            }
            Fixity::Prefix => {
                let operand = take(&mut slots, i + 1)?;
                result.push(operator(entry, fixity, &token, vec![operand]));
                i += 2;
            }
            Fixity::Postfix => {
                let operand = pop_last(&mut result)?;
                result.push(operator(entry, fixity, &token, vec![operand]));
                i += 1;
            }
            Fixity::Singular | Fixity::Ternary => {
                result.push(operator(entry, fixity, &token, vec![]));
                i += 1;
            }
        }
    }

    Ok(result)
}

/// Sweep a level from right to left.
pub fn resolve_right_to_left(
    tokens: Vec<Token>,
    table: &OperatorTable,
    level_index: usize,
) -> Result<Vec<Token>, ParseError> {
    let level = &table.levels()[level_index];
    let n = tokens.len();
    let mut slots: Slots = tokens.into_iter().map(Some).collect();
    let mut result: VecDeque<Token> = VecDeque::with_capacity(n);
    let mut i = n;

    while i > 0 {
        i -= 1;
        let token = take(&mut slots, i)?;
        let Some(entry) = level.lookup(&token) else {
            result.push_front(token);
            continue;
        };

        let left = operable(&slots, i.checked_sub(1));
        let right = result.front().is_some_and(Token::is_operable);
        let fixity = fixity_for(left, right);

        if fixity == Fixity::Binary && i >= 3 && is_ternary_behind(level, &token, &slots, i - 2) {
            let third = pop_first(&mut result)?;
            let second = take(&mut slots, i - 1)?;
            take(&mut slots, i - 2)?;
            let first = take(&mut slots, i - 3)?;
            result.push_front(operator(entry, Fixity::Ternary, &token, vec![first, second, third]));
            i -= 3;
            continue;
        }

        if !entry.kinds.allows(fixity) {
            result.push_front(unresolved(table, level_index, token, fixity)?);
            continue;
        }

        match fixity {
            Fixity::Binary => {
                let rhs = pop_first(&mut result)?;
                let lhs = take(&mut slots, i - 1)?;
                result.push_front(operator(entry, fixity, &token, vec![lhs, rhs]));
                i -= 1;
            }
            Fixity::Prefix => {
                let operand = pop_first(&mut result)?;
                result.push_front(operator(entry, fixity, &token, vec![operand]));
            }
            Fixity::Postfix => {
                let operand = take(&mut slots, i - 1)?;
                result.push_front(operator(entry, fixity, &token, vec![operand]));
                i -= 1;
            }
            Fixity::Singular | Fixity::Ternary => {
                result.push_front(operator(entry, fixity, &token, vec![]));
            }
        }
    }

    Ok(result.into())
}

/// `? b :` with the token at hand being `?`.
fn is_ternary_ahead(level: &OperatorLevel, token: &Token, slots: &Slots, partner: usize) -> bool {
    slots
        .get(partner)
        .and_then(Option::as_ref)
        .is_some_and(|second| level.is_ternary(token, second))
}

/// `? b :` with the token at hand being `:`.
fn is_ternary_behind(level: &OperatorLevel, token: &Token, slots: &Slots, partner: usize) -> bool {
    slots
        .get(partner)
        .and_then(Option::as_ref)
        .is_some_and(|first| level.is_ternary(first, token))
}

fn pop_last(result: &mut Vec<Token>) -> Result<Token, ParseError> {
    result
        .pop()
        .ok_or_else(|| ParseError::internal("missing left operand", None))
}

fn pop_first(result: &mut VecDeque<Token>) -> Result<Token, ParseError> {
    result
        .pop_front()
        .ok_or_else(|| ParseError::internal("missing right operand", None))
}
