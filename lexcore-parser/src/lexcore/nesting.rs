//! Bracket nesting
//!
//! Turns a flat token list into a tree: every `(`, `[` and `{` is paired with
//! its closer by counting same-kind brackets, the interior is nested
//! recursively, and the run becomes a [`Group`].
//!
//! ## Angle brackets
//!
//!     `<` is both a comparison and a generic-parameter opener. With angled
//!     groups enabled, a `<` starts a speculative scan for its closer:
//!
//!         `;`    gives up (never crosses a statement)
//!         `(` `[` `{`  skips to the matching closer
//!         `)` `]` `}`  unbalanced: gives up (never leaves the enclosing group)
//!         `<`    depth + 1
//!         `>`    closes at depth 0, else depth - 1
//!         `>>`   fails at depth 0, closes at depth 1, else depth - 2
//!         `>>>`  fails at depth 0 or 1, closes at depth 2, else depth - 3
//!
//!     Closing on a compound shift symbol splits it: the inner groups get
//!     dummy `>` / `>>` closers and the outer group keeps the real symbol.
//!     [`expand_angled`] drops the dummies again and restores the original
//!     run. When the scan gives up, or the guessed interior does not nest,
//!     `<` stays a plain symbol. That fallback is silent: `a < b > c` still
//!     becomes an angled group around `b`.

use crate::lexcore::error::ParseError;
use crate::lexcore::token::{Group, GroupKind, Symbol, Token};

/// Nest every bracket region of a flat token list.
pub fn nest_groups(tokens: Vec<Token>, angled: bool) -> Result<Vec<Token>, ParseError> {
    let mut slots: Vec<Option<Token>> = tokens.into_iter().map(Some).collect();
    nest_range(&mut slots, 0, angled)
}

fn take(slots: &mut [Option<Token>], i: usize) -> Result<Token, ParseError> {
    slots
        .get_mut(i)
        .and_then(Option::take)
        .ok_or_else(|| ParseError::internal(format!("token {} consumed twice while nesting", i), None))
}

fn peek(slots: &[Option<Token>], i: usize) -> Option<&Token> {
    slots.get(i).and_then(Option::as_ref)
}

fn symbol_at<'a>(slots: &'a [Option<Token>], i: usize) -> Option<&'a str> {
    peek(slots, i).and_then(Token::as_symbol).map(|s| s.value.as_str())
}

fn nest_range(slots: &mut [Option<Token>], from: usize, angled: bool) -> Result<Vec<Token>, ParseError> {
    let mut result = Vec::new();
    let mut i = from;

    while i < slots.len() {
        let symbol = symbol_at(slots, i).map(str::to_string);

        match symbol.as_deref() {
            Some("<") if angled => match suggest_angled(slots, i).and_then(|m| build_angled(slots, i, m)) {
                Some((group, stop)) => {
                    result.push(Token::Group(group));
                    i = stop + 1;
                }
                None => {
                    result.push(take(slots, i)?);
                    i += 1;
                }
            },
            Some(open @ ("(" | "[" | "{")) => {
                let kind = GroupKind::from_open(open)
                    .ok_or_else(|| ParseError::internal("bracket without kind", None))?;
                let Some(stop) = find_group_stop(slots, i, kind) else {
                    let span = take(slots, i)?.span().clone();
                    return Err(ParseError::UnmatchedGroupStart { span });
                };

                let open = take(slots, i)?;
                let close = take(slots, stop)?;
                let mut inner_slots: Vec<Option<Token>> = slots[i + 1..stop].iter_mut().map(Option::take).collect();
                let inner = nest_range(&mut inner_slots, 0, angled)?;
                result.push(Token::Group(Group::from_tokens(open, inner, close)?));
                i = stop + 1;
            }
            Some(close) if GroupKind::is_close_symbol(close) => {
                let span = take(slots, i)?.span().clone();
                return Err(ParseError::UnmatchedGroupStop { span });
            }
            _ => {
                result.push(take(slots, i)?);
                i += 1;
            }
        }
    }

    Ok(result)
}

/// Index of the closer matching the opener at `start`, counting only
/// brackets of the same kind.
fn find_group_stop(slots: &[Option<Token>], start: usize, kind: GroupKind) -> Option<usize> {
    let mut depth = 0usize;

    for i in start + 1..slots.len() {
        match symbol_at(slots, i) {
            Some(s) if s == kind.open() => depth += 1,
            Some(s) if s == kind.close() => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AngledMatch {
    stop: usize,
    /// Dummy closer to append to the interior, for compound closers
    dummy: Option<&'static str>,
}

fn suggest_angled(slots: &[Option<Token>], start: usize) -> Option<AngledMatch> {
    let mut depth = 0usize;
    let mut i = start;

    while i + 1 < slots.len() {
        i += 1;
        let Some(symbol) = symbol_at(slots, i) else {
            continue;
        };
        match symbol {
            ";" => return None,
            "(" | "[" | "{" => {
                let kind = GroupKind::from_open(symbol)?;
                i = find_group_stop(slots, i, kind)?;
            }
            ")" | "]" | "}" => return None,
            "<" => depth += 1,
            ">" => {
                if depth == 0 {
                    return Some(AngledMatch { stop: i, dummy: None });
                }
                depth -= 1;
            }
            ">>" => match depth {
                0 => return None,
                1 => return Some(AngledMatch { stop: i, dummy: Some(">") }),
                _ => depth -= 2,
            },
            ">>>" => match depth {
                0 | 1 => return None,
                2 => return Some(AngledMatch { stop: i, dummy: Some(">>") }),
                _ => depth -= 3,
            },
            _ => {}
        }
    }

    None
}

/// Nest the guessed group on copies of its slots. The slots are only
/// consumed once the interior nests cleanly.
fn build_angled(slots: &mut [Option<Token>], start: usize, found: AngledMatch) -> Option<(Group, usize)> {
    let close = peek(slots, found.stop)?.clone();
    let mut inner_slots: Vec<Option<Token>> = slots[start + 1..found.stop].to_vec();
    if let Some(dummy) = found.dummy {
        inner_slots.push(Some(Token::Symbol(Symbol::dummy(dummy, close.span().clone()))));
    }

    let inner = nest_range(&mut inner_slots, 0, true).ok()?;
    let open = peek(slots, start)?.clone();
    let group = Group::from_tokens(open, inner, close).ok()?;

    for slot in &mut slots[start..=found.stop] {
        *slot = None;
    }
    Some((group, found.stop))
}

/// Undo angled grouping: splice every angled group back into its original
/// run, dropping synthesized closers.
pub fn expand_angled(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Group(group) if group.kind() == GroupKind::Angled => {
                result.extend(expand_angled(group.into_original()));
            }
            Token::Symbol(symbol) if symbol.dummy => {}
            other => result.push(other),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexcore::languages;
    use crate::lexcore::lexing::Parser;
    use crate::lexcore::source::Source;
    use crate::lexcore::token::{dump_tokens, Separator};

    fn flat(text: &str) -> Vec<Token> {
        Parser::new(Source::anonymous(text), &languages::JS)
            .unwrap()
            .tokenize_flat()
            .unwrap()
    }

    fn nest(text: &str) -> Result<Vec<Token>, ParseError> {
        nest_groups(flat(text), true)
    }

    #[test]
    fn test_nested_brackets() {
        insta::assert_snapshot!(dump_tokens(&nest("f(a, [b; c])").unwrap()), @r"
        Word(f)
        ParensGroup comma
          Word(a)
          BracketsGroup semicolon
            Word(b)
            Word(c)
        ");
    }

    #[test]
    fn test_extra_closer_is_unmatched() {
        let err = nest("(a))").unwrap_err();
        assert_eq!(err.message(), "unmatched group");
        let span = err.span().unwrap();
        assert_eq!((span.start(), span.stop()), (3, 4));
    }

    #[test]
    fn test_unclosed_opener() {
        let err = nest("a { b ( c }").unwrap_err();
        assert_eq!(err.message(), "unmatched container start");
        assert_eq!(err.span().unwrap().start(), 6);
    }

    #[test]
    fn test_comparison_stays_symbol() {
        let tokens = nest("a < b").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].is_symbol("<"));
    }

    #[test]
    fn test_angled_stops_at_semicolon() {
        let tokens = nest("a < b; c > d").unwrap();
        assert!(tokens.iter().all(|t| t.as_group().is_none()));
    }

    #[test]
    fn test_angled_group() {
        let tokens = nest("Map<K, V>").unwrap();
        assert_eq!(tokens.len(), 2);
        let group = tokens[1].as_group().unwrap();
        assert_eq!(group.kind(), GroupKind::Angled);
        assert_eq!(group.separator(), Separator::Comma);
    }

    #[test]
    fn test_shift_closer_splits_into_dummies() {
        let tokens = nest("A<B<C>>").unwrap();
        insta::assert_snapshot!(dump_tokens(&tokens), @r"
        Word(A)
        AngledGroup single
          Word(B)
          AngledGroup single
            Word(C)
        ");

        let restored: Vec<String> = expand_angled(tokens)
            .iter()
            .map(|t| t.span().content())
            .collect();
        assert_eq!(restored, vec!["A", "<", "B", "<", "C", ">>"]);
    }

    #[test]
    fn test_triple_shift_closer() {
        let tokens = nest("A<B<C<D>>>").unwrap();
        let restored: Vec<String> = expand_angled(tokens)
            .iter()
            .map(|t| t.span().content())
            .collect();
        assert_eq!(restored, vec!["A", "<", "B", "<", "C", "<", "D", ">>>"]);
    }

    #[test]
    fn test_shift_without_depth_is_not_a_group() {
        let tokens = nest("a < b >> c").unwrap();
        assert!(tokens.iter().all(|t| t.as_group().is_none()));
    }

    #[test]
    fn test_ambiguous_comparison_becomes_group() {
        let tokens = nest("a < b > c").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].is_group_of(GroupKind::Angled));
    }

    #[test]
    fn test_angled_scan_stays_inside_enclosing_group() {
        let tokens = nest("a < (b > c)").unwrap();
        insta::assert_snapshot!(dump_tokens(&tokens), @r"
        Word(a)
        Symbol <
        ParensGroup single
          Word(b)
          Symbol >
          Word(c)
        ");

        let tokens = nest("if (i < f(x > 0)) {}").unwrap();
        let condition = tokens[1].as_group().unwrap();
        assert_eq!(condition.kind(), GroupKind::Parens);
        assert!(condition.fields()[0][1].is_symbol("<"));
        assert!(condition.fields()[0][3].is_group_of(GroupKind::Parens));
    }

    #[test]
    fn test_angled_scan_skips_balanced_brackets() {
        let tokens = nest("Fn<(a, b) => c>").unwrap();
        assert_eq!(tokens.len(), 2);
        let group = tokens[1].as_group().unwrap();
        assert_eq!(group.kind(), GroupKind::Angled);
        assert!(group.fields()[0][0].is_group_of(GroupKind::Parens));
    }

    #[test]
    fn test_angled_disabled() {
        let tokens = nest_groups(flat("Map<K>"), false).unwrap();
        assert_eq!(tokens.len(), 4);
    }
}
