//! Temporary groups around runs of atoms
//!
//! Before precedence resolution, consecutive atoms that no operator separates
//! (`foo.bar(1)`, `a b` in languages where words never separate) are wrapped
//! in a temporary group so the resolver sees them as one operand. Builders
//! later look inside or call [`expand_temporaries`].

use crate::lexcore::error::ParseError;
use crate::lexcore::settings::Compaction;
use crate::lexcore::token::{Group, GroupKind, Token};

/// Whether the token separates atom runs.
fn is_separator(index: usize, token: &Token, compaction: Compaction) -> bool {
    match token {
        Token::Symbol(symbol) => match symbol.value.as_str() {
            "." => !compaction.periods,
            "=>" => !compaction.arrows,
            "::" => !compaction.double_colons,
            _ => true,
        },
        Token::Word { .. } => index > 0 && !compaction.words,
        Token::Indent { .. } | Token::NewLine { .. } => true,
        _ => false,
    }
}

/// Wrap every run of two or more consecutive atoms in a temporary group.
pub fn compact_temporaries(tokens: Vec<Token>, compaction: Compaction) -> Result<Vec<Token>, ParseError> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut run: Vec<Token> = Vec::new();

    for (i, token) in tokens.into_iter().enumerate() {
        if is_separator(i, &token, compaction) {
            flush_run(&mut run, &mut result)?;
            result.push(token);
        } else {
            run.push(token);
        }
    }
    flush_run(&mut run, &mut result)?;

    Ok(result)
}

fn flush_run(run: &mut Vec<Token>, result: &mut Vec<Token>) -> Result<(), ParseError> {
    match run.len() {
        0 => {}
        1 => result.append(run),
        _ => result.push(Token::Group(Group::temporary(std::mem::take(run))?)),
    }
    Ok(())
}

/// Splice temporary groups of a token list back into it, one level deep.
pub fn expand_temporaries(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Group(group) if group.kind() == GroupKind::Temporary => {
                result.extend(group.into_fields().into_iter().flatten());
            }
            other => result.push(other),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexcore::languages;
    use crate::lexcore::lexing::tokenize;
    use crate::lexcore::token::dump_tokens;

    fn compact(text: &str, compaction: Compaction) -> Vec<Token> {
        compact_temporaries(tokenize(text, &languages::JS).unwrap(), compaction).unwrap()
    }

    fn js() -> Compaction {
        languages::JS.compaction()
    }

    #[test]
    fn test_dotted_call_is_one_operand() {
        insta::assert_snapshot!(dump_tokens(&compact("a.b(1) + c", js())), @r"
        TmpGroup tmp
          Word(a)
          Symbol .
          Word(b)
          ParensGroup single
            LiteralInt(1)
        Symbol +
        Word(c)
        ");
    }

    #[test]
    fn test_single_atoms_are_not_wrapped() {
        let tokens = compact("a + b", js());
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| !t.is_group_of(GroupKind::Temporary)));
    }

    #[test]
    fn test_periods_separate_when_not_compacted() {
        let tokens = compact("a.b", Compaction::default());
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_words_separate_unless_first() {
        let tokens = compact("1 x y", Compaction::default());
        assert_eq!(tokens.len(), 3);
        let tokens = compact("x y", Compaction::default());
        assert_eq!(tokens.len(), 2);
        let tokens = compact("x 1", Compaction::default());
        assert!(tokens[0].is_group_of(GroupKind::Temporary));
    }

    #[test]
    fn test_expand_restores_run() {
        let tokens = compact("a.b + c", js());
        let expanded = expand_temporaries(tokens);
        assert_eq!(dump_tokens(&expanded), "Word(a)\nSymbol .\nWord(b)\nSymbol +\nWord(c)\n");
    }
}
