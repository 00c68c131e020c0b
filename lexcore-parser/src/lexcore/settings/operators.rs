//! Operator precedence tables
//!
//! A table is declared as a flat list of `(precedence, symbol, kinds)`
//! entries and built into levels sorted by descending precedence (higher
//! binds tighter). Each level is resolved in one sweep, left to right when
//! its entries carry [`OperatorKinds::L2R`], right to left otherwise.
//!
//! Ternaries are declared with both symbols, `"? :"`. They are looked up by
//! the symbol the sweep meets first: the first word when sweeping left to
//! right, the last word when sweeping right to left.

use std::collections::HashMap;
use std::fmt;
use std::ops::BitOr;

use crate::lexcore::error::ConfigError;
use crate::lexcore::token::{Fixity, Token};

/// Bit set of the fixities a symbol allows at one precedence
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperatorKinds(u8);

impl OperatorKinds {
    pub const SING: OperatorKinds = OperatorKinds(1);
    pub const PRE: OperatorKinds = OperatorKinds(1 << 1);
    pub const POST: OperatorKinds = OperatorKinds(1 << 2);
    pub const BIN: OperatorKinds = OperatorKinds(1 << 3);
    pub const TER: OperatorKinds = OperatorKinds(1 << 4);
    /// Left-to-right sweep
    pub const L2R: OperatorKinds = OperatorKinds(1 << 5);

    pub fn contains(&self, other: OperatorKinds) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn allows(&self, fixity: Fixity) -> bool {
        self.contains(match fixity {
            Fixity::Singular => OperatorKinds::SING,
            Fixity::Prefix => OperatorKinds::PRE,
            Fixity::Postfix => OperatorKinds::POST,
            Fixity::Binary => OperatorKinds::BIN,
            Fixity::Ternary => OperatorKinds::TER,
        })
    }

    pub fn is_left_to_right(&self) -> bool {
        self.contains(OperatorKinds::L2R)
    }
}

impl BitOr for OperatorKinds {
    type Output = OperatorKinds;

    fn bitor(self, rhs: OperatorKinds) -> OperatorKinds {
        OperatorKinds(self.0 | rhs.0)
    }
}

impl fmt::Debug for OperatorKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (OperatorKinds::SING, "SING"),
            (OperatorKinds::PRE, "PRE"),
            (OperatorKinds::POST, "POST"),
            (OperatorKinds::BIN, "BIN"),
            (OperatorKinds::TER, "TER"),
            (OperatorKinds::L2R, "L2R"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(kind, _)| self.contains(*kind))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", set.join("|"))
    }
}

/// One symbol's entry within a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    /// Full symbol text, `? :` for ternaries
    pub symbol: String,
    pub kinds: OperatorKinds,
}

#[derive(Debug, Clone)]
pub struct OperatorLevel {
    precedence: u32,
    left_to_right: bool,
    entries: HashMap<String, LevelEntry>,
}

impl OperatorLevel {
    pub fn precedence(&self) -> u32 {
        self.precedence
    }

    pub fn is_left_to_right(&self) -> bool {
        self.left_to_right
    }

    /// Entry for a symbol token of this level.
    pub fn lookup(&self, token: &Token) -> Option<&LevelEntry> {
        token.as_symbol().and_then(|s| self.entries.get(&s.value))
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Whether `first second` is a ternary of this level.
    pub fn is_ternary(&self, first: &Token, second: &Token) -> bool {
        let (Some(first), Some(second)) = (first.as_symbol(), second.as_symbol()) else {
            return false;
        };
        let key = if self.left_to_right {
            &first.value
        } else {
            &second.value
        };
        self.entries.get(key).is_some_and(|entry| {
            entry.kinds.contains(OperatorKinds::TER)
                && entry.symbol == format!("{} {}", first.value, second.value)
        })
    }
}

/// Levels of a language, tightest first
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    levels: Vec<OperatorLevel>,
}

impl OperatorTable {
    pub fn new<'a>(
        entries: impl IntoIterator<Item = (u32, &'a str, OperatorKinds)>,
    ) -> Result<Self, ConfigError> {
        let mut by_precedence: HashMap<u32, OperatorLevel> = HashMap::new();

        for (precedence, symbol, kinds) in entries {
            let words: Vec<&str> = symbol.split_whitespace().collect();
            if words.is_empty() {
                return Err(ConfigError::EmptySymbol { precedence });
            }
            let is_ternary = kinds.contains(OperatorKinds::TER);
            if is_ternary != (words.len() == 2) {
                return Err(ConfigError::MalformedTernary {
                    symbol: symbol.to_string(),
                });
            }

            let left_to_right = kinds.is_left_to_right();
            let level = by_precedence
                .entry(precedence)
                .or_insert_with(|| OperatorLevel {
                    precedence,
                    left_to_right,
                    entries: HashMap::new(),
                });

            if level.left_to_right != left_to_right {
                return Err(ConfigError::MixedAssociativity {
                    precedence,
                    symbol: symbol.to_string(),
                });
            }

            let key = match (is_ternary, left_to_right) {
                (true, true) => words[0],
                (true, false) => words[1],
                (false, _) => words[0],
            };
            let symbol = words.join(" ");

            level
                .entries
                .entry(key.to_string())
                .and_modify(|entry| entry.kinds = entry.kinds | kinds)
                .or_insert(LevelEntry { symbol, kinds });
        }

        let mut levels: Vec<OperatorLevel> = by_precedence.into_values().collect();
        levels.sort_by(|a, b| b.precedence.cmp(&a.precedence));

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[OperatorLevel] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether a level looser than `index` still knows `symbol`.
    pub fn resolvable_after(&self, index: usize, symbol: &str) -> bool {
        self.levels
            .iter()
            .skip(index + 1)
            .any(|level| level.has_symbol(symbol))
    }
}
