//! Token types shared by every stage
//!
//! The flat tokenizer produces leaf tokens; the group nester wraps bracket
//! regions into [`Group`]s; the operator resolver wraps symbols and their
//! operands into [`Operator`]s. All of them are variants of one closed
//! [`Token`] enum, so every consumer matches exhaustively.

pub mod core;
pub mod formatting;
pub mod group;
pub mod operator;

pub use core::{SpecialNumber, Symbol, Token};
pub use formatting::{dump_tokens, to_json, to_yaml, TokenFormat};
pub use group::{Group, GroupKind, Separator};
pub use operator::{Fixity, Operator};
