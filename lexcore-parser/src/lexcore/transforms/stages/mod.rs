//! Individual pipeline stages
//!
//! Each stage implements [`Runnable`](super::Runnable) for one step of the
//! engine, in pipeline order:
//!
//!     Masking             Arc<Source> -> Parser
//!     FlatTokenization    Parser      -> Vec<Token>
//!     GroupNesting        Vec<Token>  -> Vec<Token>
//!     OperatorResolution  Vec<Token>  -> Vec<Token>
//!     ExpandTemporaries   Vec<Token>  -> Vec<Token>

pub mod structure;
pub mod tokenization;

pub use structure::{ExpandTemporaries, GroupNesting, OperatorResolution};
pub use tokenization::{FlatTokenization, Masking};
