//! # lexcore
//!
//! A table-driven tokenization and operator-precedence engine shared by the
//! front ends of several small languages (a JS-like scripting language, an
//! HTML-like templating language, a GLSL dialect, a math markup and CSS
//! selectors).
//!
//! File Layout
//!
//! src/lexcore
//!   ├── source, span, error   Shared buffer, half-open ranges and diagnostics
//!   ├── lexing                Quoted-region masking, flat passes, indentation
//!   ├── nesting               Bracket groups, including the angled heuristic
//!   ├── operators             Temporary compaction and precedence resolution
//!   ├── settings              Per-language tables (quoting, patterns, operators)
//!   ├── languages             The five built-in language tables
//!   └── transforms            Composable pipeline stages over the above
//!
//! The engine knows nothing about any one language: every behavior difference
//! between the languages lives in a [`LanguageSettings`](lexcore::settings::LanguageSettings)
//! value.

pub mod lexcore;
