//! Built-in language tables
//!
//! Each language is a lazily built [`LanguageSettings`] static. Tables are
//! constants of the crate, so a table that fails to build is a bug and
//! panics on first use; user-defined tables go through
//! [`LanguageSettings::builder`] and get a [`ConfigError`] instead.
//!
//! [`ConfigError`]: crate::lexcore::error::ConfigError

pub mod css;
pub mod glsl;
pub mod js;
pub mod math;
pub mod template;

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

use crate::lexcore::settings::LanguageSettings;

pub use css::CSS;
pub use glsl::GLSL;
pub use js::JS;
pub use math::MATH;
pub use template::TEMPLATE;

/// Names of the built-in languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Js,
    Template,
    Glsl,
    Math,
    Css,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::Js,
            Language::Template,
            Language::Glsl,
            Language::Math,
            Language::Css,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Js => "js",
            Language::Template => "template",
            Language::Glsl => "glsl",
            Language::Math => "math",
            Language::Css => "css",
        }
    }

    pub fn from_name(name: &str) -> Option<Language> {
        Language::all().iter().copied().find(|l| l.name() == name)
    }

    /// File extensions the language is recognized by.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Js => &["js", "mjs", "ts"],
            Language::Template => &["wtt", "tmpl"],
            Language::Glsl => &["glsl", "vert", "frag"],
            Language::Math => &["math"],
            Language::Css => &["css"],
        }
    }

    /// Guess from a file extension.
    pub fn from_extension(extension: &str) -> Option<Language> {
        Language::all()
            .iter()
            .copied()
            .find(|l| l.extensions().contains(&extension))
    }

    pub fn settings(&self) -> &'static LanguageSettings {
        match self {
            Language::Js => Lazy::force(&JS),
            Language::Template => Lazy::force(&TEMPLATE),
            Language::Glsl => Lazy::force(&GLSL),
            Language::Math => Lazy::force(&MATH),
            Language::Css => Lazy::force(&CSS),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_name(s).ok_or_else(|| {
            let known: Vec<&str> = Language::all().iter().map(Language::name).collect();
            format!("unknown language `{}` (expected one of: {})", s, known.join(", "))
        })
    }
}
