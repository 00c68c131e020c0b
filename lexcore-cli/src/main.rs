//! Command-line interface for lexcore
//! This binary runs a language's pipeline on a file and prints the tokens it produces.
//!
//! Usage:
//!   lexcore `<path>` [--language `<name>`] [--stage `<stage>`] [--format `<format>`]
//!   lexcore --list-languages
//!
//! Stage and format default to the configuration (see `lexcore-config`); the
//! language defaults to the one the file extension names.

mod transforms;

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use lexcore_config::{LexcoreConfig, Loader};
use lexcore_parser::lexcore::loader::SourceLoader;
use lexcore_parser::lexcore::token::TokenFormat;
use lexcore_parser::lexcore::transforms::standard::Stage;
use lexcore_parser::lexcore::{Language, RenderOptions};

use transforms::{list_languages, resolve_language, Run};

fn build_cli() -> Command {
    Command::new("lexcore")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize, nest and resolve operators of a source file")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the source file")
                .required_unless_present("list-languages")
                .index(1),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .help("Language table (default: guessed from the file extension)")
                .value_parser(PossibleValuesParser::new(Language::all().iter().map(Language::name))),
        )
        .arg(
            Arg::new("stage")
                .long("stage")
                .short('s')
                .help("Where the pipeline stops (default: from the configuration)")
                .value_parser(PossibleValuesParser::new(Stage::all().iter().map(Stage::name))),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default: from the configuration)")
                .value_parser(clap::value_parser!(TokenFormat)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .help("Color error messages")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Dump the output of every stage to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-languages")
                .long("list-languages")
                .help("List the built-in languages")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    if matches.get_flag("list-languages") {
        print!("{}", list_languages());
        return;
    }

    let Some(path) = matches.get_one::<String>("path") else {
        eprintln!("A source path is required");
        std::process::exit(2);
    };

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    handle_execute_command(path, &matches, &config);
}

/// Defaults, then the `--config` file, then flags.
fn load_config(matches: &ArgMatches) -> Result<LexcoreConfig, String> {
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }
    if let Some(stage) = matches.get_one::<String>("stage") {
        loader = loader
            .set_override("pipeline.stage", stage.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(format) = matches.get_one::<TokenFormat>("format") {
        loader = loader
            .set_override("dump.format", format.name())
            .map_err(|e| e.to_string())?;
    }
    if matches.get_flag("color") {
        loader = loader
            .set_override("diagnostics.color", true)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| e.to_string())
}

/// Handle the execute command
fn handle_execute_command(path: &str, matches: &ArgMatches, config: &LexcoreConfig) {
    let loader = SourceLoader::from_path(path).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let run = build_run(matches, config, &loader).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let render = RenderOptions {
        color: config.diagnostics.color,
        context_lines: config.diagnostics.context_lines,
    };

    match run.execute(&loader, &render) {
        Ok(output) => print!("{}", output),
        Err(message) => {
            eprint!("{}", message);
            std::process::exit(1);
        }
    }
}

fn build_run(matches: &ArgMatches, config: &LexcoreConfig, loader: &SourceLoader) -> Result<Run, String> {
    let explicit = matches.get_one::<String>("language").map(String::as_str);
    Ok(Run {
        language: resolve_language(explicit, loader, &config.pipeline.language)?,
        stage: config.pipeline.stage.parse()?,
        format: config.dump.format,
        trace: matches.get_flag("trace"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let matches = build_cli().get_matches_from(["lexcore", "a.js", "--stage", "flat", "--format", "json", "--color"]);
        let config = load_config(&matches).unwrap();
        assert_eq!(config.pipeline.stage, "flat");
        assert_eq!(config.dump.format, TokenFormat::Json);
        assert!(config.diagnostics.color);
    }

    #[test]
    fn test_config_defaults_without_flags() {
        let matches = build_cli().get_matches_from(["lexcore", "a.js"]);
        let config = load_config(&matches).unwrap();
        let loader = SourceLoader::from_string("a");
        let run = build_run(&matches, &config, &loader).unwrap();
        assert_eq!(run.stage, Stage::Resolved);
        assert_eq!(run.format, TokenFormat::Dump);
        assert_eq!(run.language, Language::Js);
        assert!(!run.trace);
    }
}
