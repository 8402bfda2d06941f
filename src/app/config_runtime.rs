use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::{Cli, Command, ServeArgs};

/// Which settings were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
    pub(crate) data_file: bool,
    pub(crate) lookup_timeout: bool,
    pub(crate) bind: bool,
    pub(crate) port: bool,
    pub(crate) static_dir: bool,
}

/// Settings shared by every subcommand after layering.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedSettings {
    pub(crate) cli: Cli,
    pub(crate) command: Command,
    pub(crate) lookup_timeout: Duration,
    pub(crate) log_level: &'static str,
}

pub(crate) fn parse_cli_with_sources() -> (Cli, CliValueSources) {
    let command = Cli::command();
    let matches = command.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let sources = collect_sources(&matches);
    (cli, sources)
}

fn collect_sources(matches: &ArgMatches) -> CliValueSources {
    let serve = matches.subcommand_matches("serve");
    let serve_value = |id: &str| serve.is_some_and(|m| is_commandline_value(m, id));

    CliValueSources {
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
        data_file: is_commandline_value(matches, "data_file"),
        lookup_timeout: is_commandline_value(matches, "lookup_timeout"),
        bind: serve_value("bind"),
        port: serve_value("port"),
        static_dir: serve_value("static_dir"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Layers built-in defaults, the config file, and the command line.
///
/// A missing subcommand becomes `serve` with default arguments before the
/// file is applied.
pub(crate) fn apply_config_defaults(
    mut cli: Cli,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> ResolvedSettings {
    let mut command = cli
        .command
        .take()
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let mut file_verbosity = None;
    if let Some(file_config) = file_config {
        if !cli_sources.data_file
            && let Some(data_file) = &file_config.data_file
        {
            cli.data_file = data_file.clone();
        }

        if !cli_sources.lookup_timeout
            && let Some(timeout) = file_config.lookup_timeout_secs
        {
            cli.lookup_timeout = timeout;
        }

        if let Command::Serve(serve) = &mut command {
            apply_serve_defaults(serve, cli_sources, file_config);
        }

        if !cli_sources.verbose && !cli_sources.quiet {
            file_verbosity = file_config.verbosity;
        }
    }

    let log_level = resolve_default_log_level(cli.verbose, cli.quiet, file_verbosity);
    ResolvedSettings {
        lookup_timeout: Duration::from_secs(cli.lookup_timeout),
        log_level,
        cli,
        command,
    }
}

fn apply_serve_defaults(serve: &mut ServeArgs, cli_sources: &CliValueSources, file_config: &FileConfig) {
    if !cli_sources.bind
        && let Some(bind) = &file_config.bind
    {
        serve.bind.clone_from(bind);
    }

    if !cli_sources.port
        && let Some(port) = file_config.port
    {
        serve.port = port;
    }

    if !cli_sources.static_dir
        && let Some(static_dir) = &file_config.static_dir
    {
        serve.static_dir.clone_from(static_dir);
    }
}

/// Default log filter; `RUST_LOG` still takes priority when set.
pub(crate) fn resolve_default_log_level(
    verbose: u8,
    quiet: bool,
    file_verbosity: Option<VerbositySetting>,
) -> &'static str {
    if quiet {
        "error"
    } else if verbose > 0 {
        match verbose {
            1 => "debug",
            _ => "trace",
        }
    } else {
        file_verbosity.map_or("info", VerbositySetting::default_level)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn parse(args: &[&str]) -> (Cli, CliValueSources) {
        let matches = Cli::command()
            .try_get_matches_from(args)
            .expect("args should parse");
        let cli = Cli::from_arg_matches(&matches).expect("matches should convert");
        (cli, collect_sources(&matches))
    }

    fn file_config() -> FileConfig {
        FileConfig {
            data_file: Some(PathBuf::from("/srv/livros.json")),
            static_dir: Some(PathBuf::from("/srv/public")),
            bind: Some("0.0.0.0".to_string()),
            port: Some(8080),
            lookup_timeout_secs: Some(9),
            verbosity: Some(VerbositySetting::Verbose),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let (cli, sources) = parse(&["bookshelf"]);
        let resolved = apply_config_defaults(cli, &sources, None);
        match resolved.command {
            Command::Serve(serve) => assert_eq!(serve, ServeArgs::default()),
            other => panic!("expected serve, got {other:?}"),
        }
        assert_eq!(resolved.log_level, "info");
        assert_eq!(resolved.lookup_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_file_values_fill_unset_cli_values() {
        let (cli, sources) = parse(&["bookshelf", "serve"]);
        let resolved = apply_config_defaults(cli, &sources, Some(&file_config()));

        assert_eq!(resolved.cli.data_file, PathBuf::from("/srv/livros.json"));
        assert_eq!(resolved.lookup_timeout, Duration::from_secs(9));
        assert_eq!(resolved.log_level, "debug");
        match resolved.command {
            Command::Serve(serve) => {
                assert_eq!(serve.bind, "0.0.0.0");
                assert_eq!(serve.port, 8080);
                assert_eq!(serve.static_dir, PathBuf::from("/srv/public"));
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_values_beat_file_values() {
        let (cli, sources) = parse(&[
            "bookshelf",
            "--data-file",
            "mine.json",
            "-q",
            "serve",
            "--port",
            "4000",
        ]);
        assert!(sources.data_file);
        assert!(sources.port);
        assert!(!sources.bind);

        let resolved = apply_config_defaults(cli, &sources, Some(&file_config()));

        assert_eq!(resolved.cli.data_file, PathBuf::from("mine.json"));
        assert_eq!(resolved.log_level, "error");
        match resolved.command {
            Command::Serve(serve) => {
                assert_eq!(serve.port, 4000);
                assert_eq!(serve.bind, "0.0.0.0");
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn test_default_valued_flag_is_not_commandline_source() {
        let (_cli, sources) = parse(&["bookshelf", "list"]);
        assert!(!sources.data_file);
        assert!(!sources.lookup_timeout);
        assert!(!sources.port);
    }

    #[test]
    fn test_resolve_default_log_level_priority() {
        assert_eq!(resolve_default_log_level(2, true, None), "error");
        assert_eq!(resolve_default_log_level(1, false, Some(VerbositySetting::Quiet)), "debug");
        assert_eq!(resolve_default_log_level(2, false, None), "trace");
        assert_eq!(
            resolve_default_log_level(0, false, Some(VerbositySetting::Debug)),
            "trace"
        );
        assert_eq!(resolve_default_log_level(0, false, None), "info");
    }
}
