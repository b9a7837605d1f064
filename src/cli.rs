//! CLI parsing and command dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{
    commands::{self, Context, passthrough},
    error::Result,
};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "tpm",
    version,
    about = "Run, alias and manage package.json scripts",
    arg_required_else_help = true
)]
struct Cli {
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorMode,
    /// Enable verbose output.
    #[arg(long, global = true)]
    verbose: bool,
    /// Project directory containing package.json (defaults to the current directory).
    #[arg(short = 'C', long = "dir", global = true)]
    dir: Option<PathBuf>,
    /// Command to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

// Commands are ordered alphabetically - maintain this order.
/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Add a new script to package.json.
    Add {
        /// Name of the script to add.
        name: String,
    },
    /// Check for unused or missing dependencies.
    #[command(visible_alias = "cd", alias = "checkdependencies")]
    Checkdeps,
    /// Bootstrap a new project.
    Init,
    /// Create an alias for a script (like `ln <source> <target>`).
    #[command(visible_alias = "link", alias = "alias")]
    Ln {
        /// Script name to alias.
        script: String,
        /// Alias name to create.
        alias: String,
    },
    /// Run one or more scripts or aliases from package.json.
    #[command(visible_alias = "r")]
    Run {
        /// Scripts or aliases to run, in order.
        scripts: Vec<String>,
    },
    /// List scripts with their aliases.
    #[command(visible_alias = "aliases")]
    Scripts,
    /// Set a top-level field in package.json.
    Set {
        /// Field to set.
        key: String,
        /// Value to store, always as a string.
        value: String,
    },
    /// Remove an alias from package.json.
    #[command(visible_alias = "uln", alias = "dealias", alias = "unalias")]
    Unlink {
        /// Alias name to remove.
        alias: String,
    },
    /// Package-manager commands, or script names to run.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Run the requested command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let context = Context::load(cli.dir.as_deref(), cli.color.into_choice(), cli.verbose)?;

    // Match arms are ordered alphabetically - maintain this order.
    match cli.command {
        Command::Add { name } => commands::add::run(&context, name).await,
        Command::Checkdeps => commands::checkdeps::run(&context).await,
        Command::External(args) => {
            if args.first().is_some_and(|verb| passthrough::is_passthrough(verb)) {
                passthrough::run(&context, args).await
            } else {
                commands::run::run(&context, args).await
            }
        }
        Command::Init => commands::init::run(&context).await,
        Command::Ln { script, alias } => commands::link::run(&context, script, alias).await,
        Command::Run { scripts } => commands::run::run(&context, scripts).await,
        Command::Scripts => commands::scripts::run(&context).await,
        Command::Set { key, value } => commands::set::run(&context, key, value).await,
        Command::Unlink { alias } => commands::unlink::run(&context, alias).await,
    }
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args.iter().copied())
            .expect("parse")
            .command
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_reach_tpm_commands() {
        assert!(matches!(parse(&["tpm", "r", "build"]), Command::Run { .. }));
        assert!(matches!(parse(&["tpm", "cd"]), Command::Checkdeps));
        assert!(matches!(parse(&["tpm", "checkdependencies"]), Command::Checkdeps));
        assert!(matches!(parse(&["tpm", "alias", "build", "b"]), Command::Ln { .. }));
        assert!(matches!(parse(&["tpm", "link", "build", "b"]), Command::Ln { .. }));
        assert!(matches!(parse(&["tpm", "unalias", "b"]), Command::Unlink { .. }));
        assert!(matches!(parse(&["tpm", "dealias", "b"]), Command::Unlink { .. }));
        assert!(matches!(parse(&["tpm", "aliases"]), Command::Scripts));
    }

    #[test]
    fn link_takes_source_then_alias() {
        let Command::Ln { script, alias } = parse(&["tpm", "ln", "build", "b"]) else {
            panic!("expected ln");
        };
        assert_eq!((script.as_str(), alias.as_str()), ("build", "b"));
    }

    #[test]
    fn unknown_words_are_external() {
        let Command::External(args) = parse(&["tpm", "build", "test"]) else {
            panic!("expected external");
        };
        assert_eq!(args, ["build", "test"]);

        let Command::External(args) = parse(&["tpm", "install", "-D", "tsx"]) else {
            panic!("expected external");
        };
        assert_eq!(args, ["install", "-D", "tsx"]);
    }

    #[test]
    fn global_options_follow_the_command() {
        let cli = Cli::try_parse_from(["tpm", "run", "build", "-C", "/tmp", "--verbose"])
            .expect("parse");
        assert!(cli.verbose);
        assert_eq!(cli.dir.as_deref(), Some(Path::new("/tmp")));
    }
}
