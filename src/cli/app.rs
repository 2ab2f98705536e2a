//! Main CLI application

use crate::cli::logging;
use crate::config::{parse_config_auto, parse_config_file, validate_config, validate_var_name, Config};
use crate::error::{ConfigError, ExecutionError, TaskrError};
use crate::runner::{Context, Outcome, Task, Verbosity};
use crate::vars::{Var, Vars};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
    /// Parsed configuration
    config: Config,
    /// Config file path
    config_path: PathBuf,
}

impl App {
    /// Create a new app from configuration file
    pub fn new() -> Result<Self, TaskrError> {
        let (config, config_path) = parse_config_auto()?;
        Self::from_config(config, config_path)
    }

    /// Create app with a specific config file
    pub fn with_config_file(path: PathBuf) -> Result<Self, TaskrError> {
        let config = parse_config_file(&path)?;
        Self::from_config(config, path)
    }

    fn from_config(config: Config, config_path: PathBuf) -> Result<Self, TaskrError> {
        validate_config(&config)?;
        let command = build_command(&config);

        Ok(App {
            command,
            config,
            config_path,
        })
    }

    /// Run the application with the process arguments
    pub fn run(self) -> Result<(), TaskrError> {
        let matches = self.command.clone().get_matches();
        self.run_matches(matches)
    }

    /// Run the application with explicit arguments
    pub fn run_from<I, T>(self, args: I) -> Result<(), TaskrError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().get_matches_from(args);
        self.run_matches(matches)
    }

    fn run_matches(mut self, matches: ArgMatches) -> Result<(), TaskrError> {
        let verbosity = get_verbosity(&matches);
        logging::init(verbosity);

        if let Some(shell) = matches.get_one::<Shell>("completion").copied() {
            let name = self.command.get_name().to_string();
            clap_complete::generate(shell, &mut self.command, name, &mut io::stdout());
            return Ok(());
        }

        // Check if a task was specified
        let (task_name, task_matches) = match matches.subcommand() {
            Some((name, sub_matches)) => (name.to_string(), sub_matches),
            None => {
                self.command.print_help()?;
                println!();
                return Ok(());
            }
        };

        let task_config = self
            .config
            .tasks
            .get(&task_name)
            .ok_or_else(|| ConfigError::TaskNotFound(task_name.clone()))?;
        let task = Task::from_config(task_name.clone(), task_config.clone());

        let assignments = task_matches
            .get_many::<String>("vars")
            .into_iter()
            .flatten()
            .map(String::as_str);
        let overrides = parse_assignments(assignments)?;

        let mut ctx = Context::new()
            .with_config_path(self.config_path.clone())
            .with_verbosity(verbosity)
            .with_dry(matches.get_flag("dry"))
            .with_force(matches.get_flag("force"))
            .with_overrides(overrides);

        if let Some(interpreter) = &self.config.interpreter {
            ctx = ctx.with_interpreter(interpreter.clone());
        }

        if matches.get_flag("status") {
            if task.status(&mut ctx, &self.config.vars)? {
                ctx.print_task_up_to_date(&task_name);
                return Ok(());
            }
            return Err(ExecutionError::NotUpToDate(task_name).into());
        }

        match task.execute(&mut ctx, &self.config.vars)? {
            Outcome::UpToDate => ctx.print_debug("Nothing to do"),
            Outcome::Ran => {}
        }

        Ok(())
    }
}

/// Build the clap command from configuration
fn build_command(config: &Config) -> Command {
    let mut cmd = Command::new(config.name.clone().unwrap_or_else(|| "taskr".to_string()))
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            config
                .usage
                .clone()
                .unwrap_or_else(|| "A YAML-based task runner".to_string()),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to taskr.yml or taskr.toml config file")
                .global(true),
        )
        .arg(
            Arg::new("dry")
                .long("dry")
                .help("Print commands without running them")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Run the task even if it is up to date")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("status")
                .long("status")
                .help("Exit with an error if the task is not up to date")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("completion")
                .long("completion")
                .value_name("SHELL")
                .help("Print a shell completion script")
                .value_parser(value_parser!(Shell)),
        );

    let mut names: Vec<&String> = config.tasks.keys().collect();
    names.sort();

    for task_name in names {
        let task = &config.tasks[task_name];
        if task.private {
            continue;
        }

        let mut task_cmd = Command::new(task_name.clone())
            .about(task.usage.clone().unwrap_or_default())
            .arg(
                Arg::new("vars")
                    .value_name("NAME=VALUE")
                    .help("Variables overriding the task's own")
                    .num_args(0..)
                    .action(ArgAction::Append),
            );

        if let Some(desc) = &task.description {
            task_cmd = task_cmd.long_about(desc.clone());
        }

        cmd = cmd.subcommand(task_cmd);
    }

    cmd
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Parse `NAME=VALUE` arguments into literal variables
pub fn parse_assignments<'a, I>(assignments: I) -> Result<Vars, ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut vars = Vars::new();
    for assignment in assignments {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidAssignment(assignment.to_string()))?;
        validate_var_name(name)?;
        vars.set(name, Var::from_static(value));
    }
    Ok(vars)
}

/// Run the CLI application with provided arguments
pub fn run() -> Result<(), TaskrError> {
    // The config must be loaded before clap can know the task subcommands
    let args: Vec<String> = std::env::args().collect();
    let file_path = extract_file_arg(&args);

    let app = if let Some(path) = file_path {
        App::with_config_file(path)?
    } else {
        App::new()?
    };

    app.run()
}

/// Extract --file argument before clap parsing
fn extract_file_arg(args: &[String]) -> Option<PathBuf> {
    for (i, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix("--file=") {
            return Some(PathBuf::from(path));
        }
        if (arg == "--file" || arg == "-f") && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_get_verbosity_normal() {
        let cmd = Command::new("test")
            .arg(Arg::new("quiet").long("quiet").action(ArgAction::SetTrue))
            .arg(Arg::new("silent").long("silent").action(ArgAction::SetTrue))
            .arg(Arg::new("verbose").long("verbose").action(ArgAction::SetTrue));
        let matches = cmd.get_matches_from(vec!["test"]);
        assert_eq!(get_verbosity(&matches), Verbosity::Normal);
    }

    #[test]
    fn test_extract_file_arg() {
        let args = vec![
            "taskr".to_string(),
            "--file".to_string(),
            "test.yml".to_string(),
        ];
        assert_eq!(extract_file_arg(&args), Some(PathBuf::from("test.yml")));

        let args = vec!["taskr".to_string(), "-f".to_string(), "test.yml".to_string()];
        assert_eq!(extract_file_arg(&args), Some(PathBuf::from("test.yml")));

        let args = vec!["taskr".to_string(), "--file=other.toml".to_string()];
        assert_eq!(extract_file_arg(&args), Some(PathBuf::from("other.toml")));
    }

    #[test]
    fn test_parse_assignments() {
        let vars = parse_assignments(vec!["A=1", "B=x=y", "A=2", "EMPTY="]).unwrap();
        assert_eq!(vars.keys(), &["A", "B", "EMPTY"]);
        assert_eq!(vars.get("A").unwrap().static_value, "2");
        assert_eq!(vars.get("B").unwrap().static_value, "x=y");
        assert_eq!(vars.get("EMPTY").unwrap().static_value, "");

        assert!(matches!(
            parse_assignments(vec!["novalue"]),
            Err(ConfigError::InvalidAssignment(_))
        ));
        assert!(matches!(
            parse_assignments(vec!["=value"]),
            Err(ConfigError::InvalidVarName(_))
        ));
    }

    #[test]
    fn test_build_command_skips_private_tasks() {
        let config = parse_config(
            r#"
tasks:
  build:
    usage: Build it
  secret:
    private: true
"#,
        )
        .unwrap();

        let cmd = build_command(&config);
        let names: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        assert_eq!(names, vec!["build"]);
    }

    #[test]
    fn test_task_accepts_assignments() {
        let config = parse_config("tasks:\n  build: {}\n").unwrap();
        let matches = build_command(&config)
            .get_matches_from(vec!["taskr", "--dry", "build", "A=1", "B=2"]);

        assert!(matches.get_flag("dry"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "build");
        let vars: Vec<&String> = sub.get_many::<String>("vars").unwrap().collect();
        assert_eq!(vars, vec!["A=1", "B=2"]);
    }
}
