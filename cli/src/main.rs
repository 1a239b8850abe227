use std::io::{self, Write};
use std::process::ExitCode;

use command_args_core::{Command, CommandGroup, OptionValue, ParseError, ValueKind};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status after printing help.
const EXIT_HELP: u8 = 0;
/// Exit status for missing, invalid, or unrecognized arguments.
const EXIT_USAGE: u8 = 2;

fn build_command() -> Command {
    Command::new("build", "Compile a source file")
        .with_positional(
            OptionValue::new("FILE", ValueKind::Path).with_description("Source file to compile"),
        )
        .with_named(
            "--verbose",
            OptionValue::flag("verbose").with_description("Print each compilation step"),
        )
        .with_named(
            "--jobs",
            OptionValue::new("jobs", ValueKind::Integer)
                .with_usage("N")
                .with_description("Number of parallel jobs"),
        )
        .with_named(
            "--format",
            OptionValue::new("format", ValueKind::choice(["json", "yaml", "text"]))
                .with_description("Report format"),
        )
        .with_named(
            "--feature",
            OptionValue::new("feature", ValueKind::list(ValueKind::String))
                .with_usage("NAME[,NAME...]")
                .with_description("Features to enable; may be repeated"),
        )
        .with_named(
            "--target",
            OptionValue::new("target", ValueKind::String)
                .required()
                .with_usage("TRIPLE")
                .with_description("Target triple (required)"),
        )
}

fn remote_command() -> Result<Command, command_args_core::DefinitionError> {
    let add = Command::new("add", "Register a remote")
        .with_positional(OptionValue::new("NAME", ValueKind::String).with_description("Remote name"))
        .with_positional(OptionValue::new("URL", ValueKind::String).with_description("Remote URL"));
    let remove = Command::new("remove", "Forget a remote")
        .with_positional(OptionValue::new("NAME", ValueKind::String).with_description("Remote name"));

    Command::new("remote", "Manage remotes").with_command_group(
        CommandGroup::new("ACTION")
            .with_command(add)
            .with_command(remove),
    )
}

fn root_command() -> Result<Command, command_args_core::DefinitionError> {
    Command::new("argdemo", "Demonstrates nested command-line parsing").with_command_group(
        CommandGroup::default()
            .with_command(build_command())
            .with_command(Command::new("run", "Run the last build"))
            .with_command(remote_command()?),
    )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args, &mut io::stdout(), &mut io::stderr()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String], out: &mut impl Write, err: &mut impl Write) -> io::Result<u8> {
    let mut root = match root_command() {
        Ok(root) => root,
        Err(definition) => {
            writeln!(err, "error: {definition}")?;
            return Ok(1);
        }
    };
    if let Some(problem) = command_args_core::validate_command(&root).first() {
        writeln!(err, "error: {problem}")?;
        return Ok(1);
    }

    match root.parse(args, 1) {
        Ok(next) if next < args.len() => {
            debug!(position = next, "Rejecting trailing arguments");
            writeln!(err, "error: unrecognized argument '{}'", args[next])?;
            writeln!(err, "Usage: {}", root.usage())?;
            Ok(EXIT_USAGE)
        }
        Ok(_) => {
            let json = root.to_parsed().to_json_pretty().map_err(io::Error::other)?;
            writeln!(out, "{json}")?;
            Ok(0)
        }
        Err(ParseError::HelpRequested(request)) => {
            let Some(command) = root.find(request.path()) else {
                writeln!(err, "error: unknown command '{}'", request.command_name())?;
                return Ok(EXIT_USAGE);
            };
            let parents = &request.path()[..request.path().len() - 1];
            let mut usage = parents.join(" ");
            if !usage.is_empty() {
                usage.push(' ');
            }
            usage.push_str(&command.usage());

            writeln!(out, "Usage: {usage}")?;
            writeln!(out)?;
            if !command.description().is_empty() {
                writeln!(out, "{}", command.description())?;
                writeln!(out)?;
            }
            command.print_help(out)?;
            Ok(EXIT_HELP)
        }
        Err(parse) => {
            writeln!(err, "error: {parse}")?;
            writeln!(err, "Usage: {}", root.usage())?;
            Ok(EXIT_USAGE)
        }
    }
}
