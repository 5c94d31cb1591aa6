mod error;
mod logger;

use clap::{AppSettings, ArgEnum, Args, Parser, Subcommand};
use const_format::{formatcp, str_index};
use error::{CliError, CliResult};
use git_version::git_version;
use prenex::{ast::render, parser, pipeline::Stage, transform, Options};
use std::{
    fs,
    io::{self, IsTerminal, Read},
};

// `git describe --all` will try to find any ref (including tags) that describes the current commit.
// Release tags look like `prenex-0.1.0`, so we pass `--exclude 'prenex-*'` to ignore them.
const GIT_BRANCH_NAME: &str = git_version!(
    args = ["--all", "--exclude", "prenex-*"],
    fallback = "heads/none",
);
const GIT_COMMIT_HASH: &str = git_version!(fallback = "unknown");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const VERSION_STRING: &str = formatcp!(
    "{} [git {} {}]",
    APP_VERSION,
    // By default, `git describe` returns something like "heads/main". We ignore the "heads/" part
    // to get only the branch name
    str_index!(GIT_BRANCH_NAME, 6..),
    GIT_COMMIT_HASH,
);

#[derive(Parser)]
#[clap(
    name = "prenex",
    version = VERSION_STRING,
    setting = AppSettings::DeriveDisplayOrder
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Sets the maximum logging level.
    #[clap(arg_enum, global = true, long = "log", default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Disables output coloring.
    #[clap(global = true, long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Splits a formula into tokens and prints them with their offsets.
    Tokens(TokensCommandOptions),

    /// Parses a formula and prints every statement back.
    Parse(ParseCommandOptions),

    /// Runs the normalization pipeline and prints the formula at each stage.
    Normalize(NormalizeCommandOptions),

    /// Prints the clauses of a formula and their Horn classification.
    Clauses(ClausesCommandOptions),
}

#[derive(Args)]
struct Input {
    /// The file containing the formula. Use `-` to read from stdin.
    #[clap(required_unless_present = "expr", conflicts_with = "expr")]
    file: Option<String>,

    /// Reads the formula from this argument instead of a file.
    #[clap(short, long)]
    expr: Option<String>,
}

#[derive(Args, Clone, Copy)]
struct ParsingOptions {
    /// The maximum nesting depth of a formula, both when parsing and when transforming it.
    #[clap(long, default_value_t = parser::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Args, Clone, Copy)]
struct TransformOptions {
    /// The largest numeric suffix tried when renaming a bound variable.
    #[clap(long, default_value_t = transform::DEFAULT_MAX_RENAME_SUFFIX)]
    max_suffix: usize,

    /// The statement to normalize, counting from zero, if the input has more than one.
    #[clap(long, default_value_t = 0)]
    statement: usize,
}

fn build_options(parsing: ParsingOptions, transform: TransformOptions) -> Options {
    Options {
        parser: parser::Config { max_depth: parsing.max_depth },
        transform: transform::Config {
            max_depth: parsing.max_depth,
            max_rename_suffix: transform.max_suffix,
        },
        statement: transform.statement,
    }
}

#[derive(Args)]
struct TokensCommandOptions {
    #[clap(flatten)]
    input: Input,
}

#[derive(Args)]
struct ParseCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,
}

#[derive(Args)]
struct NormalizeCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,

    #[clap(flatten)]
    transform: TransformOptions,

    /// Only prints the given stages. Can be passed more than once. By default, every stage is
    /// printed.
    #[clap(long = "stage", value_parser = parse_stage)]
    stages: Vec<Stage>,

    /// Prints how long each stage took.
    #[clap(long)]
    stats: bool,
}

#[derive(Args)]
struct ClausesCommandOptions {
    #[clap(flatten)]
    input: Input,

    #[clap(flatten)]
    parsing: ParsingOptions,

    #[clap(flatten)]
    transform: TransformOptions,
}

#[derive(ArgEnum, Clone)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
        }
    }
}

fn parse_stage(s: &str) -> Result<Stage, String> {
    s.parse().map_err(|()| {
        let names: Vec<_> = Stage::ALL.iter().map(ToString::to_string).collect();
        format!("unknown stage '{}', expected one of: {}", s, names.join(", "))
    })
}

fn main() {
    let cli = Cli::parse();
    let colors_enabled = !cli.no_color && std::io::stderr().is_terminal();
    logger::init(cli.log_level.into(), colors_enabled);

    let result = match cli.command {
        Command::Tokens(options) => tokens_command(options),
        Command::Parse(options) => parse_command(options),
        Command::Normalize(options) => normalize_command(options),
        Command::Clauses(options) => clauses_command(options),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn read_input(input: &Input) -> CliResult<String> {
    match (input.expr.as_deref(), input.file.as_deref()) {
        (Some(expr), _) => Ok(expr.to_owned()),
        (None, Some("-")) => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => Err(CliError::MissingInput),
    }
}

fn tokens_command(options: TokensCommandOptions) -> CliResult<()> {
    let input = read_input(&options.input)?;
    for (token, position) in prenex::tokenize(&input)? {
        println!("{:>5}  {}", position, token);
    }
    Ok(())
}

fn parse_command(options: ParseCommandOptions) -> CliResult<()> {
    let input = read_input(&options.input)?;
    let config = parser::Config { max_depth: options.parsing.max_depth };
    let program = prenex::parse_str(&input, config)?;
    for statement in &program.statements {
        println!("{}", render(statement));
    }
    if program.has_diagnostics() {
        log::info!("recovered from {} parse errors", program.diagnostics.len());
    }
    Ok(())
}

fn normalize_command(options: NormalizeCommandOptions) -> CliResult<()> {
    let input = read_input(&options.input)?;
    let (_, result) =
        prenex::normalize_str(&input, build_options(options.parsing, options.transform))?;

    for (stage, formula) in result.stages() {
        if options.stages.is_empty() || options.stages.contains(&stage) {
            println!("{}: {}", stage, render(formula));
        }
    }
    if options.stats {
        for (stage, time) in &result.timings {
            println!("{:<24}{:?}", stage.to_string(), time);
        }
        println!("{:<24}{:?}", "total", result.total_time());
    }
    Ok(())
}

fn clauses_command(options: ClausesCommandOptions) -> CliResult<()> {
    let input = read_input(&options.input)?;
    let (_, result) =
        prenex::normalize_str(&input, build_options(options.parsing, options.transform))?;

    for (i, report) in result.horn.iter().enumerate() {
        println!("{}: {}", i + 1, render(&report.clause));
        println!("   horn: {}, {}", report.is_horn(), report.kind.description());
    }
    Ok(())
}
