use clap::{Parser as ClapParser, Subcommand};
use sqlexpr::Dialect;
use sqlexpr::cli::{
    self, CheckOptions, CheckResult, CliError, SplitOptions, TranslateOptions,
};
use sqlexpr::output::render;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sqlexpr")]
#[command(about = "sqlexpr - evaluate filter expressions, compile them to SQL, split SQL scripts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Bindings {
    /// JSON object of variable bindings
    #[arg(short, long, conflicts_with = "bindings_file")]
    bindings: Option<String>,

    /// File holding the JSON bindings
    #[arg(long)]
    bindings_file: Option<PathBuf>,
}

impl Bindings {
    fn load(self) -> Result<Option<String>, CliError> {
        match (self.bindings, self.bindings_file) {
            (Some(json), _) => Ok(Some(json)),
            (None, Some(path)) => Ok(Some(fs::read_to_string(path)?)),
            (None, None) => Ok(None),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against constant bindings
    Eval {
        expression: String,

        #[command(flatten)]
        bindings: Bindings,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Only validate expression syntax
    Check { expression: String },

    /// Compile an expression to parameterized SQL
    Sql {
        expression: String,

        #[command(flatten)]
        bindings: Bindings,

        /// ansi, postgres, mysql, sqlite or sqlserver
        #[arg(short, long, default_value = "ansi")]
        dialect: Dialect,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Split a SQL script into statements (reads stdin without a file)
    Split {
        file: Option<PathBuf>,

        /// Keep comments in the statements
        #[arg(short, long)]
        keep_comments: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SQLEXPR_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            bindings,
            pretty,
        } => run_eval(expression, bindings, pretty),
        Commands::Check { expression } => run_check(expression),
        Commands::Sql {
            expression,
            bindings,
            dialect,
            pretty,
        } => run_sql(expression, bindings, dialect, pretty),
        Commands::Split {
            file,
            keep_comments,
            pretty,
        } => run_split(file, keep_comments, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(expression: String, bindings: Bindings, pretty: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        expression,
        bindings: bindings.load()?,
        syntax_only: false,
    };

    if let CheckResult::Success(output) = cli::execute_check(&options)? {
        println!("{}", render(&output, pretty));
    }
    Ok(())
}

fn run_check(expression: String) -> Result<(), CliError> {
    let options = CheckOptions {
        expression,
        bindings: None,
        syntax_only: true,
    };

    cli::execute_check(&options)?;
    println!("Syntax is valid");
    Ok(())
}

fn run_sql(
    expression: String,
    bindings: Bindings,
    dialect: Dialect,
    pretty: bool,
) -> Result<(), CliError> {
    let options = TranslateOptions {
        expression,
        bindings: bindings.load()?,
        dialect,
    };

    let output = cli::execute_translate(&options)?;
    println!("{}", render(&output, pretty));
    Ok(())
}

fn run_split(file: Option<PathBuf>, keep_comments: bool, pretty: bool) -> Result<(), CliError> {
    let script = match file {
        Some(path) => Some(fs::read_to_string(path)?),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = SplitOptions {
        script,
        keep_comments,
    };

    let statements = cli::execute_split(&options)?;
    println!("{}", render(&serde_json::json!(statements), pretty));
    Ok(())
}
