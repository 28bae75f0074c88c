use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use commands::{generate::Generate, list::List};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use zschema_lib::{report, Form, Result};

mod commands;

/// zschema generates OpenAPI schema files for the built-in Wikifunctions types,
/// identified by their ZIDs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// The form of the ZObjects the schemas describe: NORMAL or CANONICAL
    #[clap(long, global = true, env = "ZSCHEMA_FORM", default_value = "NORMAL")]
    pub form: String,

    /// Increases the logging verbosity. Can be repeated
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalOptions {
    pub fn form(&self) -> Result<Form> {
        self.form.parse()
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Lists the ZIDs a schema can be generated for
    List(List),
    /// Generates the schema of a ZID
    Generate(Generate),
}

pub trait CliCommand {
    fn run(self, options: &GlobalOptions) -> Result<()>;
}

impl CliCommand for Command {
    fn run(self, options: &GlobalOptions) -> Result<()> {
        match self {
            Command::List(list) => list.run(options),
            Command::Generate(generate) => generate.run(options),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_env_var("ZSCHEMA_LOG")
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.options.verbose);

    if let Err(error) = cli.command.run(&cli.options) {
        eprintln!("{} {}", "error:".red().bold(), report(&error));
        std::process::exit(error.exit_code());
    }
}
