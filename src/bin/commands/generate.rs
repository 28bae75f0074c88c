//! # generate
//!
//! The generate subcommand generates the schema of a ZID to `<root_directory>/<ZID>.yaml`,
//! or prints it to the stdout in dry run.

use crate::{CliCommand, GlobalOptions};
use clap::{builder::BoolishValueParser, ArgAction, Args};
use std::path::PathBuf;
use zschema_lib::Result;

#[derive(Args, Debug, Default, Clone)]
pub struct Generate {
    /// The directory the schema file is written to
    root_directory: PathBuf,
    /// The namespace of the generated identifiers: the schema is identified by <TAG>/<ZID>
    tag: String,
    /// The ZID to generate the schema of
    zid: String,
    /// Prints the schema to the stdout instead of writing it: true or false
    #[clap(value_parser = BoolishValueParser::new(), action = ArgAction::Set)]
    dry_run: bool,
}

impl CliCommand for Generate {
    fn run(self, options: &GlobalOptions) -> Result<()> {
        let form = options.form()?;
        tracing::debug!(zid = %self.zid, %form, dry_run = self.dry_run, "Generating schema");
        zschema_lib::generate(&self.root_directory, &self.tag, &self.zid, self.dry_run, form)
    }
}
