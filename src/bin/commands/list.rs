//! # list
//!
//! The list subcommand prints the ZIDs a schema can be generated for, one per line.

use crate::{CliCommand, GlobalOptions};
use clap::Args;
use std::io::Write;
use zschema_lib::{Result, SchemaGenerator};

#[derive(Args, Debug, Default, Clone)]
pub struct List;

impl CliCommand for List {
    fn run(self, options: &GlobalOptions) -> Result<()> {
        let form = options.form()?;
        let generator = SchemaGenerator::new(form);

        let mut stdout = std::io::stdout().lock();
        for zid in generator.list() {
            writeln!(stdout, "{}", zid)?;
        }
        Ok(())
    }
}
