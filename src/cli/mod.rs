//! Command-line interface: argument parsing, dispatch, and terminal output.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs};
pub use exit_status::ExitStatus;

use commands::{
    CliContext, init::init, lang::lang, locales::locales, market::market, market::prices,
    page::page, suggest::suggest, translate::translate,
};

/// Run a parsed command line and return its exit status.
///
/// `serve` is handled by the binary before this is called.
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command, common }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Init) => init(),
        Some(Command::Serve) => {
            anyhow::bail!("Serve command should be handled before run_cli()")
        }
        Some(Command::Translate(cmd)) => translate(&CliContext::new(&common)?, &cmd),
        Some(Command::Page(cmd)) => page(&CliContext::new(&common)?, &cmd),
        Some(Command::Lang(cmd)) => lang(&mut CliContext::new(&common)?, &cmd),
        Some(Command::Locales) => locales(&CliContext::new(&common)?),
        Some(Command::Market(cmd)) => market(&CliContext::new(&common)?, &cmd),
        Some(Command::Prices(cmd)) => prices(&CliContext::new(&common)?, &cmd),
        Some(Command::Suggest(cmd)) => suggest(&CliContext::new(&common)?, &cmd),
        None => Ok(ExitStatus::Success),
    }
}
