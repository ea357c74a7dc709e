use anyhow::Result;

use super::super::args::LangCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_success, print_warning};
use super::context::CliContext;
use crate::core::preferences::set_preferred_language;

/// Print the active language, or save a new preferred language.
///
/// Codes without a dictionary are saved anyway and resolve through the
/// default language.
pub fn lang(ctx: &mut CliContext, cmd: &LangCommand) -> Result<ExitStatus> {
    let Some(code) = cmd.code.as_deref().map(str::trim) else {
        println!("{}", ctx.lang);
        return Ok(ExitStatus::Success);
    };

    let catalog = ctx.resolver.catalog();
    if !catalog.is_supported(code) {
        let available: Vec<&str> = catalog.locales().collect();
        print_warning(&format!(
            "No translations for '{}', texts will use '{}'. Available: {}",
            code,
            catalog.default_locale(),
            available.join(", ")
        ));
    }

    set_preferred_language(&mut ctx.store, code)?;
    ctx.lang = code.to_string();
    print_success(&format!("Preferred language set to {}", code));
    Ok(ExitStatus::Success)
}
