use anyhow::Result;

use super::super::exit_status::ExitStatus;
use super::super::report::print_locales;
use super::context::CliContext;
use crate::core::resolver::Coverage;

pub fn locales(ctx: &CliContext) -> Result<ExitStatus> {
    let catalog = ctx.resolver.catalog();
    let rows: Vec<Coverage> = catalog
        .locales()
        .map(|locale| ctx.resolver.coverage(locale))
        .collect();

    print_locales(&rows, &ctx.lang, catalog.default_locale());
    Ok(ExitStatus::Success)
}
