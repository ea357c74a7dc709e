use anyhow::Result;

use super::super::args::TranslateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{TranslationLine, print_translations};
use super::context::CliContext;

pub fn translate(ctx: &CliContext, cmd: &TranslateCommand) -> Result<ExitStatus> {
    let resolved = ctx
        .resolver
        .resolve_all(&ctx.lang, cmd.keys.iter().map(String::as_str));

    let mut unresolved = 0;
    let lines: Vec<TranslationLine<'_>> = cmd
        .keys
        .iter()
        .map(|key| {
            let source = ctx.resolver.lookup(&ctx.lang, key).map(|found| found.source);
            if source.is_none() {
                unresolved += 1;
            }
            TranslationLine {
                key,
                text: resolved.get(key).map(String::as_str).unwrap_or(key),
                source,
            }
        })
        .collect();

    print_translations(&lines);
    Ok(ExitStatus::failure_if(unresolved > 0))
}
