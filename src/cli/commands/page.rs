use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::super::args::PageCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_failure, print_page_written, print_warning};
use super::context::CliContext;
use crate::core::page::{PageTranslation, scan_pages, translate_page};

pub fn page(ctx: &CliContext, cmd: &PageCommand) -> Result<ExitStatus> {
    if !cmd.path.exists() {
        print_failure(&format!("{} does not exist", cmd.path.display()));
        return Ok(ExitStatus::Failure);
    }

    let scan = scan_pages(&cmd.path, &ctx.config.ignores);
    if scan.skipped_count > 0 {
        print_warning(&format!("{} path(s) could not be read", scan.skipped_count));
    }
    if scan.files.is_empty() {
        print_failure(&format!("No HTML pages found in {}", cmd.path.display()));
        return Ok(ExitStatus::Failure);
    }

    let results: Vec<(PathBuf, PageTranslation)> = scan
        .files
        .par_iter()
        .map(|path| {
            let html = fs::read_to_string(path)
                .with_context(|| format!("Failed to read page: {}", path.display()))?;
            Ok((path.clone(), translate_page(&ctx.resolver, &ctx.lang, &html)))
        })
        .collect::<Result<_>>()?;

    let show_headers = results.len() > 1;
    let mut unresolved = 0;
    for (path, translation) in &results {
        if cmd.write {
            fs::write(path, &translation.html)
                .with_context(|| format!("Failed to write page: {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote translated page");
            print_page_written(path, translation.translated, translation.fallback);
        } else {
            if show_headers {
                println!("==> {} <==", path.display());
            }
            print!("{}", translation.html);
            if !translation.html.ends_with('\n') {
                println!();
            }
        }

        for key in &translation.skipped {
            print_warning(&format!(
                "{}: '{}' contains nested markup, left unchanged",
                path.display(),
                key
            ));
        }
        for key in &translation.unresolved {
            print_warning(&format!("{}: no translation for '{}'", path.display(), key));
        }
        unresolved += translation.unresolved.len();
    }

    Ok(ExitStatus::failure_if(unresolved > 0))
}
