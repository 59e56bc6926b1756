//! Filesystem guard for export targets.

use std::io::{self, Write};
use std::path::Path;

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};

/// Refuse to clobber an existing file unless `force` was passed or the
/// user agrees. A missing file is always writable.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));
    if confirm("Overwrite? [y/N]: ")? {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled, existing file not overwritten".to_string(),
        ))
    }
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{prompt}");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
