//! `hs check`: validate definitions without writing anything.

use std::path::Path;

use hs_core::chain;
use hs_fixture::load_compendium;

/// Compile `dir`, load the rows back, and validate the operation chains.
/// Any problem at any stage fails the check.
pub fn run(dir: &Path) -> Result<(), String> {
    let result = super::compile(dir)?;
    let mut problems = result.diagnostics.len();

    let (compendium, issues) = load_compendium(&result.records);
    for issue in &issues {
        eprintln!("warning: {issue}");
    }
    problems += issues.len();

    let chain_issues = chain::validate(&compendium);
    for issue in &chain_issues {
        eprintln!("warning: {issue}");
    }
    problems += chain_issues.len();

    if problems > 0 {
        return Err(format!("{problems} problem(s) found"));
    }
    println!(
        "ok: {} systems, {} operations",
        result.system_count(),
        result.operation_count()
    );
    Ok(())
}
