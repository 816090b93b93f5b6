//! Subcommand handlers.

use std::path::Path;

use hs_fixture::CompileResult;

pub mod check;
pub mod roll;
pub mod seed;

/// Compile a definitions directory, echoing per-file problems to stderr.
fn compile(dir: &Path) -> Result<CompileResult, String> {
    let result = hs_fixture::compile_dir(dir).map_err(|err| err.to_string())?;
    for diagnostic in &result.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    Ok(result)
}
