//! `hs seed`: compile definitions and write the seed fixture.

use std::path::Path;

use hs_fixture::write_fixture;

/// Compile `dir` and write the fixture to `output`.
///
/// Rejected definition files are reported on stderr but do not fail the
/// run; the fixture is written from whatever compiled cleanly.
pub fn run(dir: &Path, output: &Path) -> Result<(), String> {
    let result = super::compile(dir)?;
    write_fixture(&result.records, output).map_err(|err| err.to_string())?;
    println!(
        "wrote {} systems and {} operations to {}",
        result.system_count(),
        result.operation_count(),
        output.display()
    );
    if result.has_errors() {
        println!("skipped {} file(s) with problems", result.diagnostics.len());
    }
    Ok(())
}
