//! Compiling a directory of YAML system definitions into fixture rows.
//!
//! Files are processed in lexicographic path order so the fixture is
//! reproducible. A document is validated in full before any of its rows
//! are emitted: a rejected document consumes no primary keys, so the pk
//! sequence in the output never has gaps.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::doc::SystemDoc;
use crate::error::{FixtureError, FixtureResult};
use crate::record::{Fields, OperationFields, Record, SystemFields, OPERATION_MODEL, SYSTEM_MODEL};

/// A per-file problem. The file is skipped; compilation continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The definition file with the problem.
    pub file: PathBuf,
    /// What is wrong.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// The outcome of one compilation run.
#[derive(Debug, Clone, Default)]
pub struct CompileResult {
    /// The fixture rows, pk-ordered.
    pub records: Vec<Record>,
    /// Problems found in skipped files.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileResult {
    /// Whether any definition file was rejected.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// How many system rows were emitted.
    pub fn system_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.model == SYSTEM_MODEL)
            .count()
    }

    /// How many operation rows were emitted.
    pub fn operation_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.model == OPERATION_MODEL)
            .count()
    }
}

/// Compile every `.yaml`/`.yml` file under `dir` into fixture rows.
///
/// Files that do not parse, or that carry a malformed definition, produce
/// a [`Diagnostic`] and are skipped. Files without a top-level `system`
/// key are not definitions at all and are skipped silently. Only failure
/// to list the directory is fatal.
pub fn compile_dir(dir: &Path) -> FixtureResult<CompileResult> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| FixtureError::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml" | "yml")
            )
        })
        .collect();
    paths.sort();

    let mut result = CompileResult::default();
    let mut pk = 1u32;

    for path in paths {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                result.diagnostics.push(Diagnostic {
                    file: path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        let value: serde_yaml::Value = match serde_yaml::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                result.diagnostics.push(Diagnostic {
                    file: path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        // Not a definition file at all; ignore without complaint.
        if value.get("system").is_none() {
            continue;
        }
        let doc: SystemDoc = match serde_yaml::from_value(value) {
            Ok(doc) => doc,
            Err(err) => {
                result.diagnostics.push(Diagnostic {
                    file: path,
                    message: err.to_string(),
                });
                continue;
            }
        };
        match compile_doc(&doc, pk) {
            Ok(rows) => {
                pk += rows.len() as u32;
                result.records.extend(rows);
            }
            Err(message) => {
                result.diagnostics.push(Diagnostic { file: path, message });
            }
        }
    }

    Ok(result)
}

/// Compile one validated document into rows starting at `first_pk`.
/// Returns a message instead if the document is malformed; nothing is
/// emitted in that case.
fn compile_doc(doc: &SystemDoc, first_pk: u32) -> Result<Vec<Record>, String> {
    let Some(header) = &doc.system else {
        return Err("\"system\" block is empty".to_string());
    };
    for (i, entry) in doc.order.iter().enumerate() {
        if entry.len() != 1 {
            return Err(format!(
                "order entry {i} must have exactly one operation, found {}",
                entry.len()
            ));
        }
    }

    let system_pk = first_pk;
    let mut rows = vec![Record {
        model: SYSTEM_MODEL,
        pk: system_pk,
        fields: Fields::System(SystemFields {
            name: header.name.clone(),
            edition: header.edition.clone(),
            copyright: header.copyright.clone(),
            publisher: header.publisher.clone(),
        }),
    }];

    let mut pk = system_pk + 1;
    for (i, entry) in doc.order.iter().enumerate() {
        let Some((name, alias)) = entry.iter().next() else {
            return Err(format!("order entry {i} is empty"));
        };
        rows.push(Record {
            model: OPERATION_MODEL,
            pk,
            fields: Fields::Operation(OperationFields {
                name: name.clone(),
                alias: alias.clone(),
                previous: (i > 0).then_some(pk - 1),
                system: system_pk,
            }),
        });
        pk += 1;
    }

    Ok(rows)
}

/// Write compiled rows as pretty-printed JSON, creating parent
/// directories as needed.
pub fn write_fixture(records: &[Record], path: &Path) -> FixtureResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| FixtureError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}
