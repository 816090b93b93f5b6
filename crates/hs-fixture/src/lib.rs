//! YAML system definitions compiled into JSON seed fixtures.
//!
//! Rule authors describe a game system in one YAML file: a `system:`
//! identity block and an ordered `order:` list of character-creation
//! steps. [`compiler::compile_dir`] turns a directory of such files into
//! pk-sequential fixture rows, and [`ingest::load_compendium`] loads rows
//! back into an [`hs_core::Compendium`] for validation.

pub mod compiler;
pub mod doc;
pub mod error;
pub mod ingest;
pub mod record;

pub use compiler::{compile_dir, write_fixture, CompileResult, Diagnostic};
pub use error::{FixtureError, FixtureResult};
pub use ingest::load_compendium;
pub use record::{Fields, OperationFields, Record, SystemFields, OPERATION_MODEL, SYSTEM_MODEL};
