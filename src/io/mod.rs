pub mod file;
pub mod json_export;
pub mod json_import;

pub use file::{default_storage_path, load_snapshot, save_snapshot, StorageError};
pub use json_export::{export_json, EXPORT_FORMAT_VERSION};
pub use json_import::{import_file, import_json, ImportError};
