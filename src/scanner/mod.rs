pub mod file_scanner;

pub use file_scanner::{OutputScanner, ScannedFile};
