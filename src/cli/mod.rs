pub mod commands;
pub mod ui;

pub use commands::replace::ReplaceOptions;
pub use ui::Output;
