pub mod reporter;

pub use reporter::{JsonReporter, ReportSink};
