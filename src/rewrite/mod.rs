//! Alias rewriting
//!
//! - [`patterns`]: where module-reference literals are found in a file
//! - [`resolver`]: which file an alias-prefixed literal points at
//! - [`rewriter`]: per-file text rewriting
//! - [`engine`]: the run over the whole output tree

pub mod engine;
pub mod paths;
pub mod patterns;
pub mod resolver;
pub mod rewriter;

pub use engine::Replacer;
pub use resolver::{AliasResolver, Resolution};
pub use rewriter::rewrite_references;
