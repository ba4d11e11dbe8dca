//! Per-file reference rewriting
//!
//! Pure with respect to other files: reads only the alias targets on disk.

use std::path::Path;

use tracing::{debug, warn};

use super::patterns::{reference_patterns, replace_literals};
use super::resolver::{AliasResolver, Resolution};
use crate::types::FileOutcome;

/// Rewrite every alias-prefixed module reference in `text`.
///
/// The call-style pass runs first and the statement-style pass runs over its
/// output. A literal already rewritten to a relative path no longer carries an
/// alias prefix, so the second pass leaves it alone.
pub fn rewrite_references(text: &str, out_file: &Path, resolver: &AliasResolver) -> FileOutcome {
    let mut replacements = Vec::new();
    let mut unresolved = Vec::new();

    let mut current = text.to_string();
    for pattern in reference_patterns() {
        current = replace_literals(&current, pattern, |module_path| {
            match resolver.resolve(module_path, out_file) {
                Resolution::NotAliased => None,
                Resolution::Resolved(reference) => {
                    debug!(
                        "{}: '{}' -> '{}'",
                        out_file.display(),
                        module_path,
                        reference
                    );
                    replacements.push((module_path.to_string(), reference.clone()));
                    Some(reference)
                }
                Resolution::Unresolved => {
                    warn!(
                        "Unresolved alias '{}' in {}",
                        module_path,
                        out_file.display()
                    );
                    unresolved.push(module_path.to_string());
                    None
                }
            }
        });
    }

    let changed = current != text;
    FileOutcome {
        text: current,
        replacements,
        unresolved,
        changed,
    }
}
