// Licensed under the Apache-2.0 license

//! Error taxonomy for configuration loading and code generation.
//!
//! Every variant is fatal for the current run: the tool either produces the
//! complete output text or none of it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// A descriptor row could not be interpreted (wrong arity, non-string
    /// names, or a shift/mask width that is not a non-negative integer).
    #[error("malformed descriptor: {detail}")]
    MalformedDescriptor { detail: String },

    /// The configuration names a backend other than the recognized variants.
    #[error("unknown backend {name:?} (expected \"direct\" or \"mapped-io\")")]
    UnknownBackend { name: String },

    /// A required configuration key is absent.
    #[error("missing required configuration key {field:?}")]
    MissingConfiguration { field: &'static str },

    /// The prelude file could not be opened or read.
    #[error("cannot read prelude file {}: {source}", path.display())]
    PreludeUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
