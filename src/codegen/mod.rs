// Licensed under the Apache-2.0 license

//! Generation driver and public entry points.
//!
//! A [`Generator`] owns the run configuration and the ordered descriptor
//! list, both immutable. Output is always fully buffered into a `String`;
//! nothing reaches stdout until a whole run has succeeded, so a failing run
//! emits no partial text.
//!
//! The implementation is split across submodules:
//! - `emit`: per-descriptor backend emitters

mod emit;

use std::fmt::Write;
use std::fs;
use std::path::Path;

use log::debug;

use crate::config::{GenConfig, LoadedConfig};
use crate::descriptor::FieldDescriptor;
use crate::error::GenError;
use crate::names::{mask_literal, offset_symbol, qualified_name, AccessorKind};

/// Restricts function emission to named fields of one register.
#[derive(Clone, Debug, Default)]
pub struct FunctionFilter {
    register: String,
    fields: Vec<String>,
}

impl FunctionFilter {
    pub fn new<I, S>(register: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            register: register.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// A descriptor passes iff its register matches and its field is one of
    /// the requested fields. An empty field list matches nothing.
    pub fn matches(&self, descriptor: &FieldDescriptor) -> bool {
        descriptor.register() == self.register
            && self.fields.iter().any(|f| f == descriptor.field())
    }
}

/// The generation driver: immutable config plus ordered descriptors.
pub struct Generator {
    config: GenConfig,
    descriptors: Vec<FieldDescriptor>,
}

impl Generator {
    pub fn new(config: GenConfig, descriptors: Vec<FieldDescriptor>) -> Self {
        Self {
            config,
            descriptors,
        }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Offset/mask `#define` pairs for every descriptor, in insertion order.
    ///
    /// The mask constant expands to `((1 << mask_width) - 1) << shift`, the
    /// shift applied via the `_OFST` constant.
    pub fn emit_constants(&self) -> String {
        let mut out = String::new();
        for descriptor in &self.descriptors {
            let name = qualified_name(descriptor);
            let ofst = offset_symbol(descriptor);
            let mask = mask_literal(descriptor.mask_width());
            writeln!(out, "#define {ofst} ({})", descriptor.shift()).unwrap();
            writeln!(out, "#define {name}_MASK ({mask} << {ofst})").unwrap();
            writeln!(out).unwrap();
        }
        out
    }

    /// Get/set/unset functions for every descriptor passing `filter`, in
    /// insertion order; get, set, unset per descriptor, in that order.
    ///
    /// A filter that matches nothing yields empty output, not an error.
    pub fn emit_functions(&self, filter: Option<&FunctionFilter>) -> String {
        let mut out = String::new();
        for descriptor in &self.descriptors {
            if let Some(filter) = filter {
                if !filter.matches(descriptor) {
                    debug!(
                        "filter skips {}/{}/{}",
                        descriptor.base(),
                        descriptor.register(),
                        descriptor.field()
                    );
                    continue;
                }
            }
            for kind in AccessorKind::ALL {
                out.push_str(&emit::accessor(&self.config, descriptor, kind));
                out.push('\n');
            }
        }
        out
    }

    /// Optional verbatim prelude, then all constants, then all functions.
    ///
    /// Fails with [`GenError::PreludeUnreadable`] before producing any output
    /// if the prelude file cannot be read.
    pub fn emit_all(&self, prelude: Option<&Path>) -> Result<String, GenError> {
        let mut out = String::new();
        if let Some(path) = prelude {
            let text = fs::read_to_string(path).map_err(|source| GenError::PreludeUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
            out.push_str(&text);
            out.push('\n');
        }
        out.push_str(&self.emit_constants());
        out.push_str(&self.emit_functions(None));
        Ok(out)
    }
}

/// Generate the offset/mask constants from a config file.
pub fn generate_constants_from_file(config_path: &Path) -> anyhow::Result<String> {
    let loaded = LoadedConfig::load(config_path)?;
    Ok(Generator::new(loaded.config, loaded.descriptors).emit_constants())
}

/// Generate accessor functions from a config file, optionally filtered.
pub fn generate_functions_from_file(
    config_path: &Path,
    filter: Option<&FunctionFilter>,
) -> anyhow::Result<String> {
    let loaded = LoadedConfig::load(config_path)?;
    Ok(Generator::new(loaded.config, loaded.descriptors).emit_functions(filter))
}

/// Generate the complete header text from a config file: optional prelude,
/// constants, then all functions.
pub fn generate_all_from_file(
    config_path: &Path,
    prelude: Option<&Path>,
) -> anyhow::Result<String> {
    let loaded = LoadedConfig::load(config_path)?;
    Ok(Generator::new(loaded.config, loaded.descriptors).emit_all(prelude)?)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
