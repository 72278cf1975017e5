// Licensed under the Apache-2.0 license

//! Run configuration and JSON config loading.
//!
//! A run is described by one JSON object:
//!
//! ```json
//! {
//!     "struct_name": "uart_regs",
//!     "var_name": "dev",
//!     "gen_type": "direct",
//!     "ofst_mask": [
//!         ["uart", "ctrl", "enable", 3, 1],
//!         ["uart", "status", "busy"]
//!     ]
//! }
//! ```
//!
//! `struct_name`, `var_name`, and `gen_type` are required. Each `ofst_mask`
//! row is one field descriptor; rows carrying only the three name parts are
//! reference-only placeholders and are skipped during generation.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::descriptor::FieldDescriptor;
use crate::error::GenError;

/// Access strategy used by the generated functions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Backend {
    /// Plain volatile struct-pointer dereference (user-space mappings).
    Direct,
    /// Byte-wise `ioread8`/`iowrite8` through an `__iomem` pointer
    /// (kernel-style drivers).
    MappedIo,
}

impl FromStr for Backend {
    type Err = GenError;

    /// `"user"` and `"linux"` are accepted as aliases so configs written for
    /// the original generator keep working.
    fn from_str(s: &str) -> Result<Self, GenError> {
        match s {
            "direct" | "user" => Ok(Backend::Direct),
            "mapped-io" | "linux" => Ok(Backend::MappedIo),
            other => Err(GenError::UnknownBackend {
                name: other.to_string(),
            }),
        }
    }
}

/// Immutable per-run configuration.
#[derive(Clone, Debug)]
pub struct GenConfig {
    /// C struct type representing the register block.
    pub struct_name: String,
    /// Parameter name used inside generated functions.
    pub var_name: String,
    /// Selected access strategy.
    pub backend: Backend,
}

/// A parsed configuration: the run config plus the ordered descriptor list.
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub config: GenConfig,
    pub descriptors: Vec<FieldDescriptor>,
}

/// Raw JSON shape before required-field and row validation.
#[derive(Deserialize)]
struct RawConfig {
    struct_name: Option<String>,
    var_name: Option<String>,
    gen_type: Option<String>,
    #[serde(default)]
    ofst_mask: Vec<Value>,
}

impl LoadedConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse and validate configuration text.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let raw: RawConfig = serde_json::from_str(text)?;

        let struct_name = require(raw.struct_name, "struct_name")?;
        let var_name = require(raw.var_name, "var_name")?;
        let gen_type = require(raw.gen_type, "gen_type")?;
        let backend = Backend::from_str(&gen_type)?;

        let mut descriptors = Vec::new();
        for row in &raw.ofst_mask {
            if let Some(descriptor) = parse_row(row)? {
                descriptors.push(descriptor);
            }
        }

        Ok(LoadedConfig {
            config: GenConfig {
                struct_name,
                var_name,
                backend,
            },
            descriptors,
        })
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, GenError> {
    value.ok_or(GenError::MissingConfiguration { field })
}

/// Parse one `ofst_mask` row.
///
/// Returns `Ok(None)` for the 3-element reference-only placeholder form.
fn parse_row(row: &Value) -> Result<Option<FieldDescriptor>, GenError> {
    let malformed = |detail: String| GenError::MalformedDescriptor { detail };
    let items = row
        .as_array()
        .ok_or_else(|| malformed(format!("row {row} is not an array")))?;

    let name = |idx: usize, what: &str| -> Result<&str, GenError> {
        items[idx]
            .as_str()
            .ok_or_else(|| malformed(format!("row {row}: {what} is not a string")))
    };

    match items.len() {
        3 => {
            // Placeholder: names only, nothing to generate from.
            let base = name(0, "base")?;
            let register = name(1, "register")?;
            let field = name(2, "field")?;
            debug!("skipping reference-only descriptor {base}/{register}/{field}");
            Ok(None)
        }
        5 => {
            let base = name(0, "base")?;
            let register = name(1, "register")?;
            let field = name(2, "field")?;
            FieldDescriptor::from_raw(base, register, field, &items[3], &items[4]).map(Some)
        }
        n => Err(malformed(format!(
            "row {row} has {n} elements (expected 5, or 3 for a placeholder)"
        ))),
    }
}
