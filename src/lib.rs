// Licensed under the Apache-2.0 license

//! JSON register description to C accessor-header generator.
//!
//! This crate provides a code generator that converts a declarative JSON
//! description of hardware-register bitfields into C source fragments:
//! `#define` offset/mask constants and `static inline` get/set/unset
//! accessor functions.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use registers_header_gen::{generate_all_from_file, generate_functions_from_file, FunctionFilter};
//!
//! // Generate the full header text (constants + accessors)
//! let code = generate_all_from_file(Path::new("config.json"), None).unwrap();
//!
//! // Or only the accessors for selected fields of one register
//! let filter = FunctionFilter::new("ctrl", ["enable", "reset"]);
//! let code = generate_functions_from_file(
//!     Path::new("config.json"),
//!     Some(&filter),
//! ).unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`names`]: Identifier derivation (symbol stems, accessor names, mask literals)
//! - [`config`]: Run configuration and JSON config loading ([`GenConfig`], [`Backend`])
//! - [`descriptor`]: The bitfield descriptor model ([`FieldDescriptor`])
//! - [`error`]: Error taxonomy ([`GenError`])
//! - [`codegen`]: Generation driver and public API

pub mod config;
pub mod descriptor;
pub mod error;
pub mod names;

mod codegen;

// Re-export main public API
pub use codegen::{
    generate_all_from_file, generate_constants_from_file, generate_functions_from_file,
    FunctionFilter, Generator,
};
pub use config::{Backend, GenConfig, LoadedConfig};
pub use descriptor::FieldDescriptor;
pub use error::GenError;
pub use names::AccessorKind;
