// Licensed under the Apache-2.0 license

//! Backend emitters: render one accessor function as C source text.
//!
//! The two backends produce functions with identical names and identical
//! operation semantics; they differ only in how the register value is read
//! and written. The direct backend performs an ordinary read-modify-write
//! against a `volatile` struct pointer; the mapped-I/O backend routes every
//! access through `ioread8`/`iowrite8` on an `__iomem` pointer, computing
//! the modified value in a local before the store. The indent styles (four
//! spaces vs. tab) follow the conventions of the code each backend is meant
//! to live in.

use std::fmt::Write;

use crate::config::{Backend, GenConfig};
use crate::descriptor::FieldDescriptor;
use crate::names::{function_name, mask_symbol, offset_symbol, AccessorKind};

/// Render one accessor function, terminated by its closing brace line.
pub(super) fn accessor(config: &GenConfig, descriptor: &FieldDescriptor, kind: AccessorKind) -> String {
    let fn_name = function_name(kind, descriptor);
    let mask = mask_symbol(descriptor);
    let ofst = offset_symbol(descriptor);
    let access = format!("{}->{}", config.var_name, descriptor.register());
    let var_decl = format!("struct {} *{}", config.struct_name, config.var_name);

    let mut out = String::new();
    match config.backend {
        Backend::Direct => {
            match kind {
                AccessorKind::Get => {
                    writeln!(out, "static inline uint8_t {fn_name}(volatile {var_decl}) {{")
                        .unwrap();
                    writeln!(out, "    return ({access} & {mask}) >> {ofst};").unwrap();
                }
                AccessorKind::Set => {
                    writeln!(out, "static inline void {fn_name}(volatile {var_decl}) {{").unwrap();
                    writeln!(out, "    {access} |= {mask};").unwrap();
                }
                AccessorKind::Unset => {
                    writeln!(out, "static inline void {fn_name}(volatile {var_decl}) {{").unwrap();
                    writeln!(out, "    {access} &= ~{mask};").unwrap();
                }
            }
            writeln!(out, "}}").unwrap();
        }
        Backend::MappedIo => {
            match kind {
                AccessorKind::Get => {
                    writeln!(out, "static inline uint8_t {fn_name}(__iomem {var_decl}) {{")
                        .unwrap();
                    writeln!(out, "\treturn (ioread8(&{access}) & {mask}) >> {ofst};").unwrap();
                }
                AccessorKind::Set => {
                    writeln!(out, "static inline void {fn_name}(__iomem {var_decl}) {{").unwrap();
                    writeln!(out, "\tuint8_t new_value = ioread8(&{access}) | {mask};").unwrap();
                    writeln!(out, "\tiowrite8(new_value, &{access});").unwrap();
                }
                AccessorKind::Unset => {
                    writeln!(out, "static inline void {fn_name}(__iomem {var_decl}) {{").unwrap();
                    writeln!(out, "\tuint8_t new_value = ioread8(&{access}) & ~{mask};").unwrap();
                    writeln!(out, "\tiowrite8(new_value, &{access});").unwrap();
                }
            }
            writeln!(out, "}}").unwrap();
        }
    }
    out
}
