// Licensed under the Apache-2.0 license

//! Identifier derivation and literal formatting.
//!
//! This module turns a [`FieldDescriptor`] into the C identifiers the
//! generated header uses: the uppercase symbol stem (`UART_CTRL_ENABLE`),
//! the `_OFST`/`_MASK` constant names, and the lowercase accessor function
//! names. Everything here is pure string formatting with no error cases.

use crate::descriptor::FieldDescriptor;

/// The three accessor operations emitted for every descriptor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessorKind {
    Get,
    Set,
    Unset,
}

impl AccessorKind {
    /// All kinds, in emission order.
    pub const ALL: [AccessorKind; 3] = [AccessorKind::Get, AccessorKind::Set, AccessorKind::Unset];

    /// The function-name prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::Unset => "unset",
        }
    }
}

/// Canonical uppercase symbol stem: `UPPER(base)_UPPER(register)_UPPER(field)`.
///
/// # Examples
/// ```
/// use registers_header_gen::FieldDescriptor;
/// use registers_header_gen::names::qualified_name;
/// let d = FieldDescriptor::new("uart", "ctrl", "enable", 3, 1).unwrap();
/// assert_eq!(qualified_name(&d), "UART_CTRL_ENABLE");
/// ```
pub fn qualified_name(descriptor: &FieldDescriptor) -> String {
    format!(
        "{}_{}_{}",
        descriptor.base().to_ascii_uppercase(),
        descriptor.register().to_ascii_uppercase(),
        descriptor.field().to_ascii_uppercase()
    )
}

/// Name of the bit-offset constant (`..._OFST`).
pub fn offset_symbol(descriptor: &FieldDescriptor) -> String {
    qualified_name(descriptor) + "_OFST"
}

/// Name of the mask constant (`..._MASK`).
pub fn mask_symbol(descriptor: &FieldDescriptor) -> String {
    qualified_name(descriptor) + "_MASK"
}

/// Accessor function name: `<prefix>_<lowercase stem>`.
pub fn function_name(kind: AccessorKind, descriptor: &FieldDescriptor) -> String {
    format!(
        "{}_{}",
        kind.prefix(),
        qualified_name(descriptor).to_ascii_lowercase()
    )
}

/// C literal for an unshifted mask of `width` one-bits, `(1 << width) - 1`.
///
/// The shift into position happens in the generated `#define` via the
/// `_OFST` constant, so only the contiguous-ones value is rendered here.
pub fn mask_literal(width: u32) -> String {
    let value = if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    hex_const(value)
}

/// Formats an integer as a C constant: decimal for small values, hex with
/// underscore separators every 4 digits above 9.
fn hex_const(val: u64) -> String {
    if val <= 9 {
        return format!("{val}");
    }
    let digits: Vec<char> = format!("{val:x}").chars().collect();
    let mut out = String::from("0x");
    for (i, c) in digits.iter().enumerate() {
        if i != 0 && (digits.len() - i) % 4 == 0 {
            out.push('_');
        }
        out.push(*c);
    }
    out
}
