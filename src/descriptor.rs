// Licensed under the Apache-2.0 license

//! The bitfield descriptor model.
//!
//! A [`FieldDescriptor`] names one contiguous run of bits within a register
//! (`base`/`register`/`field`) together with its bit position (`shift`) and
//! width in bits (`mask_width`). Descriptors are immutable once constructed;
//! the generator consumes them in insertion order.

use serde_json::Value;

use crate::error::GenError;

/// One register bitfield: naming context plus bit layout.
///
/// `shift + mask_width` is not checked against the register width of the
/// selected backend; supplying a layout that fits the backend's access
/// granularity is the caller's responsibility.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    base: String,
    register: String,
    field: String,
    shift: u32,
    mask_width: u32,
}

impl FieldDescriptor {
    /// Construct a descriptor from already-typed values.
    ///
    /// Fails with [`GenError::MalformedDescriptor`] if `mask_width` is zero.
    pub fn new(
        base: impl Into<String>,
        register: impl Into<String>,
        field: impl Into<String>,
        shift: u32,
        mask_width: u32,
    ) -> Result<Self, GenError> {
        let descriptor = Self {
            base: base.into(),
            register: register.into(),
            field: field.into(),
            shift,
            mask_width,
        };
        if mask_width == 0 {
            return Err(GenError::MalformedDescriptor {
                detail: format!(
                    "{}/{}/{}: mask width must be positive",
                    descriptor.base, descriptor.register, descriptor.field
                ),
            });
        }
        Ok(descriptor)
    }

    /// Construct a descriptor from raw positional JSON values.
    ///
    /// `shift` and `mask_width` may arrive as JSON integers or as strings of
    /// decimal digits; anything else (negative numbers, floats, other types)
    /// is a [`GenError::MalformedDescriptor`].
    pub fn from_raw(
        base: &str,
        register: &str,
        field: &str,
        shift: &Value,
        mask_width: &Value,
    ) -> Result<Self, GenError> {
        let context = format!("{base}/{register}/{field}");
        let shift = parse_bit_count(shift, "shift", &context)?;
        let mask_width = parse_bit_count(mask_width, "mask width", &context)?;
        Self::new(base, register, field, shift, mask_width)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn register(&self) -> &str {
        &self.register
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Bit offset of the field's least-significant bit within the register.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// Number of contiguous bits occupied by the field.
    pub fn mask_width(&self) -> u32 {
        self.mask_width
    }
}

/// Interpret a raw JSON value as a non-negative bit count.
fn parse_bit_count(value: &Value, what: &str, context: &str) -> Result<u32, GenError> {
    let malformed = |detail: String| GenError::MalformedDescriptor { detail };
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                malformed(format!("{context}: {what} {n} is not a non-negative integer"))
            }),
        Value::String(s) => s.trim().parse::<u32>().map_err(|_| {
            malformed(format!("{context}: {what} {s:?} is not a non-negative integer"))
        }),
        other => Err(malformed(format!(
            "{context}: {what} has unsupported type ({other})"
        ))),
    }
}
