//! Field validator: one pure rule per field kind
//!
//! - Email: one `@`, non-empty local part, domain containing a `.`
//!   (conservative pattern, not RFC 5322)
//! - Tel: at least 8 of digits, spaces, `+`, `-`, `(`, `)`
//! - Text / Required: non-empty after trimming

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{FieldKind, FormField, Validation};

lazy_static! {
    static ref RE_EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref RE_TEL: Regex = Regex::new(r"^[0-9 +\-()]{8,}$").unwrap();
}

pub const MSG_REQUIRED: &str = "Este campo es obligatorio.";
pub const MSG_EMAIL: &str = "Introduce un correo válido (ej. nombre@dominio.com).";
pub const MSG_TEL: &str =
    "Introduce un teléfono válido (mínimo 8 caracteres: dígitos, espacios, +, -, paréntesis).";

/// Validate a field's current value
pub fn validate(field: &FormField) -> Validation {
    let value = field.raw_value.trim();
    if value.is_empty() {
        return Validation::fail(MSG_REQUIRED);
    }
    match field.kind {
        FieldKind::Email if !RE_EMAIL.is_match(value) => Validation::fail(MSG_EMAIL),
        FieldKind::Tel if !RE_TEL.is_match(value) => Validation::fail(MSG_TEL),
        _ => Validation::ok(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
