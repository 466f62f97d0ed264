//! Measurement block decoding
//!
//! A measurement block holds four (type code, A, B) triplets. The type code
//! selects both the formula that turns A and B into a physical value and the
//! unit of that value. Both lookups share one table (see [`formula::lookup`]).
//!
//! Decoding is pure and infallible: a code without a formula renders as a
//! hex dump of its three bytes with an empty unit.

use crate::transport::{MeasurementBlock, Triplet};

pub mod formula;
mod render;

pub use formula::{Formula, FormulaEntry, Seed, Step, lookup};
pub use render::hex_dump;

/// Longest value text any formula produces
pub const MAX_FIELD_LEN: usize = 12;

/// Longest unit text in the table
pub const MAX_UNIT_LEN: usize = 7;

/// Value text of a single triplet (without delimiter)
pub fn decode_value(t: Triplet) -> String {
    lookup(t.code).formula.render(t)
}

/// Unit of a type code; empty when none is assigned
pub fn unit_for(code: u8) -> &'static str {
    lookup(code).unit
}

/// Decode all four triplets, each value followed by `;`
pub fn decode_values(block: &MeasurementBlock) -> String {
    let mut out = String::with_capacity(4 * (MAX_FIELD_LEN + 1));
    for t in block.triplets() {
        out.push_str(&decode_value(t));
        out.push(';');
    }
    out
}

/// Units of all four triplets, each followed by `;`
pub fn decode_units(block: &MeasurementBlock) -> String {
    let mut out = String::with_capacity(4 * (MAX_UNIT_LEN + 1));
    for t in block.triplets() {
        out.push_str(unit_for(t.code));
        out.push(';');
    }
    out
}
