//! Type-code table: one tagged formula and one unit per known code

use Step::{Abs, Add, AddA, AddB, Div, DivA, Mul, MulA, MulBOffset};

/// Starting value of a float formula, stored single precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seed {
    /// `a*b`
    Product,
    A,
    B,
    /// `a*256 + b`
    Word,
    /// `b - offset`
    Offset(f64),
    /// `a * (b - offset)` in integer space
    IntOffsetProduct(i32),
    /// `a/a_div + b*b_factor` as one expression
    Linear { a_div: f64, b_factor: f64 },
}

/// One statement of a float formula.
///
/// Every step is computed in double precision and the result is stored
/// back as `f32` before the next step runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Mul(f64),
    Div(f64),
    Add(f64),
    /// `* a`
    MulA,
    /// `/ a`, skipped when `a == 0`
    DivA,
    /// `+ a*k`
    AddA(f64),
    /// `+ b*k`
    AddB(f64),
    /// `* (b - k)`
    MulBOffset(f64),
    Abs,
}

/// How a (A, B) operand pair becomes a value.
///
/// `Int*` variants and the word/sum/difference forms work in integer space
/// with truncating division. `Float` values are rendered with `digits`
/// decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formula {
    /// `a*b / div`
    IntProduct { div: u32 },
    /// `|b - offset| * a / div`
    IntAbsOffset { offset: i32, div: i32 },
    /// `a * (b - offset) / div`, signed
    IntOffset { offset: i32, div: i32 },
    /// `a*b / div - a`, signed
    IntProductLessA { div: i32 },
    /// `b - a`
    Difference,
    /// `a + b`
    Sum,
    /// `a*256 + b`
    IntWord,
    /// `100*b / a`, or `100*b` when `a == 0`
    Percent,
    /// `seed` followed by `steps`, each rounded to `f32`
    Float {
        seed: Seed,
        steps: &'static [Step],
        digits: u8,
    },
    /// Per-bit view of B masked by A
    BitField,
    /// A and B as characters, then `suffix`
    Ascii { suffix: &'static str },
    /// `a:b`
    HourMinute,
    /// COLD when B is zero, WARM otherwise
    Warmup,
    /// Named operating state selected by B
    State,
    /// `0x` followed by code, A and B in hex
    HexDump,
}

/// Formula and unit for one type code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaEntry {
    pub formula: Formula,
    pub unit: &'static str,
}

const fn entry(formula: Formula, unit: &'static str) -> FormulaEntry {
    FormulaEntry { formula, unit }
}

const fn float(
    seed: Seed,
    steps: &'static [Step],
    digits: u8,
    unit: &'static str,
) -> FormulaEntry {
    entry(
        Formula::Float {
            seed,
            steps,
            digits,
        },
        unit,
    )
}

/// Table entry for `code`. Codes without a known formula dump their bytes
/// in hex; a few of them still carry a unit.
pub fn lookup(code: u8) -> FormulaEntry {
    match code {
        1 => entry(Formula::IntProduct { div: 5 }, "rpm"),
        2 => float(Seed::Product, &[Mul(0.002)], 1, "%"),
        3 => float(Seed::Product, &[Mul(0.002)], 1, "deg"),
        // ATDC above 127, BTDC below
        4 => entry(Formula::IntAbsOffset { offset: 127, div: 100 }, ""),
        5 => entry(Formula::IntOffset { offset: 100, div: 10 }, "degC"),
        6 => float(Seed::Product, &[Mul(0.001)], 2, "V"),
        7 => entry(Formula::IntProduct { div: 100 }, "km/h"),
        8 => float(Seed::Product, &[Mul(0.1)], 1, ""),
        9 => float(Seed::Offset(127.0), &[MulA, Mul(0.02)], 1, "deg"),
        10 => entry(Formula::Warmup, ""),
        11 => float(Seed::Offset(128.0), &[MulA, Mul(0.0001), Add(1.0)], 2, ""),
        12 => float(Seed::Product, &[Mul(0.001)], 2, "ohm"),
        13 => float(Seed::Offset(127.0), &[MulA, Mul(0.001)], 1, "mm"),
        14 => float(Seed::Product, &[Mul(0.005)], 1, "bar"),
        15 => float(Seed::Product, &[Mul(0.01)], 2, "ms"),
        16 => entry(Formula::BitField, "bitval"),
        17 => entry(Formula::Ascii { suffix: "" }, ""),
        18 => entry(Formula::IntProduct { div: 25 }, "mbar"),
        19 => float(Seed::Product, &[Mul(0.01)], 2, "l"),
        20 => float(Seed::IntOffsetProduct(128), &[Div(128.0)], 2, "%"),
        21 => float(Seed::Product, &[Mul(0.001)], 2, "V"),
        22 => float(Seed::Product, &[Mul(0.001)], 2, "ms"),
        23 => float(Seed::B, &[Div(256.0), MulA], 1, "%"),
        24 => float(Seed::Product, &[Mul(0.001)], 2, "A"),
        25 => float(
            Seed::Linear {
                a_div: 182.0,
                b_factor: 1.421,
            },
            &[],
            2,
            "g/s",
        ),
        26 => entry(Formula::Difference, "C"),
        27 => float(Seed::Offset(128.0), &[Abs, MulA, Mul(0.01)], 1, "deg"),
        28 => entry(Formula::Difference, ""),
        30 => float(Seed::B, &[Div(12.0), MulA], 1, "deg k/w"),
        31 => float(Seed::B, &[Div(2560.0), MulA], 1, "degC"),
        33 => entry(Formula::Percent, "%"),
        34 => float(Seed::Offset(128.0), &[MulA, Mul(0.01)], 1, "deg"),
        35 => float(Seed::Product, &[Mul(0.01)], 1, "l/h"),
        36 => entry(Formula::HexDump, "km"),
        37 => entry(Formula::State, "state"),
        38 => float(Seed::Offset(128.0), &[MulA, Mul(0.001)], 1, "deg k/w"),
        39 => float(Seed::B, &[Div(256.0), MulA], 1, "mg/h"),
        40 => entry(Formula::HexDump, "A"),
        41 => entry(Formula::HexDump, "Ah"),
        42 => entry(Formula::HexDump, "Kw"),
        43 => float(Seed::B, &[Mul(0.1), AddA(25.5)], 2, "V"),
        44 => entry(Formula::HourMinute, "h:m"),
        45 => float(Seed::Product, &[Div(1000.0)], 3, ""),
        46 => float(Seed::Product, &[Add(-3200.0), Mul(0.0027)], 1, "deg k/w"),
        47 => entry(Formula::IntOffset { offset: 128, div: 1 }, "ms"),
        48 => entry(Formula::IntWord, ""),
        49 => float(Seed::B, &[Div(4.0), MulA, Mul(0.1)], 1, "mg/h"),
        50 => float(Seed::Offset(128.0), &[Div(0.01), DivA], 1, "mbar"),
        51 => float(Seed::Offset(128.0), &[Div(255.0), MulA], 1, "mg/h"),
        52 => entry(Formula::IntProductLessA { div: 50 }, "Nm"),
        53 => float(Seed::Offset(128.0), &[Mul(1.4222), AddA(0.006)], 1, "g/s"),
        54 => entry(Formula::IntWord, "count"),
        55 => float(Seed::Product, &[Div(200.0)], 1, "s"),
        56 => entry(Formula::IntWord, "WSC"),
        57 => entry(Formula::HexDump, "WSC"),
        59 => float(Seed::Word, &[Div(32768.0)], 2, ""),
        60 => float(Seed::Word, &[Mul(0.01)], 1, "sec"),
        61 => float(Seed::Offset(128.0), &[DivA], 2, ""),
        62 => float(Seed::Product, &[Mul(0.256)], 1, "S"),
        63 => entry(Formula::Ascii { suffix: "?" }, ""),
        64 => entry(Formula::Sum, "ohm"),
        65 => float(Seed::A, &[Mul(0.01), MulBOffset(127.0)], 2, "mm"),
        66 => float(Seed::Product, &[Div(511.12)], 2, "V"),
        67 => float(Seed::A, &[Mul(640.0), AddB(2.5)], 1, "deg"),
        68 => float(Seed::Word, &[Div(7.365)], 2, "deg/s"),
        69 => float(Seed::Word, &[Mul(0.3254)], 2, "bar"),
        70 => float(Seed::Word, &[Mul(0.192)], 2, "m/s^2"),
        _ => entry(Formula::HexDump, ""),
    }
}

/// Whether `code` has a formula of its own
pub fn is_known(code: u8) -> bool {
    lookup(code).formula != Formula::HexDump
}
