use super::formula::{Formula, Seed, Step};
use crate::transport::Triplet;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn push_hex(out: &mut String, val: u8) {
    out.push(HEX_DIGITS[usize::from(val >> 4)] as char);
    out.push(HEX_DIGITS[usize::from(val & 0x0f)] as char);
}

/// `0x` + code, A and B as lowercase hex pairs
pub fn hex_dump(t: Triplet) -> String {
    let mut out = String::with_capacity(8);
    out.push_str("0x");
    push_hex(&mut out, t.code);
    push_hex(&mut out, t.a);
    push_hex(&mut out, t.b);
    out
}

fn fixed(value: f32, digits: u8) -> String {
    format!("{:.*}", usize::from(digits), value)
}

impl Seed {
    fn eval(self, a: u8, b: u8) -> f32 {
        let (af, bf) = (f64::from(a), f64::from(b));
        match self {
            Seed::Product => f64::from(u32::from(a) * u32::from(b)) as f32,
            Seed::A => af as f32,
            Seed::B => bf as f32,
            Seed::Word => (af * 256.0 + bf) as f32,
            Seed::Offset(offset) => (bf - offset) as f32,
            Seed::IntOffsetProduct(offset) => (i32::from(a) * (i32::from(b) - offset)) as f32,
            Seed::Linear { a_div, b_factor } => (af / a_div + b_factor * bf) as f32,
        }
    }
}

impl Step {
    fn apply(self, x: f32, a: u8, b: u8) -> f32 {
        let (x, af, bf) = (f64::from(x), f64::from(a), f64::from(b));
        let y = match self {
            Step::Mul(k) => x * k,
            Step::Div(k) => x / k,
            Step::Add(k) => x + k,
            Step::MulA => x * af,
            Step::DivA if a == 0 => x,
            Step::DivA => x / af,
            Step::AddA(k) => x + af * k,
            Step::AddB(k) => x + bf * k,
            Step::MulBOffset(k) => x * (bf - k),
            Step::Abs => x.abs(),
        };
        y as f32
    }
}

fn printable(byte: u8) -> char {
    match byte {
        b';' => '.',
        0x20..=0x7e => byte as char,
        _ => '.',
    }
}

fn bit_field(mask: u8, bits: u8) -> String {
    (0..8)
        .rev()
        .map(|bit| {
            let m = 1u8 << bit;
            if mask & m == 0 {
                'X'
            } else if bits & m != 0 {
                '1'
            } else {
                '0'
            }
        })
        .collect()
}

fn state_label(b: u8) -> Option<&'static str> {
    let label = match b {
        0x00 => "-",
        0x02 => "ADP OK",
        0x05 => "Idle",
        0x06 => "Partial thr",
        0x07 => "WOT",
        0x08 => "Enrichment",
        0x09 => "Deceleration",
        0x0E => "A/C low",
        0x10 => "Compr. OFF",
        0xD6 => "Htg. S1 0xD6",
        0xD7 => "Htg. S1 0xD7",
        0xD9 => "Htg. S2 0xD9",
        0xEB => "Test OFF",
        _ => return None,
    };
    Some(label)
}

impl Formula {
    /// Render the value of one triplet. Never fails.
    pub fn render(&self, t: Triplet) -> String {
        let (ai, bi) = (i32::from(t.a), i32::from(t.b));

        match *self {
            Formula::IntProduct { div } => (u32::from(t.a) * u32::from(t.b) / div).to_string(),
            Formula::IntAbsOffset { offset, div } => ((bi - offset).abs() * ai / div).to_string(),
            Formula::IntOffset { offset, div } => (ai * (bi - offset) / div).to_string(),
            Formula::IntProductLessA { div } => (ai * bi / div - ai).to_string(),
            Formula::Difference => (bi - ai).to_string(),
            Formula::Sum => (ai + bi).to_string(),
            Formula::IntWord => (ai * 256 + bi).to_string(),
            Formula::Percent => {
                if t.a == 0 {
                    (100 * bi).to_string()
                } else {
                    (100 * bi / ai).to_string()
                }
            }
            Formula::Float {
                seed,
                steps,
                digits,
            } => {
                let value = steps
                    .iter()
                    .fold(seed.eval(t.a, t.b), |x, step| step.apply(x, t.a, t.b));
                fixed(value, digits)
            }
            Formula::BitField => bit_field(t.a, t.b),
            Formula::Ascii { suffix } => {
                let mut out = String::with_capacity(2 + suffix.len());
                out.push(printable(t.a));
                out.push(printable(t.b));
                out.push_str(suffix);
                out
            }
            Formula::HourMinute => format!("{}:{}", t.a, t.b),
            Formula::Warmup => {
                if t.b == 0 {
                    "COLD".to_string()
                } else {
                    "WARM".to_string()
                }
            }
            Formula::State => match state_label(t.b) {
                Some(label) => label.to_string(),
                None => format!("0x{:02x}", t.b),
            },
            Formula::HexDump => hex_dump(t),
        }
    }
}
