use kwlog::decoder::formula::is_known;
use kwlog::decoder::{decode_units, decode_value, decode_values, unit_for};
use kwlog::transport::{MeasurementBlock, Triplet};

fn value(code: u8, a: u8, b: u8) -> String {
    decode_value(Triplet { code, a, b })
}

#[test]
fn integer_formulas_truncate() {
    assert_eq!(value(1, 10, 100), "200");
    assert_eq!(value(7, 100, 50), "50");
    assert_eq!(value(18, 25, 40), "40");
    assert_eq!(value(4, 100, 27), "100");
    assert_eq!(value(48, 1, 2), "258");
    assert_eq!(value(54, 0, 7), "7");
    assert_eq!(value(64, 100, 50), "150");
}

#[test]
fn signed_formulas_keep_their_sign() {
    assert_eq!(value(5, 10, 180), "80");
    assert_eq!(value(5, 10, 50), "-50");
    assert_eq!(value(26, 10, 5), "-5");
    assert_eq!(value(47, 2, 100), "-56");
    assert_eq!(value(52, 10, 100), "10");
    assert_eq!(value(52, 200, 10), "-160");
}

#[test]
fn float_formulas_use_fixed_precision() {
    assert_eq!(value(6, 160, 88), "14.08");
    assert_eq!(value(11, 100, 128), "1.00");
    assert_eq!(value(20, 128, 192), "64.00");
    assert_eq!(value(30, 12, 10), "10.0");
    assert_eq!(value(45, 10, 25), "0.250");
    assert_eq!(value(59, 128, 0), "1.00");
    assert_eq!(value(60, 1, 0), "2.6");
}

#[test]
fn percent_guards_zero_divisor() {
    assert_eq!(value(33, 0, 3), "300");
    assert_eq!(value(33, 50, 25), "50");
}

#[test]
fn text_formulas() {
    assert_eq!(value(10, 0, 0), "COLD");
    assert_eq!(value(10, 0, 1), "WARM");
    assert_eq!(value(17, b'A', b'B'), "AB");
    assert_eq!(value(63, b'A', b'B'), "AB?");
    assert_eq!(value(44, 12, 5), "12:5");
    assert_eq!(value(16, 0xFF, 0x0F), "00001111");
}

#[test]
fn state_labels_with_hex_fallback() {
    assert_eq!(value(37, 0, 0x05), "Idle");
    assert_eq!(value(37, 0, 0x07), "WOT");
    assert_eq!(value(37, 0, 0x01), "0x01");
    assert_eq!(unit_for(37), "state");
}

#[test]
fn unknown_codes_dump_lowercase_hex() {
    assert_eq!(value(99, 0x10, 0x20), "0x631020");
    assert_eq!(value(0xAB, 0x0C, 0xFF), "0xab0cff");
    assert_eq!(value(36, 1, 2), "0x240102");
    assert_eq!(unit_for(36), "km");
}

#[test]
fn block_units_follow_type_codes() {
    let block = MeasurementBlock::new([1, 200, 20, 6, 160, 88, 18, 25, 40, 200, 0, 0]);
    assert_eq!(decode_values(&block), "800;14.08;40;0xc80000;");
    assert_eq!(decode_units(&block), "rpm;V;mbar;;");
}

// (code, a, b, value) with zero, full-scale and mid-range operands for every
// known code, plus pairs where a single final rounding would print a
// different last digit.
const VALUE_VECTORS: &[(u8, u8, u8, &str)] = &[
    (1, 0, 0, "0"),
    (1, 255, 255, "13005"),
    (1, 1, 1, "0"),
    (1, 200, 20, "800"),
    (2, 0, 0, "0.0"),
    (2, 255, 255, "130.1"),
    (2, 1, 1, "0.0"),
    (2, 200, 20, "8.0"),
    (3, 0, 0, "0.0"),
    (3, 255, 255, "130.1"),
    (3, 1, 1, "0.0"),
    (3, 200, 20, "8.0"),
    (4, 0, 0, "0"),
    (4, 255, 255, "326"),
    (4, 1, 1, "1"),
    (4, 200, 20, "214"),
    (4, 255, 127, "0"),
    (5, 0, 0, "0"),
    (5, 255, 255, "3952"),
    (5, 10, 50, "-50"),
    (5, 200, 20, "-1600"),
    (6, 0, 0, "0.00"),
    (6, 255, 255, "65.03"),
    (6, 1, 1, "0.00"),
    (6, 200, 20, "4.00"),
    (7, 0, 0, "0"),
    (7, 255, 255, "650"),
    (7, 1, 1, "0"),
    (7, 200, 20, "40"),
    (8, 0, 0, "0.0"),
    (8, 255, 255, "6502.5"),
    (8, 1, 1, "0.1"),
    (8, 200, 20, "400.0"),
    (9, 0, 0, "-0.0"),
    (9, 255, 255, "652.8"),
    (9, 1, 1, "-2.5"),
    (9, 200, 20, "-428.0"),
    (9, 0, 10, "-0.0"),
    (10, 0, 0, "COLD"),
    (10, 255, 255, "WARM"),
    (10, 1, 1, "WARM"),
    (10, 200, 20, "WARM"),
    (11, 0, 0, "1.00"),
    (11, 255, 255, "4.24"),
    (11, 1, 1, "0.99"),
    (11, 200, 20, "-1.16"),
    (11, 25, 10, "0.71"),
    (12, 0, 0, "0.00"),
    (12, 255, 255, "65.03"),
    (12, 1, 1, "0.00"),
    (12, 200, 20, "4.00"),
    (13, 0, 0, "-0.0"),
    (13, 255, 255, "32.6"),
    (13, 1, 1, "-0.1"),
    (13, 200, 20, "-21.4"),
    (13, 0, 126, "-0.0"),
    (14, 0, 0, "0.0"),
    (14, 255, 255, "325.1"),
    (14, 1, 1, "0.0"),
    (14, 200, 20, "20.0"),
    (15, 0, 0, "0.00"),
    (15, 255, 255, "650.25"),
    (15, 1, 1, "0.01"),
    (15, 200, 20, "40.00"),
    (16, 0, 0, "XXXXXXXX"),
    (16, 255, 255, "11111111"),
    (16, 1, 1, "XXXXXXX1"),
    (16, 200, 20, "00XX0XXX"),
    (16, 160, 128, "1X0XXXXX"),
    (17, 72, 105, "Hi"),
    (17, 48, 57, "09"),
    (17, 0, 59, ".."),
    (18, 0, 0, "0"),
    (18, 255, 255, "2601"),
    (18, 1, 1, "0"),
    (18, 200, 20, "160"),
    (19, 0, 0, "0.00"),
    (19, 255, 255, "650.25"),
    (19, 1, 1, "0.01"),
    (19, 200, 20, "40.00"),
    (20, 0, 0, "0.00"),
    (20, 255, 255, "253.01"),
    (20, 1, 1, "-0.99"),
    (20, 200, 20, "-168.75"),
    (20, 255, 128, "0.00"),
    (20, 0, 10, "0.00"),
    (21, 0, 0, "0.00"),
    (21, 255, 255, "65.03"),
    (21, 1, 1, "0.00"),
    (21, 200, 20, "4.00"),
    (22, 0, 0, "0.00"),
    (22, 255, 255, "65.03"),
    (22, 1, 1, "0.00"),
    (22, 200, 20, "4.00"),
    (23, 0, 0, "0.0"),
    (23, 255, 255, "254.0"),
    (23, 1, 1, "0.0"),
    (23, 200, 20, "15.6"),
    (24, 0, 0, "0.00"),
    (24, 255, 255, "65.03"),
    (24, 1, 1, "0.00"),
    (24, 200, 20, "4.00"),
    (25, 0, 0, "0.00"),
    (25, 255, 255, "363.76"),
    (25, 1, 1, "1.43"),
    (25, 200, 20, "29.52"),
    (26, 0, 0, "0"),
    (26, 255, 255, "0"),
    (26, 1, 1, "0"),
    (26, 200, 20, "-180"),
    (27, 0, 0, "0.0"),
    (27, 255, 255, "323.9"),
    (27, 1, 1, "1.3"),
    (27, 200, 20, "216.0"),
    (27, 255, 0, "326.4"),
    (28, 0, 0, "0"),
    (28, 255, 255, "0"),
    (28, 1, 1, "0"),
    (28, 200, 20, "-180"),
    (30, 0, 0, "0.0"),
    (30, 255, 255, "5418.8"),
    (30, 1, 1, "0.1"),
    (30, 200, 20, "333.3"),
    (30, 15, 49, "61.3"),
    (31, 0, 0, "0.0"),
    (31, 255, 255, "25.4"),
    (31, 1, 1, "0.0"),
    (31, 200, 20, "1.6"),
    (31, 6, 192, "0.5"),
    (33, 0, 0, "0"),
    (33, 255, 255, "100"),
    (33, 1, 1, "100"),
    (33, 200, 20, "10"),
    (33, 0, 255, "25500"),
    (34, 0, 0, "-0.0"),
    (34, 255, 255, "323.9"),
    (34, 1, 1, "-1.3"),
    (34, 200, 20, "-216.0"),
    (34, 0, 127, "-0.0"),
    (35, 0, 0, "0.0"),
    (35, 255, 255, "650.2"),
    (35, 1, 1, "0.0"),
    (35, 200, 20, "40.0"),
    (37, 0, 0, "-"),
    (37, 255, 255, "0xff"),
    (37, 1, 1, "0x01"),
    (37, 200, 20, "0x14"),
    (37, 0, 7, "WOT"),
    (37, 0, 235, "Test OFF"),
    (38, 0, 0, "-0.0"),
    (38, 255, 255, "32.4"),
    (38, 1, 1, "-0.1"),
    (38, 200, 20, "-21.6"),
    (39, 0, 0, "0.0"),
    (39, 255, 255, "254.0"),
    (39, 1, 1, "0.0"),
    (39, 200, 20, "15.6"),
    (43, 0, 0, "0.00"),
    (43, 255, 255, "6528.00"),
    (43, 1, 1, "25.60"),
    (43, 200, 20, "5102.00"),
    (43, 0, 255, "25.50"),
    (44, 0, 0, "0:0"),
    (44, 255, 255, "255:255"),
    (44, 1, 1, "1:1"),
    (44, 200, 20, "200:20"),
    (45, 0, 0, "0.000"),
    (45, 255, 255, "65.025"),
    (45, 1, 1, "0.001"),
    (45, 200, 20, "4.000"),
    (46, 0, 0, "-8.6"),
    (46, 255, 255, "166.9"),
    (46, 1, 1, "-8.6"),
    (46, 200, 20, "2.2"),
    (46, 255, 0, "-8.6"),
    (47, 0, 0, "0"),
    (47, 255, 255, "32385"),
    (47, 1, 1, "-127"),
    (47, 200, 20, "-21600"),
    (47, 255, 0, "-32640"),
    (48, 0, 0, "0"),
    (48, 255, 255, "65535"),
    (48, 1, 1, "257"),
    (48, 200, 20, "51220"),
    (49, 0, 0, "0.0"),
    (49, 255, 255, "1625.6"),
    (49, 1, 1, "0.0"),
    (49, 200, 20, "100.0"),
    (50, 0, 0, "-12800.0"),
    (50, 255, 255, "49.8"),
    (50, 1, 1, "-12700.0"),
    (50, 200, 20, "-54.0"),
    (50, 0, 128, "0.0"),
    (50, 255, 0, "-50.2"),
    (51, 0, 0, "-0.0"),
    (51, 255, 255, "127.0"),
    (51, 1, 1, "-0.5"),
    (51, 200, 20, "-84.7"),
    (51, 0, 1, "-0.0"),
    (52, 0, 0, "0"),
    (52, 255, 255, "1045"),
    (52, 1, 1, "-1"),
    (52, 200, 20, "-120"),
    (53, 0, 0, "-182.0"),
    (53, 255, 255, "182.1"),
    (53, 1, 1, "-180.6"),
    (53, 200, 20, "-152.4"),
    (53, 8, 38, "-128.0"),
    (53, 12, 118, "-14.2"),
    (54, 0, 0, "0"),
    (54, 255, 255, "65535"),
    (54, 1, 1, "257"),
    (54, 200, 20, "51220"),
    (55, 0, 0, "0.0"),
    (55, 255, 255, "325.1"),
    (55, 1, 1, "0.0"),
    (55, 200, 20, "20.0"),
    (56, 0, 0, "0"),
    (56, 255, 255, "65535"),
    (56, 1, 1, "257"),
    (56, 200, 20, "51220"),
    (59, 0, 0, "0.00"),
    (59, 255, 255, "2.00"),
    (59, 128, 0, "1.00"),
    (59, 64, 0, "0.50"),
    (60, 0, 0, "0.0"),
    (60, 255, 255, "655.3"),
    (60, 1, 1, "2.6"),
    (60, 200, 20, "512.2"),
    (61, 0, 0, "-128.00"),
    (61, 255, 255, "0.50"),
    (61, 1, 1, "-127.00"),
    (61, 200, 20, "-0.54"),
    (61, 0, 255, "127.00"),
    (62, 0, 0, "0.0"),
    (62, 255, 255, "16646.4"),
    (62, 1, 1, "0.3"),
    (62, 200, 20, "1024.0"),
    (63, 72, 105, "Hi?"),
    (63, 126, 32, "~ ?"),
    (63, 176, 0, "..?"),
    (64, 0, 0, "0"),
    (64, 255, 255, "510"),
    (64, 1, 1, "2"),
    (64, 200, 20, "220"),
    (65, 0, 0, "-0.00"),
    (65, 255, 255, "326.40"),
    (65, 1, 1, "-1.26"),
    (65, 200, 20, "-214.00"),
    (65, 0, 10, "-0.00"),
    (66, 0, 0, "0.00"),
    (66, 255, 255, "127.22"),
    (66, 1, 1, "0.00"),
    (66, 200, 20, "7.83"),
    (67, 0, 0, "0.0"),
    (67, 255, 255, "163837.5"),
    (67, 1, 1, "642.5"),
    (67, 200, 20, "128050.0"),
    (67, 255, 0, "163200.0"),
    (68, 0, 0, "0.00"),
    (68, 255, 255, "8898.17"),
    (68, 1, 1, "34.89"),
    (68, 200, 20, "6954.51"),
    (69, 0, 0, "0.00"),
    (69, 255, 255, "21325.09"),
    (69, 1, 1, "83.63"),
    (69, 200, 20, "16666.99"),
    (70, 0, 0, "0.00"),
    (70, 255, 255, "12582.72"),
    (70, 1, 1, "49.34"),
    (70, 200, 20, "9834.24"),
];

#[test]
fn every_known_code_matches_reference_values() {
    for &(code, a, b, expected) in VALUE_VECTORS {
        assert_eq!(value(code, a, b), expected, "code {} a {} b {}", code, a, b);
    }
}

#[test]
fn value_vectors_cover_every_known_code() {
    let known: Vec<u8> = (0..=255u8).filter(|&c| is_known(c)).collect();
    for code in &known {
        assert!(
            VALUE_VECTORS.iter().any(|v| v.0 == *code),
            "no vector for code {}",
            code
        );
    }
    assert_eq!(known.len(), 62);
}

#[test]
fn float_steps_round_to_single_precision() {
    assert_eq!(value(11, 25, 10), "0.71");
    assert_eq!(value(30, 15, 49), "61.3");
    assert_eq!(value(31, 6, 192), "0.5");
    assert_eq!(value(53, 8, 38), "-128.0");
}

#[test]
fn zero_a_below_offset_prints_negative_zero() {
    assert_eq!(value(9, 0, 10), "-0.0");
    assert_eq!(value(13, 0, 10), "-0.0");
    assert_eq!(value(34, 0, 10), "-0.0");
    assert_eq!(value(38, 0, 10), "-0.0");
    assert_eq!(value(51, 0, 10), "-0.0");
    assert_eq!(value(65, 0, 10), "-0.00");
    assert_eq!(value(9, 0, 200), "0.0");
    assert_eq!(value(20, 0, 10), "0.00");
}

#[test]
fn unit_table_covers_all_codes() {
    let units: &[(&str, &[u8])] = &[
        ("rpm", &[1]),
        ("%", &[2, 20, 23, 33]),
        ("deg", &[3, 9, 27, 34, 67]),
        ("degC", &[5, 31]),
        ("V", &[6, 21, 43, 66]),
        ("km/h", &[7]),
        ("ohm", &[12, 64]),
        ("mm", &[13, 65]),
        ("bar", &[14, 69]),
        ("ms", &[15, 22, 47]),
        ("bitval", &[16]),
        ("mbar", &[18, 50]),
        ("l", &[19]),
        ("A", &[24, 40]),
        ("g/s", &[25, 53]),
        ("C", &[26]),
        ("deg k/w", &[30, 38, 46]),
        ("l/h", &[35]),
        ("km", &[36]),
        ("state", &[37]),
        ("mg/h", &[39, 49, 51]),
        ("Ah", &[41]),
        ("Kw", &[42]),
        ("h:m", &[44]),
        ("Nm", &[52]),
        ("count", &[54]),
        ("s", &[55]),
        ("WSC", &[56, 57]),
        ("sec", &[60]),
        ("S", &[62]),
        ("deg/s", &[68]),
        ("m/s^2", &[70]),
    ];
    for code in 0..=255u8 {
        let expected = units
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map_or("", |(unit, _)| *unit);
        assert_eq!(unit_for(code), expected, "unit of code {}", code);
    }
}
