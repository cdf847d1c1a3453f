use super::*;
use crate::number::{format_number, parse_number_from_string, to_fixed};

#[test]
fn currency_uses_comma_and_two_decimals() {
    assert_eq!(format_currency(140.0), "140,00 €");
    assert_eq!(format_currency(0.0), "0,00 €");
    assert_eq!(format_currency(-0.0), "0,00 €");
    assert_eq!(format_currency(1234.5), "1234,50 €");
    assert_eq!(format_currency(52.25), "52,25 €");
}

#[test]
fn currency_rounding_matches_browser_to_fixed() {
    // Exact binary ties round away from zero.
    assert_eq!(format_currency(1.625), "1,63 €");
    assert_eq!(format_currency(0.125), "0,13 €");
    assert_eq!(format_currency(-1.625), "-1,63 €");
    // Decimal-looking ties that are not exact in binary round to the nearer side.
    assert_eq!(format_currency(1.005), "1,00 €");
    assert_eq!(format_currency(2.675), "2,67 €");
    assert_eq!(format_currency(-0.001), "-0,00 €");
}

#[test]
fn to_fixed_handles_other_widths() {
    assert_eq!(to_fixed(2.5, 0), "3");
    assert_eq!(to_fixed(3.5, 0), "4");
    assert_eq!(to_fixed(0.5, 3), "0.500");
    assert_eq!(to_fixed(f64::NAN, 2), "NaN");
    assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
}

#[test]
fn hours_follow_browser_number_coercion() {
    let cases = [
        ("", 0.0),
        ("   ", 0.0),
        (" 4 ", 4.0),
        ("\t7\n", 7.0),
        ("2.5", 2.5),
        (".5", 0.5),
        ("5.", 5.0),
        ("+2", 2.0),
        ("1e1", 10.0),
        ("0x10", 16.0),
        ("0b101", 5.0),
        ("0o17", 15.0),
    ];
    for (raw, expected) in cases {
        assert_eq!(parse_hours(raw), expected, "input {raw:?}");
    }
}

#[test]
fn hours_that_are_not_positive_numbers_become_zero() {
    for raw in [
        "-3", "0", "-0", "abc", "Infinity", "inf", "nan", "2,5", "1_000", "-0x10", "4h", "0x",
    ] {
        assert_eq!(parse_hours(raw), 0.0, "input {raw:?}");
    }
}

#[test]
fn raw_number_coercion_keeps_special_values() {
    assert!(parse_number_from_string("abc").is_nan());
    assert!(parse_number_from_string("0xZZ").is_nan());
    assert_eq!(parse_number_from_string("-Infinity"), f64::NEG_INFINITY);
    assert_eq!(parse_number_from_string("-2.5"), -2.5);
    assert_eq!(parse_number_from_string(""), 0.0);
}

#[test]
fn numbers_render_back_into_inputs_without_trailing_zeros() {
    assert_eq!(format_number(5.0), "5");
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(f64::NAN), "NaN");
}

#[test]
fn extreme_magnitudes_switch_to_exponent_form() {
    assert_eq!(format_number(1e20), "100000000000000000000");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(2.6e301), "2.6e+301");
    assert_eq!(format_number(-4.5e22), "-4.5e+22");
    assert_eq!(format_number(0.000001), "0.000001");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
    assert_eq!(to_fixed(1e21, 2), "1e+21");
    assert_eq!(format_currency(2.6e301), "2,6e+301 €");
    assert_eq!(parse_number_from_string("2.6e+301"), 2.6e301);
}

#[test]
fn rates_are_keyed_by_service() {
    assert_eq!(rate_for("entretien"), 26.0);
    assert_eq!(rate_for("garde"), 32.0);
    assert_eq!(rate_for("courses"), 24.0);
    assert_eq!(rate_for(""), 0.0);
    assert_eq!(rate_for("Entretien"), 0.0);
    assert_eq!(SERVICE_RATES.len(), 6);
    assert_eq!(CREDIT_RATE, 0.5);
}

#[test]
fn breakdown_splits_gross_in_half() {
    assert_eq!(
        PriceBreakdown::compute(5.0, 26.0),
        PriceBreakdown {
            gross: 130.0,
            credit: 65.0,
            net: 65.0,
        }
    );
    let none = PriceBreakdown::for_service("courses", 0.0);
    assert_eq!((none.gross, none.credit, none.net), (0.0, 0.0, 0.0));
    let unknown = PriceBreakdown::for_service("plomberie", 10.0);
    assert_eq!(unknown.net, 0.0);
}

#[test]
fn simulator_state_serializes_whole_hours_as_integers() {
    let state = SimulatorState::from_inputs("entretien", "3", "hebdomadaire");
    assert_eq!(
        serde_json::to_string(&state).expect("serializes"),
        r#"{"service":"entretien","hours":3,"frequency":"hebdomadaire"}"#
    );
    let state = SimulatorState::from_inputs("jardinage", "1.25", "");
    assert_eq!(
        serde_json::to_string(&state).expect("serializes"),
        r#"{"service":"jardinage","hours":1.25,"frequency":""}"#
    );

    let partial: SimulatorState = serde_json::from_str(r#"{"hours":2}"#).expect("partial object");
    assert_eq!(
        partial,
        SimulatorState {
            service: String::new(),
            hours: 2.0,
            frequency: String::new(),
        }
    );
    assert_eq!(partial.display().gross, "0,00 €");
}

#[test]
fn saved_simulator_members_are_read_like_control_text() {
    let state: SimulatorState =
        serde_json::from_str(r#"{"service":"garde","hours":"5","frequency":"hebdomadaire"}"#)
            .expect("string hours decode");
    assert_eq!(state.hours, 5.0);
    assert_eq!(state.display().gross, "160,00 €");

    let state: SimulatorState =
        serde_json::from_str(r#"{"service":"entretien","hours":null,"frequency":false}"#)
            .expect("null member decodes");
    assert_eq!(state.service, "entretien");
    assert_eq!(state.hours, 0.0);
    assert_eq!(state.frequency, "");

    let state: SimulatorState =
        serde_json::from_str(r#"{"service":7,"hours":[2.5],"frequency":{}}"#).expect("odd types");
    assert_eq!(state.service, "7");
    assert_eq!(state.hours, 2.5);
    assert_eq!(state.frequency, "[object Object]");

    for text in ["42", "\"garde\"", "[1,2]", "true"] {
        let state: SimulatorState = serde_json::from_str(text).expect("non-object decodes");
        assert_eq!(state, SimulatorState::default(), "{text}");
    }
    assert!(serde_json::from_str::<SimulatorState>("null").is_err());
}
