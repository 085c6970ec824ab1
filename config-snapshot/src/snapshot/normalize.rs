//! Canonical, locale-independent text for leaf values.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Timelike};

use crate::describe::Scalar;

/// Renders a scalar as text. Total: every input produces a string.
///
/// | Input | Output |
/// |-------|--------|
/// | bool | `True` / `False` |
/// | integers, decimals | plain digits, no grouping |
/// | floats | shortest round-trip form; `NaN`, `Infinity`, `-Infinity` |
/// | instants | `YYYY-MM-DDTHH:MM:SS.fffffff+HH:MM` |
/// | intervals | `[-]HH:MM:SS` |
/// | symbols, text | unchanged |
/// | anything else | its `Debug` output |
pub fn normalize<'a>(scalar: &Scalar<'a>) -> Cow<'a, str> {
    match scalar {
        Scalar::Bool(true) => Cow::Borrowed("True"),
        Scalar::Bool(false) => Cow::Borrowed("False"),
        Scalar::Int(value) => Cow::Owned(value.to_string()),
        Scalar::UInt(value) => Cow::Owned(value.to_string()),
        Scalar::Float(value) => Cow::Owned(float_text(*value)),
        Scalar::Float32(value) => {
            if value.is_finite() {
                Cow::Owned(value.to_string())
            } else {
                Cow::Owned(float_text(f64::from(*value)))
            }
        }
        Scalar::Decimal(value) => Cow::Owned(value.to_string()),
        Scalar::DateTime(value) => Cow::Owned(instant_text(value)),
        Scalar::LocalDateTime(value) => Cow::Owned(local_text(value)),
        Scalar::Interval(value) => Cow::Owned(interval_text(*value)),
        Scalar::Symbol(name) => Cow::Borrowed(*name),
        Scalar::Char(ch) => Cow::Owned(ch.to_string()),
        Scalar::Str(text) => text.clone(),
        Scalar::Opaque(value) => Cow::Owned(format!("{value:?}")),
    }
}

fn float_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        }
    } else {
        value.to_string()
    }
}

/// Seven fractional digits, in units of 100 ns.
fn ticks(nanos: u32) -> u32 {
    // Leap seconds report nanoseconds past 1e9.
    nanos.min(999_999_999) / 100
}

fn instant_text(value: &DateTime<FixedOffset>) -> String {
    format!(
        "{}.{:07}{}",
        value.format("%Y-%m-%dT%H:%M:%S"),
        ticks(value.nanosecond()),
        value.format("%:z")
    )
}

fn local_text(value: &NaiveDateTime) -> String {
    format!(
        "{}.{:07}",
        value.format("%Y-%m-%dT%H:%M:%S"),
        ticks(value.nanosecond())
    )
}

fn interval_text(value: TimeDelta) -> String {
    let sign = if value < TimeDelta::zero() { "-" } else { "" };
    let total = value.num_seconds().unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone};
    use rust_decimal::Decimal;

    use super::normalize;
    use crate::describe::Scalar;

    #[derive(Debug)]
    struct Port(u16);

    #[test]
    fn booleans_use_capitalised_words() {
        assert_eq!(normalize(&Scalar::Bool(true)), "True");
        assert_eq!(normalize(&Scalar::Bool(false)), "False");
    }

    #[test]
    fn numbers_have_no_grouping() {
        assert_eq!(normalize(&Scalar::Int(-1_234_567)), "-1234567");
        assert_eq!(normalize(&Scalar::UInt(u128::MAX)), u128::MAX.to_string());
        assert_eq!(normalize(&Scalar::Float(0.1)), "0.1");
        assert_eq!(normalize(&Scalar::Float(1e21)), "1000000000000000000000");
        assert_eq!(normalize(&Scalar::Float32(0.1)), "0.1");
    }

    #[test]
    fn non_finite_floats_have_names() {
        assert_eq!(normalize(&Scalar::Float(f64::NAN)), "NaN");
        assert_eq!(normalize(&Scalar::Float(f64::INFINITY)), "Infinity");
        assert_eq!(normalize(&Scalar::Float32(f32::NEG_INFINITY)), "-Infinity");
    }

    #[test]
    fn decimals_keep_their_scale() {
        let value = Decimal::new(12_500, 3);
        assert_eq!(normalize(&Scalar::Decimal(value)), "12.500");
    }

    #[test]
    fn instants_use_round_trip_form() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let value = offset
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .unwrap()
            + TimeDelta::nanoseconds(123_456_700);
        assert_eq!(
            normalize(&Scalar::DateTime(value)),
            "2024-03-09T14:05:07.1234567+02:00"
        );

        let utc = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .unwrap();
        assert_eq!(
            normalize(&Scalar::DateTime(utc)),
            "2024-01-01T00:00:00.0000000+00:00"
        );
    }

    #[test]
    fn local_instants_omit_offset() {
        let value = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 58)
            .unwrap();
        assert_eq!(
            normalize(&Scalar::LocalDateTime(value)),
            "2023-12-31T23:59:58.0000000"
        );
    }

    #[test]
    fn intervals_use_fixed_width_hours() {
        let value = TimeDelta::seconds(3 * 3600 + 4 * 60 + 5);
        assert_eq!(normalize(&Scalar::Interval(value)), "03:04:05");

        let value = TimeDelta::days(2) + TimeDelta::minutes(1);
        assert_eq!(normalize(&Scalar::Interval(value)), "48:01:00");

        let value = -TimeDelta::seconds(90);
        assert_eq!(normalize(&Scalar::Interval(value)), "-00:01:30");
    }

    #[test]
    fn symbols_and_text_pass_through() {
        assert_eq!(normalize(&Scalar::Symbol("Verbose")), "Verbose");
        assert_eq!(normalize(&Scalar::Str(Cow::Borrowed("O'Hare"))), "O'Hare");
        assert_eq!(normalize(&Scalar::Char('x')), "x");
    }

    #[test]
    fn unknown_values_fall_back_to_debug() {
        let port = Port(8080);
        assert_eq!(normalize(&Scalar::Opaque(&port)), "Port(8080)");
    }
}
