// Pure helpers for keyboard and form input; no web-sys here so host tests can
// include this file directly.

use stage_core::{DEFAULT_RAMP_MS, PRESET_HOTKEYS};

/// Digit keys "1".."6" select the preset buttons in document order.
#[inline]
pub fn preset_slot_for_key(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    let digit = c.to_digit(10)? as usize;
    (1..=PRESET_HOTKEYS).contains(&digit).then(|| digit - 1)
}

/// Ramp duration typed into the number field; falls back to the default for
/// anything that is not a non-negative number.
#[inline]
pub fn parse_ramp_ms(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => DEFAULT_RAMP_MS,
    }
}

/// Range input value; `None` when the browser hands back something unparsable.
#[inline]
pub fn parse_slider_value(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Whether a focused `<input>` of this type takes typed digits, in which case
/// the preset shortcuts stay out of the way. Sliders and buttons do not.
#[inline]
pub fn input_captures_digits(input_type: &str) -> bool {
    matches!(
        input_type.to_ascii_lowercase().as_str(),
        "" | "text" | "number" | "search" | "tel" | "email" | "url" | "password"
    )
}
