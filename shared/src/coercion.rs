//! Parse-with-fallback coercion of loosely typed form data
//!
//! Review forms arrive partially filled and with numbers encoded as strings.
//! Rather than rejecting them, numeric fields are read leniently and fall back
//! to a neutral value, so the scoring core only ever sees finite numbers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Taxonomy, TerpeneProfile};
use crate::scoring::{ReviewInput, SubRatings, DEFAULT_PERCENTAGE, DEFAULT_RATING};

/// Parse a value as a real number, or return `fallback`.
///
/// Strings are read up to the end of their leading decimal literal, so
/// `"18.5%"` reads as `18.5`. Non-finite results count as a failed parse.
pub fn parse_f64_or(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_float(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Parse a value as an integer, or return `fallback`.
///
/// Numbers are truncated toward zero, strings are read up to the end of their
/// leading integer literal (`"7.9"` reads as `7`). Anything outside the `i32`
/// range also falls back, including numbers such as `1e21` whose exponent
/// form a string-prefix reader would take as `1`. Submitted reviews reject
/// such ratings anyway; only previews see the fallback.
pub fn parse_i32_or(value: Option<&Value>, fallback: i32) -> i32 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Some(Value::String(s)) => leading_int(s),
        _ => None,
    };
    parsed
        .and_then(|v| i32::try_from(v).ok())
        .unwrap_or(fallback)
}

/// Percentage field: falls back to 0
pub fn parse_percentage(value: Option<&Value>) -> f64 {
    parse_f64_or(value, DEFAULT_PERCENTAGE)
}

/// Sub-rating field: falls back to 5
pub fn parse_rating(value: Option<&Value>) -> i32 {
    parse_i32_or(value, DEFAULT_RATING)
}

/// Length of the `[+-]?digits` run at the start of `bytes[start..]`
fn sign_and_digits(bytes: &[u8], start: usize) -> (usize, usize) {
    let mut end = start;
    if matches!(bytes.get(end), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    (end, end - digits_start)
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (end, digits) = sign_and_digits(s.as_bytes(), 0);
    if digits == 0 {
        return None;
    }
    s[..end].parse().ok()
}

fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();

    let (mut end, int_digits) = sign_and_digits(bytes, 0);
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        frac_digits = frac_end - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = frac_end;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let (exp_end, exp_digits) = sign_and_digits(bytes, end + 1);
        if exp_digits > 0 {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// A review form as submitted, before coercion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReviewForm {
    #[serde(default)]
    pub strain_name: Option<String>,
    #[serde(default)]
    pub producer: Option<String>,
    #[serde(default)]
    pub package_date: Option<String>,
    #[serde(default)]
    pub taxonomy: Option<String>,
    #[serde(default)]
    pub thc_percentage: Option<Value>,
    #[serde(default)]
    pub terpene_percentage: Option<Value>,
    #[serde(default)]
    pub flower_structure: Option<Value>,
    #[serde(default)]
    pub trichome_density: Option<Value>,
    #[serde(default)]
    pub trim: Option<Value>,
    #[serde(default)]
    pub burn: Option<Value>,
    #[serde(default)]
    pub ash_color: Option<Value>,
    #[serde(default)]
    pub flavor: Option<Value>,
    #[serde(default)]
    pub intensity: Option<Value>,
    #[serde(default)]
    pub clarity: Option<Value>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Either a JSON object or a JSON-encoded string of one
    #[serde(default)]
    pub terpene_profile: Option<Value>,
    #[serde(default)]
    pub upc_code: Option<String>,
}

impl RawReviewForm {
    /// Typed scoring inputs, with fallbacks applied
    pub fn score_input(&self) -> ReviewInput {
        ReviewInput {
            thc_percentage: parse_percentage(self.thc_percentage.as_ref()),
            terpene_percentage: parse_percentage(self.terpene_percentage.as_ref()),
            ratings: SubRatings {
                flower_structure: parse_rating(self.flower_structure.as_ref()),
                trichome_density: parse_rating(self.trichome_density.as_ref()),
                trim: parse_rating(self.trim.as_ref()),
                burn: parse_rating(self.burn.as_ref()),
                ash_color: parse_rating(self.ash_color.as_ref()),
                flavor: parse_rating(self.flavor.as_ref()),
                intensity: parse_rating(self.intensity.as_ref()),
                clarity: parse_rating(self.clarity.as_ref()),
            },
        }
    }

    /// Taxonomy, defaulting to Hybrid when absent or unrecognised
    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }

    /// Terpene profile; malformed profiles are dropped
    pub fn terpene_profile(&self) -> Option<TerpeneProfile> {
        match self.terpene_profile.as_ref()? {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => serde_json::from_str(s).ok(),
            Value::Null => None,
            other => serde_json::from_value(other.clone()).ok(),
        }
    }

    /// Trimmed, non-empty text field
    pub fn text(field: &Option<String>) -> Option<String> {
        field
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
