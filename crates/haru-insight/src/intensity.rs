// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intensity normalization at the persistence boundary.
//!
//! Intensity reaches the service in two representations: numeric strings
//! ("1".."5", or plain numbers) and Korean ordinal labels ("매우 좋음" etc.).
//! The canonical form is a single `u8` in 1..=5; conversion happens here and
//! nowhere else. Unknown labels are rejected, not coerced.

/// Lowest canonical intensity.
pub const MIN: u8 = 1;
/// Highest canonical intensity.
pub const MAX: u8 = 5;

/// Korean ordinal labels in canonical order, index 0 == intensity 1.
const KOREAN_ORDINALS: [&str; 5] = ["매우 나쁨", "나쁨", "보통", "좋음", "매우 좋음"];

/// Normalize a textual intensity to the canonical 1..=5 value.
///
/// Accepts numeric strings and exact (trimmed) Korean ordinal labels.
pub fn normalize(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        return (MIN..=MAX).contains(&n).then_some(n);
    }
    KOREAN_ORDINALS
        .iter()
        .position(|label| *label == trimmed)
        .map(|idx| idx as u8 + 1)
}

/// The Korean ordinal label for a canonical intensity, if in range.
pub fn label(value: u8) -> Option<&'static str> {
    (MIN..=MAX)
        .contains(&value)
        .then(|| KOREAN_ORDINALS[(value - 1) as usize])
}

/// Serde deserializer that accepts a JSON number or either textual
/// representation. Used on model-output payload fields, where the
/// representation is not under our control.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde::Deserialize;

    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .filter(|n| (u64::from(MIN)..=u64::from(MAX)).contains(n))
            .map(|n| n as u8)
            .ok_or_else(|| D::Error::custom(format!("intensity {n} out of range 1..=5"))),
        serde_json::Value::String(s) => normalize(s)
            .ok_or_else(|| D::Error::custom(format!("unrecognized intensity label `{s}`"))),
        other => Err(D::Error::custom(format!(
            "intensity must be a number or string, got {other}"
        ))),
    }
}
