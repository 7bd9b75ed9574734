//! Interval and full-coverage detection
//!
//! A list such as `0,15,30,45` in the minute field is the same schedule as
//! `*/15`, and `1,2,...,12` in the month field is the same as `*`. The
//! description engine checks both before falling back to literal lists.

use crate::parser::name_value;
use crate::types::FieldKind;
use std::collections::BTreeSet;

/// Detect an evenly spaced comma-list starting at zero
///
/// Returns the step when `expr` is exactly `0, step, 2*step, ...` with
/// `modulus / step` elements.
///
/// # Examples
///
/// ```
/// use a3s_cron_descriptor::{detect_interval, FieldKind};
///
/// assert_eq!(detect_interval(FieldKind::Minute, "0,15,30,45"), Some(15));
/// assert_eq!(detect_interval(FieldKind::Minute, "0,15,31,45"), None);
/// assert_eq!(detect_interval(FieldKind::Year, "0,5000"), None);
/// ```
pub fn detect_interval(kind: FieldKind, expr: &str) -> Option<u32> {
    let modulus = kind.modulus()?;

    let parts: Vec<&str> = expr.split(',').collect();
    let size = parts.len() as u32;
    if size < 2 || modulus % size != 0 {
        return None;
    }

    let step = modulus / size;
    let evenly_spaced = parts
        .iter()
        .zip((0..).step_by(step as usize))
        .all(|(part, expected)| part.trim().parse::<u32>().ok() == Some(expected));

    evenly_spaced.then_some(step)
}

/// Check whether an expression selects every value of its field
///
/// True for `*`, and for lists or ranges that cover the whole value set.
/// Day of week accepts both 0-6 and 1-7 numbering as well as names.
pub fn is_every_value(kind: FieldKind, expr: &str) -> bool {
    if expr == "*" {
        return true;
    }

    let Some((min, max)) = kind.value_range() else {
        return false;
    };
    // Day of week may also be numbered 1-7
    let max = match kind {
        FieldKind::DayOfWeek => max + 1,
        _ => max,
    };
    let Some(values) = expand(kind, expr, min, max) else {
        return false;
    };

    match kind {
        FieldKind::DayOfWeek => covers(&values, 0, 6) || covers(&values, 1, 7),
        _ => covers(&values, min, max),
    }
}

/// Expand a list of values and ranges into a set, `None` on anything else
///
/// Ranges are clamped to `min..=max`; values outside it never affect
/// coverage.
fn expand(kind: FieldKind, expr: &str, min: u32, max: u32) -> Option<BTreeSet<u32>> {
    if expr.is_empty() || expr.contains(['*', '/', '#']) {
        return None;
    }

    let mut values = BTreeSet::new();
    for part in expr.split(',') {
        match part.split_once('-') {
            Some((lo, hi)) => {
                let lo = value(kind, lo)?;
                let hi = value(kind, hi)?;
                values.extend(lo.max(min)..=hi.min(max));
            }
            None => {
                values.insert(value(kind, part)?);
            }
        }
    }

    Some(values)
}

fn value(kind: FieldKind, s: &str) -> Option<u32> {
    let s = s.trim();
    s.parse().ok().or_else(|| name_value(kind, s))
}

fn covers(values: &BTreeSet<u32>, min: u32, max: u32) -> bool {
    (min..=max).all(|v| values.contains(&v))
}
