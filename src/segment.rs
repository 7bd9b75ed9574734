//! Generic per-field description engine
//!
//! A field expression is one of `*`, a single value, a list, a range or a
//! `base/step` interval. [`describe_segment`] picks the shape and fills the
//! templates supplied by the field's [`FieldCallbacks`].

use crate::interval::{detect_interval, is_every_value};
use crate::locale::{interpolate, Phrases};
use crate::types::FieldKind;

/// Field-specific phrase templates
///
/// Every method is a pure function of the sub-expression it is given. The
/// `*_format` methods return templates with `{0}` (and `{1}` for ranges)
/// placeholders; [`FieldCallbacks::single_item`] renders one value.
pub trait FieldCallbacks {
    /// Render one value, e.g. `"1"` → `"Monday"`
    fn single_item(&self, value: &str) -> String;

    /// Template for "every N units"
    fn interval_format(&self, step: &str) -> String;

    /// Template for a standalone `lo-hi` range
    fn between_format(&self, expr: &str) -> String;

    /// Template wrapping a single value or a joined list
    fn description_format(&self, expr: &str) -> String;

    /// Template for a `lo-hi` range inside a list
    fn range_format(&self, expr: &str) -> String;
}

/// Describe one field expression
///
/// `all_description` is returned when the expression selects every value.
pub fn describe_segment(
    kind: FieldKind,
    expr: &str,
    all_description: &str,
    callbacks: &dyn FieldCallbacks,
    phrases: &Phrases,
) -> String {
    if expr.is_empty() {
        return String::new();
    }

    if is_every_value(kind, expr) {
        return all_description.to_string();
    }

    if !expr.contains(['/', '-', ',']) {
        return fill(&callbacks.description_format(expr), &callbacks.single_item(expr));
    }

    if !expr.contains(['/', '-']) {
        if let Some(step) = detect_interval(kind, expr) {
            return describe_interval(&step.to_string(), callbacks);
        }
    }

    if let Some((base, step)) = expr.split_once('/') {
        let mut description = describe_interval(step, callbacks);

        if base.contains('-') {
            let between = describe_between(base, &callbacks.between_format(base), callbacks);
            if !between.starts_with(',') {
                description.push_str(", ");
            }
            description.push_str(&between);
        } else if !base.contains(['*', ',']) {
            let start = fill(&callbacks.description_format(base), &callbacks.single_item(base));
            let start = start.strip_prefix(", ").unwrap_or(&start);
            description.push_str(&phrases.translate_with("comma_starting_x0", &[start]));
        }

        return description;
    }

    if expr.contains(',') {
        let segments: Vec<&str> = expr.split(',').collect();
        let content = join_list(&segments, callbacks, phrases);
        return fill(&callbacks.description_format(expr), &content);
    }

    describe_between(expr, &callbacks.between_format(expr), callbacks)
}

fn fill(template: &str, value: &str) -> String {
    interpolate(template, &[value])
}

fn describe_interval(step: &str, callbacks: &dyn FieldCallbacks) -> String {
    fill(&callbacks.interval_format(step), &callbacks.single_item(step))
}

/// Render `lo-hi` into a between template
///
/// The upper bound's `:00` becomes `:59` so an hour range reads as inclusive.
fn describe_between(expr: &str, format: &str, callbacks: &dyn FieldCallbacks) -> String {
    let (lo, hi) = expr.split_once('-').unwrap_or((expr, ""));
    let lo = callbacks.single_item(lo);
    let hi = callbacks.single_item(hi).replace(":00", ":59");
    interpolate(format, &[&lo, &hi])
}

/// `a and b` for two items, `a, b, and c` for more
fn join_list(segments: &[&str], callbacks: &dyn FieldCallbacks, phrases: &Phrases) -> String {
    let and = phrases.translate("space_and_space");
    let count = segments.len();
    let mut content = String::new();

    for (i, segment) in segments.iter().enumerate() {
        if i > 0 && count > 2 {
            content.push(',');
            if i < count - 1 {
                content.push(' ');
            }
        }
        if i > 0 && (i == count - 1 || count == 2) {
            content.push_str(&and);
        }

        if segment.contains('-') {
            let between = describe_between(segment, &callbacks.range_format(segment), callbacks);
            content.push_str(between.strip_prefix(", ").unwrap_or(&between));
        } else {
            content.push_str(&callbacks.single_item(segment));
        }
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{LocaleTag, TranslationTable};
    use std::sync::Arc;

    /// Plain templates that make the dispatch visible
    struct Probe;

    impl FieldCallbacks for Probe {
        fn single_item(&self, value: &str) -> String {
            format!("<{}>", value)
        }
        fn interval_format(&self, step: &str) -> String {
            format!("every {} ({{0}})", step)
        }
        fn between_format(&self, _expr: &str) -> String {
            "from {0} to {1}".to_string()
        }
        fn description_format(&self, _expr: &str) -> String {
            ", only {0}".to_string()
        }
        fn range_format(&self, _expr: &str) -> String {
            ", {0} thru {1}".to_string()
        }
    }

    fn phrases() -> Phrases {
        let table = TranslationTable::from_json(
            r#"{"space_and_space":" and ","comma_starting_x0":", starting {0}"}"#,
        )
        .unwrap();
        Phrases::new(Arc::new(table), LocaleTag::parse("en"), false)
    }

    fn describe(kind: FieldKind, expr: &str) -> String {
        describe_segment(kind, expr, "ALL", &Probe, &phrases())
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(describe(FieldKind::Second, ""), "");
    }

    #[test]
    fn test_every_value() {
        assert_eq!(describe(FieldKind::Minute, "*"), "ALL");
        assert_eq!(describe(FieldKind::Month, "1-12"), "ALL");
    }

    #[test]
    fn test_single_value() {
        assert_eq!(describe(FieldKind::Minute, "5"), ", only <5>");
    }

    #[test]
    fn test_detected_interval() {
        assert_eq!(describe(FieldKind::Minute, "0,20,40"), "every 20 (<20>)");
    }

    #[test]
    fn test_step_from_wildcard() {
        assert_eq!(describe(FieldKind::Minute, "*/10"), "every 10 (<10>)");
    }

    #[test]
    fn test_step_with_range() {
        assert_eq!(
            describe(FieldKind::Minute, "2-59/3"),
            "every 3 (<3>), from <2> to <59>"
        );
    }

    #[test]
    fn test_step_with_start_value() {
        assert_eq!(
            describe(FieldKind::Minute, "5/15"),
            "every 15 (<15>), starting only <5>"
        );
    }

    #[test]
    fn test_two_item_list() {
        assert_eq!(describe(FieldKind::Minute, "5,10"), ", only <5> and <10>");
    }

    #[test]
    fn test_three_item_list() {
        assert_eq!(
            describe(FieldKind::Minute, "5,10,20"),
            ", only <5>, <10>, and <20>"
        );
    }

    #[test]
    fn test_list_with_range() {
        assert_eq!(
            describe(FieldKind::Minute, "1-5,10"),
            ", only <1> thru <5> and <10>"
        );
    }

    #[test]
    fn test_plain_range() {
        assert_eq!(describe(FieldKind::Minute, "10-20"), "from <10> to <20>");
    }

    #[test]
    fn test_range_end_is_inclusive() {
        struct Clock;
        impl FieldCallbacks for Clock {
            fn single_item(&self, value: &str) -> String {
                format!("{}:00", value)
            }
            fn interval_format(&self, _: &str) -> String {
                String::new()
            }
            fn between_format(&self, _: &str) -> String {
                "{0}-{1}".to_string()
            }
            fn description_format(&self, _: &str) -> String {
                String::new()
            }
            fn range_format(&self, _: &str) -> String {
                String::new()
            }
        }

        let out = describe_segment(FieldKind::Hour, "9-17", "", &Clock, &phrases());
        assert_eq!(out, "9:00-17:59");
    }
}
