//! Core types for the descriptor
//!
//! Options use camelCase JSON serialization so hosts can embed them in
//! their own configuration files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// One of the seven schedule components, in canonical field order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
    Year,
}

impl FieldKind {
    /// All field kinds in the order they appear in a 7-field expression
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Second,
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
        FieldKind::Year,
    ];

    /// Position of this field in a canonical 7-field expression
    pub fn index(self) -> usize {
        match self {
            FieldKind::Second => 0,
            FieldKind::Minute => 1,
            FieldKind::Hour => 2,
            FieldKind::DayOfMonth => 3,
            FieldKind::Month => 4,
            FieldKind::DayOfWeek => 5,
            FieldKind::Year => 6,
        }
    }

    /// Number of distinct values in one cycle of this unit
    ///
    /// `None` for [`FieldKind::Year`], which never wraps.
    pub fn modulus(self) -> Option<u32> {
        match self {
            FieldKind::Second | FieldKind::Minute => Some(60),
            FieldKind::Hour => Some(24),
            FieldKind::DayOfMonth => Some(31),
            FieldKind::Month => Some(12),
            FieldKind::DayOfWeek => Some(7),
            FieldKind::Year => None,
        }
    }

    /// Inclusive range of legal values (day of week is zero-indexed, 0=Sunday)
    pub fn value_range(self) -> Option<(u32, u32)> {
        match self {
            FieldKind::Second | FieldKind::Minute => Some((0, 59)),
            FieldKind::Hour => Some((0, 23)),
            FieldKind::DayOfMonth => Some((1, 31)),
            FieldKind::Month => Some((1, 12)),
            FieldKind::DayOfWeek => Some((0, 6)),
            FieldKind::Year => None,
        }
    }

    /// Upper bound used to turn `base/step` into `base-TOP/step`
    pub fn step_upper_bound(self) -> Option<u32> {
        match self {
            FieldKind::Month => Some(12),
            FieldKind::DayOfWeek => Some(6),
            FieldKind::Year => Some(9999),
            _ => None,
        }
    }

    /// Lower-case field name
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Second => "second",
            FieldKind::Minute => "minute",
            FieldKind::Hour => "hour",
            FieldKind::DayOfMonth => "day of month",
            FieldKind::Month => "month",
            FieldKind::DayOfWeek => "day of week",
            FieldKind::Year => "year",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cron expression normalized into seven canonical field strings
///
/// Produced once by [`crate::ExpressionParser`] and never mutated. Every
/// field is empty, `*`, a single value, a comma-list, a dash-range or a
/// `base/step` expression; only the second and year fields may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedExpression {
    fields: [String; 7],
}

impl ParsedExpression {
    pub(crate) fn from_fields(fields: [String; 7]) -> Self {
        Self { fields }
    }

    /// Canonical string for one field
    pub fn get(&self, kind: FieldKind) -> &str {
        &self.fields[kind.index()]
    }

    /// All seven fields in canonical order
    pub fn fields(&self) -> &[String; 7] {
        &self.fields
    }

    /// Iterate over `(kind, field)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &str)> + '_ {
        FieldKind::ALL
            .iter()
            .map(move |&kind| (kind, self.get(kind)))
    }
}

impl Index<FieldKind> for ParsedExpression {
    type Output = str;

    fn index(&self, kind: FieldKind) -> &str {
        self.get(kind)
    }
}

impl fmt::Display for ParsedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields.join(" "))
    }
}

/// Options for the expression parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Day of week 0 is Sunday (and 7 is an alias for Sunday).
    ///
    /// When false, Sunday is 1 and Saturday is 7.
    pub day_of_week_start_index_zero: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            day_of_week_start_index_zero: true,
        }
    }
}

/// Options controlling how a description is produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescribeOptions {
    /// Locale tag, e.g. `en`, `en-US` or `zh_CN`
    pub locale: String,

    /// Render times as `23:00` instead of `11:00 PM`
    pub use_24_hour_time_format: bool,

    /// See [`ParseOptions::day_of_week_start_index_zero`]
    pub day_of_week_start_index_zero: bool,

    /// Resolve `en-GB` to `en` when no table exists for the full tag
    pub fallback_to_base_language: bool,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            use_24_hour_time_format: false,
            day_of_week_start_index_zero: true,
            fallback_to_base_language: true,
        }
    }
}

impl DescribeOptions {
    /// Set the locale tag
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Toggle 24-hour time formatting
    pub fn with_24_hour_time_format(mut self, enabled: bool) -> Self {
        self.use_24_hour_time_format = enabled;
        self
    }

    /// Toggle zero-indexed day-of-week numbering
    pub fn with_day_of_week_start_index_zero(mut self, enabled: bool) -> Self {
        self.day_of_week_start_index_zero = enabled;
        self
    }

    /// Toggle base-language fallback for unknown regional locales
    pub fn with_fallback_to_base_language(mut self, enabled: bool) -> Self {
        self.fallback_to_base_language = enabled;
        self
    }

    /// The subset of options the parser cares about
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            day_of_week_start_index_zero: self.day_of_week_start_index_zero,
        }
    }
}

/// The five phrases merged into a final description
///
/// Each part already carries its own leading separator (", ") where one is
/// needed, so the sentence is their plain concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionParts {
    pub time_of_day: String,
    pub day_of_month: String,
    pub day_of_week: String,
    pub month: String,
    pub year: String,
}

impl DescriptionParts {
    /// Concatenate the parts in sentence order
    pub fn concat(&self) -> String {
        [
            self.time_of_day.as_str(),
            self.day_of_month.as_str(),
            self.day_of_week.as_str(),
            self.month.as_str(),
            self.year.as_str(),
        ]
        .concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_order_matches_index() {
        for (i, kind) in FieldKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::DayOfMonth.to_string(), "day of month");
        assert_eq!(format!("{}", FieldKind::Year), "year");
    }

    #[test]
    fn test_field_kind_modulus() {
        assert_eq!(FieldKind::Second.modulus(), Some(60));
        assert_eq!(FieldKind::Hour.modulus(), Some(24));
        assert_eq!(FieldKind::DayOfWeek.modulus(), Some(7));
        assert_eq!(FieldKind::Year.modulus(), None);
    }

    #[test]
    fn test_parsed_expression_display_and_index() {
        let parsed = ParsedExpression::from_fields([
            String::new(),
            "*/5".to_string(),
            "*".to_string(),
            "*".to_string(),
            "*".to_string(),
            "1-5".to_string(),
            String::new(),
        ]);
        assert_eq!(parsed.to_string(), " */5 * * * 1-5 ");
        assert_eq!(&parsed[FieldKind::Minute], "*/5");
        assert_eq!(parsed.get(FieldKind::DayOfWeek), "1-5");
        assert_eq!(parsed.iter().count(), 7);
    }

    #[test]
    fn test_describe_options_defaults() {
        let options = DescribeOptions::default();
        assert_eq!(options.locale, "en");
        assert!(!options.use_24_hour_time_format);
        assert!(options.day_of_week_start_index_zero);
        assert!(options.fallback_to_base_language);
    }

    #[test]
    fn test_describe_options_builder() {
        let options = DescribeOptions::default()
            .with_locale("zh-CN")
            .with_24_hour_time_format(true)
            .with_day_of_week_start_index_zero(false);
        assert_eq!(options.locale, "zh-CN");
        assert!(options.use_24_hour_time_format);
        assert!(!options.parse_options().day_of_week_start_index_zero);
    }

    #[test]
    fn test_describe_options_deserialize_partial() {
        let options: DescribeOptions =
            serde_json::from_str(r#"{"locale":"en-GB","use24HourTimeFormat":true}"#).unwrap();
        assert_eq!(options.locale, "en-GB");
        assert!(options.use_24_hour_time_format);
        assert!(options.fallback_to_base_language);
    }
}
