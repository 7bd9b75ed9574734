//! Sentence assembly
//!
//! [`ExpressionDescriptor`] renders each field through the segment engine,
//! merges seconds, minutes and hours into one time-of-day phrase, and
//! removes filler such as ", every hour" that adds nothing next to a more
//! specific phrase.

use crate::error::Result;
use crate::fields::{
    format_time, DayOfMonthFields, DayOfWeekFields, HourFields, MinuteFields, MonthFields,
    SecondFields, YearFields,
};
use crate::interval::is_every_value;
use crate::locale::{Catalog, Phrases, TranslationTable};
use crate::parser::ExpressionParser;
use crate::segment::describe_segment;
use crate::types::{DescribeOptions, DescriptionParts, FieldKind, ParsedExpression};
use regex::Regex;
use std::sync::OnceLock;

const SPECIAL_CHARACTERS: [char; 4] = ['/', '-', ',', '*'];

/// `15W` or `W15`: weekday nearest the given day
fn nearest_weekday_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(\d{1,2})W|W(\d{1,2})").ok())
        .as_ref()
}

/// `L-5`: five days before the last day of the month
fn last_day_offset_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"L-(\d{1,2})").ok())
        .as_ref()
}

/// Turns cron expressions into sentences
///
/// Owns the translation cache; share one instance (it is `Send + Sync`)
/// rather than creating one per call.
///
/// # Examples
///
/// ```
/// use a3s_cron_descriptor::{DescribeOptions, ExpressionDescriptor};
///
/// let descriptor = ExpressionDescriptor::new();
/// let options = DescribeOptions::default();
///
/// assert_eq!(
///     descriptor.describe("*/5 15 * * MON-FRI", &options).unwrap(),
///     "Every 5 minutes, between 03:00 PM and 03:59 PM, Monday through Friday"
/// );
/// ```
#[derive(Debug, Default)]
pub struct ExpressionDescriptor {
    catalog: Catalog,
}

impl ExpressionDescriptor {
    /// Create a descriptor with the built-in translation tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the translation table for a locale
    pub fn register_locale(&self, locale: &str, table: TranslationTable) {
        self.catalog.register(locale, table);
    }

    /// The translation cache
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Parse and describe a cron expression
    pub fn describe(&self, expression: &str, options: &DescribeOptions) -> Result<String> {
        let parsed = ExpressionParser::new(options.parse_options()).parse(expression)?;
        Ok(self.describe_parsed(&parsed, options))
    }

    /// Describe an already parsed expression
    pub fn describe_parsed(&self, parsed: &ParsedExpression, options: &DescribeOptions) -> String {
        let phrases = self.catalog.phrases(options);
        let renderer = Renderer {
            parsed,
            phrases: &phrases,
        };
        renderer.sentence(&renderer.parts())
    }

    /// The individual phrases that make up the description
    pub fn describe_parts(
        &self,
        parsed: &ParsedExpression,
        options: &DescribeOptions,
    ) -> DescriptionParts {
        let phrases = self.catalog.phrases(options);
        Renderer {
            parsed,
            phrases: &phrases,
        }
        .parts()
    }
}

/// Describe an expression in English with default options
pub fn describe(expression: &str) -> Result<String> {
    ExpressionDescriptor::new().describe(expression, &DescribeOptions::default())
}

struct Renderer<'a> {
    parsed: &'a ParsedExpression,
    phrases: &'a Phrases,
}

impl Renderer<'_> {
    fn field(&self, kind: FieldKind) -> &str {
        self.parsed.get(kind)
    }

    fn parts(&self) -> DescriptionParts {
        DescriptionParts {
            time_of_day: self.time_of_day(),
            day_of_month: self.day_of_month(),
            day_of_week: self.day_of_week(),
            month: self.month(),
            year: self.year(),
        }
    }

    fn sentence(&self, parts: &DescriptionParts) -> String {
        let mut description = parts.concat();

        let p = self.phrases;
        let fillers = [
            p.translate("comma_every_minute"),
            p.translate("comma_every_hour"),
            p.translate("comma_every_day"),
            format!(", {}", p.translate("every_minute")),
            format!(", {}", p.translate("every_hour")),
            format!(", {}", p.translate("every_day")),
            format!(", {}", p.translate("every_year")),
        ];
        for filler in fillers.iter().filter(|f| !f.is_empty()) {
            description = description.replace(filler.as_str(), "");
        }

        let trimmed = description.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
        capitalize(trimmed)
    }

    fn time_of_day(&self) -> String {
        let second = self.field(FieldKind::Second);
        let minute = self.field(FieldKind::Minute);
        let hour = self.field(FieldKind::Hour);

        if ![second, minute, hour]
            .iter()
            .any(|f| f.contains(SPECIAL_CHARACTERS))
        {
            return format!(
                "{}{}",
                self.phrases.translate("at_space"),
                format_time(self.phrases, hour, minute, second)
            );
        }

        if second.is_empty()
            && minute.contains('-')
            && !minute.contains([',', '/'])
            && !hour.contains(SPECIAL_CHARACTERS)
        {
            // Minute range within one hour, e.g. "0-10 11"
            let (lo, hi) = minute.split_once('-').unwrap_or((minute, minute));
            return self.phrases.translate_with(
                "every_minute_between_x0_and_x1",
                &[
                    &format_time(self.phrases, hour, lo, ""),
                    &format_time(self.phrases, hour, hi, ""),
                ],
            );
        }

        if second.is_empty()
            && hour.contains(',')
            && !hour.contains(['-', '/'])
            && !is_every_value(FieldKind::Hour, hour)
            && !minute.contains(SPECIAL_CHARACTERS)
        {
            // Several hours at one minute, e.g. "30 6,14,16"
            let hours: Vec<&str> = hour.split(',').collect();
            let mut description = self.phrases.translate("at");
            for (i, h) in hours.iter().enumerate() {
                description.push(' ');
                description.push_str(&format_time(self.phrases, h, minute, ""));
                if i + 2 < hours.len() {
                    description.push(',');
                }
                if i + 2 == hours.len() {
                    description.push_str(&self.phrases.translate("space_and"));
                }
            }
            return description;
        }

        let mut description = self.seconds();
        for part in [self.minutes(), self.hours()] {
            if !description.is_empty() && !part.is_empty() {
                description.push_str(", ");
            }
            description.push_str(&part);
        }
        description
    }

    fn seconds(&self) -> String {
        describe_segment(
            FieldKind::Second,
            self.field(FieldKind::Second),
            &self.phrases.translate("every_second"),
            &SecondFields {
                phrases: self.phrases,
            },
            self.phrases,
        )
    }

    fn minutes(&self) -> String {
        describe_segment(
            FieldKind::Minute,
            self.field(FieldKind::Minute),
            &self.phrases.translate("every_minute"),
            &MinuteFields {
                phrases: self.phrases,
            },
            self.phrases,
        )
    }

    fn hours(&self) -> String {
        describe_segment(
            FieldKind::Hour,
            self.field(FieldKind::Hour),
            &self.phrases.translate("every_hour"),
            &HourFields {
                phrases: self.phrases,
            },
            self.phrases,
        )
    }

    fn day_of_month(&self) -> String {
        let expr = self.field(FieldKind::DayOfMonth);
        let p = self.phrases;

        match expr {
            "L" => return p.translate("comma_on_the_last_day_of_the_month"),
            "WL" | "LW" => return p.translate("comma_on_the_last_weekday_of_the_month"),
            _ => {}
        }

        if let Some(caps) = nearest_weekday_pattern().and_then(|re| re.captures(expr)) {
            let day = caps
                .get(1)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .unwrap_or_default();
            let day_phrase = if day == 1 {
                p.translate("first_weekday")
            } else {
                p.translate_with("weekday_nearest_day_x0", &[&day.to_string()])
            };
            return p.translate_with("comma_on_the_x0_of_the_month", &[&day_phrase]);
        }

        if let Some(caps) = last_day_offset_pattern().and_then(|re| re.captures(expr)) {
            let offset = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            return p.translate_with("comma_x0_days_before_the_last_day_of_the_month", &[offset]);
        }

        describe_segment(
            FieldKind::DayOfMonth,
            expr,
            &p.translate("comma_every_day"),
            &DayOfMonthFields { phrases: p },
            p,
        )
    }

    fn day_of_week(&self) -> String {
        let expr = self.field(FieldKind::DayOfWeek);
        // "*" defers to the day of month, avoiding "every day, every day"
        if expr == "*" {
            return String::new();
        }

        describe_segment(
            FieldKind::DayOfWeek,
            expr,
            &self.phrases.translate("comma_every_day"),
            &DayOfWeekFields {
                phrases: self.phrases,
            },
            self.phrases,
        )
    }

    fn month(&self) -> String {
        describe_segment(
            FieldKind::Month,
            self.field(FieldKind::Month),
            "",
            &MonthFields {
                phrases: self.phrases,
            },
            self.phrases,
        )
    }

    fn year(&self) -> String {
        describe_segment(
            FieldKind::Year,
            self.field(FieldKind::Year),
            "",
            &YearFields {
                phrases: self.phrases,
            },
            self.phrases,
        )
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn parts(expression: &str) -> DescriptionParts {
        let parsed = parse(expression).unwrap();
        ExpressionDescriptor::new().describe_parts(&parsed, &DescribeOptions::default())
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("every minute"), "Every minute");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("每分钟"), "每分钟");
    }

    #[test]
    fn test_parts_keep_their_separators() {
        let parts = parts("*/5 * L JAN *");
        assert_eq!(parts.time_of_day, "every 5 minutes, every hour");
        assert_eq!(parts.day_of_month, ", on the last day of the month");
        assert_eq!(parts.day_of_week, "");
        assert_eq!(parts.month, ", only in January");
        assert_eq!(parts.year, "");
    }

    #[test]
    fn test_last_weekday_of_month() {
        assert_eq!(
            describe("0 12 LW * *").unwrap(),
            "At 12:00 PM, on the last weekday of the month"
        );
        assert_eq!(
            describe("0 12 WL * *").unwrap(),
            "At 12:00 PM, on the last weekday of the month"
        );
    }

    #[test]
    fn test_nearest_weekday() {
        assert_eq!(
            describe("0 12 1W * *").unwrap(),
            "At 12:00 PM, on the first weekday of the month"
        );
        assert_eq!(
            describe("0 12 15W * *").unwrap(),
            "At 12:00 PM, on the weekday nearest day 15 of the month"
        );
        assert_eq!(
            describe("0 12 W15 * *").unwrap(),
            "At 12:00 PM, on the weekday nearest day 15 of the month"
        );
    }

    #[test]
    fn test_days_before_last_day() {
        assert_eq!(
            describe("0 12 L-5 * *").unwrap(),
            "At 12:00 PM, 5 days before the last day of the month"
        );
    }

    #[test]
    fn test_day_of_month_step() {
        assert_eq!(
            describe("0 12 */3 * *").unwrap(),
            "At 12:00 PM, every 3 days"
        );
    }

    #[test]
    fn test_every_minute_between_requires_plain_range() {
        let parts = parts("0-10 11 * * *");
        assert_eq!(parts.time_of_day, "Every minute between 11:00 AM and 11:10 AM");
    }

    #[test]
    fn test_hour_list_covering_whole_day_is_not_enumerated() {
        let parts = parts("0 0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23 * * *");
        assert_eq!(parts.time_of_day, "every hour");
    }

    #[test]
    fn test_catalog_reports_resolved_locale() {
        let descriptor = ExpressionDescriptor::new();
        let options = DescribeOptions::default().with_locale("zh-CN");
        let phrases = descriptor.catalog().phrases(&options);
        assert_eq!(phrases.locale().to_string(), "zh");
        assert!(!phrases.use_24_hour_time_format());
    }

    #[test]
    fn test_descriptor_is_reusable_across_locales() {
        let descriptor = ExpressionDescriptor::new();
        let en = descriptor.describe("* * * * *", &DescribeOptions::default()).unwrap();
        let zh = descriptor
            .describe("* * * * *", &DescribeOptions::default().with_locale("zh"))
            .unwrap();
        assert_eq!(en, "Every minute");
        assert_eq!(zh, "每分钟");
    }
}
