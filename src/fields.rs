//! Phrase templates for each cron field

use crate::locale::Phrases;
use crate::segment::FieldCallbacks;

/// Format a time of day, e.g. `("14", "2", "30")` → `02:02:30 PM`
///
/// Uses the locale's AM/PM markers unless 24-hour formatting is on. An
/// empty `second` omits the seconds component.
pub fn format_time(phrases: &Phrases, hour: &str, minute: &str, second: &str) -> String {
    let mut hour_text = hour.to_string();
    let mut period = String::new();

    if !phrases.use_24_hour_time_format() {
        if let Ok(h) = hour.trim().parse::<u32>() {
            let key = if h >= 12 { "pm_period" } else { "am_period" };
            if let Some(marker) = phrases.try_translate(key).filter(|m| !m.is_empty()) {
                period = format!(" {}", marker);
            }
            hour_text = match h {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            }
            .to_string();
        }
    }

    let second = if second.is_empty() {
        String::new()
    } else {
        format!(":{:0>2}", second)
    };

    format!("{:0>2}:{:0>2}{}{}", hour_text, minute, second, period)
}

fn is_zero(value: &str) -> bool {
    value.parse::<u32>().map(|v| v == 0).unwrap_or(false)
}

pub struct SecondFields<'a> {
    pub phrases: &'a Phrases,
}

impl FieldCallbacks for SecondFields<'_> {
    fn single_item(&self, value: &str) -> String {
        value.to_string()
    }

    fn interval_format(&self, step: &str) -> String {
        self.phrases.translate_with("every_x0_seconds", &[step])
    }

    fn between_format(&self, _expr: &str) -> String {
        self.phrases.translate("seconds_x0_through_x1_past_the_minute")
    }

    fn description_format(&self, expr: &str) -> String {
        match expr.parse::<u32>() {
            Ok(0) => String::new(),
            Ok(seconds) if seconds >= 20 => self
                .phrases
                .try_translate("at_x0_seconds_past_the_minute_gt20")
                .unwrap_or_else(|| self.phrases.translate("at_x0_seconds_past_the_minute")),
            _ => self.phrases.translate("at_x0_seconds_past_the_minute"),
        }
    }

    fn range_format(&self, _expr: &str) -> String {
        self.phrases
            .try_translate("comma_min_x0_through_min_x1")
            .unwrap_or_else(|| self.phrases.translate("comma_x0_through_x1"))
    }
}

pub struct MinuteFields<'a> {
    pub phrases: &'a Phrases,
}

impl FieldCallbacks for MinuteFields<'_> {
    fn single_item(&self, value: &str) -> String {
        value.to_string()
    }

    fn interval_format(&self, step: &str) -> String {
        self.phrases.translate_with("every_x0_minutes", &[step])
    }

    fn between_format(&self, _expr: &str) -> String {
        self.phrases.translate("minutes_x0_through_x1_past_the_hour")
    }

    fn description_format(&self, expr: &str) -> String {
        if is_zero(expr) {
            String::new()
        } else {
            self.phrases.translate("at_x0_minutes_past_the_hour")
        }
    }

    fn range_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }
}

pub struct HourFields<'a> {
    pub phrases: &'a Phrases,
}

impl FieldCallbacks for HourFields<'_> {
    fn single_item(&self, value: &str) -> String {
        format_time(self.phrases, value, "0", "")
    }

    fn interval_format(&self, step: &str) -> String {
        self.phrases.translate_with("every_x0_hours", &[step])
    }

    fn between_format(&self, _expr: &str) -> String {
        self.phrases.translate("between_x0_and_x1")
    }

    fn description_format(&self, _expr: &str) -> String {
        self.phrases.translate("at_x0")
    }

    fn range_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }
}

pub struct DayOfMonthFields<'a> {
    pub phrases: &'a Phrases,
}

impl FieldCallbacks for DayOfMonthFields<'_> {
    fn single_item(&self, value: &str) -> String {
        value.to_string()
    }

    fn interval_format(&self, step: &str) -> String {
        if step == "1" {
            self.phrases.translate("comma_every_day")
        } else {
            self.phrases.translate("comma_every_x0_days")
        }
    }

    fn between_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_between_day_x0_and_x1_of_the_month")
    }

    fn description_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_on_day_x0_of_the_month")
    }

    fn range_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }
}

/// Day of week, including `N#k` (k-th weekday) and `NL` (last weekday)
pub struct DayOfWeekFields<'a> {
    pub phrases: &'a Phrases,
}

impl DayOfWeekFields<'_> {
    fn ordinal(&self, nth: &str) -> String {
        let key = match nth {
            "1" => "first",
            "2" => "second",
            "3" => "third",
            "4" => "fourth",
            "5" => "fifth",
            _ => return String::new(),
        };
        self.phrases.translate(key)
    }
}

impl FieldCallbacks for DayOfWeekFields<'_> {
    fn single_item(&self, value: &str) -> String {
        let day = match value.split_once('#') {
            Some((day, _)) => day.to_string(),
            None => value.replace('L', ""),
        };
        match day.parse::<u32>() {
            Ok(index) => self.phrases.weekday_name(index),
            Err(_) => day,
        }
    }

    fn interval_format(&self, step: &str) -> String {
        self.phrases
            .translate_with("comma_every_x0_days_of_the_week", &[step])
    }

    fn between_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }

    fn description_format(&self, expr: &str) -> String {
        if let Some((_, nth)) = expr.split_once('#') {
            format!(
                "{}{}{}",
                self.phrases.translate("comma_on_the"),
                self.ordinal(nth),
                self.phrases.translate("space_x0_of_the_month")
            )
        } else if expr.contains('L') {
            self.phrases.translate("comma_on_the_last_x0_of_the_month")
        } else {
            self.phrases.translate("comma_only_on_x0")
        }
    }

    fn range_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }
}

pub struct MonthFields<'a> {
    pub phrases: &'a Phrases,
}

impl FieldCallbacks for MonthFields<'_> {
    fn single_item(&self, value: &str) -> String {
        match value.parse::<u32>() {
            Ok(month @ 1..=12) => self.phrases.month_name(month),
            _ => value.to_string(),
        }
    }

    fn interval_format(&self, step: &str) -> String {
        self.phrases.translate_with("comma_every_x0_months", &[step])
    }

    fn between_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }

    fn description_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_only_in_x0")
    }

    fn range_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }
}

/// Years are rendered as written
pub struct YearFields<'a> {
    pub phrases: &'a Phrases,
}

impl FieldCallbacks for YearFields<'_> {
    fn single_item(&self, value: &str) -> String {
        value.to_string()
    }

    fn interval_format(&self, step: &str) -> String {
        self.phrases.translate_with("comma_every_x0_years", &[step])
    }

    fn between_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }

    fn description_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_only_in_x0")
    }

    fn range_format(&self, _expr: &str) -> String {
        self.phrases.translate("comma_x0_through_x1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Catalog;
    use crate::types::DescribeOptions;

    fn phrases(use_24_hour: bool) -> Phrases {
        Catalog::new().phrases(&DescribeOptions::default().with_24_hour_time_format(use_24_hour))
    }

    #[test]
    fn test_format_time_12_hour() {
        let p = phrases(false);
        assert_eq!(format_time(&p, "0", "0", ""), "12:00 AM");
        assert_eq!(format_time(&p, "9", "46", ""), "09:46 AM");
        assert_eq!(format_time(&p, "12", "23", ""), "12:23 PM");
        assert_eq!(format_time(&p, "23", "0", ""), "11:00 PM");
        assert_eq!(format_time(&p, "14", "02", "30"), "02:02:30 PM");
    }

    #[test]
    fn test_format_time_24_hour() {
        let p = phrases(true);
        assert_eq!(format_time(&p, "0", "0", ""), "00:00");
        assert_eq!(format_time(&p, "23", "5", ""), "23:05");
        assert_eq!(format_time(&p, "14", "2", "7"), "14:02:07");
    }

    #[test]
    fn test_second_description_format() {
        let p = phrases(false);
        let seconds = SecondFields { phrases: &p };
        assert_eq!(seconds.description_format("0"), "");
        assert_eq!(seconds.description_format("10"), "at {0} seconds past the minute");
        assert_eq!(seconds.description_format("30"), "at {0} seconds past the minute");
        assert_eq!(seconds.range_format("1-5"), ", {0} through {1}");
    }

    #[test]
    fn test_minute_zero_is_omitted() {
        let p = phrases(false);
        let minutes = MinuteFields { phrases: &p };
        assert_eq!(minutes.description_format("0"), "");
        assert_eq!(minutes.description_format("00"), "");
        assert_eq!(minutes.description_format("5"), "at {0} minutes past the hour");
    }

    #[test]
    fn test_day_of_week_single_item() {
        let p = phrases(false);
        let days = DayOfWeekFields { phrases: &p };
        assert_eq!(days.single_item("1"), "Monday");
        assert_eq!(days.single_item("1#3"), "Monday");
        assert_eq!(days.single_item("4L"), "Thursday");
        assert_eq!(days.single_item("X"), "X");
    }

    #[test]
    fn test_day_of_week_description_format() {
        let p = phrases(false);
        let days = DayOfWeekFields { phrases: &p };
        assert_eq!(days.description_format("1#3"), ", on the third {0} of the month");
        assert_eq!(days.description_format("5L"), ", on the last {0} of the month");
        assert_eq!(days.description_format("1"), ", only on {0}");
        assert_eq!(days.description_format("1#9"), ", on the  {0} of the month");
    }

    #[test]
    fn test_day_of_month_interval() {
        let p = phrases(false);
        let days = DayOfMonthFields { phrases: &p };
        assert_eq!(days.interval_format("1"), ", every day");
        assert_eq!(days.interval_format("3"), ", every {0} days");
    }

    #[test]
    fn test_month_single_item() {
        let p = phrases(false);
        let months = MonthFields { phrases: &p };
        assert_eq!(months.single_item("3"), "March");
        assert_eq!(months.single_item("13"), "13");
    }

    #[test]
    fn test_year_single_item() {
        let p = phrases(false);
        let years = YearFields { phrases: &p };
        assert_eq!(years.single_item("2013"), "2013");
        assert_eq!(years.interval_format("2"), ", every 2 years");
    }
}
