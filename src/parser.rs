//! Cron expression normalizer
//!
//! Accepts 5, 6 or 7 whitespace-separated fields:
//! ```text
//! ┌───────────── second (0-59, optional)
//! │ ┌───────────── minute (0-59)
//! │ │ ┌───────────── hour (0-23)
//! │ │ │ ┌───────────── day of month (1-31, L, W)
//! │ │ │ │ ┌───────────── month (1-12 or JAN-DEC)
//! │ │ │ │ │ ┌───────────── day of week (0-6 or SUN-SAT, #, L)
//! │ │ │ │ │ │ ┌───────────── year (optional)
//! │ │ │ │ │ │ │
//! * * * * * * *
//! ```
//!
//! and rewrites them into a canonical 7-field [`ParsedExpression`] so the
//! description engine only deals with `*`, single values, lists, ranges and
//! `base/step` expressions.

use crate::error::{DescriptorError, Result};
use crate::types::{FieldKind, ParseOptions, ParsedExpression};

/// Three-letter day names, index 0 is Sunday
pub(crate) const DAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Three-letter month names, index 0 is January
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Normalizes raw cron strings
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionParser {
    options: ParseOptions,
}

impl ExpressionParser {
    /// Create a parser with the given options
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse and normalize a cron expression
    ///
    /// # Examples
    ///
    /// ```
    /// use a3s_cron_descriptor::{ExpressionParser, FieldKind, ParseOptions};
    ///
    /// let parsed = ExpressionParser::new(ParseOptions::default())
    ///     .parse("*/5 15 * * MON-FRI")
    ///     .unwrap();
    /// assert_eq!(parsed.get(FieldKind::Hour), "15-15");
    /// assert_eq!(parsed.get(FieldKind::DayOfWeek), "1-5");
    /// ```
    pub fn parse(&self, expression: &str) -> Result<ParsedExpression> {
        let parts: Vec<&str> = expression.split_whitespace().collect();

        let mut fields: [String; 7] = match parts.len() {
            0 => {
                return Err(DescriptorError::Parse(
                    "Expression is empty".to_string(),
                ))
            }
            n if n < 5 => {
                return Err(DescriptorError::Parse(format!(
                    "Expression only has {} parts. At least 5 parts are required.",
                    n
                )))
            }
            5 => layout(None, &parts, None),
            6 if ends_with_year(parts[5]) => layout(None, &parts[..5], Some(parts[5])),
            6 => layout(Some(parts[0]), &parts[1..], None),
            7 => layout(Some(parts[0]), &parts[1..6], Some(parts[6])),
            n => {
                return Err(DescriptorError::Parse(format!(
                    "Expression has too many parts ({}). Expression must not have more than 7 parts.",
                    n
                )))
            }
        };

        self.normalize(&mut fields);

        let parsed = ParsedExpression::from_fields(fields);
        tracing::debug!(expression, canonical = %parsed, "Parsed cron expression");
        Ok(parsed)
    }

    fn normalize(&self, fields: &mut [String; 7]) {
        use FieldKind::*;

        for kind in [DayOfMonth, DayOfWeek] {
            let field = &mut fields[kind.index()];
            *field = field.replace('?', "*");
        }

        for kind in [Second, Minute, Hour] {
            replace_prefix(&mut fields[kind.index()], "0/", "*/");
        }
        for kind in [DayOfMonth, Month, DayOfWeek, Year] {
            replace_prefix(&mut fields[kind.index()], "1/", "*/");
        }

        let dow = DayOfWeek.index();
        let mut tokens = tokenize(&fields[dow]);
        reindex_day_of_week(&mut tokens, self.options.day_of_week_start_index_zero);
        substitute_names(&mut tokens, &DAY_NAMES, 0);
        fields[dow] = render(&tokens);

        let month = Month.index();
        let mut tokens = tokenize(&fields[month]);
        substitute_names(&mut tokens, &MONTH_NAMES, 1);
        fields[month] = render(&tokens);

        if fields[Second.index()] == "0" {
            fields[Second.index()].clear();
        }

        // A single hour next to a repeating minute or second is an interval
        // within that hour: "*/5 3" reads as "*/5 3-3".
        if !fields[Hour.index()].contains(['*', '-', ',', '/'])
            && (repeats(&fields[Minute.index()]) || repeats(&fields[Second.index()]))
        {
            let hour = fields[Hour.index()].clone();
            fields[Hour.index()] = format!("{}-{}", hour, hour);
        }

        for kind in FieldKind::ALL {
            let field = &mut fields[kind.index()];
            if *field == "*/1" {
                *field = "*".to_string();
            }

            if let Some(top) = kind.step_upper_bound() {
                if field.contains('/') && !field.contains(['*', '-', ',']) {
                    if let Some((base, step)) = field.split_once('/') {
                        *field = format!("{}-{}/{}", base, top, step);
                    }
                }
            }
        }
    }
}

/// Parse with default options
pub fn parse(expression: &str) -> Result<ParsedExpression> {
    ExpressionParser::default().parse(expression)
}

fn layout(second: Option<&str>, middle: &[&str], year: Option<&str>) -> [String; 7] {
    [
        second.unwrap_or_default().to_string(),
        middle[0].to_string(),
        middle[1].to_string(),
        middle[2].to_string(),
        middle[3].to_string(),
        middle[4].to_string(),
        year.unwrap_or_default().to_string(),
    ]
}

fn ends_with_year(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].iter().all(u8::is_ascii_digit)
}

fn replace_prefix(field: &mut String, prefix: &str, replacement: &str) {
    if let Some(rest) = field.strip_prefix(prefix) {
        *field = format!("{}{}", replacement, rest);
    }
}

fn repeats(field: &str) -> bool {
    field.contains(['*', '/'])
}

/// A lexical piece of a single field
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(String),
    Word(String),
    Punct(char),
}

fn tokenize(field: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = field.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut run = String::new();
            while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                run.push(d);
                chars.next();
            }
            tokens.push(Token::Number(run));
        } else if c.is_alphabetic() {
            let mut run = String::new();
            while let Some(&a) = chars.peek().filter(|a| a.is_alphabetic()) {
                run.push(a);
                chars.next();
            }
            tokens.push(Token::Word(run));
        } else {
            tokens.push(Token::Punct(c));
            chars.next();
        }
    }

    tokens
}

fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Number(s) | Token::Word(s) => out.push_str(s),
            Token::Punct(c) => out.push(*c),
        }
    }
    out
}

/// Numbers that denote a value, as opposed to a `/step` or `#nth` suffix
fn value_positions(tokens: &[Token]) -> Vec<usize> {
    tokens
        .iter()
        .enumerate()
        .filter(|(i, token)| {
            matches!(token, Token::Number(_))
                && !matches!(
                    i.checked_sub(1).map(|prev| &tokens[prev]),
                    Some(Token::Punct('#')) | Some(Token::Punct('/'))
                )
        })
        .map(|(i, _)| i)
        .collect()
}

fn reindex_day_of_week(tokens: &mut [Token], start_index_zero: bool) {
    for i in value_positions(tokens) {
        let Token::Number(digits) = &tokens[i] else {
            continue;
        };
        let Ok(value) = digits.parse::<u32>() else {
            continue;
        };

        let adjusted = if start_index_zero {
            if value == 7 {
                0
            } else {
                continue;
            }
        } else {
            value.saturating_sub(1)
        };
        tokens[i] = Token::Number(adjusted.to_string());
    }
}

fn substitute_names(tokens: &mut [Token], names: &[&str], first: u32) {
    for token in tokens.iter_mut() {
        let Token::Word(word) = token else {
            continue;
        };
        if let Some(pos) = names.iter().position(|name| name.eq_ignore_ascii_case(word)) {
            *token = Token::Number((first + pos as u32).to_string());
        }
    }
}

/// Value for a three-letter day or month name, if it is one
pub(crate) fn name_value(kind: FieldKind, word: &str) -> Option<u32> {
    let (names, first): (&[&str], u32) = match kind {
        FieldKind::DayOfWeek => (&DAY_NAMES, 0),
        FieldKind::Month => (&MONTH_NAMES, 1),
        _ => return None,
    };
    names
        .iter()
        .position(|name| name.eq_ignore_ascii_case(word))
        .map(|pos| first + pos as u32)
}
