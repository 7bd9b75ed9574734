//! Locale resolution, translation tables and calendar names
//!
//! Translation tables are flat JSON maps from a phrase key to a template
//! with positional `{0}`, `{1}` placeholders. English and Chinese tables are
//! embedded in the crate; hosts can register more at runtime.
//!
//! Weekday and month names come from chrono's locale data.

use crate::error::Result;
use crate::types::DescribeOptions;
use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Locale used when nothing else resolves
pub const DEFAULT_LOCALE: &str = "en";

/// Embedded translation tables, keyed by locale
const BUILTIN_TABLES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("zh", include_str!("../locales/zh.json")),
];

/// A parsed locale tag such as `en`, `en-GB` or `zh_CN`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    language: String,
    region: Option<String>,
}

impl LocaleTag {
    /// Parse a tag; `-` and `_` are equivalent separators
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.trim().split(['-', '_']).filter(|p| !p.is_empty());
        let language = parts
            .next()
            .unwrap_or(DEFAULT_LOCALE)
            .to_ascii_lowercase();
        let region = parts.next().map(|r| r.to_ascii_uppercase());
        Self { language, region }
    }

    /// Language subtag, lower-case
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Region subtag, upper-case
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Tag without its region
    pub fn base(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

/// Phrase templates for one locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Build a table from key/template pairs
    pub fn from_map(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Decode a table from a JSON object of strings
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw template for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a template and substitute positional parameters
    ///
    /// A missing key yields the key itself when `force` is set, and `None`
    /// otherwise so the caller can try another template.
    pub fn translate(&self, key: &str, params: &[&str], force: bool) -> Option<String> {
        match self.get(key) {
            Some(template) => Some(interpolate(template, params)),
            None if force => Some(key.to_string()),
            None => None,
        }
    }
}

/// Replace `{0}`, `{1}`, ... with the matching parameter
///
/// Placeholders without a parameter are left untouched, so a template can be
/// filled in two passes.
pub fn interpolate(template: &str, params: &[&str]) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            params.get(index).map(|param| (close, *param))
        });

        match substituted {
            Some((close, param)) => {
                out.push_str(param);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Cache of translation tables, filled lazily once per locale
///
/// Safe to share between threads.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: RwLock<HashMap<LocaleTag, Arc<TranslationTable>>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the table for a locale
    pub fn register(&self, locale: &str, table: TranslationTable) {
        let tag = LocaleTag::parse(locale);
        tracing::debug!(locale = %tag, entries = table.len(), "Registered translation table");
        self.tables
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(tag, Arc::new(table));
    }

    /// Resolve a locale to a table
    ///
    /// Tries the full tag, then its base language when `fallback_to_base`
    /// is set, then [`DEFAULT_LOCALE`]. Returns the tag that resolved.
    pub fn resolve(&self, locale: &str, fallback_to_base: bool) -> (LocaleTag, Arc<TranslationTable>) {
        let requested = LocaleTag::parse(locale);

        let mut candidates = vec![requested.clone()];
        if fallback_to_base && requested.region().is_some() {
            candidates.push(requested.base());
        }

        for tag in candidates {
            if let Some(table) = self.load(&tag) {
                return (tag, table);
            }
        }

        tracing::warn!(
            locale = %requested,
            fallback = DEFAULT_LOCALE,
            "No translation table for locale, using default"
        );
        let tag = LocaleTag::parse(DEFAULT_LOCALE);
        let table = self.load(&tag).unwrap_or_default();
        (tag, table)
    }

    /// Bundle the resolved table with the formatting options
    pub fn phrases(&self, options: &DescribeOptions) -> Phrases {
        let (locale, table) = self.resolve(&options.locale, options.fallback_to_base_language);
        Phrases {
            table,
            locale,
            use_24_hour_time_format: options.use_24_hour_time_format,
        }
    }

    fn load(&self, tag: &LocaleTag) -> Option<Arc<TranslationTable>> {
        if let Some(table) = self
            .tables
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(tag)
        {
            return Some(Arc::clone(table));
        }

        let key = tag.to_string();
        let json = BUILTIN_TABLES
            .iter()
            .find(|(locale, _)| *locale == key)
            .map(|(_, json)| *json)?;

        let table = match TranslationTable::from_json(json) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                tracing::error!(locale = %tag, "Embedded translation table is invalid: {}", e);
                return None;
            }
        };
        tracing::debug!(locale = %tag, entries = table.len(), "Loaded translation table");

        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        Some(Arc::clone(tables.entry(tag.clone()).or_insert(table)))
    }
}

/// Which calendar name to look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// Index 0 is Sunday
    Weekday,
    /// Index 1 is January
    Month,
}

/// Full localized weekday or month name
///
/// Locales without calendar data use English names. An out-of-range index
/// is returned as written.
pub fn localized_name(locale: &LocaleTag, kind: NameKind, index: u32) -> String {
    let date = match kind {
        // 2023-01-01 is a Sunday
        NameKind::Weekday if index < 7 => NaiveDate::from_ymd_opt(2023, 1, 1 + index),
        NameKind::Month => NaiveDate::from_ymd_opt(2023, index, 1),
        NameKind::Weekday => None,
    };
    let pattern = match kind {
        NameKind::Weekday => "%A",
        NameKind::Month => "%B",
    };

    let calendar = chrono_locale(locale).unwrap_or(chrono::Locale::en_US);
    match date.and_then(|d| d.and_hms_opt(12, 0, 0)) {
        Some(naive) => Utc
            .from_utc_datetime(&naive)
            .format_localized(pattern, calendar)
            .to_string(),
        None => index.to_string(),
    }
}

fn chrono_locale(tag: &LocaleTag) -> Option<chrono::Locale> {
    use chrono::Locale;

    let locale = match (tag.language(), tag.region()) {
        ("en", Some("GB")) => Locale::en_GB,
        ("en", Some("AU")) => Locale::en_AU,
        ("en", Some("CA")) => Locale::en_CA,
        ("en", _) => Locale::en_US,
        ("zh", Some("TW")) => Locale::zh_TW,
        ("zh", Some("HK")) => Locale::zh_HK,
        ("zh", _) => Locale::zh_CN,
        ("de", Some("AT")) => Locale::de_AT,
        ("de", Some("CH")) => Locale::de_CH,
        ("de", _) => Locale::de_DE,
        ("fr", Some("CA")) => Locale::fr_CA,
        ("fr", _) => Locale::fr_FR,
        ("es", Some("MX")) => Locale::es_MX,
        ("es", _) => Locale::es_ES,
        ("pt", Some("PT")) => Locale::pt_PT,
        ("pt", _) => Locale::pt_BR,
        ("it", _) => Locale::it_IT,
        ("nl", _) => Locale::nl_NL,
        ("ja", _) => Locale::ja_JP,
        ("ko", _) => Locale::ko_KR,
        ("ru", _) => Locale::ru_RU,
        ("uk", _) => Locale::uk_UA,
        ("pl", _) => Locale::pl_PL,
        ("sv", _) => Locale::sv_SE,
        ("tr", _) => Locale::tr_TR,
        _ => return None,
    };
    Some(locale)
}

/// Translation and formatting state for one description run
#[derive(Debug, Clone)]
pub struct Phrases {
    table: Arc<TranslationTable>,
    locale: LocaleTag,
    use_24_hour_time_format: bool,
}

impl Phrases {
    /// Build from an explicit table, bypassing the catalog
    pub fn new(table: Arc<TranslationTable>, locale: LocaleTag, use_24_hour_time_format: bool) -> Self {
        Self {
            table,
            locale,
            use_24_hour_time_format,
        }
    }

    /// The locale whose table is in use
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    pub fn use_24_hour_time_format(&self) -> bool {
        self.use_24_hour_time_format
    }

    /// Translate a key; falls back to the key itself
    pub fn translate(&self, key: &str) -> String {
        self.translate_with(key, &[])
    }

    /// Translate a key with positional parameters; falls back to the key
    pub fn translate_with(&self, key: &str, params: &[&str]) -> String {
        self.table
            .translate(key, params, true)
            .unwrap_or_else(|| key.to_string())
    }

    /// Translate a key only if the table defines it
    pub fn try_translate(&self, key: &str) -> Option<String> {
        self.table.translate(key, &[], false)
    }

    pub fn weekday_name(&self, index: u32) -> String {
        localized_name(&self.locale, NameKind::Weekday, index)
    }

    pub fn month_name(&self, index: u32) -> String {
        localized_name(&self.locale, NameKind::Month, index)
    }
}
