//! # a3s-cron-descriptor
//!
//! Human-readable descriptions of cron expressions.
//!
//! ## Overview
//!
//! `a3s-cron-descriptor` turns expressions such as `*/5 15 * * MON-FRI` into
//! sentences such as "Every 5 minutes, between 03:00 PM and 03:59 PM, Monday
//! through Friday". Five-, six- and seven-field expressions are accepted, with
//! optional seconds and year fields, `?`, names, steps, ranges, lists and the
//! `L`, `W` and `#` day forms.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_cron_descriptor::{describe, DescribeOptions, ExpressionDescriptor};
//!
//! # fn example() -> a3s_cron_descriptor::Result<()> {
//! // English with default options
//! assert_eq!(describe("30 11 * * 1-5")?, "At 11:30 AM, Monday through Friday");
//!
//! // Reuse one descriptor for other locales and formats
//! let descriptor = ExpressionDescriptor::new();
//! let options = DescribeOptions::default()
//!     .with_locale("en-US")
//!     .with_24_hour_time_format(true);
//! assert_eq!(descriptor.describe("0 23 ? * MON-FRI", &options)?, "At 23:00, Monday through Friday");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Architecture
//!
//! - **ExpressionParser** - splits and normalizes an expression into seven canonical fields
//! - **describe_segment** - shared engine that describes one field through [`FieldCallbacks`]
//! - **Catalog** - thread-safe cache of translation tables with locale fallback
//! - **ExpressionDescriptor** - assembles the field phrases into one sentence

pub mod descriptor;
pub mod error;
pub mod fields;
pub mod interval;
pub mod locale;
pub mod parser;
pub mod segment;
pub mod types;

// Re-export core types
pub use descriptor::{describe, ExpressionDescriptor};
pub use error::{DescriptorError, Result};
pub use interval::{detect_interval, is_every_value};
pub use locale::{
    interpolate, localized_name, Catalog, LocaleTag, NameKind, Phrases, TranslationTable,
    DEFAULT_LOCALE,
};
pub use parser::{parse, ExpressionParser};
pub use segment::{describe_segment, FieldCallbacks};
pub use types::{DescribeOptions, DescriptionParts, FieldKind, ParseOptions, ParsedExpression};
