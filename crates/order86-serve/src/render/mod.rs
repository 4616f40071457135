//! HTML rendering for wizard profile pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time
//! HTML generation with automatic XSS protection; every dynamic value
//! from a wizard record is escaped. The only `PreEscaped` content is
//! static CSS, the enum-derived order color, and JSON produced by
//! `serde_json` with `<` hardened.

pub mod components;
pub mod wizard;
