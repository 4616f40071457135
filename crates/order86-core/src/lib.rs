//! Core types and data loading for the Order of 86 wizard showcase.
//!
//! This crate provides:
//! - The [`WizardRecord`] attribute model and the [`Order`] taxonomy
//! - The lore markup tokenizer for the `*emphasis*` convention
//! - The read-only [`WizardStore`] loaded once at process start

mod error;
pub mod lore;
mod order;
mod store;
mod wizard;

pub use error::{Error, Result};
pub use order::Order;
pub use store::WizardStore;
pub use wizard::WizardRecord;
