//! Label-anchored field extraction from raw prescription text.

pub mod fields;

pub use fields::extract_fields;
