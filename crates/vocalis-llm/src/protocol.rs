//! Wire format types for provider API protocols
//!
//! Pure serde structs matching the provider's JSON API format, used only at
//! the serialization boundary.

pub mod openai;
