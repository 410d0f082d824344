//! Wire format types for engine protocols

pub mod openai;
