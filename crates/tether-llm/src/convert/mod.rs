//! Conversion between normalized types and engine wire formats

pub mod openai;
