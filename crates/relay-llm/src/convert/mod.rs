//! Conversion between chat types and provider wire formats

pub mod google;
