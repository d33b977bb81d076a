//! Wire formats for upstream provider APIs

pub mod google;
