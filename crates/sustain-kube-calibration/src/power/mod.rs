//! Host power consumption models.

pub mod host;
pub mod shadow;
pub mod sustain;
