//! Encodings used to store terrain data in ordinary images.

pub mod terrain_rgb;
