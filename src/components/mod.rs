//! UI components.

pub mod photo_field;
