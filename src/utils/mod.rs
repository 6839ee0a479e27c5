//! Small shared helpers.

pub mod html;
