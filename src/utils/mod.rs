//! Small shared helpers.

pub mod html;
pub mod mime;
pub mod path;
