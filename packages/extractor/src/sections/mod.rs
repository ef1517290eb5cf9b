//! Section building from detected headings.

mod builder;
mod layout;

pub use builder::{anchors_for_title, build_sections};
pub use layout::{SectionLayout, SectionSpan};
