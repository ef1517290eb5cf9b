//! JSON output for sections and rules.

mod writer;

pub use writer::{
    load_extraction, load_rules, load_sections, save_extraction, to_json_string, write_json,
};
