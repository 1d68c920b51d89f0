//! Utility functions

pub mod bytes;
pub mod hashing;
pub mod obfuscate;
pub mod paths;
pub mod text;
pub mod time;

pub use bytes::{byte_count, byte_count_float, format_with_commas, page_count, reverse_int};
pub use hashing::{integrity_bytes, integrity_file, integrity_reader};
pub use obfuscate::{deobfuscate, deobfuscate_id, deobfuscate_url, obfuscate, obfuscate_id};
pub use paths::{file_match, is_file, stat, trunc_filename};
pub use text::{
    capitalize, cf_uuid, chr_last, delete_dupe, finds, fmt_slice, max_line_length, search_term,
    slug, split_as_spaces, titleize, trim_punct, trim_round_bracket,
};
pub use time::{released, short_month, time_distance, valid_day, valid_year, years};
