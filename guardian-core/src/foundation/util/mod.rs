pub mod hex_fmt;
pub mod time;
