//! Shared utility functions.
//!
//! - `html`: escaping for field values interpolated into markup
//! - `date`: display formatting for item dates

mod date;
mod html;

pub use date::{format_date, format_epoch_millis, INVALID_DATE};
pub use html::escape_html;
