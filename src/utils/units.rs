//! Conversions between megabytes and bytes.
//!
//! One megabyte is 1024 * 1024 bytes. Values are kept unrounded;
//! only `format_megabytes` rounds, and only for display.

const BYTES_PER_KB: f64 = 1024.0;

/// Converts megabytes to bytes
pub fn mb_to_bytes(mb: f64) -> f64 {
    mb * BYTES_PER_KB * BYTES_PER_KB
}

/// Converts bytes to megabytes
pub fn bytes_to_mb(bytes: f64) -> f64 {
    bytes / BYTES_PER_KB / BYTES_PER_KB
}

/// Converts bytes to kilobytes
pub fn bytes_to_kb(bytes: f64) -> f64 {
    bytes / BYTES_PER_KB
}

/// Converts kilobytes to megabytes
pub fn kb_to_mb(kb: f64) -> f64 {
    kb / BYTES_PER_KB
}

/// Renders a size in bytes as megabytes with exactly two decimals.
/// Ties round up (0.625 gives "0.63").
pub fn format_megabytes(bytes: u64) -> String {
    let hundredths = (bytes_to_mb(bytes as f64) * 100.0).round();
    format!("{:.2}", hundredths / 100.0)
}
