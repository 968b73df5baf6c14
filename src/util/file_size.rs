use constants::{FILE_SIZE_STEP, FILE_SIZE_UNITS};

/// Formats a byte count into a human-readable string (e.g., "1.5 KB").
///
/// The value is rounded to at most two decimals and printed without trailing
/// zeros. Sizes past the last unit are expressed in TB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", FILE_SIZE_UNITS[0]);
    }

    let i = magnitude(bytes).min(FILE_SIZE_UNITS.len() - 1);
    let value = bytes as f64 / (FILE_SIZE_STEP as f64).powi(i as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", FILE_SIZE_UNITS[i])
}

/// `floor(log1024(bytes))`, computed on the integer so exact powers of 1024
/// land on the right unit.
fn magnitude(bytes: u64) -> usize {
    let log2 = (u64::BITS - 1 - bytes.leading_zeros()) as usize;
    log2 / FILE_SIZE_STEP.trailing_zeros() as usize
}
