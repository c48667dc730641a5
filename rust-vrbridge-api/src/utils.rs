use std::str;
use time::OffsetDateTime;

// Returns the current time in milliseconds
pub fn timestamp() -> f64 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 * 1e-6
}

// Decodes a nul terminated buffer filled by the runtime.
// Returns None when the buffer holds no characters or invalid UTF-8.
pub fn string_from_buffer(buffer: &[u8]) -> Option<String> {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    if end == 0 {
        return None;
    }
    str::from_utf8(&buffer[..end]).ok().map(String::from)
}

// Vulkan extension lists are reported as a single space separated string
pub fn split_extension_names(names: &str) -> Vec<String> {
    names.split_whitespace().map(String::from).collect()
}
