/// Size of the buffer the diagnostics are printed from. Anything the driver reports past this is
/// cut off so the output stays comparable no matter how chatty the driver is.
pub const INFO_LOG_CAPACITY: usize = 1024;

/// A byte buffer of `len` spaces for the driver to write an info log into.
pub fn create_ws_buffer_with_len(len: usize) -> Vec<u8> {
    vec![b' '; len]
}

/// Turns what the driver wrote into `buf` into a `String`, dropping the NUL terminator and
/// anything after it.
pub fn info_log_from_buffer(mut buf: Vec<u8>, written: usize) -> String {
    buf.truncate(written.min(buf.len()));
    if let Some(nul) = buf.iter().position(|&b| b == 0) {
        buf.truncate(nul);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Bounds an info log to [`INFO_LOG_CAPACITY`] bytes without splitting a UTF-8 character.
pub fn truncate_info_log(log: &str) -> &str {
    if log.len() <= INFO_LOG_CAPACITY {
        return log;
    }

    let mut end = INFO_LOG_CAPACITY;
    while !log.is_char_boundary(end) {
        end -= 1;
    }

    &log[..end]
}
