//! Byte-length text helpers.
//!
//! Column arithmetic in the widgets counts bytes, not display width. The
//! helpers here keep that arithmetic but never split a UTF-8 sequence: cuts
//! move to the nearest char boundary (down when truncating, up when skipping).

/// Longest prefix of `s` at most `max` bytes long.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Suffix of `s` after skipping at least `offset` bytes.
pub fn skip_bytes(s: &str, offset: usize) -> &str {
    if offset >= s.len() {
        return "";
    }
    let mut start = offset;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}

/// Truncate to `width` bytes, then right-pad with spaces to exactly `width`.
pub fn fit(s: &str, width: usize) -> String {
    let cut = truncate_bytes(s, width);
    let mut out = String::with_capacity(width);
    out.push_str(cut);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(cut.len())));
    out
}

/// Pad `s` on both sides so it sits centred in `width` bytes. Strings at
/// least `width` long come back unchanged.
pub fn center(s: &str, width: usize) -> String {
    let len = s.len();
    if len >= width {
        return s.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

/// Column and visible slice for a title centred in `width` cells.
///
/// Left padding is `(width - len) / 2`; a title of `width` bytes or more
/// starts at column 0 and is cut to `width` bytes.
pub fn title_layout(width: u16, title: &str) -> (u16, &str) {
    let avail = usize::from(width);
    if title.len() >= avail {
        return (0, truncate_bytes(title, avail));
    }
    let pad = (avail - title.len()) / 2;
    // pad < avail <= u16::MAX
    (pad as u16, title)
}
