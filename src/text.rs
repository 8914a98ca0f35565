//! UTF-16 offset helpers
//!
//! Every range, cursor and trigger offset in the engine counts UTF-16 code
//! units, while the buffer itself is a Rust `String`. These helpers translate
//! between the two coordinate systems.

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Byte index of a UTF-16 offset.
///
/// Offsets past the end clamp to `text.len()`. An offset that lands inside a
/// surrogate pair floors to the start of that character.
pub fn byte_index(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        let next = units + ch.len_utf16();
        if next > offset {
            return idx;
        }
        units = next;
    }
    text.len()
}

/// Largest character boundary at or before `offset`, in UTF-16 units.
pub fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for ch in text.chars() {
        let next = units + ch.len_utf16();
        if next > offset {
            return units;
        }
        units = next;
    }
    units
}

/// Substring between two UTF-16 offsets, half-open.
///
/// Bounds are clamped to the text and reversed bounds yield an empty slice.
pub fn slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_index(text, start);
    let to = byte_index(text, end);
    if from >= to {
        return "";
    }
    &text[from..to]
}

/// The character that ends exactly at `offset`, if any.
pub fn char_before(text: &str, offset: usize) -> Option<char> {
    let mut units = 0;
    for ch in text.chars() {
        units += ch.len_utf16();
        if units == offset {
            return Some(ch);
        }
        if units > offset {
            return None;
        }
    }
    None
}

/// Replace the UTF-16 span `[start, end)` with `replacement`.
pub fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let from = byte_index(text, start);
    let to = byte_index(text, end.max(start));
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..from]);
    out.push_str(replacement);
    out.push_str(&text[to..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_offsets_match_bytes() {
        assert_eq!(utf16_len("hello"), 5);
        assert_eq!(byte_index("hello", 3), 3);
        assert_eq!(slice("hello", 1, 4), "ell");
    }

    #[test]
    fn astral_chars_count_two_units() {
        let text = "a😀b";
        assert_eq!(utf16_len(text), 4);
        assert_eq!(slice(text, 1, 3), "😀");
        assert_eq!(slice(text, 3, 4), "b");
    }

    #[test]
    fn offset_inside_surrogate_pair_floors() {
        let text = "a😀b";
        assert_eq!(byte_index(text, 2), 1);
        assert_eq!(slice(text, 2, 4), "😀b");
    }

    #[test]
    fn floor_boundary_snaps_out_of_pairs() {
        let text = "a😀b";
        assert_eq!(floor_boundary(text, 2), 1);
        assert_eq!(floor_boundary(text, 3), 3);
        assert_eq!(floor_boundary(text, 50), 4);
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(slice("abc", 2, 10), "c");
        assert_eq!(slice("abc", 3, 1), "");
        assert_eq!(byte_index("abc", 99), 3);
    }

    #[test]
    fn char_before_cursor() {
        assert_eq!(char_before("Hello /", 7), Some('/'));
        assert_eq!(char_before("Hello /", 6), Some(' '));
        assert_eq!(char_before("Hello /", 0), None);
        assert_eq!(char_before("😀", 1), None);
        assert_eq!(char_before("😀", 2), Some('😀'));
    }

    #[test]
    fn splice_replaces_span() {
        assert_eq!(splice("Hello /cli", 6, 10, "X\n\n"), "Hello X\n\n");
        assert_eq!(splice("abc", 1, 1, "-"), "a-bc");
    }
}
