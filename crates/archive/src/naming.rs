//! Deterministic part filenames for the on-disk mirror.
//!
//! The scheme is `<title>_<id>_partNN_<start_timestamp>.<ext>`: the
//! sanitized broadcast title keeps names human-readable, the video id and
//! part timestamp make them checkable against the source, and the
//! zero-padded index keeps parts of one broadcast sorted.

const MAX_TITLE_LEN: usize = 40;

const DEFAULT_EXTENSION: &str = "flv";

/// Strip every character outside `[A-Za-z0-9]` and truncate to 40 chars.
#[inline]
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_TITLE_LEN)
        .collect()
}

/// Reduce a listing video id to its numeric form.
///
/// Listing ids are prefixed strings (e.g. `"b12345678"`); the archive
/// metadata API is keyed by the digits alone. Dots are kept as some ids
/// carry a fractional component.
#[inline]
pub fn extract_numeric_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// File extension taken from the last path segment of a part URL.
///
/// Falls back to `flv` when the URL has no usable extension.
pub fn file_extension(url: &str) -> &str {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .rsplit('/')
        .next()
        .unwrap_or(url);

    match path.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 5
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext
        }
        _ => DEFAULT_EXTENSION,
    }
}

/// Build the mirror filename for one part of a broadcast.
pub fn part_file_name(title: &str, numeric_id: &str, index: usize, part: &crate::Part) -> String {
    format!(
        "{}_{}_part{:02}_{}.{}",
        sanitize_title(title),
        numeric_id,
        index,
        part.start_timestamp,
        file_extension(&part.video_file_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Part;

    #[test]
    fn sanitize_strips_non_alphanumerics() {
        assert_eq!(sanitize_title("Morning Stream #3!"), "MorningStream3");
        assert_eq!(sanitize_title("___"), "");
        assert_eq!(sanitize_title("día de fútbol"), "dadeftbol");
    }

    #[test]
    fn sanitize_truncates_to_forty_chars() {
        let long = "x".repeat(200);
        assert_eq!(sanitize_title(&long).len(), 40);

        // Multi-byte input never pushes the sanitized title past the cap.
        let mixed = "é12345678901234567890123456789012345678901234567890";
        assert!(sanitize_title(mixed).len() <= 40);
    }

    #[test]
    fn numeric_id_keeps_digits_and_dots() {
        assert_eq!(extract_numeric_id("b12345678"), "12345678");
        assert_eq!(extract_numeric_id("a314.5"), "314.5");
        assert_eq!(extract_numeric_id("abc"), "");
    }

    #[test]
    fn extension_from_url_with_fallback() {
        assert_eq!(file_extension("http://cdn.example/archive/part0.flv"), "flv");
        assert_eq!(
            file_extension("http://cdn.example/archive/part0.mp4?token=abc"),
            "mp4"
        );
        assert_eq!(file_extension("http://cdn.example/archive/part0"), "flv");
        assert_eq!(file_extension("http://cdn.example/archive/.hidden"), "flv");
        assert_eq!(
            file_extension("http://cdn.example/a.verylongext/part"),
            "flv"
        );
    }

    #[test]
    fn part_file_name_format() {
        let part = Part {
            start_timestamp: 1376000000,
            file_size: 1000,
            video_file_url: "http://cdn.example/archive/0.flv".to_string(),
        };
        assert_eq!(
            part_file_name("Morning Stream", "12345678", 0, &part),
            "MorningStream_12345678_part00_1376000000.flv"
        );
        assert_eq!(
            part_file_name("Morning Stream", "12345678", 7, &part),
            "MorningStream_12345678_part07_1376000000.flv"
        );
    }
}
