//! Helpers to pull the pieces we need out of a file input's value.
//!
//! Browsers report values such as `C:\fakepath\report.docx`; the local
//! binary passes plain paths, so both separators are handled.

/// Strips any path prefix, keeping only the file name
pub fn display_name(value: &str) -> &str {
    match value.rfind(['\\', '/']) {
        Some(index) => &value[index + 1..],
        None => value,
    }
}

/// Returns the lowercase extension of `filename`, or an empty string if
/// there is no `.` in it
pub fn extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(index) => filename[index + 1..].to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let cases = vec![
            ("C:\\fakepath\\report.docx", "report.docx"),
            ("photo.png", "photo.png"),
            ("/tmp/uploads/photo.png", "photo.png"),
            ("dir\\", ""),
            ("", ""),
        ];

        for (value, expected) in cases {
            assert_eq!(display_name(value), expected, "Failed for value: {}", value);
        }
    }

    #[test]
    fn test_extension() {
        let cases = vec![
            ("photo.PNG", "png"),
            ("archive.tar.gz", "gz"),
            ("README", ""),
            ("trailing.", ""),
            (".hidden", "hidden"),
        ];

        for (filename, expected) in cases {
            assert_eq!(extension(filename), expected, "Failed for filename: {}", filename);
        }
    }
}
