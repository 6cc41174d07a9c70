//! Static mapping from file extensions to content-types.
//!
//! Only used to build the `accept` hint of the picker. It plays no part in
//! deciding whether a selection is valid.

use std::collections::HashMap;
use once_cell::sync::Lazy;

static CONTENT_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("psd", "image/vnd.adobe.photoshop"),
        ("pdf", "application/pdf"),
        ("doc", "application/msword"),
        ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        ("odt", "application/vnd.oasis.opendocument.text"),
        ("rtf", "application/rtf"),
        ("ppt", "application/vnd.ms-powerpoint"),
        ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
        ("pps", "application/vnd.ms-powerpoint"),
        ("ppsx", "application/vnd.openxmlformats-officedocument.presentationml.slideshow"),
        ("xls", "application/vnd.ms-excel"),
        ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        ("xlsb", "application/vnd.ms-excel.sheet.binary.macroenabled.12"),
        ("pub", "application/x-mspublisher"),
        ("zip", "application/zip"),
        ("csv", "text/csv"),
        ("html", "text/html"),
        ("txt", "text/plain"),
        ("xsl", "text/xml"),
        ("xslt", "text/xml"),
    ])
});

/// Looks up the content-type of a lowercase extension (without the dot)
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    CONTENT_TYPES.get(extension).copied()
}

/// Builds the comma separated `accept` value for a list of extensions.
///
/// Unknown extensions are skipped and repeated content-types (`jpg` and
/// `jpeg`) only appear once. Returns `None` when nothing maps.
pub fn accept_filter<S: AsRef<str>>(extensions: &[S]) -> Option<String> {
    let mut content_types: Vec<&'static str> = Vec::new();

    for content_type in extensions.iter().filter_map(|ext| content_type_for(ext.as_ref())) {
        if !content_types.contains(&content_type) {
            content_types.push(content_type);
        }
    }

    if content_types.is_empty() {
        None
    } else {
        Some(content_types.join(","))
    }
}
