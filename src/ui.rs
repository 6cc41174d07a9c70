//! The UI collaborators a selector is attached to.
//!
//! A host provides a [`FileInput`] (the picker control) and a [`Document`]
//! that resolves target ids to [`DisplayTarget`]s. In-memory versions are
//! provided for the command line front end and for tests.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use derive_more::Display;

use crate::utils::filename::display_name;

/// The file handle a picker exposes for its current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
}

/// A file picker control
pub trait FileInput {
    /// Current value of the control, as the browser reports it. May contain
    /// a path prefix, empty when nothing is selected.
    fn value(&self) -> String;

    /// Handle to the selected file, if the runtime exposes one
    fn selected_file(&self) -> Option<SelectedFile>;

    /// Resets the control so that no file is selected
    fn clear(&mut self);

    /// Restricts what the picker offers. Advisory only.
    fn set_accept(&mut self, accept: &str);
}

/// A region of the page that can receive a status message
pub trait DisplayTarget {
    fn set_text(&self, text: &str);
    fn set_html(&self, html: &str);
}

/// Resolves target ids to display regions
pub trait Document {
    fn region(&self, id: &str) -> Option<Rc<dyn DisplayTarget>>;
}

/// Content last written to a [`MemoryRegion`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Display)]
pub enum RegionContent {
    #[default]
    #[display("")]
    Empty,
    #[display("{_0}")]
    Text(String),
    #[display("{_0}")]
    Html(String),
}

impl RegionContent {
    pub fn is_empty(&self) -> bool {
        match self {
            RegionContent::Empty => true,
            RegionContent::Text(s) | RegionContent::Html(s) => s.is_empty(),
        }
    }
}

/// A display region that keeps what was written to it
#[derive(Debug, Default)]
pub struct MemoryRegion {
    content: RefCell<RegionContent>,
}

impl MemoryRegion {
    pub fn content(&self) -> RegionContent {
        self.content.borrow().clone()
    }

    pub fn text(&self) -> String {
        self.content.borrow().to_string()
    }
}

impl DisplayTarget for MemoryRegion {
    fn set_text(&self, text: &str) {
        *self.content.borrow_mut() = RegionContent::Text(text.to_owned());
    }

    fn set_html(&self, html: &str) {
        *self.content.borrow_mut() = RegionContent::Html(html.to_owned());
    }
}

/// A set of named in-memory regions
#[derive(Debug, Default)]
pub struct MemoryDocument {
    regions: HashMap<String, Rc<MemoryRegion>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document with one empty region per id
    pub fn with_regions<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut document = Self::new();
        for id in ids {
            document.add_region(id);
        }
        document
    }

    /// Adds a region, or returns the existing one with the same id
    pub fn add_region(&mut self, id: &str) -> Rc<MemoryRegion> {
        self.regions.entry(id.to_owned()).or_default().clone()
    }

    pub fn get(&self, id: &str) -> Option<Rc<MemoryRegion>> {
        self.regions.get(id).cloned()
    }
}

impl Document for MemoryDocument {
    fn region(&self, id: &str) -> Option<Rc<dyn DisplayTarget>> {
        self.regions
            .get(id)
            .map(|region| region.clone() as Rc<dyn DisplayTarget>)
    }
}

/// A file input that holds its selection in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryInput {
    value: String,
    file: Option<SelectedFile>,
    accept: Option<String>,
}

impl MemoryInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user picking a file of `size_bytes` bytes
    pub fn select(&mut self, value: impl Into<String>, size_bytes: u64) {
        let value = value.into();
        self.file = Some(SelectedFile {
            name: display_name(&value).to_owned(),
            size_bytes,
        });
        self.value = value;
    }

    /// Simulates a runtime that only reports the value, without a file handle
    pub fn select_path(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.file = None;
    }

    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }
}

impl FileInput for MemoryInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn selected_file(&self) -> Option<SelectedFile> {
        self.file.clone()
    }

    fn clear(&mut self) {
        self.value.clear();
        self.file = None;
    }

    fn set_accept(&mut self, accept: &str) {
        self.accept = Some(accept.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_input_select_and_clear() {
        let mut input = MemoryInput::new();
        input.select("C:\\fakepath\\photo.png", 42);

        assert_eq!(input.value(), "C:\\fakepath\\photo.png");
        assert_eq!(
            input.selected_file(),
            Some(SelectedFile { name: "photo.png".to_string(), size_bytes: 42 })
        );

        input.clear();
        assert_eq!(input.value(), "");
        assert!(input.selected_file().is_none());
    }

    #[test]
    fn test_memory_document_regions() {
        let document = MemoryDocument::with_regions(["#error", "#success"]);

        assert!(document.region("#error").is_some());
        assert!(document.region("#missing").is_none());

        document.region("#success").unwrap().set_html("<b>ok</b>");
        let region = document.get("#success").unwrap();
        assert_eq!(region.content(), RegionContent::Html("<b>ok</b>".to_string()));
        assert_eq!(region.text(), "<b>ok</b>");
    }

    #[test]
    fn test_region_content_empty() {
        assert!(RegionContent::Empty.is_empty());
        assert!(RegionContent::Text(String::new()).is_empty());
        assert!(!RegionContent::Text("x".to_string()).is_empty());
    }
}
