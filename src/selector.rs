//! A file selector that only lets through files of an allowed type and size.
//!
//! [`FilteredFileSelector::attach`] binds the validation rules to a file
//! input; the host then calls [`FilteredFileSelector::handle_change`] every
//! time the input fires a change event. Each call looks only at the current
//! value of the input, so a new selection simply replaces the previous one.

use std::rc::Rc;

use log::{debug, info, warn};

use crate::{
    config::{HostDefaults, SelectorOptions, Settings},
    content_types::accept_filter,
    error::{ConfigError, SelectionError},
    size_reader::FileSizeReader,
    ui::{DisplayTarget, Document, FileInput},
    utils::{
        filename::{display_name, extension},
        units::{format_megabytes, mb_to_bytes},
    },
};

/// What the selector reports for an accepted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    /// File name without any path prefix
    pub filename: String,
    pub size_bytes: u64,
    /// Size in megabytes, rounded to two decimals
    pub size_display: String,
}

// The regions resolved once at attach time. A missing region is skipped.
struct Targets {
    error: Option<Rc<dyn DisplayTarget>>,
    success: Option<Rc<dyn DisplayTarget>>,
    filename: Option<Rc<dyn DisplayTarget>>,
    filesize: Option<Rc<dyn DisplayTarget>>,
}

impl Targets {
    fn resolve(document: &dyn Document, settings: &Settings) -> Self {
        let lookup = |id: Option<&str>| id.and_then(|id| document.region(id));
        Self {
            error: lookup(settings.error_field()),
            success: lookup(settings.success_field()),
            filename: lookup(settings.filename_field()),
            filesize: lookup(settings.filesize_field()),
        }
    }
}

fn write_text(target: &Option<Rc<dyn DisplayTarget>>, text: &str) {
    if let Some(target) = target {
        target.set_text(text);
    }
}

fn write_html(target: &Option<Rc<dyn DisplayTarget>>, html: &str) {
    if let Some(target) = target {
        target.set_html(html);
    }
}

/// A file input guarded by an extension allow-list and a maximum size
pub struct FilteredFileSelector<I: FileInput> {
    input: I,
    settings: Settings,
    targets: Targets,
    reader: Box<dyn FileSizeReader>,
}

impl<I: FileInput> FilteredFileSelector<I> {
    /// Attaches the selector to `input`.
    ///
    /// # Arguments
    /// * `input` - The file input to guard
    /// * `options` - Caller options, merged over `defaults`
    /// * `defaults` - Values supplied by the host page
    /// * `document` - Resolves the target ids named in the options
    /// * `reader` - How to find the size of the selected file
    ///
    /// # Returns
    /// * `Err(ConfigError::InvalidMaxSize)` if the merged maximum size is not positive
    pub fn attach(
        mut input: I,
        options: &SelectorOptions,
        defaults: &HostDefaults,
        document: &dyn Document,
        reader: Box<dyn FileSizeReader>,
    ) -> Result<Self, ConfigError> {
        let settings = Settings::merge(options, defaults)?;
        let targets = Targets::resolve(document, &settings);

        if let Some(target) = settings.max_size_field().and_then(|id| document.region(id)) {
            target.set_text(&settings.max_size_mb().to_string());
        }

        if let Some(accept) = accept_filter(settings.allowed_extensions()) {
            debug!("Restricting file picker to {}", accept);
            input.set_accept(&accept);
        }

        debug!(
            "Attached file selector: extensions {:?}, max size {} MB",
            settings.allowed_extensions(),
            settings.max_size_mb()
        );

        Ok(Self {
            input,
            settings,
            targets,
            reader,
        })
    }

    /// Validates the current selection and updates the display targets.
    ///
    /// Returns `Ok(None)` when nothing is selected, `Ok(Some(_))` for an
    /// accepted file, and the reason otherwise. A rejected selection has
    /// already been cleared from the input when this returns.
    pub fn handle_change(&mut self) -> Result<Option<AcceptedFile>, SelectionError> {
        let value = self.input.value();
        if value.is_empty() {
            self.clear_success();
            write_text(&self.targets.error, "");
            return Ok(None);
        }

        let filename = display_name(&value).to_owned();
        let ext = extension(&filename);

        if !self.settings.allows(&ext) {
            info!("Rejected {}: extension {:?} is not allowed", filename, ext);
            let error = SelectionError::InvalidFileType(self.settings.filetype_error().to_owned());
            return Err(self.reject(error));
        }

        let size_bytes = match self.reader.size_bytes(&self.input) {
            Ok(size) => size,
            Err(e) => {
                warn!("Could not read the size of {}: {:#}", filename, e);
                let error = SelectionError::InvalidFileSize(self.settings.filesize_error().to_owned());
                return Err(self.reject(error));
            }
        };

        if size_bytes as f64 > mb_to_bytes(self.settings.max_size_mb()) {
            info!(
                "Rejected {}: {} bytes exceeds {} MB",
                filename,
                size_bytes,
                self.settings.max_size_mb()
            );
            let error = SelectionError::InvalidFileSize(self.settings.filesize_error().to_owned());
            return Err(self.reject(error));
        }

        let accepted = AcceptedFile {
            filename,
            size_bytes,
            size_display: format_megabytes(size_bytes),
        };
        self.show_success(&accepted);

        debug!("Accepted {} ({} MB)", accepted.filename, accepted.size_display);
        Ok(Some(accepted))
    }

    /// Clears the input, hides any previous success and shows `error`
    fn reject(&mut self, error: SelectionError) -> SelectionError {
        self.clear_success();
        self.input.clear();
        write_text(&self.targets.error, error.message());
        error
    }

    fn show_success(&self, accepted: &AcceptedFile) {
        write_text(&self.targets.error, "");
        write_html(&self.targets.success, self.settings.success_message());
        write_text(&self.targets.filename, &accepted.filename);
        write_text(&self.targets.filesize, &accepted.size_display);
    }

    fn clear_success(&self) {
        write_text(&self.targets.success, "");
        write_text(&self.targets.filename, "");
        write_text(&self.targets.filesize, "");
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Gives access to the bound input, e.g. to change its selection
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
