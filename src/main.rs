use std::{env, fs, path::PathBuf};

use anyhow::Result;
use derive_more::Display;
use dotenv::dotenv;
use filtered_file_selector::{
    config::{HostDefaults, SelectorOptions},
    selector::FilteredFileSelector,
    size_reader::reader_for_user_agent,
    ui::{MemoryDocument, MemoryInput},
};
use inquire::{Select, Text};
use log::info;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const OPTIONS_FILE: &str = "selector.yaml";
const LOG_FILE: &str = "./filtered-file-selector.log";
const USER_AGENT_VAR: &str = "SELECTOR_USER_AGENT";

const ERROR_FIELD: &str = "#error";
const SUCCESS_FIELD: &str = "#success";
const FILENAME_FIELD: &str = "#filename";
const FILESIZE_FIELD: &str = "#filesize";
const MAX_SIZE_FIELD: &str = "#fileSize";

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// A text menu, run until it asks to stop
trait Menu {
    /// Runs the menu once. Returns `None` to stop, `Some(())` to run again.
    fn enter(&mut self) -> Result<MenuExit>;

    /// Runs the menu in a loop, printing errors instead of stopping on them
    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error:#}");
            }
        }
    }
}

struct App {
    selector: FilteredFileSelector<MemoryInput>,
    document: MemoryDocument,
}

impl App {
    fn new(mut options: SelectorOptions, defaults: &HostDefaults, user_agent: &str) -> Result<Self> {
        // Every message goes to one of our regions unless the options say otherwise
        options.error_field.get_or_insert_with(|| ERROR_FIELD.to_owned());
        options.success_field.get_or_insert_with(|| SUCCESS_FIELD.to_owned());
        options.filename_field.get_or_insert_with(|| FILENAME_FIELD.to_owned());
        options.filesize_field.get_or_insert_with(|| FILESIZE_FIELD.to_owned());
        options.max_size_field.get_or_insert_with(|| MAX_SIZE_FIELD.to_owned());

        let document = MemoryDocument::with_regions([
            ERROR_FIELD,
            SUCCESS_FIELD,
            FILENAME_FIELD,
            FILESIZE_FIELD,
            MAX_SIZE_FIELD,
        ]);

        let selector = FilteredFileSelector::attach(
            MemoryInput::new(),
            &options,
            defaults,
            &document,
            reader_for_user_agent(user_agent),
        )?;

        Ok(Self { selector, document })
    }

    fn start(&mut self) {
        let max_size = self.region(MAX_SIZE_FIELD);
        println!("Filtered file selector. Files up to {max_size} MB are accepted.");
        self.enter_loop();
    }

    fn region(&self, id: &str) -> String {
        self.document
            .get(id)
            .map(|region| region.text())
            .unwrap_or_default()
    }

    fn pick_file(&mut self) -> Result<()> {
        let path = Text::new("Path of the file to select:").prompt()?;
        let path = path.trim();

        // Without metadata there is no file handle, as on runtimes that only expose the value
        match fs::metadata(path) {
            Ok(metadata) => self.selector.input_mut().select(path, metadata.len()),
            Err(_) => self.selector.input_mut().select_path(path),
        }

        match self.selector.handle_change() {
            Ok(Some(accepted)) => {
                info!("Selection accepted: {}", accepted.filename);
                println!(
                    "{}\nFile: {}\nSize: {} MB",
                    self.region(SUCCESS_FIELD),
                    self.region(FILENAME_FIELD),
                    self.region(FILESIZE_FIELD)
                );
            }
            Ok(None) => println!("[*] No file selected"),
            Err(_) => println!("[!] {}", self.region(ERROR_FIELD)),
        }
        Ok(())
    }

    fn show_settings(&self) {
        let settings = self.selector.settings();
        let extensions = if settings.allowed_extensions().is_empty() {
            "any".to_owned()
        } else {
            settings.allowed_extensions().join(", ")
        };
        println!(
            "Allowed extensions: {extensions}\nMaximum size: {} MB\nPicker filter: {}",
            settings.max_size_mb(),
            self.selector.input().accept().unwrap_or("none")
        );
    }
}

impl Menu for App {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Select a file")]
            Pick,
            #[display("Show the settings")]
            Settings,
            #[display("Quit")]
            Exit,
        }

        let choice = Select::new("What do you want to do?", Choice::iter().collect()).prompt()?;

        match choice {
            Choice::Pick => self.pick_file()?,
            Choice::Settings => self.show_settings(),
            Choice::Exit => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;

    let options_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(OPTIONS_FILE));

    let options = if options_path.exists() {
        info!("Loading selector options from {}", options_path.display());
        SelectorOptions::from_file(&options_path)?
    } else {
        info!("{} not found, using default options", options_path.display());
        SelectorOptions::default()
    };

    let defaults = HostDefaults::from_env()?;
    let user_agent = env::var(USER_AGENT_VAR).unwrap_or_default();

    App::new(options, &defaults, &user_agent)?.start();
    Ok(())
}
