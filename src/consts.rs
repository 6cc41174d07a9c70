//! Default values used when neither the caller nor the host supplies one.

pub const DEFAULT_MAX_SIZE_MB: f64 = 2.0; // Taille maximale par défaut, en mégaoctets.
pub const DEFAULT_FILETYPE_ERROR: &str = "Invalid file type."; // Message d'erreur par défaut pour le type.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank You!"; // Markup affiché en cas de succès.

/// Template used when no filesize error message is configured.
/// `{}` is replaced by the maximum size in megabytes.
pub const FILESIZE_ERROR_TEMPLATE: &str = "The file must be {} megabytes or less.";

// Variables d'environnement lues par `HostDefaults::from_env`
pub const ENV_MAX_FILE_SIZE: &str = "MAX_FILE_SIZE";
pub const ENV_FILE_TYPE_ERROR: &str = "FILE_TYPE_ERROR";
pub const ENV_FILE_SIZE_ERROR: &str = "FILE_SIZE_ERROR";
