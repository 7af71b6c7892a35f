// Folio platform abstraction
// Resolves where settings and the preference database live on each OS.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for Folio.
///
/// - **Linux**: `~/.config/folio` (or `$XDG_CONFIG_HOME/folio`)
/// - **macOS**: `~/Library/Application Support/Folio`
/// - **Windows**: `%APPDATA%/Folio`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for Folio.
///
/// - **Linux**: `~/.local/share/folio` (or `$XDG_DATA_HOME/folio`)
/// - **macOS**: `~/Library/Application Support/Folio`
/// - **Windows**: `%APPDATA%/Folio`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default location of the SQLite preference database.
pub fn default_store_path() -> PathBuf {
    get_data_dir().join("preferences.db")
}
