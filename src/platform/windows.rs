// Folio platform paths for Windows
// Config and data: %APPDATA%/Folio

use std::env;
use std::path::PathBuf;

fn roaming_appdata() -> PathBuf {
    let appdata = env::var("APPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("Folio")
}

pub fn get_config_dir() -> PathBuf {
    roaming_appdata()
}

pub fn get_data_dir() -> PathBuf {
    roaming_appdata()
}
