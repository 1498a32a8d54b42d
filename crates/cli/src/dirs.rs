//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific data directory for werewolf matches
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/werewolf`
/// - Linux: `~/.local/share/werewolf` (or `$XDG_DATA_HOME/werewolf`)
/// - Windows: `%APPDATA%\werewolf`
/// - Fallback: `./werewolf_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "werewolf")
        .map(|dirs| dirs.data_dir().join("matches"))
        .unwrap_or_else(|| PathBuf::from("./werewolf_data"))
}
