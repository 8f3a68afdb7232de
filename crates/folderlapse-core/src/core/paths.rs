//! Path handling for selected source folders.
//!
//! Folder names arrive from native dialogs and may use either separator
//! style, so label and output derivation work on the textual form of the
//! path instead of the host platform's `Path` parsing rules.

use crate::core::models::params::OUTPUT_SUBFOLDER;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const SEPARATORS: [char; 2] = ['\\', '/'];
const VERBATIM_UNC_PREFIX: &str = r"\\?\UNC\";
const VERBATIM_PREFIX: &str = r"\\?\";

/// A selected folder resolved for use as a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPath {
    display: PathBuf,
    working: PathBuf,
}

impl LocalPath {
    /// The path exactly as it was selected.
    pub fn display(&self) -> &Path {
        &self.display
    }

    /// The path to hand to child processes as their working directory.
    pub fn working(&self) -> &Path {
        &self.working
    }
}

/// Final component of `path`, ignoring trailing separators.
///
/// A bare drive root such as `D:\` yields `D:`.
pub fn derive_label(path: &Path) -> String {
    let text = path.to_string_lossy();
    let trimmed = text.trim_end_matches(&SEPARATORS[..]);
    if trimmed.is_empty() {
        return text.into_owned();
    }
    trimmed
        .rsplit(&SEPARATORS[..])
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

/// `path` joined with the output subfolder, keeping the separator style the
/// path already uses.
pub fn derive_output_path(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    let separator = separator_of(&text);
    let trimmed = text.trim_end_matches(&SEPARATORS[..]);
    PathBuf::from(format!("{}{}{}", trimmed, separator, OUTPUT_SUBFOLDER))
}

/// Resolves a possibly-UNC folder into a path usable as a working directory.
///
/// Fails when the folder does not exist, is not a directory, or cannot be
/// listed.
pub fn map_to_local_path(path: &Path) -> io::Result<LocalPath> {
    let working = strip_verbatim_prefix(path);

    let metadata = fs::metadata(&working)?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("'{}' is not a folder", working.display()),
        ));
    }
    fs::read_dir(&working)?;

    if is_unc(&working) {
        debug!("Using network share {:?} directly as working directory.", &working);
    }

    Ok(LocalPath {
        display: path.to_path_buf(),
        working,
    })
}

pub fn is_unc(path: &Path) -> bool {
    let text = path.to_string_lossy();
    (text.starts_with(r"\\") && !text.starts_with(VERBATIM_PREFIX)) || text.starts_with("//")
}

fn strip_verbatim_prefix(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix(VERBATIM_UNC_PREFIX) {
        PathBuf::from(format!(r"\\{}", rest))
    } else if let Some(rest) = text.strip_prefix(VERBATIM_PREFIX) {
        PathBuf::from(rest)
    } else {
        path.to_path_buf()
    }
}

fn separator_of(text: &str) -> char {
    match (text.contains('\\'), text.contains('/')) {
        (true, false) => '\\',
        (false, true) => '/',
        _ => std::path::MAIN_SEPARATOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn label_is_last_component_of_windows_path() {
        assert_eq!(derive_label(Path::new(r"D:\Shoots\2024-06-01")), "2024-06-01");
    }

    #[test]
    fn label_ignores_trailing_separators() {
        assert_eq!(derive_label(Path::new("/srv/cams/north/")), "north");
        assert_eq!(derive_label(Path::new(r"\\nas\photos\cam1\")), "cam1");
    }

    #[test]
    fn label_of_drive_root_is_drive_name() {
        assert_eq!(derive_label(Path::new(r"D:\")), "D:");
    }

    #[test]
    fn output_path_keeps_backslash_style() {
        assert_eq!(
            derive_output_path(Path::new(r"D:\Shoots\2024-06-01")),
            PathBuf::from(r"D:\Shoots\2024-06-01\_Timelapse")
        );
    }

    #[test]
    fn output_path_keeps_forward_slash_style() {
        assert_eq!(
            derive_output_path(Path::new("/srv/cams/north/")),
            PathBuf::from("/srv/cams/north/_Timelapse")
        );
    }

    #[test]
    fn verbatim_prefixes_are_stripped() {
        assert_eq!(
            strip_verbatim_prefix(Path::new(r"\\?\UNC\nas\photos")),
            PathBuf::from(r"\\nas\photos")
        );
        assert_eq!(
            strip_verbatim_prefix(Path::new(r"\\?\D:\Shoots")),
            PathBuf::from(r"D:\Shoots")
        );
    }

    #[test]
    fn unc_detection() {
        assert!(is_unc(Path::new(r"\\nas\photos")));
        assert!(is_unc(Path::new("//nas/photos")));
        assert!(!is_unc(Path::new(r"\\?\D:\Shoots")));
        assert!(!is_unc(Path::new(r"D:\Shoots")));
    }

    #[test]
    fn map_to_local_path_accepts_existing_directory() {
        let dir = tempdir().unwrap();
        let local = map_to_local_path(dir.path()).unwrap();

        assert_eq!(local.display(), dir.path());
        assert_eq!(local.working(), dir.path());
        assert!(!is_unc(local.working()));
    }

    #[test]
    fn map_to_local_path_rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = map_to_local_path(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn map_to_local_path_rejects_regular_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("frame.jpg");
        fs::write(&file, b"").unwrap();

        let err = map_to_local_path(&file).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
    }
}
