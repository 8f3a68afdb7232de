//! Seams between the resolver and the outside world.
//!
//! The engine never talks to a console, a dialog or a child process directly;
//! front ends supply implementations of these traits.

use crate::core::models::params::ParameterSet;
use std::io;
use std::path::PathBuf;

pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Identifies which question is being asked, so a front end can answer some
/// of them from presets instead of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKey {
    Folder,
    Fps,
    TimeStart,
    TimeEnd,
    Overwrite,
    Overlay,
}

/// A native folder-browser dialog.
pub trait FolderPicker {
    /// Returns `Ok(None)` when the user dismisses the dialog.
    fn pick_folder(&mut self, title: &str) -> Result<Option<PathBuf>, CollaboratorError>;
}

/// An interactive source of answers.
pub trait Prompter {
    /// Reads one free-text line. The returned text may be empty.
    fn read_line(&mut self, key: PromptKey, question: &str) -> io::Result<String>;

    /// Waits for a single key out of `choices` and returns it.
    fn choose(&mut self, key: PromptKey, question: &str, choices: &[char]) -> io::Result<char>;
}

/// The external program that turns a folder of images into videos.
pub trait Renderer {
    /// Runs the renderer to completion and returns its exit code.
    fn render(
        &mut self,
        parameters: &ParameterSet,
        arguments: &[String],
    ) -> Result<i32, CollaboratorError>;
}

impl<T: FolderPicker + ?Sized> FolderPicker for &mut T {
    fn pick_folder(&mut self, title: &str) -> Result<Option<PathBuf>, CollaboratorError> {
        (**self).pick_folder(title)
    }
}

impl<T: Prompter + ?Sized> Prompter for &mut T {
    fn read_line(&mut self, key: PromptKey, question: &str) -> io::Result<String> {
        (**self).read_line(key, question)
    }

    fn choose(&mut self, key: PromptKey, question: &str, choices: &[char]) -> io::Result<char> {
        (**self).choose(key, question, choices)
    }
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn render(
        &mut self,
        parameters: &ParameterSet,
        arguments: &[String],
    ) -> Result<i32, CollaboratorError> {
        (**self).render(parameters, arguments)
    }
}
