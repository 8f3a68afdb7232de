use console::{Term, style};
use folderlapse::engine::collaborators::{CollaboratorError, FolderPicker, PromptKey, Prompter};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Answers prompts from the terminal.
pub struct ConsolePrompter {
    term: Term,
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn read_stdin_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

impl Prompter for ConsolePrompter {
    fn read_line(&mut self, _key: PromptKey, question: &str) -> io::Result<String> {
        print!("{}", question);
        io::stdout().flush()?;
        read_stdin_line()
    }

    fn choose(&mut self, _key: PromptKey, question: &str, choices: &[char]) -> io::Result<char> {
        print!("{}", question);
        io::stdout().flush()?;

        if !self.term.is_term() {
            let answer = read_stdin_line()?;
            return Ok(answer
                .trim()
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(' '));
        }

        loop {
            let key = self.term.read_char()?;
            if let Some(choice) = match_choice(key, choices) {
                self.term.write_line(&choice.to_string())?;
                return Ok(choice);
            }
        }
    }
}

fn match_choice(key: char, choices: &[char]) -> Option<char> {
    choices.iter().copied().find(|c| c.eq_ignore_ascii_case(&key))
}

/// Answers some prompts from values given up front and forwards the rest.
pub struct PresetPrompter<P> {
    inner: P,
    presets: HashMap<PromptKey, String>,
}

impl<P: Prompter> PresetPrompter<P> {
    pub fn new(inner: P, presets: HashMap<PromptKey, String>) -> Self {
        Self { inner, presets }
    }

    fn preset(&self, key: PromptKey, question: &str) -> Option<&str> {
        let value = self.presets.get(&key)?;
        debug!("Answering {:?} from preset: {:?}", key, value);
        println!("{}{}", question, style(value).dim());
        Some(value.as_str())
    }
}

impl<P: Prompter> Prompter for PresetPrompter<P> {
    fn read_line(&mut self, key: PromptKey, question: &str) -> io::Result<String> {
        match self.preset(key, question) {
            Some(value) => Ok(value.to_string()),
            None => self.inner.read_line(key, question),
        }
    }

    fn choose(&mut self, key: PromptKey, question: &str, choices: &[char]) -> io::Result<char> {
        let preset = self
            .preset(key, question)
            .and_then(|value| value.trim().chars().next())
            .and_then(|c| match_choice(c, choices));
        match preset {
            Some(choice) => Ok(choice),
            None => self.inner.choose(key, question, choices),
        }
    }
}

/// Opens the platform's folder browser, falling back to a typed path when no
/// dialog can be shown.
#[derive(Default)]
pub struct DialogFolderPicker;

impl FolderPicker for DialogFolderPicker {
    fn pick_folder(&mut self, title: &str) -> Result<Option<PathBuf>, CollaboratorError> {
        match native_dialog::FileDialog::new().show_open_single_dir() {
            Ok(picked) => Ok(picked),
            Err(e) => {
                warn!("Folder dialog unavailable ({}), asking for a path instead.", e);
                print!("{} (blank to cancel): ", title);
                io::stdout().flush()?;
                let typed = read_stdin_line()?;
                let typed = typed.trim();
                Ok((!typed.is_empty()).then(|| PathBuf::from(typed)))
            }
        }
    }
}

/// Uses a folder chosen on the command line.
pub struct FixedFolderPicker(pub PathBuf);

impl FolderPicker for FixedFolderPicker {
    fn pick_folder(&mut self, _title: &str) -> Result<Option<PathBuf>, CollaboratorError> {
        debug!("Using folder from command line: {:?}", &self.0);
        Ok(Some(self.0.clone()))
    }
}
