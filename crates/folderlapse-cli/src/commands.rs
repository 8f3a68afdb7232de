pub mod env;
pub mod run;

use crate::error::Result;

/// How a command ended, and whether the console should stay open afterwards.
pub struct Completion {
    pub result: Result<()>,
    pub pause_on_exit: bool,
}

impl Completion {
    pub fn immediate(result: Result<()>) -> Self {
        Self {
            result,
            pause_on_exit: false,
        }
    }
}
