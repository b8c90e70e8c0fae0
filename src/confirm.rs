use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Cancelable yes/no gate in front of destructive commands.
pub trait Confirm {
    /// `Ok(true)` only on an explicit affirmative answer.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Asks on the terminal; anything but `y`/`yes` cancels.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        print!("{prompt} [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Ok(false);
        }

        Ok(is_affirmative(&input))
    }
}

/// Pre-approved via `--yes`.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Replays canned answers and records every prompt it was shown.
    #[derive(Clone, Default)]
    pub struct ScriptedConfirm {
        answers: Arc<Mutex<Vec<bool>>>,
        pub prompts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedConfirm {
        pub fn answering(answers: &[bool]) -> Self {
            let mut answers = answers.to_vec();
            answers.reverse();
            Self {
                answers: Arc::new(Mutex::new(answers)),
                prompts: Arc::default(),
            }
        }

        pub fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.answers.lock().unwrap().pop().unwrap_or(false))
        }
    }
}
