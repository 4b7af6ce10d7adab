use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line based questions on the terminal.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `question` and waits for one line. `None` once input is closed.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        print!("{question} ");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }

    /// Yes/no question, anything but an explicit yes counts as no.
    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]")).await?;
        Ok(answer.as_deref().is_some_and(is_yes))
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
