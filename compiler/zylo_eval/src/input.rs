//! Line input for `read.line`, `read.int` and `getInput`.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use parking_lot::Mutex;

pub enum InputSource {
    Stdin,
    /// Pre-recorded lines, handed out in order.
    Scripted(Mutex<VecDeque<String>>),
}

impl InputSource {
    /// Next line without its line terminator, or `None` at end of input.
    pub fn read_line(&self) -> Option<String> {
        match self {
            Self::Stdin => {
                let mut line = String::new();
                match std::io::stdin().lock().read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => {
                        let trimmed = line.trim_end_matches(['\n', '\r']).len();
                        line.truncate(trimmed);
                        Some(line)
                    }
                }
            }
            Self::Scripted(lines) => lines.lock().pop_front(),
        }
    }
}

pub type SharedInput = Arc<InputSource>;

pub fn stdin_input() -> SharedInput {
    Arc::new(InputSource::Stdin)
}

pub fn scripted_input<I, S>(lines: I) -> SharedInput
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(InputSource::Scripted(Mutex::new(
        lines.into_iter().map(Into::into).collect(),
    )))
}
