//! Progress feedback for front-ends

use super::LoggerState;

/// Spinner frames, one step per received response
pub const SPINNER_FRAMES: [char; 4] = ['-', '\\', '|', '/'];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn symbol(&self) -> char {
        SPINNER_FRAMES[self.frame]
    }

    /// Step to the next frame and return it
    pub fn advance(&mut self) -> char {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
        self.symbol()
    }
}

/// Snapshot published after every state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub state: LoggerState,
    /// Responses received so far, of any kind
    pub responses: u64,
    /// Lines appended to the sink, headers included
    pub lines_written: u64,
    pub spinner: char,
}

impl Default for SessionProgress {
    fn default() -> Self {
        Self {
            state: LoggerState::Init,
            responses: 0,
            lines_written: 0,
            spinner: SPINNER_FRAMES[0],
        }
    }
}
