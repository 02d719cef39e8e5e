mod input;
mod state;
#[cfg(test)]
mod tests;

pub use input::{InputCommand, KEYMAP_HELP};
pub use state::{Effect, Outcome, RecordingState, Rejection, SessionState};
