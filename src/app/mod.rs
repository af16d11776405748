// Interactive driver around the engine: prompts, printing, optional save.

pub mod prompt;
pub mod session;

pub use prompt::Prompter;
pub use session::{run_session, SavePolicy, SessionReport};
