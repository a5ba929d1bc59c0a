pub mod engine;
pub mod render;
pub mod session;

pub use engine::{QuizEngine, Snapshot};
pub use render::Screen;
pub use session::{Phase, QuizSession};
