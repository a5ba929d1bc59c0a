pub mod message;
pub mod question;

pub use message::praise_message;
pub use question::{Operator, Question, VisualType};
