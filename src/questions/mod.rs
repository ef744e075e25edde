//! Question gate.
//!
//! Every landing short of the End cell poses a question; only a correct
//! answer lets the cell's effect resolve. Pools avoid repeating a
//! question until every question in the group has been asked.

mod library;
mod pool;

pub use library::{QuestionGroup, QuestionLibrary, QuestionProvider};
pub use pool::{GroupId, Question, QuestionId, QuestionPool};
