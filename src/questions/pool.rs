//! Question pools with per-pass repeat avoidance.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{GameError, RandomSource};

/// Identifier of a question within its group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a question group.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Id reserved for the placeholder posed when a pool is empty.
const PLACEHOLDER_ID: &str = "__no_question__";

/// A gating question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub answer: String,
}

impl Question {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: QuestionId::new(id),
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Stand-in posed when the active pool has no questions.
    ///
    /// The driver still reports right or wrong for it.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_ID, "No questions available. Add some in settings!", "none")
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id.as_str() == PLACEHOLDER_ID
    }
}

/// Questions of one group plus the ids already drawn this pass.
///
/// `used` is always a subset of the pool's question ids. Once it covers
/// every question it is cleared before the next draw, so each pass is an
/// even cycle over the whole pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPool {
    group: GroupId,
    questions: Vec<Question>,
    used: FxHashSet<QuestionId>,
}

impl QuestionPool {
    #[must_use]
    pub fn new(group: GroupId, questions: Vec<Question>) -> Self {
        Self {
            group,
            questions,
            used: FxHashSet::default(),
        }
    }

    /// A pool with no questions; every draw yields the placeholder.
    #[must_use]
    pub fn empty(group: GroupId) -> Self {
        Self::new(group, Vec::new())
    }

    #[must_use]
    pub fn group(&self) -> &GroupId {
        &self.group
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Ids drawn since the last reset.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub fn is_used(&self, id: &QuestionId) -> bool {
        self.used.contains(id)
    }

    /// Forget every drawn id.
    pub fn reset_used(&mut self) {
        self.used.clear();
    }

    /// Add a question to the pool.
    pub fn push(&mut self, question: Question) {
        self.questions.push(question);
    }

    /// Remove a question, keeping `used` a subset of the remaining ids.
    pub fn remove(&mut self, id: &QuestionId) -> Option<Question> {
        let idx = self.questions.iter().position(|q| &q.id == id)?;
        let removed = self.questions.remove(idx);
        if !self.questions.iter().any(|q| &q.id == id) {
            self.used.remove(id);
        }
        Some(removed)
    }

    /// Draw the next question.
    ///
    /// Picks uniformly among questions not yet drawn this pass; when all
    /// have been drawn the pass restarts. An empty pool yields
    /// [`Question::placeholder`], which is never recorded as drawn.
    pub fn next_question<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Question {
        if self.questions.is_empty() {
            let err = GameError::EmptyQuestionPool { group: self.group.0.clone() };
            warn!(%err, "posing placeholder question");
            return Question::placeholder();
        }

        let mut candidates: Vec<&Question> =
            self.questions.iter().filter(|q| !self.used.contains(&q.id)).collect();
        if candidates.is_empty() {
            self.used.clear();
            candidates = self.questions.iter().collect();
        }

        let picked = candidates[rng.index(candidates.len())].clone();
        if !picked.is_placeholder() {
            self.used.insert(picked.id.clone());
        }
        picked
    }
}
