//! Question groups and the provider interface.
//!
//! The engine never owns the question store. It asks a
//! [`QuestionProvider`] for a group's pool, draws from its own copy, and
//! lets the host persist that copy if it wants `used` ids to survive.

use serde::{Deserialize, Serialize};

use super::pool::{GroupId, Question, QuestionPool};

/// Supplies question pools by group.
pub trait QuestionProvider {
    /// A fresh pool for `group`, or `None` if the group does not exist.
    fn pool(&self, group: &GroupId) -> Option<QuestionPool>;
}

/// A named set of questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub id: GroupId,
    pub name: String,
    pub questions: Vec<Question>,
}

impl QuestionGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(id),
            name: name.into(),
            questions: Vec::new(),
        }
    }

    /// Add a question.
    #[must_use]
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }
}

/// In-memory question store, groups kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionLibrary {
    groups: Vec<QuestionGroup>,
}

impl QuestionLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, replacing any group with the same id.
    #[must_use]
    pub fn with_group(mut self, group: QuestionGroup) -> Self {
        self.insert(group);
        self
    }

    /// Add a group, replacing any group with the same id.
    pub fn insert(&mut self, group: QuestionGroup) {
        match self.groups.iter_mut().find(|g| g.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&QuestionGroup> {
        self.groups.iter().find(|g| &g.id == id)
    }

    #[must_use]
    pub fn groups(&self) -> &[QuestionGroup] {
        &self.groups
    }

    /// The group a new session starts on.
    #[must_use]
    pub fn first_group(&self) -> Option<&GroupId> {
        self.groups.first().map(|g| &g.id)
    }
}

impl QuestionProvider for QuestionLibrary {
    fn pool(&self, group: &GroupId) -> Option<QuestionPool> {
        self.group(group)
            .map(|g| QuestionPool::new(g.id.clone(), g.questions.clone()))
    }
}
