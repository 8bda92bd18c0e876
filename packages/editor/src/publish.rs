//! Hand-off of a finished lesson to the lesson store.
//!
//! Only the seam lives here. [`InMemoryLessonStore`] keeps submissions in
//! process; a networked store would implement [`LessonStore`] against the
//! remote API and receive the same serialized [`Lesson`].

use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use slidecraft_model::Lesson;
use std::collections::HashMap;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    #[default]
    Draft,
    InReview,
    Published,
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishState::Draft => "draft",
            PublishState::InReview => "in review",
            PublishState::Published => "published",
        };
        f.write_str(name)
    }
}

pub trait LessonStore {
    /// Send a draft for review. The lesson must be valid.
    fn submit_for_review(&mut self, lesson: &Lesson) -> Result<PublishState, EditorError>;

    /// Publish a lesson that has been through review
    fn publish(&mut self, lesson: &Lesson) -> Result<PublishState, EditorError>;

    fn state_of(&self, lesson_id: &str) -> PublishState;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub lesson: Lesson,
    pub state: PublishState,
}

#[derive(Debug, Default)]
pub struct InMemoryLessonStore {
    submissions: HashMap<String, Submission>,
}

impl InMemoryLessonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, lesson_id: &str) -> Option<&Submission> {
        self.submissions.get(lesson_id)
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    fn transition(
        &mut self,
        lesson: &Lesson,
        action: &'static str,
        from: &[PublishState],
        to: PublishState,
    ) -> Result<PublishState, EditorError> {
        let current = self.state_of(&lesson.id);
        if !from.contains(&current) {
            return Err(EditorError::Publish {
                lesson_id: lesson.id.clone(),
                action,
                state: current.to_string(),
            });
        }

        lesson.validate()?;
        self.submissions.insert(
            lesson.id.clone(),
            Submission {
                lesson: lesson.clone(),
                state: to,
            },
        );

        info!(lesson_id = %lesson.id, from = %current, to = %to, "Lesson state changed");
        Ok(to)
    }
}

impl LessonStore for InMemoryLessonStore {
    fn submit_for_review(&mut self, lesson: &Lesson) -> Result<PublishState, EditorError> {
        // Resubmitting while in review replaces the pending copy
        self.transition(
            lesson,
            "submit",
            &[PublishState::Draft, PublishState::InReview],
            PublishState::InReview,
        )
    }

    fn publish(&mut self, lesson: &Lesson) -> Result<PublishState, EditorError> {
        self.transition(
            lesson,
            "publish",
            &[PublishState::InReview],
            PublishState::Published,
        )
    }

    fn state_of(&self, lesson_id: &str) -> PublishState {
        self.submissions
            .get(lesson_id)
            .map(|s| s.state)
            .unwrap_or_default()
    }
}
