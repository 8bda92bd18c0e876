//! Derived lesson metrics. Computed from the document on demand, never stored.

use serde::Serialize;
use slidecraft_model::Lesson;

/// Slide count at which a lesson counts as complete
pub const RECOMMENDED_SLIDE_COUNT: usize = 10;

/// Seconds a learner spends on one slide, on average
pub const SECONDS_PER_SLIDE: usize = 45;

/// Percentage of the recommended slide count reached, capped at 100
pub fn lesson_progress(doc: &Lesson) -> f64 {
    let percent = doc.slide_count() as f64 * 100.0 / RECOMMENDED_SLIDE_COUNT as f64;
    percent.min(100.0)
}

/// Whole minutes needed to go through the lesson, rounded up
pub fn estimated_duration_minutes(doc: &Lesson) -> u32 {
    let seconds = doc.slide_count() * SECONDS_PER_SLIDE;
    seconds.div_ceil(60) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonMetrics {
    pub slide_count: usize,
    pub element_count: usize,
    pub progress: f64,
    pub estimated_minutes: u32,
}

impl LessonMetrics {
    pub fn of(doc: &Lesson) -> Self {
        Self {
            slide_count: doc.slide_count(),
            element_count: doc.element_count(),
            progress: lesson_progress(doc),
            estimated_minutes: estimated_duration_minutes(doc),
        }
    }
}
