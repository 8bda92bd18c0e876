use uuid::Uuid;

/// Titles handed out to freshly created slides
pub const SLIDE_TITLE_POOL: &[&str] = &[
    "Summary",
    "Introduction",
    "Key Idea",
    "Worked Example",
    "Try It",
    "Practice",
    "Check Your Understanding",
    "Recap",
];

/// Generate a fresh identifier for a lesson, slide or element
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Pick a slide title from the pool. Not reproducible between runs.
pub fn pick_title() -> &'static str {
    let roll = Uuid::new_v4().as_u128();
    SLIDE_TITLE_POOL[(roll % SLIDE_TITLE_POOL.len() as u128) as usize]
}
