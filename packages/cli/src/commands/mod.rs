pub mod apply;
pub mod details;
pub mod element;
pub mod export;
pub mod init;
pub mod new;
pub mod show;
pub mod slide;

pub use apply::{apply, ApplyArgs};
pub use details::{details, DetailsArgs};
pub use element::{element, ElementCommand};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use new::{new, NewArgs};
pub use show::{show, stats, ShowArgs, StatsArgs};
pub use slide::{slide, SlideCommand};

use crate::config::Config;
use anyhow::{anyhow, bail, Context, Result};
use slidecraft_editor::{
    load_envelope, Clock, EditSession, FileCache, Lesson, RoutingContext, Slide, SystemClock,
};
use tracing::debug;

const START_OVER_HINT: &str = "run `slidecraft new` to start a new lesson";

/// Read the cached lesson without touching the cache
///
/// Age is ignored here: freshness only decides whether editing may resume.
pub fn load_lesson(cwd: &str) -> Result<Lesson> {
    let config = Config::load(cwd)?;
    let cache = FileCache::new(config.get_cache_dir(cwd));

    let envelope = load_envelope(&cache, &config.editor.cache_key)
        .context("Cannot read the cached lesson")?
        .ok_or_else(|| anyhow!("No lesson yet, {}", START_OVER_HINT))?;
    Ok(envelope.data)
}

/// Open the cached lesson for editing
///
/// Refuses when the cached entry is stale, unreadable or invalid, since
/// restoring would replace it with a blank lesson. An empty cache starts one.
pub fn open_session(cwd: &str) -> Result<EditSession> {
    let config = Config::load(cwd)?;
    let cache = FileCache::new(config.get_cache_dir(cwd));
    ensure_resumable(&cache, &config, SystemClock.now_millis())?;
    start_session(cwd, &RoutingContext::default())
}

/// Open a session whatever the cache holds, for commands that replace the lesson
pub fn start_session(cwd: &str, context: &RoutingContext) -> Result<EditSession> {
    let config = Config::load(cwd)?;
    let cache_dir = config.get_cache_dir(cwd);
    debug!(cache_dir = %cache_dir.display(), "Opening session");

    Ok(EditSession::open(
        context,
        Box::new(FileCache::new(cache_dir)),
        Box::new(SystemClock),
        config.editor,
    ))
}

fn ensure_resumable(cache: &FileCache, config: &Config, now: i64) -> Result<()> {
    let key = &config.editor.cache_key;
    let envelope = match load_envelope(cache, key) {
        Ok(Some(envelope)) => envelope,
        Ok(None) => return Ok(()),
        Err(e) => bail!("Cannot read the cached lesson ({}), {}", e, START_OVER_HINT),
    };

    let window = config.editor.freshness_window_ms;
    if !envelope.is_fresh(now, window) {
        bail!(
            "Cached lesson '{}' was last saved {} min ago, past the {} min editing window; {} or raise editor.freshnessWindowMs",
            envelope.data.title,
            envelope.age_millis(now) / 60_000,
            window / 60_000,
            START_OVER_HINT
        );
    }
    envelope
        .data
        .validate()
        .with_context(|| format!("Cached lesson is invalid, {}", START_OVER_HINT))?;
    Ok(())
}

/// Point the session at `index`, refusing indexes past the last slide
pub fn focus_slide(session: &mut EditSession, index: usize) -> Result<()> {
    let count = session.current().slide_count();
    if index >= count {
        return Err(anyhow!(
            "No slide at index {} (lesson has {} slides)",
            index,
            count
        ));
    }
    session.set_current_slide(index);
    Ok(())
}

/// Find an element by full id or unique id prefix
pub fn resolve_element(slide: &Slide, id_or_prefix: &str) -> Result<String> {
    if let Some(element) = slide.find_element(id_or_prefix) {
        return Ok(element.id.clone());
    }

    let matches: Vec<&str> = slide
        .elements()
        .iter()
        .map(|e| e.id.as_str())
        .filter(|id| id.starts_with(id_or_prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(anyhow!("No element matching '{}' on slide {}", id_or_prefix, slide.index)),
        _ => Err(anyhow!(
            "'{}' matches {} elements, use a longer prefix",
            id_or_prefix,
            matches.len()
        )),
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
