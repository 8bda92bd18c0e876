use super::open_session;
use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::Colorize;
use slidecraft_editor::{EditSession, SlideKind, SlidePatch};

#[derive(Debug, Subcommand)]
pub enum SlideCommand {
    /// Append an empty slide
    Add,

    /// Remove the slide at INDEX
    Remove { index: usize },

    /// Move a slide to another position
    Move { from: usize, to: usize },

    /// Rename the slide at INDEX
    Title { index: usize, title: String },

    /// Change the slide type (info, qa)
    Kind {
        index: usize,
        kind: SlideKind,
    },
}

pub fn slide(command: SlideCommand, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd)?;

    match command {
        SlideCommand::Add => {
            session.add_slide()?;
            let added = session
                .current()
                .slides
                .last()
                .map(|s| format!("[{}] {}", s.index, s.title))
                .unwrap_or_default();
            println!("{} Added slide {}", "✓".green(), added.bold());
        }

        SlideCommand::Remove { index } => {
            let slide_id = slide_id_at(&session, index)?;
            session.remove_slide(&slide_id)?;
            println!(
                "{} Removed slide {} ({} left)",
                "✓".green(),
                index,
                session.current().slide_count()
            );
        }

        SlideCommand::Move { from, to } => {
            slide_id_at(&session, from)?;
            session.reorder_slides(from, to)?;
            let last = session.current().slide_count().saturating_sub(1);
            println!("{} Moved slide {} → {}", "✓".green(), from, to.min(last));
        }

        SlideCommand::Title { index, title } => {
            let slide_id = slide_id_at(&session, index)?;
            session.update_slide(
                &slide_id,
                SlidePatch {
                    title: Some(title.clone()),
                    kind: None,
                },
            )?;
            println!("{} Slide {} is now {}", "✓".green(), index, title.bold());
        }

        SlideCommand::Kind { index, kind } => {
            let slide_id = slide_id_at(&session, index)?;
            session.update_slide(
                &slide_id,
                SlidePatch {
                    title: None,
                    kind: Some(kind),
                },
            )?;
            println!("{} Slide {} type set", "✓".green(), index);
        }
    }

    session.save()?;
    Ok(())
}

fn slide_id_at(session: &EditSession, index: usize) -> Result<String> {
    session
        .current()
        .slide(index)
        .map(|s| s.id.clone())
        .ok_or_else(|| {
            anyhow!(
                "No slide at index {} (lesson has {} slides)",
                index,
                session.current().slide_count()
            )
        })
}
