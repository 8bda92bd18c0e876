use super::start_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use slidecraft_editor::{DetailsPatch, RoutingContext};

/// Curriculum slot the lesson belongs to
#[derive(Debug, Args, Default)]
pub struct NewArgs {
    #[arg(long, default_value = "")]
    pub path_id: String,

    /// Learning path name
    #[arg(long, default_value = "")]
    pub path: String,

    #[arg(long, default_value = "")]
    pub level_id: String,

    #[arg(long, default_value = "")]
    pub level: String,

    #[arg(long, default_value = "")]
    pub course_id: String,

    #[arg(long, default_value = "")]
    pub course: String,

    /// Lesson title
    #[arg(short, long)]
    pub title: Option<String>,
}

impl NewArgs {
    pub fn context(&self) -> RoutingContext {
        RoutingContext {
            path_id: self.path_id.clone(),
            path: self.path.clone(),
            level_id: self.level_id.clone(),
            level: self.level.clone(),
            course_id: self.course_id.clone(),
            course: self.course.clone(),
        }
    }
}

pub fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let context = args.context();
    let mut session = start_session(cwd, &context)?;
    session.start_new(&context)?;

    if let Some(title) = args.title {
        session.update_details(DetailsPatch {
            title: Some(title),
            description: None,
        })?;
        session.save()?;
    }

    let lesson = session.lesson();
    println!(
        "{} Created {} {}",
        "✓".green(),
        lesson.title.bright_white().bold(),
        format!("({})", lesson.id).dimmed()
    );

    Ok(())
}
