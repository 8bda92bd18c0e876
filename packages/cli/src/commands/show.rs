use super::{load_lesson, short_id};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use slidecraft_editor::{ContentElement, ElementBody, LessonMetrics, SlideKind};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the lesson document as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let lesson = load_lesson(cwd)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lesson)?);
        return Ok(());
    }

    println!("{} {}", lesson.title.bright_white().bold(), format!("({})", lesson.id).dimmed());
    let trail: Vec<&str> = [&lesson.path, &lesson.level, &lesson.course]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    if !trail.is_empty() {
        println!("{}", trail.join(" › ").dimmed());
    }
    if !lesson.description.is_empty() {
        println!("{}", lesson.description);
    }
    println!();

    for slide in &lesson.slides {
        let kind = match slide.kind {
            SlideKind::Info => "info".cyan(),
            SlideKind::Qa => "qa".magenta(),
        };
        println!(
            "[{}] {} {} {}",
            slide.index,
            slide.title.bold(),
            kind,
            format!("{} elements", slide.element_count()).dimmed()
        );

        for element in slide.elements() {
            println!(
                "    {}  {:<10} {}",
                short_id(&element.id).yellow(),
                element.kind().as_str(),
                describe(element)
            );
        }
    }

    Ok(())
}

pub fn stats(args: StatsArgs, cwd: &str) -> Result<()> {
    let lesson = load_lesson(cwd)?;
    let metrics = LessonMetrics::of(&lesson);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    print_metrics(&metrics);
    Ok(())
}

fn print_metrics(metrics: &LessonMetrics) {
    let progress = format!("{:.0}%", metrics.progress);
    let progress = if metrics.progress >= 100.0 {
        progress.green().bold()
    } else {
        progress.yellow()
    };

    println!("📊 {}", "Lesson stats".bright_blue().bold());
    println!("   Slides:    {}", metrics.slide_count);
    println!("   Elements:  {}", metrics.element_count);
    println!("   Progress:  {}", progress);
    println!("   Duration:  ~{} min", metrics.estimated_minutes);
}

/// One-line summary of an element's payload
pub fn describe(element: &ContentElement) -> String {
    match &element.body {
        ElementBody::Text { content, .. } => format!("\"{}\"", truncate(content, 48)),
        ElementBody::Image { uri } => truncate(uri, 56),
        ElementBody::Expression { latex, .. } => format!("${}$", truncate(latex, 48)),
        ElementBody::Options {
            choices,
            correct_answer,
            ..
        } => format!("{} choices, answer {}", choices.len(), correct_answer),
        ElementBody::Carousel { images, .. } => format!("{} images", images.len()),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}
