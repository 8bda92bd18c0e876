use super::show::describe;
use super::{focus_slide, open_session, resolve_element, short_id};
use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use slidecraft_editor::{
    Align, ContentElement, Direction, DisplayMode, EditSession, ElementKind, ElementPatch,
    Position, TextVariant, Width,
};

#[derive(Debug, Subcommand)]
pub enum ElementCommand {
    /// Append an element to a slide
    Add {
        #[arg(short, long, default_value_t = 0)]
        slide: usize,

        #[command(subcommand)]
        element: NewElement,
    },

    /// Change fields of an element
    Update(UpdateArgs),

    /// Remove an element
    Remove {
        #[arg(short, long, default_value_t = 0)]
        slide: usize,

        /// Element id or unique prefix
        id: String,
    },

    /// Swap an element with its neighbour
    Move {
        #[arg(short, long, default_value_t = 0)]
        slide: usize,

        id: String,

        /// up or down
        direction: Direction,
    },

    /// Move the element at FROM to position TO
    Reorder {
        #[arg(short, long, default_value_t = 0)]
        slide: usize,

        from: usize,
        to: usize,
    },

    /// Insert a starter element next to an existing one
    Insert {
        #[arg(short, long, default_value_t = 0)]
        slide: usize,

        /// Element id or unique prefix to insert next to
        anchor: String,

        /// text, image, expression, options or carousel
        kind: ElementKind,

        /// above or below
        #[arg(default_value = "below")]
        position: Position,
    },
}

#[derive(Debug, Subcommand)]
pub enum NewElement {
    Text {
        #[arg(default_value = "")]
        content: String,

        /// bold, default or caption
        #[arg(long, default_value = "default")]
        variant: TextVariant,
    },

    Image {
        uri: String,
    },

    Expression {
        latex: String,

        /// Render on its own line
        #[arg(long)]
        block: bool,
    },

    Options {
        choices: Vec<String>,

        /// Index of the correct choice
        #[arg(short, long, default_value_t = 0)]
        correct: usize,
    },

    Carousel {
        images: Vec<String>,

        #[arg(long)]
        no_arrows: bool,

        #[arg(long)]
        no_dots: bool,
    },
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(short, long, default_value_t = 0)]
    pub slide: usize,

    /// Element id or unique prefix
    pub id: String,

    /// Patch as JSON, e.g. '{"content": "Hi", "topSpace": 8}'
    #[arg(long)]
    pub patch: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub uri: Option<String>,

    #[arg(long)]
    pub latex: Option<String>,

    #[arg(long)]
    pub correct: Option<usize>,

    #[arg(long)]
    pub align: Option<Align>,

    #[arg(long)]
    pub width: Option<Width>,

    #[arg(long)]
    pub top_space: Option<u8>,

    #[arg(long)]
    pub bottom_space: Option<u8>,
}

impl UpdateArgs {
    /// Flags override fields given in `--patch`
    pub fn to_patch(&self) -> Result<ElementPatch> {
        let mut patch = match &self.patch {
            Some(json) => serde_json::from_str(json)
                .map_err(|e| anyhow!("Invalid --patch JSON: {}", e))?,
            None => ElementPatch::default(),
        };

        if let Some(content) = &self.content {
            patch.content = Some(content.clone());
        }
        if let Some(uri) = &self.uri {
            patch.uri = Some(uri.clone());
        }
        if let Some(latex) = &self.latex {
            patch.latex = Some(latex.clone());
        }
        patch.correct_answer = self.correct.or(patch.correct_answer);
        patch.align = self.align.or(patch.align);
        patch.width = self.width.or(patch.width);
        patch.top_space = self.top_space.or(patch.top_space);
        patch.bottom_space = self.bottom_space.or(patch.bottom_space);

        if patch.is_empty() {
            return Err(anyhow!("Nothing to update"));
        }
        Ok(patch)
    }
}

impl NewElement {
    fn build(self) -> Result<ContentElement> {
        let element = match self {
            NewElement::Text { content, variant } => ContentElement::text(content, variant),
            NewElement::Image { uri } => ContentElement::image(uri),
            NewElement::Expression { latex, block } => {
                let mode = if block {
                    DisplayMode::Block
                } else {
                    DisplayMode::Inline
                };
                ContentElement::expression(latex, mode)
            }
            NewElement::Options { choices, correct } => ContentElement::options(choices, correct)?,
            NewElement::Carousel {
                images,
                no_arrows,
                no_dots,
            } => ContentElement::carousel(images, !no_arrows, !no_dots),
        };
        Ok(element)
    }
}

pub fn element(command: ElementCommand, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd)?;

    match command {
        ElementCommand::Add { slide, element } => {
            focus_slide(&mut session, slide)?;
            let element = element.build()?;
            let summary = format!("{} {}", element.kind(), describe(&element));
            let id = element.id.clone();
            session.add_element(element)?;
            println!("{} Added {} {}", "✓".green(), summary, short_id(&id).yellow());
        }

        ElementCommand::Update(args) => {
            focus_slide(&mut session, args.slide)?;
            let id = element_id(&session, &args.id)?;
            let patch = args.to_patch()?;
            session.update_element(&id, patch)?;
            println!("{} Updated {}", "✓".green(), short_id(&id).yellow());
        }

        ElementCommand::Remove { slide, id } => {
            focus_slide(&mut session, slide)?;
            let id = element_id(&session, &id)?;
            session.remove_element(&id)?;
            println!("{} Removed {}", "✓".green(), short_id(&id).yellow());
        }

        ElementCommand::Move {
            slide,
            id,
            direction,
        } => {
            focus_slide(&mut session, slide)?;
            let id = element_id(&session, &id)?;
            let before = session.lesson();
            session.move_element(&id, direction)?;

            if *before == *session.lesson() {
                println!("{} Already at the edge, nothing moved", "⚠️".yellow());
            } else {
                println!("{} Moved {}", "✓".green(), short_id(&id).yellow());
            }
        }

        ElementCommand::Reorder { slide, from, to } => {
            focus_slide(&mut session, slide)?;
            let count = session.current_slide_data().map_or(0, |s| s.element_count());
            if from >= count {
                return Err(anyhow!("No element at position {} (slide has {})", from, count));
            }
            session.reorder_elements(from, to)?;
            println!("{} Moved element {} → {}", "✓".green(), from, to.min(count - 1));
        }

        ElementCommand::Insert {
            slide,
            anchor,
            kind,
            position,
        } => {
            focus_slide(&mut session, slide)?;
            let anchor = element_id(&session, &anchor)?;
            session.insert_element_relative(&anchor, kind, position)?;
            println!(
                "{} Inserted {} next to {}",
                "✓".green(),
                kind,
                short_id(&anchor).yellow()
            );
        }
    }

    session.save()?;
    Ok(())
}

fn element_id(session: &EditSession, id_or_prefix: &str) -> Result<String> {
    let slide = session
        .current_slide_data()
        .ok_or_else(|| anyhow!("Lesson has no slides"))?;
    resolve_element(slide, id_or_prefix)
}
