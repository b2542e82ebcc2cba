use crate::core::carousel::CarouselController;
use crate::domain::model::{Project, ProjectCollection, Theme};

/// What the "Featured Work" section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselView {
    Loading,
    Showing(ProjectCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub live: String,
    pub position: usize,
    pub total: usize,
}

impl ProjectCard {
    pub fn new(project: &Project, position: usize, total: usize) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            image: project.image.clone(),
            tags: display_tags(&project.technologies),
            live: project.live.clone(),
            position,
            total,
        }
    }
}

impl CarouselView {
    pub fn build(carousel: &CarouselController, collection: &ProjectCollection) -> Self {
        match (carousel.position(), carousel.current(collection)) {
            (Some(position), Some(project)) => {
                CarouselView::Showing(ProjectCard::new(project, position, collection.len()))
            }
            _ => CarouselView::Loading,
        }
    }
}

/// Tags are trimmed for display. Blank tags are kept.
pub fn display_tags(technologies: &[String]) -> Vec<String> {
    technologies.iter().map(|tag| tag.trim().to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLinkView {
    pub label: String,
    pub href: String,
    pub opens_new_tab: bool,
}

impl SocialLinkView {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            label: label.into(),
            opens_new_tab: !href.starts_with("mailto:"),
            href,
        }
    }
}

pub fn render_carousel(view: &CarouselView, theme: Theme) -> String {
    let mut out = String::new();
    let accent = match theme {
        Theme::Dark => "▸",
        Theme::Light => "›",
    };

    match view {
        CarouselView::Loading => out.push_str("Loading projects...\n"),
        CarouselView::Showing(card) => {
            out.push_str(&format!("{} {} ({}/{})\n", accent, card.title, card.position + 1, card.total));
            out.push_str(&format!("  {}\n", card.description));
            if !card.tags.is_empty() {
                let tags: Vec<String> = card.tags.iter().map(|t| format!("[{}]", t)).collect();
                out.push_str(&format!("  {}\n", tags.join(" ")));
            }
            out.push_str(&format!("  image: {}\n", card.image));
            out.push_str(&format!("  View Project: {}\n", card.live));
        }
    }
    out
}
