//! Presentation sections

/// One full-viewport section of the deck
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Unique, order-significant id
    pub id: u32,
    pub title: String,
    pub body: String,
}

/// Background theme of a section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionTheme {
    /// Even ids
    Midnight,
    /// Odd ids
    Slate,
}

impl SectionTheme {
    /// Background as a hex color string
    pub fn background(&self) -> &'static str {
        match self {
            SectionTheme::Midnight => "#0f172a",
            SectionTheme::Slate => "#1e293b",
        }
    }
}

const LOREM: &str = "Lorem ipsum dolor sit amet consectetur adipisicing elit. Alias placeat \
veniam earum, cum quasi vitae cupiditate doloremque illo quae architecto nobis quod aliquid, \
officiis tenetur saepe dolorum ducimus, molestiae corporis sunt.";

impl Section {
    pub fn new(id: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Sections alternate backgrounds by id parity
    pub fn theme(&self) -> SectionTheme {
        if self.id % 2 == 0 {
            SectionTheme::Midnight
        } else {
            SectionTheme::Slate
        }
    }

    /// The built-in presentation
    pub fn defaults() -> Vec<Section> {
        [
            (0, "Intro", "Apple. The man. A few quotes."),
            (1, "Keynote", "Stage presence & storytelling."),
            (2, "Design", "Simplicity & craft."),
            (3, "Legacy", "The aftermath & memory."),
            (4, "Keynote", "Stage presence & storytelling."),
            (5, "Keynote", "Stage presence & storytelling."),
            (6, "Outro", "Apple. The man. A few quotes."),
        ]
        .into_iter()
        .map(|(id, title, lead)| Section::new(id, title, format!("{lead} {LOREM}")))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_ordered_and_unique() {
        let sections = Section::defaults();
        assert_eq!(sections.len(), 7);
        for (index, section) in sections.iter().enumerate() {
            assert_eq!(section.id as usize, index);
        }
        assert_eq!(sections[0].title, "Intro");
        assert_eq!(sections[6].title, "Outro");
        assert!(sections[2].body.starts_with("Simplicity & craft."));
    }

    #[test]
    fn test_theme_alternates() {
        let sections = Section::defaults();
        assert_eq!(sections[0].theme(), SectionTheme::Midnight);
        assert_eq!(sections[1].theme(), SectionTheme::Slate);
        assert_eq!(sections[1].theme().background(), "#1e293b");
        assert_eq!(sections[4].theme().background(), "#0f172a");
    }
}
