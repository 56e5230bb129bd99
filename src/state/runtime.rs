//! Top-level runtime state for the console.

use ratatui::layout::Rect;

use crate::board::Board;
use crate::state::chapter::{Chapter, Language};
use crate::state::reader::ReaderState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chapter,
    Explorer,
    CustomEntry,
    SpecialTool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialTool {
    /// Speaking-skill activity: analyze a recorded reading.
    Vachan,
    /// Dictation / spelling practice.
    Shrutlekh,
    /// Homophone practice ('कि' vs 'की').
    Keeki,
}

impl SpecialTool {
    pub fn title(self, language: Language) -> &'static str {
        match (self, language) {
            (SpecialTool::Vachan, Language::Hindi) => "वाचन कौशल गतिविधि",
            (SpecialTool::Vachan, Language::English) => "Speaking Activity",
            (SpecialTool::Shrutlekh, Language::Hindi) => "श्रुतलेख",
            (SpecialTool::Shrutlekh, Language::English) => "Spelling Bee",
            (SpecialTool::Keeki, Language::Hindi) => "'कि' और 'की' अभ्यास",
            (SpecialTool::Keeki, Language::English) => "Homophones Practice",
        }
    }
}

/// Non-chapter entries shown at the top of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Explorer,
    AddChapter,
    Vachan,
    Shrutlekh,
    Keeki,
}

impl Activity {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Activity::Explorer, Language::Hindi) => "ज्ञान अन्वेषण",
            (Activity::Explorer, Language::English) => "Knowledge Explorer",
            (Activity::AddChapter, Language::Hindi) => "नया पाठ जोड़ें",
            (Activity::AddChapter, Language::English) => "Add New Chapter",
            (Activity::Vachan, Language::Hindi) => "वाचन कौशल",
            (Activity::Vachan, Language::English) => "Speaking Skill",
            (Activity::Shrutlekh, Language::Hindi) => "श्रुतलेख",
            (Activity::Shrutlekh, Language::English) => "Spelling Bee",
            (Activity::Keeki, Language::Hindi) => "'कि'/'की' अभ्यास",
            (Activity::Keeki, Language::English) => "Homophones",
        }
    }
}

pub const ACTIVITIES: &[Activity] =
    &[Activity::Explorer, Activity::AddChapter, Activity::Vachan, Activity::Shrutlekh, Activity::Keeki];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    Activity(Activity),
    /// Index into `State::chapters`.
    Chapter(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Tabs,
    Content,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Tabs,
            Focus::Tabs => Focus::Content,
            Focus::Content => Focus::Sidebar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Fields of the custom chapter entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Text,
    ImagePath,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Text,
            FormField::Text => FormField::ImagePath,
            FormField::ImagePath => FormField::Title,
        }
    }
}

#[derive(Debug, Default)]
pub struct CustomForm {
    pub title: String,
    pub text: String,
    pub image_path: String,
    pub field: Option<FormField>,
    pub extracting: bool,
    pub notice: Option<String>,
}

impl CustomForm {
    pub fn reset(&mut self) {
        self.title.clear();
        self.text.clear();
        self.image_path.clear();
        self.field = Some(FormField::Title);
        self.extracting = false;
        self.notice = None;
    }
}

#[derive(Debug, Default)]
pub struct ExplorerState {
    pub messages: Vec<ChatTurn>,
    pub input: String,
    pub waiting: bool,
    pub scroll: u16,
}

#[derive(Debug, Default)]
pub struct ToolState {
    /// Path to a recording (Vachan) typed by the user.
    pub input: String,
    pub report: Option<String>,
    pub busy: bool,
}

pub struct State {
    pub chapters: Vec<Chapter>,
    /// Index into `chapters` of the active chapter.
    pub selected: Option<usize>,
    pub language: Language,
    pub view: View,
    pub tool: SpecialTool,
    pub focus: Focus,

    pub show_sidebar: bool,
    pub show_reader: bool,
    pub show_board: bool,
    pub full_screen: bool,

    pub sidebar_cursor: usize,
    pub tab_cursor: usize,

    pub reader: ReaderState,
    pub board: Board,
    pub form: CustomForm,
    pub explorer: ExplorerState,
    pub tool_state: ToolState,

    /// Transient status line (errors, export confirmations).
    pub status: Option<String>,
    /// Board area from the last frame, for mouse coordinate mapping.
    pub board_rect: Option<Rect>,
}

impl State {
    pub fn new(chapters: Vec<Chapter>, language: Language) -> Self {
        let mut explorer = ExplorerState::default();
        explorer.messages.push(ChatTurn {
            role: ChatRole::Model,
            text: match language {
                Language::Hindi => {
                    "नमस्ते आचार्य जी! मैं आपका डिजिटल सहायक हूँ। आप मुझसे साहित्य, व्याकरण या शिक्षण विधि से जुड़ा कोई भी प्रश्न पूछ सकते हैं।"
                }
                Language::English => {
                    "Hello! I am your digital assistant. Ask me anything about literature, grammar or teaching methods."
                }
            }
            .to_string(),
        });

        Self {
            chapters,
            selected: None,
            language,
            view: View::Chapter,
            tool: SpecialTool::Vachan,
            focus: Focus::Sidebar,
            show_sidebar: true,
            show_reader: true,
            show_board: false,
            full_screen: false,
            sidebar_cursor: 0,
            tab_cursor: 0,
            reader: ReaderState::default(),
            board: Board::default(),
            form: CustomForm::default(),
            explorer,
            tool_state: ToolState::default(),
            status: None,
            board_rect: None,
        }
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        self.selected.and_then(|i| self.chapters.get(i))
    }

    /// Sidebar entries under the current language filter. Custom chapters
    /// are always listed.
    pub fn sidebar_items(&self) -> Vec<SidebarItem> {
        let mut items: Vec<SidebarItem> = ACTIVITIES.iter().map(|a| SidebarItem::Activity(*a)).collect();
        for (i, c) in self.chapters.iter().enumerate() {
            if c.language == self.language || c.is_custom() {
                items.push(SidebarItem::Chapter(i));
            }
        }
        items
    }

    /// Entering full screen collapses the sidebar and board, as in a
    /// projector setup; leaving restores the sidebar only.
    pub fn set_full_screen(&mut self, value: bool) {
        self.full_screen = value;
        self.show_board = false;
        self.show_reader = true;
        self.show_sidebar = !value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::chapter::{Book, ClassLevel};
    use std::collections::HashMap;

    fn chapter(id: &str, language: Language, book: Book) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: id.to_string(),
            book,
            class_level: ClassLevel::Ten,
            language,
            content_file: None,
            original_text: None,
            author_bio: None,
            vocabulary: None,
            qa: None,
            external_resources: HashMap::new(),
        }
    }

    #[test]
    fn test_sidebar_filter_keeps_custom_chapters() {
        let chapters = vec![
            chapter("h1", Language::Hindi, Book::Sparsh),
            chapter("e1", Language::English, Book::Beehive),
            chapter("c1", Language::English, Book::Custom),
        ];
        let state = State::new(chapters, Language::Hindi);
        let items = state.sidebar_items();
        let chapter_items: Vec<_> = items
            .iter()
            .filter_map(|i| match i {
                SidebarItem::Chapter(n) => Some(*n),
                _ => None,
            })
            .collect();
        // Hindi chapter plus the custom one; the English literature chapter
        // is filtered out.
        assert_eq!(chapter_items, vec![0, 2]);
    }

    #[test]
    fn test_full_screen_collapses_panels() {
        let mut state = State::new(vec![], Language::Hindi);
        state.show_board = true;
        state.set_full_screen(true);
        assert!(!state.show_sidebar);
        assert!(!state.show_board);
        state.set_full_screen(false);
        assert!(state.show_sidebar);
    }
}
