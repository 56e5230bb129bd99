//! Application core: selection, resolution dispatch and completion
//! handling. Everything here is UI-free and driven either by the event
//! loop or by tests.

pub mod events;
pub mod generation;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event};
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};

use crate::config::AppConfig;
use crate::content;
use crate::export;
use crate::infra::log::log_error;
use crate::llm::prompts;
use crate::llm::{GeminiClient, GenRequest, Generator, ResponseShape};
use crate::resolver;
use crate::state::runtime::{ChatRole, ChatTurn, SpecialTool, View};
use crate::state::tabs::{self, AUTO_TAB, DEFAULT_TAB};
use crate::state::{Book, Chapter, ClassLevel, SectionState, State};
use crate::store::ContentCache;

use generation::{GenerationManager, WorkEvent};

pub struct App {
    pub state: State,
    pub cache: ContentCache,
    pub config: AppConfig,
    pub client: Arc<GeminiClient>,
    manager: GenerationManager,
    rx: Receiver<WorkEvent>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        chapters: Vec<Chapter>,
        config: AppConfig,
        cache: ContentCache,
        client: Arc<GeminiClient>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let state = State::new(chapters, config.language);
        Self {
            state,
            cache,
            config,
            client,
            manager: GenerationManager::new(generator, tx),
            rx,
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), String> {
        while !self.should_quit {
            terminal
                .draw(|frame: &mut Frame| crate::ui::draw(frame, self))
                .map_err(|e| format!("draw failed: {e}"))?;

            let mut completed = Vec::new();
            while let Ok(work) = self.rx.try_recv() {
                completed.push(work);
            }
            for work in completed {
                self.handle_work(work);
            }

            if event::poll(Duration::from_millis(50)).map_err(|e| format!("event poll failed: {e}"))? {
                let ev = event::read().map_err(|e| format!("event read failed: {e}"))?;
                self.handle_event(ev);
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) => events::handle_key(self, key),
            Event::Mouse(mouse) => events::handle_mouse(self, mouse),
            _ => {}
        }
    }

    // --- selection -------------------------------------------------------

    /// Activate a chapter. Re-selecting the active chapter is a no-op, so
    /// repeated clicks never re-trigger auto-generation.
    pub fn select_chapter(&mut self, index: usize) {
        if self.state.selected == Some(index) {
            return;
        }
        if index >= self.state.chapters.len() {
            return;
        }
        self.state.selected = Some(index);
        self.state.view = View::Chapter;

        if let Some(chapter) = self.state.chapters.get_mut(index) {
            if let Err(e) = content::load_details(chapter, &self.config.content_dir) {
                // Missing detail files degrade to generated content.
                log_error(&e);
            }
        }
        let chapter = self.state.chapters[index].clone();
        resolver::seed_direct(&chapter, &mut self.cache);

        let auto = chapter.book.auto_generates();
        self.state.reader.reset_transients();
        self.state.reader.active_tab = if auto { AUTO_TAB } else { DEFAULT_TAB }.to_string();
        self.state.tab_cursor = tabs::TABS
            .iter()
            .position(|t| t.id == self.state.reader.active_tab)
            .unwrap_or(0);
        self.resolve_active(&chapter, auto, false);
    }

    pub fn select_tab(&mut self, tab_id: &str) {
        let Some(chapter) = self.state.selected_chapter().cloned() else {
            return;
        };
        self.state.reader.active_tab = tab_id.to_string();
        self.state.reader.reset_transients();
        self.resolve_active(&chapter, false, false);
    }

    fn resolve_active(&mut self, chapter: &Chapter, auto: bool, regenerate: bool) {
        let tab_id = self.state.reader.active_tab.clone();
        let (section, request) = resolver::resolve(chapter, &tab_id, &self.cache).into_state();
        self.state.reader.section = section;
        let Some(request) = request else { return };
        if auto {
            // One auto request per chapter; a second selection while the
            // first is in flight just keeps showing the spinner.
            if self.state.reader.begin_auto(&chapter.id) {
                self.manager.request(request, true, regenerate);
            }
        } else {
            self.manager.request(request, false, regenerate);
        }
    }

    /// Drop the cached section and generate it afresh.
    pub fn regenerate_active(&mut self) {
        let Some(chapter) = self.state.selected_chapter().cloned() else {
            return;
        };
        let tab_id = self.state.reader.active_tab.clone();
        self.cache.remove(&chapter.id, &tab_id);
        self.state.reader.reset_transients();
        self.resolve_active(&chapter, false, true);
    }

    /// Retry from an Empty section (typically after a failed generation).
    pub fn generate_active(&mut self) {
        if self.state.reader.section != SectionState::Empty {
            return;
        }
        let Some(chapter) = self.state.selected_chapter().cloned() else {
            return;
        };
        self.resolve_active(&chapter, false, false);
    }

    // --- completions -----------------------------------------------------

    pub fn handle_work(&mut self, work: WorkEvent) {
        match work {
            WorkEvent::Generated { chapter_id, section_id, auto, regenerate, result } => {
                if auto {
                    self.state.reader.finish_auto(&chapter_id);
                }
                let active = self.state.selected_chapter().map(|c| c.id.clone()) == Some(chapter_id.clone())
                    && self.state.reader.active_tab == section_id;
                match result {
                    Ok(text) => {
                        if regenerate {
                            self.cache.put(&chapter_id, &section_id, text);
                        } else {
                            // First completion wins; a duplicate in-flight
                            // result is dropped.
                            self.cache.put_if_absent(&chapter_id, &section_id, text);
                        }
                        if active {
                            let cached = self
                                .cache
                                .get(&chapter_id, &section_id)
                                .unwrap_or_default()
                                .to_string();
                            self.state.reader.section = SectionState::Ready(cached);
                        }
                    }
                    Err(e) => {
                        log_error(&format!("generation {chapter_id}::{section_id} failed: {e}"));
                        if active {
                            self.state.reader.section = SectionState::Empty;
                            self.state.status = Some(format!("Generation failed: {e}"));
                        }
                    }
                }
            }
            WorkEvent::ChatReply(result) => {
                self.state.explorer.waiting = false;
                match result {
                    Ok(text) => {
                        self.state.explorer.messages.push(ChatTurn { role: ChatRole::Model, text });
                        self.state.explorer.scroll = 0;
                    }
                    Err(e) => {
                        log_error(&format!("chat failed: {e}"));
                        let text = match self.state.language {
                            crate::state::Language::Hindi => {
                                "क्षमा करें, अभी उत्तर नहीं मिल पाया। कृपया कुछ देर बाद फिर प्रयास करें।"
                            }
                            crate::state::Language::English => {
                                "Sorry, I could not get a reply right now. Please try again in a moment."
                            }
                        }
                        .to_string();
                        self.state.explorer.messages.push(ChatTurn { role: ChatRole::Model, text });
                        self.state.explorer.scroll = 0;
                    }
                }
            }
            WorkEvent::OcrText(result) => {
                self.state.form.extracting = false;
                match result {
                    Ok(text) => {
                        if !self.state.form.text.is_empty() {
                            self.state.form.text.push_str("\n\n");
                        }
                        self.state.form.text.push_str(&text);
                        self.state.form.notice = None;
                    }
                    Err(e) => {
                        log_error(&format!("ocr failed: {e}"));
                        self.state.form.notice = Some(format!("Image reading failed: {e}"));
                    }
                }
            }
            WorkEvent::ToolReport(result) => {
                self.state.tool_state.busy = false;
                match result {
                    Ok(text) => self.state.tool_state.report = Some(text),
                    Err(e) => {
                        log_error(&format!("tool request failed: {e}"));
                        self.state.status = Some(format!("Request failed: {e}"));
                    }
                }
            }
        }
    }

    // --- explorer / tools / form -----------------------------------------

    pub fn send_chat(&mut self) {
        let message = self.state.explorer.input.trim().to_string();
        if message.is_empty() || self.state.explorer.waiting {
            return;
        }
        self.state.explorer.input.clear();
        let history = self.state.explorer.messages.clone();
        self.state.explorer.messages.push(ChatTurn { role: ChatRole::User, text: message.clone() });
        self.state.explorer.waiting = true;
        self.manager.request_chat(Arc::clone(&self.client), history, message);
    }

    pub fn start_ocr(&mut self) {
        let path = self.state.form.image_path.trim().to_string();
        if path.is_empty() || self.state.form.extracting {
            return;
        }
        self.state.form.extracting = true;
        self.state.form.notice = Some("Reading image...".to_string());
        self.manager.request_ocr(Arc::clone(&self.client), PathBuf::from(path));
    }

    /// Kick off the active practice tool. Vachan needs a recording path in
    /// the input field; the text tools run straight away.
    pub fn start_tool(&mut self) {
        if self.state.tool_state.busy {
            return;
        }
        match self.state.tool {
            SpecialTool::Vachan => {
                let path = self.state.tool_state.input.trim().to_string();
                if path.is_empty() {
                    self.state.status = Some("Enter the path to a recording first".to_string());
                    return;
                }
                self.state.tool_state.busy = true;
                self.manager.request_speech_report(Arc::clone(&self.client), PathBuf::from(path));
            }
            SpecialTool::Shrutlekh => {
                let class = self
                    .state
                    .selected_chapter()
                    .map(|c| c.class_level.as_str())
                    .unwrap_or("10");
                self.state.tool_state.busy = true;
                self.manager.request_tool_text(GenRequest {
                    chapter_id: "tool".to_string(),
                    section_id: "shrutlekh".to_string(),
                    prompt: prompts::dictation_prompt(class),
                    shape: ResponseShape::RichText,
                    temperature: 0.7,
                });
            }
            SpecialTool::Keeki => {
                self.state.tool_state.busy = true;
                self.manager.request_tool_text(GenRequest {
                    chapter_id: "tool".to_string(),
                    section_id: "keeki".to_string(),
                    prompt: prompts::homophones_prompt().to_string(),
                    shape: ResponseShape::RichText,
                    temperature: 0.7,
                });
            }
        }
    }

    pub fn create_custom_chapter(&mut self) {
        let title = self.state.form.title.trim().to_string();
        let text = self.state.form.text.trim().to_string();
        if title.is_empty() || text.is_empty() {
            self.state.form.notice = Some("Title and text are both required".to_string());
            return;
        }
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let chapter = Chapter {
            id: format!("custom_{timestamp}"),
            title,
            book: Book::Custom,
            class_level: ClassLevel::Custom,
            language: self.state.language,
            content_file: None,
            original_text: Some(text),
            author_bio: None,
            vocabulary: None,
            qa: None,
            external_resources: Default::default(),
        };
        self.state.chapters.insert(0, chapter);
        // Indices shifted; clear the stale selection before re-selecting.
        self.state.selected = self.state.selected.map(|i| i + 1);
        self.state.form.reset();
        self.state.view = View::Chapter;
        self.select_chapter(0);
    }

    pub fn export_active(&mut self) {
        let Some(chapter) = self.state.selected_chapter().cloned() else {
            return;
        };
        let SectionState::Ready(content) = &self.state.reader.section else {
            self.state.status = Some("Nothing to export for this section".to_string());
            return;
        };
        let Some(tab) = tabs::tab(&self.state.reader.active_tab) else {
            return;
        };
        match export::export_section(std::path::Path::new("."), &chapter, tab, content) {
            Ok(path) => self.state.status = Some(format!("Exported to {}", path.display())),
            Err(e) => {
                log_error(&e);
                self.state.status = Some(format!("Export failed: {e}"));
            }
        }
    }

    pub fn toggle_language(&mut self) {
        self.state.language = self.state.language.toggled();
        self.state.sidebar_cursor = 0;
    }

    #[cfg(test)]
    fn recv_work(&mut self) -> WorkEvent {
        self.rx.recv_timeout(Duration::from_secs(2)).expect("worker result")
    }
}

#[cfg(test)]
mod tests {
    use super::generation::testing::CountingGenerator;
    use super::*;
    use std::collections::HashMap;

    fn chapter(id: &str, book: Book, text: Option<&str>) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: id.to_string(),
            book,
            class_level: ClassLevel::Ten,
            language: crate::state::Language::Hindi,
            content_file: None,
            original_text: text.map(str::to_string),
            author_bio: None,
            vocabulary: None,
            qa: None,
            external_resources: HashMap::new(),
        }
    }

    fn app_with(chapters: Vec<Chapter>, generator: Arc<CountingGenerator>) -> App {
        let config = AppConfig::default();
        let client = Arc::new(GeminiClient::new(&config).unwrap());
        App::new(chapters, config, ContentCache::in_memory(), client, generator)
    }

    #[test]
    fn test_auto_generation_fires_once_per_chapter() {
        let generator = Arc::new(CountingGenerator::ok("<p>पाठ</p>"));
        let mut app = app_with(
            vec![
                chapter("g1", Book::Grammar, None),
                chapter("s1", Book::Sparsh, Some("text")),
            ],
            generator.clone(),
        );

        app.select_chapter(0);
        assert_eq!(app.state.reader.active_tab, AUTO_TAB);
        assert_eq!(app.state.reader.section, SectionState::Loading);

        // Bounce away and back before the result lands: no second request.
        app.select_chapter(1);
        app.select_chapter(0);
        assert_eq!(app.state.reader.section, SectionState::Loading);

        let work = app.recv_work();
        app.handle_work(work);
        assert_eq!(generator.call_count(), 1);
        assert_eq!(app.state.reader.section, SectionState::Ready("<p>पाठ</p>".to_string()));
        assert_eq!(app.cache.get("g1", AUTO_TAB), Some("<p>पाठ</p>"));

        // Once cached, re-selection serves from the cache.
        app.select_chapter(1);
        app.select_chapter(0);
        assert_eq!(app.state.reader.section, SectionState::Ready("<p>पाठ</p>".to_string()));
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn test_reselecting_active_chapter_is_a_no_op() {
        let generator = Arc::new(CountingGenerator::ok("x"));
        let mut app = app_with(vec![chapter("g1", Book::Grammar, None)], generator.clone());
        app.select_chapter(0);
        app.select_chapter(0);
        app.select_chapter(0);
        let work = app.recv_work();
        app.handle_work(work);
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn test_duplicate_completions_are_first_wins() {
        let generator = Arc::new(CountingGenerator::ok("unused"));
        let mut app = app_with(vec![chapter("s1", Book::Sparsh, Some("text"))], generator);
        app.select_chapter(0);
        app.select_tab("vyakhya");
        let _ = app.recv_work();

        let completion = |text: &str| WorkEvent::Generated {
            chapter_id: "s1".to_string(),
            section_id: "vyakhya".to_string(),
            auto: false,
            regenerate: false,
            result: Ok(text.to_string()),
        };
        app.handle_work(completion("first"));
        app.handle_work(completion("second"));
        assert_eq!(app.cache.get("s1", "vyakhya"), Some("first"));
        assert_eq!(app.state.reader.section, SectionState::Ready("first".to_string()));
    }

    #[test]
    fn test_failed_generation_leaves_section_empty_and_uncached() {
        let generator = Arc::new(CountingGenerator::failing("API error 503"));
        let mut app = app_with(vec![chapter("s1", Book::Sparsh, Some("text"))], generator.clone());
        app.select_chapter(0);
        app.select_tab("quiz");
        let work = app.recv_work();
        app.handle_work(work);
        assert_eq!(app.state.reader.section, SectionState::Empty);
        assert!(app.cache.get("s1", "quiz").is_none());
        assert!(app.state.status.as_deref().unwrap().contains("503"));

        // A manual retry issues a fresh request.
        app.generate_active();
        assert_eq!(app.state.reader.section, SectionState::Loading);
        let work = app.recv_work();
        app.handle_work(work);
        assert_eq!(generator.call_count(), 2);
    }

    #[test]
    fn test_stale_completion_caches_but_does_not_display() {
        let generator = Arc::new(CountingGenerator::ok("slow result"));
        let mut app = app_with(vec![chapter("s1", Book::Sparsh, Some("text"))], generator);
        app.select_chapter(0);
        app.select_tab("vyakhya");
        let work = app.recv_work();

        // User moved on before the result arrived.
        app.select_tab("mool_path");
        app.handle_work(work);
        assert_eq!(app.cache.get("s1", "vyakhya"), Some("slow result"));
        assert_eq!(app.state.reader.section, SectionState::Ready("text".to_string()));
    }

    #[test]
    fn test_regenerate_overwrites_cache() {
        let generator = Arc::new(CountingGenerator::ok("new version"));
        let mut app = app_with(vec![chapter("s1", Book::Sparsh, Some("text"))], generator);
        app.cache.put("s1", "vyakhya", "old version".to_string());
        app.select_chapter(0);
        app.select_tab("vyakhya");
        assert_eq!(app.state.reader.section, SectionState::Ready("old version".to_string()));

        app.regenerate_active();
        assert_eq!(app.state.reader.section, SectionState::Loading);
        let work = app.recv_work();
        app.handle_work(work);
        assert_eq!(app.cache.get("s1", "vyakhya"), Some("new version"));
    }

    #[test]
    fn test_custom_chapter_creation_selects_it() {
        let generator = Arc::new(CountingGenerator::ok("x"));
        let mut app = app_with(vec![chapter("s1", Book::Sparsh, Some("text"))], generator);
        app.select_chapter(0);
        app.state.form.title = "मेरा पाठ".to_string();
        app.state.form.text = "पाठ की सामग्री".to_string();
        app.create_custom_chapter();

        assert_eq!(app.state.chapters.len(), 2);
        assert!(app.state.chapters[0].id.starts_with("custom_"));
        assert_eq!(app.state.selected, Some(0));
        assert_eq!(app.state.view, View::Chapter);
        // The entered text is served as the source tab.
        assert_eq!(app.state.reader.section, SectionState::Ready("पाठ की सामग्री".to_string()));
        assert!(app.state.form.title.is_empty());
    }

    #[test]
    fn test_missing_form_fields_block_creation() {
        let generator = Arc::new(CountingGenerator::ok("x"));
        let mut app = app_with(vec![], generator);
        app.state.form.title = "केवल शीर्षक".to_string();
        app.create_custom_chapter();
        assert!(app.state.chapters.is_empty());
        assert!(app.state.form.notice.is_some());
    }

    #[test]
    fn test_chat_failure_lands_in_transcript() {
        let generator = Arc::new(CountingGenerator::ok("x"));
        let mut app = app_with(vec![], generator);
        let before = app.state.explorer.messages.len();
        app.state.explorer.waiting = true;
        app.handle_work(WorkEvent::ChatReply(Err("Request failed: timeout".to_string())));
        assert!(!app.state.explorer.waiting);
        assert_eq!(app.state.explorer.messages.len(), before + 1);
        assert_eq!(app.state.explorer.messages.last().unwrap().role, ChatRole::Model);
    }

    #[test]
    fn test_external_tab_never_generates() {
        let generator = Arc::new(CountingGenerator::ok("x"));
        let mut ch = chapter("s1", Book::Sparsh, Some("text"));
        ch.external_resources.insert("drishyamala".to_string(), "https://example.com/v".to_string());
        let mut app = app_with(vec![ch], generator.clone());
        app.select_chapter(0);
        app.select_tab("drishyamala");
        assert_eq!(
            app.state.reader.section,
            SectionState::External("https://example.com/v".to_string())
        );
        assert_eq!(generator.call_count(), 0);
    }
}
