//! Background work dispatch. Every network round-trip runs on its own
//! spawned thread and reports back to the UI thread over one channel.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use crate::llm::media;
use crate::llm::{GeminiClient, GenRequest, Generator};
use crate::state::runtime::ChatTurn;

/// Results arriving from worker threads.
#[derive(Debug)]
pub enum WorkEvent {
    Generated {
        chapter_id: String,
        section_id: String,
        /// Initiated by chapter selection, not by the user.
        auto: bool,
        /// The user asked to overwrite what was cached.
        regenerate: bool,
        result: Result<String, String>,
    },
    ChatReply(Result<String, String>),
    OcrText(Result<String, String>),
    ToolReport(Result<String, String>),
}

pub struct GenerationManager {
    generator: Arc<dyn Generator>,
    tx: Sender<WorkEvent>,
}

impl GenerationManager {
    pub fn new(generator: Arc<dyn Generator>, tx: Sender<WorkEvent>) -> Self {
        Self { generator, tx }
    }

    /// Dispatch a section generation. The send can only fail at shutdown,
    /// when nobody is listening anyway.
    pub fn request(&self, request: GenRequest, auto: bool, regenerate: bool) {
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = generator.generate(&request);
            let _ = tx.send(WorkEvent::Generated {
                chapter_id: request.chapter_id,
                section_id: request.section_id,
                auto,
                regenerate,
                result,
            });
        });
    }

    pub fn request_chat(&self, client: Arc<GeminiClient>, history: Vec<ChatTurn>, message: String) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.chat(&history, &message);
            let _ = tx.send(WorkEvent::ChatReply(result));
        });
    }

    pub fn request_ocr(&self, client: Arc<GeminiClient>, path: PathBuf) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = media::extract_text_from_image(&client, &path);
            let _ = tx.send(WorkEvent::OcrText(result));
        });
    }

    pub fn request_speech_report(&self, client: Arc<GeminiClient>, path: PathBuf) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = media::analyze_recording(&client, &path);
            let _ = tx.send(WorkEvent::ToolReport(result));
        });
    }

    /// One-shot text generation for the practice tools (dictation,
    /// homophones). Reuses the section pipeline's generator.
    pub fn request_tool_text(&self, request: GenRequest) {
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = generator.generate(&request);
            let _ = tx.send(WorkEvent::ToolReport(result));
        });
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and answers with a canned response.
    pub struct CountingGenerator {
        pub calls: AtomicUsize,
        pub response: Result<String, String>,
    }

    impl CountingGenerator {
        pub fn ok(response: &str) -> Self {
            Self { calls: AtomicUsize::new(0), response: Ok(response.to_string()) }
        }

        pub fn failing(error: &str) -> Self {
            Self { calls: AtomicUsize::new(0), response: Err(error.to_string()) }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Generator for CountingGenerator {
        fn generate(&self, _request: &GenRequest) -> Result<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }
}
