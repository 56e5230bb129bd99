//! Domain state, split by concern.
//!
//! - `chapter` — the teachable unit and its category enums
//! - `tabs` — the static section (tab) table and classification helpers
//! - `reader` — the per-section state machine and transient quiz state
//! - `runtime` — the top-level `State` struct driving the UI

pub mod chapter;
pub mod reader;
pub mod runtime;
pub mod tabs;

pub use chapter::{Book, Chapter, ClassLevel, Language};
pub use reader::{ReaderState, SectionState};
pub use runtime::{Activity, ChatRole, ChatTurn, Focus, SidebarItem, SpecialTool, State, View};
pub use tabs::{TabDef, TABS};
