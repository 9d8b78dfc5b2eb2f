//! Engine orchestration: streaming, relighting and remeshing in order,
//! block picking, edit commands and notifications.
#![forbid(unsafe_code)]

mod config;
mod engine;
mod event;
mod picker;

pub use config::EngineConfig;
pub use engine::{Camera, Engine, StreamReport};
pub use event::{ListenerId, Notification, NotificationBus};
pub use picker::{BlockPicker, BlockSelection, SelectedBlock};
