pub mod action;
pub mod conversation;
pub mod event;
pub mod exchange;
pub mod message;
pub mod notice;
pub mod tab;
pub mod user;

pub use action::*;
pub use conversation::ConversationSummary;
pub use event::{ArcEventTx, BackendEvent, Event, EventTx};
pub use exchange::{ChatReply, ExchangeMetadata, Source};
pub use message::{Message, Role};
pub use notice::*;
pub use tab::Tab;
pub use user::{AuthContext, User, UserRole};
