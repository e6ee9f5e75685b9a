//! Fund-flow diagram: graph building, tiered layout and pointer interaction.

mod builder;
mod clipboard;
mod component;
mod error;
mod interaction;
mod layout;
mod render;
mod types;

pub use builder::{GraphBuilder, build, format_label, parse_amount, pending_edge};
pub use clipboard::{
	CopyMethod, FallbackClipboard, NavigatorClipboard, PrimaryClipboard, TextareaFallback,
	copy_text, copy_with_fallback,
};
pub use component::{FundFlowGraph, SETTLE_DELAY};
pub use error::{ClipboardError, FlowError};
pub use interaction::{
	ClickEffect, InteractionState, NOTIFICATION_DURATION, Notification, NotificationKind, Notifier,
	Visual,
};
pub use layout::{EdgePath, FlowLayout, LayoutConfig, LayoutEngine};
pub use types::{
	Anchors, BuildWarning, Edge, EdgeKey, FlowGraph, GraphEdge, Node, NodeId, PENDING_TRANSACTION_HASH,
	Party, Position, Transaction,
};
