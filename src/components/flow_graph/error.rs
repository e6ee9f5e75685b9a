use thiserror::Error;

use super::types::NodeId;

/// Problems found in the edge list while building the graph. None of these
/// abort a build; the offending edge is dropped and reported.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FlowError {
	/// `total_amount` did not start with a finite number.
	#[error("malformed amount `{raw}`")]
	MalformedAmount {
		/// The amount text as received.
		raw: String,
	},
	/// A repeated pair arrived in a different currency than its first transfer.
	#[error("edge {from} -> {to} mixes currencies: expected {expected}, found {found}")]
	CurrencyMismatch {
		/// Sending node.
		from: NodeId,
		/// Receiving node.
		to: NodeId,
		/// Currency of the first transfer.
		expected: String,
		/// Currency of the rejected transfer.
		found: String,
	},
	/// An edge names a node that has no place in the layout.
	#[error("edge {from} -> {to} references a node that is not in the graph")]
	MissingEndpoint {
		/// Sending node.
		from: NodeId,
		/// Receiving node.
		to: NodeId,
	},
}

/// Why text could not be put on the clipboard.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
	/// Neither the clipboard API nor the fallback exists here.
	#[error("no clipboard mechanism is available")]
	Unavailable,
	/// The clipboard API refused the write.
	#[error("clipboard write rejected: {0}")]
	Rejected(String),
	/// The textarea fallback failed.
	#[error("clipboard fallback failed: {0}")]
	Dom(String),
}
