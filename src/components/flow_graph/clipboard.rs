//! Clipboard writes with a fallback for browsers lacking the async API.

use std::future::Future;

use js_sys::{Function, Promise, Reflect};
use log::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use super::error::ClipboardError;

/// Asynchronous system clipboard. Returns `None` when the API is missing.
pub trait PrimaryClipboard {
	/// Start writing `text`; the future resolves once the write settled.
	fn write_text(&self, text: &str) -> Option<impl Future<Output = Result<(), ClipboardError>>>;
}

/// Synchronous legacy copy used when the primary path is missing or fails.
pub trait FallbackClipboard {
	/// Copy `text` right away.
	fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Which path ended up writing the clipboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyMethod {
	/// The asynchronous clipboard API.
	Primary,
	/// The legacy fallback.
	Fallback,
}

/// Try `primary`, then `fallback` if it is missing or fails.
pub async fn copy_with_fallback<P, F>(
	primary: &P,
	fallback: &F,
	text: &str,
) -> Result<CopyMethod, ClipboardError>
where
	P: PrimaryClipboard,
	F: FallbackClipboard,
{
	match primary.write_text(text) {
		Some(write) => match write.await {
			Ok(()) => {
				info!("copied {} bytes to clipboard", text.len());
				return Ok(CopyMethod::Primary);
			}
			Err(err) => warn!("clipboard API failed, trying fallback: {err}"),
		},
		None => info!("clipboard API not available, using fallback"),
	}

	fallback
		.copy(text)
		.map(|()| CopyMethod::Fallback)
		.inspect_err(|err| warn!("clipboard fallback failed: {err}"))
}

/// Copy through `navigator.clipboard`, falling back to a hidden textarea.
pub async fn copy_text(text: String) -> Result<CopyMethod, ClipboardError> {
	copy_with_fallback(&NavigatorClipboard, &TextareaFallback, &text).await
}

fn describe(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `navigator.clipboard.writeText`, looked up at call time since insecure
/// contexts and older browsers do not expose it.
pub struct NavigatorClipboard;

impl PrimaryClipboard for NavigatorClipboard {
	fn write_text(&self, text: &str) -> Option<impl Future<Output = Result<(), ClipboardError>>> {
		let navigator = web_sys::window()?.navigator();
		let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
			.ok()
			.filter(|c| !c.is_undefined() && !c.is_null())?;
		let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
			.ok()?
			.dyn_into::<Function>()
			.ok()?;
		let pending = write.call1(&clipboard, &JsValue::from_str(text));

		Some(async move {
			let promise: Promise = pending
				.map_err(|e| ClipboardError::Rejected(describe(&e)))?
				.dyn_into()
				.map_err(|e| ClipboardError::Rejected(describe(&e)))?;
			JsFuture::from(promise)
				.await
				.map(|_| ())
				.map_err(|e| ClipboardError::Rejected(describe(&e)))
		})
	}
}

/// Off-screen textarea plus `document.execCommand("copy")`.
pub struct TextareaFallback;

impl FallbackClipboard for TextareaFallback {
	fn copy(&self, text: &str) -> Result<(), ClipboardError> {
		let dom = |e: JsValue| ClipboardError::Dom(describe(&e));
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or(ClipboardError::Unavailable)?;
		let body = document.body().ok_or(ClipboardError::Unavailable)?;

		let textarea: HtmlTextAreaElement = document
			.create_element("textarea")
			.map_err(dom)?
			.dyn_into()
			.map_err(|_| ClipboardError::Dom("created element is not a textarea".into()))?;
		textarea.set_value(text);
		let style = textarea.style();
		for (name, value) in [("position", "fixed"), ("left", "-999999px"), ("top", "-999999px")] {
			style.set_property(name, value).map_err(dom)?;
		}

		body.append_child(&textarea).map_err(dom)?;
		let _ = textarea.focus();
		textarea.select();
		let copied = document
			.dyn_ref::<HtmlDocument>()
			.ok_or(ClipboardError::Unavailable)
			.and_then(|html| html.exec_command("copy").map_err(dom));
		let _ = body.remove_child(&textarea);

		match copied? {
			true => Ok(()),
			false => Err(ClipboardError::Dom("copy command was refused".into())),
		}
	}
}
