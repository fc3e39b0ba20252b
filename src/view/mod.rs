/* src/view/mod.rs */

//!
//! Consumer-side view model.
//!
//! A UI depends only on the observable [`ViewState`], the closed [`Command`]
//! set, and the one-shot [`UiEvent`] channel. It never touches the store or
//! the remote source directly.

use futures_util::StreamExt;
use tokio::sync::{mpsc, watch};

use crate::refresh::{Coordinator, RefreshResult};
use crate::remote::RemoteSource;
use crate::store::LocalStore;

/// Everything a screen needs to render the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<T> {
	pub items: Vec<T>,
	pub is_loading: bool,
	pub error: Option<String>,
}

impl<T> Default for ViewState<T> {
	fn default() -> Self {
		Self {
			items: Vec::new(),
			is_loading: false,
			error: None,
		}
	}
}

impl<T> ViewState<T> {
	/// Folds one cycle emission into the state.
	///
	/// An `Error` keeps the last good `items` and also clears `is_loading`,
	/// since a cycle may end on `Error` without a trailing `Loading(false)`.
	pub fn apply(&mut self, result: RefreshResult<T>) {
		match result {
			RefreshResult::Loading(active) => self.is_loading = active,
			RefreshResult::Success(items) => {
				self.items = items;
				self.error = None;
			}
			RefreshResult::Error(message) => {
				self.error = Some(message);
				self.is_loading = false;
			}
		}
	}
}

/// Commands a UI may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	/// Screen opened: prefer the cache.
	Load,
	/// Pull-to-refresh: always revalidate.
	Refresh,
	DismissError,
}

/// One-shot events. Each is delivered to the receiver exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
	ShowSnackBar {
		message: String,
		action_label: Option<String>,
	},
}

/// Receiving half of the one-shot event channel.
#[derive(Debug)]
pub struct UiEvents {
	rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl UiEvents {
	/// Waits for the next event. `None` once the view model is dropped and
	/// every pending event was taken.
	pub async fn recv(&mut self) -> Option<UiEvent> {
		self.rx.recv().await
	}

	/// Takes the next pending event without waiting.
	pub fn try_recv(&mut self) -> Option<UiEvent> {
		self.rx.try_recv().ok()
	}
}

/// Drives refresh cycles and publishes their effect on [`ViewState`].
pub struct ViewModel<T, S: ?Sized, R: ?Sized> {
	coordinator: Coordinator<T, S, R>,
	state: watch::Sender<ViewState<T>>,
	events: mpsc::UnboundedSender<UiEvent>,
}

impl<T, S, R> ViewModel<T, S, R>
where
	T: Send + Sync + 'static,
	S: LocalStore<T> + ?Sized + 'static,
	R: RemoteSource<T> + ?Sized + 'static,
{
	pub fn new(coordinator: Coordinator<T, S, R>) -> (Self, UiEvents) {
		let (state, _) = watch::channel(ViewState::default());
		let (events, rx) = mpsc::unbounded_channel();
		let model = Self {
			coordinator,
			state,
			events,
		};
		(model, UiEvents { rx })
	}

	/// Observes the state. Receivers see every published transition's latest
	/// value.
	pub fn state(&self) -> watch::Receiver<ViewState<T>> {
		self.state.subscribe()
	}

	/// Handles one command, running a full cycle when it asks for data.
	pub async fn dispatch(&self, command: Command) {
		match command {
			Command::Load => self.run(false).await,
			Command::Refresh => self.run(true).await,
			Command::DismissError => self.state.send_modify(|state| state.error = None),
		}
	}

	async fn run(&self, force_remote: bool) {
		let mut cycle = self.coordinator.refresh(force_remote);
		while let Some(result) = cycle.next().await {
			if let RefreshResult::Error(message) = &result {
				// A closed receiver only means nobody is listening anymore.
				let _ = self.events.send(UiEvent::ShowSnackBar {
					message: message.clone(),
					action_label: None,
				});
			}
			self.state.send_modify(|state| state.apply(result));
		}
	}
}
