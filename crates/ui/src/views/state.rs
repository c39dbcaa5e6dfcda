use dioxus::prelude::*;

use assess_core::model::UserSession;
use services::CatalogError;

use crate::context::AppContext;

/// A fetch the view could not complete, with the service error for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unavailable(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Unavailable(message) => message,
        }
    }
}

impl From<CatalogError> for ViewError {
    fn from(error: CatalogError) -> Self {
        ViewError::Unavailable(error.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unavailable(
                "The data did not load. Please try again.".into(),
            )),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// The signed-in session as a live signal.
///
/// Seeds from the session store and then follows its watch channel, so a
/// sign-in, sign-out, or completion-flag change re-renders the view.
#[must_use]
pub fn use_session() -> Signal<Option<UserSession>> {
    let ctx = use_context::<AppContext>();
    let store = ctx.sessions();
    let mut session = use_signal(|| store.current());
    use_future(move || {
        let store = store.clone();
        async move {
            let mut receiver = store.subscribe();
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                session.set(next);
            }
        }
    });
    session
}
