use crate::data::FetchError;

/// What a refresh loop currently holds.
///
/// Exactly one variant is observable at any instant. A new result replaces the
/// whole value; nothing is patched in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RefreshState<T> {
    /// No result yet
    #[default]
    Pending,
    Ready(T),
    Failed(FetchError),
}

impl<T> RefreshState<T> {
    /// The swap: success replaces the payload, failure replaces it with the error.
    pub fn apply(&mut self, result: Result<T, FetchError>) {
        *self = match result {
            Ok(data) => RefreshState::Ready(data),
            Err(e) => RefreshState::Failed(e),
        };
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RefreshState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            RefreshState::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RefreshState::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RefreshState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RefreshState::Failed(_))
    }

    pub fn view(&self, is_fetching: bool) -> QueryView<'_, T> {
        QueryView {
            data: self.data(),
            is_loading: self.is_pending(),
            is_fetching,
            is_error: self.is_failed(),
            error: self.error(),
        }
    }
}

/// Read-only snapshot handed to the rendering layer each frame.
#[derive(Debug)]
pub struct QueryView<'a, T> {
    pub data: Option<&'a T>,
    /// Nothing has arrived yet
    pub is_loading: bool,
    /// A request is in flight (including background refreshes)
    pub is_fetching: bool,
    pub is_error: bool,
    pub error: Option<&'a FetchError>,
}

impl<T> QueryView<'_, T> {
    /// View of a loop that has not been asked for anything yet.
    pub fn pending(is_fetching: bool) -> Self {
        Self {
            data: None,
            is_loading: true,
            is_fetching,
            is_error: false,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_pending() {
        let state: RefreshState<u32> = RefreshState::default();
        let view = state.view(false);
        assert!(view.is_loading);
        assert!(!view.is_error);
        assert!(view.data.is_none());
    }

    #[test]
    fn failure_replaces_previous_data() {
        let mut state = RefreshState::Pending;
        state.apply(Ok(vec![1, 2, 3]));
        assert_eq!(state.data(), Some(&vec![1, 2, 3]));

        state.apply(Err(FetchError::Http { status: 500 }));
        let view = state.view(false);
        assert!(view.data.is_none());
        assert!(view.is_error);
        assert_eq!(view.error, Some(&FetchError::Http { status: 500 }));
    }

    #[test]
    fn success_after_failure_is_ready_again() {
        let mut state = RefreshState::Failed(FetchError::Network("down".into()));
        state.apply(Ok("fresh"));
        assert!(state.is_ready());
        assert!(state.error().is_none());
    }
}
