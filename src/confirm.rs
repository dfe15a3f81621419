use crate::error::GateError;

/// A single pending yes/no request guarding a deferred action.
///
/// The host shows a prompt while `is_pending()` and later calls `resolve` with the user's
/// answer. Each request resolves at most once. Requesting while another request is pending
/// is refused, so the first request is never orphaned.
#[derive(Debug, Clone)]
pub struct ConfirmationGate<T> {
    pending: Option<T>,
}

impl<T> Default for ConfirmationGate<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ConfirmationGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn request(&mut self, action: T) -> Result<(), GateError> {
        if self.pending.is_some() {
            return Err(GateError::AlreadyPending);
        }
        self.pending = Some(action);
        Ok(())
    }

    /// Close the pending request. Yields the action only when `confirmed`.
    pub fn resolve(&mut self, confirmed: bool) -> Result<Option<T>, GateError> {
        let action = self.pending.take().ok_or(GateError::NothingPending)?;
        Ok(confirmed.then_some(action))
    }

    /// Drop the pending request without running it.
    pub fn abandon(&mut self) -> Option<T> {
        self.pending.take()
    }
}
