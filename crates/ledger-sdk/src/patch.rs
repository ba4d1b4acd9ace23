//! Three-state field for update bodies.

/// `Unset` leaves the value on the ledger untouched, `Cleared` resets it, `Set`
/// replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Patch<T> {
    #[default]
    Unset,
    Cleared,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Cleared => Patch::Cleared,
            Self::Set(value) => Patch::Set(value),
        }
    }

    /// The value when `Set`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Wire form of the field: `None` when unset, `cleared` when cleared.
    pub(crate) fn encode<W>(
        &self,
        cleared: impl FnOnce() -> W,
        set: impl FnOnce(&T) -> W,
    ) -> Option<W> {
        match self {
            Self::Unset => None,
            Self::Cleared => Some(cleared()),
            Self::Set(value) => Some(set(value)),
        }
    }

    /// `Set(value)`, or `Cleared` when `value` is what a reset looks like on the wire.
    pub(crate) fn set_or_reset(value: T, is_reset: impl FnOnce(&T) -> bool) -> Self {
        Self::decode(Some(value), is_reset)
    }

    /// Inverse of [`Patch::encode`]: a present value equal to the reset encoding
    /// reads back as `Cleared`.
    pub(crate) fn decode(value: Option<T>, is_reset: impl FnOnce(&T) -> bool) -> Self {
        match value {
            None => Self::Unset,
            Some(value) if is_reset(&value) => Self::Cleared,
            Some(value) => Self::Set(value),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Unset,
        }
    }
}
