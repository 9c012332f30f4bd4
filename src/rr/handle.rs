use std::{any::Any, fmt, sync::Arc};

/// Opaque reference to a provider's own representation of a record.
///
/// Provider adapters attach one when they read remote state, so that a diff
/// can point back at the exact object to update or delete. The model never
/// looks inside: it does not serialize, compare, or deep-copy the handle.
#[derive(Clone)]
pub struct ProviderHandle {
    provider: Arc<str>,
    native: Arc<dyn Any + Send + Sync>,
}

impl ProviderHandle {
    pub fn new<T>(provider: impl Into<Arc<str>>, native: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            provider: provider.into(),
            native: Arc::new(native),
        }
    }

    /// Name of the provider that created this handle.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Borrow the native record, if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.native.downcast_ref()
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
