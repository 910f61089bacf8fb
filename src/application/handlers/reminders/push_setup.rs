//! Push delivery availability.

use std::sync::Arc;

use crate::domain::reminder::ReminderError;
use crate::ports::PushTransport;

/// Push transport, or the settings that keep it from being built.
#[derive(Clone)]
pub enum PushSetup {
    Ready(Arc<dyn PushTransport>),
    Missing(Vec<String>),
}

impl PushSetup {
    pub fn ready(transport: Arc<dyn PushTransport>) -> Self {
        PushSetup::Ready(transport)
    }

    pub fn missing<I, S>(settings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PushSetup::Missing(settings.into_iter().map(Into::into).collect())
    }

    /// The transport, or `NotConfigured` naming what is missing.
    pub fn transport(&self) -> Result<&Arc<dyn PushTransport>, ReminderError> {
        match self {
            PushSetup::Ready(transport) => Ok(transport),
            PushSetup::Missing(missing) => Err(ReminderError::not_configured(missing.clone())),
        }
    }
}

impl std::fmt::Debug for PushSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushSetup::Ready(_) => write!(f, "PushSetup::Ready"),
            PushSetup::Missing(missing) => write!(f, "PushSetup::Missing({:?})", missing),
        }
    }
}
