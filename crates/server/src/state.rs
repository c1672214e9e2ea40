use std::sync::Arc;

use service::contact::DynContactService;

/// Shared handler state; the contact service owns the only mutable store.
#[derive(Clone)]
pub struct ServerState {
    pub contacts: Arc<DynContactService>,
}

impl ServerState {
    pub fn new(contacts: Arc<DynContactService>) -> Self {
        Self { contacts }
    }
}
