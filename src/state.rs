use std::sync::Arc;

use crate::auth::password::warm_up_dummy_hash;
use crate::auth::{CredentialVerifier, TokenGate, TokenService};
use crate::store::UserStore;

/// The wired authentication core, shared by every worker.
///
/// Both components get the same store and token service; nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialVerifier>,
    pub gate: Arc<TokenGate>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        warm_up_dummy_hash();
        let tokens = Arc::new(tokens);
        Self {
            credentials: Arc::new(CredentialVerifier::new(users.clone(), tokens.clone())),
            gate: Arc::new(TokenGate::new(tokens, users)),
        }
    }
}
