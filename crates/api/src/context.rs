use tonecart_auth::Role;
use tonecart_core::UserId;

/// Authenticated request context (identity + roles), derived from the
/// bearer token by the auth middleware and present on all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    user_id: UserId,
    roles: Vec<Role>,
}

impl RequestContext {
    pub fn new(user_id: UserId, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(Role::is_admin)
    }

    /// Owner-or-admin check used by the order read routes.
    pub fn may_act_for(&self, user_id: UserId) -> bool {
        self.user_id == user_id || self.is_admin()
    }
}
