// ============================================================================
// AUTH STATE - Sesión de Supabase, perfil propio y lista de usuarios
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{AuthSession, Cargo, Profile};
use crate::services::SupabaseClient;

/// Pantalla visible cuando no hay sesión
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AuthScreen {
    #[default]
    Login,
    Register,
}

#[derive(Clone, Default)]
pub struct AuthState {
    pub session: Rc<RefCell<Option<AuthSession>>>,
    pub profile: Rc<RefCell<Option<Profile>>>,
    pub users: Rc<RefCell<Vec<Profile>>>,
    pub screen: Rc<RefCell<AuthScreen>>,
    pub error: Rc<RefCell<Option<String>>>,
    pub busy: Rc<RefCell<bool>>,
    /// Restaurando la sesión guardada al arrancar
    pub restoring: Rc<RefCell<bool>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            restoring: Rc::new(RefCell::new(true)),
            ..Self::default()
        }
    }

    pub fn set_session(&self, session: Option<AuthSession>) {
        *self.session.borrow_mut() = session;
    }

    pub fn get_session(&self) -> Option<AuthSession> {
        self.session.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn user_id(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.user.id.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.access_token.clone())
    }

    /// Cliente REST con el token de la sesión actual
    pub fn client(&self) -> SupabaseClient {
        SupabaseClient::new().with_token(self.access_token())
    }

    pub fn set_profile(&self, profile: Option<Profile>) {
        *self.profile.borrow_mut() = profile;
    }

    pub fn get_profile(&self) -> Option<Profile> {
        self.profile.borrow().clone()
    }

    /// Id del perfil que actúa (cae al id del usuario de auth)
    pub fn acting_id(&self) -> Option<String> {
        self.profile
            .borrow()
            .as_ref()
            .map(|p| p.id.clone())
            .or_else(|| self.user_id())
    }

    pub fn cargo(&self) -> Option<Cargo> {
        self.profile.borrow().as_ref().and_then(|p| p.cargo)
    }

    pub fn set_users(&self, users: Vec<Profile>) {
        *self.users.borrow_mut() = users;
    }

    pub fn get_users(&self) -> Vec<Profile> {
        self.users.borrow().clone()
    }

    /// Usuarios que pueden recibir demandas (sin SOLICITANTE)
    pub fn assignable_users(&self) -> Vec<Profile> {
        self.users
            .borrow()
            .iter()
            .filter(|u| !u.is_requester_only())
            .cloned()
            .collect()
    }

    pub fn find_user(&self, id: &str) -> Option<Profile> {
        self.users.borrow().iter().find(|u| u.id == id).cloned()
    }

    pub fn set_screen(&self, screen: AuthScreen) {
        *self.screen.borrow_mut() = screen;
        self.set_error(None);
    }

    pub fn get_screen(&self) -> AuthScreen {
        *self.screen.borrow()
    }

    pub fn set_error(&self, message: Option<String>) {
        *self.error.borrow_mut() = message;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn set_busy(&self, busy: bool) {
        *self.busy.borrow_mut() = busy;
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn set_restoring(&self, restoring: bool) {
        *self.restoring.borrow_mut() = restoring;
    }

    pub fn is_restoring(&self) -> bool {
        *self.restoring.borrow()
    }

    /// Logout - limpiar todo
    pub fn logout(&self) {
        self.set_session(None);
        self.set_profile(None);
        self.set_users(Vec::new());
        self.set_busy(false);
        self.set_screen(AuthScreen::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;
    use crate::viewmodels::aggregation::fixtures::profile;

    #[test]
    fn test_acting_id_prefers_profile() {
        let auth = AuthState::new();
        assert!(auth.acting_id().is_none());
        auth.set_session(Some(AuthSession {
            access_token: "jwt".into(),
            refresh_token: "r".into(),
            expires_at: 0,
            user: AuthUser { id: "auth-id".into(), email: None },
        }));
        assert_eq!(auth.acting_id().as_deref(), Some("auth-id"));
        auth.set_profile(Some(profile("profile-id", "Ana", Cargo::Gerente)));
        assert_eq!(auth.acting_id().as_deref(), Some("profile-id"));
        assert_eq!(auth.cargo(), Some(Cargo::Gerente));
    }

    #[test]
    fn test_assignable_users_skip_requesters() {
        let auth = AuthState::new();
        auth.set_users(vec![
            profile("a", "Ana", Cargo::Colaborador),
            profile("s", "Sol", Cargo::Solicitante),
        ]);
        let ids: Vec<_> = auth.assignable_users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["a"]);
        assert!(auth.find_user("s").is_some());
        auth.logout();
        assert!(auth.get_users().is_empty());
        assert!(!auth.is_logged_in());
    }
}
