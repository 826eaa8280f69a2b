//! Login gate. There is no credential check: any submission logs in, and the
//! flag lives only as long as the process.

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    pub fn login(&mut self, email: &str, _password: &str) {
        let email = email.trim();
        let user = if email.is_empty() { "demo" } else { email };
        tracing::info!(user, "logged in");
        self.user = Some(user.to_string());
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user, "logged out");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}
