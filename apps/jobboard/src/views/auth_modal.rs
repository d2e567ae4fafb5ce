//! Sign-in / sign-up dialog state.

use crate::errors::ClientError;
use crate::models::session::Role;

/// Raw field values typed into the dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A validated submission, shaped by the dialog's mode.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthSubmission {
    SignIn {
        email: String,
        password: String,
    },
    SignUp {
        name: String,
        email: String,
        password: String,
        role: Role,
    },
}

impl AuthSubmission {
    pub fn email(&self) -> &str {
        match self {
            AuthSubmission::SignIn { email, .. } | AuthSubmission::SignUp { email, .. } => email,
        }
    }

    pub fn is_sign_up(&self) -> bool {
        matches!(self, AuthSubmission::SignUp { .. })
    }
}

/// What the dialog currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalView {
    pub title: &'static str,
    pub fields: Vec<&'static str>,
    pub role: Option<Role>,
    pub submit_label: &'static str,
    pub switch_prompt: &'static str,
}

#[derive(Debug, Default)]
pub struct AuthModal {
    open: bool,
    signing_up: bool,
    role: Role,
}

impl AuthModal {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Dismisses the dialog. Session state is untouched.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.signing_up = !self.signing_up;
    }

    pub fn set_signing_up(&mut self, signing_up: bool) {
        self.signing_up = signing_up;
    }

    pub fn is_signing_up(&self) -> bool {
        self.signing_up
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    #[cfg(test)]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Builds the submission for the current mode. Role and name are only
    /// carried when signing up.
    pub fn submission(&self, form: AuthForm) -> Result<AuthSubmission, ClientError> {
        let AuthForm {
            name,
            email,
            password,
        } = form;
        let email = email.trim().to_string();

        let mut missing = Vec::new();
        if self.signing_up && name.trim().is_empty() {
            missing.push("full name");
        }
        if email.is_empty() {
            missing.push("email");
        }
        if password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(ClientError::Validation(format!(
                "Please fill in: {}",
                missing.join(", ")
            )));
        }
        if !email.contains('@') {
            return Err(ClientError::Validation(
                "Please enter a valid email address.".to_string(),
            ));
        }

        Ok(if self.signing_up {
            AuthSubmission::SignUp {
                name: name.trim().to_string(),
                email,
                password,
                role: self.role,
            }
        } else {
            AuthSubmission::SignIn { email, password }
        })
    }

    pub fn render(&self) -> Option<ModalView> {
        if !self.is_open() {
            return None;
        }
        Some(if self.is_signing_up() {
            ModalView {
                title: "Join Now",
                fields: vec!["Full Name", "Email Address", "Password"],
                role: Some(self.role),
                submit_label: "Sign Up",
                switch_prompt: "Already have an account? Sign In",
            }
        } else {
            ModalView {
                title: "Welcome Back",
                fields: vec!["Email Address", "Password"],
                role: None,
                submit_label: "Sign In",
                switch_prompt: "Don't have an account? Sign Up",
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, password: &str) -> AuthForm {
        AuthForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_defaults_to_sign_in_with_user_role() {
        let modal = AuthModal::default();
        assert!(!modal.is_open());
        assert!(!modal.is_signing_up());
        assert_eq!(modal.role(), Role::User);
    }

    #[test]
    fn test_sign_in_drops_name_and_role() {
        let mut modal = AuthModal::default();
        modal.set_role(Role::Recruiter);
        let sub = modal.submission(form("Ignored", " a@b.io ", "pw")).unwrap();
        assert_eq!(
            sub,
            AuthSubmission::SignIn {
                email: "a@b.io".into(),
                password: "pw".into()
            }
        );
    }

    #[test]
    fn test_sign_up_carries_selected_role() {
        let mut modal = AuthModal::default();
        modal.toggle();
        modal.set_role(Role::Recruiter);
        let sub = modal.submission(form("Rae", "r@x.io", "pw")).unwrap();
        assert!(sub.is_sign_up());
        assert!(matches!(sub, AuthSubmission::SignUp { role: Role::Recruiter, .. }));
    }

    #[test]
    fn test_sign_up_requires_name() {
        let mut modal = AuthModal::default();
        modal.set_signing_up(true);
        let err = modal.submission(form("", "r@x.io", "pw")).unwrap_err();
        assert_eq!(err.user_message(""), "Please fill in: full name");
    }

    #[test]
    fn test_rejects_malformed_email() {
        let modal = AuthModal::default();
        assert!(modal.submission(form("", "not-an-email", "pw")).is_err());
    }

    #[test]
    fn test_render_follows_mode() {
        let mut modal = AuthModal::default();
        assert!(modal.render().is_none());

        modal.open();
        assert_eq!(modal.render().unwrap().title, "Welcome Back");

        modal.toggle();
        let view = modal.render().unwrap();
        assert_eq!(view.title, "Join Now");
        assert_eq!(view.role, Some(Role::User));

        modal.close();
        assert!(modal.render().is_none());
    }
}
