use std::fmt;

use crate::models::session::Role;
use crate::notification::{Notification, Severity};
use crate::router::Route;
use crate::views::auth_modal::ModalView;
use crate::views::PageBody;

/// Sign-in button or logout affordance, depending on session state.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAffordance {
    SignIn,
    Logout { email: String, role: Role },
}

/// Everything the front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub route: Route,
    pub nav: Vec<Route>,
    pub auth: AuthAffordance,
    pub body: PageBody,
    pub modal: Option<ModalView>,
    pub notification: Option<Notification>,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links: Vec<String> = self
            .nav
            .iter()
            .map(|r| {
                if *r == self.route {
                    format!("[{}]", r.label())
                } else {
                    format!("{} ({})", r.label(), r.fragment())
                }
            })
            .collect();
        let auth = match &self.auth {
            AuthAffordance::SignIn => "Sign In / Sign Up".to_string(),
            AuthAffordance::Logout { email, role } => format!("{email} ({role}) | Logout"),
        };
        writeln!(f, "== JobBoard ==  {}  ||  {}", links.join("  "), auth)?;

        if let Some(n) = &self.notification {
            let tag = match n.severity {
                Severity::Success => "OK",
                Severity::Error => "ERROR",
            };
            writeln!(f, "<{tag}> {}", n.text)?;
        }

        write!(f, "{}", self.body)?;

        if let Some(modal) = &self.modal {
            writeln!(f, "-- {} --", modal.title)?;
            writeln!(f, "  fields: {}", modal.fields.join(", "))?;
            if let Some(role) = modal.role {
                writeln!(f, "  role: {role}  (type `role user|recruiter`)")?;
            }
            writeln!(f, "  [{}]  {}  (type `toggle`, `close`)", modal.submit_label, modal.switch_prompt)?;
        }
        Ok(())
    }
}
