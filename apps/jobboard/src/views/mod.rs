//! Page views. Each owns its own request lifecycle and renders to a `PageBody`.

pub mod auth_modal;
pub mod home;
pub mod jobs;
pub mod post_job;
pub mod profile;

use std::fmt;

use crate::errors::PERMISSION_DENIED;
use crate::models::job::{Job, NewJob};

pub const SUMMARY_CHARS: usize = 100;
pub const PROFILE_PLACEHOLDER: &str = "Loading...";

/// One listing as shown in the jobs grid.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub summary: String,
}

impl From<&Job> for JobCard {
    fn from(job: &Job) -> Self {
        let summary: String = job.description.chars().take(SUMMARY_CHARS).collect();
        Self {
            id: job.id.to_string(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            summary: format!("{summary}..."),
        }
    }
}

/// Content area of the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Home {
        headline: &'static str,
        blurb: &'static str,
        call_to_action: Option<&'static str>,
    },
    Loading(&'static str),
    Jobs(Vec<JobCard>),
    NoJobs,
    PostJobForm {
        draft: NewJob,
        submitting: bool,
    },
    Profile {
        email: Option<String>,
        name: Option<String>,
    },
    PermissionDenied,
}

impl fmt::Display for PageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageBody::Home {
                headline,
                blurb,
                call_to_action,
            } => {
                writeln!(f, "{headline}")?;
                writeln!(f, "{blurb}")?;
                if let Some(cta) = call_to_action {
                    writeln!(f, "[ {cta} ]  (type `login`)")?;
                }
                Ok(())
            }
            PageBody::Loading(text) => writeln!(f, "{text}"),
            PageBody::Jobs(cards) => {
                for card in cards {
                    writeln!(f, "* {} (#{})", card.title, card.id)?;
                    writeln!(f, "  {} | {}", card.company, card.location)?;
                    writeln!(f, "  {}", card.summary)?;
                }
                Ok(())
            }
            PageBody::NoJobs => writeln!(f, "No jobs available."),
            PageBody::PostJobForm { draft, submitting } => {
                writeln!(f, "Post a new job")?;
                for (label, value) in [
                    ("Title", &draft.title),
                    ("Company", &draft.company),
                    ("Location", &draft.location),
                    ("Description", &draft.description),
                ] {
                    writeln!(f, "  {label}: {value}")?;
                }
                if *submitting {
                    writeln!(f, "Posting...")
                } else {
                    writeln!(f, "(type `post <title> | <company> | <location> | <description>`)")
                }
            }
            PageBody::Profile { email, name } => {
                writeln!(f, "Your profile")?;
                match email {
                    Some(email) => {
                        writeln!(f, "  Name:  {}", name.as_deref().unwrap_or(PROFILE_PLACEHOLDER))?;
                        writeln!(f, "  Email: {email}")
                    }
                    None => writeln!(f, "  No email on record."),
                }
            }
            PageBody::PermissionDenied => writeln!(f, "{PERMISSION_DENIED}"),
        }
    }
}
