use super::PageBody;

/// Landing page. Static; never talks to the backend.
#[derive(Debug, Default)]
pub struct HomeView;

impl HomeView {
    pub fn render(&self, signed_in: bool) -> PageBody {
        PageBody::Home {
            headline: "Find your next role",
            blurb: "Browse open positions, or post one if you are hiring.",
            call_to_action: (!signed_in).then_some("Sign In / Sign Up"),
        }
    }
}
