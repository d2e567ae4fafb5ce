//! Line-oriented front end: reads commands from stdin, feeds them to the
//! shell, runs the resulting requests in the background and redraws.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::api_client::JobBoardApi;
use crate::models::job::NewJob;
use crate::models::session::Role;
use crate::shell::command::{Command, Completion};
use crate::shell::Shell;
use crate::views::auth_modal::AuthForm;

pub const HELP: &str = "\
Commands:
  go <fragment>          navigate (#home, #jobs, #post-job, #profile)
  login                  open the sign-in dialog
  toggle                 switch between sign-in and sign-up
  role <user|recruiter>  choose the sign-up role
  close                  close the dialog
  signin <email> <password>
  signup <name> | <email> | <password> [| <role>]
  post <title> | <company> | <location> | <description>
  logout
  show                   redraw
  help
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Go(String),
    Login,
    Toggle,
    Role(Role),
    Close,
    SignIn { email: String, password: String },
    SignUp { form: AuthForm, role: Option<Role> },
    Post(NewJob),
    Logout,
    Show,
    Help,
    Quit,
}

/// Parses one line. Errors are usage messages for the user.
pub fn parse(line: &str) -> Result<Input, String> {
    let line = line.trim();
    if line.starts_with('#') {
        return Ok(Input::Go(line.to_string()));
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(v, r)| (v, r.trim()))
        .unwrap_or((line, ""));

    match verb.to_ascii_lowercase().as_str() {
        "go" => Ok(Input::Go(rest.to_string())),
        "login" => Ok(Input::Login),
        "toggle" => Ok(Input::Toggle),
        "role" => Role::parse(rest)
            .map(Input::Role)
            .ok_or_else(|| "usage: role <user|recruiter>".to_string()),
        "close" => Ok(Input::Close),
        "signin" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [email, password] => Ok(Input::SignIn {
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err("usage: signin <email> <password>".to_string()),
        },
        "signup" => {
            let fields = split_fields(rest);
            match fields.as_slice() {
                [name, email, password] => Ok(Input::SignUp {
                    form: auth_form(name, email, password),
                    role: None,
                }),
                [name, email, password, role] => {
                    let role = Role::parse(role)
                        .ok_or_else(|| format!("unknown role '{role}'"))?;
                    Ok(Input::SignUp {
                        form: auth_form(name, email, password),
                        role: Some(role),
                    })
                }
                _ => Err("usage: signup <name> | <email> | <password> [| <role>]".to_string()),
            }
        }
        "post" => match split_fields(rest).as_slice() {
            [title, company, location, description] => Ok(Input::Post(NewJob {
                title: title.to_string(),
                company: company.to_string(),
                location: location.to_string(),
                description: description.to_string(),
            })),
            _ => Err("usage: post <title> | <company> | <location> | <description>".to_string()),
        },
        "logout" => Ok(Input::Logout),
        "" | "show" => Ok(Input::Show),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("unknown command '{other}' (type `help`)")),
    }
}

fn split_fields(rest: &str) -> Vec<&str> {
    if rest.is_empty() {
        return Vec::new();
    }
    rest.split('|').map(str::trim).collect()
}

fn auth_form(name: &str, email: &str, password: &str) -> AuthForm {
    AuthForm {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Applies a parsed input to the shell, returning any request to run.
pub fn handle(shell: &mut Shell, input: Input) -> Option<Command> {
    match input {
        Input::Go(fragment) => shell.navigate(&fragment),
        Input::Login => {
            shell.open_auth_modal();
            None
        }
        Input::Toggle => {
            shell.toggle_auth_mode();
            None
        }
        Input::Role(role) => {
            shell.set_signup_role(role);
            None
        }
        Input::Close => {
            shell.close_auth_modal();
            None
        }
        Input::SignIn { email, password } => {
            shell.open_auth_modal();
            shell.set_auth_mode(false);
            shell.submit_auth(AuthForm {
                name: String::new(),
                email,
                password,
            })
        }
        Input::SignUp { form, role } => {
            shell.open_auth_modal();
            shell.set_auth_mode(true);
            if let Some(role) = role {
                shell.set_signup_role(role);
            }
            shell.submit_auth(form)
        }
        Input::Post(job) => shell.submit_post_job(job),
        Input::Logout => shell.logout(),
        Input::Show | Input::Help | Input::Quit => None,
    }
}

fn spawn_request(api: &Arc<dyn JobBoardApi>, tx: &mpsc::UnboundedSender<Completion>, cmd: Command) {
    let api = Arc::clone(api);
    let tx = tx.clone();
    tokio::spawn(async move {
        let completion = cmd.execute(api.as_ref()).await;
        if tx.send(completion).is_err() {
            debug!("Completion dropped: event loop has exited");
        }
    });
}

fn draw(shell: &Shell) {
    println!("\n{}", shell.render());
}

/// Runs the event loop until stdin closes or the user quits.
pub async fn run(mut shell: Shell, api: Arc<dyn JobBoardApi>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(cmd) = shell.start() {
        spawn_request(&api, &tx, cmd);
    }
    draw(&shell);

    loop {
        let deadline = shell.notification_deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse(&line) {
                    Ok(Input::Quit) => break,
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(input) => {
                        if let Some(cmd) = handle(&mut shell, input) {
                            spawn_request(&api, &tx, cmd);
                        }
                        draw(&shell);
                    }
                    Err(usage) => println!("{usage}"),
                }
            }
            Some(completion) = rx.recv() => {
                if let Some(cmd) = shell.apply(completion) {
                    spawn_request(&api, &tx, cmd);
                }
                draw(&shell);
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if shell.expire_notification() {
                    draw(&shell);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Route;
    use crate::session::storage::MemoryStorage;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse("go #jobs"), Ok(Input::Go("#jobs".into())));
        assert_eq!(parse("#profile"), Ok(Input::Go("#profile".into())));
        assert_eq!(parse("  "), Ok(Input::Show));
    }

    #[test]
    fn test_parse_signin() {
        assert_eq!(
            parse("signin a@b.io hunter2"),
            Ok(Input::SignIn {
                email: "a@b.io".into(),
                password: "hunter2".into()
            })
        );
        assert!(parse("signin a@b.io").is_err());
    }

    #[test]
    fn test_parse_signup_with_role() {
        let input = parse("signup Ada Lovelace | ada@x.io | pw | recruiter").unwrap();
        assert_eq!(
            input,
            Input::SignUp {
                form: auth_form("Ada Lovelace", "ada@x.io", "pw"),
                role: Some(Role::Recruiter)
            }
        );
        assert!(parse("signup Ada | ada@x.io | pw | admin").is_err());
    }

    #[test]
    fn test_parse_post_requires_four_fields() {
        let input = parse("post Rust Dev | Acme | Remote | Build the engine").unwrap();
        assert!(matches!(input, Input::Post(ref job) if job.description == "Build the engine"));
        assert!(parse("post Rust Dev | Acme").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse("dance").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn test_help_descriptions_are_aligned() {
        let columns: Vec<usize> = HELP
            .lines()
            .filter_map(|line| {
                let gap = line.trim_start().find("  ")? + (line.len() - line.trim_start().len());
                Some(gap + line[gap..].len() - line[gap..].trim_start().len())
            })
            .collect();
        assert_eq!(columns.len(), 6);
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "{columns:?}");
    }

    #[test]
    fn test_handle_signin_forces_sign_in_mode() {
        let mut shell = Shell::new(Box::new(MemoryStorage::new()), "");
        shell.toggle_auth_mode();
        let cmd = handle(
            &mut shell,
            Input::SignIn {
                email: "a@b.io".into(),
                password: "pw".into(),
            },
        );
        assert!(matches!(
            cmd,
            Some(Command::Authenticate(ref s)) if !s.is_sign_up()
        ));
    }

    #[test]
    fn test_handle_go_navigates() {
        let mut shell = Shell::new(Box::new(MemoryStorage::new()), "");
        let cmd = handle(&mut shell, Input::Go("#jobs".into()));
        assert!(matches!(cmd, Some(Command::FetchJobs { .. })));
        assert_eq!(shell.route(), Route::Jobs);
    }
}
