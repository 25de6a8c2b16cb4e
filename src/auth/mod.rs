//! Session handling: the log-in, sign-up and log-out pages, the session
//! cookie, and the middleware that guards the pages that need a session.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod session;
mod sign_up;

pub use cookie::DEFAULT_COOKIE_DURATION;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{SessionRejected, auth_guard, auth_guard_hx};
pub use redirect::normalize_redirect_url;
pub use session::{Session, UserId};
pub use sign_up::{get_sign_up_page, post_sign_up};

#[cfg(test)]
pub(crate) use cookie::{COOKIE_SESSION, set_session_cookie};

#[cfg(test)]
pub use middleware::AuthState;
