//! Sign-in redirect on session rejection.

use parking_lot::RwLock;
use tracing::warn;

use crate::port::outbound::navigation::AuthRejectedHandler;

/// Route of the sign-in view.
pub const SIGN_IN_ROUTE: &str = "/auth";

type RedirectHook = Box<dyn Fn(&str) + Send + Sync>;

/// Tracks the current route and moves to the sign-in view when the server
/// rejects the session, unless the user is already there.
pub struct SignInRedirect {
    current: RwLock<String>,
    on_redirect: Option<RedirectHook>,
}

impl SignInRedirect {
    pub fn new(current_route: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(current_route.into()),
            on_redirect: None,
        }
    }

    /// Run `hook` with the rejected endpoint each time a redirect happens.
    #[must_use]
    pub fn on_redirect(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_redirect = Some(Box::new(hook));
        self
    }

    pub fn set_current(&self, route: impl Into<String>) {
        *self.current.write() = route.into();
    }

    #[must_use]
    pub fn current(&self) -> String {
        self.current.read().clone()
    }
}

impl Default for SignInRedirect {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AuthRejectedHandler for SignInRedirect {
    fn on_auth_rejected(&self, endpoint: &str) {
        {
            let mut current = self.current.write();
            if *current == SIGN_IN_ROUTE {
                return;
            }
            *current = SIGN_IN_ROUTE.to_string();
        }
        warn!(endpoint = %endpoint, "Session rejected, redirecting to sign-in");
        if let Some(hook) = &self.on_redirect {
            hook(endpoint);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn redirects_once_then_stays() {
        let count = Arc::new(AtomicUsize::new(0));
        let hook_count = count.clone();
        let redirect = SignInRedirect::new("/dashboard").on_redirect(move |_| {
            hook_count.fetch_add(1, Ordering::SeqCst);
        });

        redirect.on_auth_rejected("/signals");
        assert_eq!(redirect.current(), SIGN_IN_ROUTE);
        redirect.on_auth_rejected("/settings");

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_redirect_when_already_on_sign_in() {
        let count = Arc::new(AtomicUsize::new(0));
        let hook_count = count.clone();
        let redirect = SignInRedirect::new(SIGN_IN_ROUTE).on_redirect(move |_| {
            hook_count.fetch_add(1, Ordering::SeqCst);
        });

        redirect.on_auth_rejected("/auth/me");
        assert_eq!(count.load(Ordering::SeqCst), 0);

        redirect.set_current("/portfolio");
        redirect.on_auth_rejected("/portfolio/trades");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
