//! Role-gated route resolution. Pure functions of (auth state, path): no
//! I/O, no stored state beyond the static route table, so the guard is
//! trivially testable and can never observe a half-written session.

use once_cell::sync::Lazy;

use crate::api::Role;
use crate::auth::AuthState;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ADMIN_DASHBOARD_PATH: &str = "/dashboard";
pub const DOCTOR_DASHBOARD_PATH: &str = "/doctor/dashboard";
pub const RECEPTIONIST_APPOINTMENTS_PATH: &str = "/receptionist/appointments";
pub const PATIENT_DASHBOARD_PATH: &str = "/patient/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session check still pending: render a placeholder, never the target
    /// content and never a redirect (redirecting here would flash the login
    /// page on every reload).
    Loading,
    Allow,
    Redirect(&'static str),
}

struct RouteRule {
    path: &'static str,
    /// Empty slice marks a public route.
    allowed: &'static [Role],
}

const PUBLIC: &[Role] = &[];
const ADMIN: &[Role] = &[Role::Admin];
const DOCTOR: &[Role] = &[Role::Doctor];
const RECEPTIONIST: &[Role] = &[Role::Receptionist];
const PATIENT: &[Role] = &[Role::Patient];

static ROUTES: Lazy<Vec<RouteRule>> = Lazy::new(|| {
    vec![
        RouteRule { path: LANDING_PATH, allowed: PUBLIC },
        RouteRule { path: LOGIN_PATH, allowed: PUBLIC },
        RouteRule { path: REGISTER_PATH, allowed: PUBLIC },
        RouteRule { path: ADMIN_DASHBOARD_PATH, allowed: ADMIN },
        RouteRule { path: "/patients", allowed: ADMIN },
        RouteRule { path: "/appointments", allowed: ADMIN },
        RouteRule { path: "/doctors", allowed: ADMIN },
        RouteRule { path: "/medical-records", allowed: ADMIN },
        RouteRule { path: "/reports", allowed: ADMIN },
        RouteRule { path: "/settings", allowed: ADMIN },
        RouteRule { path: DOCTOR_DASHBOARD_PATH, allowed: DOCTOR },
        RouteRule { path: "/doctor/patients", allowed: DOCTOR },
        RouteRule { path: "/doctor/appointments", allowed: DOCTOR },
        RouteRule { path: "/doctor/settings", allowed: DOCTOR },
        RouteRule { path: RECEPTIONIST_APPOINTMENTS_PATH, allowed: RECEPTIONIST },
        RouteRule { path: "/receptionist/patients", allowed: RECEPTIONIST },
        RouteRule { path: PATIENT_DASHBOARD_PATH, allowed: PATIENT },
    ]
});

/// Post-login landing page per role, applied once by the login caller and
/// never re-applied on later loads. Unknown roles get the generic admin
/// dashboard.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Doctor => DOCTOR_DASHBOARD_PATH,
        Role::Receptionist => RECEPTIONIST_APPOINTMENTS_PATH,
        Role::Patient => PATIENT_DASHBOARD_PATH,
        Role::Admin | Role::Unknown => ADMIN_DASHBOARD_PATH,
    }
}

fn normalize(path: &str) -> &str {
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

/// Decide what to render for `path` under the current auth state.
/// Public routes always render. Protected routes render a placeholder while
/// the state is unresolved, bounce anonymous visitors to the login page and
/// check the signed-in user's role against the route's required set; a
/// mismatch (or an unknown path) redirects to the user's own landing page.
pub fn resolve(state: &AuthState, path: &str) -> RouteDecision {
    let path = normalize(path);
    let rule = ROUTES.iter().find(|r| r.path == path);
    if let Some(rule) = rule {
        if rule.allowed.is_empty() {
            return RouteDecision::Allow;
        }
    }
    match state {
        AuthState::Unknown => RouteDecision::Loading,
        AuthState::Anonymous => RouteDecision::Redirect(LOGIN_PATH),
        AuthState::Authenticated(user) => match rule {
            Some(rule) if rule.allowed.contains(&user.role) => RouteDecision::Allow,
            _ => RouteDecision::Redirect(landing_path(user.role)),
        },
    }
}
