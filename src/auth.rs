//! Authorization header resolution
//!
//! An endpoint's `Authorization` header wins when it resolves to something
//! usable; otherwise the header is synthesized from the vendor's `apiAccess`
//! credentials. Resolution happens before any network I/O, so a vendor with
//! no usable credentials fails the call without touching the wire.

use crate::config::{ApiAccess, AuthScheme};
use crate::error::{Error, Result};
use crate::template::{substitute, EnvVars};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Placeholder header value that explicitly requests synthesis
const AUTH_HEADER_PLACEHOLDER: &str = "${AUTH_HEADER}";

/// Resolve the `Authorization` header value for a request.
///
/// `configured` is the endpoint's raw header value, if any. It is used as-is
/// (after `${NAME}` substitution) unless it is absent, empty after
/// substitution, or literally `${AUTH_HEADER}` — in those cases the value is
/// synthesized from `access`:
///
/// - scheme `bearer` → `Bearer <token>` from the token env var, or `AuthError`
/// - user and token env vars both non-empty → `Basic base64(user:token)`
/// - token only → `Bearer <token>`
/// - anything else → `AuthError`
pub fn resolve_authorization(
    configured: Option<&str>,
    access: Option<&ApiAccess>,
    env: &EnvVars,
) -> Result<String> {
    if let Some(raw) = configured {
        if raw != AUTH_HEADER_PLACEHOLDER {
            let value = substitute(raw, env);
            if !value.trim().is_empty() {
                return Ok(value);
            }
        }
    }

    let access = access.ok_or_else(|| {
        Error::auth("no Authorization header configured and no apiAccess credentials")
    })?;

    if access.scheme == Some(AuthScheme::Bearer) {
        let token_env = access.token_env.as_deref().unwrap_or_default();
        let token = env.get_non_empty(token_env).ok_or_else(|| {
            Error::auth(format!(
                "bearer scheme requires token environment variable '{token_env}'"
            ))
        })?;
        return Ok(format!("Bearer {token}"));
    }

    let user = access
        .user_env
        .as_deref()
        .and_then(|name| env.get_non_empty(name));
    let token = access
        .token_env
        .as_deref()
        .and_then(|name| env.get_non_empty(name));

    match (user, token) {
        (Some(user), Some(token)) => {
            let encoded = BASE64.encode(format!("{user}:{token}"));
            Ok(format!("Basic {encoded}"))
        }
        (None, Some(token)) => Ok(format!("Bearer {token}")),
        _ => Err(Error::auth("no usable credentials in apiAccess")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(
        scheme: Option<AuthScheme>,
        user_env: Option<&str>,
        token_env: Option<&str>,
    ) -> ApiAccess {
        ApiAccess {
            scheme,
            user_env: user_env.map(String::from),
            token_env: token_env.map(String::from),
        }
    }

    #[test]
    fn test_bearer_scheme() {
        let env = EnvVars::from_iter([("T", "abc")]);
        let value = resolve_authorization(
            None,
            Some(&access(Some(AuthScheme::Bearer), None, Some("T"))),
            &env,
        )
        .unwrap();
        assert_eq!(value, "Bearer abc");
    }

    #[test]
    fn test_bearer_scheme_missing_token() {
        let env = EnvVars::new();
        let err = resolve_authorization(
            None,
            Some(&access(Some(AuthScheme::Bearer), None, Some("T"))),
            &env,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Auth { .. }));
    }

    #[test]
    fn test_basic_from_user_and_token() {
        let env = EnvVars::from_iter([("U", "u"), ("T", "t")]);
        let value =
            resolve_authorization(None, Some(&access(None, Some("U"), Some("T"))), &env).unwrap();
        // base64("u:t")
        assert_eq!(value, "Basic dTp0");
    }

    #[test]
    fn test_token_only_falls_back_to_bearer() {
        let env = EnvVars::from_iter([("T", "t")]);
        let value =
            resolve_authorization(None, Some(&access(None, Some("U"), Some("T"))), &env).unwrap();
        assert_eq!(value, "Bearer t");
    }

    #[test]
    fn test_no_credentials() {
        let env = EnvVars::new();
        let err =
            resolve_authorization(None, Some(&access(None, Some("U"), Some("T"))), &env)
                .unwrap_err();
        assert!(matches!(err, Error::Auth { .. }));
    }

    #[test]
    fn test_no_access_at_all() {
        let err = resolve_authorization(None, None, &EnvVars::new()).unwrap_err();
        assert!(matches!(err, Error::Auth { .. }));
    }

    #[test]
    fn test_configured_header_wins() {
        let env = EnvVars::from_iter([("T", "ignored")]);
        let value = resolve_authorization(
            Some("Bearer static"),
            Some(&access(None, None, Some("T"))),
            &env,
        )
        .unwrap();
        assert_eq!(value, "Bearer static");
    }

    #[test]
    fn test_configured_header_is_substituted() {
        let env = EnvVars::from_iter([("MY_TOKEN", "xyz")]);
        let value = resolve_authorization(Some("Bearer ${MY_TOKEN}"), None, &env).unwrap();
        assert_eq!(value, "Bearer xyz");
    }

    #[test]
    fn test_placeholder_requests_synthesis() {
        let env = EnvVars::from_iter([("U", "u"), ("T", "t")]);
        let value = resolve_authorization(
            Some("${AUTH_HEADER}"),
            Some(&access(None, Some("U"), Some("T"))),
            &env,
        )
        .unwrap();
        assert_eq!(value, "Basic dTp0");
    }

    #[test]
    fn test_empty_after_substitution_requests_synthesis() {
        // ${UNSET} substitutes to empty, so the header is unusable
        let env = EnvVars::from_iter([("T", "t")]);
        let value = resolve_authorization(
            Some("${UNSET}"),
            Some(&access(Some(AuthScheme::Bearer), None, Some("T"))),
            &env,
        )
        .unwrap();
        assert_eq!(value, "Bearer t");
    }
}
