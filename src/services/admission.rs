use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

pub const COOKIE_NAME: &str = "admin_access";
pub const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

fn mac_for(secret: &str, expires: i64) -> Option<Hmac<Sha1>> {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(expires.to_string().as_bytes());
    Some(mac)
}

pub fn issue_token(secret: &str, now: DateTime<Utc>) -> Option<String> {
    let expires = now.timestamp() + TOKEN_TTL_SECS;
    let signature = mac_for(secret, expires)?.finalize().into_bytes();
    Some(format!("{expires}.{}", URL_SAFE_NO_PAD.encode(signature)))
}

pub fn verify_token(secret: &str, token: &str, now: DateTime<Utc>) -> bool {
    let Some((expires, signature)) = token.split_once('.') else {
        return false;
    };
    let Ok(expires) = expires.parse::<i64>() else {
        return false;
    };
    if expires <= now.timestamp() {
        return false;
    }
    let Ok(signature) = URL_SAFE_NO_PAD.decode(signature) else {
        return false;
    };
    match mac_for(secret, expires) {
        Some(mac) => mac.verify_slice(&signature).is_ok(),
        None => false,
    }
}

// Compares without short-circuiting on the first differing byte.
pub fn access_code_matches(expected: &str, given: &str) -> bool {
    let (a, b) = (expected.as_bytes(), given.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub fn admission_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{COOKIE_NAME}={token}; Path=/; Max-Age={TOKEN_TTL_SECS}; HttpOnly; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clearing_cookie(secure: bool) -> String {
    let mut cookie = format!("{COOKIE_NAME}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

pub fn is_admitted(headers: &HeaderMap, secret: &str, now: DateTime<Utc>) -> bool {
    cookie_value(headers, COOKIE_NAME)
        .map(|token| verify_token(secret, token, now))
        .unwrap_or(false)
}
