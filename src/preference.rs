//! Locale and timezone resolution for incoming requests.
//!
//! The web layer owns routing and rendering; it only hands over what it parsed from the request
//! ([`RequestContext`]) and the logged-in [`User`], if any. Each resolver walks its sources in
//! precedence order and takes the first acceptable value:
//!
//! | source                 | locale | timezone |
//! |------------------------|--------|----------|
//! | query parameter        | 1      | 1        |
//! | user settings          | 2      | 2        |
//! | `locale` header        | 3      |          |
//! | `Accept-Language`      | 4      |          |
//! | configured default     | 5      | 3        |

use std::collections::HashMap;

use chrono_tz::Tz;

use crate::{debug, warn};

pub const LOCALE_PARAM: &str = "locale";
pub const TIMEZONE_PARAM: &str = "timezone";
pub const LOGIN_PARAM: &str = "login_as";
pub const LOCALE_HEADER: &str = "locale";

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleConfig {
    /// Supported languages, in order of preference.
    pub languages: Vec<String>,
    pub default_locale: String,
    pub default_timezone: Tz,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".into(), "fr".into()],
            default_locale: "en".into(),
            default_timezone: Tz::UTC,
        }
    }
}

impl LocaleConfig {
    fn supported(&self, locale: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|language| language.as_str() == locale)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub locale: Option<String>,
    pub timezone: Option<String>,
}

pub type UserDirectory = HashMap<u64, User>;

/// What the web layer extracted from the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub query: HashMap<String, String>,
    /// Header names are matched case-insensitively.
    pub headers: HashMap<String, String>,
    pub accept_language: Option<String>,
}

impl RequestContext {
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn with_accept_language(mut self, value: &str) -> Self {
        self.accept_language = Some(value.to_owned());
        self
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }
}

/// Looks up the user named by the `login_as` query parameter.
pub fn resolve_user<'d>(directory: &'d UserDirectory, ctx: &RequestContext) -> Option<&'d User> {
    let login = ctx.param(LOGIN_PARAM)?;

    match login.trim().parse::<u64>() {
        Ok(id) => directory.get(&id),
        Err(_) => {
            debug!("ignoring non-numeric {LOGIN_PARAM} '{login}'");
            None
        }
    }
}

pub fn resolve_locale(config: &LocaleConfig, ctx: &RequestContext, user: Option<&User>) -> String {
    let candidates = [
        ctx.param(LOCALE_PARAM),
        user.and_then(|user| user.locale.as_deref()),
        ctx.header(LOCALE_HEADER),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|locale| config.supported(locale))
        .or_else(|| {
            ctx.accept_language
                .as_deref()
                .and_then(|header| best_match(header, &config.languages))
        })
        .unwrap_or(config.default_locale.as_str())
        .to_owned()
}

pub fn resolve_timezone(config: &LocaleConfig, ctx: &RequestContext, user: Option<&User>) -> Tz {
    let candidates = [
        ctx.param(TIMEZONE_PARAM),
        user.and_then(|user| user.timezone.as_deref()),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(|name| match Tz::from_str_insensitive(name) {
            Ok(tz) => Some(tz),
            Err(_) => {
                warn!("unknown timezone '{name}'");
                None
            }
        })
        .unwrap_or(config.default_timezone)
}

/// Picks the supported language the client ranks highest in an `Accept-Language` header.
///
/// Entries are ranked by quality, ties keep header order. A regional tag (`fr-CH`) falls back to
/// its primary language when the exact tag isn't supported, and `*` accepts the first supported
/// language.
pub fn best_match<'l>(header: &str, languages: &'l [String]) -> Option<&'l str> {
    let mut ranges: Vec<(&str, f32)> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }

            let quality = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            Some((tag, quality))
        })
        .filter(|(_, quality)| *quality > 0.0)
        .collect();

    ranges.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    ranges.into_iter().find_map(|(tag, _)| {
        if tag == "*" {
            return languages.first().map(String::as_str);
        }

        let tag = tag.replace('_', "-");
        let primary = tag.split('-').next().unwrap_or_default();

        languages
            .iter()
            .find(|language| language.eq_ignore_ascii_case(&tag))
            .or_else(|| {
                languages
                    .iter()
                    .find(|language| language.eq_ignore_ascii_case(primary))
            })
            .map(String::as_str)
    })
}
