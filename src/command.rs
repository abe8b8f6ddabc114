use reqwest::Url;
use thiserror::Error;

const DEFAULT_SEARCH_BASE: &str = "https://www.google.com/search";

const OPEN_WEBSITE_PREFIX: &str = "open website";
const OPEN_PREFIX: &str = "open ";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// What the interpreter decided to do with a piece of free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Navigate straight to a site
    Redirect { url: String },
    /// Hand the text to the search engine
    Search { url: String },
}

impl CommandAction {
    pub fn url(&self) -> &str {
        match self {
            Self::Redirect { url } | Self::Search { url } => url,
        }
    }
}

/// Rule-based interpreter for spelled or spoken commands.
///
/// Text starting with "open website" or "open " is a site directive, with
/// `https://` promoted onto bare hosts. A single bare word is also treated
/// as a site name (`www.` and `.com` completed as needed). Everything else
/// becomes an escaped search-engine query.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    search_base: String,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self {
            search_base: DEFAULT_SEARCH_BASE.to_string(),
        }
    }

    /// Overrides the search engine base URL
    pub fn with_search_base(mut self, base: impl Into<String>) -> Self {
        self.search_base = base.into();
        self
    }

    pub fn interpret(&self, query: &str) -> Result<CommandAction, CommandError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CommandError::ValidationError("empty query".into()));
        }
        let lower = query.to_lowercase();

        if let Some(site) = lower.strip_prefix(OPEN_WEBSITE_PREFIX) {
            let site = site.trim();
            if site.is_empty() {
                return Err(CommandError::ValidationError(
                    "no site named after 'open website'".into(),
                ));
            }
            return Ok(CommandAction::Redirect {
                url: promote_scheme(site),
            });
        }

        if let Some(site) = lower.strip_prefix(OPEN_PREFIX) {
            let site = site.trim();
            if site.is_empty() {
                return Err(CommandError::ValidationError(
                    "no site named after 'open'".into(),
                ));
            }
            return Ok(CommandAction::Redirect {
                url: complete_site(site),
            });
        }

        // A single bare word is a site name, not a search.
        if !lower.contains(char::is_whitespace) {
            return Ok(CommandAction::Redirect {
                url: complete_site(&lower),
            });
        }

        let url = Url::parse_with_params(&self.search_base, &[("q", query)])
            .map_err(|e| CommandError::ValidationError(format!("bad search base: {}", e)))?;
        Ok(CommandAction::Search {
            url: url.to_string(),
        })
    }
}

/// Prefixes `https://` onto hosts given without a scheme
fn promote_scheme(site: &str) -> String {
    if site.starts_with("http") {
        site.to_string()
    } else {
        format!("https://{}", site)
    }
}

/// Completes a casual site name: scheme plus `www.`, and `.com` when the
/// name carries no domain ending
fn complete_site(site: &str) -> String {
    let mut url = if site.starts_with("http") {
        site.to_string()
    } else {
        format!("https://www.{}", site)
    };

    let without_scheme = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    if !without_scheme.contains('.') {
        url.push_str(".com");
    }
    url
}
