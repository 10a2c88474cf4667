//! Enumerated tags shared by the store, the backend, and its consumers.
//!
//! Every tag has a canonical lowercase string name (the one the web client
//! used in URLs and props). [`std::str::FromStr`] rejects anything else with
//! a [`ParseTagError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a string does not name any variant of a tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {tag} `{value}`")]
pub struct ParseTagError {
    /// Which tag was being parsed (e.g. `"window type"`).
    pub tag: &'static str,
    /// The offending input.
    pub value: String,
}

impl ParseTagError {
    fn new(tag: &'static str, value: &str) -> Self {
        Self {
            tag,
            value: value.to_string(),
        }
    }
}

/// Which URL-addressable resource class is currently displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A room (`/s/...`).
    Room,
    /// A friend or user profile (`/f/...`).
    Friend,
    /// The mail application (`/m/...`).
    Mail,
    /// Nothing selected yet.
    #[default]
    None,
}

impl ResourceType {
    /// The single-letter path segment used by the router, if any.
    pub fn url_code(self) -> Option<&'static str> {
        match self {
            ResourceType::Room => Some("s"),
            ResourceType::Friend => Some("f"),
            ResourceType::Mail => Some("m"),
            ResourceType::None => None,
        }
    }

    /// Maps a router path segment back to a resource type.
    pub fn from_url_code(code: &str) -> Result<Self, ParseTagError> {
        match code {
            "s" => Ok(ResourceType::Room),
            "f" => Ok(ResourceType::Friend),
            "m" => Ok(ResourceType::Mail),
            other => Err(ParseTagError::new("resource code", other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Room => "room",
            ResourceType::Friend => "friend",
            ResourceType::Mail => "mail",
            ResourceType::None => "none",
        }
    }
}

impl FromStr for ResourceType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(ResourceType::Room),
            "friend" => Ok(ResourceType::Friend),
            "mail" => Ok(ResourceType::Mail),
            "none" => Ok(ResourceType::None),
            other => Err(ParseTagError::new("resource type", other)),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedded application that can occupy the main or the sub pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    Talk,
    Note,
    Drive,
    Files,
    Calendar,
    Meeting,
    Mail,
    #[serde(rename = "mailsub")]
    MailSub,
    Profile,
    Setting,
}

impl AppKind {
    pub const ALL: [AppKind; 10] = [
        AppKind::Talk,
        AppKind::Note,
        AppKind::Drive,
        AppKind::Files,
        AppKind::Calendar,
        AppKind::Meeting,
        AppKind::Mail,
        AppKind::MailSub,
        AppKind::Profile,
        AppKind::Setting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppKind::Talk => "talk",
            AppKind::Note => "note",
            AppKind::Drive => "drive",
            AppKind::Files => "files",
            AppKind::Calendar => "calendar",
            AppKind::Meeting => "meeting",
            AppKind::Mail => "mail",
            AppKind::MailSub => "mailsub",
            AppKind::Profile => "profile",
            AppKind::Setting => "setting",
        }
    }

    /// Channel type code of the room channel this application binds to.
    ///
    /// Drive and files share the drive channel, calendar and meeting share
    /// the calendar channel. Mail, profile and setting are not channel-bound.
    pub fn channel_code(self) -> Option<&'static str> {
        match self {
            AppKind::Talk => Some("CHN0001"),
            AppKind::Note => Some("CHN0003"),
            AppKind::Drive | AppKind::Files => Some("CHN0006"),
            AppKind::Calendar | AppKind::Meeting => Some("CHN0005"),
            AppKind::Mail | AppKind::MailSub | AppKind::Profile | AppKind::Setting => None,
        }
    }
}

impl FromStr for AppKind {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppKind::ALL
            .into_iter()
            .find(|app| app.as_str() == s)
            .ok_or_else(|| ParseTagError::new("application", s))
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pane proportions of the main view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Layout {
    #[default]
    #[serde(rename = "collapse")]
    Collapsed,
    #[serde(rename = "expand")]
    Expanded,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Collapsed => "collapse",
            Layout::Expanded => "expand",
        }
    }
}

impl FromStr for Layout {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collapse" => Ok(Layout::Collapsed),
            "expand" => Ok(Layout::Expanded),
            other => Err(ParseTagError::new("layout", other)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of externally opened pop-out window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Talk,
    Meeting,
}

impl WindowKind {
    pub const ALL: [WindowKind; 2] = [WindowKind::Talk, WindowKind::Meeting];

    pub fn as_str(self) -> &'static str {
        match self {
            WindowKind::Talk => "talk",
            WindowKind::Meeting => "meeting",
        }
    }
}

impl FromStr for WindowKind {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "talk" => Ok(WindowKind::Talk),
            "meeting" => Ok(WindowKind::Meeting),
            other => Err(ParseTagError::new("window type", other)),
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_codes_round_trip_through_the_router_alphabet() {
        for resource in [ResourceType::Room, ResourceType::Friend, ResourceType::Mail] {
            let code = resource.url_code().unwrap();
            assert_eq!(ResourceType::from_url_code(code), Ok(resource));
        }
        assert_eq!(ResourceType::None.url_code(), None);
    }

    #[test]
    fn unknown_resource_code_is_rejected() {
        let err = ResourceType::from_url_code("x").unwrap_err();
        assert_eq!(err.to_string(), "unknown resource code `x`");
    }

    #[test]
    fn app_names_match_serde_names() {
        for app in AppKind::ALL {
            let json = serde_json::to_string(&app).unwrap();
            assert_eq!(json, format!("\"{}\"", app.as_str()));
            assert_eq!(app.as_str().parse::<AppKind>(), Ok(app));
        }
    }

    #[test]
    fn shared_channels() {
        assert_eq!(AppKind::Drive.channel_code(), AppKind::Files.channel_code());
        assert_eq!(AppKind::Calendar.channel_code(), Some("CHN0005"));
        assert_eq!(AppKind::Meeting.channel_code(), Some("CHN0005"));
        assert_eq!(AppKind::Profile.channel_code(), None);
    }

    #[test]
    fn layout_uses_short_names() {
        assert_eq!(serde_json::to_string(&Layout::Collapsed).unwrap(), "\"collapse\"");
        assert_eq!("expand".parse::<Layout>(), Ok(Layout::Expanded));
        assert!("expanded".parse::<Layout>().is_err());
    }

    #[test]
    fn unknown_window_kind() {
        let err = "drive".parse::<WindowKind>().unwrap_err();
        assert_eq!(err.tag, "window type");
        assert_eq!(err.value, "drive");
    }
}
