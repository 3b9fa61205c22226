//! Live-reload frames.
//!
//! The server speaks plain text frames:
//!
//! - `reload`: reload the page (or run the caller's callback)
//! - `refreshcss`: swap stylesheets in place
//!
//! Any other payload is ignored.

/// A recognized server frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadMessage {
    Reload,
    RefreshCss,
}

impl ReloadMessage {
    /// Exact, case-sensitive match on the frame text.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "reload" => Some(Self::Reload),
            "refreshcss" => Some(Self::RefreshCss),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reload => "reload",
            Self::RefreshCss => "refreshcss",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_frames() {
        assert_eq!(ReloadMessage::parse("reload"), Some(ReloadMessage::Reload));
        assert_eq!(ReloadMessage::parse("refreshcss"), Some(ReloadMessage::RefreshCss));
        assert_eq!(ReloadMessage::RefreshCss.as_str(), "refreshcss");
    }

    #[test]
    fn test_other_frames_ignored() {
        for text in ["", "Reload", "reload ", "refreshCSS", "{\"type\":\"reload\"}"] {
            assert_eq!(ReloadMessage::parse(text), None, "{text:?}");
        }
    }
}
