//! Technology classification for commands.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Closed set of technologies a command can be tagged with.
///
/// The wire format is the uppercase token (`"JAVA"`, `"BASH"`, ...). Values
/// the server sends that are not in the set fall back to [`Technology::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    Java,
    Python,
    Bash,
    Sql,
    Git,
    Docker,
    Command,
    Text,
}

/// Presentation metadata associated with a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechnologyMeta {
    /// Human-readable label.
    pub label: &'static str,
    /// Icon identifier for the presentation layer.
    pub icon: &'static str,
    /// Accent color pair used by the presentation layer.
    pub accent: &'static str,
}

impl Technology {
    /// All variants, in display order.
    pub const ALL: [Technology; 8] = [
        Technology::Java,
        Technology::Python,
        Technology::Bash,
        Technology::Sql,
        Technology::Git,
        Technology::Docker,
        Technology::Command,
        Technology::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Technology::Java => "JAVA",
            Technology::Python => "PYTHON",
            Technology::Bash => "BASH",
            Technology::Sql => "SQL",
            Technology::Git => "GIT",
            Technology::Docker => "DOCKER",
            Technology::Command => "COMMAND",
            Technology::Text => "TEXT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "JAVA" => Some(Technology::Java),
            "PYTHON" => Some(Technology::Python),
            "BASH" => Some(Technology::Bash),
            "SQL" => Some(Technology::Sql),
            "GIT" => Some(Technology::Git),
            "DOCKER" => Some(Technology::Docker),
            "COMMAND" => Some(Technology::Command),
            "TEXT" => Some(Technology::Text),
            _ => None,
        }
    }

    /// Lenient parse: trims, upcases, and falls back to [`Technology::Text`]
    /// for anything outside the closed set.
    pub fn parse(s: &str) -> Self {
        Technology::from_str(s.trim().to_ascii_uppercase().as_str()).unwrap_or(Technology::Text)
    }

    /// Presentation metadata for this variant. Exhaustive over the set.
    pub fn meta(&self) -> TechnologyMeta {
        match self {
            Technology::Java => TechnologyMeta {
                label: "Java",
                icon: "coffee",
                accent: "from-orange-500/20 to-red-500/20",
            },
            Technology::Python => TechnologyMeta {
                label: "Python",
                icon: "code",
                accent: "from-blue-500/20 to-green-500/20",
            },
            Technology::Bash => TechnologyMeta {
                label: "Bash",
                icon: "terminal",
                accent: "from-gray-500/20 to-slate-500/20",
            },
            Technology::Sql => TechnologyMeta {
                label: "SQL",
                icon: "database",
                accent: "from-cyan-500/20 to-blue-500/20",
            },
            Technology::Git => TechnologyMeta {
                label: "Git",
                icon: "git-branch",
                accent: "from-orange-500/20 to-red-500/20",
            },
            Technology::Docker => TechnologyMeta {
                label: "Docker",
                icon: "box",
                accent: "from-blue-500/20 to-cyan-500/20",
            },
            Technology::Command => TechnologyMeta {
                label: "Command",
                icon: "terminal",
                accent: "from-purple-500/20 to-pink-500/20",
            },
            Technology::Text => TechnologyMeta {
                label: "Text",
                icon: "file-text",
                accent: "from-zinc-500/20 to-gray-500/20",
            },
        }
    }
}

impl Default for Technology {
    fn default() -> Self {
        Technology::Text
    }
}

impl Serialize for Technology {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Technology {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Technology::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_tokens() {
        for tech in Technology::ALL {
            assert_eq!(Technology::from_str(tech.as_str()), Some(tech));
        }
    }

    #[test]
    fn test_parse_falls_back_to_text() {
        assert_eq!(Technology::parse("RUST"), Technology::Text);
        assert_eq!(Technology::parse(""), Technology::Text);
        assert_eq!(Technology::parse("  bash "), Technology::Bash);
    }

    #[test]
    fn test_deserialize_unknown_value() {
        let tech: Technology = serde_json::from_str("\"KOTLIN\"").unwrap();
        assert_eq!(tech, Technology::Text);

        let tech: Technology = serde_json::from_str("\"DOCKER\"").unwrap();
        assert_eq!(tech, Technology::Docker);
    }

    #[test]
    fn test_meta_is_exhaustive() {
        for tech in Technology::ALL {
            assert!(!tech.meta().label.is_empty());
            assert!(!tech.meta().icon.is_empty());
        }
    }
}
