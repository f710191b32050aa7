use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A competitor in a matchup.
///
/// Identity is the canonical `name`; aliases are the alternative spellings
/// seen on slates and in rating feeds and never take part in comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TeamRepr")]
pub struct Team {
    name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
}

/// Teams appear in configuration either as a bare name or as a full record.
#[derive(Deserialize)]
#[serde(untagged)]
enum TeamRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        aliases: Vec<String>,
    },
}

impl From<TeamRepr> for Team {
    fn from(repr: TeamRepr) -> Self {
        match repr {
            TeamRepr::Name(name) => Team::new(name),
            TeamRepr::Full { name, aliases } => Team::with_aliases(name, aliases),
        }
    }
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Team {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// Canonical name, suitable for sentences and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shortest known alias, for dense tables. Falls back to the name.
    pub fn short_name(&self) -> &str {
        self.aliases
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.name.as_str()))
            .min_by_key(|s| s.len())
            .unwrap_or(self.name.as_str())
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// True when `name` is the canonical name or one of the aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Team {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Team {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Team {
    fn from(name: &str) -> Self {
        Team::new(name)
    }
}

impl From<String> for Team {
    fn from(name: String) -> Self {
        Team::new(name)
    }
}
