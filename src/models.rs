use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the search view can filter by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    All,
    JavaScript,
    Ruby,
    Python,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::All,
        Language::JavaScript,
        Language::Ruby,
        Language::Python,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::All => "all",
            Language::JavaScript => "javascript",
            Language::Ruby => "ruby",
            Language::Python => "python",
        }
    }

    pub fn next(&self) -> Language {
        match self {
            Language::All => Language::JavaScript,
            Language::JavaScript => Language::Ruby,
            Language::Ruby => Language::Python,
            Language::Python => Language::All,
        }
    }

    pub fn prev(&self) -> Language {
        match self {
            Language::All => Language::Python,
            Language::JavaScript => Language::All,
            Language::Ruby => Language::JavaScript,
            Language::Python => Language::Ruby,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| format!("Unrecognized language: {}", s))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// A search result, kept exactly as the API sent it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub owner: Owner,
    pub stargazers_count: u64,
}

/// Envelope of the repository search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<Repository>,
}

/// A friends list entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub name: String,
    pub active: bool,
    pub deleted: bool,
}

impl Friend {
    pub fn new(name: impl Into<String>) -> Self {
        Friend {
            name: name.into(),
            active: true,
            deleted: false,
        }
    }

    /// Same friend with `active` flipped
    pub fn toggled(&self) -> Friend {
        Friend {
            name: self.name.clone(),
            active: !self.active,
            deleted: self.deleted,
        }
    }

    /// Same friend marked deleted and inactive
    pub fn removed(&self) -> Friend {
        Friend {
            name: self.name.clone(),
            active: false,
            deleted: true,
        }
    }
}

/// Envelope of the friends bulk endpoint
#[derive(Debug, Deserialize)]
pub struct FriendsResponse {
    pub data: Vec<Friend>,
}

/// Top-level views
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Repos,
    Friends,
}

impl View {
    pub fn next(&self) -> View {
        match self {
            View::Repos => View::Friends,
            View::Friends => View::Repos,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Repos => "Popular Repos",
            View::Friends => "Friends",
        }
    }
}
