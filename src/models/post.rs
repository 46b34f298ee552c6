use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One post record as emitted by the external site generator.
/// Everything beyond the title is optional in the input; missing
/// fields deserialize to their defaults.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Carried from the generator output; not used for navigation.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub tags: Vec<PostTag>,
    #[serde(default)]
    pub links: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostTag {
    pub name: String,
}

impl Post {
    /// Load the pre-generated post list. Any failure (missing file,
    /// malformed JSON) degrades to an empty list.
    pub fn load(path: &Path) -> Vec<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(r) => r,
            Err(e) => {
                warn!("Posts file {} not readable: {}", path.display(), e);
                return vec![];
            }
        };

        match serde_json::from_str(&raw) {
            Ok(posts) => posts,
            Err(e) => {
                warn!("Posts file {} is not a valid post array: {}", path.display(), e);
                vec![]
            }
        }
    }
}
