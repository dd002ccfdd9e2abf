//! Lenient deserializers for server-rendered configuration
//!
//! The platform table is produced by a PHP backend: flags arrive as `1`/`0`
//! or `"1"`, missing templates arrive as `null`, and path whitelists come
//! straight out of a textarea as one newline-separated string.

use serde::{Deserialize, Deserializer};

/// Deserialize a boolean that might be a bool, a number, a string, or null
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(f64),
        String(String),
        Null(()),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Number(n) => n != 0.0,
        Flag::String(s) => !matches!(s.trim(), "" | "0" | "false"),
        Flag::Null(()) => false,
    })
}

/// Deserialize a string that might be null
pub fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a pattern list given either as an array or as one
/// newline-separated string. Blank lines are dropped; carriage returns are
/// left in place and stripped when each pattern is compiled.
pub fn deserialize_pattern_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PatternList {
        List(Vec<String>),
        Text(String),
        Null(()),
    }

    let patterns = match PatternList::deserialize(deserializer)? {
        PatternList::List(list) => list,
        PatternList::Text(text) => text.split('\n').map(str::to_string).collect(),
        PatternList::Null(()) => Vec::new(),
    };

    Ok(patterns
        .into_iter()
        .filter(|pattern| !pattern.trim().is_empty())
        .collect())
}
