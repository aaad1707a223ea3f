//! Server settings read from the environment.

use anyhow::{bail, Context};
use lexicube_core::config::is_allowed;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_WORDS_FILE: &str = "words/words_alpha.txt";
const DEFAULT_MAX_PLAYERS: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Newline separated word list
    pub words_file: PathBuf,
    /// Fixed letters to deal in a loop instead of a shuffled bag
    pub draw_pattern: Option<String>,
    pub max_players: u8,
}

impl ServerConfig {
    /// Read `SERVER_ADDR`, `WORDS_FILE`, `DRAW_PATTERN` and `MAX_PLAYERS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.into())
            .parse()
            .context("SERVER_ADDR is not a socket address")?;

        let words_file = lookup("WORDS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORDS_FILE));

        let draw_pattern = match lookup("DRAW_PATTERN") {
            Some(pattern) if pattern.is_empty() => None,
            Some(pattern) => {
                let pattern = pattern.to_uppercase();
                if let Some(bad) = pattern.chars().find(|&c| !is_allowed(c)) {
                    bail!("DRAW_PATTERN contains {:?}, which no tile can carry", bad);
                }
                Some(pattern)
            }
            None => None,
        };

        let max_players = match lookup("MAX_PLAYERS") {
            Some(value) => value.parse().context("MAX_PLAYERS is not a number")?,
            None => DEFAULT_MAX_PLAYERS,
        };
        if max_players == 0 {
            bail!("MAX_PLAYERS must be at least 1");
        }

        Ok(Self {
            addr,
            words_file,
            draw_pattern,
            max_players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.words_file, PathBuf::from("words/words_alpha.txt"));
        assert_eq!(config.draw_pattern, None);
        assert_eq!(config.max_players, 4);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SERVER_ADDR", "127.0.0.1:9000"),
            ("WORDS_FILE", "/tmp/words.txt"),
            ("DRAW_PATTERN", "abc"),
            ("MAX_PLAYERS", "2"),
        ])
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.words_file, PathBuf::from("/tmp/words.txt"));
        assert_eq!(config.draw_pattern.as_deref(), Some("ABC"));
        assert_eq!(config.max_players, 2);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("SERVER_ADDR", "nowhere")]).is_err());
        assert!(config(&[("DRAW_PATTERN", "AB1")]).is_err());
        assert!(config(&[("MAX_PLAYERS", "many")]).is_err());
        assert!(config(&[("MAX_PLAYERS", "0")]).is_err());
    }
}
