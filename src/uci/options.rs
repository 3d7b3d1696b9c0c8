//! UCI option advertisement and `setoption` handling.

use crate::board::search::{DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
use crate::tt::{DEFAULT_HASH_SIZE_MB, MAX_HASH_SIZE_MB, MIN_HASH_SIZE_MB};
use crate::variant::Variant;

pub const ENGINE_NAME: &str = "Cobalt";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ENGINE_AUTHOR: &str = "the Cobalt developers";
pub const UCIPLUS_VERSION: &str = "1.0";

/// Action the command loop must take after a `setoption`.
pub enum UciOptionAction {
    ReinitHash(usize),
    ClearHash,
    /// UCI+ only: the `Variant` combo was set
    SetVariant(String),
}

pub struct UciOptions {
    pub hash_mb: usize,
    pub depth: u32,
}

impl UciOptions {
    #[must_use]
    pub fn new() -> Self {
        UciOptions {
            hash_mb: DEFAULT_HASH_SIZE_MB,
            depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    fn print_id(&self) {
        println!("id name {ENGINE_NAME} {ENGINE_VERSION}");
        println!("id author {ENGINE_AUTHOR}");
    }

    fn print_options(&self) {
        println!(
            "option name Hash type spin default {} min {} max {}",
            self.hash_mb, MIN_HASH_SIZE_MB, MAX_HASH_SIZE_MB
        );
        println!("option name Clear Hash type button");
        println!(
            "option name Depth type spin default {} min 1 max {}",
            self.depth, MAX_SEARCH_DEPTH
        );
    }

    /// Standard `uci` handshake.
    pub fn print_uci(&self) {
        self.print_id();
        self.print_options();
        println!("uciok");
    }

    /// `uciplus` handshake: same options plus the variant combo.
    pub fn print_uciplus(&self, current: Variant) {
        println!("id name {ENGINE_NAME} {ENGINE_VERSION} UCI+ {UCIPLUS_VERSION}");
        println!("id author {ENGINE_AUTHOR}");
        self.print_options();
        print!("option name Variant type combo default {}", current.name());
        for variant in Variant::ALL {
            print!(" var {}", variant.name());
        }
        println!();
        println!("uciplusok");
    }

    /// Apply a `setoption`. Returns the follow-up action, if any.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<UciOptionAction> {
        match name {
            "Hash" => {
                if let Some(v) = value.and_then(|v| v.parse::<usize>().ok()) {
                    let v = v.clamp(MIN_HASH_SIZE_MB, MAX_HASH_SIZE_MB);
                    self.hash_mb = v;
                    return Some(UciOptionAction::ReinitHash(v));
                }
            }
            "Clear Hash" => return Some(UciOptionAction::ClearHash),
            "Depth" => {
                if let Some(v) = value.and_then(|v| v.parse::<u32>().ok()) {
                    self.depth = v.clamp(1, MAX_SEARCH_DEPTH);
                }
            }
            "Variant" => {
                if let Some(v) = value {
                    return Some(UciOptionAction::SetVariant(v.to_string()));
                }
            }
            _ => {}
        }
        None
    }
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions::new()
    }
}

/// Split a `setoption` line into its name and optional value, both of which
/// may contain spaces.
#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    let name_idx = parts.iter().position(|p| *p == "name")?;
    let value_idx = parts.iter().position(|p| *p == "value");
    let name = match value_idx {
        Some(v_idx) if v_idx > name_idx + 1 => parts[name_idx + 1..v_idx].join(" "),
        None if name_idx + 1 < parts.len() => parts[name_idx + 1..].join(" "),
        _ => return None,
    };
    let value = value_idx.and_then(|v_idx| {
        if v_idx + 1 < parts.len() {
            Some(parts[v_idx + 1..].join(" "))
        } else {
            None
        }
    });
    Some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setoption_simple() {
        let parts = vec!["setoption", "name", "Hash", "value", "256"];
        let (name, value) = parse_setoption(&parts).unwrap();
        assert_eq!(name, "Hash");
        assert_eq!(value.as_deref(), Some("256"));
    }

    #[test]
    fn test_parse_setoption_multiword_name() {
        let parts = vec!["setoption", "name", "Clear", "Hash"];
        let (name, value) = parse_setoption(&parts).unwrap();
        assert_eq!(name, "Clear Hash");
        assert!(value.is_none());
    }

    #[test]
    fn test_parse_setoption_missing_name() {
        let parts = vec!["setoption", "value", "256"];
        assert!(parse_setoption(&parts).is_none());
    }

    #[test]
    fn test_apply_hash_clamps() {
        let mut options = UciOptions::new();
        match options.apply_setoption("Hash", Some("4096")) {
            Some(UciOptionAction::ReinitHash(mb)) => assert_eq!(mb, MAX_HASH_SIZE_MB),
            _ => panic!("expected ReinitHash"),
        }
        assert_eq!(options.hash_mb, MAX_HASH_SIZE_MB);
    }

    #[test]
    fn test_apply_depth_clamps() {
        let mut options = UciOptions::new();
        options.apply_setoption("Depth", Some("99"));
        assert_eq!(options.depth, MAX_SEARCH_DEPTH);
        options.apply_setoption("Depth", Some("0"));
        assert_eq!(options.depth, 1);
    }

    #[test]
    fn test_apply_unknown_option_ignored() {
        let mut options = UciOptions::new();
        assert!(options.apply_setoption("Ponder", Some("true")).is_none());
    }

    #[test]
    fn test_apply_variant_forwards() {
        let mut options = UciOptions::new();
        match options.apply_setoption("Variant", Some("king_of_the_hill")) {
            Some(UciOptionAction::SetVariant(name)) => assert_eq!(name, "king_of_the_hill"),
            _ => panic!("expected SetVariant"),
        }
    }
}
