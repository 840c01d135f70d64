use crate::engine::EngineController;
use crate::tt::DEFAULT_TT_MB;

pub const MIN_HASH_MB: usize = 4;
pub const MAX_HASH_MB: usize = 128;

/// Side effect of a `setoption` that the engine has to carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciOptionAction {
    ReinitHash(usize),
    ClearHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UciOptions {
    pub hash_mb: usize,
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions::new(DEFAULT_TT_MB)
    }
}

impl UciOptions {
    #[must_use]
    pub fn new(hash_mb: usize) -> Self {
        UciOptions {
            hash_mb: hash_mb.clamp(MIN_HASH_MB, MAX_HASH_MB),
        }
    }

    /// Lines answering the `uci` command, `uciok` included
    #[must_use]
    pub fn identify(&self) -> String {
        [
            format!("id name {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            "id author the magic_chess authors".to_string(),
            format!(
                "option name Hash type spin default {DEFAULT_TT_MB} min {MIN_HASH_MB} max {MAX_HASH_MB}"
            ),
            "option name Clear Hash type button".to_string(),
            "uciok".to_string(),
        ]
        .join("\n")
    }

    /// Record a `setoption` and report what the engine must do about it.
    /// Unknown names and unparseable values are logged and ignored.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<UciOptionAction> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hash" => {
                let Some(mb) = value.and_then(|v| v.trim().parse::<usize>().ok()) else {
                    log::warn!("invalid Hash value {value:?}");
                    return None;
                };
                let mb = mb.clamp(MIN_HASH_MB, MAX_HASH_MB);
                if mb != self.hash_mb {
                    self.hash_mb = mb;
                    return Some(UciOptionAction::ReinitHash(mb));
                }
            }
            "clear hash" => return Some(UciOptionAction::ClearHash),
            _ => log::warn!("unknown option '{name}'"),
        }
        None
    }
}

impl UciOptionAction {
    pub fn apply(self, engine: &mut EngineController) {
        match self {
            UciOptionAction::ReinitHash(mb) => {
                log::info!("resizing hash table to {mb} MB");
                engine.resize_hash(mb);
            }
            UciOptionAction::ClearHash => engine.clear_hash(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identify_lists_options() {
        let text = UciOptions::default().identify();
        assert!(text.starts_with("id name magic_chess"));
        assert!(text.contains("option name Hash type spin default 64 min 4 max 128"));
        assert!(text.contains("option name Clear Hash type button"));
        assert!(text.ends_with("uciok"));
    }

    #[test]
    fn hash_is_clamped() {
        let mut options = UciOptions::default();
        assert_eq!(
            options.apply_setoption("Hash", Some("1000")),
            Some(UciOptionAction::ReinitHash(MAX_HASH_MB))
        );
        assert_eq!(
            options.apply_setoption("hash", Some("1")),
            Some(UciOptionAction::ReinitHash(MIN_HASH_MB))
        );
        // Unchanged size needs no reallocation
        assert_eq!(options.apply_setoption("Hash", Some("4")), None);
        assert_eq!(options.hash_mb, MIN_HASH_MB);
    }

    #[test]
    fn bad_values_are_ignored() {
        let mut options = UciOptions::default();
        assert_eq!(options.apply_setoption("Hash", Some("lots")), None);
        assert_eq!(options.apply_setoption("Hash", None), None);
        assert_eq!(options.apply_setoption("Threads", Some("4")), None);
        assert_eq!(options.hash_mb, DEFAULT_TT_MB);
    }

    #[test]
    fn clear_hash_button() {
        let mut options = UciOptions::default();
        assert_eq!(
            options.apply_setoption("Clear Hash", None),
            Some(UciOptionAction::ClearHash)
        );
    }
}
