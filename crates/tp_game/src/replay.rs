use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_x: i8,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

/// Keys held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayInput {
    pub move_x: i8,
    pub jump: bool,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<ReplayInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(ReplayInput {
                    move_x: frame.move_x.signum(),
                    jump: frame.jump,
                });
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}
