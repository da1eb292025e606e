/// Errors raised while turning authored level data into runtime geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("Malformed level data: {0}")]
    MalformedLevelData(String),
}

impl LevelError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedLevelData(msg.into())
    }
}
