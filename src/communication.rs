use crate::error::SoundError;

/// sent from a playback thread back to the ui thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageType,
    /// which trigger started the playback
    pub playback_id: usize,
}

impl Message {
    #[must_use]
    pub const fn new(kind: MessageType, playback_id: usize) -> Self {
        Self { kind, playback_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    /// the sound played to its natural end
    Finished,
    Failed(SoundError),
}
