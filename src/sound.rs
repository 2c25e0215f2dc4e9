//! Alarm sound playback.
//!
//! Playing a sound blocks until it ends, so every trigger gets its own thread.
//! The thread only reports back through [`Message`]s,
//! alarm state stays with the ui thread.

use std::{
    path::{Path, PathBuf},
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
};

use crate::{
    communication::{Message, MessageType},
    error::SoundError,
};

/// the sound the alarm plays unless configured otherwise
pub const DEFAULT_SOUND: &str = "mixkit-alert-alarm-1005.wav";

/// Something that can play a sound file.
pub trait SoundBackend: Send + Sync {
    /// Play `path` to completion, blocking the calling thread.
    ///
    /// # Errors
    /// if the file can't be decoded or no audio device is usable
    fn play(&self, path: &Path) -> Result<(), SoundError>;
}

/// Plays sounds on the default output device.
#[cfg(feature = "sound")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioBackend;

#[cfg(feature = "sound")]
impl SoundBackend for RodioBackend {
    fn play(&self, path: &Path) -> Result<(), SoundError> {
        let file = std::fs::File::open(path).map_err(|e| SoundError::Playback(e.to_string()))?;
        let mut stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| SoundError::Playback(e.to_string()))?;
        // the stream prints to stderr when dropped otherwise
        stream.log_on_drop(false);
        let source = rodio::Decoder::new(std::io::BufReader::new(file))
            .map_err(|e| SoundError::Playback(e.to_string()))?;
        let sink = rodio::Sink::connect_new(stream.mixer());
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

/// Stand-in when there is no audio support compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedBackend;

impl SoundBackend for SimulatedBackend {
    fn play(&self, path: &Path) -> Result<(), SoundError> {
        log::warn!("audio support not available, simulating playing sound: {}", path.display());
        Ok(())
    }
}

/// the best backend this build has
#[must_use]
pub fn default_backend() -> Arc<dyn SoundBackend> {
    #[cfg(feature = "sound")]
    {
        Arc::new(RodioBackend)
    }
    #[cfg(not(feature = "sound"))]
    {
        Arc::new(SimulatedBackend)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Started {
    /// a new playback thread is running with this id
    Playing(usize),
    /// the previous playback hasn't finished yet, nothing new was started
    AlreadyPlaying(usize),
}

struct Playback {
    id: usize,
    handle: JoinHandle<()>,
}

pub struct SoundPlayer {
    backend: Arc<dyn SoundBackend>,
    path: PathBuf,
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    current: Option<Playback>,
    next_id: usize,
}

impl SoundPlayer {
    #[must_use]
    pub fn new(backend: Arc<dyn SoundBackend>, path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            backend,
            path,
            sender,
            receiver,
            current: None,
            next_id: 0,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|playback| !playback.handle.is_finished())
    }

    /// Start playing the alarm sound in the background.
    ///
    /// There is no way to cut a sound short, so while one is still playing
    /// another trigger doesn't start a second one on top of it.
    ///
    /// # Errors
    /// [`SoundError::Missing`] if the sound file doesn't exist,
    /// playback failures arrive later through [`SoundPlayer::poll`]
    pub fn start(&mut self) -> Result<Started, SoundError> {
        if !self.path.exists() {
            log::error!("alarm sound file '{}' not found", self.path.display());
            return Err(SoundError::Missing(self.path.clone()));
        }
        if let Some(playback) = self.current.as_ref().filter(|_| self.is_playing()) {
            log::info!("alarm sound {} still playing, not starting another", playback.id);
            return Ok(Started::AlreadyPlaying(playback.id));
        }
        self.next_id += 1;
        let id = self.next_id;
        let backend = Arc::clone(&self.backend);
        let path = self.path.clone();
        let sender = self.sender.clone();
        let handle = thread::spawn(move || {
            log::info!("playing alarm sound: {}...", path.display());
            let kind = match backend.play(&path) {
                Ok(()) => {
                    log::info!("alarm sound finished");
                    MessageType::Finished
                }
                Err(e) => {
                    log::error!("error playing alarm sound: {e}");
                    MessageType::Failed(e)
                }
            };
            // the player may be gone if the window closed mid sound
            let _ = sender.send(Message::new(kind, id));
        });
        // the old thread has finished, dropping its handle detaches it
        self.current = Some(Playback { id, handle });
        Ok(Started::Playing(id))
    }

    /// everything the playback threads reported since the last call
    pub fn poll(&mut self) -> Vec<Message> {
        self.receiver.try_iter().collect()
    }
}
