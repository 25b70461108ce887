use rodio::{OutputStream, OutputStreamBuilder, mixer::Mixer};

/// Failure to open the default audio output.
#[derive(Debug, thiserror::Error)]
#[error("Audio output unavailable: {0}")]
pub struct AudioOutputError(String);

/// Owns the process-wide output stream; sinks attach to its mixer.
pub struct AudioOutput {
    stream: OutputStream,
}

impl AudioOutput {
    /// Open the system default output device.
    pub fn open_default() -> Result<Self, AudioOutputError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| AudioOutputError(err.to_string()))?;
        stream.log_on_drop(false);
        Ok(Self { stream })
    }

    pub(crate) fn mixer(&self) -> &Mixer {
        self.stream.mixer()
    }
}
