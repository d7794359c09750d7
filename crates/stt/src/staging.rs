use std::{
    io,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use reqwest::multipart::Part;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use vocalis_config::AudioStaging;

/// Decoded audio waiting to be uploaded
///
/// The file variant owns a [`NamedTempFile`]: the file is unlinked when the
/// value is dropped, whether the upload succeeded or not.
#[derive(Debug)]
pub(crate) enum StagedAudio {
    Memory(Bytes),
    File(ScratchFile),
}

impl StagedAudio {
    /// Stage `audio` according to the configured strategy
    pub async fn stage(
        audio: Vec<u8>,
        strategy: AudioStaging,
        dir: Option<&Path>,
        filename: &str,
    ) -> io::Result<Self> {
        match strategy {
            AudioStaging::Memory => Ok(Self::Memory(Bytes::from(audio))),
            AudioStaging::File => {
                let scratch = ScratchFile::write(&audio, dir, suffix_of(filename)).await?;
                Ok(Self::File(scratch))
            }
        }
    }

    pub fn byte_len(&self) -> u64 {
        match self {
            Self::Memory(bytes) => bytes.len() as u64,
            Self::File(scratch) => scratch.len,
        }
    }

    /// Multipart part for the audio payload
    ///
    /// Staged files are streamed from disk instead of being read back
    /// into memory. The returned part borrows nothing, so `self` must be
    /// kept alive until the request has been sent.
    pub fn to_part(&self) -> io::Result<Part> {
        match self {
            Self::Memory(bytes) => {
                let body = reqwest::Body::from(bytes.clone());
                Ok(Part::stream_with_length(body, bytes.len() as u64))
            }
            Self::File(scratch) => {
                let file = tokio::fs::File::from_std(scratch.file.reopen()?);
                let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
                Ok(Part::stream_with_length(body, scratch.len))
            }
        }
    }

    /// Path of the staged file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Memory(_) => None,
            Self::File(scratch) => Some(scratch.file.path()),
        }
    }
}

/// Temporary file holding one upload
#[derive(Debug)]
pub(crate) struct ScratchFile {
    file: NamedTempFile,
    len: u64,
}

impl ScratchFile {
    async fn write(audio: &[u8], dir: Option<&Path>, suffix: &str) -> io::Result<Self> {
        let dir: PathBuf = dir.map_or_else(std::env::temp_dir, Path::to_path_buf);

        let file = tempfile::Builder::new()
            .prefix("vocalis-")
            .suffix(suffix)
            .tempfile_in(dir)?;

        let mut handle = tokio::fs::File::from_std(file.reopen()?);
        handle.write_all(audio).await?;
        handle.flush().await?;

        tracing::debug!(path = %file.path().display(), bytes = audio.len(), "audio staged to disk");

        Ok(Self {
            file,
            len: audio.len() as u64,
        })
    }
}

fn suffix_of(filename: &str) -> &str {
    filename.rfind('.').map_or("", |idx| &filename[idx..])
}
