//! Sequential fixed-size file chunking

use bytes::Bytes;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

/// Number of chunks a file of `file_size` bytes is split into. An empty file is still one (empty) chunk.
pub fn total_chunks(file_size: u64, chunk_size: u64) -> u64 {
    if file_size == 0 {
        return 1;
    }
    file_size.div_ceil(chunk_size.max(1))
}

#[derive(Debug, Clone)]
pub struct FileChunk {
    /// 0-based
    pub index: u64,
    pub data: Bytes,
}

/// Reads a file one chunk at a time; only the current chunk is held in memory
pub struct FileChunker {
    file: File,
    chunk_size: u64,
    file_size: u64,
    total_chunks: u64,
    next_index: u64,
}

impl FileChunker {
    pub async fn open(path: &Path, chunk_size: u64) -> io::Result<Self> {
        if chunk_size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "chunk size must be greater than zero",
            ));
        }

        let file = File::open(path).await?;
        let file_size = file.metadata().await?.len();

        Ok(FileChunker {
            file,
            chunk_size,
            file_size,
            total_chunks: total_chunks(file_size, chunk_size),
            next_index: 0,
        })
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    pub async fn next_chunk(&mut self) -> io::Result<Option<FileChunk>> {
        if self.next_index >= self.total_chunks {
            return Ok(None);
        }

        let start = self.next_index * self.chunk_size;
        let len = self.chunk_size.min(self.file_size.saturating_sub(start));

        self.file.seek(SeekFrom::Start(start)).await?;
        let mut buffer = vec![0u8; len as usize];
        self.file.read_exact(&mut buffer).await?;

        let chunk = FileChunk {
            index: self.next_index,
            data: Bytes::from(buffer),
        };
        self.next_index += 1;

        Ok(Some(chunk))
    }
}
