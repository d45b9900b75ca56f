use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::core::CancelFlag;

const CHUNK_SIZE: usize = 8192;
const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Read a file as text, giving up once `timeout` has elapsed or `cancel` is raised.
///
/// The deadline is checked between chunks, so a single stalled read call is
/// not interrupted. Invalid UTF-8 is replaced rather than rejected.
pub fn read_with_deadline(path: &Path, timeout: Duration, cancel: &CancelFlag) -> io::Result<String> {
    let started = Instant::now();
    let mut file = File::open(path)?;
    let file_size = file
        .metadata()
        .ok()
        .and_then(|m| usize::try_from(m.len()).ok())
        .unwrap_or(0);

    let mut content = Vec::with_capacity(file_size.min(MAX_INITIAL_CAPACITY));
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        if cancel.is_cancelled() {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "scan cancelled"));
        }
        if started.elapsed() > timeout {
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("read exceeded {} ms", timeout.as_millis()),
            ));
        }

        match file.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => content.extend_from_slice(&chunk[..n]),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }

    Ok(String::from_utf8_lossy(&content).into_owned())
}
