//! Timed, chunked write of one benchmark file.

use crate::bench::Sample;
use std::io::{self, Write};
use std::time::Instant;

/// Upper bound on the sample buffer reserved up front.
const MAX_PREALLOCATED_SAMPLES: u64 = 1 << 16;

/// Write `file_size` zero bytes to `out` in chunks of `block_size`, timing each write.
///
/// The last chunk is truncated to the bytes remaining. Progress is accounted by
/// what each `write` call accepted, so a short write is measured as such and the
/// rest is sent in the next call. On the first failing write the samples
/// gathered so far are dropped and the error is returned.
pub fn write_blocks<W: Write + ?Sized>(
    out: &mut W,
    file_size: u64,
    block_size: u64,
) -> io::Result<Vec<Sample>> {
    if block_size == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "block size must be non-zero"));
    }
    // No single write is longer than the file.
    let buffer_len = usize::try_from(block_size.min(file_size)).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "block size exceeds addressable memory")
    })?;

    let buffer = vec![0u8; buffer_len];
    let expected = file_size.div_ceil(block_size).min(MAX_PREALLOCATED_SAMPLES);
    let mut samples = Vec::with_capacity(usize::try_from(expected).unwrap_or_default());
    let mut written: u64 = 0;

    while written < file_size {
        // Bounded by buffer_len, so the conversion cannot fail.
        let len = usize::try_from((file_size - written).min(block_size)).unwrap_or(buffer_len);

        let start = Instant::now();
        let result = out.write(&buffer[..len]);
        let elapsed = start.elapsed();

        let n = match result {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("device accepted 0 of {len} bytes after {written} bytes"),
                ));
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        samples.push(Sample::from_write(n, elapsed));
        written += n as u64;
    }

    out.flush()?;
    Ok(samples)
}
