//! Zero-padded random decimal strings.

use crate::error::AppError;
use rand::Rng;

/// Length used by the generator when nothing else is configured.
pub const DEFAULT_LENGTH: i64 = 8;

/// Random string of `length` decimal digits using the thread-local RNG.
pub fn generate_digits(length: i64) -> Result<String, AppError> {
    generate_digits_with(&mut rand::thread_rng(), length)
}

/// Same as [`generate_digits`] with a caller-supplied RNG.
///
/// Each position is drawn independently from `0..10`, which is the same
/// distribution as a single draw from `0..10^length` padded to `length`
/// but has no upper bound on `length`.
pub fn generate_digits_with<R: Rng>(rng: &mut R, length: i64) -> Result<String, AppError> {
    if length <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "length must be positive, got {}",
            length
        )));
    }
    let out: String = (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    Ok(out)
}
