use super::encryption::{KdfParams, Sealed, NONCE_LEN, SALT_LEN};
use crate::errors::CoreError;

/// Magic bytes identifying a CashFlow ledger file.
pub const MAGIC: &[u8; 4] = b"CFLW";

/// Current file format version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf params(12) + salt(16) + nonce(12) + ciphertext len(8)
pub const HEADER_SIZE: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

/// Serialize a sealed payload into the on-disk envelope.
///
/// ```text
/// [CFLW: 4B] [version: 2B LE] [memory_cost: 4B LE] [time_cost: 4B LE]
/// [parallelism: 4B LE] [salt: 16B] [nonce: 12B] [ciphertext_len: 8B LE]
/// [ciphertext: variable]
/// ```
pub fn encode(version: u16, sealed: &Sealed) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + sealed.ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&sealed.kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&sealed.kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&sealed.kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(&sealed.salt);
    buf.extend_from_slice(&sealed.nonce);
    buf.extend_from_slice(&(sealed.ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(&sealed.ciphertext);
    buf
}

/// Parse and validate an envelope. Returns the format version and the sealed payload.
pub fn decode(data: &[u8]) -> Result<(u16, Sealed), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a CashFlow ledger".into(),
        ));
    }

    let mut reader = Reader { data, offset: 0 };
    if reader.take::<4>()? != *MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not a CashFlow ledger".into(),
        ));
    }

    let version = u16::from_le_bytes(reader.take()?);
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: u32::from_le_bytes(reader.take()?),
        time_cost: u32::from_le_bytes(reader.take()?),
        parallelism: u32::from_le_bytes(reader.take()?),
    };
    validate_kdf_params(&kdf_params)?;

    let salt = reader.take::<SALT_LEN>()?;
    let nonce = reader.take::<NONCE_LEN>()?;
    let declared = u64::from_le_bytes(reader.take()?);

    let remaining = data.len() - reader.offset;
    if (remaining as u64) < declared {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {declared} bytes of ciphertext, got {remaining}"
        )));
    }
    let end = reader.offset + declared as usize;
    let ciphertext = data[reader.offset..end].to_vec();

    Ok((
        version,
        Sealed {
            kdf_params,
            salt,
            nonce,
            ciphertext,
        },
    ))
}

/// Bound KDF costs so a crafted header cannot make loading exhaust memory or CPU.
fn validate_kdf_params(params: &KdfParams) -> Result<(), CoreError> {
    if !(8..=1_048_576).contains(&params.memory_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF memory_cost out of range: {} KiB (expected 8..=1048576)",
            params.memory_cost
        )));
    }
    if !(1..=20).contains(&params.time_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF time_cost out of range: {} (expected 1..=20)",
            params.time_cost
        )));
    }
    if !(1..=16).contains(&params.parallelism) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF parallelism out of range: {} (expected 1..=16)",
            params.parallelism
        )));
    }
    Ok(())
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], CoreError> {
        let bytes: [u8; N] = self
            .data
            .get(self.offset..self.offset + N)
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| {
                CoreError::InvalidFileFormat(format!("Unexpected end of header at byte {}", self.offset))
            })?;
        self.offset += N;
        Ok(bytes)
    }
}
