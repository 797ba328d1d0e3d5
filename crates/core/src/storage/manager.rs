use log::debug;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::encryption::{self, KdfParams};
use super::format;

/// High-level storage operations: save/load a ledger to/from encrypted bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Ledger → bincode → AES-256-GCM(Argon2id(password)) → CFLW envelope.
    pub fn save_to_bytes(ledger: &Ledger, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_to_bytes_with(ledger, password, KdfParams::default())
    }

    /// Same as [`StorageManager::save_to_bytes`] with explicit KDF costs.
    pub fn save_to_bytes_with(
        ledger: &Ledger,
        password: &str,
        params: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        let plaintext = bincode::serialize(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        let sealed = encryption::seal(&plaintext, password, params)?;
        debug!(
            "Saved ledger: {} transactions, {} activity entries",
            ledger.history.len(),
            ledger.activity.len()
        );
        Ok(format::encode(format::CURRENT_VERSION, &sealed))
    }

    /// CFLW envelope → AES-256-GCM decrypt → bincode → Ledger.
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Ledger, CoreError> {
        let (version, sealed) = format::decode(data)?;
        let plaintext = encryption::open(&sealed, password)?;
        let ledger: Ledger = bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))?;
        debug!(
            "Loaded ledger v{version}: {} transactions",
            ledger.history.len()
        );
        Ok(ledger)
    }

    /// Save a ledger to an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(ledger: &Ledger, path: &str, password: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(ledger, password)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a ledger from an encrypted file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Ledger, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes, password)
    }
}
