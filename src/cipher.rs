//! # Token Block Cipher
//!
//! Single 64-bit block encryption used both by DKGA02 (keyed with the vending
//! key) and by token decryption (keyed with the decoder key). DES in ECB mode
//! over exactly one block stands in for the STS encryption algorithm, so no
//! padding or chaining is involved.

use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use des::Des;

/// A keyed cipher over big-endian 64-bit blocks.
pub trait BlockCipher64 {
    fn encrypt(&self, block: u64) -> u64;
    fn decrypt(&self, block: u64) -> u64;
}

/// DES keyed with an 8-byte key.
pub struct DesBlockCipher {
    cipher: Des,
}

impl DesBlockCipher {
    /// DES ignores the parity bit of every key byte, so keys differing only
    /// in bit 0 of a byte behave identically.
    pub fn new(key: &[u8; 8]) -> Self {
        Self {
            cipher: Des::new(GenericArray::from_slice(key)),
        }
    }
}

impl BlockCipher64 for DesBlockCipher {
    fn encrypt(&self, block: u64) -> u64 {
        let mut buf = GenericArray::clone_from_slice(&block.to_be_bytes());
        self.cipher.encrypt_block(&mut buf);
        to_block(&buf)
    }

    fn decrypt(&self, block: u64) -> u64 {
        let mut buf = GenericArray::clone_from_slice(&block.to_be_bytes());
        self.cipher.decrypt_block(&mut buf);
        to_block(&buf)
    }
}

fn to_block(bytes: &[u8]) -> u64 {
    let mut out = [0u8; 8];
    out.copy_from_slice(bytes);
    u64::from_be_bytes(out)
}
