use ed25519_dalek as dalek;
use ed25519_dalek::Digest as _;
use ed25519_dalek::Sha512;
use ed25519_dalek::Signer as _;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{de, ser, Deserialize, Serialize};
use std::convert::{TryFrom, TryInto};
use std::fmt;
use thiserror::Error;

#[cfg(test)]
#[path = "tests/crypto_tests.rs"]
pub mod crypto_tests;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid base58 encoding: {0}")]
    EncodingError(#[from] bs58::decode::Error),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid signature")]
    InvalidSignature(#[from] dalek::SignatureError),
}

fn decode_array<const N: usize>(s: &str) -> Result<[u8; N], CryptoError> {
    let bytes = bs58::decode(s).into_vec()?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            expected: N,
            actual,
        })
}

/// Represents a hash digest (32 bytes).
#[derive(Hash, PartialEq, Default, Eq, Clone, Copy, Ord, PartialOrd)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0[..]).into_string()
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", &self.to_base58()[..16])
    }
}

/// This trait is implemented by all messages that can be hashed.
pub trait Hash {
    fn digest(&self) -> Digest;
}

impl Hash for [u8] {
    fn digest(&self) -> Digest {
        let hash = Sha512::digest(self);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hash.as_slice()[..32]);
        Digest(digest)
    }
}

/// Represents a public key (in bytes). Its text form is base58.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0[..]).into_string()
    }

    pub fn from_base58(s: &str) -> Result<Self, CryptoError> {
        decode_array(s).map(Self)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", &self.to_base58()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(|e| de::Error::custom(e.to_string()))
    }
}

/// Represents a secret key (in bytes).
pub struct SecretKey([u8; 64]);

impl SecretKey {
    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0[..]).into_string()
    }

    pub fn from_base58(s: &str) -> Result<Self, CryptoError> {
        decode_array(s).map(Self)
    }
}

impl Serialize for SecretKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|x| *x = 0);
    }
}

pub fn generate_production_keypair() -> (PublicKey, SecretKey) {
    generate_keypair(&mut OsRng)
}

pub fn generate_keypair<R>(csprng: &mut R) -> (PublicKey, SecretKey)
where
    R: CryptoRng + RngCore,
{
    let keypair = dalek::Keypair::generate(csprng);
    let public = PublicKey(keypair.public.to_bytes());
    let secret = SecretKey(keypair.to_bytes());
    (public, secret)
}

/// An Ed25519 signature over an arbitrary message.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    part1: [u8; 32],
    part2: [u8; 32],
}

impl Signature {
    pub fn new(message: &[u8], secret: &SecretKey) -> Result<Self, CryptoError> {
        let keypair = dalek::Keypair::from_bytes(&secret.0)?;
        let sig = keypair.sign(message).to_bytes();
        Ok(Self::from_array(sig))
    }

    fn from_array(bytes: [u8; 64]) -> Self {
        let mut part1 = [0u8; 32];
        let mut part2 = [0u8; 32];
        part1.copy_from_slice(&bytes[..32]);
        part2.copy_from_slice(&bytes[32..64]);
        Signature { part1, part2 }
    }

    fn flatten(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.part1);
        bytes[32..].copy_from_slice(&self.part2);
        bytes
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.flatten()[..]).into_string()
    }

    pub fn from_base58(s: &str) -> Result<Self, CryptoError> {
        decode_array(s).map(Self::from_array)
    }

    pub fn verify(&self, message: &[u8], public_key: &PublicKey) -> Result<(), CryptoError> {
        let signature = dalek::Signature::try_from(&self.flatten()[..])?;
        let key = dalek::PublicKey::from_bytes(&public_key.0)?;
        key.verify_strict(message, &signature)?;
        Ok(())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.to_base58())
    }
}
