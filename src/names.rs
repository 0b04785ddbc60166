//! Name normalization and the name-derived identifiers.

use crate::encoding::{self, Prefix};
use crate::error::TxError;
use crate::hash;
use crate::salt::SaltSource;
use crate::types::{Id, Salt};

const DEFAULT_SUFFIXES: [&str; 2] = ["test", "chain"];
const DEFAULT_MAX_LABEL_LEN: usize = 63;

/// Registrar rules a name has to satisfy before it is committed to or
/// claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRules {
    suffixes: Vec<String>,
    max_label_len: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            max_label_len: DEFAULT_MAX_LABEL_LEN,
        }
    }
}

impl NameRules {
    /// Suffixes are given without the leading dot and matched lower-cased.
    pub fn new<I, S>(suffixes: I, max_label_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
            max_label_len,
        }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Lower-case `name` and check it is `label.suffix` with a registered
    /// suffix and a label of `a-z`, `0-9` and inner `-`.
    ///
    /// Only ASCII is folded, so a character such as `\u{212A}` (Kelvin sign)
    /// is rejected instead of becoming `k`.
    pub fn normalize(&self, name: &str) -> Result<String, TxError> {
        if let Some(bad) = name.chars().find(|c| !c.is_ascii()) {
            return Err(TxError::invalid_name(
                name,
                format!("character {bad:?} is not allowed"),
            ));
        }
        let lowered = name.to_ascii_lowercase();

        let (label, suffix) = lowered
            .rsplit_once('.')
            .ok_or_else(|| TxError::invalid_name(name, "missing registrar suffix"))?;

        if !self.suffixes.iter().any(|s| s == suffix) {
            return Err(TxError::invalid_name(
                name,
                format!(
                    "suffix `.{suffix}` is not one of {}",
                    self.suffixes
                        .iter()
                        .map(|s| format!("`.{s}`"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }
        if label.is_empty() {
            return Err(TxError::invalid_name(name, "empty label"));
        }
        if label.len() > self.max_label_len {
            return Err(TxError::invalid_name(
                name,
                format!("label longer than {} bytes", self.max_label_len),
            ));
        }
        if let Some(bad) = label
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(TxError::invalid_name(
                name,
                format!("character {bad:?} is not allowed"),
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(TxError::invalid_name(
                name,
                "label cannot start or end with `-`",
            ));
        }

        Ok(lowered)
    }

    /// Accept a name as plain text or in its `nm_` encoded form.
    pub fn parse_name(&self, text: &str) -> Result<String, TxError> {
        if !text.starts_with("nm_") {
            return self.normalize(text);
        }
        let (_, bytes) = encoding::decode_as(text, &[Prefix::Name])
            .map_err(TxError::decode("name"))?;
        let plain = String::from_utf8(bytes)
            .map_err(|_| TxError::invalid_name(text, "encoded name is not UTF-8"))?;
        self.normalize(&plain)
    }

    pub fn commitment_id(&self, name: &str, salt: &Salt) -> Result<Id, TxError> {
        let normalized = self.parse_name(name)?;
        Ok(hash::commitment_hash(&normalized, salt))
    }

    pub fn name_id(&self, name: &str) -> Result<Id, TxError> {
        let normalized = self.parse_name(name)?;
        Ok(Id::from_hash(Prefix::Name, hash::name_hash(&normalized)))
    }
}

/// `cm_` commitment for `name` under the default rules.
pub fn commitment_id(name: &str, salt: &Salt) -> Result<Id, TxError> {
    NameRules::default().commitment_id(name, salt)
}

/// `nm_` name id (namehash) for `name` under the default rules.
pub fn name_id(name: &str) -> Result<Id, TxError> {
    NameRules::default().name_id(name)
}

/// `nm_` encoding of the name text itself, as passed to a name claim.
pub fn encode_name(name: &str) -> String {
    encoding::encode(Prefix::Name, name.as_bytes())
}

/// A name paired with the salt that hides it until the claim.
///
/// Keep the value between preclaim and claim: the claim must carry the
/// same salt for the chain to match it against the commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCommitment {
    pub name: String,
    pub salt: Salt,
    pub commitment_id: Id,
}

impl NameCommitment {
    pub fn new(rules: &NameRules, name: &str, salt: Salt) -> Result<Self, TxError> {
        let name = rules.parse_name(name)?;
        let commitment_id = hash::commitment_hash(&name, &salt);
        Ok(Self {
            name,
            salt,
            commitment_id,
        })
    }

    /// Draw a fresh salt from `source`.
    pub fn generate(
        rules: &NameRules,
        name: &str,
        source: &mut dyn SaltSource,
    ) -> Result<Self, TxError> {
        Self::new(rules, name, source.next_salt())
    }
}
