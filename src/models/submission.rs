// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Signed submission records.
//!
//! A submission ties a signer's name (and optionally an event code) to the
//! trimmed signature image they drew. Records are validated on creation and
//! serialized to YAML or JSON by `io::serialization`.

use crate::io::encoding;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Per-field validation messages, keyed by form field name.
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Please fix the errors in the form")]
pub struct ValidationError {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationError {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Messages reported for `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A validated signature submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_code: Option<i64>,
    /// Trimmed signature as a PNG data URI
    pub signature: String,
    /// Hosted location of the signature once uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
    /// Hosted location of the evaluation proof image, if one was attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
    /// Submission time in milliseconds since the Unix epoch
    pub submitted_at: u64,
}

impl Submission {
    /// Validate form input and build a submission stamped with the current time.
    ///
    /// `event_code` is the raw text of the code field; an empty field means
    /// no event.
    pub fn new(name: &str, event_code: &str, signature: &str) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        let name = name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required");
        }

        let event_code = event_code.trim();
        let code = if event_code.is_empty() {
            None
        } else {
            match event_code.parse::<i64>() {
                Ok(code) => Some(code),
                Err(_) => {
                    errors.add("code", "Event code must be a whole number");
                    None
                }
            }
        };

        if signature.trim().is_empty() {
            errors.add("signature", "Signature is required");
        } else if encoding::decode_data_uri(signature).is_err() {
            errors.add("signature", "Signature is not a valid image");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: name.to_string(),
            event_code: code,
            signature: signature.to_string(),
            signature_url: None,
            proof_url: None,
            submitted_at: unix_millis(),
        })
    }

    /// Confirmation shown to the signer.
    pub fn confirmation(&self) -> String {
        match self.event_code {
            Some(code) => format!("{} has been registered for event {}", self.name, code),
            None => format!("{}'s signature has been recorded", self.name),
        }
    }
}

/// Milliseconds since the Unix epoch (zero if the clock is before it).
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
