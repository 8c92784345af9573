use otf_parity_canonical::{CanonicalMap, CanonicalValue, Canonicalize};

/// Successful probe result before it is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSuccess {
    /// Canonicalized probe data.
    pub data: CanonicalValue,
    /// Probe-specific metadata (counts, identifiers, date ranges).
    pub metadata: CanonicalMap,
}

impl ProbeSuccess {
    /// Wraps already-canonical data.
    pub fn new(data: CanonicalValue) -> Self {
        Self {
            data,
            metadata: CanonicalMap::new(),
        }
    }

    /// Canonicalizes `value` and wraps it.
    pub fn of<T: Canonicalize + ?Sized>(value: &T) -> Self {
        Self::new(value.canonicalize())
    }

    /// Adds a metadata entry.
    pub fn with(mut self, key: &str, value: impl Into<CanonicalValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Recorded result of one probe. Exactly one of data or error is present.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The probe produced data.
    Success {
        /// Canonicalized probe data.
        data: CanonicalValue,
        /// Probe-specific metadata.
        metadata: CanonicalMap,
    },
    /// The probe failed.
    Failure {
        /// Failure message.
        error: String,
    },
}

impl ProbeOutcome {
    /// Builds a failure outcome.
    pub fn failure(error: impl Into<String>) -> Self {
        ProbeOutcome::Failure {
            error: error.into(),
        }
    }

    /// Returns true for successful outcomes.
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// Canonical data, present iff the probe succeeded.
    pub fn data(&self) -> Option<&CanonicalValue> {
        match self {
            ProbeOutcome::Success { data, .. } => Some(data),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    /// Failure message, present iff the probe failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Success { .. } => None,
            ProbeOutcome::Failure { error } => Some(error),
        }
    }

    /// Metadata entry by key.
    pub fn metadata(&self, key: &str) -> Option<&CanonicalValue> {
        match self {
            ProbeOutcome::Success { metadata, .. } => metadata.get(key),
            ProbeOutcome::Failure { .. } => None,
        }
    }
}

impl From<ProbeSuccess> for ProbeOutcome {
    fn from(success: ProbeSuccess) -> Self {
        ProbeOutcome::Success {
            data: success.data,
            metadata: success.metadata,
        }
    }
}

/// Report form: `success`, then `data` and the flattened metadata, or `error`.
impl Canonicalize for ProbeOutcome {
    fn canonicalize(&self) -> CanonicalValue {
        let mut map = CanonicalMap::new();
        match self {
            ProbeOutcome::Success { data, metadata } => {
                map.insert("success", true);
                map.insert("data", data.clone());
                for (key, value) in metadata.iter() {
                    if key != "success" && key != "data" {
                        map.insert(key, value.clone());
                    }
                }
            }
            ProbeOutcome::Failure { error } => {
                map.insert("success", false);
                map.insert("error", error.as_str());
            }
        }
        CanonicalValue::Map(map)
    }
}
