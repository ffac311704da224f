use std::fmt;

/// Bearer-credential check applied to every inbound request.
///
/// Holds the single process-wide credential loaded at startup. An absent (or
/// empty) credential means authentication is disabled and every request
/// passes; that relaxation is warned about once at startup by the binary.
#[derive(Clone)]
pub struct Authenticator {
    credential: Option<String>,
}

impl Authenticator {
    /// Build an authenticator from an optional credential.
    ///
    /// An empty string is treated the same as no credential at all: open mode.
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: credential.filter(|c| !c.is_empty()),
        }
    }

    /// An authenticator that accepts everything.
    pub fn open() -> Self {
        Self { credential: None }
    }

    /// Whether authentication is disabled.
    pub fn is_open(&self) -> bool {
        self.credential.is_none()
    }

    /// Check an `Authorization` header value against the held credential.
    ///
    /// The header must contain the `Bearer ` scheme delimiter exactly once,
    /// and the token after it must equal the credential byte-for-byte. No
    /// normalization is applied. Failure is a plain `false`; the HTTP layer
    /// maps it to 401.
    pub fn is_authorized(&self, header: Option<&str>) -> bool {
        let Some(credential) = self.credential.as_deref() else {
            return true;
        };
        let Some(header) = header else {
            return false;
        };

        let mut segments = header.split("Bearer ");
        match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(token), None) => token == credential,
            _ => false,
        }
    }
}

// The credential must never end up in logs, so Debug redacts it.
impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field(
                "credential",
                &self.credential.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
