use std::collections::BTreeSet;

/// The set of service names the update endpoint may modify.
///
/// Built once at startup from configuration and read-only afterwards. An
/// empty whitelist disables the check entirely; the binary warns about that
/// once at startup since it is a deliberate security relaxation.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    names: BTreeSet<String>,
}

impl Whitelist {
    /// Build a whitelist from an iterator of names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// A whitelist that permits every name.
    pub fn open() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of service names.
    ///
    /// Entries are taken as-is: no trimming, no globbing. An empty input
    /// yields an open whitelist.
    pub fn parse(list: &str) -> Self {
        if list.is_empty() {
            return Self::open();
        }
        Self::new(list.split(','))
    }

    /// Whether the whitelist check is disabled.
    pub fn is_open(&self) -> bool {
        self.names.is_empty()
    }

    /// Exact, case-sensitive membership check.
    pub fn is_permitted(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(name)
    }
}
