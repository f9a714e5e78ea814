use std::fmt;
use std::time::Duration;

/// The five host-fact categories a provider answers for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Identity,
    Cpu,
    Memory,
    Storage,
    Network,
}

impl QueryKind {
    pub const ALL: [QueryKind; 5] = [
        QueryKind::Identity,
        QueryKind::Cpu,
        QueryKind::Memory,
        QueryKind::Storage,
        QueryKind::Network,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Identity => "identity",
            QueryKind::Cpu => "cpu",
            QueryKind::Memory => "memory",
            QueryKind::Storage => "storage",
            QueryKind::Network => "network",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderError {
    Unavailable(String),
    Inconsistent(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Unavailable(what) => write!(f, "{} unavailable", what),
            ProviderError::Inconsistent(detail) => write!(f, "inconsistent reading: {}", detail),
        }
    }
}

impl std::error::Error for ProviderError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    Provider(ProviderError),
    TimedOut(Duration),
    /// The blocking worker panicked or was cancelled.
    Aborted(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Provider(err) => write!(f, "{}", err),
            FailureReason::TimedOut(after) => write!(f, "timed out after {}ms", after.as_millis()),
            FailureReason::Aborted(msg) => write!(f, "worker aborted: {}", msg),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryFailure {
    pub kind: QueryKind,
    pub reason: FailureReason,
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} query failed: {}", self.kind, self.reason)
    }
}

/// A collection attempt that produced no snapshot. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectError {
    pub failures: Vec<QueryFailure>,
}

impl CollectError {
    pub fn failed_kinds(&self) -> Vec<QueryKind> {
        self.failures.iter().map(|f| f.kind).collect()
    }
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snapshot collection failed")?;
        for (idx, failure) in self.failures.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for CollectError {}
