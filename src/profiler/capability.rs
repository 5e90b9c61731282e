//! Declarative capability tables
//!
//! A capability set lists the operations a trait exposes and which of them
//! are timed. Each capability trait ships a `static` table next to it, and the
//! profiler checks it once at wrap time.

/// One operation of a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Name used when routing a call through the proxy
    pub name: &'static str,
    /// Human-readable signature, used as part of the ledger key
    pub signature: &'static str,
    /// Whether calls are timed
    pub profiled: bool,
}

impl Operation {
    /// An operation whose calls are timed
    pub const fn profiled(name: &'static str, signature: &'static str) -> Self {
        Self {
            name,
            signature,
            profiled: true,
        }
    }

    /// An operation that is forwarded without timing
    pub const fn forwarded(name: &'static str, signature: &'static str) -> Self {
        Self {
            name,
            signature,
            profiled: false,
        }
    }
}

/// The operations of one capability trait
#[derive(Debug, PartialEq, Eq)]
pub struct CapabilitySet {
    pub name: &'static str,
    pub operations: &'static [Operation],
}

impl CapabilitySet {
    pub const fn new(name: &'static str, operations: &'static [Operation]) -> Self {
        Self { name, operations }
    }

    /// Find an operation by name
    pub fn operation(&self, name: &str) -> Option<&'static Operation> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// True when at least one operation is timed
    pub fn has_profiled(&self) -> bool {
        self.operations.iter().any(|op| op.profiled)
    }
}
