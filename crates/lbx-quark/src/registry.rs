//! Registry of supported parent → daughter baryon transitions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use lbx_core::errors::{ErrorInfo, LbxError};
use lbx_core::params::ParameterSource;
use serde::{Deserialize, Serialize};

/// Identifier of the Λb → Λ(1520) transition.
pub const LAMBDAB_TO_LAMBDA1520: &str = "Lambdab->Lambda(1520)";

/// Immutable metadata for a registered process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Process identifier used as parameter-key prefix.
    pub name: String,
    /// Label of the parent baryon (`m_<parent>`, `alpha_<parent>`).
    pub parent: String,
    /// Label of the daughter baryon (`m_<daughter>`, `alpha_<daughter>`).
    pub daughter: String,
}

impl ProcessInfo {
    /// Creates a process descriptor.
    pub fn new(
        name: impl Into<String>,
        parent: impl Into<String>,
        daughter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            daughter: daughter.into(),
        }
    }

    /// Process-scoped parameter key, `"<process> <field>"`.
    pub fn key(&self, field: &str) -> String {
        format!("{} {}", self.name, field)
    }

    /// Key of the parent mass.
    pub fn parent_mass_key(&self) -> String {
        format!("m_{}", self.parent)
    }

    /// Key of the daughter mass.
    pub fn daughter_mass_key(&self) -> String {
        format!("m_{}", self.daughter)
    }

    /// Reads `key` from `par`; a missing entry is reported against this process.
    pub fn require<P>(&self, par: &P, key: &str) -> Result<f64, LbxError>
    where
        P: ParameterSource + ?Sized,
    {
        par.require(key)
            .map_err(|err| err.with_context("process", self.name.as_str()))
    }
}

/// Name-indexed collection of [`ProcessInfo`] records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessRegistry {
    processes: BTreeMap<String, ProcessInfo>,
}

impl ProcessRegistry {
    /// Creates a registry without any process.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every transition shipped with the crate.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.processes.insert(
            LAMBDAB_TO_LAMBDA1520.to_owned(),
            ProcessInfo::new(LAMBDAB_TO_LAMBDA1520, "Lambdab", "Lambda(1520)"),
        );
        registry
    }

    /// Adds a new process. Existing names are never overwritten.
    pub fn register(&mut self, info: ProcessInfo) -> Result<(), LbxError> {
        if self.processes.contains_key(&info.name) {
            return Err(LbxError::Process(
                ErrorInfo::new(
                    "lbx.duplicate_process",
                    format!("process '{}' is already registered", info.name),
                )
                .with_context("process", info.name.clone()),
            ));
        }
        self.processes.insert(info.name.clone(), info);
        Ok(())
    }

    /// Resolves a process identifier.
    pub fn lookup(&self, process: &str) -> Result<&ProcessInfo, LbxError> {
        self.processes
            .get(process)
            .ok_or_else(|| LbxError::unknown_process(process))
    }

    /// Registered identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.processes.keys().map(String::as_str)
    }

    /// Registered records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessInfo> + '_ {
        self.processes.values()
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

/// Process-wide builtin registry, initialised on first use and never mutated.
pub fn global() -> &'static ProcessRegistry {
    static REGISTRY: OnceLock<ProcessRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ProcessRegistry::builtin)
}
