//! Catalogue of available algorithms.
//!
//! The host runs a single algorithm per simulation; the registry is the
//! step before that: it maps names to factories so a runner (the CLI, a
//! test harness) can enumerate what exists, pick one, and get a fresh
//! instance. Factories are `Send + Sync` closures, so a registry can be
//! shared behind an `Arc` if a runner ever needs that.

use crate::Algorithm;

/// Factory closure producing a fresh boxed algorithm.
pub type AlgorithmFactory = Box<dyn Fn() -> Box<dyn Algorithm> + Send + Sync>;

/// Static metadata for a registered algorithm, queryable without
/// instantiating it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmMeta {
    /// Unique registry key.
    pub name: String,
    /// Semver-style version string; format is the registrant's business.
    pub version: String,
    /// Human-readable description shown by `qsk list`.
    pub description: String,
}

impl AlgorithmMeta {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }
}

/// Errors returned by [`AlgorithmRegistry`] operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// An algorithm with the given name is already registered.
    DuplicateName { name: String },
    /// No algorithm with the given name is registered.
    UnknownAlgorithm { name: String },
    /// The registered name is empty or whitespace.
    EmptyName,
    /// The instantiated algorithm reports a different name than it was
    /// registered under.
    NameMismatch { registered: String, reported: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName { name } => {
                write!(f, "algorithm '{name}' is already registered")
            }
            Self::UnknownAlgorithm { name } => {
                write!(f, "no algorithm named '{name}' is registered")
            }
            Self::EmptyName => write!(f, "algorithm name must not be empty"),
            Self::NameMismatch {
                registered,
                reported,
            } => write!(
                f,
                "algorithm registered as '{registered}' reports name '{reported}'"
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

struct RegistryEntry {
    meta: AlgorithmMeta,
    factory: AlgorithmFactory,
}

/// Insertion-ordered catalogue of algorithms and their factories.
pub struct AlgorithmRegistry {
    entries: Vec<RegistryEntry>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register an algorithm by metadata and factory closure.
    ///
    /// # Errors
    /// - [`RegistryError::EmptyName`] if `meta.name` is empty/whitespace.
    /// - [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register<F>(&mut self, meta: AlgorithmMeta, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn Algorithm> + Send + Sync + 'static,
    {
        if meta.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains(&meta.name) {
            return Err(RegistryError::DuplicateName {
                name: meta.name.clone(),
            });
        }
        self.entries.push(RegistryEntry {
            meta,
            factory: Box::new(factory),
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.meta.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata for all registered algorithms, in insertion order.
    pub fn list(&self) -> Vec<&AlgorithmMeta> {
        self.entries.iter().map(|e| &e.meta).collect()
    }

    /// # Errors
    /// [`RegistryError::UnknownAlgorithm`] if the name is not found.
    pub fn lookup(&self, name: &str) -> Result<&AlgorithmMeta, RegistryError> {
        self.entries
            .iter()
            .find(|e| e.meta.name == name)
            .map(|e| &e.meta)
            .ok_or_else(|| RegistryError::UnknownAlgorithm {
                name: name.to_string(),
            })
    }

    /// Produce a fresh instance by name.
    ///
    /// Each call invokes the factory anew: algorithms carry per-run state
    /// that must not leak across runs.
    ///
    /// # Errors
    /// [`RegistryError::UnknownAlgorithm`] if the name is not found.
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn Algorithm>, RegistryError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.meta.name == name)
            .ok_or_else(|| RegistryError::UnknownAlgorithm {
                name: name.to_string(),
            })?;
        Ok((entry.factory)())
    }

    /// Instantiate and verify the instance reports the registered name.
    ///
    /// # Errors
    /// - [`RegistryError::UnknownAlgorithm`] if the name is not found.
    /// - [`RegistryError::NameMismatch`] if the instance disagrees with
    ///   its registration.
    pub fn instantiate_verified(&self, name: &str) -> Result<Box<dyn Algorithm>, RegistryError> {
        let instance = self.instantiate(name)?;
        if instance.name() != name {
            return Err(RegistryError::NameMismatch {
                registered: name.to_string(),
                reported: instance.name().to_string(),
            });
        }
        Ok(instance)
    }

    /// Remove a registration; returns whether anything was removed.
    pub fn deregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.meta.name != name);
        self.entries.len() < before
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AlgorithmAbort, DataContext, InitContext, Resolution, Slice};

    struct Noop {
        name: &'static str,
    }

    impl Algorithm for Noop {
        fn name(&self) -> &'static str {
            self.name
        }

        fn initialize(&mut self, init: &mut InitContext) {
            init.set_start_date(2013, 10, 7);
            init.set_end_date(2013, 10, 11);
            init.add_equity("SPY", Resolution::Daily);
        }

        fn on_data(
            &mut self,
            _ctx: &mut DataContext<'_>,
            _slice: &Slice,
        ) -> Result<(), AlgorithmAbort> {
            Ok(())
        }
    }

    fn meta(name: &str) -> AlgorithmMeta {
        AlgorithmMeta::new(name, "1.0.0", "test algorithm")
    }

    fn factory(name: &'static str) -> impl Fn() -> Box<dyn Algorithm> + Send + Sync {
        move || Box::new(Noop { name })
    }

    #[test]
    fn register_and_list_in_insertion_order() {
        let mut reg = AlgorithmRegistry::new();
        reg.register(meta("alpha"), factory("alpha")).unwrap();
        reg.register(meta("beta"), factory("beta")).unwrap();

        let names: Vec<&str> = reg.list().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut reg = AlgorithmRegistry::new();
        reg.register(meta("alpha"), factory("alpha")).unwrap();
        let err = reg.register(meta("alpha"), factory("alpha"));
        assert_eq!(
            err,
            Err(RegistryError::DuplicateName {
                name: "alpha".to_string()
            })
        );
    }

    #[test]
    fn empty_name_rejected() {
        let mut reg = AlgorithmRegistry::new();
        let err = reg.register(meta("  "), factory("alpha"));
        assert_eq!(err, Err(RegistryError::EmptyName));
    }

    #[test]
    fn lookup_unknown_errors() {
        let reg = AlgorithmRegistry::new();
        assert_eq!(
            reg.lookup("ghost"),
            Err(RegistryError::UnknownAlgorithm {
                name: "ghost".to_string()
            })
        );
    }

    #[test]
    fn instantiate_produces_fresh_instance() {
        let mut reg = AlgorithmRegistry::new();
        reg.register(meta("alpha"), factory("alpha")).unwrap();
        let a = reg.instantiate("alpha").unwrap();
        assert_eq!(a.name(), "alpha");
    }

    #[test]
    fn instantiate_verified_catches_name_drift() {
        let mut reg = AlgorithmRegistry::new();
        // Registered under one name, but the factory builds an instance
        // reporting another.
        reg.register(meta("alpha"), factory("beta")).unwrap();

        let err = reg.instantiate_verified("alpha");
        assert!(matches!(
            err,
            Err(RegistryError::NameMismatch { registered, reported })
                if registered == "alpha" && reported == "beta"
        ));
    }

    #[test]
    fn deregister_removes_and_preserves_order() {
        let mut reg = AlgorithmRegistry::new();
        reg.register(meta("alpha"), factory("alpha")).unwrap();
        reg.register(meta("beta"), factory("beta")).unwrap();
        reg.register(meta("gamma"), factory("gamma")).unwrap();

        assert!(reg.deregister("beta"));
        assert!(!reg.deregister("beta"));

        let names: Vec<&str> = reg.list().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "gamma"]);
    }

    #[test]
    fn default_registry_is_empty() {
        let reg = AlgorithmRegistry::default();
        assert!(reg.is_empty());
    }
}
