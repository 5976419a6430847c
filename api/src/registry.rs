//! A named collection of contracts.
//!
//! A [`Registry`] is the catalog a definitions module hands out: every
//! contract keyed by its [`OperationId`], checked once when the registry
//! is built so that [`Registry::operation`] can only fail on a name that
//! was never registered.

use std::collections::BTreeMap;

use tracing::debug;

use crate::contract::Contract;
use crate::error::ConfigError;
use crate::operation::{check_contract, generate, Operation};
use crate::operation_id::OperationId;
use crate::transport::Transport;

/// An immutable, validated set of contracts.
///
/// ## Examples
///
/// ```rust
/// use vault_api::{Contract, Registry, RestMethod};
///
/// let registry = Registry::builder()
///     .register(
///         Contract::builder()
///             .id("lookup_self")
///             .method(RestMethod::Get)
///             .path("/auth/token/lookup-self")
///             .build(),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.len(), 1);
/// assert!(registry.get("lookup_self").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    contracts: BTreeMap<OperationId, Contract>,
}

impl Registry {
    /// Starts an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Looks up a contract by operation name.
    pub fn get(&self, name: &str) -> Option<&Contract> {
        self.contracts.get(name)
    }

    /// Looks up a contract by operation name.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownOperation`] if nothing is registered
    /// under `name`.
    pub fn contract(&self, name: &str) -> Result<&Contract, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::UnknownOperation {
            name: name.to_string(),
        })
    }

    /// Generates the named operation against `transport`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownOperation`] if nothing is registered
    /// under `name`.
    pub fn operation<'a, T: Transport>(
        &'a self,
        name: &str,
        transport: &'a T,
    ) -> Result<Operation<'a, T>, ConfigError> {
        generate(self.contract(name)?, transport)
    }

    /// Operation names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(OperationId::as_str)
    }

    /// All contracts, sorted by operation name.
    pub fn iter(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.values()
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns `true` when no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Collects contracts for a [`Registry`].
///
/// Errors are deferred to [`build`](Self::build) so registrations chain.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    contracts: Vec<Contract>,
}

impl RegistryBuilder {
    /// Adds a contract.
    pub fn register(mut self, contract: Contract) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Adds several contracts.
    pub fn register_all(mut self, contracts: impl IntoIterator<Item = Contract>) -> Self {
        self.contracts.extend(contracts);
        self
    }

    /// Validates every contract and freezes the registry.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidOperationId`] for a malformed id
    /// - [`ConfigError::DuplicateOperation`] for an id registered twice
    /// - any generation-time defect of a contract (bad template, placeholder
    ///   and path schema mismatch)
    pub fn build(self) -> Result<Registry, ConfigError> {
        let mut contracts = BTreeMap::new();
        for contract in self.contracts {
            let id = OperationId::new(contract.id())?;
            check_contract(&contract)?;
            if contracts.contains_key(&id) {
                return Err(ConfigError::DuplicateOperation { id: id.into() });
            }
            contracts.insert(id, contract);
        }
        debug!(operations = contracts.len(), "Built operation registry");
        Ok(Registry { contracts })
    }
}
