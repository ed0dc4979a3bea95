//! The process-wide parameter registry.
//!
//! Selection happens once at startup, before any other component runs;
//! afterwards the registry only hands out shared read-only references.
//! It is an explicitly constructed object, passed to consumers by
//! `Arc`, so unit tests can build independent registries instead of
//! sharing process globals.

use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use tracing::info;

use crate::{
    block::Height,
    zerocoin::{AccumulatorParameters, ModulusEncoding},
};

use super::{
    error::RegistryError,
    network::{Network, NetworkParameters},
};

/// The selected network profile and its derived caches.
struct ActiveNetwork {
    network: Network,
    params: RwLock<Arc<NetworkParameters>>,
    legacy_accumulator: OnceCell<Arc<AccumulatorParameters>>,
    current_accumulator: OnceCell<Arc<AccumulatorParameters>>,
}

impl ActiveNetwork {
    fn new(network: Network) -> Result<ActiveNetwork, RegistryError> {
        let params = NetworkParameters::new(network)?;
        Ok(ActiveNetwork {
            network,
            params: RwLock::new(Arc::new(params)),
            legacy_accumulator: OnceCell::new(),
            current_accumulator: OnceCell::new(),
        })
    }
}

/// Owns the active [`NetworkParameters`] for the life of the process.
///
/// # Ordering
///
/// [`select_network`](Self::select_network) must complete before any
/// reader calls [`params`](Self::params); readers then need no further
/// synchronization, since the record is immutable (the unit-test
/// profile's setters are the one sanctioned exception).
#[derive(Default)]
pub struct ParameterRegistry {
    active: RwLock<Option<ActiveNetwork>>,
}

impl ParameterRegistry {
    /// Create a registry with no selected network.
    pub fn new() -> ParameterRegistry {
        Self::default()
    }

    /// Create a registry and immediately select `network`.
    pub fn for_network(network: Network) -> Result<Arc<ParameterRegistry>, RegistryError> {
        let registry = Arc::new(ParameterRegistry::new());
        registry.select_network(network)?;
        Ok(registry)
    }

    /// Build and install the parameter record for `network`.
    ///
    /// Re-selecting the already active network is a no-op. Selecting a
    /// different network fails, unless the active profile is the
    /// unit-test one, which test harnesses may switch away from.
    pub fn select_network(&self, network: Network) -> Result<(), RegistryError> {
        let mut active = self
            .active
            .write()
            .expect("registry lock is never poisoned");

        match active.as_ref() {
            Some(current) if current.network == network => return Ok(()),
            Some(current) if current.network != Network::UnitTest => {
                return Err(RegistryError::AlreadySelected {
                    active: current.network,
                    requested: network,
                });
            }
            _ => {}
        }

        // Building the record runs the genesis assertions.
        *active = Some(ActiveNetwork::new(network)?);
        info!(%network, "selected network parameters");

        Ok(())
    }

    /// The active network, if one has been selected.
    pub fn network(&self) -> Option<Network> {
        self.active
            .read()
            .expect("registry lock is never poisoned")
            .as_ref()
            .map(|active| active.network)
    }

    /// The active parameter record.
    ///
    /// # Panics
    ///
    /// If no network has been selected. Selection is a startup
    /// precondition for every consumer of this registry.
    pub fn params(&self) -> Arc<NetworkParameters> {
        self.active
            .read()
            .expect("registry lock is never poisoned")
            .as_ref()
            .map(|active| {
                active
                    .params
                    .read()
                    .expect("params lock is never poisoned")
                    .clone()
            })
            .expect("network must be selected before parameters are read")
    }

    /// The cached accumulator parameters for the active profile,
    /// constructed from its modulus literal on first use.
    ///
    /// # Panics
    ///
    /// If no network has been selected.
    pub fn accumulator_params(
        &self,
        encoding: ModulusEncoding,
    ) -> Result<Arc<AccumulatorParameters>, RegistryError> {
        let active = self.active.read().expect("registry lock is never poisoned");
        let active = active
            .as_ref()
            .expect("network must be selected before accumulator parameters are read");

        let cache = match encoding {
            ModulusEncoding::Legacy => &active.legacy_accumulator,
            ModulusEncoding::Current => &active.current_accumulator,
        };

        let built = cache.get_or_try_init(|| {
            let params = active.params.read().expect("params lock is never poisoned");
            AccumulatorParameters::from_modulus_literal(
                params.zerocoin_modulus,
                encoding,
                params.default_security_level,
            )
            .map(Arc::new)
        })?;

        Ok(built.clone())
    }

    /// Override the subsidy halving height. Unit-test profile only.
    pub fn set_subsidy_halving_height(&self, height: Height) -> Result<(), RegistryError> {
        self.update_params(|params| params.subsidy_halving_height = height)
    }

    /// Override the default consistency-check flag. Unit-test profile only.
    pub fn set_default_consistency_checks(&self, enabled: bool) -> Result<(), RegistryError> {
        self.update_params(|params| params.default_consistency_checks = enabled)
    }

    /// Override the minimum-difficulty flag. Unit-test profile only.
    pub fn set_allow_min_difficulty_blocks(&self, enabled: bool) -> Result<(), RegistryError> {
        self.update_params(|params| params.allow_min_difficulty_blocks = enabled)
    }

    /// Override the proof-of-work-skip flag. Unit-test profile only.
    pub fn set_skip_pow_check(&self, enabled: bool) -> Result<(), RegistryError> {
        self.update_params(|params| params.skip_pow_check = enabled)
    }

    /// Apply a field override to the active unit-test parameters.
    ///
    /// Production profiles are immutable: calling this on any network
    /// other than [`Network::UnitTest`] fails, so no production code
    /// path can reach a mutated record.
    fn update_params(
        &self,
        f: impl FnOnce(&mut NetworkParameters),
    ) -> Result<(), RegistryError> {
        let active = self.active.read().expect("registry lock is never poisoned");
        let active = active
            .as_ref()
            .expect("network must be selected before parameters are adjusted");

        if active.network != Network::UnitTest {
            return Err(RegistryError::NotUnitTest(active.network));
        }

        let mut slot = active.params.write().expect("params lock is never poisoned");
        let mut params = (**slot).clone();
        f(&mut params);
        *slot = Arc::new(params);

        Ok(())
    }
}
