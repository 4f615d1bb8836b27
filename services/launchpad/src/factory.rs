//! Deterministic factory
//!
//! Predicts the address an instance will receive before it exists, deploys
//! it through the ledger and refuses any deployment that lands elsewhere.

use crate::error::{LaunchpadError, LaunchpadResult};
use launch_types::{Address, H256, U256};
use ledger::{create2, Ledger};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DeterministicFactory {
    deployer: Address,
    creation_code: Vec<u8>,
}

impl DeterministicFactory {
    /// Factory deploying from `deployer` with the canonical proxy template
    pub fn new(deployer: Address) -> Self {
        Self::with_creation_code(deployer, create2::BEACON_PROXY_CREATION_CODE.to_vec())
    }

    pub fn with_creation_code(deployer: Address, creation_code: Vec<u8>) -> Self {
        Self {
            deployer,
            creation_code,
        }
    }

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    /// Address of the proxy for `family_pointer`, `salt` and `init_data`
    pub fn predict(&self, family_pointer: Address, salt: H256, init_data: &[u8]) -> Address {
        let init_code = create2::init_code(&self.creation_code, family_pointer, init_data);
        create2::create2_address(self.deployer, salt, &init_code)
    }

    /// Deploy and check the result against the prediction
    pub fn deploy_and_verify(
        &self,
        ledger: &mut Ledger,
        family_pointer: Address,
        salt: H256,
        init_data: &[u8],
        value: U256,
    ) -> LaunchpadResult<Address> {
        let predicted = self.predict(family_pointer, salt, init_data);
        let deployed = ledger.create2(self.deployer, salt, family_pointer, init_data, value)?;
        if deployed != predicted {
            return Err(LaunchpadError::DeployTokenError {
                predicted,
                deployed,
            });
        }
        debug!("Deployment verified at {:?}", deployed);
        Ok(deployed)
    }
}
