//! Contract ABI Module
//!
//! Loads a contract artifact and encodes calls / decodes logs against it.
//! Author: arkSong (arksong2018@gmail.com)
//! Version: 0.1.0
//! Date: 2026-10-17

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};
use web3::{
    ethabi::{Contract as EthContract, RawLog, Token},
    types::{Address, Log},
};

use crate::{
    error::{DecodeError, Result, Web3Error},
    events::{DecodedEvent, InterfaceDecoder},
};

/// Bundled artifact of the concepts contract
const CONCEPTS_ARTIFACT: &str = include_str!("../abi/SolidityConcepts.json");

#[derive(Deserialize)]
struct Artifact {
    #[serde(default)]
    address: Option<Address>,
    abi: serde_json::Value,
}

/// ABI of one contract plus the address it was deployed at, if known
#[derive(Debug, Clone)]
pub struct ContractAbi {
    address: Option<Address>,
    contract: EthContract,
}

impl ContractAbi {
    /// The bundled concepts contract artifact
    pub fn concepts() -> Result<Self> {
        Self::from_artifact_json(CONCEPTS_ARTIFACT)
    }

    /// Parse an artifact of the form `{"address": "0x..", "abi": [..]}`
    #[instrument(level = "debug", skip(json))]
    pub fn from_artifact_json(json: &str) -> Result<Self> {
        let artifact: Artifact =
            serde_json::from_str(json).map_err(|e| Web3Error::Artifact(e.to_string()))?;
        let abi = serde_json::to_vec(&artifact.abi).map_err(|e| Web3Error::Artifact(e.to_string()))?;
        let contract = EthContract::load(abi.as_slice())?;
        debug!(
            "🔧 Loaded ABI with {} functions and {} events",
            contract.functions().count(),
            contract.events().count()
        );

        Ok(Self {
            address: artifact.address,
            contract,
        })
    }

    /// Read an artifact file from disk
    pub fn from_artifact_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Web3Error::Artifact(format!("{}: {e}", path.display())))?;
        Self::from_artifact_json(&json)
    }

    /// Override the deployment address
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Deployment address from the artifact or override
    pub fn address(&self) -> Option<Address> {
        self.address
    }

    /// Underlying ethabi contract
    pub fn contract(&self) -> &EthContract {
        &self.contract
    }

    /// ABI-encode a call to `method`
    pub fn encode_call(&self, method: &str, args: &[Token]) -> Result<Vec<u8>> {
        Ok(self.contract.function(method)?.encode_input(args)?)
    }

    /// Decode the raw return data of `method`
    pub fn decode_output(&self, method: &str, data: &[u8]) -> Result<Vec<Token>> {
        Ok(self.contract.function(method)?.decode_output(data)?)
    }
}

impl InterfaceDecoder for ContractAbi {
    fn decode_log(&self, log: &Log) -> std::result::Result<DecodedEvent, DecodeError> {
        let selector = *log.topics.first().ok_or(DecodeError::NoTopics)?;
        let event = self
            .contract
            .events()
            .find(|event| !event.anonymous && event.signature() == selector)
            .ok_or(DecodeError::UnknownSelector(selector))?;

        let parsed = event
            .parse_log(RawLog {
                topics: log.topics.clone(),
                data: log.data.0.clone(),
            })
            .map_err(|e| DecodeError::Malformed {
                event: event.name.clone(),
                reason: e.to_string(),
            })?;

        Ok(DecodedEvent {
            name: event.name.clone(),
            args: parsed.params.into_iter().map(|param| param.value).collect(),
        })
    }
}
