//! Smart Contract Interaction Module
//!
//! Executes read and write calls against one deployed contract.
//! Author: arkSong (arksong2018@gmail.com)
//! Version: 0.1.0
//! Date: 2026-10-17

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use txmediator_common::Config;
use web3::{
    ethabi::Token,
    types::{Address, Bytes, CallRequest, TransactionReceipt, U256},
};

use crate::{
    abi::ContractAbi,
    client::{ChainClient, Submission, Web3ChainClient},
    error::{Result, Web3Error},
    events::{find_event, DecodedEvent},
    pending::{ConfirmationPolicy, PendingTransaction, WriteState},
    wallet::Signer,
};

/// Whether a call changes contract state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// Answered by `eth_call`, never mined
    Read,
    /// Signed, broadcast and confirmed
    Write,
}

/// What a call is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget<'a> {
    /// A named ABI function
    Method(&'a str),
    /// The contract account itself, with no calldata
    Account,
}

/// Description of one contract call
#[derive(Debug, Clone, PartialEq)]
pub struct CallSpec<'a> {
    /// Function or bare account
    pub target: CallTarget<'a>,
    /// Positional arguments
    pub args: Vec<Token>,
    /// Read or write
    pub mutability: Mutability,
    /// Attached native currency in wei
    pub value: Option<U256>,
    /// Event whose arguments are the result of a write
    pub target_event: Option<&'a str>,
}

impl<'a> CallSpec<'a> {
    /// A read-only call of `method`
    pub fn read(method: &'a str, args: Vec<Token>) -> Self {
        Self {
            target: CallTarget::Method(method),
            args,
            mutability: Mutability::Read,
            value: None,
            target_event: None,
        }
    }

    /// A state-changing call of `method`
    pub fn write(method: &'a str, args: Vec<Token>) -> Self {
        Self {
            mutability: Mutability::Write,
            ..Self::read(method, args)
        }
    }

    /// A bare value transfer to the contract account
    pub fn transfer(value: U256) -> Self {
        Self {
            target: CallTarget::Account,
            args: Vec::new(),
            mutability: Mutability::Write,
            value: Some(value),
            target_event: None,
        }
    }

    /// Attach native currency to the call
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Return the arguments of this event instead of the receipt
    pub fn expecting_event(mut self, event: &'a str) -> Self {
        self.target_event = Some(event);
        self
    }

    fn label(&self) -> &'a str {
        match self.target {
            CallTarget::Method(method) => method,
            CallTarget::Account => "<transfer>",
        }
    }
}

/// Result of [`ContractClient::execute`]
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// Decoded return values of a read
    Returned(Vec<Token>),
    /// Receipt of a confirmed write
    Receipt(Box<TransactionReceipt>),
    /// Event extracted from a confirmed write
    Event(DecodedEvent),
}

/// Client bound to one deployed contract
#[derive(Debug)]
pub struct ContractClient<C: ChainClient + ?Sized = Web3ChainClient> {
    chain: Arc<C>,
    abi: Arc<ContractAbi>,
    address: Address,
    policy: ConfirmationPolicy,
}

impl<C: ChainClient + ?Sized> Clone for ContractClient<C> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
            abi: Arc::clone(&self.abi),
            address: self.address,
            policy: self.policy.clone(),
        }
    }
}

impl ContractClient<Web3ChainClient> {
    /// Build a client from validated configuration
    #[instrument(level = "debug")]
    pub fn connect(config: &Config) -> Result<Self> {
        info!("🔧 Initializing ContractClient");
        let signer = Signer::from_hex(&config.private_key)?;
        let chain = Web3ChainClient::connect(&config.rpc_url, signer)?
            .with_chain_id(config.chain_id)
            .with_gas_limit(config.gas_limit);

        let mut abi = match &config.artifact_path {
            Some(path) => ContractAbi::from_artifact_file(path)?,
            None => ContractAbi::concepts()?,
        };
        if let Some(address) = &config.contract_address {
            abi = abi.with_address(parse_address(address)?);
        }

        Self::new(Arc::new(chain), abi, ConfirmationPolicy::from(config))
    }
}

impl<C: ChainClient + ?Sized> ContractClient<C> {
    /// Create a client; the ABI must carry a deployment address
    pub fn new(chain: Arc<C>, abi: ContractAbi, policy: ConfirmationPolicy) -> Result<Self> {
        let address = abi
            .address()
            .ok_or_else(|| Web3Error::Artifact("artifact has no contract address".to_string()))?;

        Ok(Self {
            chain,
            abi: Arc::new(abi),
            address,
            policy,
        })
    }

    /// Contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Contract ABI
    pub fn abi(&self) -> &ContractAbi {
        &self.abi
    }

    /// Underlying chain client
    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Confirmation policy applied to writes
    pub fn policy(&self) -> &ConfirmationPolicy {
        &self.policy
    }

    /// Run one call as described by `spec`
    #[instrument(level = "debug", skip(self, spec), fields(call = spec.label()))]
    pub async fn execute(&self, spec: CallSpec<'_>) -> Result<CallOutcome> {
        let data = match spec.target {
            CallTarget::Method(method) => self.abi.encode_call(method, &spec.args)?,
            CallTarget::Account => Vec::new(),
        };

        match spec.mutability {
            Mutability::Read => self.execute_read(&spec, data).await,
            Mutability::Write => self.execute_write(&spec, data).await,
        }
    }

    async fn execute_read(&self, spec: &CallSpec<'_>, data: Vec<u8>) -> Result<CallOutcome> {
        let request = CallRequest {
            from: Some(self.chain.sender()),
            to: Some(self.address),
            value: spec.value,
            data: Some(Bytes(data)),
            ..Default::default()
        };

        let output = self.chain.call(request).await?;
        let tokens = match spec.target {
            CallTarget::Method(method) => self.abi.decode_output(method, &output.0)?,
            CallTarget::Account => vec![Token::Bytes(output.0)],
        };
        debug!("📖 {} returned {} values", spec.label(), tokens.len());
        Ok(CallOutcome::Returned(tokens))
    }

    async fn execute_write(&self, spec: &CallSpec<'_>, data: Vec<u8>) -> Result<CallOutcome> {
        debug!(state = %WriteState::Building, "📝 Preparing {}", spec.label());
        let pending = self
            .submit(Submission {
                to: self.address,
                data,
                value: spec.value.unwrap_or_default(),
            })
            .await?;

        let tx_hash = pending.tx_hash();
        info!(state = %WriteState::Submitted, "📤 {} submitted as {:?}", spec.label(), tx_hash);

        let receipt = pending.confirm().await.map_err(|err| {
            warn!(state = %err.state(), "❌ {} failed: {}", spec.label(), err);
            err
        })?;
        info!(
            state = %WriteState::Confirmed,
            "✅ {:?} confirmed in block {:?}", tx_hash, receipt.block_number
        );

        match spec.target_event {
            Some(event) => find_event(self.abi.as_ref(), &receipt.logs, event)
                .map(CallOutcome::Event)
                .ok_or_else(|| Web3Error::EventNotFound {
                    event: event.to_string(),
                    tx_hash,
                    logs: receipt.logs.len(),
                }),
            None => Ok(CallOutcome::Receipt(Box::new(receipt))),
        }
    }

    /// Broadcast a transaction and hand back its pending handle
    pub async fn submit(&self, submission: Submission) -> Result<PendingTransaction<'_, C>> {
        let tx_hash = self.chain.submit(submission).await?;
        Ok(PendingTransaction::new(tx_hash, self.chain.as_ref(), &self.policy))
    }
}

/// Parse a hex account address, with or without `0x`
pub fn parse_address(value: &str) -> Result<Address> {
    let digits = value.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    if digits.len() != 40 {
        return Err(Web3Error::Artifact(format!("invalid address {value:?}")));
    }
    digits
        .parse::<Address>()
        .map_err(|e| Web3Error::Artifact(format!("invalid address {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_call_spec_builders() {
        let spec = CallSpec::read("value", vec![]);
        assert_eq!(spec.mutability, Mutability::Read);
        assert_eq!(spec.target, CallTarget::Method("value"));
        assert_eq!(spec.value, None);

        let spec = CallSpec::write("updateValue", vec![Token::Uint(U256::from(5u64))])
            .expecting_event("ValueChanged");
        assert_eq!(spec.mutability, Mutability::Write);
        assert_eq!(spec.target_event, Some("ValueChanged"));

        let spec = CallSpec::write("sendEther", vec![]).with_value(U256::from(10u64));
        assert_eq!(spec.value, Some(U256::from(10u64)));

        let spec = CallSpec::transfer(U256::from(7u64));
        assert_eq!(spec.target, CallTarget::Account);
        assert_eq!(spec.mutability, Mutability::Write);
        assert!(spec.args.is_empty());
        assert_eq!(spec.label(), "<transfer>");
    }

    #[test]
    fn test_parse_address() {
        let expected = Address::repeat_byte(0xab);
        assert_eq!(parse_address(&format!("0x{}", "ab".repeat(20))).unwrap(), expected);
        assert_eq!(parse_address(&"AB".repeat(20)).unwrap(), expected);
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address(&"zz".repeat(20)).is_err());
    }

    #[test]
    fn test_connect_from_config() {
        let config = Config {
            rpc_url: "http://localhost:8545".to_string(),
            private_key: "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .to_string(),
            contract_address: Some(format!("0x{}", "11".repeat(20))),
            artifact_path: None,
            chain_id: Some(31337),
            gas_limit: None,
            confirmations: 2,
            poll_interval: std::time::Duration::from_millis(10),
            confirmation_timeout: None,
        };

        let client = ContractClient::<Web3ChainClient>::connect(&config).unwrap();
        assert_eq!(client.address(), Address::repeat_byte(0x11));
        assert_eq!(client.policy().confirmations, 2);
    }

    #[test]
    fn test_connect_rejects_bad_key() {
        let config = Config {
            rpc_url: "http://localhost:8545".to_string(),
            private_key: "0x1234".to_string(),
            contract_address: None,
            artifact_path: None,
            chain_id: None,
            gas_limit: None,
            confirmations: 1,
            poll_interval: std::time::Duration::from_millis(10),
            confirmation_timeout: None,
        };

        assert!(matches!(
            ContractClient::<Web3ChainClient>::connect(&config),
            Err(Web3Error::Wallet(_))
        ));
    }
}
