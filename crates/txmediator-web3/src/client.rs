//! Chain Client Module
//!
//! The boundary between the contract client and the node: read calls,
//! signed submissions and receipt polling.
//! Author: arkSong (arksong2018@gmail.com)
//! Version: 0.1.0
//! Date: 2026-10-17

use async_trait::async_trait;
use tracing::{debug, info, instrument};
use web3::{
    transports::Http,
    types::{Address, Bytes, CallRequest, TransactionParameters, TransactionReceipt, H256, U256, U64},
    Web3,
};

use crate::{
    error::{Result, Web3Error},
    wallet::Signer,
};

/// A value-carrying transaction ready to be signed and broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Recipient account
    pub to: Address,
    /// Calldata, empty for a bare value transfer
    pub data: Vec<u8>,
    /// Attached native currency in wei
    pub value: U256,
}

/// Node access needed by the contract client
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Account that signs submissions and is used as `from` in calls
    fn sender(&self) -> Address;

    /// Execute a read-only call and return the raw output.
    ///
    /// Fails with [`Web3Error::Revert`] when the node reports an execution
    /// revert and [`Web3Error::Rpc`] for anything else.
    async fn call(&self, request: CallRequest) -> Result<Bytes>;

    /// Sign and broadcast a transaction, returning its hash.
    ///
    /// Any failure is a [`Web3Error::Submission`].
    async fn submit(&self, submission: Submission) -> Result<H256>;

    /// Fetch the receipt of a transaction, `None` while it is pending
    async fn transaction_receipt(&self, tx_hash: H256)
        -> std::result::Result<Option<TransactionReceipt>, web3::Error>;

    /// Current head block number
    async fn block_number(&self) -> std::result::Result<U64, web3::Error>;
}

/// Chain client over the `web3` HTTP transport with local signing
#[derive(Clone, Debug)]
pub struct Web3ChainClient {
    web3: Web3<Http>,
    signer: Signer,
    chain_id: Option<u64>,
    gas_limit: Option<U256>,
}

impl Web3ChainClient {
    /// Connect to a JSON-RPC endpoint
    #[instrument(level = "debug", skip(signer))]
    pub fn connect(rpc_url: &str, signer: Signer) -> Result<Self> {
        info!("🔧 Initializing Web3ChainClient for {}", rpc_url);
        let transport = Http::new(rpc_url).map_err(Web3Error::Rpc)?;
        Ok(Self::new(Web3::new(transport), signer))
    }

    /// Wrap an existing `web3` instance
    pub fn new(web3: Web3<Http>, signer: Signer) -> Self {
        Self {
            web3,
            signer,
            chain_id: None,
            gas_limit: None,
        }
    }

    /// Sign for a fixed chain id instead of asking the node
    pub fn with_chain_id(mut self, chain_id: Option<u64>) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Attach a fixed gas limit to every submission
    pub fn with_gas_limit(mut self, gas_limit: Option<u64>) -> Self {
        self.gas_limit = gas_limit.map(U256::from);
        self
    }
}

#[async_trait]
impl ChainClient for Web3ChainClient {
    fn sender(&self) -> Address {
        self.signer.address()
    }

    async fn call(&self, request: CallRequest) -> Result<Bytes> {
        self.web3
            .eth()
            .call(request, None)
            .await
            .map_err(classify_call_error)
    }

    async fn submit(&self, submission: Submission) -> Result<H256> {
        let mut params = TransactionParameters {
            to: Some(submission.to),
            value: submission.value,
            data: Bytes(submission.data),
            chain_id: self.chain_id,
            ..Default::default()
        };
        if let Some(gas) = self.gas_limit {
            params.gas = gas;
        }

        let signed = self
            .web3
            .accounts()
            .sign_transaction(params, self.signer.secret_key())
            .await
            .map_err(Web3Error::Submission)?;
        debug!("✍️ Signed transaction {:?}", signed.transaction_hash);

        self.web3
            .eth()
            .send_raw_transaction(signed.raw_transaction)
            .await
            .map_err(Web3Error::Submission)
    }

    async fn transaction_receipt(
        &self,
        tx_hash: H256,
    ) -> std::result::Result<Option<TransactionReceipt>, web3::Error> {
        self.web3.eth().transaction_receipt(tx_hash).await
    }

    async fn block_number(&self) -> std::result::Result<U64, web3::Error> {
        self.web3.eth().block_number().await
    }
}

/// Split read failures into reverts and transport errors
fn classify_call_error(err: web3::Error) -> Web3Error {
    match err {
        web3::Error::Rpc(ref rpc) if rpc.message.to_ascii_lowercase().contains("revert") => {
            Web3Error::Revert(rpc.message.clone())
        }
        other => Web3Error::Rpc(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_client_creation() {
        let signer = Signer::from_hex(DEV_KEY).unwrap();
        let expected = signer.address();
        let client = Web3ChainClient::connect("http://localhost:8545", signer)
            .unwrap()
            .with_chain_id(Some(31337))
            .with_gas_limit(Some(200_000));

        assert_eq!(client.sender(), expected);
        assert_eq!(client.chain_id, Some(31337));
        assert_eq!(client.gas_limit, Some(U256::from(200_000)));
    }

    #[test]
    fn test_transport_errors_are_not_reverts() {
        let err = classify_call_error(web3::Error::Unreachable);
        assert!(matches!(err, Web3Error::Rpc(web3::Error::Unreachable)));
    }
}
