//! Concepts Contract Operations
//!
//! Typed wrappers over [`ContractClient::execute`] for the concepts
//! contract: each operation is one [`CallSpec`] plus a projection of the
//! outcome.

use serde::Serialize;
use tracing::instrument;
use txmediator_units::{format_ether, parse_ether};
use web3::{
    ethabi::Token,
    types::{Address, TransactionReceipt, U256},
};

use crate::{
    client::ChainClient,
    contracts::{CallOutcome, CallSpec, ContractClient},
    error::{Result, Web3Error},
};

/// Event emitted by `updateValue`
pub const VALUE_CHANGED: &str = "ValueChanged";

/// Stored value before and after `updateValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueChange {
    /// Argument 0 of `ValueChanged`
    pub old_value: U256,
    /// Argument 1 of `ValueChanged`
    pub new_value: U256,
}

impl<C: ChainClient + ?Sized> ContractClient<C> {
    /// `owner()`
    #[instrument(level = "debug", skip(self))]
    pub async fn owner(&self) -> Result<Address> {
        let token = self.read_one("owner", vec![]).await?;
        token
            .into_address()
            .ok_or_else(|| unexpected("owner", "expected an address"))
    }

    /// `FIXED_VALUE()`
    #[instrument(level = "debug", skip(self))]
    pub async fn fixed_value(&self) -> Result<U256> {
        self.read_uint("FIXED_VALUE", vec![]).await
    }

    /// `value()`
    #[instrument(level = "debug", skip(self))]
    pub async fn value(&self) -> Result<U256> {
        self.read_uint("value", vec![]).await
    }

    /// `checkValue(uint256)`
    #[instrument(level = "debug", skip(self))]
    pub async fn check_value(&self, value: U256) -> Result<String> {
        self.read_string("checkValue", vec![Token::Uint(value)]).await
    }

    /// `sumUpTo(uint256)`
    #[instrument(level = "debug", skip(self))]
    pub async fn sum_up_to(&self, limit: U256) -> Result<U256> {
        self.read_uint("sumUpTo", vec![Token::Uint(limit)]).await
    }

    /// `ownerFunction()`, reverts unless the signer is the owner
    #[instrument(level = "debug", skip(self))]
    pub async fn owner_function(&self) -> Result<String> {
        self.read_string("ownerFunction", vec![]).await
    }

    /// `getContractBalance()` formatted in ether
    #[instrument(level = "debug", skip(self))]
    pub async fn contract_balance(&self) -> Result<String> {
        let wei = self.read_uint("getContractBalance", vec![]).await?;
        Ok(format_ether(wei))
    }

    /// `updateValue(uint256)`, answered from its `ValueChanged` event
    #[instrument(level = "debug", skip(self))]
    pub async fn update_value(&self, value: U256) -> Result<ValueChange> {
        let spec = CallSpec::write("updateValue", vec![Token::Uint(value)])
            .expecting_event(VALUE_CHANGED);

        let event = match self.execute(spec).await? {
            CallOutcome::Event(event) => event,
            other => return Err(unexpected(VALUE_CHANGED, &format!("got {other:?}"))),
        };

        let arg = |index: usize| {
            event
                .arg(index)
                .cloned()
                .and_then(Token::into_uint)
                .ok_or_else(|| unexpected(VALUE_CHANGED, &format!("argument {index} is not a uint")))
        };

        Ok(ValueChange {
            old_value: arg(0)?,
            new_value: arg(1)?,
        })
    }

    /// `sendEther(address)` with `amount` ether attached
    #[instrument(level = "debug", skip(self))]
    pub async fn send_ether(&self, to: Address, amount: &str) -> Result<TransactionReceipt> {
        let wei = parse_ether(amount)?;
        let spec = CallSpec::write("sendEther", vec![Token::Address(to)]).with_value(wei);
        self.write_receipt(spec).await
    }

    /// `withDraw()`
    #[instrument(level = "debug", skip(self))]
    pub async fn withdraw(&self) -> Result<TransactionReceipt> {
        self.write_receipt(CallSpec::write("withDraw", vec![])).await
    }

    /// Send `amount` ether straight to the contract account
    #[instrument(level = "debug", skip(self))]
    pub async fn deposit(&self, amount: &str) -> Result<TransactionReceipt> {
        let wei = parse_ether(amount)?;
        self.write_receipt(CallSpec::transfer(wei)).await
    }

    async fn read_one(&self, method: &str, args: Vec<Token>) -> Result<Token> {
        match self.execute(CallSpec::read(method, args)).await? {
            CallOutcome::Returned(tokens) => tokens
                .into_iter()
                .next()
                .ok_or_else(|| unexpected(method, "no return value")),
            other => Err(unexpected(method, &format!("got {other:?}"))),
        }
    }

    async fn read_uint(&self, method: &str, args: Vec<Token>) -> Result<U256> {
        self.read_one(method, args)
            .await?
            .into_uint()
            .ok_or_else(|| unexpected(method, "expected a uint"))
    }

    async fn read_string(&self, method: &str, args: Vec<Token>) -> Result<String> {
        self.read_one(method, args)
            .await?
            .into_string()
            .ok_or_else(|| unexpected(method, "expected a string"))
    }

    async fn write_receipt(&self, spec: CallSpec<'_>) -> Result<TransactionReceipt> {
        let label = format!("{:?}", spec.target);
        match self.execute(spec).await? {
            CallOutcome::Receipt(receipt) => Ok(*receipt),
            other => Err(unexpected(&label, &format!("got {other:?}"))),
        }
    }
}

fn unexpected(method: &str, reason: &str) -> Web3Error {
    Web3Error::UnexpectedOutput {
        method: method.to_string(),
        reason: reason.to_string(),
    }
}
