//! Shared test utilities: an in-memory chain client and receipt builders.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use txmediator_web3::{
    prelude::*, ChainClient, ConfirmationPolicy, ContractAbi, Submission,
};

/// Hash returned for every accepted submission
pub fn tx_hash() -> H256 {
    H256::repeat_byte(0x77)
}

/// Block the mocked receipt is mined in
pub const MINED_IN: u64 = 16;

/// Everything the contract client asked of the chain, in order
#[derive(Debug, Clone, PartialEq)]
pub enum ChainCall {
    Call(CallRequest),
    Submit(Submission),
    ReceiptPoll(H256),
    BlockNumber,
}

/// Scriptable chain client
pub struct MockChain {
    sender: Address,
    calls: Mutex<Vec<ChainCall>>,
    call_results: Mutex<VecDeque<Result<Vec<u8>>>>,
    submit_error: Mutex<Option<Web3Error>>,
    receipt: Mutex<Option<TransactionReceipt>>,
    pending_polls: AtomicUsize,
    head: Mutex<u64>,
}

impl MockChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sender: Address::repeat_byte(0x5e),
            calls: Mutex::new(Vec::new()),
            call_results: Mutex::new(VecDeque::new()),
            submit_error: Mutex::new(None),
            receipt: Mutex::new(None),
            pending_polls: AtomicUsize::new(0),
            head: Mutex::new(MINED_IN),
        })
    }

    /// Queue the raw output of the next read call
    pub fn push_call_output(&self, tokens: &[Token]) {
        self.call_results
            .lock()
            .unwrap()
            .push_back(Ok(web3::ethabi::encode(tokens)));
    }

    /// Queue a failure for the next read call
    pub fn push_call_error(&self, err: Web3Error) {
        self.call_results.lock().unwrap().push_back(Err(err));
    }

    /// Make the next submission fail
    pub fn reject_submission(&self, err: Web3Error) {
        *self.submit_error.lock().unwrap() = Some(err);
    }

    /// Receipt returned once the pending polls are used up
    pub fn set_receipt(&self, receipt: TransactionReceipt) {
        *self.receipt.lock().unwrap() = Some(receipt);
    }

    /// Number of polls answered with "still pending"
    pub fn set_pending_polls(&self, polls: usize) {
        self.pending_polls.store(polls, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<ChainCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ChainCall::Submit(submission) => Some(submission),
                _ => None,
            })
            .collect()
    }

    pub fn receipt_polls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ChainCall::ReceiptPoll(_)))
            .count()
    }

    fn record(&self, call: ChainCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn call(&self, request: CallRequest) -> Result<Bytes> {
        self.record(ChainCall::Call(request));
        let next = self
            .call_results
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected read call");
        next.map(Bytes)
    }

    async fn submit(&self, submission: Submission) -> Result<H256> {
        self.record(ChainCall::Submit(submission));
        match self.submit_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(tx_hash()),
        }
    }

    async fn transaction_receipt(
        &self,
        tx_hash: H256,
    ) -> std::result::Result<Option<TransactionReceipt>, web3::Error> {
        self.record(ChainCall::ReceiptPoll(tx_hash));
        let still_pending = self
            .pending_polls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if still_pending {
            return Ok(None);
        }
        Ok(self.receipt.lock().unwrap().clone())
    }

    async fn block_number(&self) -> std::result::Result<U64, web3::Error> {
        self.record(ChainCall::BlockNumber);
        let mut head = self.head.lock().unwrap();
        let current = *head;
        *head += 1;
        Ok(U64::from(current))
    }
}

/// Policy with short waits suitable for tests
pub fn fast_policy() -> ConfirmationPolicy {
    ConfirmationPolicy {
        confirmations: 1,
        poll_interval: Duration::from_millis(1),
        timeout: Some(Duration::from_secs(5)),
    }
}

pub fn concepts_abi() -> ContractAbi {
    ContractAbi::concepts().expect("bundled artifact")
}

pub fn client(chain: &Arc<MockChain>, policy: ConfirmationPolicy) -> ContractClient<MockChain> {
    ContractClient::new(Arc::clone(chain), concepts_abi(), policy).expect("client")
}

pub fn log_entry(address: Address, topics: Vec<H256>, data: Vec<u8>) -> Log {
    serde_json::from_value(serde_json::json!({
        "address": address,
        "topics": topics,
        "data": Bytes(data),
        "transactionHash": tx_hash(),
    }))
    .expect("log json")
}

/// A `ValueChanged(old, new)` log from the concepts contract
pub fn value_changed_log(old: u64, new: u64) -> Log {
    let abi = concepts_abi();
    let topic = abi
        .contract()
        .event("ValueChanged")
        .expect("event in abi")
        .signature();
    let data = web3::ethabi::encode(&[Token::Uint(U256::from(old)), Token::Uint(U256::from(new))]);
    log_entry(abi.address().expect("address"), vec![topic], data)
}

/// A log from some other contract, e.g. an ERC-20 `Transfer`
pub fn foreign_log() -> Log {
    log_entry(
        Address::repeat_byte(0xee),
        vec![H256::repeat_byte(0xdd), H256::repeat_byte(0x01), H256::repeat_byte(0x02)],
        web3::ethabi::encode(&[Token::Uint(U256::from(1_000u64))]),
    )
}

pub fn receipt(status: u64, logs: Vec<Log>) -> TransactionReceipt {
    serde_json::from_value(serde_json::json!({
        "transactionHash": tx_hash(),
        "transactionIndex": "0x0",
        "blockHash": H256::repeat_byte(0xbb),
        "blockNumber": U64::from(MINED_IN),
        "from": Address::repeat_byte(0x5e),
        "to": concepts_abi().address(),
        "cumulativeGasUsed": U256::from(21_000u64),
        "gasUsed": U256::from(21_000u64),
        "contractAddress": null,
        "logs": logs,
        "status": U64::from(status),
        "logsBloom": H2048::zero(),
        "type": U64::from(2u64),
        "effectiveGasPrice": U256::from(1_000_000_000u64),
    }))
    .expect("receipt json")
}
