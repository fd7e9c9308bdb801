// =============================================================================
// Txmediator - Command Dispatch
// =============================================================================
//
// Project: Txmediator - Transaction mediation client
// Author: arkSong (arksong2018@gmail.com)
// Date: 2026-10-17
// Version: 0.1.0
// License: Apache 2.0 / MIT
//
// Description:
//   Runs a parsed subcommand and renders its result as JSON on stdout.
//   Integers are printed as decimal strings so 256-bit values survive
//   JSON consumers that only know doubles.
//
// =============================================================================

use anyhow::{anyhow, Context};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};
use txmediator_common::{Config, ConfigFile};
use txmediator_units::{
    decode_bytes32_string, encode_bytes32_string, format_ether, hexlify, is_bytes_like,
    parse_ether, to_utf8_bytes, zero_pad_value32,
};
use txmediator_web3::{
    prelude::{TransactionReceipt, U256},
    ChainClient, ContractClient, ValueChange, Web3ChainClient,
};

use crate::clap::{Commands, UnitCommands};

/// Run one command and print its JSON result
#[instrument(level = "debug", skip(file))]
pub async fn run(command: Commands, file: ConfigFile) -> anyhow::Result<()> {
    let output = match command {
        Commands::Units { action } => run_units(action)?,
        command => {
            let config = Config::try_from(file).context("invalid configuration")?;
            debug!("🔧 Loaded configuration: {:?}", config);
            let client = ContractClient::<Web3ChainClient>::connect(&config)
                .context("failed to set up the contract client")?;
            info!("🔗 Contract client ready for {:?}", client.address());
            run_contract(&client, command).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_contract<C: ChainClient + ?Sized>(
    client: &ContractClient<C>,
    command: Commands,
) -> anyhow::Result<Value> {
    let output = match command {
        Commands::Owner => json!({ "owner": client.owner().await? }),
        Commands::FixedValue => json!({ "fixedValue": decimal(client.fixed_value().await?) }),
        Commands::Value => json!({ "value": decimal(client.value().await?) }),
        Commands::CheckValue { value } => {
            json!({ "result": client.check_value(value).await? })
        }
        Commands::SumUpTo { limit } => {
            json!({ "sum": decimal(client.sum_up_to(limit).await?) })
        }
        Commands::OwnerFunction => json!({ "result": client.owner_function().await? }),
        Commands::ContractBalance => json!({ "balance": client.contract_balance().await? }),
        Commands::UpdateValue { value } => value_change(client.update_value(value).await?),
        Commands::SendEther { to, amount } => {
            receipt_summary(&client.send_ether(to, &amount).await?)
        }
        Commands::Deposit { amount } => receipt_summary(&client.deposit(&amount).await?),
        Commands::Withdraw => receipt_summary(&client.withdraw().await?),
        Commands::Units { .. } => return Err(anyhow!("units commands run offline")),
    };
    Ok(output)
}

/// Offline conversions, no configuration required
pub fn run_units(action: UnitCommands) -> anyhow::Result<Value> {
    let output = match action {
        UnitCommands::ParseEther { amount } => json!({ "wei": decimal(parse_ether(&amount)?) }),
        UnitCommands::FormatEther { wei } => json!({ "ether": format_ether(wei) }),
        UnitCommands::EncodeBytes32 { text } => {
            json!({ "bytes32": hexlify(&encode_bytes32_string(&text)?) })
        }
        UnitCommands::DecodeBytes32 { word } => {
            json!({ "text": decode_bytes32_string(&parse_word(&word)?)? })
        }
        UnitCommands::ZeroPad { data } => json!({ "padded": zero_pad_value32(&data)? }),
        UnitCommands::IsBytesLike { data } => json!({ "bytesLike": is_bytes_like(&data) }),
        UnitCommands::Utf8Bytes { text } => json!({ "bytes": hexlify(&to_utf8_bytes(&text)) }),
    };
    Ok(output)
}

fn decimal(value: U256) -> String {
    value.to_string()
}

fn value_change(change: ValueChange) -> Value {
    json!({
        "oldValue": decimal(change.old_value),
        "newValue": decimal(change.new_value),
    })
}

fn receipt_summary(receipt: &TransactionReceipt) -> Value {
    json!({
        "transactionHash": receipt.transaction_hash,
        "blockNumber": receipt.block_number.map(|n| n.as_u64()),
        "status": receipt.status.map(|s| s.as_u64()),
        "gasUsed": receipt.gas_used.map(decimal),
        "logs": receipt.logs.len(),
    })
}

fn parse_word(word: &str) -> anyhow::Result<[u8; 32]> {
    if !is_bytes_like(word) {
        return Err(anyhow!("{word:?} is not 0x-prefixed hex"));
    }
    let bytes = hex::decode(&word[2..]).context("invalid hex")?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow!("expected 32 bytes, got {}", bytes.len()))
}
