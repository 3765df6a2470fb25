//! Tip jar contract interface and call preparation.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    /// Tip jar contract deployed at a fixed address.
    #[derive(Debug)]
    interface ITipJar {
        /// Send ether to the jar.
        function fund() external payable;

        /// Drain the jar to the owner.
        function withdraw() external;
    }
}

/// Contract entry points the orchestrator calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractMethod {
    Fund,
    Withdraw,
}

impl ContractMethod {
    /// Solidity function name.
    pub fn name(&self) -> &'static str {
        match self {
            ContractMethod::Fund => "fund",
            ContractMethod::Withdraw => "withdraw",
        }
    }

    /// ABI-encoded calldata.
    pub fn calldata(&self) -> Bytes {
        match self {
            ContractMethod::Fund => ITipJar::fundCall {}.abi_encode().into(),
            ContractMethod::Withdraw => ITipJar::withdrawCall {}.abi_encode().into(),
        }
    }
}

/// A contract call to simulate, from a given account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract: Address,
    pub method: ContractMethod,
    pub from: Address,
    pub value: U256,
}

impl ContractCall {
    /// `fund()` carrying `value` wei.
    pub fn fund(contract: Address, from: Address, value: U256) -> Self {
        Self {
            contract,
            method: ContractMethod::Fund,
            from,
            value,
        }
    }

    /// `withdraw()`, no value.
    pub fn withdraw(contract: Address, from: Address) -> Self {
        Self {
            contract,
            method: ContractMethod::Withdraw,
            from,
            value: U256::ZERO,
        }
    }

    /// Unsigned transaction request for this call.
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.contract)
            .with_value(self.value)
            .with_input(self.method.calldata())
    }
}

/// A call that passed simulation and is ready to be signed and sent.
#[derive(Debug, Clone)]
pub struct PreparedCall {
    pub call: ContractCall,
    pub request: TransactionRequest,
    pub gas_limit: u64,
}

impl PreparedCall {
    pub fn new(call: ContractCall, gas_limit: u64) -> Self {
        let request = call.to_request().with_gas_limit(gas_limit);
        Self {
            call,
            request,
            gas_limit,
        }
    }
}
