//! Messaging contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the two
//! contracts this tool deploys and drives. The full artifact ABI is still
//! validated at load time; these bindings cover the methods the tool calls.

use alloy::primitives::{Address, B256};
use alloy::sol;

/// Record-file role key for the sender contract
pub const ROLE_SENDER: &str = "MessageSender";

/// Record-file role key for the receiver contract
pub const ROLE_RECEIVER: &str = "MessageReceiver";

sol! {
    /// Cross-chain message sender.
    ///
    /// Constructor takes the Wormhole relayer address for its chain. The
    /// relay fee must be quoted first and passed as msg.value to
    /// sendMessage, otherwise the call reverts.
    #[derive(Debug)]
    #[sol(rpc)]
    contract MessageSender {
        /// Quote the cost of delivering a message to the target chain
        function quoteCrossChainCost(uint16 targetChain) public view returns (uint256 cost);

        /// Send a message through the Wormhole relayer (payable: quoted fee)
        function sendMessage(uint16 targetChain, address targetAddress, string memory message) external payable;
    }

    /// Cross-chain message receiver.
    ///
    /// Constructor takes the Wormhole relayer address for its chain. Only
    /// messages from a registered sender are accepted, so the sender must be
    /// registered (per source chain) right after deployment.
    #[derive(Debug)]
    #[sol(rpc)]
    contract MessageReceiver {
        /// The sender registered for a source chain (zero if none)
        function registeredSenders(uint16 sourceChain) public view returns (bytes32 sender);

        /// Register the sender contract allowed to deliver from sourceChain
        function setRegisteredSender(uint16 sourceChain, bytes32 sourceAddress) public;
    }
}

/// Left-pad a 20-byte EVM address to the bytes32 form Wormhole uses for
/// cross-chain sender identities.
pub fn address_to_bytes32(address: Address) -> B256 {
    B256::left_padding_from(address.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_to_bytes32_left_pads() {
        let address: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse()
            .unwrap();
        let padded = address_to_bytes32(address);

        assert_eq!(&padded[..12], &[0u8; 12]);
        assert_eq!(&padded[12..], address.as_slice());
    }

    #[test]
    fn test_zero_address_pads_to_zero_word() {
        assert_eq!(address_to_bytes32(Address::ZERO), B256::ZERO);
    }
}
