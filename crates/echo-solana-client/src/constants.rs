//! Constants shared with the on-chain echo program and the explorer.

pub use echo_core::instruction::ECHO_DISCRIMINANT;
use url::form_urlencoded::byte_serialize;

/// Block explorer base URL for transaction links.
pub const EXPLORER_TX_URL: &str = "https://explorer.solana.com/tx";

/// Explorer link for a transaction signature on `cluster`.
///
/// Mainnet links carry no cluster query parameter. The `custom` cluster also
/// names the RPC endpoint, since the explorer has no other way to find it.
pub fn explorer_url(signature: &str, cluster: &str, rpc_url: &str) -> String {
    match cluster {
        "mainnet-beta" | "mainnet" => format!("{EXPLORER_TX_URL}/{signature}"),
        "custom" => {
            let endpoint: String = byte_serialize(rpc_url.as_bytes()).collect();
            format!("{EXPLORER_TX_URL}/{signature}?cluster=custom&customUrl={endpoint}")
        }
        _ => format!("{EXPLORER_TX_URL}/{signature}?cluster={cluster}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devnet_link_has_cluster() {
        assert_eq!(
            explorer_url("abc", "devnet", "https://api.devnet.solana.com/"),
            "https://explorer.solana.com/tx/abc?cluster=devnet"
        );
    }

    #[test]
    fn mainnet_link_has_no_cluster() {
        assert_eq!(
            explorer_url("abc", "mainnet-beta", "https://api.mainnet-beta.solana.com"),
            "https://explorer.solana.com/tx/abc"
        );
    }

    #[test]
    fn custom_link_names_the_endpoint() {
        assert_eq!(
            explorer_url("abc", "custom", "http://127.0.0.1:8899/"),
            "https://explorer.solana.com/tx/abc?cluster=custom&customUrl=http%3A%2F%2F127.0.0.1%3A8899%2F"
        );
    }
}
