//! Text rendering of balances and addresses for the control surface.

use alloy::primitives::{Address, U256};

const WEI_DECIMALS: u32 = 18;

/// Format wei as ether with a fixed number of decimals, rounding half up.
pub fn format_eth_fixed(wei: U256, places: u32) -> String {
    let places = places.min(WEI_DECIMALS);
    let ten = U256::from(10u64);
    let unit = ten.pow(U256::from(WEI_DECIMALS - places));
    let half = unit / U256::from(2u64);
    let scaled = wei.saturating_add(half) / unit;

    if places == 0 {
        return scaled.to_string();
    }
    let scale = ten.pow(U256::from(places));
    let whole = scaled / scale;
    let fraction = (scaled % scale).to::<u64>();
    format!("{}.{:0width$}", whole, fraction, width = places as usize)
}

/// Balance card text: `1.2346 ETH`, or `-- ETH` before the first fetch.
pub fn display_balance(wei: Option<U256>) -> String {
    match wei {
        Some(wei) => format!("{} ETH", format_eth_fixed(wei, 4)),
        None => "-- ETH".to_string(),
    }
}

/// Abbreviated checksummed address: `0xf39F...2266`.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
