//! Offline demo: derive an address from a seed and sign a Payment

use dotenv::dotenv;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xrpl_codec::{signing, AccountId, KeyPair, Transaction, XrpAmount};

const DEFAULT_DESTINATION: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let secret_str = env::var("SECRET_STR").expect("SECRET_STR must be set in .env");
    let keypair = KeyPair::from_secret(&secret_str)?;
    let derived_address = keypair.address();
    println!("Key type: {}", keypair.key_type());
    println!("Derived address: {}", derived_address);

    if let Ok(expected_address) = env::var("ADDRESS") {
        assert_eq!(
            derived_address, expected_address,
            "Derived address does not match ADDRESS"
        );
        println!("✓ Address derivation is correct");
    }

    let destination: AccountId = env_or("DESTINATION", DEFAULT_DESTINATION).parse()?;
    let amount = XrpAmount::from_drops(env_or("AMOUNT_DROPS", "1000000").parse()?)?;
    let fee = XrpAmount::from_drops(env_or("FEE_DROPS", "12").parse()?)?;
    let sequence: u32 = env_or("SEQUENCE", "1").parse()?;

    let tx = Transaction::payment(keypair.account_id(), destination, amount.into(), fee, sequence);
    info!(json = %tx.to_json()?, "built payment");

    let signed = tx.sign(&keypair)?;
    signing::verify(&signed.blob)?;
    println!("✓ Payment signed and verified");
    println!("  Hash: {}", signed.hash);
    println!("  Blob: {}", signed.blob_hex());

    Ok(())
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
