//! Fixed vectors checked against ledger-produced data

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use xrpl_codec::{
    base16, base58, rfc1751, signing, AccountId, AccountRoot, Currency, CurrencyCode, KeyPair,
    KeyType, LedgerEntry, LedgerHeader, Seed, StObject, Transaction, XrpAmount, XrpError,
};

const DESTINATION: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

const LEDGER_HEADER: &str = "005B67A60163457208228EB9A30FEB3CDEE53046B4CEB0A1532E516F93AAFA3125A7E66A0379299D4B30F6C0091C395D8B5CD6FD89594AEF8FDF7DF8F70E73CB5600D542B8A469697AE3AC86C3174C83546BABA662B8612D6175EE7AD7E23FB4FC25CECFC9B10DE0E8C0A807247D659E247D65A80A00";

const ACCOUNT_ROOT: &str = "1100612200000000240000002A25005B679C2D0000000355C5D8E5BFE245C2DFDE2ECD3E53FA6FF46E1AC82B91314EE997471A338462FCBC6240000000017D78408114B5F762798A53D543A014CAF8B297CFF8F2F937E8";

const ED25519_SIGNED: &str = "12000022000000002400000001201B005B68006140000000000F424068400000000000000C7321EDA57EBBCB502C2009EFE17229E8DC865DCCB192C52D7888D624DC9EBADDB815F074409E2CB2AB0D9EA0351352B32490AA19CEFEB8174459906EA053BF1B75ADD31AE22CC4676952E4DB60C531092CA9472ED18BEDAAC96C72ED32FAB4DF3F4C7304028114A6070B8A1822E3322676A99F0C804EE2D15B82708314B5F762798A53D543A014CAF8B297CFF8F2F937E8";

const SECP256K1_SIGNED: &str = "120000220000000024000000076140000000002625A068400000000000000A7321037390DF6748EC08C52FBE4745234BB260F6B98E8454D7A38B887F337BA64F9B4C74473045022100FA8A1845503B327B7A112D5FFD9DD0B51C616A78F902022C2E5D4E291FE081D102204883EE7E850B1A13C3D9E4568DF07BC348DB8630AA3318203F951161BC9B51F18114C20A8192F48B3BACE526B3324A065FE09CC172518314B5F762798A53D543A014CAF8B297CFF8F2F937E8";

fn drops(value: u64) -> XrpAmount {
    XrpAmount::from_drops(value).unwrap()
}

#[test]
fn account_id_from_public_key() {
    let public_key =
        base16::decode("0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020")
            .unwrap();
    let account = AccountId::from_public_key(&public_key);
    assert_eq!(account.to_string(), DESTINATION);
    assert_eq!(DESTINATION.parse::<AccountId>().unwrap(), account);
}

#[test]
fn address_checksum_is_enforced() {
    let mut corrupted = DESTINATION.to_string();
    corrupted.replace_range(5..6, "z");
    assert!(corrupted.parse::<AccountId>().is_err());
    assert!(matches!(
        base58::check_decode(&corrupted),
        Err(XrpError::ChecksumMismatch)
    ));
}

#[test]
fn secp256k1_seed_derives_account() {
    let seed: Seed = "shHHvEhCC6WdkJNV1AfBmqw3XJ3Uv".parse().unwrap();
    assert_eq!(seed.key_type(), KeyType::Secp256k1);
    let keypair = seed.derive_keypair().unwrap();
    assert_eq!(keypair.address(), "rJgzgUKLw6dUoDFXgbHNb2euXdMcNn6ioh");
    assert_eq!(seed.to_base58(), "shHHvEhCC6WdkJNV1AfBmqw3XJ3Uv");
}

#[test]
fn ed25519_seed_derives_account() {
    let keypair = KeyPair::from_secret("sEdTM1uX8pu2do5XvTnutH6HsouMaM2").unwrap();
    assert_eq!(keypair.address(), "rG31cLyErnqeVj2eomEjBZtq7PYaupGYzL");
}

#[test]
fn seed_mnemonic() {
    let seed = Seed::from_base58("snoPBrXtMeMyMHUVTgbuqAfg1SUTb").unwrap();
    assert_eq!(seed.to_hex(), "DEDCE9CE67B451D852FD4E846FCDE31C");
    assert_eq!(
        seed.to_rfc1751().unwrap(),
        "I IRE BOND BOW TRIO LAID SEAT GOAL HEN IBIS IBIS DARE"
    );
    let decoded = rfc1751::decode("I IRE BOND BOW TRIO LAID SEAT GOAL HEN IBIS IBIS DARE").unwrap();
    assert!(!decoded.parity_error);
}

#[test]
fn currency_codes() {
    let xrp: CurrencyCode = "XRP".parse().unwrap();
    assert_eq!(xrp.to_string(), "XRP");
    assert_eq!(CurrencyCode::from_bytes([0u8; 20]).unwrap(), xrp);

    let mut ambiguous = [0u8; 20];
    ambiguous[19] = 1;
    assert!(CurrencyCode::from_bytes(ambiguous).is_err());
}

#[test]
fn currency_decimal_conversions() {
    let one = Currency::from(dec!(1.0));
    assert_eq!(Decimal::try_from(one).unwrap(), dec!(1));
    assert_eq!(one.to_string(), "1");

    let many_digits = Currency::from(dec!(0.12345678901234567));
    assert_eq!(many_digits.mantissa(), 1_234_567_890_123_457);
    assert_eq!(many_digits.exponent(), -16);
}

#[test]
fn ledger_header_fixture() {
    let header = LedgerHeader::decode(&base16::decode(LEDGER_HEADER).unwrap()).unwrap();
    assert_eq!(header.sequence, 5_990_310);
    assert_eq!(header.total_coins, 99_999_972_797_353_657);
    assert_eq!(
        header.parent_hash.to_string(),
        "A30FEB3CDEE53046B4CEB0A1532E516F93AAFA3125A7E66A0379299D4B30F6C0"
    );
    assert_eq!(
        header.transaction_hash.to_string(),
        "091C395D8B5CD6FD89594AEF8FDF7DF8F70E73CB5600D542B8A469697AE3AC86"
    );
    assert_eq!(
        header.account_hash.to_string(),
        "C3174C83546BABA662B8612D6175EE7AD7E23FB4FC25CECFC9B10DE0E8C0A807"
    );
    assert_eq!(header.close_time_resolution, 10);
    assert_eq!(header.close_flags, 0);
    assert_eq!(
        header.hash().to_string(),
        "CEAD2BC39424CB00A549B68800A5B1D4FE2F43A538B6DFD96E217A0267A1674F"
    );
}

#[test]
fn account_root_fixture() {
    let bytes = base16::decode(ACCOUNT_ROOT).unwrap();
    let root = match LedgerEntry::decode(&bytes).unwrap() {
        LedgerEntry::AccountRoot(root) => root,
        other => panic!("unexpected entry {:?}", other),
    };
    assert_eq!(root.account.to_string(), DESTINATION);
    assert_eq!(root.balance, drops(25_000_000));
    assert_eq!(root.sequence, 42);
    assert_eq!(root.owner_count, 3);
    assert_eq!(root.previous_txn_lgr_seq, 5_990_300);
    assert_eq!(
        AccountRoot::index_for(&root.account).to_string(),
        "2B6AC232AA4C4BE41BF49D2459FA4A0347E1B543A4C92FCEE0821C0201E2E9A8"
    );
}

#[test]
fn ed25519_payment() {
    let keypair = KeyPair::from_secret("sEdTM1uX8pu2do5XvTnutH6HsouMaM2").unwrap();
    let tx = Transaction::payment(
        keypair.account_id(),
        DESTINATION.parse().unwrap(),
        drops(1_000_000).into(),
        drops(12),
        1,
    )
    .with_last_ledger_sequence(5_990_400);

    let signed = tx.sign(&keypair).unwrap();
    assert_eq!(signed.blob_hex(), ED25519_SIGNED);
    assert_eq!(
        signed.hash.to_string(),
        "3C81D81C484260BBDCD0FFC832EF690B205692E59A49D7BF8941308B04BFE855"
    );

    // same result when signing is driven by JSON
    let seed = Seed::from_base58("sEdTM1uX8pu2do5XvTnutH6HsouMaM2").unwrap();
    let from_json = signing::sign_json(&tx.to_json().unwrap(), &seed).unwrap();
    assert_eq!(from_json, signed);
}

#[test]
fn secp256k1_payment() {
    let keypair = KeyPair::from_secret("shHHvEhCC6WdkJNV1AfBmqw3XJ3Uv").unwrap();
    let tx = Transaction::payment(
        keypair.account_id(),
        DESTINATION.parse().unwrap(),
        drops(2_500_000).into(),
        drops(10),
        7,
    );

    let first = tx.sign(&keypair).unwrap();
    assert_eq!(first.blob_hex(), SECP256K1_SIGNED);
    assert_eq!(
        first.hash.to_string(),
        "5854E70F5AE32B315C74B4CD1845D5B0F560E17892911DB85E04D1121781AC54"
    );
    assert_eq!(tx.sign(&keypair).unwrap(), first);
}

#[test]
fn signed_blobs_verify_and_decode() {
    for blob in [ED25519_SIGNED, SECP256K1_SIGNED] {
        let bytes = base16::decode(blob).unwrap();
        let tx = signing::verify(&bytes).unwrap();
        assert_eq!(tx.encode().unwrap(), bytes);
        let typed = Transaction::from_st_object(&tx).unwrap();
        assert_eq!(typed.transaction_type(), "Payment");
    }
}

#[test]
fn signed_blob_json_view() {
    let tx = StObject::decode(&base16::decode(ED25519_SIGNED).unwrap()).unwrap();
    let value = tx.to_json().unwrap();
    assert_eq!(value["TransactionType"], json!("Payment"));
    assert_eq!(value["Amount"], json!("1000000"));
    assert_eq!(value["Destination"], json!(DESTINATION));
    assert_eq!(value["LastLedgerSequence"], json!(5_990_400));
    assert_eq!(StObject::from_json(&value).unwrap(), tx);
}
