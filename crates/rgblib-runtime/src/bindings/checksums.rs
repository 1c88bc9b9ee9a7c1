//! Interface contract of the `rgb_lib` native library

use crate::ffi::InterfaceContract;

/// Export namespace of the native library
pub const NAMESPACE: &str = "rgblibuniffi";

/// UniFFI contract version the bindings were generated against
pub const CONTRACT_VERSION: u32 = 29;

/// Expected checksum of every exported function, method and constructor
pub static CHECKSUMS: [(&str, u16); 52] = [
    ("func_generate_keys", 50781),
    ("func_restore_backup", 4743),
    ("func_restore_keys", 38408),
    ("method_invoice_invoice_data", 31294),
    ("method_invoice_invoice_string", 25144),
    ("method_recipientinfo_network", 22005),
    ("method_recipientinfo_recipient_type", 3457),
    ("method_transportendpoint_transport_type", 33510),
    ("method_wallet_backup", 41851),
    ("method_wallet_backup_info", 7253),
    ("method_wallet_blind_receive", 51838),
    ("method_wallet_create_utxos", 42058),
    ("method_wallet_create_utxos_begin", 30727),
    ("method_wallet_create_utxos_end", 50137),
    ("method_wallet_delete_transfers", 43847),
    ("method_wallet_drain_to", 60164),
    ("method_wallet_drain_to_begin", 57452),
    ("method_wallet_drain_to_end", 62328),
    ("method_wallet_fail_transfers", 7914),
    ("method_wallet_finalize_psbt", 39319),
    ("method_wallet_get_address", 23668),
    ("method_wallet_get_asset_balance", 19662),
    ("method_wallet_get_asset_metadata", 58573),
    ("method_wallet_get_btc_balance", 40762),
    ("method_wallet_get_fee_estimation", 64220),
    ("method_wallet_get_media_dir", 64429),
    ("method_wallet_get_wallet_data", 18071),
    ("method_wallet_get_wallet_dir", 8726),
    ("method_wallet_go_online", 46399),
    ("method_wallet_issue_asset_cfa", 32847),
    ("method_wallet_issue_asset_ifa", 50556),
    ("method_wallet_issue_asset_nia", 54511),
    ("method_wallet_issue_asset_uda", 63508),
    ("method_wallet_list_assets", 18027),
    ("method_wallet_list_transactions", 40825),
    ("method_wallet_list_transfers", 36530),
    ("method_wallet_list_unspents", 62734),
    ("method_wallet_refresh", 45223),
    ("method_wallet_send", 57749),
    ("method_wallet_send_begin", 46093),
    ("method_wallet_send_btc", 15823),
    ("method_wallet_send_btc_begin", 59961),
    ("method_wallet_send_btc_end", 60404),
    ("method_wallet_send_end", 1754),
    ("method_wallet_sign_psbt", 10485),
    ("method_wallet_sync", 22767),
    ("method_wallet_witness_receive", 541),
    ("constructor_address_new", 14676),
    ("constructor_invoice_new", 33585),
    ("constructor_recipientinfo_new", 56664),
    ("constructor_transportendpoint_new", 38802),
    ("constructor_wallet_new", 29566),
];

pub static RGB_LIB_CONTRACT: InterfaceContract = InterfaceContract {
    crate_name: "rgb_lib",
    namespace: NAMESPACE,
    contract_version: CONTRACT_VERSION,
    checksums: &CHECKSUMS,
};
