//! Records and enums exchanged with `rgb_lib`
//!
//! These are plain data; their meaning lives entirely in the native library.
//! Field order is wire order.

use crate::bindings::error::RgbLibError;
use crate::{record, tagged_union};
use std::collections::HashMap;

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum BitcoinNetwork {
        1 => Mainnet,
        2 => Testnet,
        3 => Signet,
        4 => Regtest,
    }
}

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum AssetSchema {
        1 => Nia,
        2 => Uda,
        3 => Cfa,
        4 => Ifa,
    }
}

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DatabaseType {
        1 => Sqlite,
    }
}

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RecipientType {
        1 => Blind,
        2 => Witness,
    }
}

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TransportType {
        1 => JsonRpc,
    }
}

tagged_union! {
    /// Transfer states `Wallet::refresh` can be filtered on
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RefreshTransferStatus {
        1 => WaitingCounterparty,
        2 => WaitingConfirmations,
    }
}

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TransactionType {
        1 => RgbSend,
        2 => Drain,
        3 => CreateUtxos,
        4 => User,
    }
}

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TransferKind {
        1 => Issuance,
        2 => ReceiveBlind,
        3 => ReceiveWitness,
        4 => Send,
    }
}

tagged_union! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum TransferStatus {
        1 => WaitingCounterparty,
        2 => WaitingConfirmations,
        3 => Settled,
        4 => Failed,
    }
}

tagged_union! {
    /// What an invoice asks to receive
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Assignment {
        1 => Fungible { amount: u64 },
        2 => NonFungible,
        3 => InflationRight { amount: u64 },
        4 => ReplaceRight,
        5 => Any,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AssignmentsCollection {
        pub fungible: u64,
        pub non_fungible: bool,
        pub inflation: u64,
        pub replace: u8,
    }
}

record! {
    /// Wallet key material produced by `generate_keys`/`restore_keys`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Keys {
        pub mnemonic: String,
        pub xpub: String,
        pub account_xpub_vanilla: String,
        pub account_xpub_colored: String,
        pub master_fingerprint: String,
    }
}

record! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Balance {
        pub settled: u64,
        pub future: u64,
        pub spendable: u64,
    }
}

record! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BtcBalance {
        pub vanilla: Balance,
        pub colored: Balance,
    }
}

record! {
    /// Token returned by `Wallet::go_online`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Online {
        pub id: u64,
        pub indexer_url: String,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct InvoiceData {
        pub recipient_id: String,
        pub asset_schema: Option<AssetSchema>,
        pub asset_id: Option<String>,
        pub assignment: Assignment,
        pub assignment_name: Option<String>,
        pub network: BitcoinNetwork,
        pub expiration_timestamp: Option<i64>,
        pub transport_endpoints: Vec<String>,
    }
}

record! {
    /// Parameters for opening a wallet
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct WalletData {
        pub data_dir: String,
        pub bitcoin_network: BitcoinNetwork,
        pub database_type: DatabaseType,
        pub max_allocations_per_utxo: u32,
        pub account_xpub_vanilla: String,
        pub account_xpub_colored: String,
        pub mnemonic: Option<String>,
        pub master_fingerprint: String,
        pub vanilla_keychain: Option<u8>,
        pub supported_schemas: Vec<AssetSchema>,
    }
}

// ============================================================================
// Assets
// ============================================================================

record! {
    /// A file stored in the wallet's media directory
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Media {
        pub file_path: String,
        pub digest: String,
        pub mime: String,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EmbeddedMedia {
        pub mime: String,
        pub data: Vec<u8>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Outpoint {
        pub txid: String,
        pub vout: u32,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ProofOfReserves {
        pub utxo: Outpoint,
        pub proof: Vec<u8>,
    }
}

record! {
    /// Full description of a UDA token
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Token {
        pub index: u32,
        pub ticker: Option<String>,
        pub name: Option<String>,
        pub details: Option<String>,
        pub embedded_media: Option<EmbeddedMedia>,
        pub media: Option<Media>,
        pub attachments: HashMap<u8, Media>,
        pub reserves: Option<ProofOfReserves>,
    }
}

record! {
    /// [`Token`] with embedded media and reserves reduced to presence flags
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TokenLight {
        pub index: u32,
        pub ticker: Option<String>,
        pub name: Option<String>,
        pub details: Option<String>,
        pub embedded_media: bool,
        pub media: Option<Media>,
        pub attachments: HashMap<u8, Media>,
        pub reserves: bool,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AssetNia {
        pub asset_id: String,
        pub ticker: String,
        pub name: String,
        pub details: Option<String>,
        pub precision: u8,
        pub issued_supply: u64,
        pub timestamp: i64,
        pub added_at: i64,
        pub balance: Balance,
        pub media: Option<Media>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AssetUda {
        pub asset_id: String,
        pub ticker: String,
        pub name: String,
        pub details: Option<String>,
        pub precision: u8,
        pub issued_supply: u64,
        pub timestamp: i64,
        pub added_at: i64,
        pub balance: Balance,
        pub token: Option<TokenLight>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AssetCfa {
        pub asset_id: String,
        pub name: String,
        pub details: Option<String>,
        pub precision: u8,
        pub issued_supply: u64,
        pub timestamp: i64,
        pub added_at: i64,
        pub balance: Balance,
        pub media: Option<Media>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AssetIfa {
        pub asset_id: String,
        pub ticker: String,
        pub name: String,
        pub details: Option<String>,
        pub precision: u8,
        pub issued_supply: u64,
        pub timestamp: i64,
        pub added_at: i64,
        pub balance: Balance,
        pub media: Option<Media>,
    }
}

record! {
    /// Assets known to the wallet, grouped by schema
    ///
    /// A schema left out of the `list_assets` filter is `None`, not empty.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Assets {
        pub nia: Option<Vec<AssetNia>>,
        pub uda: Option<Vec<AssetUda>>,
        pub cfa: Option<Vec<AssetCfa>>,
        pub ifa: Option<Vec<AssetIfa>>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Metadata {
        pub asset_schema: AssetSchema,
        pub issued_supply: u64,
        pub timestamp: i64,
        pub name: String,
        pub precision: u8,
        pub ticker: Option<String>,
        pub details: Option<String>,
        pub token: Option<Token>,
    }
}

// ============================================================================
// Transfers
// ============================================================================

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ReceiveData {
        pub invoice: String,
        pub recipient_id: String,
        pub expiration_timestamp: Option<i64>,
        pub batch_transfer_idx: i32,
    }
}

record! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WitnessData {
        pub amount_sat: u64,
        pub blinding: Option<u64>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Recipient {
        pub recipient_id: String,
        pub witness_data: Option<WitnessData>,
        pub assignment: Assignment,
        pub transport_endpoints: Vec<String>,
    }
}

record! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RefreshFilter {
        pub status: RefreshTransferStatus,
        pub incoming: bool,
    }
}

record! {
    /// Outcome of refreshing one transfer
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RefreshedTransfer {
        pub updated_status: Option<TransferStatus>,
        pub failure: Option<RgbLibError>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SendResult {
        pub txid: String,
        pub batch_transfer_idx: i32,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TransferTransportEndpoint {
        pub endpoint: String,
        pub transport_type: TransportType,
        pub used: bool,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Transfer {
        pub idx: i32,
        pub batch_transfer_idx: i32,
        pub created_at: i64,
        pub updated_at: i64,
        pub status: TransferStatus,
        pub requested_assignment: Option<Assignment>,
        pub assignments: Vec<Assignment>,
        pub kind: TransferKind,
        pub txid: Option<String>,
        pub recipient_id: Option<String>,
        pub receive_utxo: Option<Outpoint>,
        pub change_utxo: Option<Outpoint>,
        pub expiration: Option<i64>,
        pub transport_endpoints: Vec<TransferTransportEndpoint>,
        pub invoice_string: Option<String>,
    }
}

// ============================================================================
// Bitcoin
// ============================================================================

record! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BlockTime {
        pub height: u32,
        pub timestamp: u64,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Transaction {
        pub transaction_type: TransactionType,
        pub txid: String,
        pub received: u64,
        pub sent: u64,
        pub fee: u64,
        pub confirmation_time: Option<BlockTime>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Utxo {
        pub outpoint: Outpoint,
        pub btc_amount: u64,
        pub colorable: bool,
        pub exists: bool,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RgbAllocation {
        pub asset_id: Option<String>,
        pub assignment: Assignment,
        pub settled: bool,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Unspent {
        pub utxo: Utxo,
        pub rgb_allocations: Vec<RgbAllocation>,
        pub pending_blinded: u32,
    }
}
