//! Error catalog reported by the `rgb_lib` native library
//!
//! Discriminants on the wire follow declaration order, starting at 1.

use crate::bindings::types::{AssetSchema, AssignmentsCollection};
use crate::tagged_union;
use thiserror::Error;

tagged_union! {
    /// Recoverable errors returned by `rgb_lib` calls
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum RgbLibError {
        #[error("AllocationsAlreadyAvailable")]
        1 => AllocationsAlreadyAvailable,

        #[error("AssetNotFound: AssetId={asset_id}")]
        2 => AssetNotFound { asset_id: String },

        #[error("BatchTransferNotFound: Idx={idx}")]
        3 => BatchTransferNotFound { idx: i32 },

        #[error("BitcoinNetworkMismatch")]
        4 => BitcoinNetworkMismatch,

        #[error("CannotChangeOnline")]
        5 => CannotChangeOnline,

        #[error("CannotDeleteBatchTransfer")]
        6 => CannotDeleteBatchTransfer,

        #[error("CannotEstimateFees")]
        7 => CannotEstimateFees,

        #[error("CannotFailBatchTransfer")]
        8 => CannotFailBatchTransfer,

        #[error("CannotFinalizePsbt")]
        9 => CannotFinalizePsbt,

        #[error("CannotUseIfaOnMainnet")]
        10 => CannotUseIfaOnMainnet,

        #[error("EmptyFile: FilePath={file_path}")]
        11 => EmptyFile { file_path: String },

        #[error("FailedBdkSync: Details={details}")]
        12 => FailedBdkSync { details: String },

        #[error("FailedBroadcast: Details={details}")]
        13 => FailedBroadcast { details: String },

        #[error("FailedIssuance: Details={details}")]
        14 => FailedIssuance { details: String },

        #[error("FileAlreadyExists: Path={path}")]
        15 => FileAlreadyExists { path: String },

        #[error("FingerprintMismatch")]
        16 => FingerprintMismatch,

        #[error("Io: Details={details}")]
        17 => Io { details: String },

        #[error("Inconsistency: Details={details}")]
        18 => Inconsistency { details: String },

        #[error("Indexer: Details={details}")]
        19 => Indexer { details: String },

        #[error("InexistentDataDir")]
        20 => InexistentDataDir,

        #[error("InsufficientAllocationSlots")]
        21 => InsufficientAllocationSlots,

        #[error("InsufficientAssignments: AssetId={asset_id}, Available={available:?}")]
        22 => InsufficientAssignments { asset_id: String, available: AssignmentsCollection },

        #[error("InsufficientBitcoins: Needed={needed}, Available={available}")]
        23 => InsufficientBitcoins { needed: u64, available: u64 },

        #[error("Internal: Details={details}")]
        24 => Internal { details: String },

        #[error("InvalidAddress: Details={details}")]
        25 => InvalidAddress { details: String },

        #[error("InvalidAmountZero")]
        26 => InvalidAmountZero,

        #[error("InvalidAssetId: AssetId={asset_id}")]
        27 => InvalidAssetId { asset_id: String },

        #[error("InvalidAssignment")]
        28 => InvalidAssignment,

        #[error("InvalidAttachments: Details={details}")]
        29 => InvalidAttachments { details: String },

        #[error("InvalidBitcoinKeys")]
        30 => InvalidBitcoinKeys,

        #[error("InvalidBitcoinNetwork: Network={network}")]
        31 => InvalidBitcoinNetwork { network: String },

        #[error("InvalidColoringInfo: Details={details}")]
        32 => InvalidColoringInfo { details: String },

        #[error("InvalidConsignment")]
        33 => InvalidConsignment,

        #[error("InvalidDetails: Details={details}")]
        34 => InvalidDetails { details: String },

        #[error("InvalidElectrum: Details={details}")]
        35 => InvalidElectrum { details: String },

        #[error("InvalidEstimationBlocks")]
        36 => InvalidEstimationBlocks,

        #[error("InvalidFeeRate: Details={details}")]
        37 => InvalidFeeRate { details: String },

        #[error("InvalidFilePath: FilePath={file_path}")]
        38 => InvalidFilePath { file_path: String },

        #[error("InvalidFingerprint")]
        39 => InvalidFingerprint,

        #[error("InvalidIndexer: Details={details}")]
        40 => InvalidIndexer { details: String },

        #[error("InvalidInvoice: Details={details}")]
        41 => InvalidInvoice { details: String },

        #[error("InvalidMnemonic: Details={details}")]
        42 => InvalidMnemonic { details: String },

        #[error("InvalidName: Details={details}")]
        43 => InvalidName { details: String },

        #[error("InvalidPrecision: Details={details}")]
        44 => InvalidPrecision { details: String },

        #[error("InvalidProxyProtocol: Version={version}")]
        45 => InvalidProxyProtocol { version: String },

        #[error("InvalidPsbt: Details={details}")]
        46 => InvalidPsbt { details: String },

        #[error("InvalidPubkey: Details={details}")]
        47 => InvalidPubkey { details: String },

        #[error("InvalidRecipientData: Details={details}")]
        48 => InvalidRecipientData { details: String },

        #[error("InvalidRecipientId")]
        49 => InvalidRecipientId,

        #[error("InvalidRecipientNetwork")]
        50 => InvalidRecipientNetwork,

        #[error("InvalidTicker: Details={details}")]
        51 => InvalidTicker { details: String },

        #[error("InvalidTransportEndpoint: Details={details}")]
        52 => InvalidTransportEndpoint { details: String },

        #[error("InvalidTransportEndpoints: Details={details}")]
        53 => InvalidTransportEndpoints { details: String },

        #[error("InvalidTxid")]
        54 => InvalidTxid,

        #[error("InvalidVanillaKeychain")]
        55 => InvalidVanillaKeychain,

        #[error("MaxFeeExceeded: Txid={txid}")]
        56 => MaxFeeExceeded { txid: String },

        #[error("MinFeeNotMet: Txid={txid}")]
        57 => MinFeeNotMet { txid: String },

        #[error("Network: Details={details}")]
        58 => Network { details: String },

        #[error("NoConsignment")]
        59 => NoConsignment,

        #[error("NoIssuanceAmounts")]
        60 => NoIssuanceAmounts,

        #[error("NoSupportedSchemas")]
        61 => NoSupportedSchemas,

        #[error("NoValidTransportEndpoint")]
        62 => NoValidTransportEndpoint,

        #[error("Offline")]
        63 => Offline,

        #[error("OnlineNeeded")]
        64 => OnlineNeeded,

        #[error("OutputBelowDustLimit")]
        65 => OutputBelowDustLimit,

        #[error("Proxy: Details={details}")]
        66 => Proxy { details: String },

        #[error("RecipientIdAlreadyUsed")]
        67 => RecipientIdAlreadyUsed,

        #[error("RecipientIdDuplicated")]
        68 => RecipientIdDuplicated,

        #[error("TooHighInflationAmounts")]
        69 => TooHighInflationAmounts,

        #[error("TooHighIssuanceAmounts")]
        70 => TooHighIssuanceAmounts,

        #[error("UnknownRgbSchema: SchemaId={schema_id}")]
        71 => UnknownRgbSchema { schema_id: String },

        #[error("UnsupportedBackupVersion: Version={version}")]
        72 => UnsupportedBackupVersion { version: String },

        #[error("UnsupportedLayer1: Layer1={layer_1}")]
        73 => UnsupportedLayer1 { layer_1: String },

        #[error("UnsupportedSchema: AssetSchema={asset_schema:?}")]
        74 => UnsupportedSchema { asset_schema: AssetSchema },

        #[error("UnsupportedTransportType")]
        75 => UnsupportedTransportType,

        #[error("WalletDirAlreadyExists: Path={path}")]
        76 => WalletDirAlreadyExists { path: String },

        #[error("WatchOnly")]
        77 => WatchOnly,

        #[error("WrongPassword")]
        78 => WrongPassword,
    }
}
