//! In-process fake of the rgb_lib native library
//!
//! The fake speaks the real calling convention: buffers are allocated as Rust
//! `Vec`s, objects are `Arc`s handed out as raw pointers, and every call
//! receives a status out-parameter. Per-thread counters make leaks and double
//! frees visible to the tests.

#![allow(dead_code)]

use rgblib_runtime::bindings::{
    AssetNia, AssetSchema, Assets, Assignment, Balance, BitcoinNetwork, BtcBalance, InvoiceData,
    Keys, Online, Outpoint, ReceiveData, Recipient, RecipientType, RefreshFilter,
    RefreshedTransfer, RgbAllocation, RgbLibError, SendResult, TransferStatus, TransportType,
    Unspent, Utxo, WalletData, CHECKSUMS, CONTRACT_VERSION,
};
use rgblib_runtime::ffi::{ForeignBytes, LoadError, RawSymbol, RustBuffer, RustCallStatus, SymbolSource};
use rgblib_runtime::{decode, encode, Codec};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ffi::c_void;
use std::mem::ManuallyDrop;
use std::slice;
use std::sync::Arc;

thread_local! {
    static LIVE_BUFFERS: Cell<isize> = const { Cell::new(0) };
    static LIVE_OBJECTS: Cell<isize> = const { Cell::new(0) };
    static BACKUPS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Native buffers allocated on this thread and not yet freed
pub fn live_buffers() -> isize {
    LIVE_BUFFERS.with(Cell::get)
}

/// Fake native objects on this thread that have not been dropped
pub fn live_objects() -> isize {
    LIVE_OBJECTS.with(Cell::get)
}

/// Backup paths the fake wallet accepted on this thread
pub fn backups_written() -> Vec<String> {
    BACKUPS.with(|backups| backups.borrow().clone())
}

// ============================================================================
// Buffers
// ============================================================================

fn alloc(bytes: &[u8]) -> RustBuffer {
    if bytes.is_empty() {
        return RustBuffer::empty();
    }
    let mut vec = ManuallyDrop::new(bytes.to_vec());
    LIVE_BUFFERS.with(|live| live.set(live.get() + 1));
    RustBuffer {
        capacity: vec.capacity() as u64,
        len: vec.len() as u64,
        data: vec.as_mut_ptr(),
    }
}

/// Take ownership of a buffer passed in by the caller
unsafe fn take(buffer: RustBuffer) -> Vec<u8> {
    if buffer.data.is_null() {
        assert_eq!(buffer.capacity, 0, "null buffer with capacity");
        return Vec::new();
    }
    LIVE_BUFFERS.with(|live| live.set(live.get() - 1));
    Vec::from_raw_parts(buffer.data, buffer.len as usize, buffer.capacity as usize)
}

unsafe fn take_string(buffer: RustBuffer) -> String {
    String::from_utf8(take(buffer)).unwrap()
}

unsafe fn take_value<T: Codec>(buffer: RustBuffer) -> T {
    decode(&take(buffer)).unwrap()
}

fn lower<T: Codec>(value: &T) -> RustBuffer {
    alloc(&encode(value).unwrap())
}

unsafe fn fail(status: *mut RustCallStatus, error: &RgbLibError) {
    (*status).code = 1;
    (*status).error_buf = lower(error);
}

unsafe fn panic_with(status: *mut RustCallStatus, message: &str) {
    (*status).code = 2;
    (*status).error_buf = alloc(message.as_bytes());
}

unsafe extern "C" fn rustbuffer_from_bytes(
    bytes: ForeignBytes,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    alloc(slice::from_raw_parts(bytes.data, bytes.len as usize))
}

unsafe extern "C" fn rustbuffer_free(buffer: RustBuffer, _status: *mut RustCallStatus) {
    drop(take(buffer));
}

// ============================================================================
// Objects
// ============================================================================

struct Live;

impl Live {
    fn new() -> Self {
        LIVE_OBJECTS.with(|live| live.set(live.get() + 1));
        Live
    }
}

impl Drop for Live {
    fn drop(&mut self) {
        LIVE_OBJECTS.with(|live| live.set(live.get() - 1));
    }
}

pub struct FakeInvoice {
    string: String,
    _live: Live,
}

pub struct FakeWallet {
    data: WalletData,
    _live: Live,
}

pub struct FakeAddress {
    _address: String,
    _live: Live,
}

pub struct FakeRecipientInfo {
    recipient_id: String,
    _live: Live,
}

pub struct FakeTransportEndpoint {
    _endpoint: String,
    _live: Live,
}

fn into_pointer<T>(value: T) -> *mut c_void {
    Arc::into_raw(Arc::new(value)) as *mut c_void
}

/// Consume the reference a method receives
unsafe fn receiver<T>(pointer: *mut c_void) -> Arc<T> {
    Arc::from_raw(pointer as *const T)
}

unsafe extern "C" fn clone_object<T>(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> *mut c_void {
    Arc::increment_strong_count(pointer as *const T);
    pointer
}

unsafe extern "C" fn free_object<T>(pointer: *mut c_void, _status: *mut RustCallStatus) {
    drop(Arc::from_raw(pointer as *const T));
}

// ============================================================================
// Exports
// ============================================================================

pub const TEST_MNEMONIC: &str =
    "save call film frog usual market noodle hope stomach chat word worry";

fn keys_for(network: BitcoinNetwork, mnemonic: &str) -> Keys {
    Keys {
        mnemonic: mnemonic.to_string(),
        xpub: format!("xpub-{network:?}").to_lowercase(),
        account_xpub_vanilla: "vanilla".to_string(),
        account_xpub_colored: "colored".to_string(),
        master_fingerprint: "a1b2c3d4".to_string(),
    }
}

unsafe extern "C" fn generate_keys(network: RustBuffer, _status: *mut RustCallStatus) -> RustBuffer {
    let network: BitcoinNetwork = take_value(network);
    lower(&keys_for(network, TEST_MNEMONIC))
}

unsafe extern "C" fn restore_keys(
    network: RustBuffer,
    mnemonic: RustBuffer,
    status: *mut RustCallStatus,
) -> RustBuffer {
    let network: BitcoinNetwork = take_value(network);
    let mnemonic = take_string(mnemonic);
    if mnemonic.split_whitespace().count() != 12 {
        fail(
            status,
            &RgbLibError::InvalidMnemonic {
                details: "invalid number of words".to_string(),
            },
        );
        return RustBuffer::empty();
    }
    lower(&keys_for(network, &mnemonic))
}

unsafe extern "C" fn restore_backup(
    backup_path: RustBuffer,
    password: RustBuffer,
    data_dir: RustBuffer,
    status: *mut RustCallStatus,
) {
    drop(take(backup_path));
    drop(take(password));
    drop(take(data_dir));
    panic_with(status, "backup file is corrupted");
}

unsafe extern "C" fn invoice_new(invoice: RustBuffer, status: *mut RustCallStatus) -> *mut c_void {
    let string = take_string(invoice);
    if !string.starts_with("rgb:") {
        fail(
            status,
            &RgbLibError::InvalidInvoice {
                details: "missing rgb: scheme".to_string(),
            },
        );
        return std::ptr::null_mut();
    }
    into_pointer(FakeInvoice {
        string,
        _live: Live::new(),
    })
}

unsafe extern "C" fn invoice_invoice_string(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    let invoice = receiver::<FakeInvoice>(pointer);
    alloc(invoice.string.as_bytes())
}

unsafe extern "C" fn invoice_invoice_data(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    let invoice = receiver::<FakeInvoice>(pointer);
    lower(&invoice_data_for(&invoice.string))
}

pub fn invoice_data_for(invoice: &str) -> InvoiceData {
    InvoiceData {
        recipient_id: invoice.trim_start_matches("rgb:").to_string(),
        asset_schema: Some(AssetSchema::Nia),
        asset_id: None,
        assignment: Assignment::Fungible { amount: 42 },
        assignment_name: None,
        network: BitcoinNetwork::Regtest,
        expiration_timestamp: None,
        transport_endpoints: vec!["rpc://127.0.0.1:3000/json-rpc".to_string()],
    }
}

unsafe extern "C" fn wallet_new(data: RustBuffer, _status: *mut RustCallStatus) -> *mut c_void {
    into_pointer(FakeWallet {
        data: take_value(data),
        _live: Live::new(),
    })
}

unsafe extern "C" fn wallet_get_wallet_dir(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    let wallet = receiver::<FakeWallet>(pointer);
    alloc(format!("{}/a1b2c3d4", wallet.data.data_dir).as_bytes())
}

unsafe extern "C" fn wallet_backup_info(pointer: *mut c_void, _status: *mut RustCallStatus) -> i8 {
    drop(receiver::<FakeWallet>(pointer));
    1
}

unsafe extern "C" fn wallet_go_online(
    pointer: *mut c_void,
    skip_consistency_check: i8,
    indexer_url: RustBuffer,
    status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let indexer_url = take_string(indexer_url);
    if skip_consistency_check != 0 && skip_consistency_check != 1 {
        panic_with(status, "bool out of range");
        return RustBuffer::empty();
    }
    if indexer_url.is_empty() {
        fail(
            status,
            &RgbLibError::InvalidIndexer {
                details: "empty url".to_string(),
            },
        );
        return RustBuffer::empty();
    }
    lower(&Online { id: 7, indexer_url })
}

unsafe extern "C" fn wallet_get_btc_balance(
    pointer: *mut c_void,
    online: RustBuffer,
    _skip_sync: i8,
    status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let online: Option<Online> = take_value(online);
    if online.is_none() {
        fail(status, &RgbLibError::Offline);
        return RustBuffer::empty();
    }
    let mut balance = BtcBalance::default();
    balance.vanilla.settled = 100_000;
    balance.vanilla.spendable = 100_000;
    lower(&balance)
}

unsafe extern "C" fn wallet_get_fee_estimation(
    pointer: *mut c_void,
    online: RustBuffer,
    blocks: u16,
    _status: *mut RustCallStatus,
) -> f64 {
    drop(receiver::<FakeWallet>(pointer));
    drop(take(online));
    f64::from(blocks) * 1.5
}

pub const FAKE_ADDRESS: &str = "bcrt1qfakewalletaddress";
pub const ASSET_ID: &str = "rgb:2dkSTbr-jFhznbPmo-TQafzswCN-av4gTsJjX";

unsafe extern "C" fn address_new(
    address: RustBuffer,
    network: RustBuffer,
    status: *mut RustCallStatus,
) -> *mut c_void {
    let address = take_string(address);
    let network: BitcoinNetwork = take_value(network);
    let prefix = match network {
        BitcoinNetwork::Mainnet => "bc1",
        BitcoinNetwork::Regtest => "bcrt1",
        BitcoinNetwork::Testnet | BitcoinNetwork::Signet => "tb1",
    };
    if !address.starts_with(prefix) {
        fail(
            status,
            &RgbLibError::InvalidAddress {
                details: format!("expected {prefix} prefix"),
            },
        );
        return std::ptr::null_mut();
    }
    into_pointer(FakeAddress {
        _address: address,
        _live: Live::new(),
    })
}

unsafe extern "C" fn recipientinfo_new(
    recipient_id: RustBuffer,
    status: *mut RustCallStatus,
) -> *mut c_void {
    let recipient_id = take_string(recipient_id);
    if !recipient_id.starts_with("utxob:") && !recipient_id.starts_with("wvout:") {
        fail(status, &RgbLibError::InvalidRecipientId);
        return std::ptr::null_mut();
    }
    into_pointer(FakeRecipientInfo {
        recipient_id,
        _live: Live::new(),
    })
}

unsafe extern "C" fn recipientinfo_network(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeRecipientInfo>(pointer));
    lower(&BitcoinNetwork::Regtest)
}

unsafe extern "C" fn recipientinfo_recipient_type(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    let info = receiver::<FakeRecipientInfo>(pointer);
    if info.recipient_id.starts_with("utxob:") {
        lower(&RecipientType::Blind)
    } else {
        lower(&RecipientType::Witness)
    }
}

unsafe extern "C" fn transportendpoint_new(
    endpoint: RustBuffer,
    status: *mut RustCallStatus,
) -> *mut c_void {
    let endpoint = take_string(endpoint);
    if !endpoint.starts_with("rpc://") && !endpoint.starts_with("rpcs://") {
        fail(
            status,
            &RgbLibError::InvalidTransportEndpoint {
                details: "unsupported scheme".to_string(),
            },
        );
        return std::ptr::null_mut();
    }
    into_pointer(FakeTransportEndpoint {
        _endpoint: endpoint,
        _live: Live::new(),
    })
}

unsafe extern "C" fn transportendpoint_transport_type(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeTransportEndpoint>(pointer));
    lower(&TransportType::JsonRpc)
}

unsafe extern "C" fn wallet_get_media_dir(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    let wallet = receiver::<FakeWallet>(pointer);
    alloc(format!("{}/a1b2c3d4/media_files", wallet.data.data_dir).as_bytes())
}

unsafe extern "C" fn wallet_get_wallet_data(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    let wallet = receiver::<FakeWallet>(pointer);
    lower(&wallet.data)
}

unsafe extern "C" fn wallet_get_address(
    pointer: *mut c_void,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    alloc(FAKE_ADDRESS.as_bytes())
}

unsafe extern "C" fn wallet_backup(
    pointer: *mut c_void,
    backup_path: RustBuffer,
    password: RustBuffer,
    status: *mut RustCallStatus,
) {
    drop(receiver::<FakeWallet>(pointer));
    let backup_path = take_string(backup_path);
    if take_string(password).is_empty() {
        fail(status, &RgbLibError::WrongPassword);
        return;
    }
    BACKUPS.with(|backups| backups.borrow_mut().push(backup_path));
}

unsafe extern "C" fn wallet_get_asset_balance(
    pointer: *mut c_void,
    asset_id: RustBuffer,
    status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let asset_id = take_string(asset_id);
    if asset_id != ASSET_ID {
        fail(status, &RgbLibError::AssetNotFound { asset_id });
        return RustBuffer::empty();
    }
    lower(&Balance {
        settled: 600,
        future: 1000,
        spendable: 600,
    })
}

pub fn fake_asset_nia(amounts: &[u64]) -> AssetNia {
    let supply = amounts.iter().sum();
    AssetNia {
        asset_id: ASSET_ID.to_string(),
        ticker: "USDT".to_string(),
        name: "Tether".to_string(),
        details: None,
        precision: 2,
        issued_supply: supply,
        timestamp: 1_700_000_000,
        added_at: 1_700_000_000,
        balance: Balance {
            settled: supply,
            future: supply,
            spendable: supply,
        },
        media: None,
    }
}

unsafe extern "C" fn wallet_issue_asset_nia(
    pointer: *mut c_void,
    ticker: RustBuffer,
    name: RustBuffer,
    precision: u8,
    amounts: RustBuffer,
    status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let ticker = take_string(ticker);
    let name = take_string(name);
    let amounts: Vec<u64> = take_value(amounts);
    if amounts.is_empty() {
        fail(status, &RgbLibError::NoIssuanceAmounts);
        return RustBuffer::empty();
    }
    let mut asset = fake_asset_nia(&amounts);
    asset.ticker = ticker;
    asset.name = name;
    asset.precision = precision;
    lower(&asset)
}

unsafe extern "C" fn wallet_list_assets(
    pointer: *mut c_void,
    filter: RustBuffer,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let filter: Vec<AssetSchema> = take_value(filter);
    let wanted = |schema| filter.is_empty() || filter.contains(&schema);
    lower(&Assets {
        nia: wanted(AssetSchema::Nia).then(|| vec![fake_asset_nia(&[1000])]),
        uda: wanted(AssetSchema::Uda).then(Vec::new),
        cfa: wanted(AssetSchema::Cfa).then(Vec::new),
        ifa: wanted(AssetSchema::Ifa).then(Vec::new),
    })
}

unsafe extern "C" fn wallet_blind_receive(
    pointer: *mut c_void,
    asset_id: RustBuffer,
    assignment: RustBuffer,
    duration_seconds: RustBuffer,
    transport_endpoints: RustBuffer,
    min_confirmations: u8,
    status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let asset_id: Option<String> = take_value(asset_id);
    let assignment: Assignment = take_value(assignment);
    let duration_seconds: Option<u32> = take_value(duration_seconds);
    let transport_endpoints: Vec<String> = take_value(transport_endpoints);
    if transport_endpoints.is_empty() {
        fail(status, &RgbLibError::NoValidTransportEndpoint);
        return RustBuffer::empty();
    }
    let amount = match assignment {
        Assignment::Fungible { amount } => amount,
        _ => 0,
    };
    lower(&ReceiveData {
        invoice: format!(
            "rgb:{}/{amount}/utxob:fake?min={min_confirmations}",
            asset_id.unwrap_or_default()
        ),
        recipient_id: "utxob:fake".to_string(),
        expiration_timestamp: duration_seconds.map(|d| 1_700_000_000 + i64::from(d)),
        batch_transfer_idx: 1,
    })
}

unsafe extern "C" fn wallet_sync(
    pointer: *mut c_void,
    online: RustBuffer,
    _status: *mut RustCallStatus,
) {
    drop(receiver::<FakeWallet>(pointer));
    let _: Online = take_value(online);
}

unsafe extern "C" fn wallet_create_utxos(
    pointer: *mut c_void,
    online: RustBuffer,
    _up_to: i8,
    num: RustBuffer,
    size: RustBuffer,
    fee_rate: u64,
    _skip_sync: i8,
    status: *mut RustCallStatus,
) -> u8 {
    drop(receiver::<FakeWallet>(pointer));
    let _: Online = take_value(online);
    let num: Option<u8> = take_value(num);
    let _: Option<u32> = take_value(size);
    if fee_rate == 0 {
        fail(
            status,
            &RgbLibError::InvalidFeeRate {
                details: "must be at least 1".to_string(),
            },
        );
        return 0;
    }
    num.unwrap_or(5)
}

unsafe extern "C" fn wallet_create_utxos_begin(
    pointer: *mut c_void,
    online: RustBuffer,
    up_to: i8,
    num: RustBuffer,
    size: RustBuffer,
    fee_rate: u64,
    _skip_sync: i8,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let _: Online = take_value(online);
    let num: Option<u8> = take_value(num);
    let size: Option<u32> = take_value(size);
    alloc(
        format!(
            "psbt:utxos:{}x{}:fee{fee_rate}:upto{up_to}",
            num.unwrap_or(5),
            size.unwrap_or(1000)
        )
        .as_bytes(),
    )
}

unsafe extern "C" fn wallet_create_utxos_end(
    pointer: *mut c_void,
    online: RustBuffer,
    signed_psbt: RustBuffer,
    _skip_sync: i8,
    status: *mut RustCallStatus,
) -> u8 {
    drop(receiver::<FakeWallet>(pointer));
    let _: Online = take_value(online);
    if !take_string(signed_psbt).starts_with("signed:") {
        fail(
            status,
            &RgbLibError::InvalidPsbt {
                details: "not signed".to_string(),
            },
        );
        return 0;
    }
    5
}

unsafe extern "C" fn wallet_sign_psbt(
    pointer: *mut c_void,
    unsigned_psbt: RustBuffer,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    alloc(format!("signed:{}", take_string(unsigned_psbt)).as_bytes())
}

unsafe extern "C" fn wallet_refresh(
    pointer: *mut c_void,
    online: RustBuffer,
    asset_id: RustBuffer,
    filter: RustBuffer,
    _skip_sync: i8,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let _: Online = take_value(online);
    let _: Option<String> = take_value(asset_id);
    let filter: Vec<RefreshFilter> = take_value(filter);
    let mut refreshed = HashMap::new();
    refreshed.insert(
        1,
        RefreshedTransfer {
            updated_status: Some(TransferStatus::Settled),
            failure: None,
        },
    );
    refreshed.insert(
        2,
        RefreshedTransfer {
            updated_status: None,
            failure: Some(RgbLibError::Network {
                details: format!("{} filters", filter.len()),
            }),
        },
    );
    lower(&refreshed)
}

unsafe extern "C" fn wallet_send(
    pointer: *mut c_void,
    online: RustBuffer,
    recipient_map: RustBuffer,
    _donation: i8,
    _fee_rate: u64,
    _min_confirmations: u8,
    _skip_sync: i8,
    status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let _: Online = take_value(online);
    let recipient_map: HashMap<String, Vec<Recipient>> = take_value(recipient_map);
    let recipients: usize = recipient_map.values().map(Vec::len).sum();
    if recipients == 0 {
        fail(
            status,
            &RgbLibError::InvalidRecipientData {
                details: "no recipients".to_string(),
            },
        );
        return RustBuffer::empty();
    }
    lower(&SendResult {
        txid: format!("txid-{}-{recipients}", recipient_map.len()),
        batch_transfer_idx: 3,
    })
}

unsafe extern "C" fn wallet_list_unspents(
    pointer: *mut c_void,
    online: RustBuffer,
    settled_only: i8,
    _skip_sync: i8,
    _status: *mut RustCallStatus,
) -> RustBuffer {
    drop(receiver::<FakeWallet>(pointer));
    let _: Option<Online> = take_value(online);
    let allocation = |settled| RgbAllocation {
        asset_id: Some(ASSET_ID.to_string()),
        assignment: Assignment::Fungible { amount: 300 },
        settled,
    };
    let mut allocations = vec![allocation(true), allocation(false)];
    if settled_only != 0 {
        allocations.retain(|a| a.settled);
    }
    lower(&vec![Unspent {
        utxo: Utxo {
            outpoint: Outpoint {
                txid: "ab".repeat(32),
                vout: 0,
            },
            btc_amount: 1000,
            colorable: true,
            exists: true,
        },
        rgb_allocations: allocations,
        pending_blinded: 0,
    }])
}

// ============================================================================
// Library
// ============================================================================

fn raw<T: Copy>(function: T) -> RawSymbol {
    assert_eq!(std::mem::size_of::<T>(), std::mem::size_of::<*const c_void>());
    // Safety: `T` is always a function pointer here
    RawSymbol::new(unsafe { std::mem::transmute_copy::<T, *const c_void>(&function) })
}

/// A fake `rgblibuniffi` library reporting the expected interface
pub struct FakeLibrary {
    symbols: HashMap<String, RawSymbol>,
    contract_version: u32,
    checksums: HashMap<&'static str, u16>,
}

type Status = *mut RustCallStatus;
type Pointer = *mut c_void;

impl FakeLibrary {
    pub fn new() -> Self {
        let mut library = Self {
            symbols: HashMap::new(),
            contract_version: CONTRACT_VERSION,
            checksums: CHECKSUMS.iter().copied().collect(),
        };

        library.export(
            "ffi_rgblibuniffi_rustbuffer_from_bytes",
            raw(rustbuffer_from_bytes as unsafe extern "C" fn(ForeignBytes, Status) -> RustBuffer),
        );
        library.export(
            "ffi_rgblibuniffi_rustbuffer_free",
            raw(rustbuffer_free as unsafe extern "C" fn(RustBuffer, Status)),
        );

        library.export(
            "uniffi_rgblibuniffi_fn_func_generate_keys",
            raw(generate_keys as unsafe extern "C" fn(RustBuffer, Status) -> RustBuffer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_func_restore_keys",
            raw(restore_keys as unsafe extern "C" fn(RustBuffer, RustBuffer, Status) -> RustBuffer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_func_restore_backup",
            raw(restore_backup as unsafe extern "C" fn(RustBuffer, RustBuffer, RustBuffer, Status)),
        );

        library.export_object::<FakeInvoice>("invoice");
        library.export(
            "uniffi_rgblibuniffi_fn_constructor_invoice_new",
            raw(invoice_new as unsafe extern "C" fn(RustBuffer, Status) -> Pointer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_invoice_invoice_string",
            raw(invoice_invoice_string as unsafe extern "C" fn(Pointer, Status) -> RustBuffer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_invoice_invoice_data",
            raw(invoice_invoice_data as unsafe extern "C" fn(Pointer, Status) -> RustBuffer),
        );

        library.export_object::<FakeWallet>("wallet");
        library.export(
            "uniffi_rgblibuniffi_fn_constructor_wallet_new",
            raw(wallet_new as unsafe extern "C" fn(RustBuffer, Status) -> Pointer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_wallet_get_wallet_dir",
            raw(wallet_get_wallet_dir as unsafe extern "C" fn(Pointer, Status) -> RustBuffer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_wallet_backup_info",
            raw(wallet_backup_info as unsafe extern "C" fn(Pointer, Status) -> i8),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_wallet_go_online",
            raw(wallet_go_online
                as unsafe extern "C" fn(Pointer, i8, RustBuffer, Status) -> RustBuffer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_wallet_get_btc_balance",
            raw(wallet_get_btc_balance
                as unsafe extern "C" fn(Pointer, RustBuffer, i8, Status) -> RustBuffer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_wallet_get_fee_estimation",
            raw(wallet_get_fee_estimation
                as unsafe extern "C" fn(Pointer, RustBuffer, u16, Status) -> f64),
        );
        library.export_wallet_methods();

        library.export_object::<FakeAddress>("address");
        library.export(
            "uniffi_rgblibuniffi_fn_constructor_address_new",
            raw(address_new as unsafe extern "C" fn(RustBuffer, RustBuffer, Status) -> Pointer),
        );

        library.export_object::<FakeRecipientInfo>("recipientinfo");
        library.export(
            "uniffi_rgblibuniffi_fn_constructor_recipientinfo_new",
            raw(recipientinfo_new as unsafe extern "C" fn(RustBuffer, Status) -> Pointer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_recipientinfo_network",
            raw(recipientinfo_network as unsafe extern "C" fn(Pointer, Status) -> RustBuffer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_recipientinfo_recipient_type",
            raw(recipientinfo_recipient_type
                as unsafe extern "C" fn(Pointer, Status) -> RustBuffer),
        );

        library.export_object::<FakeTransportEndpoint>("transportendpoint");
        library.export(
            "uniffi_rgblibuniffi_fn_constructor_transportendpoint_new",
            raw(transportendpoint_new as unsafe extern "C" fn(RustBuffer, Status) -> Pointer),
        );
        library.export(
            "uniffi_rgblibuniffi_fn_method_transportendpoint_transport_type",
            raw(transportendpoint_transport_type
                as unsafe extern "C" fn(Pointer, Status) -> RustBuffer),
        );

        library
    }

    fn export_wallet_methods(&mut self) {
        type Buf = RustBuffer;

        self.export_method(
            "wallet_get_media_dir",
            raw(wallet_get_media_dir as unsafe extern "C" fn(Pointer, Status) -> Buf),
        );
        self.export_method(
            "wallet_get_wallet_data",
            raw(wallet_get_wallet_data as unsafe extern "C" fn(Pointer, Status) -> Buf),
        );
        self.export_method(
            "wallet_get_address",
            raw(wallet_get_address as unsafe extern "C" fn(Pointer, Status) -> Buf),
        );
        self.export_method(
            "wallet_backup",
            raw(wallet_backup as unsafe extern "C" fn(Pointer, Buf, Buf, Status)),
        );
        self.export_method(
            "wallet_get_asset_balance",
            raw(wallet_get_asset_balance as unsafe extern "C" fn(Pointer, Buf, Status) -> Buf),
        );
        self.export_method(
            "wallet_issue_asset_nia",
            raw(wallet_issue_asset_nia
                as unsafe extern "C" fn(Pointer, Buf, Buf, u8, Buf, Status) -> Buf),
        );
        self.export_method(
            "wallet_list_assets",
            raw(wallet_list_assets as unsafe extern "C" fn(Pointer, Buf, Status) -> Buf),
        );
        self.export_method(
            "wallet_blind_receive",
            raw(wallet_blind_receive
                as unsafe extern "C" fn(Pointer, Buf, Buf, Buf, Buf, u8, Status) -> Buf),
        );
        self.export_method(
            "wallet_sync",
            raw(wallet_sync as unsafe extern "C" fn(Pointer, Buf, Status)),
        );
        self.export_method(
            "wallet_create_utxos",
            raw(wallet_create_utxos
                as unsafe extern "C" fn(Pointer, Buf, i8, Buf, Buf, u64, i8, Status) -> u8),
        );
        self.export_method(
            "wallet_create_utxos_begin",
            raw(wallet_create_utxos_begin
                as unsafe extern "C" fn(Pointer, Buf, i8, Buf, Buf, u64, i8, Status) -> Buf),
        );
        self.export_method(
            "wallet_create_utxos_end",
            raw(wallet_create_utxos_end
                as unsafe extern "C" fn(Pointer, Buf, Buf, i8, Status) -> u8),
        );
        self.export_method(
            "wallet_sign_psbt",
            raw(wallet_sign_psbt as unsafe extern "C" fn(Pointer, Buf, Status) -> Buf),
        );
        self.export_method(
            "wallet_refresh",
            raw(wallet_refresh
                as unsafe extern "C" fn(Pointer, Buf, Buf, Buf, i8, Status) -> Buf),
        );
        self.export_method(
            "wallet_send",
            raw(wallet_send
                as unsafe extern "C" fn(Pointer, Buf, Buf, i8, u64, u8, i8, Status) -> Buf),
        );
        self.export_method(
            "wallet_list_unspents",
            raw(wallet_list_unspents
                as unsafe extern "C" fn(Pointer, Buf, i8, i8, Status) -> Buf),
        );
    }

    fn export_method(&mut self, method: &str, symbol: RawSymbol) {
        self.export(&format!("uniffi_rgblibuniffi_fn_method_{method}"), symbol);
    }

    fn export(&mut self, name: &str, symbol: RawSymbol) {
        self.symbols.insert(name.to_string(), symbol);
    }

    fn export_object<T>(&mut self, object: &str) {
        self.export(
            &format!("uniffi_rgblibuniffi_fn_clone_{object}"),
            raw(clone_object::<T> as unsafe extern "C" fn(Pointer, Status) -> Pointer),
        );
        self.export(
            &format!("uniffi_rgblibuniffi_fn_free_{object}"),
            raw(free_object::<T> as unsafe extern "C" fn(Pointer, Status)),
        );
    }

    pub fn with_contract_version(mut self, version: u32) -> Self {
        self.contract_version = version;
        self
    }

    pub fn with_checksum(mut self, symbol: &'static str, checksum: u16) -> Self {
        self.checksums.insert(symbol, checksum);
        self
    }

    pub fn without_symbol(mut self, name: &str) -> Self {
        self.symbols.remove(name);
        self
    }
}

impl SymbolSource for FakeLibrary {
    fn library_name(&self) -> &str {
        "fake-rgblibuniffi"
    }

    fn resolve(&self, symbol: &str) -> Result<RawSymbol, LoadError> {
        self.symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| LoadError::SymbolNotFound {
                library: self.library_name().to_string(),
                symbol: symbol.to_string(),
            })
    }

    fn contract_version(&self, _namespace: &str) -> Result<u32, LoadError> {
        Ok(self.contract_version)
    }

    fn checksum(&self, namespace: &str, symbol: &str) -> Result<u16, LoadError> {
        self.checksums
            .get(symbol)
            .copied()
            .ok_or_else(|| LoadError::SymbolNotFound {
                library: self.library_name().to_string(),
                symbol: format!("uniffi_{namespace}_checksum_{symbol}"),
            })
    }
}

// ============================================================================
// Interface exports
// ============================================================================

extern "C" fn contract_version_export() -> u32 {
    CONTRACT_VERSION
}

extern "C" fn stale_contract_version_export() -> u32 {
    CONTRACT_VERSION - 1
}

extern "C" fn checksum_export<const INDEX: usize>() -> u16 {
    CHECKSUMS[INDEX].1
}

extern "C" fn zero_checksum_export() -> u16 {
    0
}

macro_rules! checksum_exports {
    ($($index:literal)*) => {
        [$(checksum_export::<$index> as extern "C" fn() -> u16),*]
    };
}

static CHECKSUM_EXPORTS: [extern "C" fn() -> u16; 52] = checksum_exports!(
    0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25
    26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43 44 45 46 47 48 49 50 51
);

/// The fake library with its interface reported only through exported
/// functions, the way a real build reports it
///
/// Only `resolve` is implemented, so contract version and checksum lookups go
/// through the default `SymbolSource` methods.
pub struct ExportedInterface {
    inner: FakeLibrary,
}

impl ExportedInterface {
    pub fn new() -> Self {
        let mut inner = FakeLibrary::new();
        inner.export(
            "ffi_rgblibuniffi_uniffi_contract_version",
            raw(contract_version_export as extern "C" fn() -> u32),
        );
        for (index, (symbol, _)) in CHECKSUMS.iter().enumerate() {
            inner.export(
                &format!("uniffi_rgblibuniffi_checksum_{symbol}"),
                raw(CHECKSUM_EXPORTS[index]),
            );
        }
        Self { inner }
    }

    /// Report the contract version before the current one
    pub fn with_stale_contract_version(mut self) -> Self {
        self.inner.export(
            "ffi_rgblibuniffi_uniffi_contract_version",
            raw(stale_contract_version_export as extern "C" fn() -> u32),
        );
        self
    }

    /// Report checksum `0` for `symbol`
    pub fn with_zero_checksum(mut self, symbol: &str) -> Self {
        self.inner.export(
            &format!("uniffi_rgblibuniffi_checksum_{symbol}"),
            raw(zero_checksum_export as extern "C" fn() -> u16),
        );
        self
    }

    pub fn without_symbol(mut self, name: &str) -> Self {
        self.inner.symbols.remove(name);
        self
    }
}

impl SymbolSource for ExportedInterface {
    fn library_name(&self) -> &str {
        "exported-rgblibuniffi"
    }

    fn resolve(&self, symbol: &str) -> Result<RawSymbol, LoadError> {
        self.inner
            .symbols
            .get(symbol)
            .copied()
            .ok_or_else(|| LoadError::SymbolNotFound {
                library: self.library_name().to_string(),
                symbol: symbol.to_string(),
            })
    }
}

pub fn wallet_data(data_dir: &str) -> WalletData {
    WalletData {
        data_dir: data_dir.to_string(),
        bitcoin_network: BitcoinNetwork::Regtest,
        database_type: rgblib_runtime::bindings::DatabaseType::Sqlite,
        max_allocations_per_utxo: 5,
        account_xpub_vanilla: "vanilla".to_string(),
        account_xpub_colored: "colored".to_string(),
        mnemonic: Some(TEST_MNEMONIC.to_string()),
        master_fingerprint: "a1b2c3d4".to_string(),
        vanilla_keychain: None,
        supported_schemas: vec![AssetSchema::Nia, AssetSchema::Cfa],
    }
}
