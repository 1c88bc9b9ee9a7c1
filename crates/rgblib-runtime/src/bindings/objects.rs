//! Native objects exposed by `rgb_lib`
//!
//! Each object owns an [`ObjectHandle`]; methods lease the handle for the
//! duration of the native call. Objects are freed when dropped or when
//! `destroy` is called, whichever comes first. Calling a method after
//! `destroy` panics.
//!
//! Top-level string arguments cross as raw UTF-8; every other compound
//! argument is lowered through the codec. Booleans passed by value cross as
//! `i8`.

use crate::bindings::types::{
    AssetCfa, AssetIfa, AssetNia, AssetSchema, AssetUda, Assets, Assignment, Balance,
    BitcoinNetwork, BtcBalance, InvoiceData, Metadata, Online, ReceiveData, Recipient,
    RecipientType, RefreshFilter, RefreshedTransfer, SendResult, Transaction, Transfer,
    TransportType, Unspent, WalletData,
};
use crate::bindings::{export, RgbLib, RgbLibError, RgbLibResult};
use crate::codec::Codec;
use crate::ffi::{
    FfiError, FfiRuntime, ObjectHandle, ObjectKind, ObjectPointer, ObjectVtable, RustBuffer,
    RustCallStatus,
};
use std::collections::HashMap;

type Status = *mut RustCallStatus;

/// Run a constructor export and wrap the returned pointer
///
/// The clone/free exports are resolved first so a missing export can never
/// leak a freshly constructed object.
///
/// # Safety
///
/// `call` must return a pointer produced by a constructor of `K`.
unsafe fn construct<K: ObjectKind>(
    runtime: &FfiRuntime,
    call: impl FnOnce(&mut RustCallStatus) -> ObjectPointer,
) -> RgbLibResult<ObjectHandle<K>> {
    let vtable = ObjectVtable::resolve::<K>(runtime)?;
    let pointer = runtime.call_with_error::<RgbLibError, _>(call)?;
    Ok(ObjectHandle::from_parts(runtime.clone(), pointer, vtable))
}

/// Lease the object and run a method export that declares [`RgbLibError`]
fn invoke<K: ObjectKind, T>(
    handle: &ObjectHandle<K>,
    call: impl FnOnce(ObjectPointer, &mut RustCallStatus) -> T,
) -> RgbLibResult<T> {
    let lease = handle.acquire()?;
    handle
        .runtime()
        .call_with_error::<RgbLibError, _>(|status| call(lease.pointer(), status))
}

/// [`invoke`] for methods returning a buffer-encoded value
///
/// # Safety
///
/// `call` must return the buffer produced by the export it invokes.
unsafe fn invoke_lift<K: ObjectKind, T: Codec>(
    handle: &ObjectHandle<K>,
    call: impl FnOnce(ObjectPointer, &mut RustCallStatus) -> RustBuffer,
) -> RgbLibResult<T> {
    let raw = invoke(handle, call)?;
    Ok(handle.runtime().lift(raw)?)
}

/// [`invoke`] for methods returning a top-level string
///
/// # Safety
///
/// Same contract as [`invoke_lift`].
unsafe fn invoke_string<K: ObjectKind>(
    handle: &ObjectHandle<K>,
    call: impl FnOnce(ObjectPointer, &mut RustCallStatus) -> RustBuffer,
) -> RgbLibResult<String> {
    let raw = invoke(handle, call)?;
    Ok(handle.runtime().lift_string(raw)?)
}

/// Call a method returning a buffer-encoded value, with no declared error
fn method_lift<K, T>(handle: &ObjectHandle<K>, name: &str) -> Result<T, FfiError>
where
    K: ObjectKind,
    T: Codec,
{
    let runtime = handle.runtime();
    let f: unsafe extern "C" fn(ObjectPointer, Status) -> RustBuffer =
        unsafe { export(runtime, "method", name)? };
    let lease = handle.acquire()?;
    let raw = runtime.call(|status| unsafe { f(lease.pointer(), status) })?;
    // Safety: `raw` is the buffer the export just returned
    unsafe { runtime.lift(raw) }
}

/// Call a method returning a string, with no declared error
fn method_string<K: ObjectKind>(handle: &ObjectHandle<K>, name: &str) -> Result<String, FfiError> {
    let runtime = handle.runtime();
    let f: unsafe extern "C" fn(ObjectPointer, Status) -> RustBuffer =
        unsafe { export(runtime, "method", name)? };
    let lease = handle.acquire()?;
    let raw = runtime.call(|status| unsafe { f(lease.pointer(), status) })?;
    // Safety: `raw` is the buffer the export just returned
    unsafe { runtime.lift_string(raw) }
}

/// A Bitcoin address validated by the native library
#[derive(Debug)]
pub struct Address {
    handle: ObjectHandle<Address>,
}

impl ObjectKind for Address {
    const NAME: &'static str = "Address";
    const SYMBOL: &'static str = "address";
}

impl Address {
    pub fn new(lib: &RgbLib, address: &str, network: BitcoinNetwork) -> RgbLibResult<Self> {
        let runtime = lib.runtime();
        let f: unsafe extern "C" fn(RustBuffer, RustBuffer, Status) -> ObjectPointer =
            unsafe { export(runtime, "constructor", "address_new")? };
        let address = runtime.lower_string(address)?;
        let network = runtime.lower(&network)?;
        let handle = unsafe {
            construct(runtime, |status| {
                f(address.into_raw(), network.into_raw(), status)
            })?
        };
        Ok(Self { handle })
    }

    pub fn destroy(&self) {
        self.handle.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_destroyed()
    }
}

/// A parsed RGB invoice
#[derive(Debug)]
pub struct Invoice {
    handle: ObjectHandle<Invoice>,
}

impl ObjectKind for Invoice {
    const NAME: &'static str = "Invoice";
    const SYMBOL: &'static str = "invoice";
}

impl Invoice {
    pub fn new(lib: &RgbLib, invoice_string: &str) -> RgbLibResult<Self> {
        let runtime = lib.runtime();
        let f: unsafe extern "C" fn(RustBuffer, Status) -> ObjectPointer =
            unsafe { export(runtime, "constructor", "invoice_new")? };
        let invoice_string = runtime.lower_string(invoice_string)?;
        let handle =
            unsafe { construct(runtime, |status| f(invoice_string.into_raw(), status))? };
        Ok(Self { handle })
    }

    pub fn invoice_data(&self) -> Result<InvoiceData, FfiError> {
        method_lift(&self.handle, "invoice_invoice_data")
    }

    pub fn invoice_string(&self) -> Result<String, FfiError> {
        method_string(&self.handle, "invoice_invoice_string")
    }

    pub fn destroy(&self) {
        self.handle.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_destroyed()
    }
}

#[derive(Debug)]
pub struct RecipientInfo {
    handle: ObjectHandle<RecipientInfo>,
}

impl ObjectKind for RecipientInfo {
    const NAME: &'static str = "RecipientInfo";
    const SYMBOL: &'static str = "recipientinfo";
}

impl RecipientInfo {
    pub fn new(lib: &RgbLib, recipient_id: &str) -> RgbLibResult<Self> {
        let runtime = lib.runtime();
        let f: unsafe extern "C" fn(RustBuffer, Status) -> ObjectPointer =
            unsafe { export(runtime, "constructor", "recipientinfo_new")? };
        let recipient_id = runtime.lower_string(recipient_id)?;
        let handle = unsafe { construct(runtime, |status| f(recipient_id.into_raw(), status))? };
        Ok(Self { handle })
    }

    pub fn network(&self) -> Result<BitcoinNetwork, FfiError> {
        method_lift(&self.handle, "recipientinfo_network")
    }

    pub fn recipient_type(&self) -> Result<RecipientType, FfiError> {
        method_lift(&self.handle, "recipientinfo_recipient_type")
    }

    pub fn destroy(&self) {
        self.handle.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_destroyed()
    }
}

#[derive(Debug)]
pub struct TransportEndpoint {
    handle: ObjectHandle<TransportEndpoint>,
}

impl ObjectKind for TransportEndpoint {
    const NAME: &'static str = "TransportEndpoint";
    const SYMBOL: &'static str = "transportendpoint";
}

impl TransportEndpoint {
    pub fn new(lib: &RgbLib, transport_endpoint: &str) -> RgbLibResult<Self> {
        let runtime = lib.runtime();
        let f: unsafe extern "C" fn(RustBuffer, Status) -> ObjectPointer =
            unsafe { export(runtime, "constructor", "transportendpoint_new")? };
        let transport_endpoint = runtime.lower_string(transport_endpoint)?;
        let handle =
            unsafe { construct(runtime, |status| f(transport_endpoint.into_raw(), status))? };
        Ok(Self { handle })
    }

    pub fn transport_type(&self) -> Result<TransportType, FfiError> {
        method_lift(&self.handle, "transportendpoint_transport_type")
    }

    pub fn destroy(&self) {
        self.handle.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_destroyed()
    }
}

/// An RGB wallet living in the native library
///
/// Methods taking an [`Online`] token need a prior [`Wallet::go_online`].
/// The `*_begin`/`*_end` pairs split an operation around external PSBT
/// signing: `begin` returns the unsigned PSBT, `end` takes the signed one.
#[derive(Debug)]
pub struct Wallet {
    handle: ObjectHandle<Wallet>,
}

impl ObjectKind for Wallet {
    const NAME: &'static str = "Wallet";
    const SYMBOL: &'static str = "wallet";
}

type Buf = RustBuffer;
type Ptr = ObjectPointer;

impl Wallet {
    pub fn new(lib: &RgbLib, wallet_data: &WalletData) -> RgbLibResult<Self> {
        let runtime = lib.runtime();
        let f: unsafe extern "C" fn(Buf, Status) -> ObjectPointer =
            unsafe { export(runtime, "constructor", "wallet_new")? };
        let wallet_data = runtime.lower(wallet_data)?;
        let handle = unsafe { construct(runtime, |status| f(wallet_data.into_raw(), status))? };
        Ok(Self { handle })
    }

    fn runtime(&self) -> &FfiRuntime {
        self.handle.runtime()
    }

    /// Resolve `uniffi_<ns>_fn_method_wallet_<name>`
    ///
    /// # Safety
    ///
    /// `F` must match the generated signature of the export.
    unsafe fn method<F: Copy>(&self, name: &str) -> Result<F, FfiError> {
        export(self.runtime(), "method", &format!("wallet_{name}"))
    }

    // ------------------------------------------------------------------------
    // Local state
    // ------------------------------------------------------------------------

    pub fn get_wallet_data(&self) -> Result<WalletData, FfiError> {
        method_lift(&self.handle, "wallet_get_wallet_data")
    }

    pub fn get_wallet_dir(&self) -> Result<String, FfiError> {
        method_string(&self.handle, "wallet_get_wallet_dir")
    }

    pub fn get_media_dir(&self) -> Result<String, FfiError> {
        method_string(&self.handle, "wallet_get_media_dir")
    }

    pub fn get_address(&self) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Status) -> Buf = unsafe { self.method("get_address")? };
        unsafe { invoke_string(&self.handle, |this, status| f(this, status)) }
    }

    pub fn backup(&self, backup_path: &str, password: &str) -> RgbLibResult<()> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, Status) = unsafe { self.method("backup")? };
        let backup_path = self.runtime().lower_string(backup_path)?;
        let password = self.runtime().lower_string(password)?;
        invoke(&self.handle, |this, status| unsafe {
            f(this, backup_path.into_raw(), password.into_raw(), status)
        })
    }

    /// Whether a backup is needed since the last one
    pub fn backup_info(&self) -> RgbLibResult<bool> {
        let f: unsafe extern "C" fn(Ptr, Status) -> i8 = unsafe { self.method("backup_info")? };
        let flag = invoke(&self.handle, |this, status| unsafe { f(this, status) })?;
        Ok(flag != 0)
    }

    pub fn get_asset_balance(&self, asset_id: &str) -> RgbLibResult<Balance> {
        let f: unsafe extern "C" fn(Ptr, Buf, Status) -> Buf =
            unsafe { self.method("get_asset_balance")? };
        let asset_id = self.runtime().lower_string(asset_id)?;
        unsafe { invoke_lift(&self.handle, |this, status| f(this, asset_id.into_raw(), status)) }
    }

    pub fn get_asset_metadata(&self, asset_id: &str) -> RgbLibResult<Metadata> {
        let f: unsafe extern "C" fn(Ptr, Buf, Status) -> Buf =
            unsafe { self.method("get_asset_metadata")? };
        let asset_id = self.runtime().lower_string(asset_id)?;
        unsafe { invoke_lift(&self.handle, |this, status| f(this, asset_id.into_raw(), status)) }
    }

    /// List assets, limited to `filter_asset_schemas` unless it is empty
    pub fn list_assets(&self, filter_asset_schemas: Vec<AssetSchema>) -> RgbLibResult<Assets> {
        let f: unsafe extern "C" fn(Ptr, Buf, Status) -> Buf =
            unsafe { self.method("list_assets")? };
        let filter = self.runtime().lower(&filter_asset_schemas)?;
        unsafe { invoke_lift(&self.handle, |this, status| f(this, filter.into_raw(), status)) }
    }

    pub fn list_transfers(&self, asset_id: Option<String>) -> RgbLibResult<Vec<Transfer>> {
        let f: unsafe extern "C" fn(Ptr, Buf, Status) -> Buf =
            unsafe { self.method("list_transfers")? };
        let asset_id = self.runtime().lower(&asset_id)?;
        unsafe { invoke_lift(&self.handle, |this, status| f(this, asset_id.into_raw(), status)) }
    }

    pub fn delete_transfers(
        &self,
        batch_transfer_idx: Option<i32>,
        no_asset_only: bool,
    ) -> RgbLibResult<bool> {
        let f: unsafe extern "C" fn(Ptr, Buf, i8, Status) -> i8 =
            unsafe { self.method("delete_transfers")? };
        let batch_transfer_idx = self.runtime().lower(&batch_transfer_idx)?;
        let deleted = invoke(&self.handle, |this, status| unsafe {
            f(this, batch_transfer_idx.into_raw(), i8::from(no_asset_only), status)
        })?;
        Ok(deleted != 0)
    }

    // ------------------------------------------------------------------------
    // Issuance
    // ------------------------------------------------------------------------

    pub fn issue_asset_nia(
        &self,
        ticker: &str,
        name: &str,
        precision: u8,
        amounts: Vec<u64>,
    ) -> RgbLibResult<AssetNia> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, u8, Buf, Status) -> Buf =
            unsafe { self.method("issue_asset_nia")? };
        let runtime = self.runtime();
        let ticker = runtime.lower_string(ticker)?;
        let name = runtime.lower_string(name)?;
        let amounts = runtime.lower(&amounts)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(this, ticker.into_raw(), name.into_raw(), precision, amounts.into_raw(), status)
            })
        }
    }

    pub fn issue_asset_uda(
        &self,
        ticker: &str,
        name: &str,
        details: Option<String>,
        precision: u8,
        media_file_path: Option<String>,
        attachments_file_paths: Vec<String>,
    ) -> RgbLibResult<AssetUda> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, Buf, u8, Buf, Buf, Status) -> Buf =
            unsafe { self.method("issue_asset_uda")? };
        let runtime = self.runtime();
        let ticker = runtime.lower_string(ticker)?;
        let name = runtime.lower_string(name)?;
        let details = runtime.lower(&details)?;
        let media_file_path = runtime.lower(&media_file_path)?;
        let attachments_file_paths = runtime.lower(&attachments_file_paths)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    ticker.into_raw(),
                    name.into_raw(),
                    details.into_raw(),
                    precision,
                    media_file_path.into_raw(),
                    attachments_file_paths.into_raw(),
                    status,
                )
            })
        }
    }

    pub fn issue_asset_cfa(
        &self,
        name: &str,
        details: Option<String>,
        precision: u8,
        amounts: Vec<u64>,
        file_path: Option<String>,
    ) -> RgbLibResult<AssetCfa> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, u8, Buf, Buf, Status) -> Buf =
            unsafe { self.method("issue_asset_cfa")? };
        let runtime = self.runtime();
        let name = runtime.lower_string(name)?;
        let details = runtime.lower(&details)?;
        let amounts = runtime.lower(&amounts)?;
        let file_path = runtime.lower(&file_path)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    name.into_raw(),
                    details.into_raw(),
                    precision,
                    amounts.into_raw(),
                    file_path.into_raw(),
                    status,
                )
            })
        }
    }

    pub fn issue_asset_ifa(
        &self,
        ticker: &str,
        name: &str,
        precision: u8,
        amounts: Vec<u64>,
        inflation_amounts: Vec<u64>,
        replace_rights_num: u8,
    ) -> RgbLibResult<AssetIfa> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, u8, Buf, Buf, u8, Status) -> Buf =
            unsafe { self.method("issue_asset_ifa")? };
        let runtime = self.runtime();
        let ticker = runtime.lower_string(ticker)?;
        let name = runtime.lower_string(name)?;
        let amounts = runtime.lower(&amounts)?;
        let inflation_amounts = runtime.lower(&inflation_amounts)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    ticker.into_raw(),
                    name.into_raw(),
                    precision,
                    amounts.into_raw(),
                    inflation_amounts.into_raw(),
                    replace_rights_num,
                    status,
                )
            })
        }
    }

    // ------------------------------------------------------------------------
    // Receiving
    // ------------------------------------------------------------------------

    /// Receive on a blinded UTXO
    pub fn blind_receive(
        &self,
        asset_id: Option<String>,
        assignment: &Assignment,
        duration_seconds: Option<u32>,
        transport_endpoints: Vec<String>,
        min_confirmations: u8,
    ) -> RgbLibResult<ReceiveData> {
        self.receive(
            "blind_receive",
            asset_id,
            assignment,
            duration_seconds,
            transport_endpoints,
            min_confirmations,
        )
    }

    /// Receive on a wallet-controlled script
    pub fn witness_receive(
        &self,
        asset_id: Option<String>,
        assignment: &Assignment,
        duration_seconds: Option<u32>,
        transport_endpoints: Vec<String>,
        min_confirmations: u8,
    ) -> RgbLibResult<ReceiveData> {
        self.receive(
            "witness_receive",
            asset_id,
            assignment,
            duration_seconds,
            transport_endpoints,
            min_confirmations,
        )
    }

    fn receive(
        &self,
        name: &str,
        asset_id: Option<String>,
        assignment: &Assignment,
        duration_seconds: Option<u32>,
        transport_endpoints: Vec<String>,
        min_confirmations: u8,
    ) -> RgbLibResult<ReceiveData> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, Buf, Buf, u8, Status) -> Buf =
            unsafe { self.method(name)? };
        let runtime = self.runtime();
        let asset_id = runtime.lower(&asset_id)?;
        let assignment = runtime.lower(assignment)?;
        let duration_seconds = runtime.lower(&duration_seconds)?;
        let transport_endpoints = runtime.lower(&transport_endpoints)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    asset_id.into_raw(),
                    assignment.into_raw(),
                    duration_seconds.into_raw(),
                    transport_endpoints.into_raw(),
                    min_confirmations,
                    status,
                )
            })
        }
    }

    // ------------------------------------------------------------------------
    // Online
    // ------------------------------------------------------------------------

    pub fn go_online(
        &self,
        skip_consistency_check: bool,
        indexer_url: &str,
    ) -> RgbLibResult<Online> {
        let f: unsafe extern "C" fn(Ptr, i8, Buf, Status) -> Buf =
            unsafe { self.method("go_online")? };
        let indexer_url = self.runtime().lower_string(indexer_url)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(this, i8::from(skip_consistency_check), indexer_url.into_raw(), status)
            })
        }
    }

    pub fn get_btc_balance(
        &self,
        online: Option<Online>,
        skip_sync: bool,
    ) -> RgbLibResult<BtcBalance> {
        let f: unsafe extern "C" fn(Ptr, Buf, i8, Status) -> Buf =
            unsafe { self.method("get_btc_balance")? };
        let online = self.runtime().lower(&online)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(this, online.into_raw(), i8::from(skip_sync), status)
            })
        }
    }

    /// Fee rate estimate for confirmation within `blocks`
    pub fn get_fee_estimation(&self, online: &Online, blocks: u16) -> RgbLibResult<f64> {
        let f: unsafe extern "C" fn(Ptr, Buf, u16, Status) -> f64 =
            unsafe { self.method("get_fee_estimation")? };
        let online = self.runtime().lower(online)?;
        invoke(&self.handle, |this, status| unsafe {
            f(this, online.into_raw(), blocks, status)
        })
    }

    pub fn sync(&self, online: &Online) -> RgbLibResult<()> {
        let f: unsafe extern "C" fn(Ptr, Buf, Status) = unsafe { self.method("sync")? };
        let online = self.runtime().lower(online)?;
        invoke(&self.handle, |this, status| unsafe {
            f(this, online.into_raw(), status)
        })
    }

    /// Refresh pending transfers, keyed by transfer index
    pub fn refresh(
        &self,
        online: &Online,
        asset_id: Option<String>,
        filter: Vec<RefreshFilter>,
        skip_sync: bool,
    ) -> RgbLibResult<HashMap<i32, RefreshedTransfer>> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, Buf, i8, Status) -> Buf =
            unsafe { self.method("refresh")? };
        let runtime = self.runtime();
        let online = runtime.lower(online)?;
        let asset_id = runtime.lower(&asset_id)?;
        let filter = runtime.lower(&filter)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    asset_id.into_raw(),
                    filter.into_raw(),
                    i8::from(skip_sync),
                    status,
                )
            })
        }
    }

    pub fn fail_transfers(
        &self,
        online: &Online,
        batch_transfer_idx: Option<i32>,
        no_asset_only: bool,
        skip_sync: bool,
    ) -> RgbLibResult<bool> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, i8, i8, Status) -> i8 =
            unsafe { self.method("fail_transfers")? };
        let online = self.runtime().lower(online)?;
        let batch_transfer_idx = self.runtime().lower(&batch_transfer_idx)?;
        let failed = invoke(&self.handle, |this, status| unsafe {
            f(
                this,
                online.into_raw(),
                batch_transfer_idx.into_raw(),
                i8::from(no_asset_only),
                i8::from(skip_sync),
                status,
            )
        })?;
        Ok(failed != 0)
    }

    pub fn list_transactions(
        &self,
        online: Option<Online>,
        skip_sync: bool,
    ) -> RgbLibResult<Vec<Transaction>> {
        let f: unsafe extern "C" fn(Ptr, Buf, i8, Status) -> Buf =
            unsafe { self.method("list_transactions")? };
        let online = self.runtime().lower(&online)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(this, online.into_raw(), i8::from(skip_sync), status)
            })
        }
    }

    pub fn list_unspents(
        &self,
        online: Option<Online>,
        settled_only: bool,
        skip_sync: bool,
    ) -> RgbLibResult<Vec<Unspent>> {
        let f: unsafe extern "C" fn(Ptr, Buf, i8, i8, Status) -> Buf =
            unsafe { self.method("list_unspents")? };
        let online = self.runtime().lower(&online)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    i8::from(settled_only),
                    i8::from(skip_sync),
                    status,
                )
            })
        }
    }

    // ------------------------------------------------------------------------
    // UTXOs
    // ------------------------------------------------------------------------

    /// Create colorable UTXOs, returning how many were created
    pub fn create_utxos(
        &self,
        online: &Online,
        up_to: bool,
        num: Option<u8>,
        size: Option<u32>,
        fee_rate: u64,
        skip_sync: bool,
    ) -> RgbLibResult<u8> {
        let f: unsafe extern "C" fn(Ptr, Buf, i8, Buf, Buf, u64, i8, Status) -> u8 =
            unsafe { self.method("create_utxos")? };
        let runtime = self.runtime();
        let online = runtime.lower(online)?;
        let num = runtime.lower(&num)?;
        let size = runtime.lower(&size)?;
        invoke(&self.handle, |this, status| unsafe {
            f(
                this,
                online.into_raw(),
                i8::from(up_to),
                num.into_raw(),
                size.into_raw(),
                fee_rate,
                i8::from(skip_sync),
                status,
            )
        })
    }

    /// Prepare the PSBT for [`Wallet::create_utxos`]
    pub fn create_utxos_begin(
        &self,
        online: &Online,
        up_to: bool,
        num: Option<u8>,
        size: Option<u32>,
        fee_rate: u64,
        skip_sync: bool,
    ) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Buf, i8, Buf, Buf, u64, i8, Status) -> Buf =
            unsafe { self.method("create_utxos_begin")? };
        let runtime = self.runtime();
        let online = runtime.lower(online)?;
        let num = runtime.lower(&num)?;
        let size = runtime.lower(&size)?;
        unsafe {
            invoke_string(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    i8::from(up_to),
                    num.into_raw(),
                    size.into_raw(),
                    fee_rate,
                    i8::from(skip_sync),
                    status,
                )
            })
        }
    }

    pub fn create_utxos_end(
        &self,
        online: &Online,
        signed_psbt: &str,
        skip_sync: bool,
    ) -> RgbLibResult<u8> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, i8, Status) -> u8 =
            unsafe { self.method("create_utxos_end")? };
        let online = self.runtime().lower(online)?;
        let signed_psbt = self.runtime().lower_string(signed_psbt)?;
        invoke(&self.handle, |this, status| unsafe {
            f(
                this,
                online.into_raw(),
                signed_psbt.into_raw(),
                i8::from(skip_sync),
                status,
            )
        })
    }

    // ------------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------------

    /// Send assets to recipients grouped by asset ID
    pub fn send(
        &self,
        online: &Online,
        recipient_map: HashMap<String, Vec<Recipient>>,
        donation: bool,
        fee_rate: u64,
        min_confirmations: u8,
        skip_sync: bool,
    ) -> RgbLibResult<SendResult> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, i8, u64, u8, i8, Status) -> Buf =
            unsafe { self.method("send")? };
        let online = self.runtime().lower(online)?;
        let recipient_map = self.runtime().lower(&recipient_map)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    recipient_map.into_raw(),
                    i8::from(donation),
                    fee_rate,
                    min_confirmations,
                    i8::from(skip_sync),
                    status,
                )
            })
        }
    }

    pub fn send_begin(
        &self,
        online: &Online,
        recipient_map: HashMap<String, Vec<Recipient>>,
        donation: bool,
        fee_rate: u64,
        min_confirmations: u8,
    ) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, i8, u64, u8, Status) -> Buf =
            unsafe { self.method("send_begin")? };
        let online = self.runtime().lower(online)?;
        let recipient_map = self.runtime().lower(&recipient_map)?;
        unsafe {
            invoke_string(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    recipient_map.into_raw(),
                    i8::from(donation),
                    fee_rate,
                    min_confirmations,
                    status,
                )
            })
        }
    }

    pub fn send_end(
        &self,
        online: &Online,
        signed_psbt: &str,
        skip_sync: bool,
    ) -> RgbLibResult<SendResult> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, i8, Status) -> Buf =
            unsafe { self.method("send_end")? };
        let online = self.runtime().lower(online)?;
        let signed_psbt = self.runtime().lower_string(signed_psbt)?;
        unsafe {
            invoke_lift(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    signed_psbt.into_raw(),
                    i8::from(skip_sync),
                    status,
                )
            })
        }
    }

    /// Send bitcoins, returning the broadcast txid
    pub fn send_btc(
        &self,
        online: &Online,
        address: &str,
        amount: u64,
        fee_rate: u64,
        skip_sync: bool,
    ) -> RgbLibResult<String> {
        self.send_btc_with("send_btc", online, address, amount, fee_rate, skip_sync)
    }

    /// Prepare the PSBT for [`Wallet::send_btc`]
    pub fn send_btc_begin(
        &self,
        online: &Online,
        address: &str,
        amount: u64,
        fee_rate: u64,
        skip_sync: bool,
    ) -> RgbLibResult<String> {
        self.send_btc_with("send_btc_begin", online, address, amount, fee_rate, skip_sync)
    }

    fn send_btc_with(
        &self,
        name: &str,
        online: &Online,
        address: &str,
        amount: u64,
        fee_rate: u64,
        skip_sync: bool,
    ) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, u64, u64, i8, Status) -> Buf =
            unsafe { self.method(name)? };
        let online = self.runtime().lower(online)?;
        let address = self.runtime().lower_string(address)?;
        unsafe {
            invoke_string(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    address.into_raw(),
                    amount,
                    fee_rate,
                    i8::from(skip_sync),
                    status,
                )
            })
        }
    }

    pub fn send_btc_end(
        &self,
        online: &Online,
        signed_psbt: &str,
        skip_sync: bool,
    ) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, i8, Status) -> Buf =
            unsafe { self.method("send_btc_end")? };
        let online = self.runtime().lower(online)?;
        let signed_psbt = self.runtime().lower_string(signed_psbt)?;
        unsafe {
            invoke_string(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    signed_psbt.into_raw(),
                    i8::from(skip_sync),
                    status,
                )
            })
        }
    }

    /// Send all bitcoins to `address`
    pub fn drain_to(
        &self,
        online: &Online,
        address: &str,
        destroy_assets: bool,
        fee_rate: u64,
    ) -> RgbLibResult<String> {
        self.drain_to_with("drain_to", online, address, destroy_assets, fee_rate)
    }

    pub fn drain_to_begin(
        &self,
        online: &Online,
        address: &str,
        destroy_assets: bool,
        fee_rate: u64,
    ) -> RgbLibResult<String> {
        self.drain_to_with("drain_to_begin", online, address, destroy_assets, fee_rate)
    }

    fn drain_to_with(
        &self,
        name: &str,
        online: &Online,
        address: &str,
        destroy_assets: bool,
        fee_rate: u64,
    ) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, i8, u64, Status) -> Buf =
            unsafe { self.method(name)? };
        let online = self.runtime().lower(online)?;
        let address = self.runtime().lower_string(address)?;
        unsafe {
            invoke_string(&self.handle, |this, status| {
                f(
                    this,
                    online.into_raw(),
                    address.into_raw(),
                    i8::from(destroy_assets),
                    fee_rate,
                    status,
                )
            })
        }
    }

    pub fn drain_to_end(&self, online: &Online, signed_psbt: &str) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Buf, Buf, Status) -> Buf =
            unsafe { self.method("drain_to_end")? };
        let online = self.runtime().lower(online)?;
        let signed_psbt = self.runtime().lower_string(signed_psbt)?;
        unsafe {
            invoke_string(&self.handle, |this, status| {
                f(this, online.into_raw(), signed_psbt.into_raw(), status)
            })
        }
    }

    // ------------------------------------------------------------------------
    // PSBT
    // ------------------------------------------------------------------------

    pub fn sign_psbt(&self, unsigned_psbt: &str) -> RgbLibResult<String> {
        self.psbt("sign_psbt", unsigned_psbt)
    }

    pub fn finalize_psbt(&self, signed_psbt: &str) -> RgbLibResult<String> {
        self.psbt("finalize_psbt", signed_psbt)
    }

    fn psbt(&self, name: &str, psbt: &str) -> RgbLibResult<String> {
        let f: unsafe extern "C" fn(Ptr, Buf, Status) -> Buf = unsafe { self.method(name)? };
        let psbt = self.runtime().lower_string(psbt)?;
        unsafe { invoke_string(&self.handle, |this, status| f(this, psbt.into_raw(), status)) }
    }

    pub fn destroy(&self) {
        self.handle.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.handle.is_destroyed()
    }
}
