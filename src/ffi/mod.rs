// ABOUTME: C ABI surface exposing the solution engine to host runtimes
// ABOUTME: Status-code returns, out-params, and a thread-local last-error message

pub mod handle;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde_json::Value;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::sync::Arc;

use crate::solution::Solution;
use self::handle::{HandleError, HandleTable, RawHandle};

/// Version of this binding surface; bumped on any breaking change to the
/// exported functions or the sequence serialization contract
pub const ABI_VERSION: u32 = 1;

/// Result status for every exported operation
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    NullArgument = 1,
    InvalidString = 2,
    UnknownHandle = 3,
    StaleHandle = 4,
    OpenFailed = 5,
    InvalidJson = 6,
    GenerateFailed = 7,
}

static SOLUTIONS: Lazy<Mutex<HandleTable<Arc<Solution>>>> =
    Lazy::new(|| Mutex::new(HandleTable::new()));

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(message: &str) {
    let sanitized = message.replace('\0', " ");
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = CString::new(sanitized).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| {
        slot.borrow_mut().take();
    });
}

fn handle_status(e: HandleError) -> Status {
    set_last_error(&e.to_string());
    match e {
        HandleError::Unknown => Status::UnknownHandle,
        HandleError::Stale => Status::StaleHandle,
    }
}

/// Borrow a C string argument. Null pointers and non-UTF-8 content are
/// rejected with a status rather than dereferenced blindly.
///
/// # Safety
/// `ptr` must be null or a valid NUL-terminated string for the call's duration.
unsafe fn str_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, Status> {
    if ptr.is_null() {
        set_last_error(&format!("{} must not be null", name));
        return Err(Status::NullArgument);
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| {
        set_last_error(&format!("{} is not valid UTF-8", name));
        Status::InvalidString
    })
}

fn lookup(handle: RawHandle) -> Result<Arc<Solution>, Status> {
    SOLUTIONS
        .lock()
        .get(handle)
        .map(Arc::clone)
        .map_err(handle_status)
}

/// ABI version of this library
#[no_mangle]
pub extern "C" fn solstice_abi_version() -> u32 {
    ABI_VERSION
}

/// Open a solution bundle and write its handle to `out_handle`
#[no_mangle]
pub extern "C" fn solstice_open(dir: *const c_char, out_handle: *mut RawHandle) -> Status {
    clear_last_error();
    if out_handle.is_null() {
        set_last_error("out_handle must not be null");
        return Status::NullArgument;
    }
    let dir = match unsafe { str_arg(dir, "dir") } {
        Ok(dir) => dir,
        Err(status) => return status,
    };

    match Solution::open(dir) {
        Ok(solution) => {
            let handle = SOLUTIONS.lock().insert(Arc::new(solution));
            unsafe { *out_handle = handle };
            Status::Ok
        }
        Err(e) => {
            set_last_error(&format!("open solution: {}", e));
            Status::OpenFailed
        }
    }
}

/// Dispose a solution. The handle is invalidated; every later operation on
/// it fails with `StaleHandle`.
#[no_mangle]
pub extern "C" fn solstice_close(handle: RawHandle) -> Status {
    clear_last_error();
    match SOLUTIONS.lock().remove(handle) {
        Ok(_) => Status::Ok,
        Err(e) => handle_status(e),
    }
}

/// Set a single string environment value
#[no_mangle]
pub extern "C" fn solstice_set_value(
    handle: RawHandle,
    key: *const c_char,
    value: *const c_char,
) -> Status {
    clear_last_error();
    let key = match unsafe { str_arg(key, "key") } {
        Ok(key) => key,
        Err(status) => return status,
    };
    let value = match unsafe { str_arg(value, "value") } {
        Ok(value) => value,
        Err(status) => return status,
    };
    let solution = match lookup(handle) {
        Ok(solution) => solution,
        Err(status) => return status,
    };

    solution.set_value(key, Value::from(value));
    Status::Ok
}

/// Bulk-merge environment values from a JSON object of arbitrary values
#[no_mangle]
pub extern "C" fn solstice_add_values(handle: RawHandle, values_json: *const c_char) -> Status {
    clear_last_error();
    let values_json = match unsafe { str_arg(values_json, "values_json") } {
        Ok(text) => text,
        Err(status) => return status,
    };
    let solution = match lookup(handle) {
        Ok(solution) => solution,
        Err(status) => return status,
    };

    match serde_json::from_str::<Value>(values_json) {
        Ok(Value::Object(map)) => {
            solution.add_values(map);
            Status::Ok
        }
        Ok(_) => {
            set_last_error("values_json must be a JSON object");
            Status::InvalidJson
        }
        Err(e) => {
            set_last_error(&format!("values_json is not valid JSON: {}", e));
            Status::InvalidJson
        }
    }
}

/// Generate the run sequence for a namespace. On success, writes a newly
/// allocated JSON array of `{type, config}` objects to `out_json`; the
/// caller releases it with `solstice_string_free`.
#[no_mangle]
pub extern "C" fn solstice_generate_run_sequence(
    handle: RawHandle,
    namespace: *const c_char,
    out_json: *mut *mut c_char,
) -> Status {
    clear_last_error();
    if out_json.is_null() {
        set_last_error("out_json must not be null");
        return Status::NullArgument;
    }
    let namespace = match unsafe { str_arg(namespace, "namespace") } {
        Ok(namespace) => namespace,
        Err(status) => return status,
    };
    let solution = match lookup(handle) {
        Ok(solution) => solution,
        Err(status) => return status,
    };

    let parts = match solution.generate_run_sequence(namespace) {
        Ok(parts) => parts,
        Err(e) => {
            set_last_error(&format!("generate run sequence: {}", e));
            return Status::GenerateFailed;
        }
    };

    let serialized = match serde_json::to_string(&parts) {
        Ok(serialized) => serialized,
        Err(e) => {
            set_last_error(&format!("serialize run sequence: {}", e));
            return Status::GenerateFailed;
        }
    };

    match CString::new(serialized) {
        Ok(out) => {
            unsafe { *out_json = out.into_raw() };
            Status::Ok
        }
        Err(_) => {
            set_last_error("run sequence contains an interior NUL byte");
            Status::GenerateFailed
        }
    }
}

/// Return the last error message recorded on this thread as a newly
/// allocated string, or null if none. Caller frees with
/// `solstice_string_free`.
#[no_mangle]
pub extern "C" fn solstice_last_error_message() -> *mut c_char {
    LAST_ERROR.with(|slot| match slot.borrow().as_ref() {
        Some(message) => message.clone().into_raw(),
        None => std::ptr::null_mut(),
    })
}

/// Release a string allocated by this library
///
/// # Safety
/// `ptr` must be null or a pointer previously returned by this library and
/// not yet freed.
#[no_mangle]
pub unsafe extern "C" fn solstice_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
