use libloading as lib;
#[cfg(unix)]
use libloading::os::unix::Symbol as Symbol;
#[cfg(windows)]
use libloading::os::windows::Symbol as Symbol;
use openvr_sys as openvr;
use std::os::raw::c_char;

#[cfg(target_os = "windows")]
const OPENVR_LIBRARY_NAME: &str = "openvr_api.dll";
#[cfg(target_os = "macos")]
const OPENVR_LIBRARY_NAME: &str = "libopenvr_api.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const OPENVR_LIBRARY_NAME: &str = "libopenvr_api.so";

// openvr_api entry points
type VRInitInternal = unsafe extern "C" fn(*mut openvr::EVRInitError, openvr::EVRApplicationType) -> u32;
type VRShutdownInternal = unsafe extern "C" fn();
type VRIsHmdPresent = unsafe extern "C" fn() -> bool;
type VRGetInitToken = unsafe extern "C" fn() -> u32;
type VRIsInterfaceVersionValid = unsafe extern "C" fn(*const c_char) -> bool;
type VRGetGenericInterface = unsafe extern "C" fn(*const c_char, *mut openvr::EVRInitError) -> isize;
type VRGetInitErrorAsEnglishDescription = unsafe extern "C" fn(openvr::EVRInitError) -> *const c_char;

pub struct OpenVRLibrary {
    _lib: lib::Library,
    pub init_internal: Symbol<VRInitInternal>,
    pub shutdown_internal: Symbol<VRShutdownInternal>,
    pub is_hmd_present: Symbol<VRIsHmdPresent>,
    pub get_init_token: Symbol<VRGetInitToken>,
    pub is_interface_version_valid: Symbol<VRIsInterfaceVersionValid>,
    pub get_interface: Symbol<VRGetGenericInterface>,
    pub init_error_description: Symbol<VRGetInitErrorAsEnglishDescription>,
}

impl OpenVRLibrary {
    pub unsafe fn new() -> Result<OpenVRLibrary, lib::Error> {
        let lib = lib::Library::new(OPENVR_LIBRARY_NAME)?;
        let init_internal = lib.get::<VRInitInternal>(b"VR_InitInternal\0")?.into_raw();
        let shutdown_internal = lib.get::<VRShutdownInternal>(b"VR_ShutdownInternal\0")?.into_raw();
        let is_hmd_present = lib.get::<VRIsHmdPresent>(b"VR_IsHmdPresent\0")?.into_raw();
        let get_init_token = lib.get::<VRGetInitToken>(b"VR_GetInitToken\0")?.into_raw();
        let is_interface_version_valid =
            lib.get::<VRIsInterfaceVersionValid>(b"VR_IsInterfaceVersionValid\0")?.into_raw();
        let get_interface = lib.get::<VRGetGenericInterface>(b"VR_GetGenericInterface\0")?.into_raw();
        let init_error_description =
            lib.get::<VRGetInitErrorAsEnglishDescription>(b"VR_GetVRInitErrorAsEnglishDescription\0")?.into_raw();

        Ok(OpenVRLibrary {
            _lib: lib,
            init_internal,
            shutdown_internal,
            is_hmd_present,
            get_init_token,
            is_interface_version_valid,
            get_interface,
            init_error_description,
        })
    }
}
