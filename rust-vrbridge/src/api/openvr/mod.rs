mod library;
mod runtime;

pub use self::runtime::{OpenVRCompositor, OpenVRRuntime, OpenVRSystem};
