//! Core library for camera-control stacks.
//!
//! This crate provides the two reusable abstractions everything above a
//! camera transport depends on:
//!
//! - [`CameraFile`]: a binary-safe file container pairing an
//!   image/metadata payload with its name, modification time, and MIME
//!   type, regardless of whether it came from memory, a path, or an open
//!   descriptor.
//! - [`PortInfoList`]: an indexable catalog of the transport ports
//!   (serial, USB, disk, PTP/IP) the host can use to reach a device,
//!   discovered through an injectable [`port::provider::PortProvider`].
//!
//! Device command protocols, capture orchestration, and UI surfaces are
//! out of scope; they consume these types from above.
//!
//! # Thread Safety
//!
//! Instances are single-owner with no internal locking; all I/O is
//! blocking and synchronous. Callers needing concurrency run these calls
//! behind their own task or thread dispatch.

pub mod error;
pub mod file;
mod mime;
pub mod port;

pub use error::{CamError, CamResult};
pub use file::{CameraFile, FileType, MimeDetection};
pub use port::{PortInfo, PortInfoList, PortType};
