//! Host transport port catalog.
//!
//! A [`PortInfoList`] is a loadable, indexable catalog of the
//! communication channels (serial lines, USB endpoints, network targets)
//! this host can use to reach an imaging device. A session layer loads it
//! once at startup, or again after a topology change, and resolves a
//! human-chosen port into a connectable [`PortInfo`] descriptor.
//!
//! Discovery itself is platform work and lives behind the
//! [`PortProvider`](provider::PortProvider) trait; the catalog only
//! stores, indexes, and looks up what a provider reports, which keeps
//! this part platform-independent and testable against
//! [`MockProvider`](provider::MockProvider).

pub mod provider;

use crate::error::{CamError, CamResult};
use log::debug;
use provider::PortProvider;
use serde::{Deserialize, Serialize};

/// Transport class of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PortType {
    /// RS-232 style serial line, including USB-serial bridges.
    Serial,
    /// Direct USB endpoint.
    Usb,
    /// Legacy USB stack.
    UsbOld,
    /// Mass-storage mount presented as a directory tree.
    Disk,
    /// PTP/IP network target.
    PtpIp,
    /// Direct-access USB mass storage (no SCSI pass-through).
    UsbDiskDirect,
    /// USB mass storage via SCSI pass-through.
    UsbScsi,
}

/// A single discovered transport endpoint.
///
/// `name` is the human-facing label ("Serial Port 0"); `path` is the
/// connectable address ("serial:/dev/ttyUSB0"). Neither is guaranteed
/// unique across a catalog — alias entries happen — which is why lookups
/// are defined as first-match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortInfo {
    name: String,
    path: String,
    port_type: PortType,
}

impl PortInfo {
    /// Builds a descriptor; used by providers and tests.
    pub fn new(name: impl Into<String>, path: impl Into<String>, port_type: PortType) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            port_type,
        }
    }

    /// Human-facing label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Connectable address.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Transport class.
    pub fn port_type(&self) -> PortType {
        self.port_type
    }
}

/// Ordered, indexable catalog of host transport ports.
///
/// Empty until [`load`](Self::load) runs. Entry order is whatever the
/// provider reported, kept stable for the lifetime of the load so that
/// index-returning lookups stay meaningful.
#[derive(Debug, Clone, Default)]
pub struct PortInfoList {
    entries: Vec<PortInfo>,
}

impl PortInfoList {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the catalog from the default host provider.
    ///
    /// Reload policy: refresh-on-call. Calling `load` again discards the
    /// previous entries and repopulates from scratch, which is what a
    /// caller wants after hot-plugging hardware. Fails with
    /// [`CamError::Enumeration`] (or
    /// [`CamError::SerialFeatureDisabled`]) when the provider itself
    /// cannot be queried; a host with zero ports loads successfully.
    pub fn load(&mut self) -> CamResult<()> {
        self.load_with(&provider::HostProvider)
    }

    /// Populates the catalog from an explicit provider, preserving the
    /// provider's ordering verbatim. Same reload policy as
    /// [`load`](Self::load).
    pub fn load_with(&mut self, provider: &dyn PortProvider) -> CamResult<()> {
        let entries = provider.enumerate()?;
        debug!("port enumeration found {} entries", entries.len());
        self.entries = entries;
        Ok(())
    }

    /// Number of loaded entries; 0 before any load.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// The entry at `index`, or [`CamError::IndexOutOfRange`].
    pub fn get_info(&self, index: usize) -> CamResult<&PortInfo> {
        self.entries.get(index).ok_or(CamError::IndexOutOfRange {
            index,
            count: self.entries.len(),
        })
    }

    /// Index of the first entry whose name equals `name`, or `None`.
    ///
    /// Names may repeat across entries; first-match is the deliberate
    /// tie-break. Absence is an expected outcome, not an error.
    pub fn lookup_name(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Index of the first entry whose path equals `path`, or `None`.
    /// Same first-match contract as [`lookup_name`](Self::lookup_name).
    pub fn lookup_path(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }

    /// Iterates the entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, PortInfo> {
        self.entries.iter()
    }

    /// True when no entries are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a PortInfoList {
    type Item = &'a PortInfo;
    type IntoIter = std::slice::Iter<'a, PortInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
