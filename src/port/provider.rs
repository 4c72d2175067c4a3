//! Port enumeration providers.
//!
//! Discovery of host transports is inherently platform-dependent, so it
//! sits behind the [`PortProvider`] trait and is injected into
//! [`PortInfoList::load_with`](super::PortInfoList::load_with). The
//! catalog logic never touches an OS API directly.
//!
//! [`HostProvider`] is the default: it asks the `serialport` crate for
//! the host's serial lines (feature `serial`). [`MockProvider`] serves
//! tests and simulation setups that need a deterministic port list.

use super::PortInfo;
use crate::error::CamResult;

/// A source of host-visible transport endpoints.
///
/// `enumerate` blocks for the duration of host probing and returns the
/// endpoints in a stable order, which the catalog preserves verbatim. An
/// empty result means "no ports right now" and is not an error.
pub trait PortProvider {
    /// Queries the host environment for available transports.
    fn enumerate(&self) -> CamResult<Vec<PortInfo>>;
}

/// Default provider backed by the host's serial enumeration.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProvider;

#[cfg(feature = "serial")]
impl PortProvider for HostProvider {
    fn enumerate(&self) -> CamResult<Vec<PortInfo>> {
        use crate::error::CamError;
        use super::PortType;

        let ports = serialport::available_ports()
            .map_err(|e| CamError::Enumeration(e.to_string()))?;

        // USB-serial bridges are still serial transports; the Usb port
        // class is reserved for direct USB endpoints from other providers.
        Ok(ports
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                PortInfo::new(
                    format!("Serial Port {}", i),
                    format!("serial:{}", p.port_name),
                    PortType::Serial,
                )
            })
            .collect())
    }
}

#[cfg(not(feature = "serial"))]
impl PortProvider for HostProvider {
    fn enumerate(&self) -> CamResult<Vec<PortInfo>> {
        Err(crate::error::CamError::SerialFeatureDisabled)
    }
}

/// Deterministic provider for tests and higher-layer simulation.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    entries: Vec<PortInfo>,
    failure: Option<String>,
}

impl MockProvider {
    /// A provider that reports exactly `entries`, in order.
    pub fn new(entries: Vec<PortInfo>) -> Self {
        Self {
            entries,
            failure: None,
        }
    }

    /// A provider whose enumeration fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl PortProvider for MockProvider {
    fn enumerate(&self) -> CamResult<Vec<PortInfo>> {
        if let Some(message) = &self.failure {
            return Err(crate::error::CamError::Enumeration(message.clone()));
        }
        Ok(self.entries.clone())
    }
}
