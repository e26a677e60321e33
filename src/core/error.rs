use thiserror::Error;

/// Errors raised by the discovery core
///
/// A requester without a stored location is not an error: it yields an empty
/// page flagged with `DiscoveryNotice::MissingRequesterLocation`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscoveryError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid pagination: page {page}, page size {page_size} (both must be at least 1)")]
    InvalidPagination { page: u32, page_size: u32 },
}
