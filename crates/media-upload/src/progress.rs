//! Transfer progress as reported by transports.

/// Bytes sent so far and, when known, the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Bytes handed to the network so far.
    pub loaded: u64,
    /// Total bytes, if the transport knows it.
    pub total: Option<u64>,
}

impl ProgressEvent {
    /// Progress with a known total.
    #[must_use]
    pub const fn new(loaded: u64, total: u64) -> Self {
        Self {
            loaded,
            total: Some(total),
        }
    }

    /// Rounded percentage, when one can be computed.
    #[must_use]
    pub fn percent(&self) -> Option<u8> {
        self.total.and_then(|total| percentage(self.loaded, total))
    }
}

/// `round(loaded / total * 100)`, capped at 100. `None` when `total` is 0.
///
/// ```
/// use media_upload::percentage;
///
/// assert_eq!(percentage(50, 200), Some(25));
/// assert_eq!(percentage(1, 3), Some(33));
/// assert_eq!(percentage(5, 0), None);
/// ```
#[must_use]
pub fn percentage(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let scaled = u128::from(loaded) * 200 + u128::from(total);
    let rounded = scaled.checked_div(u128::from(total) * 2)?;
    u8::try_from(rounded.min(100)).ok()
}
