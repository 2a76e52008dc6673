use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised by the render path. Ordinary content never fails to render;
/// the only failure is running out of memory for the per-call buffers, which
/// callers must treat as fatal.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to allocate {what} ({requested} more elements)")]
    Allocation {
        what: &'static str,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

pub type Result<T> = std::result::Result<T, RenderError>;

pub(crate) fn reserve<T>(v: &mut Vec<T>, additional: usize, what: &'static str) -> Result<()> {
    v.try_reserve(additional)
        .map_err(|source| RenderError::Allocation {
            what,
            requested: additional,
            source,
        })
}

pub(crate) fn reserve_str(s: &mut String, additional: usize, what: &'static str) -> Result<()> {
    s.try_reserve(additional)
        .map_err(|source| RenderError::Allocation {
            what,
            requested: additional,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impossible_reservation_reports_allocation_error() {
        let mut v: Vec<u64> = Vec::new();
        let err = reserve(&mut v, usize::MAX, "attribute buffer").unwrap_err();
        assert!(matches!(err, RenderError::Allocation { what: "attribute buffer", .. }));
        assert!(err.to_string().contains("attribute buffer"));
    }

    #[test]
    fn small_reservation_succeeds() {
        let mut s = String::new();
        reserve_str(&mut s, 16, "joined text").unwrap();
        assert!(s.capacity() >= 16);
    }
}
