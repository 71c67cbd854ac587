//! Bump allocation backing a single parse. Every AST node, the token
//! sequence and all interned lexemes live in one [`AstArena`] that the
//! caller releases exactly once; nothing is freed individually.

use std::alloc::Layout;

use bumpalo::Bump;

/// Fatal allocation failure. Unlike a syntax error this is never caught
/// by the parser's recovery boundary, it unwinds to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl std::fmt::Display for AllocError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "arena allocation failed")
    }
}

impl std::error::Error for AllocError {}

impl From<bumpalo::AllocErr> for AllocError {
    fn from(_: bumpalo::AllocErr) -> Self {
        Self
    }
}

#[derive(Default)]
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena that refuses to grow past `limit` bytes. Allocation past the
    /// limit surfaces as [`AllocError`] instead of aborting the process.
    pub fn with_limit(limit: usize) -> Self {
        let bump = Bump::new();
        bump.set_allocation_limit(Some(limit));
        Self { bump }
    }

    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    pub fn alloc<T>(&self, val: T) -> Result<&T, AllocError> {
        Ok(self.bump.try_alloc(val)?)
    }

    pub fn alloc_slice_copy<T: Copy>(
        &self,
        src: &[T],
    ) -> Result<&[T], AllocError> {
        if src.is_empty() {
            return Ok(&[]);
        }

        let dst = self.bump.try_alloc_layout(Layout::for_value(src))?;

        // The layout reserved size_of::<T>() * len bytes at T's
        // alignment, the copy stays in bounds.
        unsafe {
            let dst = dst.cast::<T>().as_ptr();
            std::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
            Ok(std::slice::from_raw_parts(dst, src.len()))
        }
    }

    pub fn alloc_str(&self, src: &str) -> Result<&str, AllocError> {
        let bytes = self.alloc_slice_copy(src.as_bytes())?;

        // `bytes` is a verbatim copy of an `&str`
        unsafe { Ok(std::str::from_utf8_unchecked(bytes)) }
    }
}

#[cfg(test)]
mod tests {
    use super::{AllocError, AstArena};

    #[test]
    fn allocates_values_and_slices() {
        let arena = AstArena::new();
        let n = arena.alloc(42u64).unwrap();
        assert_eq!(*n, 42);

        let xs = arena.alloc_slice_copy(&[1u32, 2, 3]).unwrap();
        assert_eq!(xs, &[1, 2, 3]);

        let s = arena.alloc_str("typedef").unwrap();
        assert_eq!(s, "typedef");
    }

    #[test]
    fn empty_slice_needs_no_allocation() {
        let arena = AstArena::with_limit(0);
        let xs: &[u8] = arena.alloc_slice_copy(&[]).unwrap();
        assert!(xs.is_empty());
    }

    #[test]
    fn limit_exhaustion_is_an_error() {
        let arena = AstArena::with_limit(0);
        assert_eq!(arena.alloc(1u8), Err(AllocError));
        assert_eq!(arena.alloc_str("x"), Err(AllocError));
    }
}
