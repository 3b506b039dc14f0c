#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type RowSlotMap = HashMap<usize, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type RowSlotMap = BTreeMap<usize, usize>;
