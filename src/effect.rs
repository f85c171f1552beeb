//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the first catalog page and enrich every entry
    FetchList { limit: u32 },
    /// Fetch one creature's full record
    FetchDetail { target: String },
    /// Cancel the outstanding detail fetch, if any
    AbandonDetail,
}
