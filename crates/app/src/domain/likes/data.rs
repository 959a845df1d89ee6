//! Like Data

/// The state of a product's likes after a toggle, from the calling
/// account's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    /// Whether the account likes the product after the toggle.
    pub liked: bool,

    /// Total number of accounts liking the product.
    pub likes_count: u64,
}
