//! Typed ID aliases for every persisted entity.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for user identities.
pub struct User;

/// Marker type for houses.
pub struct House;

/// Marker type for house memberships (one row per activation).
pub struct Membership;

/// Marker type for ledger entries.
pub struct LedgerEntry;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;

pub type HouseId = Id<House>;

pub type MembershipId = Id<Membership>;

pub type LedgerEntryId = Id<LedgerEntry>;
