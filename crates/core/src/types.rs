/// All timestamps are UTC. User ids stay plain strings: they are opaque
/// tokens minted by the upstream identity provider.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
