/// Staleness-adjusted view of an account's counter: `used` is zero when
/// the stored period no longer matches the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveUsage {
    pub used: i64,
    pub stale: bool,
}
