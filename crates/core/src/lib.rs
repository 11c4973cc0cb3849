use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Starter,
    Professional,
    Unlimited,
}

impl PlanTier {
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Free,
        PlanTier::Starter,
        PlanTier::Professional,
        PlanTier::Unlimited,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(PlanTier::Free),
            "starter" => Some(PlanTier::Starter),
            "professional" => Some(PlanTier::Professional),
            "unlimited" => Some(PlanTier::Unlimited),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Starter => "starter",
            PlanTier::Professional => "professional",
            PlanTier::Unlimited => "unlimited",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Limited(u32),
    Unlimited,
}

impl Quota {
    pub fn limit(&self) -> Option<u32> {
        match self {
            Quota::Limited(value) => Some(*value),
            Quota::Unlimited => None,
        }
    }
}

/// Monthly quotas for the limited tiers. Quotas are configuration, not
/// database state; the unlimited tier has no entry by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRegistry {
    pub free: u32,
    pub starter: u32,
    pub professional: u32,
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self {
            free: 10,
            starter: 50,
            professional: 200,
        }
    }
}

impl PlanRegistry {
    pub fn quota(&self, tier: PlanTier) -> Quota {
        match tier {
            PlanTier::Free => Quota::Limited(self.free),
            PlanTier::Starter => Quota::Limited(self.starter),
            PlanTier::Professional => Quota::Limited(self.professional),
            PlanTier::Unlimited => Quota::Unlimited,
        }
    }

    /// Resolve a raw stored tier string. An unrecognized tier gets a zero
    /// quota, never unlimited.
    pub fn quota_for(&self, plan: &str) -> Quota {
        match PlanTier::parse(plan) {
            Some(tier) => self.quota(tier),
            None => Quota::Limited(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

impl PeriodKey {
    pub fn of(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// A stored counter is stale once the wall clock has left the calendar
/// month of its anchor; stale counts read as zero.
pub fn is_stale(anchor: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    PeriodKey::of(anchor) != PeriodKey::of(now)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageThreshold {
    #[serde(rename = "warn_80")]
    Warn80,
    #[serde(rename = "full_100")]
    Full100,
}

impl UsageThreshold {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageThreshold::Warn80 => "warn_80",
            UsageThreshold::Full100 => "full_100",
        }
    }
}

pub fn warn_threshold(quota: u32) -> u32 {
    quota * 8 / 10
}

/// Half-open crossing check: true when the counter moved from below the
/// mark to at-or-past it. Equality-only detection would drop a crossing
/// whenever a counter skips over the mark.
pub fn crossed(previous: i64, current: i64, mark: u32) -> bool {
    let mark = mark as i64;
    mark > 0 && previous < mark && mark <= current
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Qa,
    BlueprintAnalysis,
    Checklist,
    TechnicalReport,
    FeeCalculator,
    CostEstimate,
    DocumentDraft,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Qa,
        ToolKind::BlueprintAnalysis,
        ToolKind::Checklist,
        ToolKind::TechnicalReport,
        ToolKind::FeeCalculator,
        ToolKind::CostEstimate,
        ToolKind::DocumentDraft,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "qa" => Some(ToolKind::Qa),
            "blueprint_analysis" => Some(ToolKind::BlueprintAnalysis),
            "checklist" => Some(ToolKind::Checklist),
            "technical_report" => Some(ToolKind::TechnicalReport),
            "fee_calculator" => Some(ToolKind::FeeCalculator),
            "cost_estimate" => Some(ToolKind::CostEstimate),
            "document_draft" => Some(ToolKind::DocumentDraft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Qa => "qa",
            ToolKind::BlueprintAnalysis => "blueprint_analysis",
            ToolKind::Checklist => "checklist",
            ToolKind::TechnicalReport => "technical_report",
            ToolKind::FeeCalculator => "fee_calculator",
            ToolKind::CostEstimate => "cost_estimate",
            ToolKind::DocumentDraft => "document_draft",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub plan: String,
    pub uses_this_month: i64,
    pub period_anchor: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub used: i64,
    pub quota: Option<u32>,
    pub period: String,
    pub stale: bool,
}

impl UsageSnapshot {
    pub fn percent_used(&self) -> Option<f64> {
        match self.quota {
            Some(quota) if quota > 0 => Some((self.used as f64 / quota as f64) * 100.0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumeOutcome {
    pub allowed: bool,
    pub uses: i64,
    pub crossed: Vec<UsageThreshold>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEvent {
    pub id: i64,
    pub account_id: i64,
    pub tool: String,
    pub ts: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolBreakdown {
    pub tool: String,
    pub uses: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}
