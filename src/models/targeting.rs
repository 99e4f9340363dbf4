use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Audience share per age bucket. Buckets informally sum to ~1.0 but the
/// upstream model makes no hard guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeDistribution {
    #[serde(rename = "18-24")]
    pub age_18_24: f64,
    #[serde(rename = "25-34")]
    pub age_25_34: f64,
    #[serde(rename = "35-44")]
    pub age_35_44: f64,
    #[serde(rename = "45-54")]
    pub age_45_54: f64,
    #[serde(rename = "55+")]
    pub age_55_plus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderDistribution {
    pub male: f64,
    pub female: f64,
    pub other: f64,
}

/// Spend and share for one country of the geographic map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoSpend {
    pub spend: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestCluster {
    pub interest: String,
    pub affinity: f64,
    pub reach: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub label: String,
    pub percentage: f64,
    pub reach: f64,
}

/// Predicted split across the four marketing-funnel stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStagePrediction {
    pub awareness: FunnelStage,
    pub consideration: FunnelStage,
    pub conversion: FunnelStage,
    pub retention: FunnelStage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBid {
    pub time: String,
    pub cpc: f64,
    pub cpm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakCpm {
    pub value: f64,
    pub window: String,
}

/// Hourly bidding curve plus the derived peak/average/best-time summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiddingStrategy {
    pub hourly: Vec<HourlyBid>,
    pub avg_cpc: f64,
    pub peak_cpm: PeakCpm,
    pub best_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseIntent {
    pub level: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePreference {
    pub mobile: f64,
    pub desktop: f64,
    pub ios_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorOverlap {
    pub brands: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedTargeting {
    pub purchase_intent: PurchaseIntent,
    pub ai_recommendation: String,
    pub device_preference: DevicePreference,
    pub competitor_overlap: CompetitorOverlap,
}

/// Fully-populated targeting intelligence for one competitor. Raw server
/// records may omit or misshape any field; the normalizer guarantees this
/// struct is always complete before charts see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetingIntel {
    pub id: String,
    pub competitor_id: String,
    pub competitor_name: String,
    pub age_distribution: AgeDistribution,
    pub gender_distribution: GenderDistribution,
    pub geographic_spend: BTreeMap<String, GeoSpend>,
    pub interest_clusters: Vec<InterestCluster>,
    pub funnel_stage_prediction: FunnelStagePrediction,
    pub bidding_strategy: BiddingStrategy,
    pub advanced_targeting: AdvancedTargeting,
    pub data_source: String,
    pub confidence_score: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Connectivity report for the targeting-intelligence service banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingServiceStatus {
    pub connected: bool,
    pub authenticated: bool,
    pub user_has_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
