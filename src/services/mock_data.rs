//! Demo-mode datasets. Every read operation degrades to these when the user
//! is unauthenticated or a backend call fails, so the dashboards always have
//! renderable data.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::analytics::{
    AnalyticsBreakdown, CompetitorSpendEntry, CtrPerformanceEntry, PlatformCtrEntry,
    SpendImpressionEntry, SpendRangeEntry, UserAnalytics,
};
use crate::models::metrics::{DailyAdMetric, SummaryMetrics};
use crate::models::targeting::{
    AdvancedTargeting, AgeDistribution, BiddingStrategy, CompetitorOverlap, DevicePreference,
    FunnelStage, FunnelStagePrediction, GenderDistribution, GeoSpend, HourlyBid, InterestCluster,
    PeakCpm, PurchaseIntent, TargetingIntel,
};

const DEMO_PLATFORMS: [&str; 4] = ["Meta", "Google", "TikTok", "LinkedIn"];
const DEMO_COMPETITORS: [&str; 8] = [
    "Nike Running",
    "Adidas Sportswear",
    "Under Armour",
    "Lululemon",
    "Puma",
    "Reebok",
    "New Balance",
    "Asics",
];
const DEMO_STATUSES: [&str; 3] = ["ACTIVE", "PAUSED", "ENDED"];
const DEMO_AD_TITLES: [&str; 5] = [
    "Limited Edition Running Shoes - Up to 50% Off",
    "Summer Collection Launch - Shop Now",
    "Holiday Sale: Get 40% Off Everything",
    "New Performance Gear - Limited Stock",
    "End of Season Clearance - Save Big",
];
const DEMO_AD_BODIES: [&str; 5] = [
    "Experience ultimate comfort with our new line of running shoes. Limited time offer with free shipping.",
    "New summer activewear designed for performance and style. Exclusive online discounts available.",
    "Stock up on your favorite gear with our biggest sale of the year. Limited quantities available.",
    "Upgrade your workout routine with our latest performance technology. Designed for athletes by athletes.",
    "Don't miss out on our end of season clearance. Huge discounts on last season's collections.",
];

// Per-record RNG seed base; keeps every generated record reproducible.
const DEMO_SEED: u64 = 0x41d5_0bb5;

pub fn mock_summary_metrics() -> SummaryMetrics {
    let now = Utc::now().to_rfc3339();
    SummaryMetrics {
        id: "mock-1".to_string(),
        total_competitor_spend: 124_300.0,
        active_campaigns_count: 1_247,
        total_impressions: 12_400_000,
        average_ctr: 0.0342,
        platform_distribution: BTreeMap::from([
            ("Meta".to_string(), 36.5),
            ("Google".to_string(), 31.3),
            ("TikTok".to_string(), 19.9),
            ("LinkedIn".to_string(), 12.4),
        ]),
        top_performers: Vec::new(),
        spend_by_industry: BTreeMap::new(),
        created_at: now.clone(),
        updated_at: now,
        user_id: None,
    }
}

/// Generates demo ad records: pool fields cycle by index, numeric fields come
/// from a per-index seeded RNG so repeated calls return identical data, and
/// the result is sorted newest date first.
pub fn generate_mock_daily_metrics(count: usize, latest_only: bool) -> Vec<DailyAdMetric> {
    let today = Utc::now().date_naive();
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        let mut rng = StdRng::seed_from_u64(DEMO_SEED.wrapping_add(i as u64));

        let days_ago = if latest_only {
            0
        } else {
            rng.gen_range(0..30_i64)
        };
        let date = today - Duration::days(days_ago);

        let daily_spend = rng.gen_range(20_000..100_000) as f64;
        let daily_impressions = rng.gen_range(500_000..2_500_000_i64);

        records.push(DailyAdMetric {
            id: format!("mock-{}", i + 1),
            date,
            competitor_name: DEMO_COMPETITORS[i % DEMO_COMPETITORS.len()].to_string(),
            platform: DEMO_PLATFORMS[i % DEMO_PLATFORMS.len()].to_string(),
            status: DEMO_STATUSES[i % DEMO_STATUSES.len()].to_string(),
            daily_spend,
            daily_impressions,
            daily_ctr: rng.gen_range(0.01..0.06),
            ad_title: Some(DEMO_AD_TITLES[i % DEMO_AD_TITLES.len()].to_string()),
            ad_body: Some(DEMO_AD_BODIES[i % DEMO_AD_BODIES.len()].to_string()),
            spend_lower_bound: Some(daily_spend * 0.9),
            spend_upper_bound: Some(daily_spend * 1.1),
            impressions_lower_bound: Some(daily_impressions as f64 * 0.9),
            impressions_upper_bound: Some(daily_impressions as f64 * 1.1),
            variants: Some(rng.gen_range(1..=5)),
            ab_tests: Some(rng.gen_range(0..3)),
        });
    }

    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

pub fn mock_user_analytics() -> UserAnalytics {
    UserAnalytics {
        summary: Some(mock_summary_metrics()),
        analytics: mock_analytics_breakdown(),
        total_competitors: 5,
        total_spend: 395_000.0,
        competitor_names: vec![
            "Nike".to_string(),
            "Adidas".to_string(),
            "Under Armour".to_string(),
            "Puma".to_string(),
            "Reebok".to_string(),
        ],
    }
}

pub fn mock_analytics_breakdown() -> AnalyticsBreakdown {
    AnalyticsBreakdown {
        competitor_spend: vec![
            competitor_spend("Nike", 125_000.0, 45, 0.032),
            competitor_spend("Adidas", 98_000.0, 38, 0.028),
            competitor_spend("Under Armour", 75_000.0, 29, 0.041),
            competitor_spend("Puma", 52_000.0, 18, 0.019),
            competitor_spend("Reebok", 45_000.0, 15, 0.026),
        ],
        spend_ranges: vec![
            spend_range("Under $100", 45, 0.025, 3_500.0),
            spend_range("$100-$500", 120, 0.031, 42_000.0),
            spend_range("$500-$1K", 85, 0.028, 68_000.0),
            spend_range("$1K-$5K", 60, 0.035, 180_000.0),
            spend_range("Over $5K", 15, 0.042, 120_000.0),
        ],
        ctr_performance: vec![
            ctr_bucket("Poor (<1%)", 45, 450.0, 15.0),
            ctr_bucket("Average (1-3%)", 120, 1_200.0, 40.0),
            ctr_bucket("Good (3-5%)", 85, 1_800.0, 28.0),
            ctr_bucket("Excellent (5-10%)", 40, 2_500.0, 13.0),
            ctr_bucket("Outstanding (>10%)", 10, 3_200.0, 4.0),
        ],
        spend_impressions: vec![
            spend_impressions("Nike", 125_000.0, 12_500_000),
            spend_impressions("Adidas", 98_000.0, 9_800_000),
            spend_impressions("Under Armour", 75_000.0, 7_500_000),
            spend_impressions("Puma", 52_000.0, 5_200_000),
            spend_impressions("Reebok", 45_000.0, 4_500_000),
        ],
        platform_ctr: vec![
            platform_ctr("Meta", 0.032, 450, 125_000.0, "#00C2B3"),
            platform_ctr("Google", 0.028, 380, 98_000.0, "#4A90E2"),
            platform_ctr("TikTok", 0.041, 290, 75_000.0, "#FF6B6B"),
            platform_ctr("LinkedIn", 0.019, 180, 52_000.0, "#FFD166"),
            platform_ctr("Twitter", 0.026, 95, 32_000.0, "#1DA1F2"),
        ],
    }
}

/// Fully-populated template record. Doubles as the per-field default source
/// for targeting normalization.
pub fn mock_targeting_intel() -> TargetingIntel {
    let now = Utc::now().to_rfc3339();
    TargetingIntel {
        id: "mock-1".to_string(),
        competitor_id: "11111111-1111-1111-1111-111111111111".to_string(),
        competitor_name: "Nike".to_string(),
        age_distribution: AgeDistribution {
            age_18_24: 0.15,
            age_25_34: 0.35,
            age_35_44: 0.28,
            age_45_54: 0.15,
            age_55_plus: 0.07,
        },
        gender_distribution: GenderDistribution {
            male: 0.58,
            female: 0.40,
            other: 0.02,
        },
        geographic_spend: BTreeMap::from([
            ("United States".to_string(), geo(18_200.0, 45.0)),
            ("United Kingdom".to_string(), geo(8_900.0, 22.0)),
            ("Canada".to_string(), geo(6_100.0, 15.0)),
            ("Australia".to_string(), geo(4_000.0, 10.0)),
            ("Germany".to_string(), geo(3_200.0, 8.0)),
        ]),
        interest_clusters: vec![
            interest("Fitness & Running", 0.95, 450_000.0),
            interest("Athletic Apparel", 0.88, 380_000.0),
            interest("Health & Wellness", 0.82, 520_000.0),
            interest("Sports Equipment", 0.78, 290_000.0),
            interest("Marathon Training", 0.92, 180_000.0),
            interest("Outdoor Activities", 0.75, 610_000.0),
        ],
        funnel_stage_prediction: FunnelStagePrediction {
            awareness: stage("Cold Traffic", 45.0, 2_100_000.0),
            consideration: stage("Engagement", 30.0, 1_400_000.0),
            conversion: stage("Retargeting", 20.0, 940_000.0),
            retention: stage("Loyalty", 5.0, 235_000.0),
        },
        bidding_strategy: BiddingStrategy {
            hourly: vec![
                bid("12am", 1.1, 8.2),
                bid("3am", 0.9, 6.8),
                bid("6am", 1.6, 10.1),
                bid("9am", 2.0, 12.4),
                bid("12pm", 2.4, 14.2),
                bid("3pm", 2.2, 13.5),
                bid("6pm", 2.8, 15.6),
                bid("9pm", 1.9, 11.3),
            ],
            avg_cpc: 2.16,
            peak_cpm: PeakCpm {
                value: 15.6,
                window: "6pm-9pm".to_string(),
            },
            best_time: "3am-6am".to_string(),
        },
        advanced_targeting: AdvancedTargeting {
            purchase_intent: PurchaseIntent {
                level: "High".to_string(),
                confidence: 0.62,
            },
            ai_recommendation:
                "Focus 60% of budget on awareness to fill top funnel. Strong retargeting opportunity observed."
                    .to_string(),
            device_preference: DevicePreference {
                mobile: 0.78,
                desktop: 0.22,
                ios_share: 0.65,
            },
            competitor_overlap: CompetitorOverlap {
                brands: 3.2,
                description: "Audience overlaps with similar athletic brands".to_string(),
            },
        },
        data_source: "AI_MODELED".to_string(),
        confidence_score: 0.75,
        created_at: now.clone(),
        updated_at: now,
    }
}

fn competitor_spend(name: &str, total_spend: f64, ad_count: i64, avg_ctr: f64) -> CompetitorSpendEntry {
    CompetitorSpendEntry {
        competitor_name: name.to_string(),
        total_spend,
        ad_count,
        avg_ctr,
    }
}

fn spend_range(range: &str, ad_count: i64, avg_ctr: f64, total_spend: f64) -> SpendRangeEntry {
    SpendRangeEntry {
        spend_range: range.to_string(),
        ad_count,
        avg_ctr,
        total_spend,
    }
}

fn ctr_bucket(bucket: &str, ad_count: i64, avg_spend: f64, percentage: f64) -> CtrPerformanceEntry {
    CtrPerformanceEntry {
        ctr_performance: bucket.to_string(),
        ad_count,
        avg_spend,
        percentage,
    }
}

fn spend_impressions(name: &str, total_spend: f64, total_impressions: i64) -> SpendImpressionEntry {
    SpendImpressionEntry {
        competitor_name: name.to_string(),
        total_spend,
        total_impressions,
        impressions_per_dollar: 100.0,
        avg_ctr: match name {
            "Nike" => 0.032,
            "Adidas" => 0.028,
            "Under Armour" => 0.041,
            "Puma" => 0.019,
            _ => 0.026,
        },
    }
}

fn platform_ctr(platform: &str, avg_ctr: f64, ad_count: i64, total_spend: f64, color: &str) -> PlatformCtrEntry {
    PlatformCtrEntry {
        platform: platform.to_string(),
        avg_ctr,
        ad_count,
        total_spend,
        color: color.to_string(),
    }
}

fn geo(spend: f64, percentage: f64) -> GeoSpend {
    GeoSpend { spend, percentage }
}

fn interest(name: &str, affinity: f64, reach: f64) -> InterestCluster {
    InterestCluster {
        interest: name.to_string(),
        affinity,
        reach,
    }
}

fn stage(label: &str, percentage: f64, reach: f64) -> FunnelStage {
    FunnelStage {
        label: label.to_string(),
        percentage,
        reach,
    }
}

fn bid(time: &str, cpc: f64, cpm: f64) -> HourlyBid {
    HourlyBid {
        time: time.to_string(),
        cpc,
        cpm,
    }
}
