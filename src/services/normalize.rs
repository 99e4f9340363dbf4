//! Normalization of raw targeting-intelligence payloads. The upstream
//! modeling service drifts: fields go missing, numbers arrive as strings,
//! and the advanced-targeting block has shipped under two different
//! nestings. This module is the single choke point that turns any of those
//! shapes into a fully-populated [`TargetingIntel`]; shape drift is never an
//! error here, only a defaulting decision. No other module re-implements
//! field-presence checks.

use serde_json::Value as JsonValue;
use tracing::warn;

use crate::models::targeting::{
    AdvancedTargeting, AgeDistribution, BiddingStrategy, CompetitorOverlap, DevicePreference,
    FunnelStage, FunnelStagePrediction, GenderDistribution, GeoSpend, HourlyBid, InterestCluster,
    PeakCpm, PurchaseIntent, TargetingIntel,
};
use crate::services::mock_data::mock_targeting_intel;

/// Produces a complete record from an arbitrary, possibly partial payload.
/// Every field defaults independently from the demo template, so a record
/// missing half its fields still charts correctly.
pub fn normalize_targeting(raw: &JsonValue) -> TargetingIntel {
    let template = mock_targeting_intel();

    if raw.is_null() || !raw.is_object() {
        warn!(target: "app::targeting", "no targeting payload to normalize, using demo record");
        return template;
    }

    TargetingIntel {
        id: string_or(raw.get("id"), &template.id),
        competitor_id: string_or(raw.get("competitor_id"), &template.competitor_id),
        competitor_name: string_or(raw.get("competitor_name"), &template.competitor_name),
        age_distribution: normalize_age(raw.get("age_distribution"), &template.age_distribution),
        gender_distribution: normalize_gender(
            raw.get("gender_distribution"),
            &template.gender_distribution,
        ),
        geographic_spend: normalize_geo(raw.get("geographic_spend"), &template),
        interest_clusters: normalize_interests(raw.get("interest_clusters"), &template),
        funnel_stage_prediction: normalize_funnel(raw.get("funnel_stage_prediction"), &template),
        bidding_strategy: normalize_bidding(raw.get("bidding_strategy"), &template),
        advanced_targeting: normalize_advanced(raw.get("advanced_targeting")),
        data_source: string_or(raw.get("data_source"), &template.data_source),
        confidence_score: coerce_f64(raw.get("confidence_score"))
            .unwrap_or(template.confidence_score),
        created_at: string_or(raw.get("created_at"), &template.created_at),
        updated_at: string_or(raw.get("updated_at"), &template.updated_at),
    }
}

fn normalize_age(value: Option<&JsonValue>, template: &AgeDistribution) -> AgeDistribution {
    match value.filter(|v| v.is_object()) {
        Some(buckets) => AgeDistribution {
            age_18_24: bucket(buckets, "18-24"),
            age_25_34: bucket(buckets, "25-34"),
            age_35_44: bucket(buckets, "35-44"),
            age_45_54: bucket(buckets, "45-54"),
            age_55_plus: bucket(buckets, "55+"),
        },
        None => template.clone(),
    }
}

fn normalize_gender(value: Option<&JsonValue>, template: &GenderDistribution) -> GenderDistribution {
    match value.filter(|v| v.is_object()) {
        Some(buckets) => GenderDistribution {
            male: bucket(buckets, "male"),
            female: bucket(buckets, "female"),
            other: bucket(buckets, "other"),
        },
        None => template.clone(),
    }
}

fn normalize_geo(
    value: Option<&JsonValue>,
    template: &TargetingIntel,
) -> std::collections::BTreeMap<String, GeoSpend> {
    match value.and_then(JsonValue::as_object).filter(|map| !map.is_empty()) {
        Some(map) => map
            .iter()
            .map(|(country, entry)| {
                (
                    country.clone(),
                    GeoSpend {
                        spend: coerce_f64(entry.get("spend")).unwrap_or(0.0),
                        percentage: coerce_f64(entry.get("percentage")).unwrap_or(0.0),
                    },
                )
            })
            .collect(),
        None => template.geographic_spend.clone(),
    }
}

fn normalize_interests(
    value: Option<&JsonValue>,
    template: &TargetingIntel,
) -> Vec<InterestCluster> {
    match value.and_then(JsonValue::as_array).filter(|list| !list.is_empty()) {
        Some(clusters) => clusters
            .iter()
            .map(|cluster| InterestCluster {
                interest: string_or(cluster.get("interest"), "Unknown Interest"),
                affinity: coerce_f64(cluster.get("affinity")).unwrap_or(0.0),
                reach: coerce_f64(cluster.get("reach")).unwrap_or(0.0),
            })
            .collect(),
        None => template.interest_clusters.clone(),
    }
}

fn normalize_funnel(
    value: Option<&JsonValue>,
    template: &TargetingIntel,
) -> FunnelStagePrediction {
    let Some(funnel) = value.filter(|v| v.is_object()) else {
        return template.funnel_stage_prediction.clone();
    };

    FunnelStagePrediction {
        awareness: funnel_stage(funnel.get("awareness"), "Awareness", 45.0, 2_100_000.0),
        consideration: funnel_stage(funnel.get("consideration"), "Consideration", 30.0, 1_400_000.0),
        conversion: funnel_stage(funnel.get("conversion"), "Conversion", 20.0, 940_000.0),
        retention: funnel_stage(funnel.get("retention"), "Retention", 5.0, 235_000.0),
    }
}

fn funnel_stage(
    value: Option<&JsonValue>,
    label: &str,
    percentage: f64,
    reach: f64,
) -> FunnelStage {
    FunnelStage {
        label: string_or(value.and_then(|v| v.get("label")), label),
        percentage: coerce_f64(value.and_then(|v| v.get("percentage"))).unwrap_or(percentage),
        reach: coerce_f64(value.and_then(|v| v.get("reach"))).unwrap_or(reach),
    }
}

fn normalize_bidding(value: Option<&JsonValue>, template: &TargetingIntel) -> BiddingStrategy {
    let fallback = &template.bidding_strategy;
    let Some(bidding) = value.filter(|v| v.is_object()) else {
        return fallback.clone();
    };

    let hourly = match bidding.get("hourly").and_then(JsonValue::as_array) {
        Some(entries) => entries
            .iter()
            .map(|entry| HourlyBid {
                time: string_or(entry.get("time"), "12am"),
                cpc: coerce_f64(entry.get("cpc")).unwrap_or(1.1),
                cpm: coerce_f64(entry.get("cpm")).unwrap_or(8.2),
            })
            .collect(),
        None => fallback.hourly.clone(),
    };

    let peak_cpm = match bidding.get("peak_cpm").filter(|v| v.is_object()) {
        Some(peak) => PeakCpm {
            value: coerce_f64(peak.get("value")).unwrap_or(fallback.peak_cpm.value),
            window: string_or(peak.get("window"), &fallback.peak_cpm.window),
        },
        None => fallback.peak_cpm.clone(),
    };

    BiddingStrategy {
        hourly,
        avg_cpc: coerce_f64(bidding.get("avg_cpc")).unwrap_or(fallback.avg_cpc),
        peak_cpm,
        best_time: string_or(bidding.get("best_time"), &fallback.best_time),
    }
}

fn normalize_advanced(value: Option<&JsonValue>) -> AdvancedTargeting {
    let advanced = value.filter(|v| v.is_object());

    // The recommendation has shipped both as `ai_recommendation` and, in
    // older records, as `insight`; checked in that priority order.
    let ai_recommendation = advanced
        .and_then(|adv| {
            adv.get("ai_recommendation")
                .and_then(JsonValue::as_str)
                .or_else(|| adv.get("insight").and_then(JsonValue::as_str))
        })
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "Focus on mobile-first advertising strategy".to_string());

    let purchase_intent = match advanced.and_then(|adv| adv.get("purchase_intent")).filter(|v| v.is_object()) {
        Some(intent) => PurchaseIntent {
            level: string_or(intent.get("level"), "Medium"),
            confidence: coerce_f64(intent.get("confidence")).unwrap_or(0.65),
        },
        None => PurchaseIntent {
            level: "Medium".to_string(),
            confidence: 0.65,
        },
    };

    // `device_preference` wins over the legacy `platform_split` nesting.
    let device_block = advanced.and_then(|adv| {
        adv.get("device_preference")
            .filter(|v| v.is_object())
            .or_else(|| adv.get("platform_split").filter(|v| v.is_object()))
    });
    let device_preference = match device_block {
        Some(device) => DevicePreference {
            mobile: coerce_f64(device.get("mobile")).unwrap_or(0.75),
            desktop: coerce_f64(device.get("desktop")).unwrap_or(0.25),
            ios_share: coerce_f64(device.get("ios_share"))
                .or_else(|| coerce_f64(device.get("ios")))
                .unwrap_or(0.65),
        },
        None => DevicePreference {
            mobile: 0.75,
            desktop: 0.25,
            ios_share: 0.65,
        },
    };

    let competitor_overlap = match advanced.and_then(|adv| adv.get("competitor_overlap")).filter(|v| v.is_object()) {
        Some(overlap) => CompetitorOverlap {
            brands: coerce_f64(overlap.get("brands")).unwrap_or(2.5),
            description: string_or(
                overlap.get("description"),
                "Overlaps with similar brands in the market",
            ),
        },
        None => CompetitorOverlap {
            brands: 2.5,
            description: "Overlaps with similar brands in the market".to_string(),
        },
    };

    AdvancedTargeting {
        purchase_intent,
        ai_recommendation,
        device_preference,
        competitor_overlap,
    }
}

fn bucket(object: &JsonValue, key: &str) -> f64 {
    coerce_f64(object.get(key)).unwrap_or(0.0)
}

/// Accepts JSON numbers and numeric strings; the upstream service has been
/// observed serializing both.
fn coerce_f64(value: Option<&JsonValue>) -> Option<f64> {
    match value? {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn string_or(value: Option<&JsonValue>, default: &str) -> String {
    value
        .and_then(JsonValue::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}
