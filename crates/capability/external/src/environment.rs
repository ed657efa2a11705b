//! 环境遥测 feed：ThingSpeak 风格的温湿度通道
//!
//! feed 条目的 `field1`/`field2` 分别是温度与湿度，字段可缺失；
//! 两者皆缺失的条目被丢弃，结果按时间升序，标签 `HH:MM`。

use crate::error::ExternalError;
use async_trait::async_trait;
use chrono::DateTime;
use domain::EnvironmentPoint;
use serde::Deserialize;
use tracing::debug;

/// 环境遥测契约。
#[async_trait]
pub trait EnvironmentFeed: Send + Sync {
    async fn temperature_humidity(&self) -> Result<Vec<EnvironmentPoint>, ExternalError>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedResponse {
    #[serde(default)]
    feeds: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedEntry {
    created_at: String,
    #[serde(default)]
    field1: Option<String>,
    #[serde(default)]
    field2: Option<String>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn parse_field(value: Option<&str>) -> Option<f64> {
    value.and_then(|raw| raw.trim().parse::<f64>().ok()).map(round1)
}

/// feed 响应 → 升序环境遥测点。
pub(crate) fn parse_feed(response: FeedResponse) -> Vec<EnvironmentPoint> {
    let mut points: Vec<EnvironmentPoint> = response
        .feeds
        .into_iter()
        .filter_map(|entry| {
            let ts = DateTime::parse_from_rfc3339(&entry.created_at).ok()?;
            let temperature = parse_field(entry.field1.as_deref());
            let humidity = parse_field(entry.field2.as_deref());
            if temperature.is_none() && humidity.is_none() {
                return None;
            }
            Some(EnvironmentPoint {
                label: ts.format("%H:%M").to_string(),
                temperature,
                humidity,
                ts_ms: ts.timestamp_millis(),
            })
        })
        .collect();
    points.sort_by_key(|point| point.ts_ms);
    points
}

/// ThingSpeak 风格通道的 HTTP 实现。
pub struct ThingSpeakFeed {
    client: reqwest::Client,
    url: String,
}

impl ThingSpeakFeed {
    /// `url` 是完整的 feeds.json 地址（含 api_key 与 results 参数）。
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl EnvironmentFeed for ThingSpeakFeed {
    async fn temperature_humidity(&self) -> Result<Vec<EnvironmentPoint>, ExternalError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: FeedResponse = response.json().await?;
        let points = parse_feed(parsed);
        debug!(points = points.len(), "environment feed received");
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> FeedResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn feed_entries_are_parsed_and_sorted_ascending() {
        let parsed = parse_feed(response(json!({
            "feeds": [
                { "created_at": "2024-05-20T12:30:00Z", "field1": "25.44", "field2": "61.2" },
                { "created_at": "2024-05-20T12:00:00Z", "field1": "24.1", "field2": null }
            ]
        })));

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].label, "12:00");
        assert_eq!(parsed[0].temperature, Some(24.1));
        assert!(parsed[0].humidity.is_none());
        assert_eq!(parsed[1].temperature, Some(25.4));
        assert_eq!(parsed[1].humidity, Some(61.2));
        assert!(parsed[0].ts_ms < parsed[1].ts_ms);
    }

    #[test]
    fn entries_without_any_reading_are_dropped() {
        let parsed = parse_feed(response(json!({
            "feeds": [
                { "created_at": "2024-05-20T12:00:00Z", "field1": null, "field2": null },
                { "created_at": "2024-05-20T12:05:00Z", "field1": "not-a-number" },
                { "created_at": "bad-date", "field1": "20.0" }
            ]
        })));
        assert!(parsed.is_empty());
    }

    #[test]
    fn empty_feed_yields_empty_series() {
        assert!(parse_feed(response(json!({}))).is_empty());
    }
}
