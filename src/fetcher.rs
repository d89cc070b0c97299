use crate::errors::FetchError;
use crate::models::CounterSample;
use crate::stats::TS_FORMAT;
use chrono::Local;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Shape of `videos.list?part=statistics`. The API serialises every counter
/// as a JSON string, and omits counters the channel has hidden.
#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

/// Polls the statistics endpoint for the one tracked video.
#[derive(Clone)]
pub struct StatFetcher {
    client: Client,
    api_base: String,
    api_key: String,
    video_id: String,
}

impl StatFetcher {
    pub fn new(api_base: String, api_key: String, video_id: String) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("yt-daily-stats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base,
            api_key,
            video_id,
        })
    }

    /// One API call, mapped to a sample stamped with the current local time.
    /// Does not persist anything.
    pub async fn fetch(&self) -> Result<CounterSample, FetchError> {
        let url = format!("{}/videos", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "statistics"),
                ("id", self.video_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body: VideoListResponse = response.json().await?;
        let Some(item) = body.items.into_iter().next() else {
            return Err(FetchError::VideoNotFound(self.video_id.clone()));
        };

        Ok(sample_now(&item.statistics))
    }
}

fn sample_now(stats: &VideoStatistics) -> CounterSample {
    CounterSample {
        ts: Local::now().format(TS_FORMAT).to_string(),
        views: parse_count(stats.view_count.as_deref()),
        likes: parse_count(stats.like_count.as_deref()),
        comments: parse_count(stats.comment_count.as_deref()),
    }
}

// Hidden or malformed counters count as zero, matching the API's own
// omission semantics.
fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(0)
}
