//! Hosted calendar table over a PostgREST-style HTTP API
//!
//! Observations come from the `calendar` table filtered by `courseid` and
//! ordered by day key. Course titles come from the `course_record` JSON column
//! of `tutors-connect-courses`.

use crate::source::ObservationSource;
use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::Deserialize;
use tracing::{debug, info};
use tutors_time_core::types::{CourseId, Observation};
use tutors_time_core::{Result, TutorsTimeError};

const CALENDAR_TABLE: &str = "calendar";
const COURSES_TABLE: &str = "tutors-connect-courses";

#[derive(Debug, Deserialize)]
struct CourseRecord {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    course_record: Option<CourseRecord>,
}

/// Observation source backed by the hosted REST API
#[derive(Debug, Clone)]
pub struct RestSource {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl RestSource {
    /// Create a source for the API rooted at `base_url`, e.g.
    /// `https://project.example.co/rest/v1`
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str, params: &[(&str, String)]) -> Result<Url> {
        Url::parse_with_params(&format!("{}/{}", self.base_url, table), params)
            .map_err(|e| TutorsTimeError::Config(format!("Invalid REST URL {}: {}", self.base_url, e)))
    }

    /// URL selecting a course's calendar rows in day order
    pub fn calendar_url(&self, course_id: &CourseId) -> Result<Url> {
        self.table_url(
            CALENDAR_TABLE,
            &[
                ("select", "*".to_string()),
                ("courseid", format!("eq.{}", course_id)),
                ("order", "id.asc".to_string()),
            ],
        )
    }

    /// URL selecting a course's record
    pub fn course_title_url(&self, course_id: &CourseId) -> Result<Url> {
        self.table_url(
            COURSES_TABLE,
            &[
                ("select", "course_id,course_record".to_string()),
                ("course_id", format!("eq.{}", course_id)),
                ("limit", "1".to_string()),
            ],
        )
    }

    async fn get(&self, url: Url, course_id: &CourseId) -> Result<Response> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request
                .header("apikey", key)
                .header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TutorsTimeError::DataSource {
                course_id: course_id.to_string(),
                message: format!("HTTP {}", status),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ObservationSource for RestSource {
    async fn fetch_calendar(&self, course_id: &CourseId) -> Result<Vec<Observation>> {
        let response = self.get(self.calendar_url(course_id)?, course_id).await?;
        let rows: Vec<Observation> = response.json().await?;
        info!("Fetched {} calendar rows for {}", rows.len(), course_id);
        Ok(rows)
    }

    async fn fetch_course_title(&self, course_id: &CourseId) -> Result<Option<String>> {
        let response = self.get(self.course_title_url(course_id)?, course_id).await?;
        let rows: Vec<CourseRow> = response.json().await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.course_record)
            .and_then(|record| record.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> RestSource {
        RestSource::new("https://db.example.com/rest/v1/", Some("key".to_string()))
    }

    #[test]
    fn test_calendar_url() {
        let url = source().calendar_url(&CourseId::new("web-dev")).unwrap();
        assert_eq!(url.path(), "/rest/v1/calendar");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![
                ("select".to_string(), "*".to_string()),
                ("courseid".to_string(), "eq.web-dev".to_string()),
                ("order".to_string(), "id.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_course_ids_are_encoded() {
        let url = source().calendar_url(&CourseId::new("a&b c")).unwrap();
        let courseid = url
            .query_pairs()
            .find(|(k, _)| k == "courseid")
            .map(|(_, v)| v.into_owned());
        assert_eq!(courseid.as_deref(), Some("eq.a&b c"));
    }

    #[test]
    fn test_course_title_url() {
        let url = source().course_title_url(&CourseId::new("web-dev")).unwrap();
        assert_eq!(url.path(), "/rest/v1/tutors-connect-courses");
        assert!(url.query().unwrap().contains("course_id=eq.web-dev"));
    }

    #[test]
    fn test_invalid_base_url() {
        let source = RestSource::new("not a url", None);
        let err = source.calendar_url(&CourseId::new("c1")).unwrap_err();
        assert!(matches!(err, TutorsTimeError::Config(_)));
    }

    #[test]
    fn test_course_row_parsing() {
        let rows: Vec<CourseRow> = serde_json::from_str(
            r#"[{"course_id":"web-dev","course_record":{"title":"Web Dev","units":[]}}]"#,
        )
        .unwrap();
        let title = rows[0].course_record.as_ref().and_then(|r| r.title.clone());
        assert_eq!(title.as_deref(), Some("Web Dev"));

        let rows: Vec<CourseRow> =
            serde_json::from_str(r#"[{"course_id":"web-dev","course_record":null}]"#).unwrap();
        assert!(rows[0].course_record.is_none());
    }

    #[test]
    fn test_calendar_batch_with_null_counters() {
        let body = r#"[
            {"id":"2024-02-03","studentid":"s1","courseid":"web-dev","timeactive":null,"pageloads":2},
            {"id":"2024-02-04","studentid":"s2","courseid":"web-dev","timeactive":120,"pageloads":null}
        ]"#;
        let rows: Vec<Observation> = serde_json::from_str(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].active_seconds, 0);
        assert_eq!(rows[1].active_seconds, 120);
        assert_eq!(rows[1].page_loads, 0);
    }
}
