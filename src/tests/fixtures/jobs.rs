use crate::modules::bookmarks::core::bookmarked_job::{BookmarkedJob, JobPosting};
use crate::modules::bookmarks::core::transitions::completed_variant;
use crate::tests::fixtures::clock::fixed_now;
use chrono::Duration;
use serde_json::Map;

pub struct JobPostingBuilder {
    inner: JobPosting,
}

impl JobPostingBuilder {
    pub fn new() -> Self {
        Self {
            inner: JobPosting {
                job_id: "job-fixed-0001".into(),
                job_title: "Backend Engineer".into(),
                employer_name: "Acme".into(),
                employer_logo: Some("https://example.test/acme.png".into()),
                job_country: Some("NL".into()),
                extra: Map::new(),
            },
        }
    }

    pub fn job_id(mut self, job_id: impl Into<String>) -> Self {
        self.inner.job_id = job_id.into();
        self
    }

    pub fn job_title(mut self, job_title: impl Into<String>) -> Self {
        self.inner.job_title = job_title.into();
        self
    }

    pub fn build(self) -> JobPosting {
        self.inner
    }
}

pub fn active_job(job_id: &str) -> BookmarkedJob {
    let posting = JobPostingBuilder::new().job_id(job_id).build();
    BookmarkedJob::from_posting(posting, fixed_now(), None, None)
}

pub fn completed_job(job_id: &str) -> BookmarkedJob {
    completed_variant(&active_job(job_id), fixed_now() + Duration::days(3))
}
