//! View state for the two client screens.
//!
//! Every successful mutation re-fetches the whole course detail instead of
//! patching local state, so the view always mirrors the server.

use crate::client::{ClientError, PortalClient};
use crate::models::CourseDetailResponse;
use crate::naming::display_name;
use std::time::{Duration, Instant};

pub const BANNER_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub kind: BannerKind,
    shown_at: Instant,
}

impl Banner {
    fn new(message: impl Into<String>, kind: BannerKind) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < BANNER_DURATION
    }
}

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct CourseListView {
    client: PortalClient,
    pub courses: Vec<String>,
}

impl CourseListView {
    pub fn new(client: PortalClient) -> Self {
        Self {
            client,
            courses: Vec::new(),
        }
    }

    /// Fetches course names. A failed fetch leaves the previous list in place.
    pub async fn load(&mut self) {
        match self.client.list_courses().await {
            Ok(courses) => self.courses = courses,
            Err(e) => tracing::warn!(error = %e, "failed to fetch courses"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub data: Vec<u8>,
}

pub struct CourseDetailView {
    client: PortalClient,
    pub course_name: String,
    pub detail: CourseDetailResponse,
    pub selected_file: Option<SelectedFile>,
    pub new_file_name: String,
    pub new_link: String,
    banner: Option<Banner>,
}

impl CourseDetailView {
    pub fn new(client: PortalClient, course_name: impl Into<String>) -> Self {
        Self {
            client,
            course_name: course_name.into(),
            detail: CourseDetailResponse::default(),
            selected_file: None,
            new_file_name: String::new(),
            new_link: String::new(),
            banner: None,
        }
    }

    pub async fn refresh(&mut self) {
        match self.client.course_detail(&self.course_name).await {
            Ok(detail) => self.detail = detail,
            Err(e) => tracing::warn!(course = %self.course_name, error = %e, "failed to fetch course data"),
        }
    }

    /// Files as `(public url, name to show)` pairs.
    pub fn files(&self) -> Vec<(String, String)> {
        self.detail
            .files
            .iter()
            .map(|url| (url.clone(), display_name(url)))
            .collect()
    }

    pub fn links(&self) -> &[String] {
        &self.detail.links
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner_at(Instant::now())
    }

    pub fn banner_at(&self, now: Instant) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| b.is_visible_at(now))
    }

    fn show(&mut self, message: &str, kind: BannerKind) {
        self.banner = Some(Banner::new(message, kind));
    }

    /// Uploads the selected file. Does nothing when no file is selected.
    pub async fn upload(&mut self) -> Result<(), ClientError> {
        let Some(file) = self.selected_file.clone() else {
            return Ok(());
        };

        self.client
            .upload_file(
                &self.course_name,
                &file.name,
                file.data,
                Some(self.new_file_name.as_str()),
            )
            .await?;

        self.selected_file = None;
        self.new_file_name.clear();
        self.refresh().await;
        self.show("File uploaded successfully!", BannerKind::Success);
        Ok(())
    }

    pub async fn submit_link(&mut self) -> Result<(), ClientError> {
        self.client.add_link(&self.course_name, &self.new_link).await?;

        self.new_link.clear();
        self.refresh().await;
        self.show("Link added successfully!", BannerKind::Success);
        Ok(())
    }

    /// Deletes a file given its public URL, after confirmation.
    pub async fn delete_file(&mut self, file_url: &str, confirm: &impl Confirm) {
        let stored = file_url.rsplit('/').next().unwrap_or(file_url);
        let stored = percent_encoding::percent_decode_str(stored)
            .decode_utf8_lossy()
            .into_owned();

        if !confirm.confirm(&format!("Are you sure you want to delete '{}'?", stored)) {
            return;
        }

        match self.client.delete_file(&self.course_name, &stored).await {
            Ok(_) => {
                self.refresh().await;
                self.show("File deleted successfully!", BannerKind::Success);
            }
            Err(e) => {
                tracing::error!(file = %stored, error = %e, "error deleting file");
                self.show("An error occurred while deleting the file.", BannerKind::Error);
            }
        }
    }

    pub async fn delete_link(&mut self, link: &str, confirm: &impl Confirm) {
        if !confirm.confirm(&format!("Are you sure you want to delete the link '{}'?", link)) {
            return;
        }

        match self.client.delete_link(&self.course_name, link).await {
            Ok(_) => {
                self.refresh().await;
                self.show("Link deleted successfully!", BannerKind::Success);
            }
            Err(e) => {
                tracing::error!(%link, error = %e, "error deleting link");
                self.show("An error occurred while deleting the link.", BannerKind::Error);
            }
        }
    }
}
