//! Typed HTTP client for the portal's REST surface.

use crate::models::{CourseDetailResponse, LinkRequest, LinkResponse, MessageResponse, UploadResponse};
use crate::naming::PATH_SEGMENT;
use percent_encoding::utf8_percent_encode;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Clone)]
pub struct PortalClient {
    client: Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn course_url(&self, course_name: &str) -> String {
        format!(
            "{}/api/courses/{}",
            self.base_url,
            utf8_percent_encode(course_name, PATH_SEGMENT)
        )
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }

    pub async fn list_courses(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/courses", self.base_url))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn course_detail(&self, course_name: &str) -> Result<CourseDetailResponse, ClientError> {
        let response = self.client.get(self.course_url(course_name)).send().await?;
        Self::parse(response).await
    }

    pub async fn upload_file(
        &self,
        course_name: &str,
        file_name: &str,
        data: Vec<u8>,
        new_file_name: Option<&str>,
    ) -> Result<UploadResponse, ClientError> {
        let mut form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(data).file_name(file_name.to_string()),
        );
        if let Some(name) = new_file_name.filter(|n| !n.is_empty()) {
            form = form.text("newFileName", name.to_string());
        }

        let response = self
            .client
            .post(format!("{}/upload", self.course_url(course_name)))
            .multipart(form)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn add_link(&self, course_name: &str, link: &str) -> Result<LinkResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}/links", self.course_url(course_name)))
            .json(&LinkRequest {
                link: link.to_string(),
            })
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_link(
        &self,
        course_name: &str,
        link: &str,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(format!("{}/links", self.course_url(course_name)))
            .json(&LinkRequest {
                link: link.to_string(),
            })
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_file(
        &self,
        course_name: &str,
        stored_file_name: &str,
    ) -> Result<MessageResponse, ClientError> {
        let response = self
            .client
            .delete(format!(
                "{}/files/{}",
                self.course_url(course_name),
                utf8_percent_encode(stored_file_name, PATH_SEGMENT)
            ))
            .send()
            .await?;
        Self::parse(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_courses() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/courses")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["Intro Biology","Linear Algebra"]"#)
            .create_async()
            .await;

        let courses = PortalClient::new(server.url()).list_courses().await.unwrap();

        mock.assert_async().await;
        assert_eq!(courses, vec!["Intro Biology", "Linear Algebra"]);
    }

    #[tokio::test]
    async fn test_course_name_is_encoded_as_one_segment() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/courses/Intro%20Biology")
            .with_status(200)
            .with_body(r#"{"files":[],"links":["https://a.example"]}"#)
            .create_async()
            .await;

        let detail = PortalClient::new(server.url())
            .course_detail("Intro Biology")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(detail.links, vec!["https://a.example"]);
    }

    #[tokio::test]
    async fn test_not_found_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/courses/Missing")
            .with_status(404)
            .with_body(r#"{"error":"Course not found"}"#)
            .create_async()
            .await;

        let err = PortalClient::new(server.url())
            .course_detail("Missing")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_delete_link_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/courses/Physics/links")
            .match_body(Matcher::Json(json!({"link": "https://a.example"})))
            .with_status(200)
            .with_body(r#"{"message":"Link deleted successfully"}"#)
            .create_async()
            .await;

        let response = PortalClient::new(server.url())
            .delete_link("Physics", "https://a.example")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.message, "Link deleted successfully");
    }

    #[tokio::test]
    async fn test_upload_sends_multipart() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/courses/Physics/upload")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::Regex("name=\"newFileName\"".to_string()))
            .with_status(200)
            .with_body(r#"{"message":"File uploaded successfully","publicUrl":"https://cdn/x/1-a.pdf"}"#)
            .create_async()
            .await;

        let response = PortalClient::new(server.url())
            .upload_file("Physics", "a.pdf", b"%PDF".to_vec(), Some("renamed"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.public_url, "https://cdn/x/1-a.pdf");
    }
}
