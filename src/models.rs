use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::courses)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::courses)]
pub struct NewCourse<'a> {
    pub name: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug)]
#[diesel(table_name = crate::schema::files)]
#[diesel(belongs_to(Course, foreign_key = course_id))]
pub struct CourseFile {
    pub id: i64,
    pub course_id: i64,
    pub filename: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::files)]
pub struct NewCourseFile<'a> {
    pub course_id: i64,
    pub filename: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug)]
#[diesel(table_name = crate::schema::links)]
#[diesel(belongs_to(Course, foreign_key = course_id))]
pub struct CourseLink {
    pub id: i64,
    pub course_id: i64,
    pub url: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::links)]
pub struct NewCourseLink<'a> {
    pub course_id: i64,
    pub url: &'a str,
}

/// Files are public URLs into object storage, links are stored verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDetailResponse {
    pub files: Vec<String>,
    pub links: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub public_url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinkResponse {
    pub message: String,
    pub link: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinkRequest {
    pub link: String,
}
