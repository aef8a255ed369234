use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};

use crate::models::{Course, CourseFile, CourseLink};
use crate::schema::{courses, files, links};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub type DbConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder().build(manager)
}

pub fn run_migrations(conn: &mut PgConnection) -> anyhow::Result<()> {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migration error: {}", e))?;
    Ok(())
}

pub fn find_course(conn: &mut PgConnection, course_name: &str) -> QueryResult<Option<Course>> {
    courses::table
        .filter(courses::name.eq(course_name))
        .select(Course::as_select())
        .first(conn)
        .optional()
}

pub fn list_course_names(conn: &mut PgConnection) -> QueryResult<Vec<String>> {
    courses::table
        .select(courses::name)
        .order(courses::name.asc())
        .load(conn)
}

pub fn list_course_files(conn: &mut PgConnection, course: &Course) -> QueryResult<Vec<CourseFile>> {
    CourseFile::belonging_to(course)
        .select(CourseFile::as_select())
        .order(files::id.asc())
        .load(conn)
}

pub fn list_course_links(conn: &mut PgConnection, course: &Course) -> QueryResult<Vec<CourseLink>> {
    CourseLink::belonging_to(course)
        .select(CourseLink::as_select())
        .order(links::id.asc())
        .load(conn)
}
