use crate::db;
use crate::models::NewCourse;
use crate::schema::courses;
use diesel::prelude::*;

/// Inserts every configured course name that does not exist yet.
pub fn seed_courses(
    conn: &mut PgConnection,
    course_names: &[String],
) -> Result<usize, diesel::result::Error> {
    let mut created = 0;

    for name in course_names {
        if db::find_course(conn, name)?.is_some() {
            continue;
        }

        let inserted = diesel::insert_into(courses::table)
            .values(NewCourse { name })
            .on_conflict(courses::name)
            .do_nothing()
            .execute(conn)?;

        if inserted > 0 {
            tracing::info!("Created course: {}", name);
        }
        created += inserted;
    }

    Ok(created)
}
