diesel::table! {
    courses (id) {
        id -> Int8,
        name -> Varchar,
    }
}

diesel::table! {
    files (id) {
        id -> Int8,
        course_id -> Int8,
        filename -> Varchar,
    }
}

diesel::table! {
    links (id) {
        id -> Int8,
        course_id -> Int8,
        url -> Varchar,
    }
}

diesel::joinable!(files -> courses (course_id));
diesel::joinable!(links -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(courses, files, links,);
