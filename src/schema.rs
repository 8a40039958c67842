table! {
    articles (article_id) {
        article_id -> Int4,
        title -> Varchar,
        body -> Text,
        votes -> Int4,
        topic -> Varchar,
        author -> Varchar,
        created_at -> Timestamp,
    }
}

table! {
    comments (comment_id) {
        comment_id -> Int4,
        article_id -> Int4,
        author -> Varchar,
        body -> Text,
        votes -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    topics (slug) {
        slug -> Varchar,
        description -> Varchar,
    }
}

table! {
    users (username) {
        username -> Varchar,
        name -> Varchar,
        avatar_url -> Varchar,
    }
}

joinable!(articles -> topics (topic));
joinable!(articles -> users (author));
joinable!(comments -> articles (article_id));
joinable!(comments -> users (author));

allow_tables_to_appear_in_same_query!(
    articles,
    comments,
    topics,
    users,
);
