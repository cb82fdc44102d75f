table! {
    comments (id) {
        id -> Int4,
        content -> Text,
        post_id -> Int4,
        author_id -> Int4,
        creation_date -> Timestamp,
    }
}

table! {
    follows (id) {
        id -> Int4,
        follower_id -> Int4,
        following_id -> Int4,
    }
}

table! {
    posts (id) {
        id -> Int4,
        author_id -> Int4,
        title -> Varchar,
        content -> Text,
        creation_date -> Timestamp,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        display_name -> Varchar,
        email -> Nullable<Text>,
        hashed_password -> Text,
        summary -> Text,
        creation_date -> Timestamp,
    }
}

joinable!(comments -> posts (post_id));
joinable!(comments -> users (author_id));
joinable!(posts -> users (author_id));

allow_tables_to_appear_in_same_query!(comments, follows, posts, users,);
