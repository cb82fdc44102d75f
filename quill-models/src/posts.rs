use crate::{
    comments::Comment, safe_string::SafeString, schema::posts, users::User, Connection, Error,
    Result,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use quill_api::posts::{PostData, PostDetails};

#[derive(Clone, Debug, Queryable, Identifiable, Associations)]
#[belongs_to(User, foreign_key = "author_id")]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub content: SafeString,
    pub creation_date: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "posts"]
pub struct NewPost {
    pub author_id: i32,
    pub title: String,
    pub content: SafeString,
    /// Left unset, the database stamps the row at insertion time.
    pub creation_date: Option<NaiveDateTime>,
}

impl Post {
    insert!(posts, NewPost);
    get!(posts);
    list_by!(posts, list_by_author, author_id as i32);

    /// All posts, most recent first.
    pub fn recents(conn: &Connection) -> Result<Vec<Post>> {
        posts::table
            .order((posts::creation_date.desc(), posts::id.asc()))
            .load::<Post>(conn)
            .map_err(Error::from)
    }

    /// The feed of a given user: posts written by the people they follow,
    /// most recent first, equal timestamps kept in insertion order. The
    /// followed set comes from a subquery on the follows table, so this is
    /// one indexed query however many people the user follows — and a user
    /// who follows no one gets an empty feed, not everything.
    pub fn from_followed(conn: &Connection, user: &User) -> Result<Vec<Post>> {
        use crate::schema::follows;

        let followed = follows::table
            .filter(follows::follower_id.eq(user.id))
            .select(follows::following_id);
        posts::table
            .filter(posts::author_id.eq_any(followed))
            .order((posts::creation_date.desc(), posts::id.asc()))
            .load::<Post>(conn)
            .map_err(Error::from)
    }

    pub fn get_author(&self, conn: &Connection) -> Result<User> {
        User::get(conn, self.author_id)
    }

    /// Deletes the post and its comments.
    pub fn delete(&self, conn: &Connection) -> Result<()> {
        use crate::schema::comments;
        diesel::delete(comments::table.filter(comments::post_id.eq(self.id))).execute(conn)?;
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    pub fn to_data(&self, conn: &Connection) -> Result<PostData> {
        Ok(PostData {
            id: self.id,
            title: self.title.clone(),
            content: self.content.get().clone(),
            creation_date: self.creation_date,
            author: self.get_author(conn)?.to_data(),
        })
    }

    /// The single-post view: author identity plus the full comment thread
    /// in creation order.
    pub fn to_details(&self, conn: &Connection) -> Result<PostDetails> {
        let comments = Comment::list_by_post(conn, self.id)?
            .into_iter()
            .map(|c| c.to_data(conn))
            .collect::<Result<Vec<_>>>()?;
        Ok(PostDetails {
            id: self.id,
            title: self.title.clone(),
            content: self.content.get().clone(),
            creation_date: self.creation_date,
            author: self.get_author(conn)?.to_data(),
            comments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        follows::{Follow, NewFollow},
        tests::db,
        users::tests as user_tests,
    };
    use assert_json_diff::assert_json_eq;
    use chrono::NaiveDate;
    use diesel::Connection;
    use serde_json::{json, to_value};

    fn post_at(conn: &crate::Connection, author_id: i32, title: &str, day: u32) -> Post {
        Post::insert(
            conn,
            NewPost {
                author_id,
                title: title.to_owned(),
                content: SafeString::new("Content"),
                creation_date: Some(NaiveDate::from_ymd(2022, 6, day).and_hms(12, 0, 0)),
            },
        )
        .unwrap()
    }

    #[test]
    fn feed_is_empty_without_follows() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let (alice, bob) = (&users[0], &users[1]);

            post_at(&conn, bob.id, "Bob post", 1);
            assert_eq!(Post::from_followed(&conn, alice).unwrap().len(), 0);
            Ok(())
        });
    }

    #[test]
    fn feed_is_most_recent_first() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let (alice, bob) = (&users[0], &users[1]);

            let p1 = post_at(&conn, bob.id, "First", 1);
            let p2 = post_at(&conn, bob.id, "Second", 2);
            let p3 = post_at(&conn, bob.id, "Third", 3);
            Follow::insert(
                &conn,
                NewFollow {
                    follower_id: alice.id,
                    following_id: bob.id,
                },
            )
            .unwrap();

            let feed = Post::from_followed(&conn, alice).unwrap();
            assert_eq!(
                feed.iter().map(|p| p.id).collect::<Vec<_>>(),
                vec![p3.id, p2.id, p1.id]
            );
            Ok(())
        });
    }

    #[test]
    fn feed_keeps_insertion_order_on_equal_timestamps() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let (alice, bob) = (&users[0], &users[1]);

            let p1 = post_at(&conn, bob.id, "First", 1);
            let p2 = post_at(&conn, bob.id, "Same moment", 1);
            Follow::insert(
                &conn,
                NewFollow {
                    follower_id: alice.id,
                    following_id: bob.id,
                },
            )
            .unwrap();

            let feed = Post::from_followed(&conn, alice).unwrap();
            assert_eq!(
                feed.iter().map(|p| p.id).collect::<Vec<_>>(),
                vec![p1.id, p2.id]
            );
            Ok(())
        });
    }

    #[test]
    fn feed_only_contains_followed_authors() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let (alice, bob, carol) = (&users[0], &users[1], &users[2]);

            let bob_post = post_at(&conn, bob.id, "Bob post", 1);
            post_at(&conn, carol.id, "Carol post", 2);
            Follow::insert(
                &conn,
                NewFollow {
                    follower_id: alice.id,
                    following_id: bob.id,
                },
            )
            .unwrap();

            let feed = Post::from_followed(&conn, alice).unwrap();
            assert_eq!(
                feed.iter().map(|p| p.id).collect::<Vec<_>>(),
                vec![bob_post.id]
            );
            Ok(())
        });
    }

    #[test]
    fn recents_cover_every_author() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let (bob, carol) = (&users[1], &users[2]);

            post_at(&conn, bob.id, "Older", 1);
            let newest = post_at(&conn, carol.id, "Newer", 2);

            let all = Post::recents(&conn).unwrap();
            assert_eq!(all.len(), 2);
            assert_eq!(all[0].id, newest.id);
            Ok(())
        });
    }

    #[test]
    fn unknown_post_is_not_found() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            user_tests::fill_database(&conn);
            assert!(matches!(Post::get(&conn, 99_999), Err(Error::NotFound)));
            Ok(())
        });
    }

    #[test]
    fn to_data_attaches_author_identity() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let bob = &users[1];
            let post = post_at(&conn, bob.id, "A post", 1);

            let expected = json!({
                "id": post.id,
                "title": "A post",
                "content": "Content",
                "creation_date": "2022-06-01T12:00:00",
                "author": {
                    "id": bob.id,
                    "username": "bob",
                    "display_name": "Bob",
                    "summary": "Hello there, I'm Bob",
                },
            });
            assert_json_eq!(to_value(post.to_data(&conn).unwrap()).unwrap(), expected);
            Ok(())
        });
    }
}
