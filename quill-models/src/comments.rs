use crate::{
    posts::Post, safe_string::SafeString, schema::comments, users::User, Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use quill_api::comments::CommentData;

#[derive(Clone, Debug, Queryable, Identifiable, Associations)]
#[belongs_to(Post)]
#[belongs_to(User, foreign_key = "author_id")]
pub struct Comment {
    pub id: i32,
    pub content: SafeString,
    pub post_id: i32,
    pub author_id: i32,
    pub creation_date: NaiveDateTime,
}

#[derive(Default, Insertable)]
#[table_name = "comments"]
pub struct NewComment {
    pub content: SafeString,
    pub post_id: i32,
    pub author_id: i32,
}

impl Comment {
    get!(comments);
    last!(comments);

    /// Attaches a comment to a post. The post must exist.
    pub fn insert(conn: &Connection, new: NewComment) -> Result<Comment> {
        Post::get(conn, new.post_id)?;
        diesel::insert_into(comments::table)
            .values(&new)
            .execute(conn)
            .map_err(Error::from)?;
        Self::last(conn)
    }

    /// The comment thread of a post, oldest first.
    pub fn list_by_post(conn: &Connection, post_id: i32) -> Result<Vec<Comment>> {
        comments::table
            .filter(comments::post_id.eq(post_id))
            .order((comments::creation_date.asc(), comments::id.asc()))
            .load::<Comment>(conn)
            .map_err(Error::from)
    }

    pub fn get_author(&self, conn: &Connection) -> Result<User> {
        User::get(conn, self.author_id)
    }

    pub fn get_post(&self, conn: &Connection) -> Result<Post> {
        Post::get(conn, self.post_id)
    }

    pub fn to_data(&self, conn: &Connection) -> Result<CommentData> {
        Ok(CommentData {
            id: self.id,
            post_id: self.post_id,
            content: self.content.get().clone(),
            creation_date: self.creation_date,
            author: self.get_author(conn)?.to_data(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{posts::NewPost, tests::db, users::tests as user_tests};
    use diesel::Connection;

    fn prepare(conn: &crate::Connection) -> (Vec<crate::users::User>, Post) {
        let users = user_tests::fill_database(conn);
        let post = Post::insert(
            conn,
            NewPost {
                author_id: users[0].id,
                title: "A post".to_owned(),
                content: SafeString::new("Hello"),
                creation_date: None,
            },
        )
        .unwrap();
        (users, post)
    }

    #[test]
    fn thread_in_creation_order_with_authors() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let (users, post) = prepare(&conn);
            let (bob, carol) = (&users[1], &users[2]);

            let first = Comment::insert(
                &conn,
                NewComment {
                    content: SafeString::new("First!"),
                    post_id: post.id,
                    author_id: bob.id,
                },
            )
            .unwrap();
            let second = Comment::insert(
                &conn,
                NewComment {
                    content: SafeString::new("Second."),
                    post_id: post.id,
                    author_id: carol.id,
                },
            )
            .unwrap();

            assert_eq!(first.get_post(&conn).unwrap().id, post.id);
            assert_eq!(Comment::get(&conn, first.id).unwrap().id, first.id);

            let details = post.to_details(&conn).unwrap();
            assert_eq!(details.comments.len(), 2);
            assert_eq!(details.comments[0].id, first.id);
            assert_eq!(details.comments[1].id, second.id);
            assert_eq!(details.comments[0].author.username, "bob");
            assert_eq!(details.comments[1].author.username, "carol");
            Ok(())
        });
    }

    #[test]
    fn comment_on_unknown_post_is_not_found() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let res = Comment::insert(
                &conn,
                NewComment {
                    content: SafeString::new("Where does this go?"),
                    post_id: 99_999,
                    author_id: users[0].id,
                },
            );
            assert!(matches!(res, Err(crate::Error::NotFound)));
            Ok(())
        });
    }

}
