use crate::{schema::follows, users::User, Connection, Error, Result};
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};

/// A directed edge of the follow graph: `follower_id` follows
/// `following_id`. Edges are never implied in the other direction.
#[derive(Clone, Debug, Queryable, Identifiable, Associations)]
#[belongs_to(User, foreign_key = "following_id")]
pub struct Follow {
    pub id: i32,
    pub follower_id: i32,
    pub following_id: i32,
}

#[derive(Insertable)]
#[table_name = "follows"]
pub struct NewFollow {
    pub follower_id: i32,
    pub following_id: i32,
}

impl Follow {
    get!(follows);
    last!(follows);

    /// Creates the edge. The followed user must exist. Following the same
    /// person twice trips the uniqueness constraint on
    /// `(follower_id, following_id)`, surfaced as `Error::Conflict`.
    pub fn insert(conn: &Connection, new: NewFollow) -> Result<Follow> {
        User::get(conn, new.following_id)?;
        diesel::insert_into(follows::table)
            .values(&new)
            .execute(conn)
            .map_err(Error::from)?;
        Self::last(conn)
    }

    pub fn find(conn: &Connection, from: i32, to: i32) -> Result<Follow> {
        follows::table
            .filter(follows::follower_id.eq(from))
            .filter(follows::following_id.eq(to))
            .get_result(conn)
            .map_err(Error::from)
    }

    /// Removes the edge if it exists. Unfollowing someone you were not
    /// following is a successful no-op.
    pub fn delete(conn: &Connection, from: i32, to: i32) -> Result<()> {
        diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(from))
                .filter(follows::following_id.eq(to)),
        )
        .execute(conn)
        .map(|_| ())
        .map_err(Error::from)
    }

    /// Everyone `user_id` follows, as a set of ids. Feed composition works
    /// exclusively from this.
    pub fn followed_ids(conn: &Connection, user_id: i32) -> Result<Vec<i32>> {
        follows::table
            .filter(follows::follower_id.eq(user_id))
            .select(follows::following_id)
            .load(conn)
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tests::db, users::tests as user_tests};
    use diesel::Connection;

    #[test]
    fn follow_then_unfollow() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let (alice, bob) = (&users[0], &users[1]);

            Follow::insert(
                &conn,
                NewFollow {
                    follower_id: alice.id,
                    following_id: bob.id,
                },
            )
            .unwrap();
            assert!(Follow::followed_ids(&conn, alice.id)
                .unwrap()
                .contains(&bob.id));
            assert!(Follow::find(&conn, alice.id, bob.id).is_ok());
            assert!(alice.is_following(&conn, bob.id).unwrap());
            assert!(bob.is_followed_by(&conn, alice.id).unwrap());
            // edges are directed
            assert!(!bob.is_following(&conn, alice.id).unwrap());

            let followed = alice.get_followed(&conn).unwrap();
            assert_eq!(followed.len(), 1);
            assert_eq!(followed[0].id, bob.id);
            assert_eq!(alice.count_followed(&conn).unwrap(), 1);
            assert_eq!(bob.get_followers(&conn).unwrap()[0].id, alice.id);
            assert_eq!(bob.count_followers(&conn).unwrap(), 1);

            Follow::delete(&conn, alice.id, bob.id).unwrap();
            assert!(!Follow::followed_ids(&conn, alice.id)
                .unwrap()
                .contains(&bob.id));
            assert!(Follow::find(&conn, alice.id, bob.id).is_err());

            // unfollowing again is fine
            Follow::delete(&conn, alice.id, bob.id).unwrap();
            Ok(())
        });
    }

    #[test]
    fn double_follow_is_a_conflict() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let (alice, bob) = (&users[0], &users[1]);

            Follow::insert(
                &conn,
                NewFollow {
                    follower_id: alice.id,
                    following_id: bob.id,
                },
            )
            .unwrap();
            let res = Follow::insert(
                &conn,
                NewFollow {
                    follower_id: alice.id,
                    following_id: bob.id,
                },
            );
            assert!(matches!(res, Err(Error::Conflict)));
            assert_eq!(Follow::followed_ids(&conn, alice.id).unwrap().len(), 1);
            Ok(())
        });
    }

    #[test]
    fn follow_unknown_user_is_not_found() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let res = Follow::insert(
                &conn,
                NewFollow {
                    follower_id: users[0].id,
                    following_id: 99_999,
                },
            );
            assert!(matches!(res, Err(Error::NotFound)));
            Ok(())
        });
    }

    #[test]
    fn self_follow_is_allowed() {
        let conn = db();
        conn.test_transaction::<_, (), _>(|| {
            let users = user_tests::fill_database(&conn);
            let alice = &users[0];
            Follow::insert(
                &conn,
                NewFollow {
                    follower_id: alice.id,
                    following_id: alice.id,
                },
            )
            .unwrap();
            assert!(Follow::followed_ids(&conn, alice.id)
                .unwrap()
                .contains(&alice.id));
            Ok(())
        });
    }
}
