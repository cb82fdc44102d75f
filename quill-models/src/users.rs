use crate::{db_conn::DbConn, posts::Post, schema::users, Connection, Error, Result};
use chrono::NaiveDateTime;
use diesel::{self, BoolExpressionMethods, ExpressionMethods, QueryDsl, RunQueryDsl};
use quill_api::users::UserData;
use rocket::{
    http::Status,
    outcome::IntoOutcome,
    request::{self, FromRequest, Request},
};
use std::hash::{Hash, Hasher};

pub const AUTH_COOKIE: &str = "user_id";

const BCRYPT_COST: u32 = 10;

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub hashed_password: String,
    pub summary: String,
    pub creation_date: NaiveDateTime,
}

#[derive(Default, Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub hashed_password: String,
    pub summary: String,
}

impl User {
    insert!(users, NewUser);
    get!(users);
    find_by!(users, find_by_username, username as &str);
    find_by!(users, find_by_email, email as &str);

    pub fn list(conn: &Connection) -> Result<Vec<User>> {
        users::table
            .order(users::username.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    /// Deletes the account along with everything it owns: its posts (and
    /// their comments), the comments it wrote elsewhere, and every follow
    /// edge it appears in, on either side.
    pub fn delete(&self, conn: &Connection) -> Result<()> {
        use crate::schema::{comments, follows};

        tracing::info!("deleting user {}", self.username);

        for post in Post::list_by_author(conn, self.id)? {
            post.delete(conn)?;
        }

        diesel::delete(comments::table.filter(comments::author_id.eq(self.id)))
            .execute(conn)?;
        diesel::delete(
            follows::table.filter(
                follows::follower_id
                    .eq(self.id)
                    .or(follows::following_id.eq(self.id)),
            ),
        )
        .execute(conn)?;

        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    pub fn hash_pass(pass: &str) -> Result<String> {
        bcrypt::hash(pass, BCRYPT_COST).map_err(Error::from)
    }

    pub fn auth(&self, pass: &str) -> bool {
        bcrypt::verify(pass, &self.hashed_password).unwrap_or(false)
    }

    pub fn login(conn: &Connection, ident: &str, password: &str) -> Result<User> {
        let user =
            User::find_by_email(conn, ident).or_else(|_| User::find_by_username(conn, ident));

        match user {
            Ok(user) => {
                if user.auth(password) {
                    Ok(user)
                } else {
                    Err(Error::Unauthorized)
                }
            }
            Err(_) => {
                // Hash the password anyway, so that a failed login takes
                // about as long whether the account exists or not.
                let _ = User::hash_pass(password);
                Err(Error::Unauthorized)
            }
        }
    }

    pub fn reset_password(&self, conn: &Connection, pass: &str) -> Result<()> {
        diesel::update(self)
            .set(users::hashed_password.eq(User::hash_pass(pass)?))
            .execute(conn)?;
        Ok(())
    }

    pub fn get_followed(&self, conn: &Connection) -> Result<Vec<User>> {
        use crate::schema::follows;
        let f = follows::table
            .filter(follows::follower_id.eq(self.id))
            .select(follows::following_id);
        users::table
            .filter(users::id.eq_any(f))
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn count_followed(&self, conn: &Connection) -> Result<i64> {
        use crate::schema::follows;
        follows::table
            .filter(follows::follower_id.eq(self.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn get_followers(&self, conn: &Connection) -> Result<Vec<User>> {
        use crate::schema::follows;
        let f = follows::table
            .filter(follows::following_id.eq(self.id))
            .select(follows::follower_id);
        users::table
            .filter(users::id.eq_any(f))
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn count_followers(&self, conn: &Connection) -> Result<i64> {
        use crate::schema::follows;
        follows::table
            .filter(follows::following_id.eq(self.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn is_following(&self, conn: &Connection, other_id: i32) -> Result<bool> {
        use crate::schema::follows;
        follows::table
            .filter(follows::follower_id.eq(self.id))
            .filter(follows::following_id.eq(other_id))
            .count()
            .get_result::<i64>(conn)
            .map_err(Error::from)
            .map(|r| r > 0)
    }

    pub fn is_followed_by(&self, conn: &Connection, other_id: i32) -> Result<bool> {
        use crate::schema::follows;
        follows::table
            .filter(follows::follower_id.eq(other_id))
            .filter(follows::following_id.eq(self.id))
            .count()
            .get_result::<i64>(conn)
            .map_err(Error::from)
            .map(|r| r > 0)
    }

    pub fn to_data(&self) -> UserData {
        UserData {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            summary: self.summary.clone(),
        }
    }
}

impl<'a, 'r> FromRequest<'a, 'r> for User {
    type Error = ();

    fn from_request(request: &'a Request<'r>) -> request::Outcome<User, ()> {
        let conn = request.guard::<DbConn>()?;
        request
            .cookies()
            .get_private(AUTH_COOKIE)
            .and_then(|cookie| cookie.value().parse().ok())
            .and_then(|id| User::get(&*conn, id).ok())
            .into_outcome((Status::Unauthorized, ()))
    }
}

impl Eq for User {}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl NewUser {
    /// Creates a new account, hashing the password before it is stored.
    pub fn new_local(
        conn: &Connection,
        username: String,
        display_name: String,
        summary: &str,
        email: Option<String>,
        password: &str,
    ) -> Result<User> {
        User::insert(
            conn,
            NewUser {
                username,
                display_name,
                email,
                hashed_password: User::hash_pass(password)?,
                summary: summary.to_owned(),
            },
        )
    }
}
