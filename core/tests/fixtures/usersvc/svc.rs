use crate::vo::{PageQuery, PageRet, UserVo};
use std::fs::File;

/// User account service.
pub trait Usersvc {
    /// Page users
    ///
    /// # Arguments
    /// * `query` - filter and paging options
    ///
    /// # Returns
    /// One page of users
    fn page_users(&self, ctx: Context, query: PageQuery) -> Result<PageRet, Error>;

    /// Get user by user name
    ///
    /// # Arguments
    /// * `username` - login name
    fn get_user_username(&self, ctx: Context, username: String) -> Result<UserVo, Error>;

    /// Sign up a new account
    fn post_signup(
        &self,
        ctx: Context,
        username: String,
        password: String,
        age: i32,
    ) -> Result<i64, Error>;

    /// Update a user
    fn put_user(&self, ctx: Context, user: UserVo) -> Result<(), Error>;

    /// Remove a user
    fn delete_account(&self, ctx: Context, id: i64) -> Result<(), Error>;

    /// Upload an avatar with optional attachments
    fn upload_avatar(
        &self,
        ctx: Context,
        avatar: FileHeader,
        attachments: Vec<FileHeader>,
        caption: String,
    ) -> Result<(String, i64), Error>;

    /// Download an avatar
    ///
    /// # Returns
    /// The avatar image
    fn get_download_avatar(&self, ctx: Context, user_id: i64) -> Result<File, Error>;
}
