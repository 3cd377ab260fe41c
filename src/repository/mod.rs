use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::post::{NewPost, Post};
use crate::domain::topic::{NewTopic, Topic, TopicSummary};
use crate::domain::types::{
    AccountId, CategoryId, CategoryName, Email, PostId, TopicId, UserId, Username, VoteTarget,
    VoteValue,
};
use crate::domain::user::{Account, NewAccount, NewUserProfile, UserProfile};
use crate::domain::vote::Vote;
use crate::pagination::Pagination;

pub mod category;
pub mod errors;
pub mod post;
pub mod topic;
pub mod user;
pub mod vote;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters for listing the posts of a topic.
#[derive(Debug, Clone)]
pub struct PostListQuery {
    /// Topic identifier.
    pub topic_id: TopicId,
    /// Pagination parameters; `None` loads every post.
    pub pagination: Option<Pagination>,
}

impl PostListQuery {
    pub fn new(topic_id: TopicId) -> Self {
        Self {
            topic_id,
            pagination: None,
        }
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Read-only operations for accounts and forum profiles.
pub trait UserReader {
    /// Find the authentication identity registered under an email.
    fn get_account_by_email(&self, email: &Email) -> RepositoryResult<Option<Account>>;
    /// Resolve an authentication identity to its forum profile.
    fn get_profile_by_account_id(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Option<UserProfile>>;
    /// Retrieve a profile by its identifier.
    fn get_profile_by_id(&self, id: UserId) -> RepositoryResult<Option<UserProfile>>;
    /// Retrieve a profile by its unique username.
    fn get_profile_by_username(&self, username: &Username)
    -> RepositoryResult<Option<UserProfile>>;
    /// Load the profiles with the given identifiers; unknown ids are skipped.
    fn list_profiles_by_ids(&self, ids: &[UserId]) -> RepositoryResult<Vec<UserProfile>>;
}

/// Write operations for accounts and forum profiles.
pub trait UserWriter {
    /// Insert an account and its profile atomically.
    fn create_account(
        &self,
        account: &NewAccount,
        profile: &NewUserProfile,
    ) -> RepositoryResult<(Account, UserProfile)>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its exact name.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
}

/// Read-only operations for topic entities.
pub trait TopicReader {
    /// List a category's topics, most recently active first, joined with the
    /// author's username and the category's name.
    fn list_topics(&self, category_id: CategoryId) -> RepositoryResult<Vec<TopicSummary>>;
    /// Retrieve a topic by its identifier.
    fn get_topic_by_id(&self, id: TopicId) -> RepositoryResult<Option<Topic>>;
    /// Retrieve a topic joined with its author and category names.
    fn get_topic_summary(&self, id: TopicId) -> RepositoryResult<Option<TopicSummary>>;
}

/// Write operations for topic entities.
pub trait TopicWriter {
    /// Insert a topic and its initial post in one transaction.
    fn create_topic(&self, topic: &NewTopic) -> RepositoryResult<(Topic, Post)>;
}

/// Read-only operations for post entities.
pub trait PostReader {
    /// List posts of a topic, oldest first, returning the total count.
    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<(usize, Vec<Post>)>;
    /// Retrieve a post by its identifier.
    fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>>;
    /// Number of posts in a topic.
    fn count_posts(&self, topic_id: TopicId) -> RepositoryResult<usize>;
}

/// Write operations for post entities.
pub trait PostWriter {
    /// Insert a post and bump its topic's `last_activity_at` in one
    /// transaction.
    fn create_post(&self, post: &NewPost) -> RepositoryResult<Post>;
}

/// Read-only operations for votes.
pub trait VoteReader {
    /// Sum of all vote values on `target`.
    fn vote_score(&self, target: VoteTarget) -> RepositoryResult<i64>;
    /// The vote `user_id` holds on `target`, if any.
    fn get_vote(&self, user_id: UserId, target: VoteTarget) -> RepositoryResult<Option<Vote>>;
}

/// Write operations for votes.
pub trait VoteWriter {
    /// Insert or replace the user's vote on `target` in a single statement
    /// keyed on `(user_id, entity_type, entity_id)`. Only `Up`/`Down` are
    /// accepted.
    fn upsert_vote(
        &self,
        user_id: UserId,
        target: VoteTarget,
        value: VoteValue,
        now: NaiveDateTime,
    ) -> RepositoryResult<usize>;
    /// Remove the user's vote on `target`. Returns the number of deleted rows.
    fn delete_vote(&self, user_id: UserId, target: VoteTarget) -> RepositoryResult<usize>;
}
